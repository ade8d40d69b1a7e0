use clap::{Parser, ValueEnum};
use coursegraph::graph::{edges, EdgeKind};
use coursegraph::Session;
use tracing::instrument;

use super::terminal::Colorize;
use super::Context;

#[derive(Debug, Parser, Default)]
#[command(about = "Emit the visible graph: node set and prerequisite edges")]
pub struct Graph {
    /// Case-insensitive substring match against course names.
    search: Option<String>,

    /// Filter by department prefix (e.g. CS, MATH).
    #[arg(long, short, value_name = "DEPT")]
    department: Option<String>,

    /// Focus a single course, ignoring all filters.
    #[arg(long, short)]
    focus: Option<String>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Emit edges only, tab-separated, for scripting.
    #[arg(long)]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
        })
    }
}

impl Graph {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let catalog = super::open_catalog(context)?;

        let mut session = Session::new(&catalog).with_max_graph_courses(context.max_graph_courses);
        if let Some(search) = &self.search {
            session.set_search(search.clone());
        }
        session.set_department(self.department.clone());
        if let Some(focus) = &self.focus {
            session.focus(focus.clone());
        }

        let nodes = session.visible_in_graph();
        let edges = edges(&catalog, &nodes);

        if self.quiet {
            for edge in &edges {
                println!("{}\t{}\t{}", edge.from, edge.to, kind_label(edge.kind));
            }
            return Ok(());
        }

        match self.output {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "nodes": nodes,
                    "edges": edges,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                println!("Nodes ({}):", nodes.len());
                for node in &nodes {
                    println!("  {node}");
                }

                println!();
                println!("Edges ({}):", edges.len());
                for edge in &edges {
                    let label = match edge.kind {
                        EdgeKind::And => kind_label(edge.kind).strong(),
                        EdgeKind::Or => kind_label(edge.kind).dim(),
                    };
                    println!("  {} → {}  [{label}]", edge.from, edge.to);
                }
            }
        }

        Ok(())
    }
}

const fn kind_label(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::And => "AND",
        EdgeKind::Or => "OR",
    }
}
