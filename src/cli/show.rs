use clap::Parser;
use coursegraph::{render, RenderedText, Session};
use tracing::instrument;

use super::terminal::Colorize;
use super::Context;

#[derive(Debug, Parser)]
#[command(about = "Display detailed information about a course")]
pub struct Show {
    /// The exact course name, e.g. "CS 280"
    course: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let catalog = super::open_catalog(context)?;

        let mut session = Session::new(&catalog);
        session.inspect(self.course.clone());

        let Some((name, info)) = session.detail() else {
            eprintln!("Course {} not found", self.course);
            std::process::exit(1);
        };

        match self.output {
            OutputFormat::Pretty => Self::output_pretty(name, info),
            OutputFormat::Json => Self::output_json(name, info)?,
        }

        Ok(())
    }

    fn output_pretty(name: &str, info: &coursegraph::CourseInfo) {
        println!("# {name}");
        if !info.title.is_empty() {
            println!("{}\n", info.title);
        }

        println!("{}", "Credits".dim());
        println!("  {}", info.credits);

        if !info.desc.is_empty() {
            println!("\n{}", "Description".dim());
            println!("  {}", info.desc);
        }

        println!("\n{}", "Prerequisites".dim());
        println!("  {}", styled(&render(info.prereq_tree.as_ref())));

        println!("\n{}", "Corequisites".dim());
        println!("  {}", styled(&render(info.coreq_tree.as_ref())));

        if !info.restrictions.is_empty() {
            println!("\n{}", "Restrictions".dim());
            for restriction in &info.restrictions {
                println!("  • {}", restriction.raw);
            }
        }
    }

    fn output_json(name: &str, info: &coursegraph::CourseInfo) -> anyhow::Result<()> {
        use serde_json::json;

        let output = json!({
            "name": name,
            "title": info.title,
            "credits": info.credits,
            "desc": info.desc,
            "prereq_tree": info.prereq_tree,
            "coreq_tree": info.coreq_tree,
            "prereq_text": render(info.prereq_tree.as_ref()).to_string(),
            "coreq_text": render(info.coreq_tree.as_ref()).to_string(),
            "restrictions": info.restrictions,
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

/// Flattens rendered requirement text, emphasizing the connectives.
fn styled(rendered: &RenderedText) -> String {
    rendered.to_string_with(|connective| connective.strong())
}
