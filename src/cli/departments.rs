use std::collections::BTreeMap;

use clap::{Parser, ValueEnum};
use coursegraph::Catalog;
use tracing::instrument;

use super::Context;

#[derive(Debug, Parser, Default)]
#[command(about = "List departments with course counts")]
pub struct Departments {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Print department names only.
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

impl Departments {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let catalog = super::open_catalog(context)?;

        if self.quiet {
            for department in catalog.departments() {
                println!("{department}");
            }
            return Ok(());
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for name in catalog.course_names() {
            *counts.entry(Catalog::department_of(name)).or_insert(0) += 1;
        }

        match self.output {
            OutputFormat::Json => {
                let rows: Vec<_> = counts
                    .iter()
                    .map(|(department, count)| {
                        serde_json::json!({"department": department, "count": count})
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            OutputFormat::Table => {
                println!("{:<12} Courses", "Department");
                for (department, count) in &counts {
                    println!("{department:<12} {count}");
                }
            }
        }

        Ok(())
    }
}
