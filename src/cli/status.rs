use std::collections::BTreeMap;

use clap::Parser;
use coursegraph::Catalog;
use tracing::instrument;

use super::terminal::{is_narrow, Colorize};
use super::Context;

#[derive(Debug, Parser, Default)]
#[command(about = "Show course counts and catalog health")]
pub struct Status {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let catalog = super::open_catalog(context)?;

        if catalog.is_empty() {
            println!(
                "No courses found in {}. Check the catalog path with 'cgr config show'.",
                context.catalog.display()
            );
            return Ok(());
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for name in catalog.course_names() {
            *counts.entry(Catalog::department_of(name)).or_insert(0) += 1;
        }

        let total = catalog.len();
        let with_prereqs = catalog.iter().filter(|(_, info)| info.has_prereqs()).count();
        let with_coreqs = catalog.iter().filter(|(_, info)| info.has_coreqs()).count();
        let with_restrictions = catalog
            .iter()
            .filter(|(_, info)| !info.restrictions.is_empty())
            .count();

        match self.output {
            OutputFormat::Json => {
                Self::output_json(&counts, total, with_prereqs, with_coreqs, with_restrictions)?;
            }
            OutputFormat::Table => {
                if self.quiet {
                    Self::output_quiet(total, counts.len(), with_prereqs);
                } else {
                    Self::output_table(&counts, total, with_prereqs, with_coreqs, with_restrictions);
                }
            }
        }

        Ok(())
    }

    fn output_json(
        counts: &BTreeMap<&str, usize>,
        total: usize,
        with_prereqs: usize,
        with_coreqs: usize,
        with_restrictions: usize,
    ) -> anyhow::Result<()> {
        use serde_json::json;

        let departments: Vec<_> = counts
            .iter()
            .map(|(department, count)| {
                json!({
                    "department": department,
                    "count": count,
                })
            })
            .collect();

        let output = json!({
            "departments": departments,
            "total": total,
            "with_prereqs": with_prereqs,
            "with_coreqs": with_coreqs,
            "with_restrictions": with_restrictions,
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_quiet(total: usize, departments: usize, with_prereqs: usize) {
        println!("total={total} departments={departments} with_prereqs={with_prereqs}");
    }

    fn output_table(
        counts: &BTreeMap<&str, usize>,
        total: usize,
        with_prereqs: usize,
        with_coreqs: usize,
        with_restrictions: usize,
    ) {
        let narrow = is_narrow();

        println!("Course counts");
        println!("{}", "─────────────".dim());

        if narrow {
            // Stacked output for narrow terminals
            for (department, count) in counts {
                println!("{department}: {count}");
            }
            println!("Total: {total}");
        } else {
            println!("{:<12} Count", "Department");
            for (department, count) in counts {
                println!("{department:<12} {count}");
            }
            println!("Total        {total}");
        }

        println!();
        println!("With prerequisites:  {}", with_prereqs.to_string().success());
        println!("With corequisites:   {with_coreqs}");
        if with_restrictions == 0 {
            println!("With restrictions:   0");
        } else {
            println!(
                "With restrictions:   {}",
                with_restrictions.to_string().warning()
            );
        }
    }
}
