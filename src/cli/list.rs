use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use coursegraph::{Catalog, CourseInfo, Session};
use regex::Regex;
use serde::Serialize;
use tracing::instrument;

use super::Context;

const DEFAULT_LIMIT: usize = 200;

/// Command arguments for `cgr list`.
#[derive(Debug, Parser)]
#[command(about = "List courses with search and department filters")]
pub struct List {
    /// Case-insensitive substring match against course names.
    search: Option<String>,

    /// Filter by department prefix (e.g. CS, MATH).
    #[arg(long, short, value_name = "DEPT")]
    department: Option<String>,

    /// Regular expression match against course names and titles.
    #[arg(long, conflicts_with = "search")]
    regex: Option<String>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,

    /// Limit number of rows returned.
    #[arg(long)]
    limit: Option<usize>,

    /// Skip the first N rows.
    #[arg(long)]
    offset: Option<usize>,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
struct SerializableRow<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    title: &'a str,
    credits: f64,
    has_prereqs: bool,
    has_coreqs: bool,
}

impl List {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let catalog = super::open_catalog(context)?;

        let mut session = Session::new(&catalog);
        if let Some(search) = &self.search {
            session.set_search(search.clone());
        }
        session.set_department(self.department.clone());

        let mut names = session.displayed();

        if let Some(pattern) = &self.regex {
            let regex =
                Regex::new(pattern).with_context(|| format!("invalid regex: {pattern}"))?;
            names.retain(|name| {
                regex.is_match(name)
                    || catalog
                        .get(name)
                        .is_some_and(|info| regex.is_match(&info.title))
            });
        }

        let names = apply_offset_limit(names, self.offset, self.limit);

        if names.is_empty() {
            if !self.quiet {
                println!("No courses matched.");
            }
            return Ok(());
        }

        match self.output {
            OutputFormat::Table => {
                render_table(&names, &catalog, self.quiet);
                Ok(())
            }
            OutputFormat::Json => render_json(&names, &catalog),
            OutputFormat::Csv => {
                render_csv(&names, &catalog, self.quiet);
                Ok(())
            }
        }
    }
}

fn apply_offset_limit<'a>(
    mut names: Vec<&'a str>,
    offset: Option<usize>,
    limit: Option<usize>,
) -> Vec<&'a str> {
    if let Some(off) = offset {
        if off < names.len() {
            names.drain(..off);
        } else {
            names.clear();
        }
    }

    let effective_limit = limit
        .and_then(|value| (value > 0).then_some(value))
        .unwrap_or(DEFAULT_LIMIT);
    names.truncate(effective_limit);
    names
}

fn row<'a>(name: &'a str, info: &'a CourseInfo) -> SerializableRow<'a> {
    SerializableRow {
        name,
        title: &info.title,
        credits: info.credits,
        has_prereqs: info.has_prereqs(),
        has_coreqs: info.has_coreqs(),
    }
}

fn render_table(names: &[&str], catalog: &Catalog, quiet: bool) {
    if quiet {
        for name in names {
            println!("{name}");
        }
        return;
    }

    let name_width = names
        .iter()
        .map(|name| name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    println!("{:<name_width$}  {:<7}  {:<7}  TITLE", "NAME", "CREDITS", "PREREQS");
    for name in names {
        let Some(info) = catalog.get(name) else {
            continue;
        };
        let prereqs = if info.has_prereqs() { "yes" } else { "-" };
        println!(
            "{name:<name_width$}  {:<7}  {prereqs:<7}  {}",
            info.credits, info.title
        );
    }
}

fn render_json(names: &[&str], catalog: &Catalog) -> anyhow::Result<()> {
    let rows: Vec<_> = names
        .iter()
        .filter_map(|name| catalog.get_entry(name))
        .map(|(name, info)| row(name, info))
        .collect();

    serde_json::to_writer_pretty(std::io::stdout(), &rows)
        .context("failed to render json output")?;
    println!();
    Ok(())
}

fn render_csv(names: &[&str], catalog: &Catalog, quiet: bool) {
    if !quiet {
        println!("name,title,credits,has_prereqs,has_coreqs");
    }

    for name in names {
        let Some(info) = catalog.get(name) else {
            continue;
        };
        println!(
            "{},{},{},{},{}",
            csv_escape(name),
            csv_escape(&info.title),
            info.credits,
            info.has_prereqs(),
            info.has_coreqs()
        );
    }
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn run_filters_by_search_and_department() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("graph.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            br#"{
                "CS 100": {"title": "Roadmap to Computing", "credits": 3},
                "MATH 111": {"title": "Calculus I", "credits": 4}
            }"#,
        )
        .unwrap();

        let list = List {
            search: Some("1".to_string()),
            department: Some("CS".to_string()),
            regex: None,
            output: OutputFormat::Table,
            quiet: true,
            limit: None,
            offset: None,
        };
        let context = Context {
            catalog: path,
            max_graph_courses: coursegraph::MAX_GRAPH_COURSES,
        };

        list.run(&context).expect("list should succeed");
    }

    #[test]
    fn run_rejects_invalid_regex() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("graph.json");
        std::fs::write(&path, "{}").unwrap();

        let list = List {
            search: None,
            department: None,
            regex: Some("[".to_string()),
            output: OutputFormat::Table,
            quiet: true,
            limit: None,
            offset: None,
        };
        let context = Context {
            catalog: path,
            max_graph_courses: coursegraph::MAX_GRAPH_COURSES,
        };

        assert!(list.run(&context).is_err());
    }

    #[test]
    fn offset_and_limit_window_the_rows() {
        let names = vec!["A 1", "B 2", "C 3", "D 4"];

        assert_eq!(
            apply_offset_limit(names.clone(), Some(1), Some(2)),
            ["B 2", "C 3"]
        );
        assert!(apply_offset_limit(names.clone(), Some(10), None).is_empty());
        assert_eq!(apply_offset_limit(names, None, None).len(), 4);
    }

    #[test]
    fn csv_escape_quotes_delimiters() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
