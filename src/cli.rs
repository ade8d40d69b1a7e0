use std::path::{Path, PathBuf};

mod departments;
mod graph;
mod list;
mod show;
mod status;
mod terminal;

use anyhow::Context as _;
use clap::ArgAction;
use coursegraph::Catalog;
use departments::Departments;
use graph::Graph;
use list::List;
use show::Show;
use status::Status;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(long, default_value = "cgr.toml", global = true)]
    config: PathBuf,

    /// The path to the catalog JSON file (overrides the configuration file)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Resolved settings shared by every subcommand.
#[derive(Debug)]
pub struct Context {
    catalog: PathBuf,
    max_graph_courses: usize,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = Self::load_config(&self.config)?;
        let context = Context {
            catalog: self
                .catalog
                .unwrap_or_else(|| config.catalog().to_path_buf()),
            max_graph_courses: config.max_graph_courses(),
        };

        self.command
            .unwrap_or_else(|| Command::Status(Status::default()))
            .run(&context)
    }

    fn load_config(path: &Path) -> anyhow::Result<coursegraph::Config> {
        if path.exists() {
            coursegraph::Config::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))
        } else {
            Ok(coursegraph::Config::default())
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Loads the catalog named by the resolved settings.
fn open_catalog(context: &Context) -> anyhow::Result<Catalog> {
    coursegraph::load_catalog(&context.catalog)
        .with_context(|| format!("failed to load catalog from {}", context.catalog.display()))
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show catalog summary (default)
    Status(Status),

    /// List courses with search and department filters
    List(List),

    /// List departments with course counts
    Departments(Departments),

    /// Show detailed information about a course
    Show(Show),

    /// Emit the visible graph: node set and prerequisite edges
    Graph(Graph),

    /// Show or modify configuration settings
    Config(Config),
}

impl Command {
    fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(context)?,
            Self::List(command) => command.run(context)?,
            Self::Departments(command) => command.run(context)?,
            Self::Show(command) => command.run(context)?,
            Self::Graph(command) => command.run(context)?,
            Self::Config(command) => command.run()?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Config {
    /// The path to the configuration file
    #[arg(long, default_value = "cgr.toml")]
    file: PathBuf,

    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Config {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => {
                let config = Cli::load_config(&self.file)?;

                println!("Configuration:");
                println!("  catalog: {}", config.catalog().display());
                println!("  max_graph_courses: {}", config.max_graph_courses());
            }
            ConfigCommand::Set { key, value } => {
                let mut config = Cli::load_config(&self.file)?;

                match key.as_str() {
                    "catalog" => {
                        config.set_catalog(PathBuf::from(&value));
                        config
                            .save(&self.file)
                            .map_err(|e| anyhow::anyhow!("{e}"))?;
                        println!("catalog = {value}");
                    }
                    "max_graph_courses" => {
                        let cap = value.parse::<usize>().map_err(|_| {
                            anyhow::anyhow!("Value must be a non-negative integer")
                        })?;
                        config.set_max_graph_courses(cap);
                        config
                            .save(&self.file)
                            .map_err(|e| anyhow::anyhow!("{e}"))?;
                        println!("max_graph_courses = {}", config.max_graph_courses());
                    }
                    _ => {
                        return Err(anyhow::anyhow!(
                            "Unknown configuration key: '{key}'\nSupported keys: catalog, \
                             max_graph_courses",
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    fn write_catalog(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("graph.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            br#"{
                "CS 100": {"prereq_tree": null, "coreq_tree": null, "restrictions": [],
                           "desc": "Intro.", "title": "Roadmap to Computing", "credits": 3},
                "CS 113": {"prereq_tree": {"type": "AND", "children": [
                               {"type": "COURSE", "course": "CS 100"}]},
                           "coreq_tree": null, "restrictions": [],
                           "desc": "Programming.", "title": "Intro to Computer Science", "credits": 3},
                "MATH 111": {"prereq_tree": null, "coreq_tree": null, "restrictions": [],
                             "desc": "Calc.", "title": "Calculus I", "credits": 4}
            }"#,
        )
        .unwrap();
        path
    }

    fn context(dir: &std::path::Path) -> Context {
        Context {
            catalog: write_catalog(dir),
            max_graph_courses: coursegraph::MAX_GRAPH_COURSES,
        }
    }

    #[test]
    fn open_catalog_loads_courses() {
        let tmp = tempfile::tempdir().unwrap();
        let context = context(tmp.path());

        let catalog = open_catalog(&context).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.departments(), ["CS", "MATH"]);
    }

    #[test]
    fn open_catalog_fails_on_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let context = Context {
            catalog: tmp.path().join("missing.json"),
            max_graph_courses: coursegraph::MAX_GRAPH_COURSES,
        };

        assert!(open_catalog(&context).is_err());
    }

    #[test]
    fn status_runs_over_a_real_catalog_file() {
        let tmp = tempfile::tempdir().unwrap();
        let context = context(tmp.path());

        Status::default()
            .run(&context)
            .expect("status should succeed");
    }

    #[test]
    fn departments_runs_over_a_real_catalog_file() {
        let tmp = tempfile::tempdir().unwrap();
        let context = context(tmp.path());

        Departments::default()
            .run(&context)
            .expect("departments should succeed");
    }

    #[test]
    fn graph_runs_over_a_real_catalog_file() {
        let tmp = tempfile::tempdir().unwrap();
        let context = context(tmp.path());

        Graph::default().run(&context).expect("graph should succeed");
    }
}
