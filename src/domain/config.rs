use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::MAX_GRAPH_COURSES;

/// Configuration for the catalog explorer.
///
/// Holds the location of the catalog data file and presentation limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Path to the catalog JSON file.
    catalog: PathBuf,

    /// Maximum number of courses shown in the graph view at once.
    ///
    /// The graph stays responsive by capping the visible node set; narrowing
    /// the search or focusing a course shows the rest.
    max_graph_courses: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            max_graph_courses: MAX_GRAPH_COURSES,
        }
    }
}

/// Errors reading or writing a [`Config`] file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file content is not valid config TOML.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized or the file
    /// cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to the catalog JSON file.
    #[must_use]
    pub fn catalog(&self) -> &Path {
        &self.catalog
    }

    /// Sets the catalog path.
    pub fn set_catalog(&mut self, path: PathBuf) {
        self.catalog = path;
    }

    /// Maximum number of courses shown in the graph view at once.
    #[must_use]
    pub const fn max_graph_courses(&self) -> usize {
        self.max_graph_courses
    }

    /// Sets the graph cap. A cap of zero is clamped to one: an empty graph
    /// view for every query is never useful.
    pub const fn set_max_graph_courses(&mut self, cap: usize) {
        self.max_graph_courses = if cap == 0 { 1 } else { cap };
    }
}

fn default_catalog() -> PathBuf {
    PathBuf::from("graph.json")
}

const fn default_max_graph_courses() -> usize {
    MAX_GRAPH_COURSES
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_catalog")]
        catalog: PathBuf,

        #[serde(default = "default_max_graph_courses")]
        max_graph_courses: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                catalog,
                max_graph_courses,
            } => Self {
                catalog,
                max_graph_courses,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            catalog: config.catalog,
            max_graph_courses: config.max_graph_courses,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ncatalog = \"data/n_graph.json\"\nmax_graph_courses = 50\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.catalog(), Path::new("data/n_graph.json"));
        assert_eq!(config.max_graph_courses(), 50);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_graph_courses(), MAX_GRAPH_COURSES);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        assert!(matches!(
            Config::load(&missing),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn save_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = Config::default();
        config.set_max_graph_courses(25);
        config.save(&path).unwrap();

        let reloaded = Config::load(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn zero_cap_is_clamped() {
        let mut config = Config::default();
        config.set_max_graph_courses(0);
        assert_eq!(config.max_graph_courses(), 1);
    }
}
