//! Domain models for the course catalog.
//!
//! This module contains the core domain types: the requirement expression
//! tree, per-course data, the immutable catalog, and configuration.

/// Requirement expression tree and classification enums.
pub mod requirement;
pub use requirement::{GroupKind, RequirementNode, Restriction};

mod course;
pub use course::CourseInfo;

/// The immutable catalog and its derived indexes.
pub mod catalog;
pub use catalog::Catalog;

mod config;
pub use config::{Config, ConfigError};
