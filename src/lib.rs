//! Course catalog prerequisite exploration
//!
//! A catalog is one JSON file mapping course names to prerequisite and
//! corequisite expression trees. This crate loads it, renders requirement
//! trees as text, and answers the search/department/focus queries a graph
//! view is built from.

pub mod domain;
pub use domain::{Catalog, Config, ConfigError, CourseInfo, GroupKind, RequirementNode, Restriction};

/// Prerequisite edge derivation over the visible course set.
pub mod graph;
pub use graph::{Edge, EdgeKind};

/// Session state and the pure query derivations.
pub mod query;
pub use query::{Selection, Session, MAX_GRAPH_COURSES};

/// Requirement tree rendering.
pub mod render;
pub use render::{render, RenderedText, Segment};

/// Catalog ingestion from JSON.
pub mod storage;
pub use storage::{catalog_from_reader, catalog_from_str, load_catalog, LoadError};
