use serde::Serialize;

use super::requirement::{RequirementNode, Restriction};

/// Everything the catalog records about a single course.
///
/// `prereq_tree` and `coreq_tree` being `None` means "no requirement", not
/// "unknown requirement"; the renderer turns an absent tree into a literal
/// `None.`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseInfo {
    /// Prerequisite expression tree, when the course has one.
    pub prereq_tree: Option<RequirementNode>,
    /// Corequisite expression tree, when the course has one.
    pub coreq_tree: Option<RequirementNode>,
    /// Free-text enrollment restrictions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<Restriction>,
    /// Catalog description.
    pub desc: String,
    /// Course title, e.g. `"Intro to Computer Science"`.
    pub title: String,
    /// Credit hours.
    pub credits: f64,
}

impl CourseInfo {
    /// A course record with no requirements and empty metadata.
    ///
    /// Scraped catalog data is incomplete for some courses; this is the
    /// degenerate-but-valid baseline those entries reduce to.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            prereq_tree: None,
            coreq_tree: None,
            restrictions: Vec::new(),
            desc: String::new(),
            title: String::new(),
            credits: 0.0,
        }
    }

    /// Whether the course has a prerequisite tree.
    #[must_use]
    pub const fn has_prereqs(&self) -> bool {
        self.prereq_tree.is_some()
    }

    /// Whether the course has a corequisite tree.
    #[must_use]
    pub const fn has_coreqs(&self) -> bool {
        self.coreq_tree.is_some()
    }
}

impl Default for CourseInfo {
    fn default() -> Self {
        Self::empty()
    }
}
