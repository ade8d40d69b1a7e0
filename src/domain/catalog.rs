//! The immutable course catalog and its derived indexes.
//!
//! A [`Catalog`] is built once at startup and never mutated afterwards, so it
//! is safe to share by reference across any number of concurrent readers (it
//! is `Send + Sync` because it owns only immutable data).

use std::collections::{BTreeMap, BTreeSet};

use super::course::CourseInfo;

/// The full mapping from course name to course data, plus derived indexes.
///
/// Keys are unique by construction (`BTreeMap`) and iterate in lexicographic
/// order, which is exactly the order the sidebar list and the search filter
/// need. The department list is derived once at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    courses: BTreeMap<String, CourseInfo>,
    departments: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from a raw course mapping, deriving the department
    /// index.
    #[must_use]
    pub fn new(courses: BTreeMap<String, CourseInfo>) -> Self {
        let departments: BTreeSet<&str> =
            courses.keys().map(|name| Self::department_of(name)).collect();
        let departments = departments.into_iter().map(str::to_string).collect();

        Self {
            courses,
            departments,
        }
    }

    /// The department prefix of a course name: everything up to (not
    /// including) the first space. A name with no space is its own
    /// department.
    #[must_use]
    pub fn department_of(name: &str) -> &str {
        name.split(' ').next().unwrap_or(name)
    }

    /// Every course name, lexicographically sorted, no duplicates.
    pub fn course_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.courses.keys().map(String::as_str)
    }

    /// Every distinct department, lexicographically sorted.
    #[must_use]
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    /// Looks up a course by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CourseInfo> {
        self.courses.get(name)
    }

    /// Looks up a course, returning the catalog's own key alongside the
    /// record. Useful when the result must outlive the query string.
    #[must_use]
    pub fn get_entry(&self, name: &str) -> Option<(&str, &CourseInfo)> {
        self.courses
            .get_key_value(name)
            .map(|(key, info)| (key.as_str(), info))
    }

    /// Whether `name` is a valid catalog key.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.courses.contains_key(name)
    }

    /// Iterates over all `(name, info)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CourseInfo)> + '_ {
        self.courses.iter().map(|(name, info)| (name.as_str(), info))
    }

    /// Number of courses in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog holds no courses at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
