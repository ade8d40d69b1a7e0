//! Ephemeral query state and the pure derivations over a [`Catalog`].
//!
//! A [`Session`] borrows an immutable catalog and carries the per-session
//! [`Selection`] (search text, department filter, focused course, inspected
//! course). Every view is recomputed from the current inputs on each call;
//! nothing is cached across mutations, so the derivations can never go stale.

use crate::domain::{Catalog, CourseInfo};

/// Default cap on the number of courses visible in the graph at once.
///
/// Rendering every course in a large catalog simultaneously is unusable and
/// slow; narrowing the search or focusing a single course lifts the rest into
/// view. Installations can override the cap through the config file.
pub const MAX_GRAPH_COURSES: usize = 100;

/// Per-session UI state. All fields start empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    search_query: String,
    department: Option<String>,
    selected_course: Option<String>,
    detail_course: Option<String>,
}

impl Selection {
    /// Current search text (empty means "no search filter").
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Current department filter, if any.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// The focused course, if any. Focus overrides all filters in the graph
    /// view.
    #[must_use]
    pub fn selected_course(&self) -> Option<&str> {
        self.selected_course.as_deref()
    }

    /// The course whose detail panel is open, if any.
    #[must_use]
    pub fn detail_course(&self) -> Option<&str> {
        self.detail_course.as_deref()
    }
}

/// A read session over a catalog: a borrowed [`Catalog`] plus a [`Selection`].
///
/// Sessions are cheap to create and independent of one another; any number of
/// them may borrow the same catalog concurrently.
#[derive(Debug, Clone)]
pub struct Session<'c> {
    catalog: &'c Catalog,
    selection: Selection,
    max_graph_courses: usize,
}

impl<'c> Session<'c> {
    /// Opens a session with an empty selection and the default graph cap.
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            selection: Selection::default(),
            max_graph_courses: MAX_GRAPH_COURSES,
        }
    }

    /// Replaces the graph cap (normally sourced from the config file).
    #[must_use]
    pub const fn with_max_graph_courses(mut self, cap: usize) -> Self {
        self.max_graph_courses = cap;
        self
    }

    /// The catalog this session reads from.
    #[must_use]
    pub const fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// The current selection state.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Updates the search text. An empty string clears the search filter.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.selection.search_query = query.into();
    }

    /// Sets or clears the department filter.
    pub fn set_department(&mut self, department: Option<String>) {
        self.selection.department = department;
    }

    /// Focuses a course: the graph shows only this course, and its detail
    /// panel opens. The course does not have to exist in the catalog; focus
    /// is a statement of intent, and an unknown name simply yields a graph
    /// with one unresolvable node and an empty detail panel.
    pub fn focus(&mut self, course: impl Into<String>) {
        let course = course.into();
        self.selection.selected_course = Some(course.clone());
        self.selection.detail_course = Some(course);
    }

    /// Opens the detail panel for a course without changing the graph view
    /// (clicking a node in the original interface).
    pub fn inspect(&mut self, course: impl Into<String>) {
        self.selection.detail_course = Some(course.into());
    }

    /// Clears the focused course and the detail panel. Search and department
    /// filters are kept.
    pub fn clear(&mut self) {
        self.selection.selected_course = None;
        self.selection.detail_course = None;
    }

    /// Course names matching the search text, case-insensitively, as a
    /// substring anywhere in the name. An empty search matches everything.
    /// Order follows the catalog (lexicographic).
    #[must_use]
    pub fn filtered_by_search(&self) -> Vec<&'c str> {
        let query = self.selection.search_query.to_lowercase();
        self.catalog
            .course_names()
            .filter(|name| query.is_empty() || name.to_lowercase().contains(&query))
            .collect()
    }

    /// The search results narrowed to the selected department, if one is set.
    ///
    /// Department membership is prefix-based: the course name must start with
    /// the department followed by a space, so `CS` never matches `CSE 101`.
    #[must_use]
    pub fn displayed(&self) -> Vec<&'c str> {
        let filtered = self.filtered_by_search();
        match &self.selection.department {
            None => filtered,
            Some(department) => {
                let prefix = format!("{department} ");
                filtered
                    .into_iter()
                    .filter(|name| name.starts_with(&prefix))
                    .collect()
            }
        }
    }

    /// The set of courses visible in the graph right now.
    ///
    /// With a focused course, that course alone is visible, filters
    /// notwithstanding. Otherwise the displayed list is truncated to the
    /// graph cap.
    #[must_use]
    pub fn visible_in_graph(&self) -> Vec<&str> {
        if let Some(course) = &self.selection.selected_course {
            return vec![course.as_str()];
        }

        let mut displayed = self.displayed();
        displayed.truncate(self.max_graph_courses);
        displayed
    }

    /// The course record behind the open detail panel.
    ///
    /// `None` when no panel is open or when the inspected name is not a
    /// catalog key; callers present the latter as "no data", never as an
    /// error.
    #[must_use]
    pub fn detail(&self) -> Option<(&'c str, &'c CourseInfo)> {
        let name = self.selection.detail_course.as_deref()?;
        self.catalog.get_entry(name)
    }
}
