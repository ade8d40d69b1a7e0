//! Prerequisite edges implied by the requirement trees of visible courses.
//!
//! The graph view needs more than a node set: each visible course contributes
//! directed edges from its prerequisite courses, tagged with whether the
//! prerequisite is mandatory ([`EdgeKind::And`]) or one of several
//! alternatives ([`EdgeKind::Or`]). Deriving those edges is pure catalog
//! logic and lives here; drawing them does not.

use std::collections::BTreeMap;

use petgraph::graphmap::DiGraphMap;
use serde::Serialize;

use crate::domain::requirement::{GroupKind, RequirementNode};
use crate::domain::Catalog;

/// Whether an edge represents a hard requirement or one alternative among
/// several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    /// The prerequisite is mandatory.
    And,
    /// The prerequisite is one alternative within an OR group.
    Or,
}

impl From<GroupKind> for EdgeKind {
    fn from(kind: GroupKind) -> Self {
        match kind {
            GroupKind::And => Self::And,
            GroupKind::Or => Self::Or,
        }
    }
}

/// A directed prerequisite edge: `from` must (or may, for OR) be taken
/// before `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge<'c> {
    /// The prerequisite course.
    pub from: &'c str,
    /// The course that requires it.
    pub to: &'c str,
    /// Mandatory or alternative.
    pub kind: EdgeKind,
}

/// Derives the edge list for a set of visible courses.
///
/// For every visible course that is a catalog key and has a prerequisite
/// tree, each `Course` leaf naming a valid catalog key yields one edge. The
/// edge kind is the kind of the innermost group enclosing the leaf; a bare
/// course at the root counts as mandatory. References to names outside the
/// catalog yield no edge (they still appear in rendered text). Duplicate
/// `(from, to)` pairs collapse to one edge, with [`EdgeKind::And`] winning
/// over [`EdgeKind::Or`]: a hard requirement is stronger than an
/// alternative. Output order is deterministic (sorted by `from`, then `to`).
#[must_use]
pub fn edges<'c>(catalog: &'c Catalog, visible: &[&str]) -> Vec<Edge<'c>> {
    let mut collected: BTreeMap<(&'c str, &'c str), EdgeKind> = BTreeMap::new();

    for name in visible {
        let Some((to, info)) = catalog.get_entry(name) else {
            continue;
        };
        if let Some(tree) = &info.prereq_tree {
            collect(catalog, tree, GroupKind::And, to, &mut collected);
        }
    }

    collected
        .into_iter()
        .map(|((from, to), kind)| Edge { from, to, kind })
        .collect()
}

fn collect<'c>(
    catalog: &'c Catalog,
    node: &RequirementNode,
    enclosing: GroupKind,
    to: &'c str,
    out: &mut BTreeMap<(&'c str, &'c str), EdgeKind>,
) {
    match node {
        RequirementNode::Group { kind, children } => {
            for child in children {
                collect(catalog, child, *kind, to, out);
            }
        }
        RequirementNode::Course { course, .. } => {
            let Some((from, _)) = catalog.get_entry(course) else {
                return;
            };
            let kind = EdgeKind::from(enclosing);
            out.entry((from, to))
                .and_modify(|existing| {
                    if kind == EdgeKind::And {
                        *existing = EdgeKind::And;
                    }
                })
                .or_insert(kind);
        }
        RequirementNode::Placement { .. }
        | RequirementNode::Permission { .. }
        | RequirementNode::Standing { .. }
        | RequirementNode::Skill { .. } => {}
    }
}

/// Materializes the visible courses and their prerequisite edges as a
/// directed graph, for callers that want graph algorithms over the view.
///
/// Every visible name becomes a node, including names that are not catalog
/// keys (a focused unknown course is still a node, just with no edges).
#[must_use]
pub fn prereq_graph<'a>(catalog: &'a Catalog, visible: &[&'a str]) -> DiGraphMap<&'a str, EdgeKind> {
    let mut graph = DiGraphMap::new();
    for name in visible {
        graph.add_node(*name);
    }
    for edge in edges(catalog, visible) {
        graph.add_edge(edge.from, edge.to, edge.kind);
    }
    graph
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::CourseInfo;

    fn course_with_prereqs(tree: RequirementNode) -> CourseInfo {
        CourseInfo {
            prereq_tree: Some(tree),
            ..CourseInfo::empty()
        }
    }

    fn catalog(entries: Vec<(&str, CourseInfo)>) -> Catalog {
        let courses: BTreeMap<_, _> = entries
            .into_iter()
            .map(|(name, info)| (name.to_string(), info))
            .collect();
        Catalog::new(courses)
    }

    #[test]
    fn bare_course_root_is_a_mandatory_edge() {
        let catalog = catalog(vec![
            ("CS 100", CourseInfo::empty()),
            ("CS 113", course_with_prereqs(RequirementNode::course("CS 100"))),
        ]);

        let edges = edges(&catalog, &["CS 113"]);
        assert_eq!(
            edges,
            [Edge {
                from: "CS 100",
                to: "CS 113",
                kind: EdgeKind::And,
            }]
        );
    }

    #[test]
    fn innermost_group_decides_the_kind() {
        let tree = RequirementNode::group(
            GroupKind::And,
            vec![
                RequirementNode::course("CS 100"),
                RequirementNode::group(
                    GroupKind::Or,
                    vec![
                        RequirementNode::course("MATH 111"),
                        RequirementNode::course("MATH 112"),
                    ],
                ),
            ],
        );
        let catalog = catalog(vec![
            ("CS 100", CourseInfo::empty()),
            ("CS 280", course_with_prereqs(tree)),
            ("MATH 111", CourseInfo::empty()),
            ("MATH 112", CourseInfo::empty()),
        ]);

        let edges = edges(&catalog, &["CS 280"]);
        let kinds: BTreeMap<_, _> = edges.iter().map(|e| (e.from, e.kind)).collect();
        assert_eq!(kinds["CS 100"], EdgeKind::And);
        assert_eq!(kinds["MATH 111"], EdgeKind::Or);
        assert_eq!(kinds["MATH 112"], EdgeKind::Or);
    }

    #[test]
    fn unknown_references_yield_no_edge() {
        let catalog = catalog(vec![(
            "CS 113",
            course_with_prereqs(RequirementNode::group(
                GroupKind::And,
                vec![
                    RequirementNode::course("CS 100"),
                    RequirementNode::course("RETIRED 1"),
                ],
            )),
        )]);

        // "CS 100" is not a catalog key here either, so nothing resolves.
        assert!(edges(&catalog, &["CS 113"]).is_empty());
    }

    #[test]
    fn non_course_leaves_contribute_nothing() {
        let tree = RequirementNode::group(
            GroupKind::Or,
            vec![
                RequirementNode::course("MATH 111"),
                RequirementNode::Standing {
                    standing: "Junior standing".to_string(),
                    normalized: None,
                },
            ],
        );
        let catalog = catalog(vec![
            ("CS 280", course_with_prereqs(tree)),
            ("MATH 111", CourseInfo::empty()),
        ]);

        let edges = edges(&catalog, &["CS 280"]);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].from, "MATH 111");
    }

    #[test]
    fn duplicate_pairs_collapse_and_mandatory_wins() {
        // The same prerequisite appears once in an OR group and once as a
        // hard requirement; the surviving edge must be AND regardless of
        // traversal order.
        let tree = RequirementNode::group(
            GroupKind::And,
            vec![
                RequirementNode::group(
                    GroupKind::Or,
                    vec![
                        RequirementNode::course("MATH 111"),
                        RequirementNode::course("MATH 112"),
                    ],
                ),
                RequirementNode::course("MATH 111"),
            ],
        );
        let catalog = catalog(vec![
            ("CS 280", course_with_prereqs(tree)),
            ("MATH 111", CourseInfo::empty()),
            ("MATH 112", CourseInfo::empty()),
        ]);

        let edges = edges(&catalog, &["CS 280"]);
        assert_eq!(edges.len(), 2);
        let math111 = edges.iter().find(|e| e.from == "MATH 111").unwrap();
        assert_eq!(math111.kind, EdgeKind::And);
    }

    #[test]
    fn only_visible_courses_contribute_edges() {
        let catalog = catalog(vec![
            ("CS 100", CourseInfo::empty()),
            ("CS 113", course_with_prereqs(RequirementNode::course("CS 100"))),
            ("CS 280", course_with_prereqs(RequirementNode::course("CS 113"))),
        ]);

        let edges = edges(&catalog, &["CS 113"]);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].to, "CS 113");
    }

    #[test]
    fn graph_includes_unresolvable_focus_nodes() {
        let catalog = catalog(vec![
            ("CS 100", CourseInfo::empty()),
            ("CS 113", course_with_prereqs(RequirementNode::course("CS 100"))),
        ]);

        let graph = prereq_graph(&catalog, &["CS 113", "ZZ 999"]);
        assert!(graph.contains_node("ZZ 999"));
        assert_eq!(graph.edge_count(), 1);
        // The edge pulls its endpoint in even though "CS 100" was not listed.
        assert!(graph.contains_node("CS 100"));
    }
}
