//! Textual rendering of requirement expression trees.
//!
//! [`render`] is a pure function from a tree to a flat sequence of typed
//! segments. It never fails: an absent tree renders as the literal `None.`,
//! and malformed structure (a group with nothing renderable in it) renders as
//! nothing at all. Presentation layers decide how to style the segments; the
//! plain-text form is available through `Display`.
//!
//! Display policy, applied consistently:
//! - a course reference renders as the course name only (`min_grade` is
//!   carried in the data model but not surfaced);
//! - a single-child group renders bracketed with no connective, e.g.
//!   `(CS 100)`;
//! - the connective appears before every child after the first, never before
//!   the first child.

use std::fmt;

use crate::domain::requirement::{GroupKind, RequirementNode};

/// One typed piece of rendered requirement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text: a course name, placement phrase, permission text, etc.
    Plain(String),
    /// An emphasized connective (`AND` / `OR`).
    Strong(String),
    /// Opening delimiter of a group.
    GroupOpen,
    /// Closing delimiter of a group.
    GroupClose,
}

/// The rendered form of a requirement tree: an ordered segment sequence.
///
/// Equality is purely structural; any cosmetic styling (e.g. a per-group
/// accent color) is a presentation concern and has no representation here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedText {
    segments: Vec<Segment>,
}

impl RenderedText {
    /// The typed segments, in display order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether nothing at all was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Flattens the segments into one line, routing each connective through
    /// `emphasize` so presentation layers can style it.
    ///
    /// Spacing policy: pieces are separated by a single space, except that
    /// nothing follows an opening bracket and nothing precedes a closing one.
    /// `Display` is this with the identity styling.
    #[must_use]
    pub fn to_string_with<F>(&self, mut emphasize: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        let mut out = String::new();
        let mut separate = false;
        for segment in &self.segments {
            match segment {
                Segment::Plain(text) => {
                    if separate {
                        out.push(' ');
                    }
                    out.push_str(text);
                    separate = true;
                }
                Segment::Strong(text) => {
                    if separate {
                        out.push(' ');
                    }
                    out.push_str(&emphasize(text));
                    separate = true;
                }
                Segment::GroupOpen => {
                    if separate {
                        out.push(' ');
                    }
                    out.push('(');
                    separate = false;
                }
                Segment::GroupClose => {
                    out.push(')');
                    separate = true;
                }
            }
        }
        out
    }
}

impl fmt::Display for RenderedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(str::to_owned))
    }
}

/// Renders a requirement tree as structured text.
///
/// An absent tree means "no requirement" and renders as the literal `None.`.
/// The function is pure and deterministic: the same tree always yields the
/// same segments. Recursion depth is bounded only by the tree itself, which
/// in real catalog data stays within tens of levels.
#[must_use]
pub fn render(node: Option<&RequirementNode>) -> RenderedText {
    node.map_or_else(
        || RenderedText {
            segments: vec![Segment::Plain("None.".to_string())],
        },
        |node| {
            let mut segments = Vec::new();
            render_node(node, &mut segments);
            RenderedText { segments }
        },
    )
}

fn render_node(node: &RequirementNode, out: &mut Vec<Segment>) {
    match node {
        RequirementNode::Group { kind, children } => render_group(*kind, children, out),
        RequirementNode::Course { course, .. } => out.push(Segment::Plain(course.clone())),
        RequirementNode::Placement { name, .. } | RequirementNode::Skill { name } => {
            out.push(Segment::Plain(name.clone()));
        }
        RequirementNode::Permission { raw, .. } => out.push(Segment::Plain(raw.clone())),
        RequirementNode::Standing { standing, .. } => out.push(Segment::Plain(standing.clone())),
    }
}

fn render_group(kind: GroupKind, children: &[RequirementNode], out: &mut Vec<Segment>) {
    // Children that render to nothing (e.g. a nested empty group) are dropped
    // before joining, so the connective only ever separates two non-empty
    // renderings.
    let rendered: Vec<Vec<Segment>> = children
        .iter()
        .map(|child| {
            let mut segments = Vec::new();
            render_node(child, &mut segments);
            segments
        })
        .filter(|segments| !segments.is_empty())
        .collect();

    if rendered.is_empty() {
        return;
    }

    out.push(Segment::GroupOpen);
    for (index, child) in rendered.into_iter().enumerate() {
        if index > 0 {
            out.push(Segment::Strong(kind.as_str().to_string()));
        }
        out.extend(child);
    }
    out.push(Segment::GroupClose);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requirement::{GroupKind, RequirementNode};

    fn and(children: Vec<RequirementNode>) -> RequirementNode {
        RequirementNode::group(GroupKind::And, children)
    }

    fn or(children: Vec<RequirementNode>) -> RequirementNode {
        RequirementNode::group(GroupKind::Or, children)
    }

    #[test]
    fn absent_tree_renders_none() {
        assert_eq!(render(None).to_string(), "None.");
    }

    #[test]
    fn leaves_render_their_phrase() {
        let cases = [
            (RequirementNode::course("CS 100"), "CS 100"),
            (
                RequirementNode::Permission {
                    raw: "Approval of the instructor".to_string(),
                    kind: None,
                    authority: None,
                    action: None,
                    artifacts: Vec::new(),
                },
                "Approval of the instructor",
            ),
            (
                RequirementNode::Standing {
                    standing: "Junior standing or above".to_string(),
                    normalized: None,
                },
                "Junior standing or above",
            ),
            (
                RequirementNode::Skill {
                    name: "Working knowledge of C++".to_string(),
                },
                "Working knowledge of C++",
            ),
        ];

        for (node, expected) in cases {
            assert_eq!(render(Some(&node)).to_string(), expected);
        }
    }

    #[test]
    fn min_grade_is_not_surfaced() {
        let node = RequirementNode::Course {
            course: "MATH 112".to_string(),
            min_grade: Some("C".to_string()),
        };
        assert_eq!(render(Some(&node)).to_string(), "MATH 112");
    }

    #[test]
    fn two_child_and_group_joins_with_connective() {
        let node = and(vec![
            RequirementNode::course("CS 100"),
            RequirementNode::course("MATH 111"),
        ]);
        assert_eq!(render(Some(&node)).to_string(), "(CS 100 AND MATH 111)");
    }

    #[test]
    fn connective_appears_between_every_consecutive_pair() {
        // Three children must produce exactly two connectives, each between
        // two children, never before the first.
        let node = and(vec![
            RequirementNode::course("A 1"),
            RequirementNode::course("B 2"),
            RequirementNode::course("C 3"),
        ]);
        let rendered = render(Some(&node));

        let connectives = rendered
            .segments()
            .iter()
            .filter(|segment| matches!(segment, Segment::Strong(_)))
            .count();
        assert_eq!(connectives, 2);
        assert_eq!(rendered.to_string(), "(A 1 AND B 2 AND C 3)");
        assert!(!rendered.to_string().starts_with("(AND"));
    }

    #[test]
    fn single_child_group_is_bracketed_without_connective() {
        let node = or(vec![RequirementNode::course("CS 100")]);
        assert_eq!(render(Some(&node)).to_string(), "(CS 100)");
    }

    #[test]
    fn empty_group_renders_nothing() {
        let node = and(vec![]);
        let rendered = render(Some(&node));
        assert!(rendered.is_empty());
        assert_eq!(rendered.to_string(), "");
    }

    #[test]
    fn empty_children_are_skipped_when_joining() {
        // The empty nested group disappears entirely; the connective must not
        // end up dangling next to it.
        let node = and(vec![
            RequirementNode::course("CS 100"),
            or(vec![]),
            RequirementNode::course("MATH 111"),
        ]);
        assert_eq!(render(Some(&node)).to_string(), "(CS 100 AND MATH 111)");
    }

    #[test]
    fn nested_groups_render_recursively() {
        let node = and(vec![
            RequirementNode::course("CS 113"),
            or(vec![
                RequirementNode::course("MATH 111"),
                RequirementNode::Placement {
                    name: "Placement by exam".to_string(),
                    kind: None,
                    subject: None,
                    exam: None,
                    min_course: None,
                    level: None,
                    min_score: None,
                },
            ]),
        ]);
        assert_eq!(
            render(Some(&node)).to_string(),
            "(CS 113 AND (MATH 111 OR Placement by exam))"
        );
    }

    #[test]
    fn styling_hook_receives_only_connectives() {
        let node = and(vec![
            RequirementNode::course("CS 100"),
            or(vec![
                RequirementNode::course("MATH 111"),
                RequirementNode::course("MATH 112"),
            ]),
        ]);
        let rendered = render(Some(&node));

        let marked = rendered.to_string_with(|connective| format!("<{connective}>"));
        assert_eq!(marked, "(CS 100 <AND> (MATH 111 <OR> MATH 112))");

        // Identity styling and Display agree on spacing.
        assert_eq!(rendered.to_string_with(str::to_owned), rendered.to_string());
    }

    #[test]
    fn rendering_is_idempotent_on_tree_identity() {
        let node = and(vec![
            RequirementNode::course("CS 100"),
            or(vec![
                RequirementNode::course("MATH 111"),
                RequirementNode::course("MATH 112"),
            ]),
        ]);
        assert_eq!(render(Some(&node)), render(Some(&node)));
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        // Tens of levels is the realistic catalog depth; go well past it.
        let mut node = RequirementNode::course("CS 100");
        for _ in 0..200 {
            node = and(vec![node]);
        }
        let rendered = render(Some(&node)).to_string();
        assert!(rendered.contains("CS 100"));
        assert!(rendered.starts_with("((("));
    }
}
