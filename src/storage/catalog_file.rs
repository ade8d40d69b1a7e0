//! Tolerant decoding of the catalog JSON into domain types.
//!
//! The decoder works over [`serde_json::Value`] rather than derived
//! `Deserialize` impls: the AND and OR wire tags both fold into one `Group`
//! variant, and per-node tolerance (drop the bad node, keep its siblings)
//! cannot be expressed with a derive. Every drop is logged at `warn`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

use super::LoadError;
use crate::domain::requirement::{
    GroupKind, PermissionAction, PermissionAuthority, PermissionKind, PlacementKind,
    RequirementNode, Restriction, RestrictionKind, Score, Standing,
};
use crate::domain::{Catalog, CourseInfo};

pub(super) fn decode(value: Value) -> Result<Catalog, LoadError> {
    let Value::Object(entries) = value else {
        return Err(LoadError::NotAnObject);
    };

    let mut courses = BTreeMap::new();
    for (name, entry) in entries {
        if let Some(info) = course_from_value(&name, &entry) {
            courses.insert(name, info);
        }
    }
    Ok(Catalog::new(courses))
}

/// Decodes one course record. Scraper error stubs (`{"error": ...}`) and
/// values that are not objects are skipped entirely.
fn course_from_value(name: &str, value: &Value) -> Option<CourseInfo> {
    let Value::Object(entry) = value else {
        warn!(course = name, "skipping catalog entry that is not an object");
        return None;
    };
    if entry.contains_key("error") {
        warn!(course = name, "skipping catalog entry with scraper error");
        return None;
    }

    Some(CourseInfo {
        prereq_tree: tree_field(entry, "prereq_tree", name),
        coreq_tree: tree_field(entry, "coreq_tree", name),
        restrictions: entry
            .get("restrictions")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|value| restriction_from_value(value, name))
                    .collect()
            })
            .unwrap_or_default(),
        desc: str_field(entry, "desc").unwrap_or_default(),
        title: str_field(entry, "title").unwrap_or_default(),
        credits: entry
            .get("credits")
            .and_then(Value::as_f64)
            .unwrap_or_default(),
    })
}

/// An absent or `null` tree field means "no requirement". A present but
/// malformed tree is dropped, which degrades to the same thing.
fn tree_field(entry: &Map<String, Value>, key: &str, course: &str) -> Option<RequirementNode> {
    let value = entry.get(key)?;
    if value.is_null() {
        return None;
    }
    let node = node_from_value(value);
    if node.is_none() {
        warn!(course, field = key, "dropping malformed requirement tree");
    }
    node
}

/// Decodes one requirement node. Returns `None` when the node is missing its
/// type tag or a required field; group children that fail to decode are
/// dropped individually while their siblings survive.
fn node_from_value(value: &Value) -> Option<RequirementNode> {
    let Value::Object(node) = value else {
        warn!("dropping requirement node that is not an object");
        return None;
    };
    let Some(tag) = node.get("type").and_then(Value::as_str) else {
        warn!("dropping requirement node without a type tag");
        return None;
    };

    if let Some(kind) = GroupKind::from_wire(tag) {
        let children = node
            .get("children")
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(node_from_value).collect())
            .unwrap_or_default();
        return Some(RequirementNode::Group { kind, children });
    }

    match tag {
        "COURSE" => Some(RequirementNode::Course {
            course: str_field(node, "course")?,
            min_grade: str_field(node, "min_grade"),
        }),
        "PLACEMENT" => Some(RequirementNode::Placement {
            name: str_field(node, "name")?,
            kind: node
                .get("placement_kind")
                .and_then(Value::as_str)
                .map(PlacementKind::from_wire),
            subject: str_field(node, "subject"),
            exam: str_field(node, "exam"),
            min_course: str_field(node, "min_course"),
            level: str_field(node, "level"),
            min_score: node.get("min_score").and_then(score_from_value),
        }),
        "PERMISSION" => Some(RequirementNode::Permission {
            raw: str_field(node, "raw")?,
            kind: node
                .get("permission_kind")
                .and_then(Value::as_str)
                .map(PermissionKind::from_wire),
            authority: node
                .get("authority")
                .and_then(Value::as_str)
                .map(PermissionAuthority::from_wire),
            action: node
                .get("action")
                .and_then(Value::as_str)
                .map(PermissionAction::from_wire),
            // Both spellings occur in the wild.
            artifacts: node
                .get("artifacts")
                .or_else(|| node.get("artifact"))
                .and_then(Value::as_array)
                .map(|values| string_list(values))
                .unwrap_or_default(),
        }),
        "STANDING" => Some(RequirementNode::Standing {
            standing: str_field(node, "standing")?,
            normalized: node
                .get("normalized")
                .and_then(Value::as_str)
                .and_then(Standing::from_wire),
        }),
        "SKILL" => Some(RequirementNode::Skill {
            name: str_field(node, "name")?,
        }),
        other => {
            warn!(tag = other, "dropping requirement node with unknown type");
            None
        }
    }
}

fn restriction_from_value(value: &Value, course: &str) -> Option<Restriction> {
    let Value::Object(restriction) = value else {
        warn!(course, "dropping restriction that is not an object");
        return None;
    };
    let Some(raw) = str_field(restriction, "raw") else {
        warn!(course, "dropping restriction without raw text");
        return None;
    };

    Some(Restriction {
        raw,
        kinds: restriction
            .get("kinds")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(RestrictionKind::from_wire)
                    .collect()
            })
            .unwrap_or_default(),
        entities: restriction
            .get("entities")
            .and_then(Value::as_array)
            .map(|values| string_list(values))
            .unwrap_or_default(),
    })
}

fn score_from_value(value: &Value) -> Option<Score> {
    match value {
        Value::Number(number) => number.as_f64().map(Score::Number),
        Value::String(text) => Some(Score::Text(text.clone())),
        _ => None,
    }
}

fn str_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn string_list(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}
