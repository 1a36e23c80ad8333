//! Shaping of raw elements into relational records.
//!
//! `shape` determines the element kind, extracts the whitelisted
//! attributes for that kind (everything else is dropped by construction),
//! filters and classifies child tags, and builds ordered membership rows
//! for ways. It borrows its input and never mutates it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{MeltError, Result};
use crate::extract::{ElementKind, RawElement};
use crate::normalize::{normalize_phone, normalize_street, normalize_zip};
use crate::shape::types::{NodeRecord, ShapedElement, TagRecord, WayNodeRecord, WayRecord};

/// Tag type assigned to keys without a namespace prefix.
pub const DEFAULT_TAG_TYPE: &str = "regular";

/// A raw key containing any of these characters drops the whole tag.
static PROBLEM_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[=+/&<>;'"?%#$@,. \t\r\n]"#).unwrap());

/// Lowercase namespaced keys: split into (type, key) at the first colon.
static LOWER_COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z_]+:[a-z_]+").unwrap());

/// Known-erroneous (raw key, value) pairs, skipped entirely.
const DENY_LIST: [(&str, &str); 1] = [("phone", "fire")];

/// Shape one raw element into relational records.
///
/// Node and way elements shape into records; any other kind yields
/// `Ok(None)` and is skipped by the caller. A missing `id` is an error
/// because tag and membership rows could not reference their owner.
pub fn shape(element: &RawElement) -> Result<Option<ShapedElement>> {
    match element.kind {
        ElementKind::Node => shape_node(element).map(Some),
        ElementKind::Way => shape_way(element).map(Some),
        ElementKind::Relation => Ok(None),
    }
}

fn shape_node(element: &RawElement) -> Result<ShapedElement> {
    let id = require_id(element, "node")?;
    let record = NodeRecord {
        id: id.clone(),
        lat: element.attrs.get("lat").cloned(),
        lon: element.attrs.get("lon").cloned(),
        user: element.attrs.get("user").cloned(),
        uid: element.attrs.get("uid").cloned(),
        version: element.attrs.get("version").cloned(),
        changeset: element.attrs.get("changeset").cloned(),
        timestamp: element.attrs.get("timestamp").cloned(),
    };
    let tags = shape_tags(&id, &element.tags);
    Ok(ShapedElement::Node { record, tags })
}

fn shape_way(element: &RawElement) -> Result<ShapedElement> {
    let id = require_id(element, "way")?;
    let record = WayRecord {
        id: id.clone(),
        user: element.attrs.get("user").cloned(),
        uid: element.attrs.get("uid").cloned(),
        version: element.attrs.get("version").cloned(),
        changeset: element.attrs.get("changeset").cloned(),
        timestamp: element.attrs.get("timestamp").cloned(),
    };
    let way_nodes = element
        .node_refs
        .iter()
        .enumerate()
        .map(|(position, node_id)| WayNodeRecord {
            id: id.clone(),
            node_id: node_id.clone(),
            position: position as u64,
        })
        .collect();
    let tags = shape_tags(&id, &element.tags);
    Ok(ShapedElement::Way {
        record,
        way_nodes,
        tags,
    })
}

fn require_id(element: &RawElement, kind: &'static str) -> Result<String> {
    element
        .attrs
        .get("id")
        .cloned()
        .ok_or(MeltError::MissingId { kind })
}

/// Filter, classify, and clean child tags into tag rows.
fn shape_tags(owner_id: &str, raw_tags: &[(String, String)]) -> Vec<TagRecord> {
    let mut tags = Vec::new();
    for (raw_key, raw_value) in raw_tags {
        if PROBLEM_CHARS.is_match(raw_key) {
            continue;
        }
        if DENY_LIST
            .iter()
            .any(|&(key, value)| raw_key.as_str() == key && raw_value.as_str() == value)
        {
            continue;
        }

        let (tag_type, key) = classify_key(raw_key);
        let value = match key {
            "street" => normalize_street(raw_value),
            "phone" => normalize_phone(raw_value),
            "postcode" => normalize_zip(raw_value),
            _ => raw_value.clone(),
        };
        tags.push(TagRecord {
            id: owner_id.to_string(),
            key: key.to_string(),
            value,
            tag_type: tag_type.to_string(),
        });
    }
    tags
}

/// Split a lowercase-namespaced key into (type, remainder) at the first
/// colon; anything else keeps the whole key under the default type.
fn classify_key(raw_key: &str) -> (&str, &str) {
    if LOWER_COLON.is_match(raw_key) {
        if let Some((tag_type, key)) = raw_key.split_once(':') {
            return (tag_type, key);
        }
    }
    (DEFAULT_TAG_TYPE, raw_key)
}
