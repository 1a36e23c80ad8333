//! Structural validation of shaped records.
//!
//! Each row stream has a declarative column specification mirroring the
//! downstream table definitions. Validation is opt-in and fail-fast: the
//! first record that does not conform aborts the whole run, carrying the
//! record kind and per-field detail in the error.
//!
//! Attribute values are strings throughout the pipeline, so type checking
//! here means "parses as the declared column type".

use serde_json::json;

use crate::error::{MeltError, Result};
use crate::shape::types::{NodeRecord, ShapedElement, TagRecord, WayNodeRecord, WayRecord};

/// Expected type of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Float,
    Text,
}

impl FieldType {
    fn name(self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Text => "string",
        }
    }

    fn accepts(self, value: &str) -> bool {
        match self {
            FieldType::Integer => value.parse::<i64>().is_ok(),
            FieldType::Float => value.parse::<f64>().is_ok(),
            FieldType::Text => true,
        }
    }
}

/// Declarative description of one column in a record stream.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub ty: FieldType,
}

const fn field(name: &'static str, required: bool, ty: FieldType) -> FieldSpec {
    FieldSpec { name, required, ty }
}

const NODE_SCHEMA: [FieldSpec; 8] = [
    field("id", true, FieldType::Integer),
    field("lat", true, FieldType::Float),
    field("lon", true, FieldType::Float),
    field("user", true, FieldType::Text),
    field("uid", true, FieldType::Integer),
    field("version", true, FieldType::Text),
    field("changeset", true, FieldType::Integer),
    field("timestamp", true, FieldType::Text),
];

const WAY_SCHEMA: [FieldSpec; 6] = [
    field("id", true, FieldType::Integer),
    field("user", true, FieldType::Text),
    field("uid", true, FieldType::Integer),
    field("version", true, FieldType::Text),
    field("changeset", true, FieldType::Integer),
    field("timestamp", true, FieldType::Text),
];

const TAG_SCHEMA: [FieldSpec; 4] = [
    field("id", true, FieldType::Integer),
    field("key", true, FieldType::Text),
    field("value", true, FieldType::Text),
    field("type", true, FieldType::Text),
];

const WAY_NODE_SCHEMA: [FieldSpec; 3] = [
    field("id", true, FieldType::Integer),
    field("node_id", true, FieldType::Integer),
    field("position", true, FieldType::Integer),
];

/// Validate one shaped element against the stream schemas.
///
/// Returns the first violation as a [`MeltError::Validation`] with the
/// offending record kind and a JSON list of per-field messages.
pub fn validate(element: &ShapedElement) -> Result<()> {
    match element {
        ShapedElement::Node { record, tags } => {
            check("node", &NODE_SCHEMA, &node_values(record))?;
            for tag in tags {
                check("node_tags", &TAG_SCHEMA, &tag_values(tag))?;
            }
        }
        ShapedElement::Way {
            record,
            way_nodes,
            tags,
        } => {
            check("way", &WAY_SCHEMA, &way_values(record))?;
            for way_node in way_nodes {
                check_way_node(way_node)?;
            }
            for tag in tags {
                check("way_tags", &TAG_SCHEMA, &tag_values(tag))?;
            }
        }
    }
    Ok(())
}

fn node_values<'a>(record: &'a NodeRecord) -> [Option<&'a str>; 8] {
    [
        Some(record.id.as_str()),
        record.lat.as_deref(),
        record.lon.as_deref(),
        record.user.as_deref(),
        record.uid.as_deref(),
        record.version.as_deref(),
        record.changeset.as_deref(),
        record.timestamp.as_deref(),
    ]
}

fn way_values<'a>(record: &'a WayRecord) -> [Option<&'a str>; 6] {
    [
        Some(record.id.as_str()),
        record.user.as_deref(),
        record.uid.as_deref(),
        record.version.as_deref(),
        record.changeset.as_deref(),
        record.timestamp.as_deref(),
    ]
}

fn tag_values<'a>(tag: &'a TagRecord) -> [Option<&'a str>; 4] {
    [
        Some(tag.id.as_str()),
        Some(tag.key.as_str()),
        Some(tag.value.as_str()),
        Some(tag.tag_type.as_str()),
    ]
}

fn check_way_node(record: &WayNodeRecord) -> Result<()> {
    let position = record.position.to_string();
    let values = [
        Some(record.id.as_str()),
        Some(record.node_id.as_str()),
        Some(position.as_str()),
    ];
    check("way_nodes", &WAY_NODE_SCHEMA, &values)
}

fn check(kind: &'static str, schema: &[FieldSpec], values: &[Option<&str>]) -> Result<()> {
    let mut errors = Vec::new();
    for (spec, value) in schema.iter().zip(values) {
        match value {
            None => {
                if spec.required {
                    errors.push(json!({
                        "field": spec.name,
                        "error": "required field is missing",
                    }));
                }
            }
            Some(text) => {
                if !spec.ty.accepts(text) {
                    errors.push(json!({
                        "field": spec.name,
                        "error": format!("value '{}' is not a valid {}", text, spec.ty.name()),
                    }));
                }
            }
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(MeltError::Validation {
            kind,
            detail: json!(errors),
        })
    }
}
