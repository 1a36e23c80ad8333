//! Relational record types produced by shaping.
//!
//! Field order on these structs is the column order of the corresponding
//! row stream; the serde derives are what the CSV sink serializes.
//! Attribute values stay strings, exactly as they appear in the source;
//! the schema module is what asserts they parse as the downstream column
//! types.

use serde::Serialize;

/// Flattened attributes of one node element. One row in the `nodes`
/// stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub id: String,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub user: Option<String>,
    pub uid: Option<String>,
    pub version: Option<String>,
    pub changeset: Option<String>,
    pub timestamp: Option<String>,
}

/// Flattened attributes of one way element. One row in the `ways` stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WayRecord {
    pub id: String,
    pub user: Option<String>,
    pub uid: Option<String>,
    pub version: Option<String>,
    pub changeset: Option<String>,
    pub timestamp: Option<String>,
}

/// One key-value annotation owned by a node or way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagRecord {
    /// Owning element id.
    pub id: String,
    pub key: String,
    pub value: String,
    /// Namespace prefix of the raw key, or the default type.
    #[serde(rename = "type")]
    pub tag_type: String,
}

/// Ties a way to one of its constituent nodes and that node's ordinal
/// position along the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WayNodeRecord {
    /// Owning way id.
    pub id: String,
    pub node_id: String,
    /// 0-based position in document order.
    pub position: u64,
}

/// A fully shaped element, ready for validation and persistence.
#[derive(Debug, Clone)]
pub enum ShapedElement {
    Node {
        record: NodeRecord,
        tags: Vec<TagRecord>,
    },
    Way {
        record: WayRecord,
        way_nodes: Vec<WayNodeRecord>,
        tags: Vec<TagRecord>,
    },
}

impl ShapedElement {
    /// Record kind name, as used in validation errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ShapedElement::Node { .. } => "node",
            ShapedElement::Way { .. } => "way",
        }
    }
}
