//! Element shaping - turn raw tree elements into relational records.
//!
//! Shaping is where the tree structure flattens out: one attribute record
//! per element, one tag row per surviving key-value child, and one ordered
//! membership row per way-node reference.

pub mod shaper;
pub mod types;

pub use shaper::{shape, DEFAULT_TAG_TYPE};
pub use types::{NodeRecord, ShapedElement, TagRecord, WayNodeRecord, WayRecord};
