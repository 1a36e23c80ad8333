//! Record sinks for shaped output.
//!
//! The pipeline hands each element's sub-parts to a [`RecordSink`] as
//! five independent row streams, one per downstream table. [`CsvSink`]
//! persists them as CSV files with a fixed column order; [`MemorySink`]
//! collects them in memory for tests and small extracts.

use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::error::Result;
use crate::shape::types::{NodeRecord, TagRecord, WayNodeRecord, WayRecord};

/// Destination for the five relational row streams.
pub trait RecordSink {
    fn write_node(&mut self, record: &NodeRecord) -> Result<()>;
    fn write_node_tags(&mut self, tags: &[TagRecord]) -> Result<()>;
    fn write_way(&mut self, record: &WayRecord) -> Result<()>;
    fn write_way_nodes(&mut self, way_nodes: &[WayNodeRecord]) -> Result<()>;
    fn write_way_tags(&mut self, tags: &[TagRecord]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

/// Writes each row stream to its own CSV file in a target directory.
///
/// Headers are written at creation, so the files carry their column order
/// even when a run produces no rows. Column order matches the record
/// structs' field order, which matches the downstream table schemas.
pub struct CsvSink {
    nodes: Writer<File>,
    node_tags: Writer<File>,
    ways: Writer<File>,
    way_nodes: Writer<File>,
    way_tags: Writer<File>,
}

impl CsvSink {
    pub const NODES_FILE: &'static str = "nodes.csv";
    pub const NODE_TAGS_FILE: &'static str = "nodes_tags.csv";
    pub const WAYS_FILE: &'static str = "ways.csv";
    pub const WAY_NODES_FILE: &'static str = "ways_nodes.csv";
    pub const WAY_TAGS_FILE: &'static str = "ways_tags.csv";

    /// Create the output directory and the five files with header rows.
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        Ok(CsvSink {
            nodes: open_stream(
                &dir.join(Self::NODES_FILE),
                &[
                    "id",
                    "lat",
                    "lon",
                    "user",
                    "uid",
                    "version",
                    "changeset",
                    "timestamp",
                ],
            )?,
            node_tags: open_stream(
                &dir.join(Self::NODE_TAGS_FILE),
                &["id", "key", "value", "type"],
            )?,
            ways: open_stream(
                &dir.join(Self::WAYS_FILE),
                &["id", "user", "uid", "version", "changeset", "timestamp"],
            )?,
            way_nodes: open_stream(
                &dir.join(Self::WAY_NODES_FILE),
                &["id", "node_id", "position"],
            )?,
            way_tags: open_stream(
                &dir.join(Self::WAY_TAGS_FILE),
                &["id", "key", "value", "type"],
            )?,
        })
    }
}

fn open_stream(path: &Path, header: &[&str]) -> Result<Writer<File>> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(header)?;
    Ok(writer)
}

impl RecordSink for CsvSink {
    fn write_node(&mut self, record: &NodeRecord) -> Result<()> {
        self.nodes.serialize(record)?;
        Ok(())
    }

    fn write_node_tags(&mut self, tags: &[TagRecord]) -> Result<()> {
        for tag in tags {
            self.node_tags.serialize(tag)?;
        }
        Ok(())
    }

    fn write_way(&mut self, record: &WayRecord) -> Result<()> {
        self.ways.serialize(record)?;
        Ok(())
    }

    fn write_way_nodes(&mut self, way_nodes: &[WayNodeRecord]) -> Result<()> {
        for way_node in way_nodes {
            self.way_nodes.serialize(way_node)?;
        }
        Ok(())
    }

    fn write_way_tags(&mut self, tags: &[TagRecord]) -> Result<()> {
        for tag in tags {
            self.way_tags.serialize(tag)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.nodes.flush()?;
        self.node_tags.flush()?;
        self.ways.flush()?;
        self.way_nodes.flush()?;
        self.way_tags.flush()?;
        Ok(())
    }
}

/// Collects records in memory instead of persisting them.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub nodes: Vec<NodeRecord>,
    pub node_tags: Vec<TagRecord>,
    pub ways: Vec<WayRecord>,
    pub way_nodes: Vec<WayNodeRecord>,
    pub way_tags: Vec<TagRecord>,
}

impl RecordSink for MemorySink {
    fn write_node(&mut self, record: &NodeRecord) -> Result<()> {
        self.nodes.push(record.clone());
        Ok(())
    }

    fn write_node_tags(&mut self, tags: &[TagRecord]) -> Result<()> {
        self.node_tags.extend_from_slice(tags);
        Ok(())
    }

    fn write_way(&mut self, record: &WayRecord) -> Result<()> {
        self.ways.push(record.clone());
        Ok(())
    }

    fn write_way_nodes(&mut self, way_nodes: &[WayNodeRecord]) -> Result<()> {
        self.way_nodes.extend_from_slice(way_nodes);
        Ok(())
    }

    fn write_way_tags(&mut self, tags: &[TagRecord]) -> Result<()> {
        self.way_tags.extend_from_slice(tags);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
