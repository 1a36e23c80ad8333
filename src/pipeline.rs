//! Pipeline driver: extract, shape, optionally validate, persist.

use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::extract::{ElementKind, ElementReader};
use crate::schema;
use crate::shape::shaper::shape;
use crate::shape::types::ShapedElement;
use crate::sink::RecordSink;

/// Counters for one processing run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStats {
    pub nodes: u64,
    pub ways: u64,
    pub skipped: u64,
}

/// Process a map extract end to end.
///
/// Streams node and way elements from `input`, shapes each into relational
/// records, and hands the sub-parts to `sink`, one call per row-stream
/// category. With `validate` enabled every shaped record is checked
/// against the stream schemas and the first violation aborts the run.
pub fn process_map<P, S>(input: P, sink: &mut S, validate: bool) -> Result<ProcessStats>
where
    P: AsRef<Path>,
    S: RecordSink,
{
    if validate {
        debug!("schema validation enabled; run aborts on first bad record");
    }

    let reader = ElementReader::from_path(input, &[ElementKind::Node, ElementKind::Way])?;
    let mut stats = ProcessStats::default();

    for element in reader {
        let element = element?;
        let Some(shaped) = shape(&element)? else {
            stats.skipped += 1;
            continue;
        };

        if validate {
            schema::validate(&shaped)?;
        }

        match shaped {
            ShapedElement::Node { record, tags } => {
                sink.write_node(&record)?;
                sink.write_node_tags(&tags)?;
                stats.nodes += 1;
            }
            ShapedElement::Way {
                record,
                way_nodes,
                tags,
            } => {
                sink.write_way(&record)?;
                sink.write_way_nodes(&way_nodes)?;
                sink.write_way_tags(&tags)?;
                stats.ways += 1;
            }
        }
    }

    sink.flush()?;
    info!(
        nodes = stats.nodes,
        ways = stats.ways,
        skipped = stats.skipped,
        "finished processing map extract"
    );
    Ok(stats)
}
