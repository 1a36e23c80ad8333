//! # Osmelt - Map Extract Processing Toolkit
//!
//! A library for melting a tree-structured map extract into flat
//! relational row streams: node and way records, their tag key-value
//! pairs, and ordered way-node membership. A handful of free-form address
//! fields (street names, phone numbers, postal codes) are cleaned with
//! heuristic rules on the way through.
//!
//! ## Modules
//!
//! - **normalize**: pure field cleaners with one-off correction tables
//! - **extract**: streaming element reader with bounded memory
//! - **shape**: raw tree elements into relational records
//! - **schema**: opt-in structural validation, fail-fast
//! - **sink**: row-stream persistence (CSV files or in-memory)
//! - **pipeline**: the end-to-end driver
//!
//! ## Quick Start
//!
//! ### Field normalization
//!
//! ```rust
//! use osmelt::normalize::{normalize_phone, normalize_street, normalize_zip};
//!
//! assert_eq!(normalize_street("123 Main St"), "Main Street");
//! assert_eq!(normalize_phone("1-800-FLOWERS"), "(800) 356-9377");
//! assert_eq!(normalize_zip("94107-1234"), "94107");
//! ```
//!
//! ### Processing an extract
//!
//! ```rust,no_run
//! use osmelt::{process_map, CsvSink};
//!
//! # fn main() -> osmelt::Result<()> {
//! let mut sink = CsvSink::create("./out")?;
//! let stats = process_map("extract.osm", &mut sink, true)?;
//! println!("{} nodes, {} ways", stats.nodes, stats.ways);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod shape;
pub mod sink;

// Re-export commonly used types for convenience
pub use error::{MeltError, Result};
pub use extract::{ElementKind, ElementReader, RawElement};
pub use pipeline::{process_map, ProcessStats};
pub use shape::{shape, NodeRecord, ShapedElement, TagRecord, WayNodeRecord, WayRecord};
pub use sink::{CsvSink, MemorySink, RecordSink};
