//! Container format abstraction for record sources and sinks.
//!
//! The orchestrator core only requires a container to expose open/close,
//! sequential advance-with-exhaustion-signal, and a schema handle. These
//! traits are that seam; [`jsonl`] is the bundled driver.

mod jsonl;

pub use jsonl::JsonlFormat;

use crate::error::Result;
use crate::record::Record;
use crate::schema::SchemaRef;
use std::path::Path;

/// Read records sequentially from one container source.
pub trait RecordReader {
    /// Schema handle for this source.
    fn schema(&self) -> SchemaRef;

    /// Pull the next unit into the record.
    ///
    /// Returns `false` exactly when the source is exhausted. Not
    /// idempotent: each call advances position.
    fn read_next(&mut self, record: &mut Record) -> Result<bool>;

    /// Release the underlying resource. Safe to call more than once.
    fn close(&mut self) -> Result<()>;
}

/// Write records sequentially to one container sink.
pub trait RecordWriter {
    /// Append one record.
    fn write(&mut self, record: &Record) -> Result<()>;

    /// Flush and release the underlying resource. Safe to call more
    /// than once.
    fn close(&mut self) -> Result<()>;
}

/// Factory for readers and writers of one concrete container format.
pub trait ContainerFormat {
    /// Format identifier (e.g. "jsonl").
    fn name(&self) -> &str;

    /// Open a source for reading.
    fn open_reader(&self, path: &Path) -> Result<Box<dyn RecordReader>>;

    /// Create a sink for writing, declaring the schema up front.
    fn open_writer(&self, path: &Path, schema: SchemaRef) -> Result<Box<dyn RecordWriter>>;
}
