//! Stage lifecycle contract for pipeline elements.

use crate::error::Result;
use crate::record::Record;
use crate::schema::SchemaRef;

/// One unit of processing logic in the pipeline.
///
/// Stages are registered once, before the run starts, and persist across
/// all input files: the same instance sees `initialize`/`finalize` once
/// per file and `process` once per record. All three callbacks are invoked
/// by the orchestrator, never by a stage itself, and always in stage
/// registration order.
pub trait Stage {
    /// Stage name used in diagnostics and error attribution.
    fn name(&self) -> &str;

    /// Called once per input file, before any `process` call for that
    /// file. Stages use the schema to declare the fields they will read
    /// or write and to allocate per-file working state.
    fn initialize(&mut self, schema: &SchemaRef) -> Result<()> {
        let _ = schema;
        Ok(())
    }

    /// Called once per unit of work, in registration order relative to
    /// sibling stages. Must not assume ordering guarantees across input
    /// files beyond "finalize happens between files".
    fn process(&mut self, record: &mut Record) -> Result<()>;

    /// Called once per input file, after the last `process` call for
    /// that file (even when zero units were processed).
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
}
