//! Built-in stages for the CLI pipeline.

use event_pipeline::{PipelineError, Record, Result, SchemaRef, Stage};
use tracing::info;

/// Counts processed events, per file and across the run.
#[derive(Debug, Default)]
pub struct CountStage {
    file_events: u64,
    total_events: u64,
}

impl CountStage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stage for CountStage {
    fn name(&self) -> &str {
        "count"
    }

    fn initialize(&mut self, _schema: &SchemaRef) -> Result<()> {
        self.file_events = 0;
        Ok(())
    }

    fn process(&mut self, _record: &mut Record) -> Result<()> {
        self.file_events += 1;
        self.total_events += 1;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        info!(
            "count: {} events in this file, {} in the run",
            self.file_events, self.total_events
        );
        Ok(())
    }
}

/// Keeps only a configured subset of record fields.
#[derive(Debug)]
pub struct SelectStage {
    fields: Vec<String>,
}

impl SelectStage {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }
}

impl Stage for SelectStage {
    fn name(&self) -> &str {
        "select"
    }

    fn initialize(&mut self, schema: &SchemaRef) -> Result<()> {
        for field in &self.fields {
            if !schema.has_field(field) {
                return Err(PipelineError::Schema(format!(
                    "selected field '{}' is not declared in the source schema",
                    field
                )));
            }
        }
        Ok(())
    }

    fn process(&mut self, record: &mut Record) -> Result<()> {
        record.retain(|name| self.fields.iter().any(|f| f == name));
        Ok(())
    }
}
