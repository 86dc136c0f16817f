//! Paired input/output resource wrapper for one container file.

use crate::container::{ContainerFormat, RecordReader, RecordWriter};
use crate::error::{PipelineError, Result};
use crate::record::Record;
use crate::schema::SchemaRef;
use std::path::Path;

/// One paired (input, optional output) resource.
///
/// Exclusively owned by the orchestrator for the duration of one file's
/// processing. [`close`](RecordStream::close) is idempotent and also runs
/// on drop, so the resource is released on every exit path.
pub struct RecordStream {
    input: String,
    reader: Option<Box<dyn RecordReader>>,
    writer: Option<Box<dyn RecordWriter>>,
    schema: SchemaRef,
    position: u64,
}

impl std::fmt::Debug for RecordStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStream")
            .field("input", &self.input)
            .field("reader", &self.reader.as_ref().map(|_| "dyn RecordReader"))
            .field("writer", &self.writer.as_ref().map(|_| "dyn RecordWriter"))
            .field("schema", &self.schema)
            .field("position", &self.position)
            .finish()
    }
}

impl RecordStream {
    /// Open the input for reading and, if given, the output for writing.
    ///
    /// Fails with [`PipelineError::Open`] if either end cannot be opened.
    /// When the sink fails after the source already opened, the source is
    /// closed before the error is returned.
    pub fn open(
        format: &dyn ContainerFormat,
        input: &str,
        output: Option<&str>,
    ) -> Result<Self> {
        let mut reader = format.open_reader(Path::new(input))?;
        let schema = reader.schema();

        let writer = match output {
            Some(path) => match format.open_writer(Path::new(path), schema.clone()) {
                Ok(writer) => Some(writer),
                Err(e) => {
                    // The input is already open; release it before
                    // surfacing the sink failure.
                    let _ = reader.close();
                    return Err(e);
                }
            },
            None => None,
        };

        Ok(Self {
            input: input.to_string(),
            reader: Some(reader),
            writer,
            schema,
            position: 0,
        })
    }

    /// Associate the stream's schema with a record so subsequent
    /// [`advance`](RecordStream::advance) calls populate it.
    pub fn bind(&self, record: &mut Record) {
        record.bind(self.schema.clone());
    }

    /// Schema handle of the input source.
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Whether an output sink is paired with the input.
    pub fn has_output(&self) -> bool {
        self.writer.is_some()
    }

    /// Number of records advanced so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Pull the next unit into the record.
    ///
    /// Returns `false` exactly when the source is exhausted. Each call
    /// advances position.
    pub fn advance(&mut self, record: &mut Record) -> Result<bool> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| PipelineError::Config(format!("advance on closed stream {}", self.input)))?;
        let more = reader.read_next(record)?;
        if more {
            self.position += 1;
        }
        Ok(more)
    }

    /// Append the record to the paired output sink.
    ///
    /// Fails if the stream is input-only; the orchestrator checks
    /// [`has_output`](RecordStream::has_output) before calling.
    pub fn emit(&mut self, record: &Record) -> Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.write(record),
            None => Err(PipelineError::Config(format!(
                "stream for {} is input-only",
                self.input
            ))),
        }
    }

    /// Flush and release both ends. Idempotent, and safe after a partial
    /// open. Both ends are released even if one of them fails to close.
    pub fn close(&mut self) -> Result<()> {
        let mut first_err = None;
        if let Some(mut reader) = self.reader.take() {
            if let Err(e) = reader.close() {
                first_err = Some(e);
            }
        }
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.close() {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Whether both ends have been released.
    pub fn is_closed(&self) -> bool {
        self.reader.is_none() && self.writer.is_none()
    }
}

impl Drop for RecordStream {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
