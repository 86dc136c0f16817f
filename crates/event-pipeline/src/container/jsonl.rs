//! JSON-lines container driver.
//!
//! A container file holds one JSON document per line: the first line is the
//! schema object, each following line one record keyed by field name.

use super::{ContainerFormat, RecordReader, RecordWriter};
use crate::error::{PipelineError, Result};
use crate::record::Record;
use crate::schema::{Schema, SchemaRef};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// JSON-lines container format.
#[derive(Debug, Default)]
pub struct JsonlFormat;

impl ContainerFormat for JsonlFormat {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn open_reader(&self, path: &Path) -> Result<Box<dyn RecordReader>> {
        Ok(Box::new(JsonlReader::open(path)?))
    }

    fn open_writer(&self, path: &Path, schema: SchemaRef) -> Result<Box<dyn RecordWriter>> {
        Ok(Box::new(JsonlWriter::create(path, schema)?))
    }
}

/// Sequential reader over a JSON-lines container.
#[derive(Debug)]
pub struct JsonlReader {
    path: String,
    lines: Option<std::io::Lines<BufReader<File>>>,
    schema: SchemaRef,
    line_no: u64,
}

impl JsonlReader {
    /// Open a container and parse its schema header.
    pub fn open(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let file =
            File::open(path).map_err(|e| PipelineError::open(display.clone(), e.to_string()))?;
        let mut lines = BufReader::new(file).lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(PipelineError::open(display, "container has no schema header"));
            }
        };
        let schema: Schema = serde_json::from_str(&header)
            .map_err(|e| PipelineError::open(display.clone(), format!("invalid schema header: {}", e)))?;

        Ok(Self {
            path: display,
            lines: Some(lines),
            schema: schema.into_ref(),
            line_no: 1,
        })
    }
}

impl RecordReader for JsonlReader {
    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn read_next(&mut self, record: &mut Record) -> Result<bool> {
        let lines = match self.lines.as_mut() {
            Some(lines) => lines,
            None => return Ok(false),
        };

        let line = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    self.line_no += 1;
                    // Tolerate blank lines between records.
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
                None => return Ok(false),
            }
        };

        let fields: serde_json::Map<String, Value> = serde_json::from_str(&line)?;
        for (name, value) in fields {
            if !self.schema.has_field(&name) {
                return Err(PipelineError::Schema(format!(
                    "{}:{}: field '{}' is not declared in the schema",
                    self.path, self.line_no, name
                )));
            }
            record.set(name, value);
        }
        Ok(true)
    }

    fn close(&mut self) -> Result<()> {
        self.lines = None;
        Ok(())
    }
}

/// Sequential writer producing a JSON-lines container.
pub struct JsonlWriter {
    out: Option<BufWriter<File>>,
}

impl JsonlWriter {
    /// Create a container and write its schema header.
    pub fn create(path: &Path, schema: SchemaRef) -> Result<Self> {
        let display = path.display().to_string();
        let file =
            File::create(path).map_err(|e| PipelineError::open(display, e.to_string()))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer(&mut out, schema.as_ref())?;
        out.write_all(b"\n")?;
        Ok(Self { out: Some(out) })
    }
}

impl RecordWriter for JsonlWriter {
    fn write(&mut self, record: &Record) -> Result<()> {
        let out = self
            .out
            .as_mut()
            .ok_or_else(|| PipelineError::Config("write on closed container".into()))?;

        // Sort by field name so output bytes are deterministic.
        let fields: BTreeMap<&String, &Value> = record.values().collect();
        serde_json::to_writer(&mut *out, &fields)?;
        out.write_all(b"\n")?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut out) = self.out.take() {
            out.flush()?;
        }
        Ok(())
    }
}
