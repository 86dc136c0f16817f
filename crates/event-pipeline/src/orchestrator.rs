//! Run orchestration - drives the stage pipeline over paired record streams.
//!
//! One input file is fully processed (open, initialize, process loop,
//! finalize, close) before the next begins. Failure containment is
//! per file: a failing file is reported in the run summary and processing
//! continues with the next file.

use crate::config::Config;
use crate::container::{ContainerFormat, JsonlFormat};
use crate::error::{PipelineError, Result};
use crate::record::Record;
use crate::stage::Stage;
use crate::stream::RecordStream;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Pipeline orchestrator.
///
/// Owns the ordered stage sequence and the input/output locator lists.
/// Registration is append-only and happens before [`run`](Orchestrator::run).
pub struct Orchestrator {
    config: Config,
    format: Box<dyn ContainerFormat>,
    stages: Vec<Box<dyn Stage>>,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Unique run identifier.
    pub run_id: String,

    /// Final status.
    pub status: RunStatus,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Total input files attempted.
    pub files_total: usize,

    /// Files processed to completion.
    pub files_succeeded: usize,

    /// Files that failed.
    pub files_failed: usize,

    /// Events processed across the whole run.
    pub events_processed: u64,

    /// List of failed input files.
    pub failed_files: Vec<String>,

    /// Per-file outcome, in processing order.
    pub files: Vec<FileReport>,
}

/// Overall run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Failed,
}

/// Per-file outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Input file locator.
    pub file: String,

    /// Paired output locator, if any.
    pub output: Option<String>,

    /// File status.
    pub status: FileStatus,

    /// Events processed from this file.
    pub events: u64,

    /// Error message if failed.
    pub error: Option<String>,
}

/// Per-file status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Completed,
    Failed,
}

impl Orchestrator {
    /// Create an orchestrator over the bundled JSON-lines container format.
    pub fn new(config: Config) -> Self {
        Self::with_format(config, Box::new(JsonlFormat))
    }

    /// Create an orchestrator over a caller-supplied container format.
    pub fn with_format(config: Config, format: Box<dyn ContainerFormat>) -> Self {
        Self {
            config,
            format,
            stages: Vec::new(),
        }
    }

    /// Append an input file to process.
    pub fn add_input_file(&mut self, path: impl Into<String>) {
        self.config.input_files.push(path.into());
    }

    /// Append an output file, index-aligned with the inputs.
    pub fn add_output_file(&mut self, path: impl Into<String>) {
        self.config.output_files.push(path.into());
    }

    /// Append a stage to the pipeline. Insertion order is execution order.
    pub fn add_stage(&mut self, stage: Box<dyn Stage>) {
        self.stages.push(stage);
    }

    /// Override the whole-run event limit. Negative means unbounded.
    pub fn with_event_limit(mut self, limit: i64) -> Self {
        self.config.event_limit = limit;
        self
    }

    /// Override the progress checkpoint interval.
    pub fn with_report_interval(mut self, interval: u64) -> Self {
        self.config.report_interval = interval;
        self
    }

    /// Run the pipeline over all registered input files.
    ///
    /// Returns `Err` only for configuration errors detected before any
    /// I/O (no inputs, mismatched output pairing). Per-file failures are
    /// contained: the file is recorded as failed in the [`RunResult`] and
    /// the run proceeds to the next input.
    ///
    /// The event limit bounds `process` calls across the whole run, not
    /// per file.
    pub fn run(mut self) -> Result<RunResult> {
        let started_at = Utc::now();
        let run_id = uuid::Uuid::new_v4().to_string();

        self.config.validate()?;

        info!("Starting run: {}", run_id);

        // One record per run; rebound at file boundaries, cleared between
        // units, never reallocated.
        let mut record = Record::new();
        let mut events_processed: u64 = 0;
        let mut files = Vec::with_capacity(self.config.input_files.len());

        for (idx, input) in self.config.input_files.iter().enumerate() {
            let output = self.config.output_files.get(idx).cloned();
            info!("Processing file {}", input);

            // Tracked outside the outcome so a failed file still reports
            // the events that completed before the failure.
            let mut file_events: u64 = 0;
            let outcome = process_file(
                self.format.as_ref(),
                &mut self.stages,
                &mut record,
                input,
                output.as_deref(),
                self.config.event_limit,
                self.config.report_interval,
                &mut file_events,
                &mut events_processed,
            );

            match outcome {
                Ok(()) => {
                    info!("{}: completed ({} events)", input, file_events);
                    files.push(FileReport {
                        file: input.clone(),
                        output,
                        status: FileStatus::Completed,
                        events: file_events,
                        error: None,
                    });
                }
                Err(e) => {
                    error!("{}: failed - {}", input, e);
                    files.push(FileReport {
                        file: input.clone(),
                        output,
                        status: FileStatus::Failed,
                        events: file_events,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let completed_at = Utc::now();
        let duration = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;

        let failed_files: Vec<String> = files
            .iter()
            .filter(|report| report.status == FileStatus::Failed)
            .map(|report| report.file.clone())
            .collect();
        let files_failed = failed_files.len();
        let files_total = files.len();

        let status = if files_failed > 0 {
            RunStatus::Failed
        } else {
            RunStatus::Completed
        };

        let result = RunResult {
            run_id,
            status,
            started_at,
            completed_at,
            duration_seconds: duration,
            files_total,
            files_succeeded: files_total - files_failed,
            files_failed,
            events_processed,
            failed_files,
            files,
        };

        info!(
            "Run {:?}: {}/{} files, {} events in {:.1}s",
            result.status,
            result.files_succeeded,
            result.files_total,
            result.events_processed,
            result.duration_seconds
        );

        Ok(result)
    }
}

/// Process one paired input/output file through the stage pipeline.
///
/// The stream is released on every exit path before the outcome is
/// surfaced. `file_events` counts the events processed from this file,
/// including those that completed before a failure.
#[allow(clippy::too_many_arguments)]
fn process_file(
    format: &dyn ContainerFormat,
    stages: &mut [Box<dyn Stage>],
    record: &mut Record,
    input: &str,
    output: Option<&str>,
    event_limit: i64,
    report_interval: u64,
    file_events: &mut u64,
    events_processed: &mut u64,
) -> Result<()> {
    let mut stream = RecordStream::open(format, input, output)?;
    stream.bind(record);

    let outcome = drive_stages(
        &mut stream,
        stages,
        record,
        event_limit,
        report_interval,
        file_events,
        events_processed,
    );
    let close_outcome = stream.close();

    outcome?;
    close_outcome
}

/// Initialize, run the process loop, and finalize all stages for one
/// open stream.
#[allow(clippy::too_many_arguments)]
fn drive_stages(
    stream: &mut RecordStream,
    stages: &mut [Box<dyn Stage>],
    record: &mut Record,
    event_limit: i64,
    report_interval: u64,
    file_events: &mut u64,
    events_processed: &mut u64,
) -> Result<()> {
    for stage in stages.iter_mut() {
        stage
            .initialize(stream.schema())
            .map_err(|e| attribute(stage.name(), e))?;
    }

    loop {
        // The limit is a cooperative, checked-per-iteration bound over
        // the whole run.
        if event_limit >= 0 && *events_processed >= event_limit as u64 {
            break;
        }
        record.clear();
        if !stream.advance(record)? {
            break;
        }
        if *events_processed % report_interval == 0 {
            info!("Event: {}", events_processed);
        }

        for stage in stages.iter_mut() {
            stage
                .process(record)
                .map_err(|e| attribute(stage.name(), e))?;
        }
        if stream.has_output() {
            stream.emit(record)?;
        }

        *events_processed += 1;
        *file_events += 1;
    }

    // Finalize runs after normal exhaustion or a reached limit, even when
    // zero events were processed.
    for stage in stages.iter_mut() {
        stage
            .finalize()
            .map_err(|e| attribute(stage.name(), e))?;
    }

    Ok(())
}

/// Attribute a stage callback error to the stage that raised it.
fn attribute(stage: &str, e: PipelineError) -> PipelineError {
    match e {
        PipelineError::Stage { .. } => e,
        other => PipelineError::stage(stage, other.to_string()),
    }
}

impl RunResult {
    /// Whether every file was processed to completion.
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
