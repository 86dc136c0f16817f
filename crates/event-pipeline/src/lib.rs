//! # event-pipeline
//!
//! Batch orchestrator for record-at-a-time event processing.
//!
//! The orchestrator reads sequences of per-event records from input
//! containers, pushes each record through an ordered pipeline of stages,
//! and optionally emits transformed records to paired output containers:
//!
//! - **Sequential by design**: one input/output pair is fully processed
//!   (open, initialize, process loop, finalize, close) before the next
//!   begins
//! - **Stage lifecycle contract**: initialize/process/finalize, invoked
//!   in registration order
//! - **Per-file failure containment** with an aggregated run summary
//! - **Whole-run event limit** as a cooperative, per-iteration bound
//!
//! ## Example
//!
//! ```rust,no_run
//! use event_pipeline::{Config, Orchestrator, Result};
//!
//! fn main() -> Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let result = Orchestrator::new(config).run()?;
//!     println!("Processed {} events", result.events_processed);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod container;
pub mod error;
pub mod orchestrator;
pub mod record;
pub mod schema;
pub mod stage;
pub mod stream;

// Re-exports for convenient access
pub use config::Config;
pub use container::{ContainerFormat, JsonlFormat, RecordReader, RecordWriter};
pub use error::{PipelineError, Result};
pub use orchestrator::{FileReport, FileStatus, Orchestrator, RunResult, RunStatus};
pub use record::Record;
pub use schema::{Field, FieldKind, Schema, SchemaRef};
pub use stage::Stage;
pub use stream::RecordStream;
