//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input container files, processed in registration order.
    pub input_files: Vec<String>,

    /// Output container files, index-aligned with `input_files`.
    /// Empty for an input-only run.
    #[serde(default)]
    pub output_files: Vec<String>,

    /// Maximum number of events processed across the whole run.
    /// Negative means unbounded.
    #[serde(default = "default_event_limit")]
    pub event_limit: i64,

    /// Emit a progress checkpoint every this many processed events.
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_files: Vec::new(),
            output_files: Vec::new(),
            event_limit: default_event_limit(),
            report_interval: default_report_interval(),
        }
    }
}

fn default_event_limit() -> i64 {
    -1
}

fn default_report_interval() -> u64 {
    1000
}
