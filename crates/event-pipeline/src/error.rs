//! Error types for the pipeline library.

use thiserror::Error;

/// Main error type for pipeline operations.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Configuration error (invalid YAML, missing fields, empty input list, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A source or sink could not be opened
    #[error("Cannot open {path}: {message}")]
    Open { path: String, message: String },

    /// A stage failed during initialize/process/finalize
    #[error("Stage {stage} failed: {message}")]
    Stage { stage: String, message: String },

    /// Record data does not match the declared schema
    #[error("Schema error: {0}")]
    Schema(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Create an Open error for a path that could not be opened
    pub fn open(path: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Open {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a Stage error attributed to a named stage
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        // Add error chain for wrapped errors
        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
