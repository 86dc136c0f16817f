//! Configuration validation.

use super::Config;
use crate::error::{PipelineError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.input_files.is_empty() {
        return Err(PipelineError::Config(
            "input_files must name at least one file to process".into(),
        ));
    }
    if config.input_files.iter().any(|path| path.is_empty()) {
        return Err(PipelineError::Config(
            "input_files must not contain empty paths".into(),
        ));
    }

    // The behavior for a non-empty output list shorter than the input list
    // is undefined in the original design; reject it before any I/O.
    if !config.output_files.is_empty() && config.output_files.len() != config.input_files.len() {
        return Err(PipelineError::Config(format!(
            "output_files must be empty or match input_files ({} inputs, {} outputs)",
            config.input_files.len(),
            config.output_files.len()
        )));
    }
    if config.output_files.iter().any(|path| path.is_empty()) {
        return Err(PipelineError::Config(
            "output_files must not contain empty paths".into(),
        ));
    }

    // A paired output must not clobber its own input.
    for (input, output) in config.input_files.iter().zip(&config.output_files) {
        if input == output {
            return Err(PipelineError::Config(format!(
                "input and output cannot be the same file: {}",
                input
            )));
        }
    }

    if config.report_interval == 0 {
        return Err(PipelineError::Config(
            "report_interval must be at least 1".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            input_files: vec!["run_001.jsonl".into(), "run_002.jsonl".into()],
            output_files: vec!["out_001.jsonl".into(), "out_002.jsonl".into()],
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let mut config = valid_config();
        config.input_files.clear();
        config.output_files.clear();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("at least one file"));
    }

    #[test]
    fn test_no_outputs_is_valid() {
        let mut config = valid_config();
        config.output_files.clear();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_short_output_list_rejected() {
        let mut config = valid_config();
        config.output_files.truncate(1);
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("match input_files"));
    }

    #[test]
    fn test_same_input_output_rejected() {
        let mut config = valid_config();
        config.output_files[0] = config.input_files[0].clone();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("same file"));
    }

    #[test]
    fn test_zero_report_interval_rejected() {
        let mut config = valid_config();
        config.report_interval = 0;
        assert!(validate(&config).is_err());
    }
}
