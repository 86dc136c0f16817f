//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_minimal() {
        let config = Config::from_yaml("input_files:\n  - run_001.jsonl\n").unwrap();
        assert_eq!(config.input_files, vec!["run_001.jsonl"]);
        assert!(config.output_files.is_empty());
        assert_eq!(config.event_limit, -1);
        assert_eq!(config.report_interval, 1000);
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = r#"
input_files:
  - run_001.jsonl
  - run_002.jsonl
output_files:
  - out_001.jsonl
  - out_002.jsonl
event_limit: 500
report_interval: 100
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.input_files.len(), 2);
        assert_eq!(config.output_files.len(), 2);
        assert_eq!(config.event_limit, 500);
        assert_eq!(config.report_interval, 100);
    }

    #[test]
    fn test_from_yaml_rejects_invalid() {
        let yaml = "input_files: []\n";
        assert!(Config::from_yaml(yaml).is_err());
    }
}
