use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::GrammarKind;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("input path must not be empty")]
    EmptyInput,

    #[error("output path must not be empty")]
    EmptyOutput,

    #[error("checkpoint_interval must be > 0")]
    ZeroCheckpointInterval,

    #[error("{name} must be within (0, 100], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f32 },
}

/// One run's worth of configuration, constructed once and passed by
/// reference through the pipeline. No process-wide mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub grammar: GrammarKind,
    /// Memory usage percent above which a checkpoint pauses the run.
    pub pause_threshold: f32,
    /// Disk usage percent above which the run halts (preflight or mid-run).
    pub disk_threshold: f32,
    /// Governance checkpoint every this many processed lines.
    pub checkpoint_interval: u64,
    /// Cooldown pause length after a memory trip, in seconds.
    pub cooldown_secs: u64,
    /// OCR heuristic: rewrite digit '3' to letter 'e' in name fields.
    /// Known false-positive risk on legitimately numeric names.
    pub fix_name_glyphs: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            grammar: GrammarKind::StructuredLabeled,
            pause_threshold: 80.0,
            disk_threshold: 95.0,
            checkpoint_interval: 10_000,
            cooldown_secs: 2,
            fix_name_glyphs: true,
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply `SCOUR_*` environment variable overrides on top of the current
    /// values. Unparseable values are ignored, matching file/label override
    /// behavior elsewhere in the stack.
    pub fn apply_env(&mut self) {
        if let Ok(input) = std::env::var("SCOUR_INPUT") {
            self.input = PathBuf::from(input);
        }
        if let Ok(output) = std::env::var("SCOUR_OUTPUT") {
            self.output = PathBuf::from(output);
        }
        if let Some(pause) = env_parse::<f32>("SCOUR_PAUSE_THRESHOLD") {
            self.pause_threshold = pause;
        }
        if let Some(disk) = env_parse::<f32>("SCOUR_DISK_THRESHOLD") {
            self.disk_threshold = disk;
        }
        if let Some(interval) = env_parse::<u64>("SCOUR_CHECKPOINT_INTERVAL") {
            self.checkpoint_interval = interval;
        }
        if let Some(secs) = env_parse::<u64>("SCOUR_COOLDOWN_SECS") {
            self.cooldown_secs = secs;
        }
    }

    /// Validate configuration values. Fast, no I/O — missing input files
    /// surface when the pipeline opens them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.as_os_str().is_empty() {
            return Err(ConfigError::EmptyInput);
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutput);
        }
        if self.checkpoint_interval == 0 {
            return Err(ConfigError::ZeroCheckpointInterval);
        }
        validate_threshold("pause_threshold", self.pause_threshold)?;
        validate_threshold("disk_threshold", self.disk_threshold)?;
        Ok(())
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

fn validate_threshold(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value > 0.0 && value <= 100.0) {
        return Err(ConfigError::ThresholdOutOfRange { name, value });
    }
    Ok(())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> RunConfig {
        RunConfig {
            input: PathBuf::from("dump.txt"),
            output: PathBuf::from("records.jsonl"),
            ..RunConfig::default()
        }
    }

    // ── Defaults ────────────────────────────────────────────────

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.grammar, GrammarKind::StructuredLabeled);
        assert_eq!(config.pause_threshold, 80.0);
        assert_eq!(config.disk_threshold, 95.0);
        assert_eq!(config.checkpoint_interval, 10_000);
        assert_eq!(config.cooldown_secs, 2);
        assert!(config.fix_name_glyphs);
    }

    // ── Validation ──────────────────────────────────────────────

    #[test]
    fn test_validate_ok() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_input() {
        let mut config = valid_config();
        config.input = PathBuf::new();
        assert_eq!(config.validate(), Err(ConfigError::EmptyInput));
    }

    #[test]
    fn test_validate_empty_output() {
        let mut config = valid_config();
        config.output = PathBuf::new();
        assert_eq!(config.validate(), Err(ConfigError::EmptyOutput));
    }

    #[test]
    fn test_validate_zero_checkpoint_interval() {
        let mut config = valid_config();
        config.checkpoint_interval = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroCheckpointInterval));
    }

    #[test]
    fn test_validate_threshold_out_of_range() {
        let mut config = valid_config();
        config.pause_threshold = 0.0;
        assert!(config.validate().is_err());

        config.pause_threshold = 80.0;
        config.disk_threshold = 120.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_threshold_at_bound_ok() {
        let mut config = valid_config();
        config.pause_threshold = 100.0;
        config.disk_threshold = 100.0;
        assert!(config.validate().is_ok());
    }

    // ── TOML loading ────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_partial_keeps_defaults() {
        let config = RunConfig::from_toml_str(
            r#"
            input = "dump.txt"
            output = "records.jsonl"
            grammar = "tolerant_positional"
            disk_threshold = 90.0
            "#,
        )
        .unwrap();

        assert_eq!(config.grammar, GrammarKind::TolerantPositional);
        assert_eq!(config.disk_threshold, 90.0);
        assert_eq!(config.pause_threshold, 80.0); // Unchanged default
        assert_eq!(config.checkpoint_interval, 10_000);
    }

    #[test]
    fn test_from_toml_str_invalid_key_type() {
        let result = RunConfig::from_toml_str("checkpoint_interval = \"lots\"");
        assert!(result.is_err());
    }
}
