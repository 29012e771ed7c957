// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for chordscope.
//!
//! Holds the analysis defaults applied to every request. Files ending in
//! `.toml` are read as TOML, anything else as YAML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::ChordRequest;

/// Analysis defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzerConfig {
    /// Simplify enharmonic spellings before naming chords
    #[serde(default = "default_true")]
    pub simplify_chords: bool,
    /// Show bare numerals ("vii" rather than "vii°7")
    #[serde(default = "default_true")]
    pub simplify_numeral: bool,
    /// Key applied to requests that do not name one (e.g., "C", "f#", "Bb minor")
    #[serde(default)]
    pub key: Option<String>,
    /// Log level: error, warn, info, debug or trace
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            simplify_chords: default_true(),
            simplify_numeral: default_true(),
            key: None,
            log_level: default_log_level(),
        }
    }
}

impl AnalyzerConfig {
    /// Load a configuration file, TOML or YAML by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        let config = if is_toml {
            Self::from_toml(&contents)
        } else {
            Self::from_yaml(&contents)
        };
        config.with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Parse a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Build a request for `notes` carrying these defaults
    pub fn request<I, S>(&self, notes: I) -> ChordRequest
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut request = ChordRequest::new(notes)
            .simplify_chords(self.simplify_chords)
            .simplify_numeral(self.simplify_numeral);
        request.key = self.key.clone();
        request
    }

    /// The configured log level, if it names one
    pub fn tracing_level(&self) -> Option<tracing::Level> {
        self.log_level.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
simplify_chords: false
simplify_numeral: true
key: "Bb minor"
log_level: debug
"#;

        let config = AnalyzerConfig::from_yaml(yaml).unwrap();
        assert!(!config.simplify_chords);
        assert!(config.simplify_numeral);
        assert_eq!(config.key, Some("Bb minor".to_string()));
        assert_eq!(config.tracing_level(), Some(tracing::Level::DEBUG));
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
simplify_numeral = false
key = "G"
"#;

        let config = AnalyzerConfig::from_toml(text).unwrap();
        assert!(config.simplify_chords);
        assert!(!config.simplify_numeral);
        assert_eq!(config.key.as_deref(), Some("G"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_default_values() {
        let config = AnalyzerConfig::from_yaml("").unwrap();
        assert_eq!(config, AnalyzerConfig::default());

        let config = AnalyzerConfig::from_toml("").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.tracing_level(), Some(tracing::Level::WARN));
    }

    #[test]
    fn test_invalid_config() {
        assert!(AnalyzerConfig::from_yaml("simplify_chords: [1, 2]").is_err());
        assert!(AnalyzerConfig::from_toml("key = ").is_err());
    }

    #[test]
    fn test_request_carries_defaults() {
        let config = AnalyzerConfig {
            simplify_chords: false,
            simplify_numeral: false,
            key: Some("D".to_string()),
            log_level: default_log_level(),
        };

        let request = config.request(["D4", "F#4", "A4"]);
        assert_eq!(request.notes, ["D4", "F#4", "A4"]);
        assert!(!request.simplify_chords);
        assert!(!request.simplify_numeral);
        assert_eq!(request.key.as_deref(), Some("D"));
    }

    #[test]
    fn test_unknown_log_level() {
        let config = AnalyzerConfig {
            log_level: "loud".to_string(),
            ..AnalyzerConfig::default()
        };
        assert_eq!(config.tracing_level(), None);
    }
}
