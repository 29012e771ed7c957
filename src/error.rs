// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for chord analysis.
//!
//! Every failure the engine can report is a value of [`AnalysisError`];
//! none of them leave the engine in a bad state, so the next request can
//! be issued right after an error.

use thiserror::Error;

/// Largest number of distinct spellings a chord may hold
pub const MAX_CHORD_NOTES: usize = 16;

/// Errors produced while parsing notes, naming chords, or relating a chord to a key
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A note token could not be parsed
    #[error("Error processing note '{token}': {reason}")]
    InvalidNoteFormat { token: String, reason: String },

    /// Nothing was left to analyze after filtering the input
    #[error("No valid notes provided")]
    NoValidNotes,

    /// The chord holds more spellings than the identifier accepts
    #[error("Too many notes: {count} given, at most {max} supported")]
    TooManyNotes { count: usize, max: usize },

    /// The notes form a scale rather than a chord
    #[error("Scales are not supported, enter the notes of a chord")]
    ScalesUnsupported,

    /// The key name could not be parsed
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Interval or numeral computation failed for a valid chord and key
    #[error("Error calculating chord relationship: {0}")]
    RomanNumeralError(String),
}

impl AnalysisError {
    pub(crate) fn invalid_note(token: &str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidNoteFormat {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_key(key: &str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = AnalysisError::invalid_note("c4m2", "more than one octave number");
        assert_eq!(
            err.to_string(),
            "Error processing note 'c4m2': more than one octave number"
        );

        let err = AnalysisError::invalid_key("H", "unknown tonic letter 'H'");
        assert_eq!(err.to_string(), "Invalid key 'H': unknown tonic letter 'H'");
    }

    #[test]
    fn test_too_many_notes_message() {
        let err = AnalysisError::TooManyNotes {
            count: 17,
            max: MAX_CHORD_NOTES,
        };
        assert_eq!(err.to_string(), "Too many notes: 17 given, at most 16 supported");
    }
}
