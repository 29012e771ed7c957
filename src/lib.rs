// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! chordscope: chord identification and key analysis.
//!
//! Parses note names, names the chord they form, relates it to a key with a
//! roman numeral, and maps spellings onto an 88-key keyboard.

pub mod analysis;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod music;

pub use analysis::{analyze, ChordReport, ChordRequest};
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use keyboard::{KeyId, KeyKind, Keyboard};
