// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord identification requests.
//!
//! Ties the engine together: raw note tokens are parsed, optionally
//! simplified, named, and related to a key when one is given. A failure to
//! relate the chord to the key never hides the chord name.

pub mod entry;

pub use entry::{highlighted_keys, normalize_note, split_entry, toggle_note};

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::music::chord::{Chord, ChordIdentity};
use crate::music::enharmonic;
use crate::music::key::{analyze_relationship, Relationship};
use crate::music::pitch::Pitch;

/// Shown instead of a relationship when there is no key to relate to
pub const NO_RELATIONSHIP: &str = "No valid key and/or chord provided";

/// Appended to a chord name when its spelling could not be simplified
pub const DEGRADED_SUFFIX: &str = " (enharmonics not simplified)";

/// A chord identification request
#[derive(Debug, Clone, PartialEq)]
pub struct ChordRequest {
    /// Raw note tokens; may repeat and may be blank
    pub notes: Vec<String>,
    /// Simplify enharmonic spellings before naming
    pub simplify_chords: bool,
    /// Strip figures and quality marks from the numeral
    pub simplify_numeral: bool,
    /// Key to relate the chord to
    pub key: Option<String>,
}

impl ChordRequest {
    /// Request with both simplifications on and no key
    pub fn new<I, S>(notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            notes: notes.into_iter().map(Into::into).collect(),
            simplify_chords: true,
            simplify_numeral: true,
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn simplify_chords(mut self, simplify: bool) -> Self {
        self.simplify_chords = simplify;
        self
    }

    pub fn simplify_numeral(mut self, simplify: bool) -> Self {
        self.simplify_numeral = simplify;
        self
    }
}

/// Outcome of a chord identification request
#[derive(Debug, Clone, PartialEq)]
pub struct ChordReport {
    pub identity: ChordIdentity,
    /// True when simplification failed and the input spelling was named
    pub degraded: bool,
    /// Present when the request named a key
    pub relationship: Option<Result<Relationship>>,
}

impl ChordReport {
    /// Chord name, marked when the spelling was not simplified as asked
    pub fn chord_name(&self) -> String {
        if self.degraded {
            format!("{}{}", self.identity.name, DEGRADED_SUFFIX)
        } else {
            self.identity.name.clone()
        }
    }

    /// First display line: the numeral statement, the relationship error,
    /// or the no-key placeholder
    pub fn relationship_text(&self) -> String {
        match &self.relationship {
            Some(Ok(relationship)) => relationship.relationship_line(),
            Some(Err(e)) => e.to_string(),
            None => NO_RELATIONSHIP.to_string(),
        }
    }

    /// Second display line: diatonic statement, empty without a relationship
    pub fn diatonic_text(&self) -> String {
        match &self.relationship {
            Some(Ok(relationship)) => relationship.diatonic_line(),
            _ => String::new(),
        }
    }

    /// Serializable view of this report
    pub fn view(&self) -> ReportView<'_> {
        let (relationship, relationship_error) = match &self.relationship {
            Some(Ok(relationship)) => (Some(relationship), None),
            Some(Err(e)) => (None, Some(e.to_string())),
            None => (None, None),
        };
        ReportView {
            name: self.chord_name(),
            chord: &self.identity,
            degraded: self.degraded,
            relationship,
            relationship_error,
        }
    }

    /// Render the report as a YAML document
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_yaml::to_string(&self.view()).context("Failed to serialize chord report")
    }
}

/// Report fields in output order, for machine-readable output
#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    pub name: String,
    pub chord: &'a ChordIdentity,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<&'a Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_error: Option<String>,
}

/// Run a chord identification request.
///
/// Any bad note token aborts the whole request. Errors relating the chord
/// to the key are reported inside the returned [`ChordReport`].
pub fn analyze(request: &ChordRequest) -> Result<ChordReport> {
    let pitches = request
        .notes
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(Pitch::parse)
        .collect::<Result<Vec<_>>>()?;

    let chord = Chord::new(&pitches)?;
    let mut degraded = false;
    let chord = if request.simplify_chords {
        match enharmonic::try_simplify(chord.pitches()) {
            Ok(simplified) => Chord::new(&simplified)?,
            Err(e) => {
                warn!(error = %e, "naming the chord with its original spelling");
                degraded = true;
                chord
            }
        }
    } else {
        chord
    };

    let identity = chord.identify()?;
    debug!(name = %identity.name, root = %identity.root, "identified chord");

    let relationship = request
        .key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(|key| analyze_relationship(&identity, key, request.simplify_numeral));

    Ok(ChordReport {
        identity,
        degraded,
        relationship,
    })
}
