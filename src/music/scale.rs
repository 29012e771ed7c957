// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale definitions.
//!
//! Provides the interval patterns used to build diatonic key scales and
//! to recognise note collections that are scales rather than chords.

use std::fmt;

use serde::Serialize;

use super::pitch::{Letter, Pitch};

/// Scale types known to the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    Major,        // Ionian
    NaturalMinor, // Aeolian
    HarmonicMinor,
    MelodicMinor, // Ascending form
    WholeTone,
    Diminished, // Half-whole
    Chromatic,
}

impl ScaleType {
    /// Collections checked when deciding whether a note set is a scale,
    /// in the order they are tried
    pub const COLLECTIONS: [ScaleType; 7] = [
        ScaleType::Major,
        ScaleType::NaturalMinor,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::WholeTone,
        ScaleType::Diminished,
        ScaleType::Chromatic,
    ];

    /// Get the intervals (semitones from root) for this scale type
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ScaleType::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleType::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            ScaleType::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            ScaleType::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            ScaleType::WholeTone => &[0, 2, 4, 6, 8, 10],
            ScaleType::Diminished => &[0, 1, 3, 4, 6, 7, 9, 10],
            ScaleType::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        }
    }

    /// Interval pattern as a bitmask over the 12 pitch classes
    pub fn mask(self) -> u16 {
        self.intervals().iter().fold(0u16, |mask, &i| mask | (1 << i))
    }

    /// Parse scale type from string
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match s.as_str() {
            "major" | "ionian" => Some(ScaleType::Major),
            "minor" | "naturalminor" | "aeolian" => Some(ScaleType::NaturalMinor),
            "harmonicminor" => Some(ScaleType::HarmonicMinor),
            "melodicminor" => Some(ScaleType::MelodicMinor),
            "wholetone" => Some(ScaleType::WholeTone),
            "diminished" | "octatonic" | "halfwhole" => Some(ScaleType::Diminished),
            "chromatic" => Some(ScaleType::Chromatic),
            _ => None,
        }
    }

    /// Get a human-readable name for this scale type
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::NaturalMinor => "natural minor",
            ScaleType::HarmonicMinor => "harmonic minor",
            ScaleType::MelodicMinor => "melodic minor",
            ScaleType::WholeTone => "whole-tone",
            ScaleType::Diminished => "octatonic",
            ScaleType::Chromatic => "chromatic",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A spelled scale: one degree per letter, starting on the tonic
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    notes: Vec<Pitch>,
}

impl Scale {
    /// Spell a scale one letter per degree, starting on the tonic's letter
    pub fn new(tonic: Pitch, scale_type: ScaleType) -> Self {
        let tonic_letter = tonic.letter().index() as i64;
        let tonic_pc = tonic.pitch_class() as i64;
        let notes = scale_type
            .intervals()
            .iter()
            .enumerate()
            .map(|(degree, &interval)| {
                let letter = Letter::from_index(tonic_letter + degree as i64);
                let target = (tonic_pc + interval as i64).rem_euclid(12);
                let mut alter = (target - letter.semitone_offset()).rem_euclid(12);
                if alter > 6 {
                    alter -= 12;
                }
                Pitch::new(letter, alter as i32, tonic.octave())
            })
            .collect();

        Self { notes }
    }

    /// Get the spelled notes in this scale
    pub fn notes(&self) -> &[Pitch] {
        &self.notes
    }

    /// Pitch classes of this scale as a bitmask
    pub fn pitch_class_mask(&self) -> u16 {
        self.notes
            .iter()
            .fold(0u16, |mask, p| mask | (1 << p.pitch_class()))
    }

    /// Get the note at a given scale degree (1-based)
    pub fn note_at_degree(&self, degree: usize) -> Option<Pitch> {
        if degree == 0 || degree > self.notes.len() {
            return None;
        }
        Some(self.notes[degree - 1])
    }
}
