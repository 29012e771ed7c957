// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keys, roman numerals and chord-to-key relationships.
//!
//! Key names follow a small grammar: a tonic (letter plus `#`, `b` or `-`
//! accidentals) optionally followed by a mode word. Accepted mode words are
//! `major`, `maj`, `ionian`, `M`, `minor`, `min`, `aeolian` and `m`, with or
//! without a space. Without a mode word the letter case decides: "C" is C
//! major, "c" is C minor. Octave digits are rejected.
//!
//! Numerals are always measured against the major scale on the tonic, even
//! in minor keys, so A minor's C major triad reads "bIII".

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{AnalysisError, Result};

use super::chord::{ChordIdentity, ChordKind, ChordQuality};
use super::interval::Interval;
use super::pitch::{Letter, Pitch, DEFAULT_OCTAVE};
use super::scale::{Scale, ScaleType};

/// Key mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    /// Parse a mode word ("major", "min", "m", "aeolian")
    pub fn from_str(word: &str) -> Option<Self> {
        if word == "M" {
            return Some(Mode::Major);
        }
        match word.trim().to_lowercase().as_str() {
            "m" | "min" => Some(Mode::Minor),
            "maj" => Some(Mode::Major),
            other => match ScaleType::from_str(other)? {
                ScaleType::Major => Some(Mode::Major),
                ScaleType::NaturalMinor => Some(Mode::Minor),
                _ => None,
            },
        }
    }

    /// Scale the key's diatonic set comes from
    pub fn scale_type(self) -> ScaleType {
        match self {
            Mode::Major => ScaleType::Major,
            Mode::Minor => ScaleType::NaturalMinor,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A key: tonic (octave ignored) and mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Key {
    tonic: Pitch,
    mode: Mode,
}

impl Key {
    pub fn new(tonic: Pitch, mode: Mode) -> Self {
        Self {
            tonic: tonic.with_octave(DEFAULT_OCTAVE),
            mode,
        }
    }

    /// Parse a key name such as "C", "f#", "Bb minor" or "ebm"
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let first = trimmed
            .chars()
            .next()
            .ok_or_else(|| AnalysisError::invalid_key(text, "empty key name"))?;
        if Letter::from_char(first).is_none() {
            return Err(AnalysisError::invalid_key(
                trimmed,
                format!("unknown tonic letter '{}'", first),
            ));
        }

        // The tonic runs until the first character that is not an accidental
        let split = trimmed
            .char_indices()
            .skip(1)
            .find(|(_, c)| !matches!(c, '#' | 'b' | '-'))
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        let (tonic_text, mode_text) = trimmed.split_at(split);
        let mode_text = mode_text.trim();

        let tonic = Pitch::parse(tonic_text).map_err(|e| {
            let reason = match e {
                AnalysisError::InvalidNoteFormat { reason, .. } => reason,
                other => other.to_string(),
            };
            AnalysisError::invalid_key(trimmed, reason)
        })?;

        let mode = if mode_text.is_empty() {
            if first.is_ascii_uppercase() {
                Mode::Major
            } else {
                Mode::Minor
            }
        } else if mode_text.chars().any(|c| c.is_ascii_digit()) {
            return Err(AnalysisError::invalid_key(
                trimmed,
                "a key takes no octave number",
            ));
        } else {
            Mode::from_str(mode_text).ok_or_else(|| {
                AnalysisError::invalid_key(trimmed, format!("unknown mode '{}'", mode_text))
            })?
        };

        Ok(Self::new(tonic, mode))
    }

    pub fn tonic(&self) -> Pitch {
        self.tonic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The key's own diatonic scale
    pub fn scale(&self) -> Scale {
        Scale::new(self.tonic, self.mode.scale_type())
    }

    /// Major scale on the tonic, the reference for numerals
    pub fn major_tonic_scale(&self) -> Scale {
        Scale::new(self.tonic, ScaleType::Major)
    }

    /// Whether every pitch class in `mask` belongs to the key
    pub fn is_diatonic(&self, mask: u16) -> bool {
        let diatonic = self.scale().pitch_class_mask();
        mask & !diatonic == 0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic.name(), self.mode)
    }
}

/// A roman numeral: degree of the major-tonic scale, chromatic alteration,
/// case, quality mark and figure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomanNumeral {
    degree: u8,
    alteration: i64,
    upper: bool,
    mark: &'static str,
    figure: &'static str,
}

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

impl RomanNumeral {
    /// Numeral of a named chord in `key`.
    ///
    /// The degree is the root letter's position in the major scale on the
    /// tonic; the alteration is how far the root sits from that degree.
    pub fn for_chord(identity: &ChordIdentity, key: &Key) -> Result<Self> {
        // Rejects roots too far from any degree to name
        Interval::ascending(&key.tonic(), &identity.root)?;

        let degree = key.tonic().letter().steps_to(identity.root.letter()) + 1;
        let reference = key
            .major_tonic_scale()
            .note_at_degree(degree)
            .ok_or_else(|| {
                AnalysisError::RomanNumeralError(format!("no scale degree {} in {}", degree, key))
            })?;
        let mut alteration =
            (identity.root.pitch_class() as i64 - reference.pitch_class() as i64).rem_euclid(12);
        if alteration > 6 {
            alteration -= 12;
        }

        let quality = identity.quality();

        let mark = match quality {
            Some(ChordQuality::DiminishedTriad | ChordQuality::DiminishedSeventh) => "°",
            Some(ChordQuality::HalfDiminishedSeventh) => "ø",
            Some(
                ChordQuality::AugmentedTriad
                | ChordQuality::AugmentedSeventh
                | ChordQuality::AugmentedMajorSeventh,
            ) => "+",
            _ => "",
        };

        let figure = match identity.kind {
            ChordKind::Tertian { quality, .. } => figure_for(quality, identity.inversion),
            _ => "",
        };

        Ok(Self {
            degree: degree as u8,
            alteration,
            upper: !identity.has_minor_third(),
            mark,
            figure,
        })
    }

    /// Scale degree, 1-7
    pub fn degree(&self) -> u8 {
        self.degree
    }

    /// Chromatic alteration against the major-tonic scale degree
    pub fn alteration(&self) -> i64 {
        self.alteration
    }

    fn prefix(&self) -> String {
        let marker = if self.alteration > 0 { "#" } else { "b" };
        marker.repeat(self.alteration.unsigned_abs() as usize)
    }

    fn letters(&self) -> String {
        let numeral = NUMERALS[(self.degree as usize).saturating_sub(1) % 7];
        if self.upper {
            numeral.to_string()
        } else {
            numeral.to_lowercase()
        }
    }

    /// Full numeral with quality mark and figure ("vii°7", "V65")
    pub fn full(&self) -> String {
        format!("{}{}{}{}", self.prefix(), self.letters(), self.mark, self.figure)
    }

    /// Accidentals and numeral letters only ("vii°7" becomes "vii")
    pub fn simplified(&self) -> String {
        format!("{}{}", self.prefix(), self.letters())
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full())
    }
}

/// Figured-bass or extension suffix for a quality in a given inversion
fn figure_for(quality: ChordQuality, inversion: u8) -> &'static str {
    if quality.is_triad() {
        return match inversion {
            1 => "6",
            2 => "64",
            _ => "",
        };
    }
    if quality.is_seventh() {
        return match inversion {
            1 => "65",
            2 => "43",
            3 => "42",
            _ => "7",
        };
    }
    match quality {
        ChordQuality::MajorSixth | ChordQuality::MinorSixth => "add6",
        ChordQuality::AddedNinth => "add9",
        ChordQuality::SixNine => "6/9",
        ChordQuality::SuspendedFourth => "sus4",
        ChordQuality::SuspendedSecond => "sus2",
        ChordQuality::SeventhSuspendedFourth => "7sus4",
        ChordQuality::DominantMinorNinth => "b9",
        ChordQuality::DominantEleventh | ChordQuality::MinorEleventh => "11",
        _ => "9",
    }
}

/// How a chord relates to a key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    pub key: Key,
    pub numeral: String,
    pub is_diatonic: bool,
    /// Interval from the tonic up to the chord root
    #[serde(skip)]
    pub interval: Interval,
}

impl Relationship {
    /// "This chord is V in C major, a Perfect Fifth above the tonic (C)"
    pub fn relationship_line(&self) -> String {
        let interval = self.interval.nice_name();
        let article = if interval.starts_with(['A', 'E', 'I', 'O', 'U']) {
            "an"
        } else {
            "a"
        };
        format!(
            "This chord is {} in {}, {} {} above the tonic ({})",
            self.numeral,
            self.key,
            article,
            interval,
            self.key.tonic().name()
        )
    }

    /// "Diatonic to C major" or "Not diatonic to C major"
    pub fn diatonic_line(&self) -> String {
        if self.is_diatonic {
            format!("Diatonic to {}", self.key)
        } else {
            format!("Not diatonic to {}", self.key)
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.relationship_line(), self.diatonic_line())
    }
}

/// Relate a named chord to the key called `key_name`.
///
/// Key parsing failures are [`AnalysisError::InvalidKey`]; interval and
/// numeral failures are [`AnalysisError::RomanNumeralError`].
pub fn analyze_relationship(
    identity: &ChordIdentity,
    key_name: &str,
    simplify_numeral: bool,
) -> Result<Relationship> {
    let key = Key::parse(key_name)?;
    let interval = Interval::ascending(&key.tonic(), &identity.root)?;
    let numeral = RomanNumeral::for_chord(identity, &key)?;
    let is_diatonic = key.is_diatonic(identity.pitch_class_mask());

    debug!(key = %key, numeral = %numeral, is_diatonic, "related chord to key");

    Ok(Relationship {
        key,
        numeral: if simplify_numeral {
            numeral.simplified()
        } else {
            numeral.full()
        },
        is_diatonic,
        interval,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::chord::Chord;

    fn identity(notes: &[&str]) -> ChordIdentity {
        Chord::parse(notes).unwrap().identify().unwrap()
    }

    fn numeral(notes: &[&str], key: &str) -> String {
        analyze_relationship(&identity(notes), key, false).unwrap().numeral
    }

    #[test]
    fn test_key_grammar() {
        let c = Key::parse("C").unwrap();
        assert_eq!(c.mode(), Mode::Major);
        assert_eq!(c.tonic(), Pitch::parse("C").unwrap());

        assert_eq!(Key::parse("c").unwrap().mode(), Mode::Minor);
        assert_eq!(Key::parse("f#").unwrap().to_string(), "F# minor");
        assert_eq!(Key::parse("Bb").unwrap().to_string(), "Bb major");
        assert_eq!(Key::parse("bb").unwrap().to_string(), "Bb minor");
        assert_eq!(Key::parse("E-").unwrap().to_string(), "Eb major");
        assert_eq!(Key::parse("Ebm").unwrap().to_string(), "Eb minor");
        assert_eq!(Key::parse("a minor").unwrap().to_string(), "A minor");
        assert_eq!(Key::parse("c major").unwrap().to_string(), "C major");
        assert_eq!(Key::parse(" G maj ").unwrap().to_string(), "G major");
        assert_eq!(Key::parse("DM").unwrap().to_string(), "D major");
    }

    #[test]
    fn test_invalid_keys() {
        for bad in ["", "H", "C4", "C dorian", "#C", "C#b"] {
            let err = Key::parse(bad).unwrap_err();
            assert!(
                matches!(err, AnalysisError::InvalidKey { .. }),
                "{:?} should be rejected, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_diatonic_membership() {
        let c = Key::parse("C").unwrap();
        assert!(c.is_diatonic(identity(&["C4", "E4", "G4"]).pitch_class_mask()));
        assert!(!c.is_diatonic(identity(&["C#4", "E4", "G4"]).pitch_class_mask()));

        let a_minor = Key::parse("a").unwrap();
        assert!(a_minor.is_diatonic(identity(&["E4", "G4", "B4"]).pitch_class_mask()));
        assert!(!a_minor.is_diatonic(identity(&["E4", "G#4", "B4"]).pitch_class_mask()));
    }

    #[test]
    fn test_basic_numerals() {
        assert_eq!(numeral(&["C4", "E4", "G4"], "C"), "I");
        assert_eq!(numeral(&["C4", "E4", "G4"], "G"), "IV");
        assert_eq!(numeral(&["D4", "F4", "A4"], "C"), "ii");
        assert_eq!(numeral(&["G3", "B3", "D4", "F4"], "C"), "V7");
        assert_eq!(numeral(&["B3", "D4", "F4"], "C"), "vii°");
        assert_eq!(numeral(&["B3", "D4", "F4", "A4"], "C"), "viiø7");
        assert_eq!(numeral(&["B3", "D4", "F4", "Ab4"], "C"), "vii°7");
    }

    #[test]
    fn test_inverted_figures() {
        assert_eq!(numeral(&["E3", "G3", "C4"], "C"), "I6");
        assert_eq!(numeral(&["G3", "C4", "E4"], "C"), "I64");
        assert_eq!(numeral(&["B3", "D4", "F4", "G4"], "C"), "V65");
        assert_eq!(numeral(&["D4", "F4", "G4", "B4"], "C"), "V43");
        assert_eq!(numeral(&["F3", "G3", "B3", "D4"], "C"), "V42");
    }

    #[test]
    fn test_chromatic_prefixes() {
        assert_eq!(numeral(&["Eb4", "G4", "Bb4"], "C"), "bIII");
        assert_eq!(numeral(&["C#4", "E4", "G4"], "C"), "#i°");
        assert_eq!(numeral(&["F#4", "A#4", "C#5"], "C"), "#IV");
    }

    #[test]
    fn test_major_tonic_scale_sets_degrees() {
        let a_minor = Key::parse("a").unwrap();
        let reference: Vec<String> = a_minor
            .major_tonic_scale()
            .notes()
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(reference, ["A", "B", "C#", "D", "E", "F#", "G#"]);

        let c_major = identity(&["C4", "E4", "G4"]);
        let numeral = RomanNumeral::for_chord(&c_major, &a_minor).unwrap();
        assert_eq!(numeral.degree(), 3);
        assert_eq!(numeral.alteration(), -1);

        let wrapped = identity(&["Cb4", "Eb4", "Gb4"]);
        let numeral = RomanNumeral::for_chord(&wrapped, &Key::parse("C").unwrap()).unwrap();
        assert_eq!(numeral.degree(), 1);
        assert_eq!(numeral.full(), "bI");
    }

    #[test]
    fn test_minor_key_uses_major_tonic_numerals() {
        let rel = analyze_relationship(&identity(&["C4", "E4", "G4"]), "a", true).unwrap();
        assert_eq!(rel.numeral, "bIII");
        assert!(rel.is_diatonic);
    }

    #[test]
    fn test_simplified_numeral() {
        let rel = analyze_relationship(&identity(&["B3", "D4", "F4", "Ab4"]), "C", true).unwrap();
        assert_eq!(rel.numeral, "vii");
        let rel = analyze_relationship(&identity(&["G3", "B3", "D4", "F4"]), "C", true).unwrap();
        assert_eq!(rel.numeral, "V");
    }

    #[test]
    fn test_relationship_text() {
        let rel = analyze_relationship(&identity(&["G3", "B3", "D4"]), "C", true).unwrap();
        assert_eq!(
            rel.relationship_line(),
            "This chord is V in C major, a Perfect Fifth above the tonic (C)"
        );
        assert_eq!(rel.diatonic_line(), "Diatonic to C major");

        let rel = analyze_relationship(&identity(&["F#4", "A#4", "C#5"]), "C", true).unwrap();
        assert!(rel.relationship_line().contains("an Augmented Fourth"));
        assert_eq!(rel.diatonic_line(), "Not diatonic to C major");
    }

    #[test]
    fn test_unnameable_interval_is_numeral_error() {
        let chord = Chord::new(&[Pitch::new(Letter::G, 3, 4)]).unwrap();
        let err = analyze_relationship(&chord.identify().unwrap(), "C", true).unwrap_err();
        assert!(matches!(err, AnalysisError::RomanNumeralError(_)));
    }

    #[test]
    fn test_non_tertian_case() {
        assert_eq!(numeral(&["A3", "C4"], "C"), "vi");
        assert_eq!(numeral(&["G3", "D4"], "C"), "V");
        assert_eq!(numeral(&["D4"], "C"), "II");
    }
}
