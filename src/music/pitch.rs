// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Spelled pitches.
//!
//! A [`Pitch`] keeps the letter, the signed accidental count and the octave
//! exactly as written, so "C#4", "Db4" and "B##3" stay distinct values that
//! happen to share a pitch class (and, here, a sounding semitone).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Pitch class type (0-11, C = 0)
pub type PitchClass = u8;

/// Octave assumed when a note is written without one
pub const DEFAULT_OCTAVE: i32 = 4;

/// Largest accidental magnitude returned by enharmonic queries
pub const MAX_ENHARMONIC_ALTER: u32 = 4;

/// Note letters in scale order, C first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// All letters in scale order
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Position within C D E F G A B
    pub fn index(self) -> usize {
        self as usize
    }

    /// Letter at a (wrapping) scale position
    pub fn from_index(index: i64) -> Self {
        Letter::ALL[index.rem_euclid(7) as usize]
    }

    /// Semitones above C of the natural note
    pub fn semitone_offset(self) -> i64 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Parse a letter, ignoring case
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// Letter steps upward from `self` to `other` (0-6)
    pub fn steps_to(self, other: Letter) -> usize {
        (other.index() as i64 - self.index() as i64).rem_euclid(7) as usize
    }

    /// Shortest distance around the letter circle (0-3)
    pub fn circular_distance(self, other: Letter) -> usize {
        let up = self.steps_to(other);
        up.min(7 - up)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A spelled pitch: letter, accidental count (sharps positive) and octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pitch {
    letter: Letter,
    accidental: i32,
    octave: i32,
}

impl Pitch {
    /// Create a pitch from its parts
    pub fn new(letter: Letter, accidental: i32, octave: i32) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    /// Create a natural pitch
    pub fn natural(letter: Letter, octave: i32) -> Self {
        Self::new(letter, 0, octave)
    }

    /// Parse a note token such as "C#4", "eb", "b--3" or "c4#".
    ///
    /// The letter is case-insensitive. Accidentals are `#` (sharp) or
    /// `b`/`-` (flat) and may be stacked but not mixed. A single group of
    /// digits anywhere after the letter is taken as the octave; without one
    /// the octave is [`DEFAULT_OCTAVE`].
    pub fn parse(text: &str) -> Result<Self> {
        let token = text.trim();
        if token.is_empty() {
            return Err(AnalysisError::invalid_note(text, "empty note"));
        }

        // Relocate the digit group so "c4#" reads like "c#4"
        let mut digits = String::new();
        let mut body = String::new();
        let mut digit_groups = 0;
        let mut in_digits = false;
        for c in token.chars() {
            if c.is_ascii_digit() {
                if !in_digits {
                    digit_groups += 1;
                    in_digits = true;
                }
                digits.push(c);
            } else {
                in_digits = false;
                body.push(c);
            }
        }
        if digit_groups > 1 {
            return Err(AnalysisError::invalid_note(
                token,
                "more than one octave number",
            ));
        }

        let mut chars = body.chars();
        let letter = match chars.next() {
            Some(c) => Letter::from_char(c).ok_or_else(|| {
                AnalysisError::invalid_note(token, format!("'{}' is not a note letter (A-G)", c))
            })?,
            None => return Err(AnalysisError::invalid_note(token, "missing note letter")),
        };

        let mut sharps: u64 = 0;
        let mut flats: u64 = 0;
        for c in chars {
            match c {
                '#' => sharps += 1,
                'b' | '-' => flats += 1,
                other => {
                    return Err(AnalysisError::invalid_note(
                        token,
                        format!("unexpected character '{}'", other),
                    ))
                }
            }
        }
        if sharps > 0 && flats > 0 {
            return Err(AnalysisError::invalid_note(
                token,
                "mixes sharp and flat markers",
            ));
        }

        let count = i32::try_from(sharps.max(flats))
            .map_err(|_| AnalysisError::invalid_note(token, "too many accidentals"))?;
        let accidental = if sharps > 0 { count } else { -count };

        let octave = if digits.is_empty() {
            DEFAULT_OCTAVE
        } else {
            digits
                .parse::<i32>()
                .map_err(|_| AnalysisError::invalid_note(token, "octave out of range"))?
        };

        Ok(Self::new(letter, accidental, octave))
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    /// Signed accidental count, sharps positive
    pub fn accidental(&self) -> i32 {
        self.accidental
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Same spelling in another octave
    pub fn with_octave(&self, octave: i32) -> Self {
        Self::new(self.letter, self.accidental, octave)
    }

    /// Pitch class (0-11)
    pub fn pitch_class(&self) -> PitchClass {
        (self.letter.semitone_offset() + self.accidental as i64).rem_euclid(12) as PitchClass
    }

    /// Absolute semitone on the MIDI scale (C4 = 60, B#3 = 60, Cb4 = 59)
    pub fn semitone(&self) -> i64 {
        (self.octave as i64 + 1) * 12 + self.letter.semitone_offset() + self.accidental as i64
    }

    /// Check whether two pitches share a pitch class, ignoring octave
    pub fn same_pitch_class(&self, other: &Pitch) -> bool {
        self.pitch_class() == other.pitch_class()
    }

    /// Spell `semitone` with `letter` in a given octave.
    ///
    /// Returns `None` when the octave or the required accidental does not
    /// fit the pitch representation.
    pub fn spelled_at(letter: Letter, octave: i64, semitone: i64) -> Option<Self> {
        let accidental = semitone - ((octave + 1) * 12 + letter.semitone_offset());
        Some(Self::new(
            letter,
            i32::try_from(accidental).ok()?,
            i32::try_from(octave).ok()?,
        ))
    }

    /// Spell the same sounding pitch with another letter, moving the octave
    /// number with the letter when the spelling crosses a C boundary.
    pub fn respell(&self, letter: Letter) -> Option<Self> {
        let semitone = self.semitone();
        let octave = (semitone - letter.semitone_offset() + 6).div_euclid(12) - 1;
        Self::spelled_at(letter, octave, semitone)
    }

    /// Other spellings of this pitch class written in the same octave,
    /// limited to `max_alter` accidentals.
    ///
    /// The octave number is kept as written, so for spellings that cross a
    /// C boundary ("B#3" vs "C4") the results sound an octave apart.
    pub fn enharmonics(&self, max_alter: u32) -> Vec<Pitch> {
        let pc = self.pitch_class() as i64;
        Letter::ALL
            .iter()
            .filter(|&&letter| letter != self.letter)
            .filter_map(|&letter| {
                let mut alter = (pc - letter.semitone_offset()).rem_euclid(12);
                if alter > 6 {
                    alter -= 12;
                }
                (alter.unsigned_abs() <= max_alter as u64)
                    .then(|| Pitch::new(letter, alter as i32, self.octave))
            })
            .collect()
    }

    /// Note name without octave ("C#", "Eb", "Fbb")
    pub fn name(&self) -> String {
        let marker = if self.accidental > 0 { "#" } else { "b" };
        format!(
            "{}{}",
            self.letter,
            marker.repeat(self.accidental.unsigned_abs() as usize)
        )
    }

    /// Note name with accidentals spelled out ("C", "F-sharp", "B-double-flat")
    pub fn spoken_name(&self) -> String {
        if self.accidental == 0 {
            return self.letter.to_string();
        }
        let direction = if self.accidental > 0 { "sharp" } else { "flat" };
        let word = match self.accidental.unsigned_abs() {
            1 => direction.to_string(),
            2 => format!("double-{}", direction),
            3 => format!("triple-{}", direction),
            4 => format!("quadruple-{}", direction),
            n => format!("{}-fold-{}", n, direction),
        };
        format!("{}-{}", self.letter, word)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.octave)
    }
}

impl FromStr for Pitch {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        Pitch::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> Pitch {
        Pitch::parse(text).unwrap()
    }

    #[test]
    fn test_parse_basic() {
        assert_eq!(p("C4"), Pitch::natural(Letter::C, 4));
        assert_eq!(p("c#4"), Pitch::new(Letter::C, 1, 4));
        assert_eq!(p("Eb"), Pitch::new(Letter::E, -1, 4));
        assert_eq!(p("B-3"), Pitch::new(Letter::B, -1, 3));
        assert_eq!(p("f##2"), Pitch::new(Letter::F, 2, 2));
        assert_eq!(p("  g  "), Pitch::natural(Letter::G, 4));
    }

    #[test]
    fn test_lowercase_b_is_letter_then_flat() {
        assert_eq!(p("b"), Pitch::natural(Letter::B, 4));
        assert_eq!(p("bb"), Pitch::new(Letter::B, -1, 4));
        assert_eq!(p("bbb5"), Pitch::new(Letter::B, -2, 5));
    }

    #[test]
    fn test_octave_is_relocated() {
        assert_eq!(p("c4#"), p("c#4"));
        assert_eq!(p("e3b"), Pitch::new(Letter::E, -1, 3));
        assert_eq!(p("a12"), Pitch::natural(Letter::A, 12));
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "   ", "H4", "c4m2", "C#b4", "Cx", "4", "C 4#", "#C"] {
            let err = Pitch::parse(bad).unwrap_err();
            assert!(
                matches!(err, AnalysisError::InvalidNoteFormat { .. }),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_error_names_token() {
        let err = Pitch::parse("c4m2").unwrap_err();
        assert!(err.to_string().contains("c4m2"));
    }

    #[test]
    fn test_pitch_class() {
        assert_eq!(p("C").pitch_class(), 0);
        assert_eq!(p("B#").pitch_class(), 0);
        assert_eq!(p("Cb").pitch_class(), 11);
        assert_eq!(p("A").pitch_class(), 9);
        assert_eq!(p("E####").pitch_class(), 8);
        assert!(p("C#2").same_pitch_class(&p("Db6")));
    }

    #[test]
    fn test_semitone_crosses_octave_with_letter() {
        assert_eq!(p("C4").semitone(), 60);
        assert_eq!(p("B#3").semitone(), 60);
        assert_eq!(p("Cb4").semitone(), 59);
        assert_eq!(p("A0").semitone(), 21);
        assert_eq!(p("C8").semitone(), 108);
    }

    #[test]
    fn test_respell() {
        assert_eq!(p("C4").respell(Letter::B), Some(p("B#3")));
        assert_eq!(p("B3").respell(Letter::C), Some(p("Cb4")));
        assert_eq!(p("F##4").respell(Letter::G), Some(p("G4")));
        assert_eq!(p("Db4").respell(Letter::C), Some(p("C#4")));
        assert_eq!(p("E4").respell(Letter::E), Some(p("E4")));
    }

    #[test]
    fn test_respell_rejects_overflowing_octave() {
        let top = Pitch::new(Letter::B, 1, i32::MAX);
        assert_eq!(top.respell(Letter::C), None);
    }

    #[test]
    fn test_enharmonics_same_octave() {
        let found = p("C#4").enharmonics(MAX_ENHARMONIC_ALTER);
        assert!(found.contains(&p("Db4")));
        assert!(found.contains(&p("B##4")));
        assert!(found.contains(&p("Ebbb4")));
        assert!(!found.contains(&p("C#4")));
        assert!(found.iter().all(|e| e.pitch_class() == 1 && e.octave() == 4));

        let single = p("D4").enharmonics(1);
        assert!(single.is_empty());
    }

    #[test]
    fn test_names() {
        assert_eq!(p("C#4").name(), "C#");
        assert_eq!(p("D-4").name(), "Db");
        assert_eq!(p("D-4").to_string(), "Db4");
        assert_eq!(p("C").spoken_name(), "C");
        assert_eq!(p("F#").spoken_name(), "F-sharp");
        assert_eq!(p("Bbb").spoken_name(), "B-double-flat");
        assert_eq!(p("E###").spoken_name(), "E-triple-sharp");
    }

    #[test]
    fn test_display_round_trip() {
        for token in ["c#4", "e-", "Bbb2", "g4##", "A0", "C8"] {
            let first = p(token);
            let again = p(&first.to_string());
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_letter_distances() {
        assert_eq!(Letter::B.steps_to(Letter::C), 1);
        assert_eq!(Letter::C.steps_to(Letter::B), 6);
        assert_eq!(Letter::C.circular_distance(Letter::B), 1);
        assert_eq!(Letter::A.circular_distance(Letter::E), 3);
        assert_eq!(Letter::from_index(-1), Letter::B);
    }
}
