// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Spelled intervals within an octave.

use std::fmt;

use crate::error::{AnalysisError, Result};

use super::pitch::Pitch;

/// Semitone size of each generic interval in the major scale (unison..seventh)
pub const MAJOR_SCALE_STEPS: [i64; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Interval qualities, from narrowest to widest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalQuality {
    DoublyDiminished,
    Diminished,
    Minor,
    Perfect,
    Major,
    Augmented,
    DoublyAugmented,
}

impl IntervalQuality {
    pub fn name(self) -> &'static str {
        match self {
            IntervalQuality::DoublyDiminished => "Doubly-Diminished",
            IntervalQuality::Diminished => "Diminished",
            IntervalQuality::Minor => "Minor",
            IntervalQuality::Perfect => "Perfect",
            IntervalQuality::Major => "Major",
            IntervalQuality::Augmented => "Augmented",
            IntervalQuality::DoublyAugmented => "Doubly-Augmented",
        }
    }
}

/// An ascending interval reduced to one octave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Generic size, 1 (unison) to 7 (seventh)
    generic: u8,
    quality: IntervalQuality,
    /// Size in semitones (0-11)
    semitones: u8,
}

impl Interval {
    /// Interval from `lower` up to `upper`, comparing names only.
    ///
    /// The generic size comes from the letter distance and the quality from
    /// the semitone difference against the major-scale size of that step.
    /// Fails when the spelling needs more than a doubly augmented or
    /// diminished quality.
    pub fn ascending(lower: &Pitch, upper: &Pitch) -> Result<Self> {
        let steps = lower.letter().steps_to(upper.letter());
        let semitones = (upper.pitch_class() as i64 - lower.pitch_class() as i64).rem_euclid(12);

        let mut delta = semitones - MAJOR_SCALE_STEPS[steps];
        if delta > 6 {
            delta -= 12;
        } else if delta < -6 {
            delta += 12;
        }

        let perfect_class = matches!(steps, 0 | 3 | 4);
        let quality = match (perfect_class, delta) {
            (true, -2) => Some(IntervalQuality::DoublyDiminished),
            (true, -1) => Some(IntervalQuality::Diminished),
            (true, 0) => Some(IntervalQuality::Perfect),
            (true, 1) => Some(IntervalQuality::Augmented),
            (true, 2) => Some(IntervalQuality::DoublyAugmented),
            (false, -3) => Some(IntervalQuality::DoublyDiminished),
            (false, -2) => Some(IntervalQuality::Diminished),
            (false, -1) => Some(IntervalQuality::Minor),
            (false, 0) => Some(IntervalQuality::Major),
            (false, 1) => Some(IntervalQuality::Augmented),
            (false, 2) => Some(IntervalQuality::DoublyAugmented),
            _ => None,
        };

        let quality = quality.ok_or_else(|| {
            AnalysisError::RomanNumeralError(format!(
                "cannot name the interval from {} to {}",
                lower.name(),
                upper.name()
            ))
        })?;

        Ok(Self {
            generic: steps as u8 + 1,
            quality,
            semitones: semitones as u8,
        })
    }

    /// Generic size, 1-7
    pub fn generic(&self) -> u8 {
        self.generic
    }

    pub fn quality(&self) -> IntervalQuality {
        self.quality
    }

    pub fn semitones(&self) -> u8 {
        self.semitones
    }

    /// Name such as "Perfect Fifth" or "Minor Third"
    pub fn nice_name(&self) -> String {
        format!("{} {}", self.quality.name(), generic_name(self.generic))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nice_name())
    }
}

fn generic_name(generic: u8) -> &'static str {
    match generic {
        1 => "Unison",
        2 => "Second",
        3 => "Third",
        4 => "Fourth",
        5 => "Fifth",
        6 => "Sixth",
        _ => "Seventh",
    }
}

/// Interval name by semitone count, used when a spelling cannot be named
pub fn semitone_name(semitones: u8) -> &'static str {
    match semitones % 12 {
        0 => "Perfect Unison",
        1 => "Minor Second",
        2 => "Major Second",
        3 => "Minor Third",
        4 => "Major Third",
        5 => "Perfect Fourth",
        6 => "Tritone",
        7 => "Perfect Fifth",
        8 => "Minor Sixth",
        9 => "Major Sixth",
        10 => "Minor Seventh",
        _ => "Major Seventh",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(lower: &str, upper: &str) -> Result<Interval> {
        Interval::ascending(&Pitch::parse(lower).unwrap(), &Pitch::parse(upper).unwrap())
    }

    #[test]
    fn test_common_intervals() {
        assert_eq!(interval("C", "G").unwrap().nice_name(), "Perfect Fifth");
        assert_eq!(interval("C", "E").unwrap().nice_name(), "Major Third");
        assert_eq!(interval("C", "Eb").unwrap().nice_name(), "Minor Third");
        assert_eq!(interval("G", "C").unwrap().nice_name(), "Perfect Fourth");
        assert_eq!(interval("C", "F#").unwrap().nice_name(), "Augmented Fourth");
        assert_eq!(interval("C", "Gb").unwrap().nice_name(), "Diminished Fifth");
        assert_eq!(interval("C", "C").unwrap().nice_name(), "Perfect Unison");
        assert_eq!(interval("B", "A").unwrap().nice_name(), "Minor Seventh");
    }

    #[test]
    fn test_octave_is_ignored() {
        assert_eq!(interval("C2", "G6").unwrap(), interval("C5", "G1").unwrap());
    }

    #[test]
    fn test_wrapping_unison() {
        let dim = interval("C", "Cb").unwrap();
        assert_eq!(dim.quality(), IntervalQuality::Diminished);
        assert_eq!(dim.generic(), 1);
        assert_eq!(dim.semitones(), 11);
    }

    #[test]
    fn test_doubly_altered() {
        assert_eq!(interval("C", "Ebb").unwrap().nice_name(), "Diminished Third");
        assert_eq!(interval("C", "Ebbb").unwrap().nice_name(), "Doubly-Diminished Third");
        assert_eq!(interval("C", "G##").unwrap().nice_name(), "Doubly-Augmented Fifth");
    }

    #[test]
    fn test_unnameable_interval() {
        let err = interval("C", "G###").unwrap_err();
        assert!(matches!(err, AnalysisError::RomanNumeralError(_)));
    }

    #[test]
    fn test_semitone_names() {
        assert_eq!(semitone_name(7), "Perfect Fifth");
        assert_eq!(semitone_name(6), "Tritone");
        assert_eq!(semitone_name(13), "Minor Second");
    }
}
