// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Alternate spellings of a clicked key.
//!
//! A spelling is equivalent to another when both sound the same semitone.
//! Same-octave spellings come from the pitch model's enharmonic query; the
//! ones that cross a C boundary ("B#3" for "C4", "Cb4" for "B3") change the
//! octave number and come from respelling in the neighbouring octaves.

use crate::error::Result;
use crate::music::pitch::{Letter, Pitch, MAX_ENHARMONIC_ALTER};

/// Octave offsets searched for spellings that cross a C boundary
pub const OCTAVE_CROSSINGS: [i64; 2] = [-1, 1];

/// Every other spelling of the same semitone with at most
/// [`MAX_ENHARMONIC_ALTER`] accidentals, fewest accidentals first, sharps
/// before flats.
///
/// A pitch written with more than [`MAX_ENHARMONIC_ALTER`] accidentals has
/// no equivalents, so the relation stays symmetric.
pub fn equivalents(pitch: &Pitch) -> Vec<Pitch> {
    if pitch.accidental().unsigned_abs() > MAX_ENHARMONIC_ALTER {
        return Vec::new();
    }

    let semitone = pitch.semitone();
    let mut found: Vec<Pitch> = pitch
        .enharmonics(MAX_ENHARMONIC_ALTER)
        .into_iter()
        .filter(|e| e.semitone() == semitone)
        .collect();

    for shift in OCTAVE_CROSSINGS {
        let octave = pitch.octave() as i64 + shift;
        for &letter in &Letter::ALL {
            let Some(candidate) = Pitch::spelled_at(letter, octave, semitone) else {
                continue;
            };
            if candidate.accidental().unsigned_abs() <= MAX_ENHARMONIC_ALTER
                && candidate != *pitch
                && !found.contains(&candidate)
            {
                found.push(candidate);
            }
        }
    }

    found.sort_by_key(|p| {
        (
            p.accidental().unsigned_abs(),
            p.accidental() < 0,
            p.letter().index(),
            p.octave(),
        )
    });
    found
}

/// Equivalent spellings of a note token, formatted like "Db4"
pub fn equivalent_spellings(note: &str) -> Result<Vec<String>> {
    let pitch = Pitch::parse(note)?;
    Ok(equivalents(&pitch).iter().map(ToString::to_string).collect())
}
