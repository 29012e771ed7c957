// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Enharmonic simplification.
//!
//! Respells pitches so a chord reads with as few accidentals as possible
//! while every pitch keeps its sounding semitone. Works in two stages:
//!
//! 1. Per pitch: anything with two or more accidentals is respelled with
//!    the fewest accidentals, naturals first, then the letter nearest the
//!    original around the letter circle.
//! 2. Jointly: every pitch may swap to one other spelling with at most one
//!    accidental. The combination with the smallest accidental total wins;
//!    ties go to the one mixing fewer sharp/flat directions, then to the
//!    one that keeps the earliest pitches as they were.
//!
//! The joint stage is skipped above [`MAX_JOINT_SEARCH`] pitches. Each pitch
//! has at most two candidate spellings, so the search visits at most
//! 2^16 combinations.

use thiserror::Error;
use tracing::{debug, trace, warn};

use super::pitch::{Letter, Pitch};

/// Largest input the joint spelling search accepts
pub const MAX_JOINT_SEARCH: usize = 16;

/// Internal simplifier failure; callers of [`simplify`] never see it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimplifyError {
    #[error("no spelling of {0} fits the pitch range")]
    OutOfRange(String),
}

/// Respell one pitch carrying two or more accidentals.
///
/// Pitches with at most one accidental are returned unchanged.
pub fn simplify_pitch(pitch: &Pitch) -> Result<Pitch, SimplifyError> {
    if pitch.accidental().unsigned_abs() <= 1 {
        return Ok(*pitch);
    }

    let original_direction = pitch.accidental().signum();
    Letter::ALL
        .iter()
        .filter_map(|&letter| pitch.respell(letter))
        .filter(|candidate| candidate.accidental().unsigned_abs() <= 1)
        .min_by_key(|candidate| {
            (
                candidate.accidental().unsigned_abs(),
                pitch.letter().circular_distance(candidate.letter()),
                candidate.accidental().signum() != original_direction,
                candidate.letter().index(),
            )
        })
        .ok_or_else(|| SimplifyError::OutOfRange(pitch.to_string()))
}

/// Spellings of `pitch` with at most one accidental, `pitch` itself first
fn spelling_options(pitch: &Pitch) -> Vec<Pitch> {
    let mut options = vec![*pitch];
    options.extend(
        Letter::ALL
            .iter()
            .filter(|&&letter| letter != pitch.letter())
            .filter_map(|&letter| pitch.respell(letter))
            .filter(|candidate| candidate.accidental().unsigned_abs() <= 1),
    );
    options
}

/// Ranking of one joint spelling; smaller is better
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct SpellingScore {
    accidentals: u64,
    directions: u8,
    /// Bit `n-1-i` is set when pitch `i` was respelled
    changed: u32,
}

fn score(options: &[Vec<Pitch>], choice: &[usize]) -> SpellingScore {
    let n = choice.len();
    let mut accidentals = 0u64;
    let mut sharps = false;
    let mut flats = false;
    let mut changed = 0u32;

    for (i, (&pick, opts)) in choice.iter().zip(options).enumerate() {
        let acc = opts[pick].accidental();
        accidentals += acc.unsigned_abs() as u64;
        sharps |= acc > 0;
        flats |= acc < 0;
        if pick != 0 {
            changed |= 1 << (n - 1 - i);
        }
    }

    SpellingScore {
        accidentals,
        directions: sharps as u8 + flats as u8,
        changed,
    }
}

/// Exhaustive search over the spelling options of every pitch
fn joint_search(options: &[Vec<Pitch>]) -> Vec<usize> {
    let mut choice = vec![0usize; options.len()];
    let mut best = choice.clone();
    let mut best_score = score(options, &choice);

    loop {
        // Advance the odometer
        let mut i = 0;
        while i < choice.len() {
            choice[i] += 1;
            if choice[i] < options[i].len() {
                break;
            }
            choice[i] = 0;
            i += 1;
        }
        if i == choice.len() {
            break;
        }

        let candidate = score(options, &choice);
        if candidate < best_score {
            best_score = candidate;
            best.copy_from_slice(&choice);
        }
    }

    trace!(?best_score, "joint spelling search finished");
    best
}

/// Simplify a list of pitches, reporting internal failures.
///
/// Order is preserved and every output pitch sounds the same semitone as
/// the input at the same position.
pub fn try_simplify(pitches: &[Pitch]) -> Result<Vec<Pitch>, SimplifyError> {
    let per_pitch = pitches
        .iter()
        .map(simplify_pitch)
        .collect::<Result<Vec<_>, _>>()?;

    if per_pitch.len() > MAX_JOINT_SEARCH {
        debug!(
            count = per_pitch.len(),
            "too many pitches for the joint spelling search, keeping per-pitch spelling"
        );
        return Ok(per_pitch);
    }

    let options: Vec<Vec<Pitch>> = per_pitch.iter().map(spelling_options).collect();
    let best = joint_search(&options);

    Ok(best
        .iter()
        .zip(&options)
        .map(|(&pick, opts)| opts[pick])
        .collect())
}

/// Simplify a list of pitches. Never fails: if the simplifier cannot
/// respell the input, the input comes back unchanged.
pub fn simplify(pitches: &[Pitch]) -> Vec<Pitch> {
    match try_simplify(pitches) {
        Ok(simplified) => simplified,
        Err(e) => {
            warn!(error = %e, "enharmonic simplification failed, keeping original spelling");
            pitches.to_vec()
        }
    }
}
