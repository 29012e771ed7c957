// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory engine.
//!
//! Spelled pitches and intervals, enharmonic simplification, chord naming,
//! and chord-to-key analysis. Everything here is a pure computation on
//! immutable values.

pub mod chord;
pub mod enharmonic;
pub mod interval;
pub mod key;
pub mod pitch;
pub mod scale;

pub use chord::{chord_name, identify, Chord, ChordIdentity, ChordKind, ChordQuality};
pub use enharmonic::{simplify, try_simplify};
pub use interval::{Interval, IntervalQuality};
pub use key::{analyze_relationship, Key, Mode, Relationship, RomanNumeral};
pub use pitch::{Letter, Pitch, PitchClass};
pub use scale::{Scale, ScaleType};
