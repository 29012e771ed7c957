// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! 88-key keyboard layout.
//!
//! Keys run from A0 (MIDI 21) to C8 (MIDI 108): 52 white keys numbered
//! `White-1..=White-52` from the bottom, and 36 black keys each numbered
//! after the white key just below it (A#0 is `Black-1`, C#1 is `Black-3`).
//!
//! The table is built once per process and is read-only afterwards. Every
//! spelling with at most one accidental maps to its key, flats written both
//! as `b` and `-`.

pub mod equivalents;

pub use equivalents::{equivalent_spellings, equivalents, OCTAVE_CROSSINGS};

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;
use tracing::info;

use crate::music::pitch::{Letter, Pitch, PitchClass};

/// MIDI number of the lowest key (A0)
pub const LOWEST_KEY: u8 = 21;
/// MIDI number of the highest key (C8)
pub const HIGHEST_KEY: u8 = 108;

const BLACK_PITCH_CLASSES: [PitchClass; 5] = [1, 3, 6, 8, 10];

static KEYBOARD: OnceLock<Keyboard> = OnceLock::new();

/// Key colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    White,
    Black,
}

impl KeyKind {
    pub fn name(self) -> &'static str {
        match self {
            KeyKind::White => "White",
            KeyKind::Black => "Black",
        }
    }
}

/// Identifier of one physical key ("White-24", "Black-24")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct KeyId {
    pub kind: KeyKind,
    pub number: u8,
}

impl KeyId {
    pub fn white(number: u8) -> Self {
        Self {
            kind: KeyKind::White,
            number,
        }
    }

    pub fn black(number: u8) -> Self {
        Self {
            kind: KeyKind::Black,
            number,
        }
    }

    /// Parse "White-N" or "Black-N" (case-insensitive). The key need not
    /// exist on the keyboard.
    pub fn from_str(s: &str) -> Option<Self> {
        let (kind, number) = s.trim().split_once('-')?;
        let number: u8 = number.trim().parse().ok()?;
        match kind.trim().to_lowercase().as_str() {
            "white" => Some(Self::white(number)),
            "black" => Some(Self::black(number)),
            _ => None,
        }
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.name(), self.number)
    }
}

/// One physical key and the spellings bound to it
#[derive(Debug, Clone)]
struct KeyEntry {
    id: KeyId,
    primary: Pitch,
    secondary: Option<Pitch>,
}

/// Bidirectional table between note spellings and keys
#[derive(Debug)]
pub struct Keyboard {
    keys: Vec<KeyEntry>,
    by_id: HashMap<KeyId, usize>,
    forward: HashMap<String, KeyId>,
}

impl Keyboard {
    /// The process-wide table, built on first use
    pub fn global() -> &'static Keyboard {
        KEYBOARD.get_or_init(Keyboard::build)
    }

    fn build() -> Self {
        let mut keys = Vec::with_capacity((HIGHEST_KEY - LOWEST_KEY + 1) as usize);
        let mut by_id = HashMap::new();
        let mut forward = HashMap::new();
        let mut white_count = 0u8;

        for midi in LOWEST_KEY..=HIGHEST_KEY {
            let primary = primary_spelling(midi);
            let id = if BLACK_PITCH_CLASSES.contains(&primary.pitch_class()) {
                KeyId::black(white_count)
            } else {
                white_count += 1;
                KeyId::white(white_count)
            };

            let spellings: Vec<Pitch> = Letter::ALL
                .iter()
                .filter_map(|&letter| primary.respell(letter))
                .filter(|p| p.accidental().unsigned_abs() <= 1)
                .collect();

            for spelling in &spellings {
                forward.insert(spelling.to_string(), id);
                if spelling.accidental() < 0 {
                    forward.insert(format!("{}-{}", spelling.letter(), spelling.octave()), id);
                }
            }

            let secondary = spellings.iter().copied().find(|p| *p != primary);
            by_id.insert(id, keys.len());
            keys.push(KeyEntry {
                id,
                primary,
                secondary,
            });
        }

        info!(
            keys = keys.len(),
            spellings = forward.len(),
            "keyboard table built"
        );

        Self {
            keys,
            by_id,
            forward,
        }
    }

    /// Number of physical keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys, lowest first
    pub fn keys(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.keys.iter().map(|k| k.id)
    }

    /// Key for an exact spelling such as "C#4", "Db4" or "D-4"
    pub fn forward(&self, spelling: &str) -> Option<KeyId> {
        self.forward.get(spelling).copied()
    }

    /// Key sounding `pitch`, when it is spelled with at most one accidental
    pub fn key_for_pitch(&self, pitch: &Pitch) -> Option<KeyId> {
        self.forward(&pitch.to_string())
    }

    /// Spelling bound to a key. With `secondary`, the other enharmonic name
    /// of the key is returned instead, falling back to the primary one for
    /// keys that have no other name.
    pub fn reverse(&self, id: KeyId, secondary: bool) -> Option<Pitch> {
        let entry = &self.keys[*self.by_id.get(&id)?];
        if secondary {
            Some(entry.secondary.unwrap_or(entry.primary))
        } else {
            Some(entry.primary)
        }
    }

    /// Every spelling bound to a key, as stored in the forward table
    pub fn spellings(&self, id: KeyId) -> Vec<String> {
        let mut found: Vec<String> = self
            .forward
            .iter()
            .filter(|(_, key)| **key == id)
            .map(|(spelling, _)| spelling.clone())
            .collect();
        found.sort();
        found
    }
}

/// Natural or sharp spelling of a MIDI note
fn primary_spelling(midi: u8) -> Pitch {
    let (letter, accidental) = match midi % 12 {
        0 => (Letter::C, 0),
        1 => (Letter::C, 1),
        2 => (Letter::D, 0),
        3 => (Letter::D, 1),
        4 => (Letter::E, 0),
        5 => (Letter::F, 0),
        6 => (Letter::F, 1),
        7 => (Letter::G, 0),
        8 => (Letter::G, 1),
        9 => (Letter::A, 0),
        10 => (Letter::A, 1),
        _ => (Letter::B, 0),
    };
    Pitch::new(letter, accidental, midi as i32 / 12 - 1)
}

/// Key for an exact spelling in the global table
pub fn key_for(spelling: &str) -> Option<KeyId> {
    Keyboard::global().forward(spelling)
}
