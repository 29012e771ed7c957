// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note entry editing: the comma-separated note line and keyboard clicks.

use crate::error::Result;
use crate::keyboard::{equivalents, KeyId, Keyboard};
use crate::music::enharmonic::simplify_pitch;
use crate::music::pitch::Pitch;

/// Canonical form of a note token: uppercase letter, `#`/`b` accidentals,
/// octave last ("c4#" becomes "C#4", "e-" becomes "Eb4")
pub fn normalize_note(token: &str) -> Result<String> {
    Ok(Pitch::parse(token)?.to_string())
}

/// Split a note entry line on commas, dropping blank tokens
pub fn split_entry(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Apply a keyboard click to a note entry.
///
/// Removes every token naming the clicked key, in any spelling. When
/// nothing was removed, the clicked note is appended instead. Tokens that
/// do not parse are left alone.
pub fn toggle_note<S: AsRef<str>>(tokens: &[S], clicked: &Pitch) -> Vec<String> {
    let mut targets: Vec<String> = equivalents(clicked).iter().map(ToString::to_string).collect();
    targets.push(clicked.to_string());

    let mut kept: Vec<String> = tokens
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| match normalize_note(t) {
            Ok(normal) => !targets.contains(&normal),
            Err(_) => true,
        })
        .map(String::from)
        .collect();

    if kept.len() == tokens.len() {
        kept.push(clicked.to_string());
    }
    kept
}

/// Keys to light up for a note entry, in entry order without repeats.
///
/// Spellings with two or more accidentals are simplified first; tokens that
/// do not parse or fall off the keyboard are skipped.
pub fn highlighted_keys<S: AsRef<str>>(tokens: &[S]) -> Vec<KeyId> {
    let keyboard = Keyboard::global();
    let mut keys = Vec::new();

    for token in tokens {
        let Ok(pitch) = Pitch::parse(token.as_ref()) else {
            continue;
        };
        let Ok(pitch) = simplify_pitch(&pitch) else {
            continue;
        };
        if let Some(key) = keyboard.key_for_pitch(&pitch) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_note() {
        assert_eq!(normalize_note("c4#").unwrap(), "C#4");
        assert_eq!(normalize_note("e-").unwrap(), "Eb4");
        assert_eq!(normalize_note(" bb2 ").unwrap(), "Bb2");
        assert!(normalize_note("q").is_err());
    }

    #[test]
    fn test_split_entry() {
        assert_eq!(split_entry("C4, e4 ,,G4 , "), ["C4", "e4", "G4"]);
        assert!(split_entry(" , ").is_empty());
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let c4 = Pitch::parse("C4").unwrap();
        let added = toggle_note(&["E4", "G4"], &c4);
        assert_eq!(added, ["E4", "G4", "C4"]);

        let removed = toggle_note(added.as_slice(), &c4);
        assert_eq!(removed, ["E4", "G4"]);
    }

    #[test]
    fn test_toggle_removes_any_spelling() {
        let c_sharp = Pitch::parse("C#4").unwrap();
        let result = toggle_note(&["db4", "E4", "c4#", "junk"], &c_sharp);
        assert_eq!(result, ["E4", "junk"]);

        let b_sharp = Pitch::parse("B#3").unwrap();
        let result = toggle_note(&["c", "E4"], &b_sharp);
        assert_eq!(result, ["E4"]);
    }

    #[test]
    fn test_highlighted_keys() {
        let keys = highlighted_keys(&["C4", "e4", "G4", "B#3", "F##4", "nope", "C9"]);
        assert_eq!(
            keys,
            [KeyId::white(24), KeyId::white(26), KeyId::white(28)]
        );
    }
}
