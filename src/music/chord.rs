// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord identification.
//!
//! A [`Chord`] is a deduplicated, low-to-high set of spelled pitches. Naming
//! runs through fixed phases:
//!
//! 1. one pitch class names the pitch itself;
//! 2. an exact match against the template table names a tertian chord;
//! 3. two pitch classes name the interval between them;
//! 4. a full scale collection is named as a scale (and refused by
//!    [`Chord::identify`]);
//! 5. a template missing only its fifth is named as incomplete;
//! 6. anything else is described as a cluster of its notes.
//!
//! When several roots match, the template rank decides first and the root
//! nearest the bass second.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{AnalysisError, Result, MAX_CHORD_NOTES};

use super::enharmonic;
use super::interval::{semitone_name, Interval};
use super::pitch::{Pitch, PitchClass};
use super::scale::ScaleType;

/// Chord qualities recognised by the template table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    // Triads
    MajorTriad,
    MinorTriad,
    DiminishedTriad,
    AugmentedTriad,
    // Sevenths
    DominantSeventh,
    MajorSeventh,
    MinorSeventh,
    MinorMajorSeventh,
    HalfDiminishedSeventh,
    DiminishedSeventh,
    AugmentedMajorSeventh,
    AugmentedSeventh,
    // Sixths and added tones
    MajorSixth,
    MinorSixth,
    AddedNinth,
    SixNine,
    // Suspensions
    SuspendedFourth,
    SuspendedSecond,
    SeventhSuspendedFourth,
    // Extensions
    DominantNinth,
    MajorNinth,
    MinorNinth,
    DominantMinorNinth,
    DominantEleventh,
    MinorEleventh,
}

impl ChordQuality {
    /// Name used after the root ("major triad", "half-diminished seventh chord")
    pub fn name(self) -> &'static str {
        match self {
            ChordQuality::MajorTriad => "major triad",
            ChordQuality::MinorTriad => "minor triad",
            ChordQuality::DiminishedTriad => "diminished triad",
            ChordQuality::AugmentedTriad => "augmented triad",
            ChordQuality::DominantSeventh => "dominant seventh chord",
            ChordQuality::MajorSeventh => "major seventh chord",
            ChordQuality::MinorSeventh => "minor seventh chord",
            ChordQuality::MinorMajorSeventh => "minor-major seventh chord",
            ChordQuality::HalfDiminishedSeventh => "half-diminished seventh chord",
            ChordQuality::DiminishedSeventh => "diminished seventh chord",
            ChordQuality::AugmentedMajorSeventh => "augmented major seventh chord",
            ChordQuality::AugmentedSeventh => "augmented seventh chord",
            ChordQuality::MajorSixth => "major sixth chord",
            ChordQuality::MinorSixth => "minor sixth chord",
            ChordQuality::AddedNinth => "added-ninth chord",
            ChordQuality::SixNine => "six-nine chord",
            ChordQuality::SuspendedFourth => "suspended-fourth chord",
            ChordQuality::SuspendedSecond => "suspended-second chord",
            ChordQuality::SeventhSuspendedFourth => "dominant seventh suspended-fourth chord",
            ChordQuality::DominantNinth => "dominant ninth chord",
            ChordQuality::MajorNinth => "major ninth chord",
            ChordQuality::MinorNinth => "minor ninth chord",
            ChordQuality::DominantMinorNinth => "dominant minor ninth chord",
            ChordQuality::DominantEleventh => "dominant eleventh chord",
            ChordQuality::MinorEleventh => "minor eleventh chord",
        }
    }

    pub fn is_triad(self) -> bool {
        matches!(
            self,
            ChordQuality::MajorTriad
                | ChordQuality::MinorTriad
                | ChordQuality::DiminishedTriad
                | ChordQuality::AugmentedTriad
        )
    }

    pub fn is_seventh(self) -> bool {
        matches!(
            self,
            ChordQuality::DominantSeventh
                | ChordQuality::MajorSeventh
                | ChordQuality::MinorSeventh
                | ChordQuality::MinorMajorSeventh
                | ChordQuality::HalfDiminishedSeventh
                | ChordQuality::DiminishedSeventh
                | ChordQuality::AugmentedMajorSeventh
                | ChordQuality::AugmentedSeventh
        )
    }

    pub fn is_suspended(self) -> bool {
        matches!(
            self,
            ChordQuality::SuspendedFourth
                | ChordQuality::SuspendedSecond
                | ChordQuality::SeventhSuspendedFourth
        )
    }

    /// Qualities whose third is minor
    pub fn is_minor(self) -> bool {
        matches!(
            self,
            ChordQuality::MinorTriad
                | ChordQuality::DiminishedTriad
                | ChordQuality::MinorSeventh
                | ChordQuality::MinorMajorSeventh
                | ChordQuality::HalfDiminishedSeventh
                | ChordQuality::DiminishedSeventh
                | ChordQuality::MinorSixth
                | ChordQuality::MinorNinth
                | ChordQuality::MinorEleventh
        )
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A chord template: quality, interval set from the root as a bitmask over
/// the 12 pitch classes, and a rank (lower wins when roots compete)
pub struct ChordTemplate {
    pub quality: ChordQuality,
    pub mask: u16,
    pub size: usize,
    pub rank: u8,
}

impl ChordTemplate {
    const fn new(quality: ChordQuality, rank: u8, intervals: &[u8]) -> Self {
        let mut mask = 0u16;
        let mut i = 0;
        while i < intervals.len() {
            mask |= 1 << intervals[i];
            i += 1;
        }
        Self {
            quality,
            mask,
            size: intervals.len(),
            rank,
        }
    }

    /// Template mask with the perfect fifth removed, if it has one
    fn without_fifth(&self) -> Option<u16> {
        (self.mask & FIFTH != 0).then_some(self.mask & !FIFTH)
    }
}

const FIFTH: u16 = 1 << 7;

/// All recognised chord templates
pub static TEMPLATES: &[ChordTemplate] = &[
    ChordTemplate::new(ChordQuality::MajorTriad, 0, &[0, 4, 7]),
    ChordTemplate::new(ChordQuality::MinorTriad, 0, &[0, 3, 7]),
    ChordTemplate::new(ChordQuality::DiminishedTriad, 0, &[0, 3, 6]),
    ChordTemplate::new(ChordQuality::AugmentedTriad, 0, &[0, 4, 8]),
    ChordTemplate::new(ChordQuality::DominantSeventh, 1, &[0, 4, 7, 10]),
    ChordTemplate::new(ChordQuality::MajorSeventh, 1, &[0, 4, 7, 11]),
    ChordTemplate::new(ChordQuality::MinorSeventh, 1, &[0, 3, 7, 10]),
    ChordTemplate::new(ChordQuality::MinorMajorSeventh, 1, &[0, 3, 7, 11]),
    ChordTemplate::new(ChordQuality::HalfDiminishedSeventh, 1, &[0, 3, 6, 10]),
    ChordTemplate::new(ChordQuality::DiminishedSeventh, 1, &[0, 3, 6, 9]),
    ChordTemplate::new(ChordQuality::AugmentedMajorSeventh, 1, &[0, 4, 8, 11]),
    ChordTemplate::new(ChordQuality::AugmentedSeventh, 1, &[0, 4, 8, 10]),
    // A minor seventh reads before the major sixth on its third
    ChordTemplate::new(ChordQuality::MajorSixth, 2, &[0, 4, 7, 9]),
    ChordTemplate::new(ChordQuality::MinorSixth, 2, &[0, 3, 7, 9]),
    ChordTemplate::new(ChordQuality::AddedNinth, 3, &[0, 2, 4, 7]),
    ChordTemplate::new(ChordQuality::SixNine, 3, &[0, 2, 4, 7, 9]),
    ChordTemplate::new(ChordQuality::SuspendedFourth, 4, &[0, 5, 7]),
    ChordTemplate::new(ChordQuality::SuspendedSecond, 4, &[0, 2, 7]),
    ChordTemplate::new(ChordQuality::SeventhSuspendedFourth, 4, &[0, 5, 7, 10]),
    ChordTemplate::new(ChordQuality::DominantNinth, 5, &[0, 2, 4, 7, 10]),
    ChordTemplate::new(ChordQuality::MajorNinth, 5, &[0, 2, 4, 7, 11]),
    ChordTemplate::new(ChordQuality::MinorNinth, 5, &[0, 2, 3, 7, 10]),
    ChordTemplate::new(ChordQuality::DominantMinorNinth, 5, &[0, 1, 4, 7, 10]),
    ChordTemplate::new(ChordQuality::DominantEleventh, 6, &[0, 2, 4, 5, 7, 10]),
    ChordTemplate::new(ChordQuality::MinorEleventh, 6, &[0, 2, 3, 5, 7, 10]),
];

/// What kind of sonority a chord turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordKind {
    /// One pitch class
    Single,
    /// Two pitch classes, `semitones` apart going up from the root
    Dyad { semitones: u8 },
    /// A template match; `complete` is false when the fifth is missing
    Tertian { quality: ChordQuality, complete: bool },
    /// A full scale collection
    Scale(ScaleType),
    /// Nothing recognisable
    Cluster,
}

/// Result of naming a chord
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordIdentity {
    pub root: Pitch,
    pub kind: ChordKind,
    /// 0 = root position, 1 = third in the bass, 2 = fifth, 3 = seventh,
    /// 4 = ninth, 5 = eleventh
    pub inversion: u8,
    pub name: String,
    /// The spelled pitches that were named, low to high
    pub pitches: Vec<Pitch>,
}

impl ChordIdentity {
    /// Pitch classes of the named chord as a bitmask
    pub fn pitch_class_mask(&self) -> u16 {
        pitch_class_mask(&self.pitches)
    }

    pub fn quality(&self) -> Option<ChordQuality> {
        match self.kind {
            ChordKind::Tertian { quality, .. } => Some(quality),
            _ => None,
        }
    }

    /// Whether the chord has a minor third above its root
    pub fn has_minor_third(&self) -> bool {
        match self.quality() {
            Some(quality) => quality.is_minor(),
            None => {
                let relative = relative_mask(self.pitch_class_mask(), self.root.pitch_class());
                relative & (1 << 3) != 0
            }
        }
    }
}

impl fmt::Display for ChordIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn pitch_class_mask(pitches: &[Pitch]) -> u16 {
    pitches
        .iter()
        .fold(0u16, |mask, p| mask | (1 << p.pitch_class()))
}

/// Rotate a pitch-class mask so `root` lands on bit 0
fn relative_mask(mask: u16, root: PitchClass) -> u16 {
    let root = root as u32 % 12;
    let wide = mask as u32;
    let rotated = (wide >> root) | (wide << (12 - root));
    (rotated & 0x0FFF) as u16
}

/// Inversion rank of a bass note `semitones` above the root
fn inversion_of(semitones: u8, suspended: bool) -> u8 {
    match semitones % 12 {
        0 => 0,
        2 | 5 if suspended => 1,
        3 | 4 => 1,
        6..=8 => 2,
        9..=11 => 3,
        1 | 2 => 4,
        _ => 5,
    }
}

/// A deduplicated set of spelled pitches, low to high
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    pitches: Vec<Pitch>,
}

impl Chord {
    /// Build a chord, dropping repeated spellings.
    ///
    /// Fails on empty input and on more than [`MAX_CHORD_NOTES`] distinct
    /// spellings.
    pub fn new(pitches: &[Pitch]) -> Result<Self> {
        let mut unique: Vec<Pitch> = Vec::with_capacity(pitches.len());
        for pitch in pitches {
            if !unique.contains(pitch) {
                unique.push(*pitch);
            }
        }

        if unique.is_empty() {
            return Err(AnalysisError::NoValidNotes);
        }
        if unique.len() > MAX_CHORD_NOTES {
            return Err(AnalysisError::TooManyNotes {
                count: unique.len(),
                max: MAX_CHORD_NOTES,
            });
        }

        unique.sort_by_key(|p| (p.semitone(), p.letter().index()));
        Ok(Self { pitches: unique })
    }

    /// Parse note tokens and build a chord. The first bad token aborts.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let pitches = tokens
            .iter()
            .map(|t| Pitch::parse(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(&pitches)
    }

    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Lowest sounding pitch
    pub fn bass(&self) -> Pitch {
        self.pitches[0]
    }

    pub fn pitch_class_mask(&self) -> u16 {
        pitch_class_mask(&self.pitches)
    }

    /// Same chord with enharmonics simplified
    pub fn simplified(&self) -> Result<Self> {
        Self::new(&enharmonic::simplify(&self.pitches))
    }

    /// One spelling per pitch class (the lowest sounding one), low to high.
    /// These are the candidate roots, in preference order.
    fn root_candidates(&self) -> Vec<Pitch> {
        let mut seen = 0u16;
        self.pitches
            .iter()
            .filter(|p| {
                let bit = 1 << p.pitch_class();
                let fresh = seen & bit == 0;
                seen |= bit;
                fresh
            })
            .copied()
            .collect()
    }

    /// Name the chord. Scale collections are refused.
    pub fn identify(&self) -> Result<ChordIdentity> {
        let identity = self.identify_chord();
        if identity.name.to_lowercase().contains("scale") {
            debug!(name = %identity.name, "note set is a scale");
            return Err(AnalysisError::ScalesUnsupported);
        }
        Ok(identity)
    }

    /// Name the chord, reporting scale collections as such
    pub fn identify_chord(&self) -> ChordIdentity {
        let candidates = self.root_candidates();
        let mask = self.pitch_class_mask();

        if candidates.len() == 1 {
            return self.identity(candidates[0], ChordKind::Single, candidates[0].spoken_name());
        }

        if let Some((root, template)) = self.best_match(&candidates, mask, |t| Some(t.mask)) {
            debug!(root = %root, quality = %template.quality, "matched chord template");
            let name = format!("{} {}", root.spoken_name(), template.quality.name());
            return self.identity(
                root,
                ChordKind::Tertian {
                    quality: template.quality,
                    complete: true,
                },
                name,
            );
        }

        if candidates.len() == 2 {
            let (lower, upper) = (candidates[0], candidates[1]);
            let semitones = (upper.pitch_class() as i64 - lower.pitch_class() as i64)
                .rem_euclid(12) as u8;
            let interval = Interval::ascending(&lower, &upper)
                .map(|i| i.nice_name())
                .unwrap_or_else(|_| semitone_name(semitones).to_string());
            let name = format!("{} above {}", interval.to_lowercase(), lower.spoken_name());
            return self.identity(lower, ChordKind::Dyad { semitones }, name);
        }

        if let Some((root, scale_type)) = scale_collection(&candidates, mask) {
            let name = format!("{} {} scale", root.spoken_name(), scale_type.name());
            return self.identity(root, ChordKind::Scale(scale_type), name);
        }

        if let Some((root, template)) = self.best_match(&candidates, mask, |t| {
            if t.size > 3 {
                t.without_fifth()
            } else {
                None
            }
        }) {
            debug!(root = %root, quality = %template.quality, "matched incomplete chord template");
            let name = format!("{} incomplete {}", root.spoken_name(), template.quality.name());
            return self.identity(
                root,
                ChordKind::Tertian {
                    quality: template.quality,
                    complete: false,
                },
                name,
            );
        }

        let notes: Vec<String> = candidates.iter().map(|p| p.spoken_name()).collect();
        let name = format!("{} cluster", notes.join(", "));
        self.identity(candidates[0], ChordKind::Cluster, name)
    }

    /// Best (root, template) whose pattern, as produced by `pattern`, equals
    /// the chord's pitch classes relative to that root
    fn best_match<F>(
        &self,
        candidates: &[Pitch],
        mask: u16,
        pattern: F,
    ) -> Option<(Pitch, &'static ChordTemplate)>
    where
        F: Fn(&ChordTemplate) -> Option<u16>,
    {
        let mut best: Option<(u8, usize, Pitch, &'static ChordTemplate)> = None;

        for (order, root) in candidates.iter().enumerate() {
            let relative = relative_mask(mask, root.pitch_class());
            for template in TEMPLATES {
                if pattern(template) != Some(relative) {
                    continue;
                }
                let better = match best {
                    Some((rank, best_order, _, _)) => (template.rank, order) < (rank, best_order),
                    None => true,
                };
                if better {
                    best = Some((template.rank, order, *root, template));
                }
            }
        }

        best.map(|(_, _, root, template)| (root, template))
    }

    fn identity(&self, root: Pitch, kind: ChordKind, name: String) -> ChordIdentity {
        let bass = self.bass();
        let semitones = (bass.pitch_class() as i64 - root.pitch_class() as i64).rem_euclid(12) as u8;
        let suspended = matches!(kind, ChordKind::Tertian { quality, .. } if quality.is_suspended());
        let inversion = match kind {
            ChordKind::Tertian { .. } | ChordKind::Dyad { .. } => inversion_of(semitones, suspended),
            _ => 0,
        };

        ChordIdentity {
            root,
            kind,
            inversion,
            name,
            pitches: self.pitches.clone(),
        }
    }
}

/// Detect a full scale collection, trying collections then roots in order
fn scale_collection(candidates: &[Pitch], mask: u16) -> Option<(Pitch, ScaleType)> {
    if candidates.len() < 6 {
        return None;
    }
    ScaleType::COLLECTIONS.iter().find_map(|&scale_type| {
        candidates
            .iter()
            .find(|root| relative_mask(mask, root.pitch_class()) == scale_type.mask())
            .map(|root| (*root, scale_type))
    })
}

/// Identify the chord formed by `pitches`, simplifying spellings first when
/// asked to.
pub fn identify(pitches: &[Pitch], simplify: bool) -> Result<ChordIdentity> {
    let chord = Chord::new(pitches)?;
    let chord = if simplify { chord.simplified()? } else { chord };
    chord.identify()
}

/// Chord name for `pitches`
pub fn chord_name(pitches: &[Pitch], simplify: bool) -> Result<String> {
    identify(pitches, simplify).map(|identity| identity.name)
}
