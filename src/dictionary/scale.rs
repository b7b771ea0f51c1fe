// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale dictionary and spelled scales.
//!
//! Provides the built-in scale table, name/alias lookup, scale modes and
//! the extended/reduced relationships between scales.

use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;
use tracing::debug;

use super::{serialize_tonic, spell_notes, CustomDefinition, DictEntry, IntervalDictionary};
use crate::error::TheoryError;
use crate::interval::Interval;
use crate::note::{self, Note};
use crate::pcset::PitchClassSet;

/// Built-in scales: (intervals, name, aliases)
const SCALES: &[(&str, &str, &[&str])] = &[
    // Major scale and modes
    ("1P 2M 3M 4P 5P 6M 7M", "major", &["ionian"]),
    ("1P 2M 3m 4P 5P 6M 7m", "dorian", &[]),
    ("1P 2m 3m 4P 5P 6m 7m", "phrygian", &[]),
    ("1P 2M 3M 4A 5P 6M 7M", "lydian", &[]),
    ("1P 2M 3M 4P 5P 6M 7m", "mixolydian", &["dominant"]),
    ("1P 2M 3m 4P 5P 6m 7m", "aeolian", &["minor", "natural minor"]),
    ("1P 2m 3m 4P 5d 6m 7m", "locrian", &[]),
    // Other minor scales and their modes
    ("1P 2M 3m 4P 5P 6m 7M", "harmonic minor", &[]),
    ("1P 2M 3m 4P 5P 6M 7M", "melodic minor", &[]),
    ("1P 2m 3M 4P 5P 6m 7m", "phrygian dominant", &["spanish", "phrygian major"]),
    ("1P 2M 3M 4A 5P 6M 7m", "lydian dominant", &["lydian b7"]),
    ("1P 2m 3m 3M 5d 6m 7m", "altered", &["super locrian", "diminished whole tone"]),
    ("1P 2M 3M 4P 5P 6m 7m", "mixolydian b6", &["hindu", "melodic minor fifth mode"]),
    ("1P 2M 3M 4P 5P 6m 7M", "harmonic major", &[]),
    ("1P 2m 3M 4P 5P 6m 7M", "double harmonic major", &["gypsy", "byzantine"]),
    ("1P 2M 3m 4A 5P 6m 7M", "hungarian minor", &[]),
    // Pentatonic
    ("1P 2M 3M 5P 6M", "major pentatonic", &["pentatonic"]),
    ("1P 3m 4P 5P 7m", "minor pentatonic", &[]),
    ("1P 2M 4P 5P 7m", "egyptian", &[]),
    ("1P 2M 3m 5P 6m", "hirajoshi", &[]),
    ("1P 2m 4P 5d 7m", "iwato", &[]),
    // Blues
    ("1P 3m 4P 5d 5P 7m", "minor blues", &["blues"]),
    ("1P 2M 3m 3M 5P 6M", "major blues", &[]),
    // Symmetric
    ("1P 2M 3M 5d 6m 7m", "whole tone", &[]),
    ("1P 2M 3m 4P 5d 6m 6M 7M", "diminished", &["whole-half diminished"]),
    ("1P 2m 3m 3M 5d 5P 6M 7m", "half-whole diminished", &["dominant diminished"]),
    ("1P 2m 2M 3m 3M 4P 5d 5P 6m 6M 7m 7M", "chromatic", &[]),
    // Bebop
    ("1P 2M 3M 4P 5P 6M 7m 7M", "bebop", &["bebop dominant"]),
    ("1P 2M 3M 4P 5P 6m 6M 7M", "bebop major", &[]),
];

static BUILTIN: OnceLock<ScaleIndex> = OnceLock::new();

/// Read-only scale lookup
#[derive(Debug, Clone)]
pub struct ScaleIndex {
    dict: IntervalDictionary,
}

impl ScaleIndex {
    /// Build the index from the built-in table
    pub fn new() -> Self {
        let dict = IntervalDictionary::from_table(SCALES, false).expect("invalid built-in scale table");
        debug!(count = dict.len(), "built scale index");
        Self { dict }
    }

    /// Shared index of built-in scales
    pub fn builtin() -> &'static ScaleIndex {
        BUILTIN.get_or_init(ScaleIndex::new)
    }

    /// Register a custom scale; its name and aliases shadow built-ins
    pub fn register(&mut self, def: &CustomDefinition) -> Result<(), TheoryError> {
        self.dict.insert(DictEntry::try_from(def)?);
        debug!(name = %def.name, "registered custom scale");
        Ok(())
    }

    /// Find a scale type by name or alias (case-insensitive)
    pub fn lookup(&self, name: &str) -> Option<&DictEntry> {
        self.dict.lookup(name)
    }

    /// Find a scale type by chroma
    pub fn lookup_chroma(&self, chroma: &str) -> Option<&DictEntry> {
        self.dict.lookup_chroma(chroma)
    }

    /// All scale type names
    pub fn names(&self) -> Vec<&str> {
        self.dict.names()
    }

    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    /// Get a scale from a name like "C major", "eb4 dorian" or "lydian"
    pub fn get(&self, name: &str) -> Option<Scale> {
        let (tonic, type_name) = split_scale_name(name);
        let entry = self.lookup(type_name)?;
        Some(Scale::new(tonic.as_ref(), entry))
    }

    /// Names of scales that contain every note of `name` and more
    pub fn extended(&self, name: &str) -> Vec<&str> {
        let Some(base) = self.lookup(split_scale_name(name).1) else {
            return Vec::new();
        };
        let set = base.set();
        self.dict
            .entries()
            .iter()
            .filter(|e| e.set().is_superset_of(&set))
            .map(|e| e.name())
            .collect()
    }

    /// Names of scales whose notes are all in `name` (and fewer)
    pub fn reduced(&self, name: &str) -> Vec<&str> {
        let Some(base) = self.lookup(split_scale_name(name).1) else {
            return Vec::new();
        };
        let set = base.set();
        self.dict
            .entries()
            .iter()
            .filter(|e| e.set().is_subset_of(&set))
            .map(|e| e.name())
            .collect()
    }

    /// Modes of a scale as (tonic, scale name) pairs.
    ///
    /// Rotations with no dictionary entry are skipped. Tonics are empty
    /// when the scale has none.
    pub fn modes(&self, name: &str) -> Vec<(String, String)> {
        let Some(scale) = self.get(name) else {
            return Vec::new();
        };
        let set = PitchClassSet::from_intervals(scale.intervals.as_slice());
        let tonic = scale.tonic.as_ref();
        let mut modes = Vec::new();
        for chroma in set.chromas() {
            let Some(entry) = self.dict.lookup_set(&set.rotate(chroma as usize)) else {
                continue;
            };
            let mode_tonic = match tonic {
                Some(t) => scale
                    .intervals
                    .iter()
                    .find(|i| Interval::from_name(i).is_some_and(|i| i.chroma() == chroma))
                    .and_then(|i| note::transpose(t.pc(), i))
                    .unwrap_or_default(),
                None => String::new(),
            };
            modes.push((mode_tonic, entry.name().to_string()));
        }
        modes
    }
}

impl Default for ScaleIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Split "C4 major" into a tonic note and a scale type name
pub fn split_scale_name(name: &str) -> (Option<Note>, &str) {
    let name = name.trim();
    let (first, rest) = match name.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (name, ""),
    };
    match Note::from_name(first) {
        Some(tonic) => (Some(tonic), rest),
        None => (None, name),
    }
}

/// A scale type, optionally rooted on a tonic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scale {
    #[serde(serialize_with = "serialize_tonic")]
    tonic: Option<Note>,
    name: String,
    aliases: Vec<String>,
    intervals: Vec<String>,
    notes: Vec<String>,
    set: PitchClassSet,
}

impl Scale {
    /// Build a scale from a dictionary entry and optional tonic
    pub fn new(tonic: Option<&Note>, entry: &DictEntry) -> Self {
        let intervals = entry.intervals().to_vec();
        let notes = tonic
            .map(|t| spell_notes(t, &intervals))
            .unwrap_or_default();
        let set = match tonic {
            Some(_) => PitchClassSet::from_notes(notes.as_slice()),
            None => entry.set(),
        };
        Self {
            tonic: tonic.cloned(),
            name: entry.name().to_string(),
            aliases: entry.aliases().to_vec(),
            intervals,
            notes,
            set,
        }
    }

    /// Look up a scale in the built-in index ("C major")
    pub fn get(name: &str) -> Option<Scale> {
        ScaleIndex::builtin().get(name)
    }

    /// Get the tonic, if any
    pub fn tonic(&self) -> Option<&Note> {
        self.tonic.as_ref()
    }

    /// Get the scale type name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Get the intervals from the tonic
    pub fn intervals(&self) -> &[String] {
        &self.intervals
    }

    /// Get the spelled notes (empty without a tonic)
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Pitch class set of the notes (of the intervals without a tonic)
    pub fn set(&self) -> PitchClassSet {
        self.set
    }

    /// Get the number of degrees in this scale
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Check if a note's pitch class is in this scale
    pub fn contains(&self, note: &str) -> bool {
        self.set.includes(note)
    }

    /// Get the scale degree (1-based) for a note, if it's in the scale
    pub fn degree_of(&self, note: &str) -> Option<usize> {
        let chroma = Note::from_name(note)?.chroma();
        self.notes
            .iter()
            .position(|n| Note::from_name(n).is_some_and(|n| n.chroma() == chroma))
            .map(|i| i + 1)
    }

    /// Get the note at a given scale degree (1-based)
    pub fn note_at_degree(&self, degree: usize) -> Option<&str> {
        if degree == 0 {
            return None;
        }
        self.notes.get(degree - 1).map(String::as_str)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tonic {
            Some(tonic) => write!(f, "{} {}", tonic, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
