// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord dictionary, chord symbols and chord detection.

use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;
use tracing::debug;

use super::{serialize_tonic, spell_notes, CustomDefinition, DictEntry, IntervalDictionary};
use crate::error::TheoryError;
use crate::note::Note;
use crate::pcset::PitchClassSet;

/// Built-in chords: (intervals, name, aliases). The first alias is the
/// symbol used when reporting detected chords.
const CHORDS: &[(&str, &str, &[&str])] = &[
    // Major
    ("1P 3M 5P", "major", &["M", "^", "", "maj"]),
    ("1P 3M 5P 7M", "major seventh", &["maj7", "Δ", "ma7", "M7", "Maj7", "^7"]),
    ("1P 3M 5P 7M 9M", "major ninth", &["maj9", "Δ9", "^9"]),
    ("1P 3M 5P 6M", "sixth", &["6", "add6", "add13", "M6"]),
    ("1P 3M 5P 6M 9M", "sixth added ninth", &["6/9", "69", "M69"]),
    ("1P 3M 5P 7M 11A", "lydian", &["maj#4", "Δ#4", "Δ#11", "M7#11"]),
    ("1P 3M 5P 9M", "added ninth", &["add9", "add2", "M9add"]),
    ("1P 3M 5d", "major flat five", &["Mb5"]),
    // Minor
    ("1P 3m 5P", "minor", &["m", "min", "-"]),
    ("1P 3m 5P 7m", "minor seventh", &["m7", "min7", "mi7", "-7"]),
    ("1P 3m 5P 7M", "minor/major seventh", &["m/ma7", "m/maj7", "mM7", "mMaj7", "m/M7", "-Δ7", "mΔ"]),
    ("1P 3m 5P 6M", "minor sixth", &["m6", "-6"]),
    ("1P 3m 5P 7m 9M", "minor ninth", &["m9", "-9"]),
    ("1P 3m 5P 9M", "minor added ninth", &["madd9", "madd2", "-add9"]),
    // Diminished
    ("1P 3m 5d", "diminished", &["dim", "°", "o"]),
    ("1P 3m 5d 7d", "diminished seventh", &["dim7", "°7", "o7"]),
    ("1P 3m 5d 7m", "half-diminished", &["m7b5", "ø", "-7b5", "h7", "h"]),
    // Augmented
    ("1P 3M 5A", "augmented", &["aug", "+", "+5", "^#5"]),
    ("1P 3M 5A 7m", "augmented seventh", &["7#5", "+7", "7+", "7aug", "aug7"]),
    ("1P 3M 5A 7M", "augmented major seventh", &["maj7#5", "maj#5", "Δ#5", "M7#5", "+M7"]),
    // Dominant
    ("1P 3M 5P 7m", "dominant seventh", &["7", "dom"]),
    ("1P 3M 5P 7m 9M", "dominant ninth", &["9"]),
    ("1P 3M 5P 7m 9M 13M", "dominant thirteenth", &["13"]),
    ("1P 3M 5P 7m 9m", "dominant flat ninth", &["7b9"]),
    ("1P 3M 5P 7m 9A", "dominant sharp ninth", &["7#9"]),
    ("1P 3M 5d 7m", "dominant flat five", &["7b5", "dom7dim5", "7dim5"]),
    // Suspended
    ("1P 4P 5P", "suspended fourth", &["sus4", "sus"]),
    ("1P 2M 5P", "suspended second", &["sus2"]),
    ("1P 4P 5P 7m", "suspended fourth seventh", &["7sus4", "7sus"]),
    // Other
    ("1P 5P", "fifth", &["5"]),
];

static BUILTIN: OnceLock<ChordIndex> = OnceLock::new();

/// Read-only chord lookup. Symbols are case-sensitive ("M" vs "m").
#[derive(Debug, Clone)]
pub struct ChordIndex {
    dict: IntervalDictionary,
}

impl ChordIndex {
    /// Build the index from the built-in table
    pub fn new() -> Self {
        let dict = IntervalDictionary::from_table(CHORDS, true).expect("invalid built-in chord table");
        debug!(count = dict.len(), "built chord index");
        Self { dict }
    }

    /// Shared index of built-in chords
    pub fn builtin() -> &'static ChordIndex {
        BUILTIN.get_or_init(ChordIndex::new)
    }

    /// Register a custom chord; its name and aliases shadow built-ins
    pub fn register(&mut self, def: &CustomDefinition) -> Result<(), TheoryError> {
        self.dict.insert(DictEntry::try_from(def)?);
        debug!(name = %def.name, "registered custom chord");
        Ok(())
    }

    /// Find a chord type by name or symbol alias
    pub fn lookup(&self, name: &str) -> Option<&DictEntry> {
        self.dict.lookup(name)
    }

    /// Find a chord type by chroma (root at index 0)
    pub fn lookup_chroma(&self, chroma: &str) -> Option<&DictEntry> {
        self.dict.lookup_chroma(chroma)
    }

    /// All chord type names
    pub fn names(&self) -> Vec<&str> {
        self.dict.names()
    }

    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    /// Get a chord from a symbol like "Cmaj7", "Bb7", "F#m" or "dim7"
    pub fn get(&self, symbol: &str) -> Option<Chord> {
        let symbol = symbol.trim();
        let (tonic, type_name) = split_chord_symbol(symbol);
        let entry = self.lookup(type_name)?;
        Some(Chord::new(tonic.as_ref(), type_name, entry))
    }

    /// Chord symbols matching a set of notes.
    ///
    /// Every distinct pitch class of `notes` is tried as a root, in the
    /// order given, so the bass note's reading comes first.
    pub fn detect<S: AsRef<str>>(&self, notes: &[S]) -> Vec<String> {
        let notes: Vec<Note> = notes
            .iter()
            .filter_map(|n| Note::from_name(n.as_ref()))
            .collect();
        let set = PitchClassSet::from_chromas(notes.iter().map(|n| n.chroma()));

        let mut seen = Vec::with_capacity(notes.len());
        let mut found = Vec::new();
        for root in &notes {
            if seen.contains(&root.chroma()) {
                continue;
            }
            seen.push(root.chroma());
            if let Some(entry) = self.dict.lookup_set(&set.rotate(root.chroma() as usize)) {
                let symbol = entry.aliases().first().map_or(entry.name(), String::as_str);
                found.push(format!("{}{}", root.pc(), symbol));
            }
        }
        found
    }
}

impl Default for ChordIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Split "Cmaj7" into a tonic and a chord type.
///
/// The tonic is an uppercase letter plus any run of `#` or `b` directly
/// after it; a symbol without one ("dim7") has no tonic.
pub fn split_chord_symbol(symbol: &str) -> (Option<Note>, &str) {
    if !symbol.starts_with(|c: char| ('A'..='G').contains(&c)) {
        return (None, symbol);
    }
    let accidental = symbol[1..]
        .chars()
        .next()
        .filter(|&c| c == '#' || c == 'b');
    let end = match accidental {
        Some(acc) => 1 + symbol[1..].chars().take_while(|&c| c == acc).count(),
        None => 1,
    };
    match Note::from_name(&symbol[..end]) {
        Some(tonic) => (Some(tonic), &symbol[end..]),
        None => (None, symbol),
    }
}

/// A chord type, optionally rooted on a tonic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chord {
    #[serde(serialize_with = "serialize_tonic")]
    tonic: Option<Note>,
    symbol: String,
    name: String,
    aliases: Vec<String>,
    intervals: Vec<String>,
    notes: Vec<String>,
    set: PitchClassSet,
}

impl Chord {
    /// Build a chord from a dictionary entry, the type text used, and an optional tonic
    pub fn new(tonic: Option<&Note>, type_name: &str, entry: &DictEntry) -> Self {
        let intervals = entry.intervals().to_vec();
        let notes = tonic
            .map(|t| spell_notes(t, &intervals))
            .unwrap_or_default();
        let symbol = match tonic {
            Some(t) => format!("{}{}", t.pc(), type_name),
            None => type_name.to_string(),
        };
        let set = match tonic {
            Some(_) => PitchClassSet::from_notes(notes.as_slice()),
            None => entry.set(),
        };
        Self {
            tonic: tonic.cloned(),
            symbol,
            name: entry.name().to_string(),
            aliases: entry.aliases().to_vec(),
            intervals,
            notes,
            set,
        }
    }

    /// Look up a chord in the built-in index ("Cmaj7")
    pub fn get(symbol: &str) -> Option<Chord> {
        ChordIndex::builtin().get(symbol)
    }

    pub fn tonic(&self) -> Option<&Note> {
        self.tonic.as_ref()
    }

    /// The symbol as written, e.g. "Ebm7"
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Chord type name, e.g. "minor seventh"
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn intervals(&self) -> &[String] {
        &self.intervals
    }

    /// Spelled notes (empty without a tonic)
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn set(&self) -> PitchClassSet {
        self.set
    }

    /// Check if a note's pitch class is a chord tone
    pub fn contains(&self, note: &str) -> bool {
        self.set.includes(note)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
