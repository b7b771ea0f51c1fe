// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale and chord dictionaries.
//!
//! Each dictionary maps a name, an alias, or a chroma to a list of interval
//! names. Dictionaries are built once from static tables, optionally
//! extended with user definitions, and read-only afterwards.

pub mod chord;
pub mod scale;

pub use chord::{Chord, ChordIndex};
pub use scale::{Scale, ScaleIndex};

use std::collections::HashMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::TheoryError;
use crate::interval::Interval;
use crate::note::Note;
use crate::pcset::PitchClassSet;

/// User-supplied dictionary entry, as loaded from config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomDefinition {
    /// Name of the scale or chord
    pub name: String,
    /// Alternative names
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Interval names from the root (e.g. ["1P", "3M", "5P"])
    pub intervals: Vec<String>,
}

/// A dictionary entry: a named interval structure
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    name: String,
    aliases: Vec<String>,
    intervals: Vec<String>,
    set: PitchClassSet,
}

impl DictEntry {
    /// Create an entry, rejecting interval names that do not parse
    pub fn new(name: &str, aliases: &[&str], intervals: &[&str]) -> Result<Self, TheoryError> {
        if let Some(bad) = intervals.iter().find(|i| Interval::from_name(i).is_none()) {
            return Err(TheoryError::InvalidEntry {
                name: name.to_string(),
                interval: bad.to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            intervals: intervals.iter().map(|i| i.to_string()).collect(),
            set: PitchClassSet::from_intervals(intervals),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Interval names from the root
    pub fn intervals(&self) -> &[String] {
        &self.intervals
    }

    /// Pitch class set of the intervals
    pub fn set(&self) -> PitchClassSet {
        self.set
    }

    pub fn chroma(&self) -> String {
        self.set.chroma()
    }
}

impl TryFrom<&CustomDefinition> for DictEntry {
    type Error = TheoryError;

    fn try_from(def: &CustomDefinition) -> Result<Self, Self::Error> {
        let aliases: Vec<&str> = def.aliases.iter().map(String::as_str).collect();
        let intervals: Vec<&str> = def.intervals.iter().map(String::as_str).collect();
        DictEntry::new(&def.name, &aliases, &intervals)
    }
}

/// Name, alias and chroma lookup over a list of entries
#[derive(Debug, Clone, Default)]
pub struct IntervalDictionary {
    entries: Vec<DictEntry>,
    by_name: HashMap<String, usize>,
    by_set: HashMap<u16, usize>,
    case_sensitive: bool,
}

impl IntervalDictionary {
    /// Create an empty dictionary
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            ..Self::default()
        }
    }

    /// Build from a static table of (intervals, name, aliases) rows
    pub fn from_table(
        table: &[(&str, &str, &[&str])],
        case_sensitive: bool,
    ) -> Result<Self, TheoryError> {
        let mut dict = Self::new(case_sensitive);
        for (intervals, name, aliases) in table {
            let intervals: Vec<&str> = intervals.split_whitespace().collect();
            dict.insert(DictEntry::new(name, aliases, &intervals)?);
        }
        Ok(dict)
    }

    fn key(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }

    /// Add an entry. Names and aliases of later entries win; chroma lookup
    /// keeps the first entry registered for a set.
    pub fn insert(&mut self, entry: DictEntry) {
        let index = self.entries.len();
        let mut keys = vec![self.key(&entry.name)];
        keys.extend(entry.aliases.iter().map(|a| self.key(a)));
        for key in keys {
            self.by_name.insert(key, index);
        }
        self.by_set.entry(entry.set.num()).or_insert(index);
        self.entries.push(entry);
    }

    /// Find an entry by name or alias
    pub fn lookup(&self, name: &str) -> Option<&DictEntry> {
        let key = self.key(name.trim());
        self.by_name.get(&key).map(|&i| &self.entries[i])
    }

    /// Find an entry by its pitch class set
    pub fn lookup_set(&self, set: &PitchClassSet) -> Option<&DictEntry> {
        self.by_set.get(&set.num()).map(|&i| &self.entries[i])
    }

    /// Find an entry by chroma string
    pub fn lookup_chroma(&self, chroma: &str) -> Option<&DictEntry> {
        PitchClassSet::from_chroma(chroma).and_then(|set| self.lookup_set(&set))
    }

    /// All entries in registration order
    pub fn entries(&self) -> &[DictEntry] {
        &self.entries
    }

    /// Primary names of all entries
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serialize an optional tonic as its name
pub(crate) fn serialize_tonic<S: Serializer>(tonic: &Option<Note>, serializer: S) -> Result<S::Ok, S::Error> {
    match tonic {
        Some(note) => serializer.serialize_some(note.name()),
        None => serializer.serialize_none(),
    }
}

/// Spell the notes of an interval list over a tonic
pub(crate) fn spell_notes(tonic: &Note, intervals: &[String]) -> Vec<String> {
    intervals
        .iter()
        .filter_map(|i| Interval::from_name(i))
        .filter_map(|i| tonic.transpose(&i))
        .map(|n| n.name().to_string())
        .collect()
}
