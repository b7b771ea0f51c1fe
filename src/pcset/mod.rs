// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch class sets as 12-bit chroma masks.
//!
//! A set is written as a 12-character chroma string of `0`s and `1`s where
//! index 0 is C and index 11 is B. Read as base 2 it gives `num` (0-4095),
//! so index 0 is the most significant bit. Subset and superset tests are
//! single AND/OR operations on that number.
//!
//! The string-level functions ([`normalize`], [`is_subset_of`], ...) take
//! and return chroma strings; [`PitchClassSet`] offers the same operations
//! on an already-parsed value.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::TheoryError;
use crate::interval::theory::CHROMA_INTERVALS;
use crate::interval::Interval;
use crate::note::Note;

/// Mask of the 12 valid bits
const MASK: u16 = 0x0FFF;

/// A set of pitch classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PitchClassSet {
    num: u16,
}

impl PitchClassSet {
    /// The empty set
    pub const EMPTY: PitchClassSet = PitchClassSet { num: 0 };

    /// Parse a 12-character chroma string
    pub fn from_chroma(chroma: &str) -> Option<Self> {
        if chroma.len() != 12 {
            return None;
        }
        let mut num = 0u16;
        for b in chroma.bytes() {
            num = match b {
                b'0' => num << 1,
                b'1' => (num << 1) | 1,
                _ => return None,
            };
        }
        Some(Self { num })
    }

    /// Build from a set number (0-4095)
    pub fn from_num(num: u16) -> Option<Self> {
        (num <= MASK).then_some(Self { num })
    }

    /// Build from pitch class chromas (0-11); larger values wrap
    pub fn from_chromas<I: IntoIterator<Item = u8>>(chromas: I) -> Self {
        let num = chromas
            .into_iter()
            .fold(0u16, |acc, c| acc | Self::bit(c % 12));
        Self { num }
    }

    /// Build from note names, skipping names that do not parse
    pub fn from_notes<S: AsRef<str>>(names: &[S]) -> Self {
        Self::from_chromas(
            names
                .iter()
                .filter_map(|n| Note::from_name(n.as_ref()))
                .map(|n| n.chroma()),
        )
    }

    /// Build from interval names, skipping names that do not parse
    pub fn from_intervals<S: AsRef<str>>(names: &[S]) -> Self {
        Self::from_chromas(
            names
                .iter()
                .filter_map(|i| Interval::from_name(i.as_ref()))
                .map(|i| i.chroma()),
        )
    }

    fn bit(chroma: u8) -> u16 {
        1 << (11 - chroma as u16)
    }

    /// Set number (chroma read as base 2)
    pub fn num(&self) -> u16 {
        self.num
    }

    /// 12-character chroma string
    pub fn chroma(&self) -> String {
        (0..12u8)
            .map(|c| if self.has(c) { '1' } else { '0' })
            .collect()
    }

    /// Number of pitch classes in the set
    pub fn len(&self) -> usize {
        self.num.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.num == 0
    }

    /// Check if the pitch class with this chroma is in the set
    pub fn has(&self, chroma: u8) -> bool {
        chroma < 12 && self.num & Self::bit(chroma) != 0
    }

    /// Check if a note's pitch class is in the set
    pub fn includes(&self, note: &str) -> bool {
        Note::from_name(note).is_some_and(|n| self.has(n.chroma()))
    }

    /// Chromas of the members, ascending
    pub fn chromas(&self) -> Vec<u8> {
        (0..12u8).filter(|&c| self.has(c)).collect()
    }

    /// Rotate the chroma string left by `n` positions
    pub fn rotate(&self, n: usize) -> Self {
        let n = (n % 12) as u32;
        let num = ((self.num << n) | (self.num >> (12 - n))) & MASK;
        Self { num }
    }

    /// Rotate so the first member sits at index 0
    pub fn normalized(&self) -> Self {
        if self.is_empty() {
            return *self;
        }
        let first = self.num.leading_zeros() as usize - 4;
        self.rotate(first)
    }

    /// Canonical interval names of the members relative to C
    pub fn intervals(&self) -> Vec<&'static str> {
        self.chromas()
            .into_iter()
            .map(|c| CHROMA_INTERVALS[c as usize])
            .collect()
    }

    /// Check if `self` is a proper subset of `other`
    pub fn is_subset_of(&self, other: &PitchClassSet) -> bool {
        self.num != other.num && (self.num & other.num) == self.num
    }

    /// Check if `self` is a proper superset of `other`
    pub fn is_superset_of(&self, other: &PitchClassSet) -> bool {
        self.num != other.num && (self.num | other.num) == self.num
    }

    /// All 12 rotations, or only those starting on a member when `normalize_only`
    pub fn modes(&self, normalize_only: bool) -> Vec<PitchClassSet> {
        (0..12)
            .filter(|&i| !normalize_only || self.has(i as u8))
            .map(|i| self.rotate(i))
            .collect()
    }

    /// Keep only the notes whose pitch class is in the set
    pub fn filter<'a, S: AsRef<str>>(&self, notes: &'a [S]) -> Vec<&'a str> {
        notes
            .iter()
            .map(|n| n.as_ref())
            .filter(|n| self.includes(n))
            .collect()
    }
}

impl fmt::Display for PitchClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chroma())
    }
}

impl FromStr for PitchClassSet {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PitchClassSet::from_chroma(s).ok_or_else(|| TheoryError::InvalidChroma(s.to_string()))
    }
}

impl Serialize for PitchClassSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PitchClassSet", 5)?;
        state.serialize_field("chroma", &self.chroma())?;
        state.serialize_field("num", &self.num)?;
        state.serialize_field("normalized", &self.normalized().chroma())?;
        state.serialize_field("length", &self.len())?;
        state.serialize_field("intervals", &self.intervals())?;
        state.end()
    }
}

/// Check for a 12-character string of `0`s and `1`s
pub fn is_chroma(s: &str) -> bool {
    PitchClassSet::from_chroma(s).is_some()
}

/// Chroma of a list of note names; unparseable names are skipped
pub fn chroma_from_notes<S: AsRef<str>>(names: &[S]) -> String {
    PitchClassSet::from_notes(names).chroma()
}

/// Chroma of a list of interval names; unparseable names are skipped
pub fn chroma_from_intervals<S: AsRef<str>>(names: &[S]) -> String {
    PitchClassSet::from_intervals(names).chroma()
}

/// Chroma read as a base-2 number
pub fn to_num(chroma: &str) -> Option<u16> {
    PitchClassSet::from_chroma(chroma).map(|s| s.num())
}

/// Number of members
pub fn length(chroma: &str) -> Option<usize> {
    PitchClassSet::from_chroma(chroma).map(|s| s.len())
}

/// Rotate so the first `1` is at index 0
pub fn normalize(chroma: &str) -> Option<String> {
    PitchClassSet::from_chroma(chroma).map(|s| s.normalized().chroma())
}

/// Interval names of the set bits
pub fn to_intervals(chroma: &str) -> Option<Vec<&'static str>> {
    PitchClassSet::from_chroma(chroma).map(|s| s.intervals())
}

/// Check that `candidate` is a proper subset of `superset`
pub fn is_subset_of(superset: &str, candidate: &str) -> bool {
    match (to_num(superset), to_num(candidate)) {
        (Some(s), Some(o)) => s != o && (o & s) == o,
        _ => false,
    }
}

/// Check that `candidate` is a proper superset of `subset`
pub fn is_superset_of(subset: &str, candidate: &str) -> bool {
    match (to_num(subset), to_num(candidate)) {
        (Some(s), Some(o)) => s != o && (o | s) == o,
        _ => false,
    }
}

/// Rotations of a chroma; see [`PitchClassSet::modes`]
pub fn modes(chroma: &str, normalize_only: bool) -> Option<Vec<String>> {
    PitchClassSet::from_chroma(chroma).map(|s| {
        s.modes(normalize_only)
            .into_iter()
            .map(|m| m.chroma())
            .collect()
    })
}

/// Check if a note's pitch class is in the chroma
pub fn includes(chroma: &str, note: &str) -> bool {
    PitchClassSet::from_chroma(chroma).is_some_and(|s| s.includes(note))
}

/// Notes of `notes` whose pitch class is in the chroma
pub fn filter<'a, S: AsRef<str>>(chroma: &str, notes: &'a [S]) -> Vec<&'a str> {
    PitchClassSet::from_chroma(chroma)
        .map(|s| s.filter(notes))
        .unwrap_or_default()
}
