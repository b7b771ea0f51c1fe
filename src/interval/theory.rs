// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Static interval tables, quality types and name patterns.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Base quality of a diatonic step in the major scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalKind {
    /// Unison, fourth, fifth
    Perfect,
    /// Second, third, sixth, seventh
    Major,
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalKind::Perfect => write!(f, "P"),
            IntervalKind::Major => write!(f, "M"),
        }
    }
}

impl Serialize for IntervalKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Interval quality, with repeat counts for diminished/augmented (1-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Diminished(u8),
    Minor,
    Major,
    Perfect,
    Augmented(u8),
}

/// Longest run of `d` or `A` in a quality
pub const MAX_QUALITY_REPEATS: u8 = 4;

impl Quality {
    /// Parse a quality token ("dd", "m", "M", "P", "AAA")
    pub fn parse(token: &str) -> Option<Self> {
        let len = token.len();
        if len == 0 || len > MAX_QUALITY_REPEATS as usize {
            return None;
        }
        match token {
            "m" => Some(Quality::Minor),
            "M" => Some(Quality::Major),
            "P" => Some(Quality::Perfect),
            _ if token.bytes().all(|b| b == b'd') => Some(Quality::Diminished(len as u8)),
            _ if token.bytes().all(|b| b == b'A') => Some(Quality::Augmented(len as u8)),
            _ => None,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Diminished(n) => write!(f, "{}", "d".repeat(*n as usize)),
            Quality::Minor => write!(f, "m"),
            Quality::Major => write!(f, "M"),
            Quality::Perfect => write!(f, "P"),
            Quality::Augmented(n) => write!(f, "{}", "A".repeat(*n as usize)),
        }
    }
}

impl Serialize for Quality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Base quality per step: P M M P P M M
pub const BASE_KIND: [IntervalKind; 7] = [
    IntervalKind::Perfect,
    IntervalKind::Major,
    IntervalKind::Major,
    IntervalKind::Perfect,
    IntervalKind::Perfect,
    IntervalKind::Major,
    IntervalKind::Major,
];

/// Semitone width of each unaltered simple interval
pub const BASE_SIZE: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Interval class by chroma
pub const INTERVAL_CLASS: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1];

/// Canonical interval number for each chroma
pub const CHROMA_NUMBERS: [i32; 12] = [1, 2, 2, 3, 3, 4, 5, 5, 6, 6, 7, 7];

/// Canonical interval quality for each chroma
pub const CHROMA_QUALITIES: [&str; 12] = ["P", "m", "M", "m", "M", "P", "d", "P", "m", "M", "m", "M"];

/// Canonical interval names for each chroma
pub const CHROMA_INTERVALS: [&str; 12] = [
    "1P", "2m", "2M", "3m", "3M", "4P", "5d", "5P", "6m", "6M", "7m", "7M",
];

/// Number then quality, as in "3M" or "-5P"
pub const TONAL_PATTERN: &str = r"^(?P<num>[-+]?[0-9]+)(?P<quality>d{1,4}|m|M|P|A{1,4})";

/// Quality then number, as in "M3" or "P-5"
pub const QUALITY_FIRST_PATTERN: &str = r"^(?P<quality>d{1,4}|m|M|P|A{1,4})(?P<num>[-+]?[0-9]+)";

static TONAL_REGEX: OnceLock<Regex> = OnceLock::new();
static QUALITY_FIRST_REGEX: OnceLock<Regex> = OnceLock::new();

/// Compiled number-first interval pattern
pub fn tonal_regex() -> &'static Regex {
    TONAL_REGEX.get_or_init(|| Regex::new(TONAL_PATTERN).expect("invalid interval pattern"))
}

/// Compiled quality-first interval pattern
pub fn quality_first_regex() -> &'static Regex {
    QUALITY_FIRST_REGEX
        .get_or_init(|| Regex::new(QUALITY_FIRST_PATTERN).expect("invalid interval pattern"))
}

/// Base kind of the step an interval number falls on
pub fn kind_of(num: i32) -> IntervalKind {
    BASE_KIND[((num.unsigned_abs().max(1) - 1) % 7) as usize]
}

/// Alteration of a quality relative to the step's base kind.
///
/// Returns `None` for combinations that do not exist, such as a perfect
/// third or a major fifth.
pub fn quality_to_alteration(kind: IntervalKind, quality: Quality) -> Option<i32> {
    match (kind, quality) {
        (IntervalKind::Perfect, Quality::Perfect) | (IntervalKind::Major, Quality::Major) => Some(0),
        (IntervalKind::Major, Quality::Minor) => Some(-1),
        (_, Quality::Augmented(n)) => Some(n as i32),
        (IntervalKind::Perfect, Quality::Diminished(n)) => Some(-(n as i32)),
        (IntervalKind::Major, Quality::Diminished(n)) => Some(-(n as i32 + 1)),
        _ => None,
    }
}

/// Quality for an alteration of a step's base kind.
///
/// Returns `None` when more than four `d` or `A` would be needed.
pub fn alteration_to_quality(kind: IntervalKind, alteration: i32) -> Option<Quality> {
    let repeats = |n: i32| -> Option<u8> {
        u8::try_from(n)
            .ok()
            .filter(|&n| (1..=MAX_QUALITY_REPEATS).contains(&n))
    };
    match (kind, alteration) {
        (IntervalKind::Perfect, 0) => Some(Quality::Perfect),
        (IntervalKind::Major, 0) => Some(Quality::Major),
        (IntervalKind::Major, -1) => Some(Quality::Minor),
        (_, a) if a > 0 => repeats(a).map(Quality::Augmented),
        (IntervalKind::Perfect, a) => repeats(a.saturating_neg()).map(Quality::Diminished),
        (IntervalKind::Major, a) => repeats(a.saturating_neg() - 1).map(Quality::Diminished),
    }
}
