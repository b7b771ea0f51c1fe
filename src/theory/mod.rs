// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The `Theory` facade.
//!
//! Owns a configuration, the scale and chord indexes built from it, and
//! caches of parsed notes and intervals. A `Theory` is `Sync` and can be
//! shared across threads behind an `Arc`.

pub mod cache;

pub use cache::NameCache;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::TheoryConfig;
use crate::dictionary::{Chord, ChordIndex, Scale, ScaleIndex};
use crate::error::TheoryError;
use crate::interval::{self, Interval};
use crate::note::{self, Note, NoteSource};

/// Configured entry point for note, interval, scale and chord lookups
#[derive(Debug)]
pub struct Theory {
    config: TheoryConfig,
    scales: ScaleIndex,
    chords: ChordIndex,
    notes: NameCache<Note>,
    intervals: NameCache<Interval>,
}

impl Theory {
    /// Create a facade with the default configuration
    pub fn new() -> Self {
        Self::build(TheoryConfig::default(), ScaleIndex::builtin().clone(), ChordIndex::builtin().clone())
    }

    /// Create a facade from a configuration, registering its custom entries
    pub fn with_config(config: TheoryConfig) -> Result<Self> {
        config.validate()?;

        let mut scales = ScaleIndex::builtin().clone();
        for def in &config.scales {
            scales
                .register(def)
                .with_context(|| format!("Failed to register scale {:?}", def.name))?;
        }
        let mut chords = ChordIndex::builtin().clone();
        for def in &config.chords {
            chords
                .register(def)
                .with_context(|| format!("Failed to register chord {:?}", def.name))?;
        }
        debug!(
            tuning = config.tuning,
            scales = scales.len(),
            chords = chords.len(),
            "theory ready"
        );
        Ok(Self::build(config, scales, chords))
    }

    fn build(config: TheoryConfig, scales: ScaleIndex, chords: ChordIndex) -> Self {
        Self {
            config,
            scales,
            chords,
            notes: NameCache::new("note"),
            intervals: NameCache::new("interval"),
        }
    }

    pub fn config(&self) -> &TheoryConfig {
        &self.config
    }

    /// Scale index, including custom scales
    pub fn scales(&self) -> &ScaleIndex {
        &self.scales
    }

    /// Chord index, including custom chords
    pub fn chords(&self) -> &ChordIndex {
        &self.chords
    }

    /// Parse a note name (cached under its letter-uppercased form)
    pub fn note(&self, name: &str) -> Option<Note> {
        self.notes.get_or_parse(&note_key(name), Note::from_name)
    }

    /// Parse an interval name (cached; quality letters are case-sensitive)
    pub fn interval(&self, name: &str) -> Option<Interval> {
        self.intervals.get_or_parse(name, Interval::from_name)
    }

    /// Simplify a note name, keeping its accidental family, or else an
    /// interval name. Note names win, so "A4" is the note.
    pub fn simplify(&self, name: &str) -> Option<String> {
        note::simplify(name, true).or_else(|| interval::simplify(name))
    }

    /// Note for a MIDI number, spelled per `prefer_sharps`
    pub fn note_from_midi(&self, midi: i32) -> Option<Note> {
        Note::from_midi(midi, self.config.prefer_sharps)
    }

    /// Note at or just above a frequency, using the configured tuning.
    ///
    /// Tuning only picks the key: the returned note's `frequency()` is
    /// always relative to A4 = 440 Hz. Respelled with flats when
    /// `prefer_sharps` is off.
    pub fn note_from_frequency(&self, hz: f64) -> Option<Note> {
        let note = Note::from_frequency(hz, self.config.tuning)?;
        if self.config.prefer_sharps {
            Some(note)
        } else {
            Note::from_midi(note.midi(), false)
        }
    }

    /// Note from any source; names go through the cache
    pub fn note_from(&self, source: NoteSource<'_>) -> Option<Note> {
        match source {
            NoteSource::Name(name) => self.note(name),
            other => Note::from_source(other),
        }
    }

    /// Scale from a name like "C major" or "dorian"
    pub fn scale(&self, name: &str) -> Option<Scale> {
        self.scales.get(name)
    }

    /// Chord from a symbol like "Cmaj7" or "m7"
    pub fn chord(&self, symbol: &str) -> Option<Chord> {
        self.chords.get(symbol)
    }

    /// Chord symbols matching a set of notes
    pub fn detect<S: AsRef<str>>(&self, notes: &[S]) -> Vec<String> {
        self.chords.detect(notes)
    }

    pub fn try_note(&self, name: &str) -> Result<Note, TheoryError> {
        self.note(name)
            .ok_or_else(|| TheoryError::InvalidNote(name.to_string()))
    }

    pub fn try_interval(&self, name: &str) -> Result<Interval, TheoryError> {
        self.interval(name)
            .ok_or_else(|| TheoryError::InvalidInterval(name.to_string()))
    }

    pub fn try_note_from_midi(&self, midi: i32) -> Result<Note, TheoryError> {
        self.note_from_midi(midi)
            .ok_or(TheoryError::MidiOutOfRange(midi))
    }

    pub fn try_note_from_frequency(&self, hz: f64) -> Result<Note, TheoryError> {
        self.note_from_frequency(hz)
            .ok_or(TheoryError::InvalidFrequency(hz))
    }

    pub fn try_scale(&self, name: &str) -> Result<Scale, TheoryError> {
        self.scale(name)
            .ok_or_else(|| TheoryError::UnknownScale(name.to_string()))
    }

    pub fn try_chord(&self, symbol: &str) -> Result<Chord, TheoryError> {
        self.chord(symbol)
            .ok_or_else(|| TheoryError::UnknownChord(symbol.to_string()))
    }

    /// Number of cached note and interval names
    pub fn cached(&self) -> (usize, usize) {
        (self.notes.len(), self.intervals.len())
    }
}

/// Cache key for a note name: the letter is case-insensitive
fn note_key(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

impl Default for Theory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::CustomDefinition;
    use std::sync::Arc;
    use std::thread;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_note_and_interval_cached() {
        let theory = Theory::new();
        assert_eq!(theory.note("C4").unwrap().midi(), 60);
        assert_eq!(theory.note("C4").unwrap().midi(), 60);
        assert!(theory.note("H4").is_none());
        assert_eq!(theory.interval("M3").unwrap().name(), "3M");
        assert_eq!(theory.cached(), (1, 1));

        // Letter case shares one entry
        assert_eq!(theory.note("c4").unwrap().name(), "C4");
        assert_eq!(theory.note("eb").unwrap().name(), "Eb");
        assert_eq!(theory.note("Eb").unwrap().name(), "Eb");
        assert_eq!(theory.cached(), (2, 1));
    }

    #[test]
    fn test_invalid_lookups_not_cached() {
        let theory = Theory::new();
        for i in 0..1000 {
            assert!(theory.note(&format!("garbage-{}", i)).is_none());
            assert!(theory.interval(&format!("{}X", i)).is_none());
        }
        assert_eq!(theory.cached(), (0, 0));
    }

    #[test]
    fn test_simplify_keeps_family() {
        let theory = Theory::new();
        assert_eq!(theory.simplify("C#4").as_deref(), Some("C#4"));
        assert_eq!(note::enharmonic("C#4").as_deref(), Some("Db4"));
        assert_eq!(theory.simplify("B#4").as_deref(), Some("C4"));
        assert_eq!(theory.simplify("Fb").as_deref(), Some("E"));
        assert_eq!(theory.simplify("9M").as_deref(), Some("2M"));
        assert_eq!(theory.simplify("A4").as_deref(), Some("A4"));
        assert_eq!(theory.simplify("nope"), None);
    }

    #[test]
    fn test_try_errors() {
        let theory = Theory::new();
        assert_eq!(
            theory.try_note("nope").unwrap_err(),
            TheoryError::InvalidNote("nope".to_string())
        );
        assert_eq!(
            theory.try_interval("3P").unwrap_err(),
            TheoryError::InvalidInterval("3P".to_string())
        );
        assert_eq!(
            theory.try_note_from_midi(128).unwrap_err(),
            TheoryError::MidiOutOfRange(128)
        );
        assert!(theory.try_scale("C nonsense").is_err());
        assert!(theory.try_chord("Cxyz").is_err());
    }

    #[test]
    fn test_spelling_preference() {
        let sharps = Theory::new();
        assert_eq!(sharps.note_from_midi(61).unwrap().name(), "C#4");

        let flats = Theory::with_config(TheoryConfig {
            prefer_sharps: false,
            ..TheoryConfig::default()
        })
        .unwrap();
        assert_eq!(flats.note_from_midi(61).unwrap().name(), "Db4");
        assert_eq!(flats.note_from_frequency(466.16).unwrap().name(), "Bb4");
    }

    #[test]
    fn test_tuning() {
        let theory = Theory::with_config(TheoryConfig {
            tuning: 432.0,
            ..TheoryConfig::default()
        })
        .unwrap();
        let a4 = theory.note_from_frequency(432.0).unwrap();
        assert_eq!(a4.name(), "A4");
        assert_eq!(a4.frequency(), 440.0);
        assert_eq!(
            theory.note_from(NoteSource::Frequency { hz: 440.0, tuning: 440.0 }).unwrap().name(),
            "A4"
        );
    }

    #[test]
    fn test_custom_entries() {
        let config = TheoryConfig {
            scales: vec![CustomDefinition {
                name: "prometheus".to_string(),
                aliases: vec![],
                intervals: strings(&["1P", "2M", "3M", "4A", "6M", "7m"]),
            }],
            chords: vec![CustomDefinition {
                name: "mu major".to_string(),
                aliases: strings(&["Madd2"]),
                intervals: strings(&["1P", "2M", "3M", "5P"]),
            }],
            ..TheoryConfig::default()
        };
        let theory = Theory::with_config(config).unwrap();
        assert_eq!(
            theory.scale("C prometheus").unwrap().notes(),
            &["C", "D", "E", "F#", "A", "Bb"]
        );
        assert_eq!(theory.chord("DMadd2").unwrap().notes(), &["D", "E", "F#", "A"]);
        assert!(Theory::new().scale("C prometheus").is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TheoryConfig {
            chords: vec![CustomDefinition {
                name: "broken".to_string(),
                aliases: vec![],
                intervals: strings(&["1P", "9P"]),
            }],
            ..TheoryConfig::default()
        };
        assert!(Theory::with_config(config).is_err());
    }

    #[test]
    fn test_shared_across_threads() {
        let theory = Arc::new(Theory::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let theory = Arc::clone(&theory);
                thread::spawn(move || {
                    for midi in 0..=127 {
                        let name = theory.note_from_midi(midi).unwrap().name().to_string();
                        assert_eq!(theory.note(&name).unwrap().midi(), midi);
                    }
                    theory.interval(if i % 2 == 0 { "5P" } else { "P5" }).unwrap().semitones()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 7);
        }
        assert_eq!(theory.cached(), (128, 2));
    }
}
