// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Canonical note records built from a name, a MIDI number, or a frequency.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::trace;

use super::theory::{
    accidental_to_alteration, alteration_to_accidental, letter_to_step, midi_to_frequency,
    normalize_accidental, note_regex, octave_base, pitch_class_name, step_to_letter,
    A4_FREQUENCY, A4_MIDI, DEFAULT_OCTAVE, LETTER_SEMITONES, MIDI_MAX, MIDI_MIN,
};
use crate::error::TheoryError;
use crate::interval::Interval;
use crate::property::PropertyValue;
use crate::tokenizer::tokenize;

/// Canonical, immutable property set of a spelled note.
///
/// Only constructed through [`Note::from_name`], [`Note::from_midi`],
/// [`Note::from_frequency`] and [`Note::from_source`]. Invalid input gives
/// `None`, never a partially filled record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    name: String,
    letter: char,
    step: u8,
    accidental: String,
    alteration: i32,
    octave: i32,
    pc: String,
    chroma: u8,
    midi: i32,
    frequency: f64,
    #[serde(skip)]
    octave_given: bool,
}

/// Where a note is derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteSource<'a> {
    /// Note name such as "C#4"
    Name(&'a str),
    /// MIDI number, spelled with sharps or flats
    Midi { midi: i32, use_sharps: bool },
    /// Frequency in Hz against an A4 tuning
    Frequency { hz: f64, tuning: f64 },
}

/// Named note properties, for callers that select a field at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteProperty {
    Name,
    Letter,
    Step,
    Accidental,
    Alteration,
    Octave,
    Pc,
    Chroma,
    Midi,
    Frequency,
}

impl NoteProperty {
    pub const ALL: [NoteProperty; 10] = [
        NoteProperty::Name,
        NoteProperty::Letter,
        NoteProperty::Step,
        NoteProperty::Accidental,
        NoteProperty::Alteration,
        NoteProperty::Octave,
        NoteProperty::Pc,
        NoteProperty::Chroma,
        NoteProperty::Midi,
        NoteProperty::Frequency,
    ];
}

impl FromStr for NoteProperty {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(NoteProperty::Name),
            "letter" => Ok(NoteProperty::Letter),
            "step" => Ok(NoteProperty::Step),
            "accidental" | "acc" => Ok(NoteProperty::Accidental),
            "alteration" | "alt" => Ok(NoteProperty::Alteration),
            "octave" | "oct" => Ok(NoteProperty::Octave),
            "pc" | "pitch_class" => Ok(NoteProperty::Pc),
            "chroma" => Ok(NoteProperty::Chroma),
            "midi" => Ok(NoteProperty::Midi),
            "frequency" | "freq" => Ok(NoteProperty::Frequency),
            _ => Err(TheoryError::UnknownProperty(s.to_string())),
        }
    }
}

impl Note {
    /// Parse a note name such as "C4", "eb", "F##-1" or "Gx3"
    pub fn from_name(name: &str) -> Option<Note> {
        let Some(tokens) = tokenize(name, note_regex()) else {
            trace!(name, "not a note name");
            return None;
        };
        let letter = tokens.get("letter").chars().next()?.to_ascii_uppercase();
        let step = letter_to_step(letter)?;
        let accidental = normalize_accidental(tokens.get("accidental"));
        let alteration = accidental_to_alteration(&accidental);

        let octave_token = tokens.get("octave");
        let (octave, octave_given) = if octave_token.is_empty() {
            (DEFAULT_OCTAVE, false)
        } else {
            (octave_token.parse::<i32>().ok()?, true)
        };

        // Floor division, so Cb wraps to chroma 11 and B# to chroma 0
        let altered = LETTER_SEMITONES[step as usize].checked_add(alteration)?;
        let octave_shift = altered.div_euclid(12);
        let chroma = (altered - octave_shift * 12) as u8;

        let midi = octave_base(octave)?.checked_add(chroma as i32)?;
        let frequency = midi_to_frequency(midi, A4_FREQUENCY);

        let pc = format!("{}{}", letter, accidental);
        let name = if octave_given {
            format!("{}{}", pc, octave)
        } else {
            pc.clone()
        };

        Some(Note {
            name,
            letter,
            step,
            accidental,
            alteration,
            octave,
            pc,
            chroma,
            midi,
            frequency,
            octave_given,
        })
    }

    /// Build a note from a MIDI number (0-127)
    pub fn from_midi(midi: i32, use_sharps: bool) -> Option<Note> {
        if !(MIDI_MIN..=MIDI_MAX).contains(&midi) {
            trace!(midi, "midi number out of range");
            return None;
        }
        let octave = midi.div_euclid(12) - 1;
        let chroma = (midi - 12 * (octave + 1)) as u8;
        let name = format!("{}{}", pitch_class_name(chroma, use_sharps), octave);
        Note::from_name(&name)
    }

    /// Build the note whose key sits at or just above `hz` for the given A4 tuning
    pub fn from_frequency(hz: f64, tuning: f64) -> Option<Note> {
        if !(hz.is_finite() && hz > 0.0 && tuning.is_finite() && tuning > 0.0) {
            trace!(hz, tuning, "frequency not positive");
            return None;
        }
        let exact = 12.0 * (hz / tuning).log2() + A4_MIDI as f64;
        let nearest = exact.round();
        let key = if (exact - nearest).abs() < 1e-9 {
            nearest
        } else {
            exact.ceil()
        };
        if key < MIDI_MIN as f64 || key > MIDI_MAX as f64 {
            return None;
        }
        Note::from_midi(key as i32, true)
    }

    /// Build a note from any supported source
    pub fn from_source(source: NoteSource<'_>) -> Option<Note> {
        match source {
            NoteSource::Name(name) => Note::from_name(name),
            NoteSource::Midi { midi, use_sharps } => Note::from_midi(midi, use_sharps),
            NoteSource::Frequency { hz, tuning } => Note::from_frequency(hz, tuning),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    /// Diatonic step (0 = C ... 6 = B)
    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn accidental(&self) -> &str {
        &self.accidental
    }

    pub fn alteration(&self) -> i32 {
        self.alteration
    }

    /// Octave number (4 when the name carried none)
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Pitch class name (letter and accidental)
    pub fn pc(&self) -> &str {
        &self.pc
    }

    pub fn chroma(&self) -> u8 {
        self.chroma
    }

    pub fn midi(&self) -> i32 {
        self.midi
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Check whether the name had no octave
    pub fn is_pitch_class(&self) -> bool {
        !self.octave_given
    }

    /// Get a property selected at runtime
    pub fn get(&self, property: NoteProperty) -> PropertyValue {
        match property {
            NoteProperty::Name => PropertyValue::Text(self.name.clone()),
            NoteProperty::Letter => PropertyValue::Text(self.letter.to_string()),
            NoteProperty::Step => PropertyValue::Integer(self.step as i64),
            NoteProperty::Accidental => PropertyValue::Text(self.accidental.clone()),
            NoteProperty::Alteration => PropertyValue::Integer(self.alteration as i64),
            NoteProperty::Octave => PropertyValue::Integer(self.octave as i64),
            NoteProperty::Pc => PropertyValue::Text(self.pc.clone()),
            NoteProperty::Chroma => PropertyValue::Integer(self.chroma as i64),
            NoteProperty::Midi => PropertyValue::Integer(self.midi as i64),
            NoteProperty::Frequency => PropertyValue::Float(self.frequency),
        }
    }

    /// Written pitch height in semitones, ignoring chroma wraparound (Cb4 = 59)
    pub(crate) fn height(&self) -> Option<i32> {
        octave_base(self.octave)?
            .checked_add(LETTER_SEMITONES[self.step as usize])?
            .checked_add(self.alteration)
    }

    /// Diatonic position counted in steps from C-1 octave
    pub(crate) fn diatonic_position(&self) -> Option<i32> {
        self.octave.checked_mul(7)?.checked_add(self.step as i32)
    }

    /// Transpose by an interval, keeping correct letter spelling
    pub fn transpose(&self, interval: &Interval) -> Option<Note> {
        let steps = self.step as i32 + interval.direction() * (interval.num().abs() - 1);
        let letter_step = steps.rem_euclid(7);
        let octave = self.octave.checked_add(steps.div_euclid(7))?;

        let target = self.height()?.checked_add(interval.semitones())?;
        let natural = octave_base(octave)?.checked_add(LETTER_SEMITONES[letter_step as usize])?;
        let accidental = alteration_to_accidental(target - natural);

        let name = if self.octave_given {
            format!("{}{}{}", step_to_letter(letter_step), accidental, octave)
        } else {
            format!("{}{}", step_to_letter(letter_step), accidental)
        };
        Note::from_name(&name)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::from_name(s).ok_or_else(|| TheoryError::InvalidNote(s.to_string()))
    }
}

/// Respell a note with the simplest accidental.
///
/// With `prefer_same_family` sharps stay sharps and flats stay flats
/// ("B#4" gives "C4", "Fb" gives "E"); without it the spelling flips to the
/// other family where the pitch has one ("C#4" gives "Db4").
pub fn simplify(name: &str, prefer_same_family: bool) -> Option<String> {
    let note = Note::from_name(name)?;
    let use_sharps = (note.alteration >= 0) == prefer_same_family;
    let pc = pitch_class_name(note.chroma, use_sharps);
    if note.octave_given {
        Some(format!("{}{}", pc, note.octave))
    } else {
        Some(pc.to_string())
    }
}

/// Enharmonic respelling in the opposite accidental family
pub fn enharmonic(name: &str) -> Option<String> {
    simplify(name, false)
}

/// Transpose a note name by an interval name ("C4", "3M" gives "E4")
pub fn transpose(note: &str, interval: &str) -> Option<String> {
    let note = Note::from_name(note)?;
    let interval = Interval::from_name(interval)?;
    note.transpose(&interval).map(|n| n.name)
}
