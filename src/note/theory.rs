// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Static note tables and pure conversions.

use std::sync::OnceLock;

use regex::Regex;

/// Diatonic letters in step order, starting at C
pub const LETTERS: [char; 7] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];

/// Semitone offset of each natural letter above C
pub const LETTER_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Pitch class names by chroma, spelled with sharps
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch class names by chroma, spelled with flats
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Octave assumed when a name carries none
pub const DEFAULT_OCTAVE: i32 = 4;

/// Lowest and highest accepted MIDI numbers
pub const MIDI_MIN: i32 = 0;
pub const MIDI_MAX: i32 = 127;

/// Reference pitch of A4 in Hz
pub const A4_FREQUENCY: f64 = 440.0;

/// MIDI number of A4
pub const A4_MIDI: i32 = 69;

/// Note name pattern: letter, a run of one accidental kind, octave
pub const NOTE_PATTERN: &str = r"^(?P<letter>[a-gA-G]?)(?P<accidental>#+|b+|x+|)(?P<octave>-?[0-9]+)?";

static NOTE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Compiled note pattern
pub fn note_regex() -> &'static Regex {
    NOTE_REGEX.get_or_init(|| Regex::new(NOTE_PATTERN).expect("invalid note pattern"))
}

/// Step (0-6) of an uppercase or lowercase letter
pub fn letter_to_step(letter: char) -> Option<u8> {
    let upper = letter.to_ascii_uppercase();
    LETTERS.iter().position(|&l| l == upper).map(|i| i as u8)
}

/// Letter for a step, wrapping modulo 7
pub fn step_to_letter(step: i32) -> char {
    LETTERS[step.rem_euclid(7) as usize]
}

/// Normalize an accidental token: `x` means double sharp
pub fn normalize_accidental(accidental: &str) -> String {
    if accidental.starts_with('x') {
        "##".repeat(accidental.len())
    } else {
        accidental.to_string()
    }
}

/// Alteration of a normalized accidental (sharps positive, flats negative)
pub fn accidental_to_alteration(accidental: &str) -> i32 {
    let count = accidental.chars().count() as i32;
    if accidental.starts_with('b') {
        -count
    } else {
        count
    }
}

/// Accidental string for an alteration
pub fn alteration_to_accidental(alteration: i32) -> String {
    if alteration < 0 {
        "b".repeat(alteration.unsigned_abs() as usize)
    } else {
        "#".repeat(alteration as usize)
    }
}

/// MIDI number of the C that starts `octave`
pub fn octave_base(octave: i32) -> Option<i32> {
    octave.checked_add(1)?.checked_mul(12)
}

/// Frequency of a MIDI number for a given A4 tuning
pub fn midi_to_frequency(midi: i32, tuning: f64) -> f64 {
    tuning * 2.0_f64.powf((midi - A4_MIDI) as f64 / 12.0)
}

/// Pitch class name of a chroma in the requested spelling
pub fn pitch_class_name(chroma: u8, use_sharps: bool) -> &'static str {
    let table = if use_sharps { &SHARP_NAMES } else { &FLAT_NAMES };
    table[(chroma % 12) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_to_step() {
        assert_eq!(letter_to_step('C'), Some(0));
        assert_eq!(letter_to_step('g'), Some(4));
        assert_eq!(letter_to_step('B'), Some(6));
        assert_eq!(letter_to_step('H'), None);
    }

    #[test]
    fn test_step_to_letter_wraps() {
        assert_eq!(step_to_letter(0), 'C');
        assert_eq!(step_to_letter(7), 'C');
        assert_eq!(step_to_letter(-1), 'B');
    }

    #[test]
    fn test_accidentals() {
        assert_eq!(accidental_to_alteration(""), 0);
        assert_eq!(accidental_to_alteration("#"), 1);
        assert_eq!(accidental_to_alteration("###"), 3);
        assert_eq!(accidental_to_alteration("bb"), -2);

        assert_eq!(normalize_accidental("x"), "##");
        assert_eq!(normalize_accidental("xx"), "####");
        assert_eq!(normalize_accidental("b"), "b");

        assert_eq!(alteration_to_accidental(-2), "bb");
        assert_eq!(alteration_to_accidental(0), "");
        assert_eq!(alteration_to_accidental(1), "#");
    }

    #[test]
    fn test_octave_base() {
        assert_eq!(octave_base(4), Some(60));
        assert_eq!(octave_base(-1), Some(0));
        assert_eq!(octave_base(i32::MAX), None);
    }

    #[test]
    fn test_midi_to_frequency() {
        assert_eq!(midi_to_frequency(69, 440.0), 440.0);
        assert_eq!(midi_to_frequency(81, 440.0), 880.0);
        assert!((midi_to_frequency(60, 440.0) - 261.6256).abs() < 0.001);
    }

    #[test]
    fn test_pitch_class_names() {
        assert_eq!(pitch_class_name(1, true), "C#");
        assert_eq!(pitch_class_name(1, false), "Db");
        assert_eq!(pitch_class_name(11, false), "B");
    }
}
