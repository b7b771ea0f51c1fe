// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for converting invalid-sentinel results into messages.
//!
//! The core constructors return `Option` and never fail loudly. These
//! errors are used at the edges (`FromStr`, the `Theory` facade, the CLI)
//! where a caller wants something printable.

use thiserror::Error;

/// Theory error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TheoryError {
    /// Name could not be tokenized as a note
    #[error("cannot derive note from name: got {0:?}")]
    InvalidNote(String),
    /// Name could not be tokenized as an interval
    #[error("cannot derive interval from name: got {0:?}")]
    InvalidInterval(String),
    /// MIDI number outside 0-127
    #[error("cannot derive note from midi: got {0}")]
    MidiOutOfRange(i32),
    /// Frequency or tuning not a positive finite number
    #[error("cannot derive note from frequency: got {0}")]
    InvalidFrequency(f64),
    /// Not a 12-character string of 0s and 1s
    #[error("cannot derive pitch class set from chroma: got {0:?}")]
    InvalidChroma(String),
    /// No scale with that name or alias
    #[error("cannot derive scale from name: got {0:?}")]
    UnknownScale(String),
    /// No chord with that symbol or alias
    #[error("cannot derive chord from symbol: got {0:?}")]
    UnknownChord(String),
    /// Property name not recognized
    #[error("unknown property: got {0:?}")]
    UnknownProperty(String),
    /// Dictionary entry with an interval that does not parse
    #[error("invalid dictionary entry {name:?}: bad interval {interval:?}")]
    InvalidEntry { name: String, interval: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TheoryError::InvalidNote("H4".to_string());
        assert_eq!(err.to_string(), "cannot derive note from name: got \"H4\"");

        let err = TheoryError::MidiOutOfRange(128);
        assert_eq!(err.to_string(), "cannot derive note from midi: got 128");
    }
}
