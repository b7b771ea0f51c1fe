// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! tonal - music theory primitives.
//!
//! Parses note and interval names into fully derived records, does
//! pitch-class-set algebra on 12-bit masks, and looks up scales and
//! chords by name or by chroma.
//!
//! Constructors return `Option`: `None` is the invalid value and every
//! derived operation passes it through. [`Theory`] wraps the same
//! operations with configuration, caching and `Result` variants.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod interval;
pub mod note;
pub mod pcset;
pub mod property;
pub mod theory;
pub mod tokenizer;

pub use config::TheoryConfig;
pub use dictionary::{Chord, ChordIndex, CustomDefinition, Scale, ScaleIndex};
pub use error::TheoryError;
pub use interval::{Interval, IntervalProperty};
pub use note::{Note, NoteProperty, NoteSource};
pub use pcset::PitchClassSet;
pub use property::PropertyValue;
pub use theory::Theory;
