// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note names and their derived properties.
//!
//! This module provides the static note tables and the engine that turns
//! a note name, MIDI number or frequency into a canonical [`Note`].

pub mod engine;
pub mod theory;

pub use engine::{enharmonic, simplify, transpose, Note, NoteProperty, NoteSource};
