// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Interval names and interval arithmetic.
//!
//! Intervals are written number-first ("3M", "-5P") or quality-first
//! ("M3", "P-5"). Both forms parse to the same canonical [`Interval`].

pub mod engine;
pub mod theory;

pub use engine::{add, build, distance, invert, simplify, Interval, IntervalBuild, IntervalProperty};
pub use theory::{IntervalKind, Quality};
