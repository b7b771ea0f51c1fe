// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Canonical interval records and interval arithmetic.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::trace;

use super::theory::{
    alteration_to_quality, kind_of, quality_first_regex, quality_to_alteration, tonal_regex,
    IntervalKind, Quality, BASE_KIND, BASE_SIZE, CHROMA_NUMBERS, CHROMA_QUALITIES,
    INTERVAL_CLASS,
};
use crate::error::TheoryError;
use crate::note::Note;
use crate::property::PropertyValue;
use crate::tokenizer::tokenize_any;

/// Canonical, immutable property set of an interval such as "3M" or "-9m"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval {
    name: String,
    num: i32,
    quality: Quality,
    step: u8,
    #[serde(rename = "type")]
    kind: IntervalKind,
    direction: i32,
    octave: i32,
    alteration: i32,
    simple: i32,
    semitones: i32,
    chroma: u8,
    ic: u8,
}

/// Named interval properties, for callers that select a field at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalProperty {
    Name,
    Num,
    Quality,
    Step,
    Type,
    Direction,
    Octave,
    Alteration,
    Simple,
    Semitones,
    Chroma,
    Ic,
}

impl FromStr for IntervalProperty {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(IntervalProperty::Name),
            "num" | "number" => Ok(IntervalProperty::Num),
            "quality" | "q" => Ok(IntervalProperty::Quality),
            "step" => Ok(IntervalProperty::Step),
            "type" | "kind" => Ok(IntervalProperty::Type),
            "direction" | "dir" => Ok(IntervalProperty::Direction),
            "octave" | "oct" => Ok(IntervalProperty::Octave),
            "alteration" | "alt" => Ok(IntervalProperty::Alteration),
            "simple" => Ok(IntervalProperty::Simple),
            "semitones" | "size" => Ok(IntervalProperty::Semitones),
            "chroma" => Ok(IntervalProperty::Chroma),
            "ic" => Ok(IntervalProperty::Ic),
            _ => Err(TheoryError::UnknownProperty(s.to_string())),
        }
    }
}

/// Arguments for [`build`]. `step` wins over `num` when both are set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalBuild {
    /// Diatonic step 0-6
    pub step: Option<u8>,
    /// Interval number; negative means descending
    pub num: Option<i32>,
    pub alteration: i32,
    /// Octave count used with `step` (1 = simple)
    pub octave: i32,
    /// 1 ascending, -1 descending
    pub direction: i32,
}

impl Default for IntervalBuild {
    fn default() -> Self {
        Self {
            step: None,
            num: None,
            alteration: 0,
            octave: 1,
            direction: 1,
        }
    }
}

impl Interval {
    /// Parse "3M", "-5P", "M3", "P-5", "9m", "4AA" and so on
    pub fn from_name(name: &str) -> Option<Interval> {
        let Some(tokens) = tokenize_any(name, &[tonal_regex(), quality_first_regex()]) else {
            trace!(name, "not an interval name");
            return None;
        };
        let num: i32 = tokens.get("num").parse().ok()?;
        let quality = Quality::parse(tokens.get("quality"))?;
        if num == 0 {
            return None;
        }

        let magnitude = num.checked_abs()?;
        let step = ((magnitude - 1) % 7) as u8;
        let kind = BASE_KIND[step as usize];
        let Some(alteration) = quality_to_alteration(kind, quality) else {
            trace!(name, %kind, %quality, "quality does not exist for this step");
            return None;
        };

        let direction = num.signum();
        let simple = if magnitude == 8 {
            num
        } else {
            direction * (step as i32 + 1)
        };
        let octave = (magnitude - 1) / 7 + 1;
        let simple_width = BASE_SIZE[step as usize] + alteration;
        let width = (octave - 1).checked_mul(12)?.checked_add(simple_width)?;
        let semitones = direction * width;
        let chroma = (direction * simple_width).rem_euclid(12) as u8;
        let ic = INTERVAL_CLASS[chroma as usize];

        Some(Interval {
            name: format!("{}{}", num, quality),
            num,
            quality,
            step,
            kind,
            direction,
            octave,
            alteration,
            simple,
            semitones,
            chroma,
            ic,
        })
    }

    /// Canonical interval for a signed semitone count (6 gives "5d")
    pub fn from_semitones(semitones: i32) -> Option<Interval> {
        let direction = if semitones < 0 { -1 } else { 1 };
        let distance = semitones.unsigned_abs();
        let chroma = (distance % 12) as usize;
        let octave = i32::try_from(distance / 12).ok()?;
        let num = octave.checked_mul(7)?.checked_add(CHROMA_NUMBERS[chroma])?;
        Interval::from_name(&format!("{}{}", direction * num, CHROMA_QUALITIES[chroma]))
    }

    /// Interval covering the MIDI distance from `from` to `to`
    pub fn from_notes(from: &str, to: &str) -> Option<Interval> {
        let a = Note::from_name(from)?;
        let b = Note::from_name(to)?;
        Interval::from_semitones(b.midi().checked_sub(a.midi())?)
    }

    /// Spelled interval between two notes (C to D# is "2A", C to Eb is "3m").
    ///
    /// When either note is a bare pitch class the result is the ascending
    /// simple interval.
    pub fn between(from: &Note, to: &Note) -> Option<Interval> {
        let mut steps = to.diatonic_position()?.checked_sub(from.diatonic_position()?)?;
        let mut semitones = to.height()?.checked_sub(from.height()?)?;
        if from.is_pitch_class() || to.is_pitch_class() {
            let shift = steps.div_euclid(7);
            steps -= shift * 7;
            semitones = semitones.checked_sub(shift.checked_mul(12)?)?;
        }
        Interval::from_coordinates(steps, semitones)
    }

    /// Interval spanning `steps` letter names and `semitones` half steps
    fn from_coordinates(steps: i32, semitones: i32) -> Option<Interval> {
        let direction = if steps < 0 || (steps == 0 && semitones < 0) {
            -1
        } else {
            1
        };
        let steps = steps.checked_abs()?;
        let step = steps % 7;
        let octaves = steps / 7;
        let natural = octaves.checked_mul(12)?.checked_add(BASE_SIZE[step as usize])?;
        let alteration = (direction * semitones).checked_sub(natural)?;
        let name = build(IntervalBuild {
            num: Some(direction * (steps + 1)),
            alteration,
            ..IntervalBuild::default()
        })?;
        Interval::from_name(&name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signed interval number
    pub fn num(&self) -> i32 {
        self.num
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Diatonic step 0-6
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Base kind (perfect or major) of the step
    pub fn kind(&self) -> IntervalKind {
        self.kind
    }

    /// 1 ascending, -1 descending
    pub fn direction(&self) -> i32 {
        self.direction
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    pub fn alteration(&self) -> i32 {
        self.alteration
    }

    /// Number reduced to one octave, sign kept (8 stays 8)
    pub fn simple(&self) -> i32 {
        self.simple
    }

    pub fn semitones(&self) -> i32 {
        self.semitones
    }

    pub fn chroma(&self) -> u8 {
        self.chroma
    }

    /// Interval class 0-6
    pub fn ic(&self) -> u8 {
        self.ic
    }

    /// Get a property selected at runtime
    pub fn get(&self, property: IntervalProperty) -> PropertyValue {
        match property {
            IntervalProperty::Name => PropertyValue::Text(self.name.clone()),
            IntervalProperty::Num => PropertyValue::Integer(self.num as i64),
            IntervalProperty::Quality => PropertyValue::Text(self.quality.to_string()),
            IntervalProperty::Step => PropertyValue::Integer(self.step as i64),
            IntervalProperty::Type => PropertyValue::Text(self.kind.to_string()),
            IntervalProperty::Direction => PropertyValue::Integer(self.direction as i64),
            IntervalProperty::Octave => PropertyValue::Integer(self.octave as i64),
            IntervalProperty::Alteration => PropertyValue::Integer(self.alteration as i64),
            IntervalProperty::Simple => PropertyValue::Integer(self.simple as i64),
            IntervalProperty::Semitones => PropertyValue::Integer(self.semitones as i64),
            IntervalProperty::Chroma => PropertyValue::Integer(self.chroma as i64),
            IntervalProperty::Ic => PropertyValue::Integer(self.ic as i64),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Interval {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::from_name(s).ok_or_else(|| TheoryError::InvalidInterval(s.to_string()))
    }
}

/// Reduce to a simple interval ("9M" gives "2M", "-10m" gives "-3m")
pub fn simplify(name: &str) -> Option<String> {
    let interval = Interval::from_name(name)?;
    Some(format!("{}{}", interval.simple, interval.quality))
}

/// Invert within the octave ("3m" gives "6M", "4A" gives "5d")
pub fn invert(name: &str) -> Option<String> {
    let interval = Interval::from_name(name)?;
    let step = (7 - interval.step) % 7;
    let alteration = match interval.kind {
        IntervalKind::Perfect => -interval.alteration,
        IntervalKind::Major => -(interval.alteration + 1),
    };
    build(IntervalBuild {
        step: Some(step),
        alteration,
        octave: interval.octave,
        direction: interval.direction,
        ..IntervalBuild::default()
    })
}

/// Build an interval name from step or number plus alteration
pub fn build(args: IntervalBuild) -> Option<String> {
    let num = match args.step {
        Some(step) if step > 6 => return None,
        Some(step) => (args.octave.checked_sub(1)?)
            .checked_mul(7)?
            .checked_add(step as i32 + 1)?,
        None => args.num?,
    };
    if num == 0 || (num < 0 && args.step.is_some()) {
        return None;
    }
    let descending = num < 0 || args.direction < 0;
    let magnitude = num.checked_abs()?;
    let quality = alteration_to_quality(kind_of(magnitude), args.alteration)?;
    let sign = if descending { "-" } else { "" };
    Some(format!("{}{}{}", sign, magnitude, quality))
}

/// Spelled interval between two note names
pub fn distance(from: &str, to: &str) -> Option<String> {
    let a = Note::from_name(from)?;
    let b = Note::from_name(to)?;
    Interval::between(&a, &b).map(|i| i.name)
}

/// Sum of two intervals, spelled ("3M" + "3m" gives "5P")
pub fn add(a: &str, b: &str) -> Option<String> {
    let a = Interval::from_name(a)?;
    let b = Interval::from_name(b)?;
    let steps = a.direction * (a.num.abs() - 1) + b.direction * (b.num.abs() - 1);
    let semitones = a.semitones.checked_add(b.semitones)?;
    Interval::from_coordinates(steps, semitones).map(|i| i.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_major_third() {
        let i = Interval::from_name("3M").unwrap();
        assert_eq!(i.name(), "3M");
        assert_eq!(i.num(), 3);
        assert_eq!(i.quality(), Quality::Major);
        assert_eq!(i.step(), 2);
        assert_eq!(i.kind(), IntervalKind::Major);
        assert_eq!(i.direction(), 1);
        assert_eq!(i.octave(), 1);
        assert_eq!(i.alteration(), 0);
        assert_eq!(i.simple(), 3);
        assert_eq!(i.semitones(), 4);
        assert_eq!(i.chroma(), 4);
        assert_eq!(i.ic(), 4);
    }

    #[test]
    fn test_from_name_perfect_fifth() {
        let i = Interval::from_name("5P").unwrap();
        assert_eq!(i.step(), 4);
        assert_eq!(i.kind(), IntervalKind::Perfect);
        assert_eq!(i.semitones(), 7);
        assert_eq!(i.chroma(), 7);
        assert_eq!(i.ic(), 5);
    }

    #[test]
    fn test_quality_first_notation() {
        let a = Interval::from_name("M3").unwrap();
        let b = Interval::from_name("3M").unwrap();
        assert_eq!(a, b);

        let i = Interval::from_name("P-5").unwrap();
        assert_eq!(i.name(), "-5P");
        assert_eq!(i.semitones(), -7);
        assert_eq!(i.chroma(), 5);
        assert_eq!(i.ic(), 5);

        let i = Interval::from_name("+3m").unwrap();
        assert_eq!(i.name(), "3m");
    }

    #[test]
    fn test_compound_and_descending() {
        let i = Interval::from_name("9m").unwrap();
        assert_eq!(i.step(), 1);
        assert_eq!(i.octave(), 2);
        assert_eq!(i.simple(), 2);
        assert_eq!(i.semitones(), 13);
        assert_eq!(i.chroma(), 1);

        let i = Interval::from_name("8P").unwrap();
        assert_eq!(i.simple(), 8);
        assert_eq!(i.semitones(), 12);
        assert_eq!(i.chroma(), 0);

        let i = Interval::from_name("-2M").unwrap();
        assert_eq!(i.direction(), -1);
        assert_eq!(i.simple(), -2);
        assert_eq!(i.semitones(), -2);
        assert_eq!(i.chroma(), 10);
        assert_eq!(i.ic(), 2);

        let i = Interval::from_name("15P").unwrap();
        assert_eq!(i.octave(), 3);
        assert_eq!(i.semitones(), 24);
    }

    #[test]
    fn test_altered_qualities() {
        assert_eq!(Interval::from_name("4A").unwrap().semitones(), 6);
        assert_eq!(Interval::from_name("5d").unwrap().semitones(), 6);
        assert_eq!(Interval::from_name("7d").unwrap().semitones(), 9);
        assert_eq!(Interval::from_name("3dd").unwrap().alteration(), -3);
        assert_eq!(Interval::from_name("5AA").unwrap().semitones(), 9);
    }

    #[test]
    fn test_from_name_invalid() {
        for name in ["", "3", "M", "0P", "3P", "5M", "4m", "3MM", "3AAAAA", "3M ", "x3M", "P"] {
            assert!(Interval::from_name(name).is_none(), "{name:?} should be rejected");
        }
        assert!(Interval::from_name("99999999999P").is_none());
    }

    #[test]
    fn test_from_semitones() {
        assert_eq!(Interval::from_semitones(0).unwrap().name(), "1P");
        assert_eq!(Interval::from_semitones(4).unwrap().name(), "3M");
        assert_eq!(Interval::from_semitones(6).unwrap().name(), "5d");
        assert_eq!(Interval::from_semitones(12).unwrap().name(), "8P");
        assert_eq!(Interval::from_semitones(14).unwrap().name(), "9M");
        assert_eq!(Interval::from_semitones(-3).unwrap().name(), "-3m");
        assert_eq!(Interval::from_semitones(-12).unwrap().name(), "-8P");
        for n in -30..30 {
            assert_eq!(Interval::from_semitones(n).unwrap().semitones(), n);
        }
    }

    #[test]
    fn test_from_notes() {
        assert_eq!(Interval::from_notes("C4", "G4").unwrap().name(), "5P");
        assert_eq!(Interval::from_notes("C4", "C#4").unwrap().name(), "2m");
        assert_eq!(Interval::from_notes("G4", "C4").unwrap().name(), "-5P");
        assert!(Interval::from_notes("C4", "nope").is_none());
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance("C4", "Eb4").as_deref(), Some("3m"));
        assert_eq!(distance("C4", "D#4").as_deref(), Some("2A"));
        assert_eq!(distance("C4", "B3").as_deref(), Some("-2m"));
        assert_eq!(distance("C4", "C5").as_deref(), Some("8P"));
        assert_eq!(distance("C4", "E5").as_deref(), Some("10M"));
        assert_eq!(distance("E", "C").as_deref(), Some("6m"));
        assert_eq!(distance("C", "F#").as_deref(), Some("4A"));
    }

    #[test]
    fn test_simplify() {
        assert_eq!(simplify("9M").as_deref(), Some("2M"));
        assert_eq!(simplify("-10m").as_deref(), Some("-3m"));
        assert_eq!(simplify("8P").as_deref(), Some("8P"));
        assert_eq!(simplify("3M").as_deref(), Some("3M"));
        assert_eq!(simplify("nope"), None);
    }

    #[test]
    fn test_invert() {
        assert_eq!(invert("3m").as_deref(), Some("6M"));
        assert_eq!(invert("3M").as_deref(), Some("6m"));
        assert_eq!(invert("4P").as_deref(), Some("5P"));
        assert_eq!(invert("4A").as_deref(), Some("5d"));
        assert_eq!(invert("2m").as_deref(), Some("7M"));
        assert_eq!(invert("1P").as_deref(), Some("1P"));
        assert_eq!(invert("-3M").as_deref(), Some("-6m"));
        assert_eq!(invert("10M").as_deref(), Some("13m"));
    }

    #[test]
    fn test_build() {
        let b = |step, alteration| {
            build(IntervalBuild {
                step: Some(step),
                alteration,
                ..IntervalBuild::default()
            })
        };
        assert_eq!(b(2, 0).as_deref(), Some("3M"));
        assert_eq!(b(2, -1).as_deref(), Some("3m"));
        assert_eq!(b(4, -1).as_deref(), Some("5d"));
        assert_eq!(b(1, -2).as_deref(), Some("2d"));
        assert_eq!(b(3, 1).as_deref(), Some("4A"));
        assert_eq!(b(7, 0), None);
        assert_eq!(b(4, -9), None);

        let descending = build(IntervalBuild {
            step: Some(4),
            octave: 2,
            direction: -1,
            ..IntervalBuild::default()
        });
        assert_eq!(descending.as_deref(), Some("-12P"));

        let by_num = build(IntervalBuild {
            num: Some(-9),
            alteration: -1,
            ..IntervalBuild::default()
        });
        assert_eq!(by_num.as_deref(), Some("-9m"));

        assert_eq!(build(IntervalBuild::default()), None);
    }

    #[test]
    fn test_add() {
        assert_eq!(add("3M", "3m").as_deref(), Some("5P"));
        assert_eq!(add("5P", "4P").as_deref(), Some("8P"));
        assert_eq!(add("3M", "-3M").as_deref(), Some("1P"));
        assert_eq!(add("2M", "-3m").as_deref(), Some("-2m"));
    }

    #[test]
    fn test_property_dispatch() {
        let i = Interval::from_name("6m").unwrap();
        assert_eq!(i.get(IntervalProperty::Semitones), PropertyValue::Integer(8));
        assert_eq!(i.get(IntervalProperty::Type), PropertyValue::Text("M".to_string()));
        assert_eq!("ic".parse::<IntervalProperty>(), Ok(IntervalProperty::Ic));
    }
}
