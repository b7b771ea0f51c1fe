// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for tonal
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Note and interval name parsing
//! - Pitch class set algebra
//! - Scale and chord lookup
//! - Cached lookups through the facade

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tonal::interval;
use tonal::pcset;
use tonal::{ChordIndex, Interval, Note, PitchClassSet, ScaleIndex, Theory};

/// Benchmark note name parsing (regex tokenizing plus derivation)
fn bench_note_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("note_parsing");

    for name in ["C4", "eb", "F##-1", "Gx3", "not a note"] {
        group.bench_with_input(BenchmarkId::new("from_name", name), name, |b, name| {
            b.iter(|| black_box(Note::from_name(black_box(name))))
        });
    }

    group.bench_function("from_midi_all", |b| {
        b.iter(|| {
            for midi in 0..=127 {
                black_box(Note::from_midi(midi, true));
            }
        })
    });

    group.bench_function("from_frequency", |b| {
        b.iter(|| black_box(Note::from_frequency(black_box(261.63), 440.0)))
    });

    group.finish();
}

/// Benchmark interval parsing and arithmetic
fn bench_interval_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval");

    group.bench_function("from_name_tonal", |b| {
        b.iter(|| black_box(Interval::from_name(black_box("-10m"))))
    });
    group.bench_function("from_name_quality_first", |b| {
        b.iter(|| black_box(Interval::from_name(black_box("m-10"))))
    });
    group.bench_function("invert", |b| {
        b.iter(|| black_box(interval::invert(black_box("4A"))))
    });
    group.bench_function("distance", |b| {
        b.iter(|| black_box(interval::distance(black_box("C4"), black_box("F#5"))))
    });

    group.finish();
}

/// Benchmark pitch class set operations on masks and chroma strings
fn bench_pcset(c: &mut Criterion) {
    let mut group = c.benchmark_group("pcset");
    let major = PitchClassSet::from_chroma("101011010101").unwrap_or_default();

    group.bench_function("chroma_from_notes", |b| {
        b.iter(|| black_box(pcset::chroma_from_notes(black_box(&["C", "E", "G", "B"][..]))))
    });
    group.bench_function("modes", |b| b.iter(|| black_box(major.modes(true))));
    group.bench_function("normalize_str", |b| {
        b.iter(|| black_box(pcset::normalize(black_box("000101011010"))))
    });
    group.bench_function("subset_all", |b| {
        b.iter(|| {
            let mut count = 0;
            for num in 0..4096u16 {
                if let Some(set) = PitchClassSet::from_num(num) {
                    if set.is_subset_of(&major) {
                        count += 1;
                    }
                }
            }
            black_box(count)
        })
    });

    group.finish();
}

/// Benchmark dictionary lookup and chord detection
fn bench_dictionary(c: &mut Criterion) {
    let mut group = c.benchmark_group("dictionary");
    let scales = ScaleIndex::builtin();
    let chords = ChordIndex::builtin();

    group.bench_function("scale_get", |b| {
        b.iter(|| black_box(scales.get(black_box("Eb4 harmonic minor"))))
    });
    group.bench_function("scale_lookup_chroma", |b| {
        b.iter(|| black_box(scales.lookup_chroma(black_box("101101011010"))))
    });
    group.bench_function("chord_get", |b| {
        b.iter(|| black_box(chords.get(black_box("Bbm7b5"))))
    });
    group.bench_function("detect", |b| {
        b.iter(|| black_box(chords.detect(black_box(&["E", "G", "Bb", "D"][..]))))
    });
    group.bench_function("extended", |b| {
        b.iter(|| black_box(scales.extended(black_box("major pentatonic")).len()))
    });

    group.finish();
}

/// Benchmark cached facade lookups against uncached parsing
fn bench_facade_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("facade");
    let theory = Theory::new();
    let names = ["C4", "Db4", "F#3", "Bb2", "Gx5"];

    group.bench_function("uncached", |b| {
        b.iter(|| {
            for name in names {
                black_box(Note::from_name(name));
            }
        })
    });
    group.bench_function("cached", |b| {
        b.iter(|| {
            for name in names {
                black_box(theory.note(name));
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_note_parsing,
    bench_interval_ops,
    bench_pcset,
    bench_dictionary,
    bench_facade_cache,
);

criterion_main!(benches);
