// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for chordscope
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Note parsing
//! - Chord identification
//! - Joint enharmonic simplification up to the search cap
//! - Keyboard lookups

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chordscope::analysis::{analyze, ChordRequest};
use chordscope::keyboard::{equivalents, KeyId, Keyboard};
use chordscope::music::{identify, simplify, Pitch};

const TOKENS: [&str; 8] = ["C4", "eb4", "g#3", "B--2", "f4##", "a", "Dbbb5", "e#6"];

/// Benchmark note token parsing
fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_tokens", |b| {
        b.iter(|| {
            for token in TOKENS {
                black_box(Pitch::parse(black_box(token)).ok());
            }
        })
    });
}

/// Benchmark chord naming for common chord sizes
fn bench_identify(c: &mut Criterion) {
    let mut group = c.benchmark_group("identify");

    let chords: [(&str, &[&str]); 4] = [
        ("triad", &["C4", "E4", "G4"]),
        ("seventh", &["F3", "G3", "B3", "D4"]),
        ("eleventh", &["C3", "E3", "G3", "Bb3", "D4", "F4"]),
        ("cluster", &["C4", "C#4", "D4", "D#4", "E4"]),
    ];

    for (name, notes) in chords {
        let pitches: Vec<Pitch> = notes.iter().filter_map(|n| Pitch::parse(n).ok()).collect();
        group.bench_with_input(BenchmarkId::new("spelled", name), &pitches, |b, pitches| {
            b.iter(|| black_box(identify(black_box(pitches), false).ok()))
        });
        group.bench_with_input(BenchmarkId::new("simplified", name), &pitches, |b, pitches| {
            b.iter(|| black_box(identify(black_box(pitches), true).ok()))
        });
    }

    group.finish();
}

/// Benchmark the joint simplifier as the pitch count approaches the cap
fn bench_simplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify");

    // Every pitch here has two single-accidental spellings
    let pool = ["C#", "Eb", "F#", "Ab", "Bb", "E#", "Cb", "B#"];
    for size in [4usize, 8, 12, 16] {
        let pitches: Vec<Pitch> = (0..size)
            .filter_map(|i| {
                let name = format!("{}{}", pool[i % pool.len()], 1 + i / pool.len());
                Pitch::parse(&name).ok()
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("joint", size), &pitches, |b, pitches| {
            b.iter(|| black_box(simplify(black_box(pitches))))
        });
    }

    group.finish();
}

/// Benchmark keyboard forward, reverse and equivalent lookups
fn bench_keyboard(c: &mut Criterion) {
    let keyboard = Keyboard::global();

    c.bench_function("keyboard_forward", |b| {
        b.iter(|| black_box(keyboard.forward(black_box("Db4"))))
    });

    c.bench_function("keyboard_reverse", |b| {
        b.iter(|| black_box(keyboard.reverse(black_box(KeyId::black(24)), true)))
    });

    let clicked = Pitch::parse("C4").ok();
    c.bench_function("equivalents", |b| {
        b.iter(|| clicked.as_ref().map(|p| black_box(equivalents(black_box(p)))))
    });
}

/// Benchmark a full request from raw tokens to display text
fn bench_request(c: &mut Criterion) {
    let request = ChordRequest::new(["b3", "d4", "f4", "a-4"]).with_key("C");
    c.bench_function("analyze_request", |b| {
        b.iter(|| {
            analyze(black_box(&request))
                .map(|report| black_box(report.relationship_text()))
                .ok()
        })
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_identify,
    bench_simplify,
    bench_keyboard,
    bench_request,
);

criterion_main!(benches);
