//! Benchmarks for reader primitives and suggestion merging.

use cmdtree_text::{StringRange, StringReader, Suggestion, Suggestions};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A plain word followed by an argument
const UNQUOTED: &str = "minecraft:diamond_sword 64";

/// Quoted string with escapes
const QUOTED: &str = "\"a \\\"quoted\\\" phrase with \\\\ escapes\" tail";

/// Numeric literals
const NUMBERS: &str = "-2147483648 9223372036854775807 -123.45.6";

fn benchmark_reading(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reader");

    group.bench_function("unquoted", |b| {
        b.iter(|| {
            let mut reader = StringReader::new(black_box(UNQUOTED));
            black_box(reader.read_unquoted_string().len())
        })
    });

    group.bench_function("quoted", |b| {
        b.iter(|| {
            let mut reader = StringReader::new(black_box(QUOTED));
            black_box(reader.read_quoted_string().unwrap())
        })
    });

    group.bench_function("numbers", |b| {
        b.iter(|| {
            let mut reader = StringReader::new(black_box(NUMBERS));
            let int = reader.read_int().unwrap();
            reader.skip();
            let long = reader.read_long().unwrap();
            reader.skip();
            let bad = reader.read_double().is_err();
            black_box((int, long, bad))
        })
    });

    group.finish();
}

fn benchmark_merging(c: &mut Criterion) {
    let mut group = c.benchmark_group("Suggestions");
    let words: Vec<String> = (0..200).map(|i| format!("entry_{i:03}")).collect();

    group.bench_function("merge_200", |b| {
        b.iter(|| {
            let groups: Vec<Suggestions> = words
                .chunks(20)
                .map(|chunk| {
                    let list = chunk
                        .iter()
                        .map(|w| Suggestion::new(StringRange::between(3, 5), w.as_str()))
                        .collect();
                    Suggestions::create("tp en", list)
                })
                .collect();
            black_box(Suggestions::merge("tp en", groups))
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_reading, benchmark_merging);
criterion_main!(benches);
