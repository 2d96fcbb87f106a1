//! Encode/decode throughput on a synthetic document.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jast_core::{decode, decode_lenient, encode, Field, Value};
use std::hint::black_box;

/// An array of `rows` flat records, the shape of a typical API listing.
fn records(rows: usize) -> Value {
    Value::array((0..rows).map(|i| {
        Value::object([
            Field::new("id", i as i64),
            Field::new("name", format!("record-{i}")),
            Field::new("score", i as f64 / 7.0),
            Field::new("active", i % 3 == 0),
            Field::new("tags", Value::array(["alpha", "beta \"quoted\""])),
            Field::new("parent", Value::Null),
        ])
    }))
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for rows in [10usize, 1_000] {
        let value = records(rows);
        let json = encode(&value).expect("benchmark document must encode");
        group.throughput(Throughput::Bytes(json.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode", rows), &value, |b, value| {
            b.iter(|| encode(black_box(value)))
        });
        group.bench_with_input(BenchmarkId::new("decode", rows), &json, |b, json| {
            b.iter(|| decode(black_box(json)))
        });
        group.bench_with_input(BenchmarkId::new("decode_lenient", rows), &json, |b, json| {
            b.iter(|| decode_lenient(black_box(json)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
