//! Benchmark – `bytecursor::{Reader, Writer}`
#![allow(missing_docs)]

use std::time::Duration;

use bytecursor::{BinaryRead, BinaryWrite, BufferPool, Reader, Writer};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Encode `records` fixed-shape records: a `u16` tag, an `i64`, an `f64` and
/// a short length-prefixed string.
fn encode(writer: &mut Writer, records: usize) {
    for i in 0..records {
        let i = i as u64;
        writer.write_u16((i % 7) as u16).unwrap();
        writer.write_i64(i.wrapping_mul(0x9e37_79b9) as i64).unwrap();
        writer.write_f64(i as f64 * 0.5).unwrap();
        writer.write_utf("record").unwrap();
    }
}

fn decode(bytes: &[u8], records: usize) -> u64 {
    let mut reader = Reader::new(bytes);
    let mut acc = 0u64;
    for _ in 0..records {
        acc = acc.wrapping_add(u64::from(reader.read_u16().unwrap()));
        acc = acc.wrapping_add(reader.read_i64().unwrap() as u64);
        acc = acc.wrapping_add(reader.read_f64().unwrap().to_bits());
        acc = acc.wrapping_add(reader.read_utf().unwrap().len() as u64);
    }
    acc
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for &records in &[16usize, 1_024, 65_536] {
        let mut sample = Writer::new();
        encode(&mut sample, records);
        let bytes = sample.finish();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("write_shared_pool", records), &records, |b, &n| {
            b.iter(|| {
                let mut writer = Writer::new();
                encode(&mut writer, black_box(n));
                black_box(writer.written());
            });
        });

        group.bench_with_input(BenchmarkId::new("write_reused", records), &records, |b, &n| {
            let mut writer = Writer::with_pool(BufferPool::new());
            b.iter(|| {
                writer.clear();
                encode(&mut writer, black_box(n));
                black_box(writer.written());
            });
        });

        group.bench_with_input(BenchmarkId::new("read", records), &bytes, |b, bytes| {
            b.iter(|| black_box(decode(black_box(bytes), records)));
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_codec }
criterion_main!(benches);
