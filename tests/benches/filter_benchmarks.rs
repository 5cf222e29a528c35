//! # bloom-core Benchmarks
//!
//! Performance checks for the two hot paths:
//!
//! | Component | Operation | Expectation |
//! |-----------|-----------|-------------|
//! | HasherList | k-round hash | O(k * item length) |
//! | BloomFilter | add / contains | O(k * hash cost), no allocation beyond the index vec |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bloom_core::{BloomFilter, HashAlgorithm, HasherList};

fn bench_hasher_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("hasher-list");

    for algorithm in [
        HashAlgorithm::HmacSha256,
        HashAlgorithm::HmacSha512,
        HashAlgorithm::Murmur3,
        HashAlgorithm::SipHash24,
    ] {
        let hashers = HasherList::new(algorithm, 7, 9585).unwrap();
        group.bench_with_input(
            BenchmarkId::new("hash_7_rounds", algorithm.name()),
            &hashers,
            |b, hashers| b.iter(|| black_box(hashers.hash(b"benchmark item payload"))),
        );
    }

    group.finish();
}

fn bench_filter_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-filter");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add", |b| {
        let mut filter = BloomFilter::new(1_000_000, 0.01).unwrap();
        let mut next = 0u64;
        b.iter(|| {
            next = next.wrapping_add(1);
            filter.add(&next.to_be_bytes()).unwrap();
        })
    });

    let mut filter = BloomFilter::new(10_000, 0.01).unwrap();
    for i in 0..10_000u32 {
        filter.add(format!("member_{i}").as_bytes()).unwrap();
    }

    group.bench_function("contains_member", |b| {
        b.iter(|| black_box(filter.contains(b"member_5000").unwrap()))
    });
    group.bench_function("contains_absent", |b| {
        // Usually exits on the first clear bit.
        b.iter(|| black_box(filter.contains(b"absent_5000").unwrap()))
    });

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    let mut filter = BloomFilter::new(10_000, 0.01).unwrap();
    for i in 0..10_000u32 {
        filter.add(&i.to_be_bytes()).unwrap();
    }
    let json = serde_json::to_string(&filter).unwrap();

    group.throughput(Throughput::Bytes(json.len() as u64));
    group.bench_function("to_json", |b| {
        b.iter(|| black_box(serde_json::to_string(&filter).unwrap()))
    });
    group.bench_function("from_json", |b| {
        b.iter(|| black_box(serde_json::from_str::<BloomFilter>(&json).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_hasher_algorithms,
    bench_filter_operations,
    bench_serialization
);
criterion_main!(benches);
