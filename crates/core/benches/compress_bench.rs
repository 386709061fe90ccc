//! Benchmark for single-block compression against the sha2 reference

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sha256_block_core::{BLOCK_SIZE, compress, compress_many, reference_compress, reference_digest};

fn bench_single_block(c: &mut Criterion) {
    let block = [b'a'; BLOCK_SIZE];

    let mut group = c.benchmark_group("single_block");
    group.throughput(Throughput::Bytes(BLOCK_SIZE as u64));
    group.bench_function("compress", |b| b.iter(|| compress(black_box(&block))));
    group.bench_function("sha2_compress256", |b| {
        b.iter(|| reference_compress(black_box(&block)))
    });
    group.bench_function("sha2_full_digest", |b| {
        b.iter(|| reference_digest(black_box(&block)))
    });
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");

    for count in [64usize, 4096] {
        let blocks: Vec<[u8; BLOCK_SIZE]> = (0..count)
            .map(|i| {
                let mut block = [b'a'; BLOCK_SIZE];
                block[..8].copy_from_slice(&(i as u64).to_le_bytes());
                block
            })
            .collect();

        group.throughput(Throughput::Bytes((count * BLOCK_SIZE) as u64));
        group.bench_with_input(BenchmarkId::new("compress_many", count), &blocks, |b, blocks| {
            b.iter(|| compress_many(black_box(blocks)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_block, bench_batch);
criterion_main!(benches);
