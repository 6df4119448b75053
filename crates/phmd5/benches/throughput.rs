//! Throughput of the single-stream and dual-lane paths per backend.
//!
//! Run with: `cargo bench -p phmd5`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;

use phmd5::{Backend, DualHasher, Md5};

/// Generate random data of the specified size.
fn generate_random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut data = vec![0u8; size];
    rng.fill(&mut data[..]);
    data
}

fn bench_single_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_stream");

    for size in [64, 1024, 16384, 1 << 20] {
        let data = generate_random_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        for backend in Backend::available() {
            group.bench_with_input(BenchmarkId::new(backend.name(), size), &data, |b, data| {
                b.iter(|| {
                    let mut hasher = Md5::with_backend(backend);
                    hasher.update(black_box(data));
                    black_box(hasher.finalize())
                });
            });
        }
    }

    group.finish();
}

fn bench_dual_lane(c: &mut Criterion) {
    let mut group = c.benchmark_group("dual_lane");

    for size in [1024, 16384, 1 << 20] {
        let first = generate_random_data(size);
        let second = generate_random_data(size);
        // two streams per iteration
        group.throughput(Throughput::Bytes(2 * size as u64));

        for backend in Backend::available() {
            group.bench_function(BenchmarkId::new(backend.name(), size), |b| {
                b.iter(|| {
                    let mut pair = DualHasher::with_backend(backend);
                    pair.update(black_box(&first), black_box(&second));
                    black_box(pair.finalize())
                });
            });
        }
    }

    group.finish();
}

fn bench_zero_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("zero_fill");
    let size = 1u64 << 20;
    group.throughput(Throughput::Bytes(size));

    group.bench_function("update_zeros", |b| {
        b.iter(|| {
            let mut hasher = Md5::new();
            hasher.update_zeros(black_box(size));
            black_box(hasher.finalize())
        });
    });

    let zeros = vec![0u8; size as usize];
    group.bench_function("update", |b| {
        b.iter(|| {
            let mut hasher = Md5::new();
            hasher.update(black_box(&zeros));
            black_box(hasher.finalize())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_single_stream, bench_dual_lane, bench_zero_fill);
criterion_main!(benches);
