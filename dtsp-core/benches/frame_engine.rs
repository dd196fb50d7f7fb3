use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dtsp_core::{Engine, FixedClock};

fn bench_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("encrypt");

    for &size in &[16usize, 256, 4096] {
        let payload = vec![0x42u8; size];
        group.bench_with_input(BenchmarkId::new("payload_bytes", size), &payload, |b, payload| {
            let mut engine = Engine::init_with_clock(b"bench-seed".to_vec(), b"bench-udid".to_vec(), Arc::new(FixedClock::new(1_000)));
            b.iter(|| black_box(engine.encrypt(black_box(payload))));
        });
    }

    group.finish();
}

fn bench_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrypt");

    for &size in &[16usize, 256, 4096] {
        let payload = vec![0x42u8; size];
        group.bench_with_input(BenchmarkId::new("payload_bytes", size), &payload, |b, payload| {
            let clock = Arc::new(FixedClock::new(1_000));
            let mut sender = Engine::init_with_clock(b"bench-seed".to_vec(), b"bench-udid".to_vec(), clock.clone());
            b.iter_batched(
                || sender.encrypt(payload),
                |frame| {
                    let mut receiver = Engine::init_with_clock(b"bench-seed".to_vec(), b"bench-udid".to_vec(), clock.clone());
                    black_box(receiver.decrypt(black_box(&frame)).unwrap());
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encrypt, bench_decrypt);
criterion_main!(benches);
