use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro128StarStar;
use tightloop::sampler::BitmaskSampler;
use tightloop::{do_not_optimize_away, Bench, Stats};

fn bench_barrier(c: &mut Criterion) {
    let mut group = c.benchmark_group("barrier");
    let word = 0xdead_beefusize;
    let float = 1.5f64;
    let wide = [7u64; 8];
    let owned = String::from("kept alive");

    group.bench_function("register_word", |b| b.iter(|| do_not_optimize_away(&word)));
    group.bench_function("register_f64", |b| b.iter(|| do_not_optimize_away(&float)));
    group.bench_function("memory_wide", |b| b.iter(|| do_not_optimize_away(&wide)));
    group.bench_function("memory_drop", |b| b.iter(|| do_not_optimize_away(&owned)));
    group.finish();
}

fn bench_reduction(c: &mut Criterion) {
    let mut rng = Xoshiro128StarStar::seed_from_u64(0x2323);
    let sampler = BitmaskSampler::new(1_000u32, 50_000).unwrap();
    let raw: Vec<f64> = (0..1_001).map(|_| f64::from(sampler.draw(&mut rng))).collect();

    c.bench_function("stats_from_samples_1001", |b| {
        b.iter(|| Stats::from_samples(black_box(&raw), 1_000, 0.0))
    });
}

fn bench_driver(c: &mut Criterion) {
    let mut group = c.benchmark_group("driver");
    group.sample_size(20);
    group.bench_function("run_100x5", |b| {
        b.iter(|| {
            // Small loops so the outer harness stays fast.
            let mut bench = Bench::new();
            bench.i(100).o(5).run("add", || black_box(3u64) + 4);
            black_box(bench.average())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_barrier, bench_reduction, bench_driver);
criterion_main!(benches);
