//! Criterion benchmarks for representation conversion and minimization.
//! Focus dims: n in {2, 3}; sizes stay small because the hull kernel is
//! combinatorial.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use polytope::rand::{draw_box, draw_point_cloud, BoxCfg, ReplayToken};
use polytope::Polytope;

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    for &dim in &[2usize, 3] {
        group.bench_with_input(BenchmarkId::new("box_determine_v", dim), &dim, |bch, &dim| {
            bch.iter_batched(
                || {
                    let cfg = BoxCfg {
                        dim,
                        ..Default::default()
                    };
                    draw_box(cfg, ReplayToken { seed: 43, index: dim as u64 }).unwrap()
                },
                |mut p| {
                    p.determine_v_rep().unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(
            BenchmarkId::new("cloud_minimize_v", dim),
            &dim,
            |bch, &dim| {
                bch.iter_batched(
                    || {
                        let pts =
                            draw_point_cloud(dim, 24, 1.0, ReplayToken { seed: 44, index: dim as u64 });
                        Polytope::from_vertices(pts).unwrap()
                    },
                    |mut p| {
                        p.minimize_v_rep().unwrap();
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
