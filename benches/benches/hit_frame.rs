// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use strata_benches::{Rng, gen_points, gen_widget_bounds, world_for};
use strata_hit::{Bounds, ChurnPolicy, HitTestConfig, HitTestSystem};

const MAX_SIZE: f64 = 80.0;

fn populated(bounds: &[Bounds<f64>], config: HitTestConfig) -> HitTestSystem<u32> {
    let mut sys = HitTestSystem::with_config(config);
    for (i, b) in bounds.iter().enumerate() {
        sys.insert_widget(i as u32, *b, (i % 4) as i32).unwrap();
    }
    sys
}

fn bench_widget_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("widget_at");
    for &n in &[1_000usize, 10_000, 100_000] {
        let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
        let world = world_for(n, MAX_SIZE);
        let bounds = gen_widget_bounds(&mut rng, n, world, MAX_SIZE);
        let points = gen_points(&mut rng, 1000, world);
        let sys = populated(&bounds, HitTestConfig::default());
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(BenchmarkId::new("dual_interval", n), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for &(x, y) in &points {
                    hits += usize::from(sys.widget_at(x, y).is_some());
                }
                black_box(hits)
            })
        });
        if n <= 10_000 {
            group.bench_function(BenchmarkId::new("linear_scan", n), |b| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for &(x, y) in &points {
                        hits += usize::from(bounds.iter().any(|r| r.contains_point(x, y)));
                    }
                    black_box(hits)
                })
            });
        }
    }
    group.finish();
}

fn bench_sync_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_frame");
    for &n in &[1_000usize, 10_000] {
        let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
        let world = world_for(n, MAX_SIZE);
        let bounds = gen_widget_bounds(&mut rng, n, world, MAX_SIZE);
        // Every widget moves slightly, as under an animated relayout.
        let moved: Vec<(u32, Bounds<f64>, i32)> = bounds
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let d = rng.next_f64() * 4.0;
                let nb = Bounds::new(b.min_x + d, b.min_y + d, b.max_x + d, b.max_y + d);
                (i as u32, nb, (i % 4) as i32)
            })
            .collect();
        group.throughput(Throughput::Elements(n as u64));
        for (name, churn) in [
            ("incremental", ChurnPolicy::Incremental),
            (
                "rebuild",
                ChurnPolicy::Rebuild {
                    min_changed_percent: 50,
                },
            ),
        ] {
            let config = HitTestConfig::default().with_churn(churn);
            group.bench_function(BenchmarkId::new(name, n), |b| {
                b.iter_batched(
                    || (populated(&bounds, config), moved.clone()),
                    |(mut sys, frame)| {
                        let report = sys.sync_frame(frame).unwrap();
                        black_box(report);
                        sys
                    },
                    BatchSize::LargeInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_widget_at, bench_sync_frame);
criterion_main!(benches);
