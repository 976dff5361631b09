// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use strata_benches::Rng;
use strata_interval::{Interval, IntervalTree};

fn gen_intervals(n: usize, max_len: f64) -> Vec<Interval<f64, u32>> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    // Scale the axis with n so each point is covered by a similar number of intervals.
    let world = n as f64 * max_len / 8.0;
    (0..n)
        .map(|i| {
            let low = rng.next_f64() * world;
            let len = rng.next_f64() * max_len;
            Interval::new(low, low + len, i as u32).unwrap()
        })
        .collect()
}

fn bench_stab_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_stab");
    for &n in &[1_000usize, 10_000, 100_000] {
        let intervals = gen_intervals(n, 40.0);
        let world = n as f64 * 40.0 / 8.0;
        let mut tree = IntervalTree::new();
        for iv in intervals.iter().copied() {
            tree.insert(iv);
        }
        let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
        let points: Vec<f64> = (0..1000).map(|_| rng.next_f64() * world).collect();
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(BenchmarkId::new("tree", n), |b| {
            b.iter(|| {
                let mut total = 0usize;
                for &p in &points {
                    tree.visit_stab(p, |_, _| total += 1);
                }
                black_box(total)
            })
        });
        group.bench_function(BenchmarkId::new("linear_scan", n), |b| {
            b.iter(|| {
                let mut total = 0usize;
                for &p in &points {
                    total += intervals.iter().filter(|iv| iv.contains(p)).count();
                }
                black_box(total)
            })
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_churn");
    for &n in &[1_000usize, 10_000, 100_000] {
        let intervals = gen_intervals(n, 40.0);
        let mut tree = IntervalTree::new();
        let mut keys: Vec<_> = intervals.iter().map(|iv| tree.insert(*iv)).collect();
        let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
        group.throughput(Throughput::Elements(1));
        group.bench_function(BenchmarkId::new("remove_insert", n), |b| {
            b.iter(|| {
                let i = (rng.next_u64() % n as u64) as usize;
                if let Ok(iv) = tree.remove(keys[i]) {
                    keys[i] = tree.insert(iv);
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stab_scaling, bench_churn);
criterion_main!(benches);
