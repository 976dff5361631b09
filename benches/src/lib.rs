// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared workload generators for the Strata benchmarks.

use strata_hit::Bounds;

/// Small xorshift generator; deterministic across runs and platforms.
#[derive(Clone, Debug)]
pub struct Rng(u64);

impl Rng {
    /// Seed the generator. The seed must be non-zero.
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next raw value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// `count` random widget rectangles on a `world` x `world` screen, each side up to `max_size`.
pub fn gen_widget_bounds(
    rng: &mut Rng,
    count: usize,
    world: f64,
    max_size: f64,
) -> Vec<Bounds<f64>> {
    (0..count)
        .map(|_| {
            let w = 1.0 + rng.next_f64() * max_size;
            let h = 1.0 + rng.next_f64() * max_size;
            Bounds::from_xywh(rng.next_f64() * world, rng.next_f64() * world, w, h)
        })
        .collect()
}

/// `count` random points on a `world` x `world` screen.
pub fn gen_points(rng: &mut Rng, count: usize, world: f64) -> Vec<(f64, f64)> {
    (0..count)
        .map(|_| (rng.next_f64() * world, rng.next_f64() * world))
        .collect()
}

/// World size that keeps the expected overlap per point roughly constant as `count` grows.
pub fn world_for(count: usize, max_size: f64) -> f64 {
    (count as f64).sqrt() * max_size * 0.5
}
