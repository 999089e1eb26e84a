// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ideagraph_geometry::{PlacementParams, find_valid_spot};
use ideagraph_store::{IdeaStore, Seed};
use kurbo::Rect;

const IDEA_W: f64 = 320.0;
const IDEA_H: f64 = 220.0;

fn gen_grid_rects(n: usize, pitch: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * pitch;
            let y0 = y as f64 * pitch;
            out.push(Rect::new(x0, y0, x0 + IDEA_W, y0 + IDEA_H));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_desired(count: usize, extent: f64, seed: u64) -> Vec<Rect> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * extent;
            let y0 = rng.next_f64() * extent;
            Rect::new(x0, y0, x0 + IDEA_W, y0 + IDEA_H)
        })
        .collect()
}

fn bench_find_valid_spot(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_valid_spot");
    let params = PlacementParams::default();
    for &n in &[4usize, 8, 16] {
        // Sparse grid with room between ideas: candidates succeed after a few rings.
        let existing = gen_grid_rects(n, 800.0);
        let desired = Rect::new(10.0, 10.0, 10.0 + IDEA_W, 10.0 + IDEA_H);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("sparse_n{}", n), |b| {
            b.iter(|| black_box(find_valid_spot(black_box(desired), &existing, params)));
        });
    }
    // Packed grid: no candidate within reach, every ring is scanned.
    let packed = gen_grid_rects(24, 340.0);
    let desired = Rect::new(3000.0, 3000.0, 3000.0 + IDEA_W, 3000.0 + IDEA_H);
    group.bench_function("packed_exhausted", |b| {
        b.iter(|| black_box(find_valid_spot(black_box(desired), &packed, params)));
    });
    group.finish();
}

fn bench_store_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_create");
    for &count in &[32usize, 128] {
        let desired = gen_desired(count, 2000.0, 0x1dea_5eed);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("random_n{}", count), |b| {
            b.iter_batched(
                IdeaStore::new,
                |mut store| {
                    for r in desired.iter().copied() {
                        let _ = store.create(r, Seed::Placement);
                    }
                    black_box(store.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_find_valid_spot, bench_store_create);
criterion_main!(benches);
