// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree insert, pair enumeration, and shape queries against brute-force scans.

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{QuadTree, Rect};

const WORLD: f64 = 2000.0;

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

fn gen_random_rects(count: usize, rect_w: f64, rect_h: f64) -> Vec<Rect<f64>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (WORLD - rect_w);
        let y0 = rng.next_f64() * (WORLD - rect_h);
        out.push(Rect::new(x0, y0, rect_w, rect_h));
    }
    out
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Rect<f64>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((
            rng.next_f64() * (WORLD - spread) + spread / 2.0,
            rng.next_f64() * (WORLD - spread) + spread / 2.0,
        ));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Rect::new(cx + dx, cy + dy, 8.0, 8.0));
        }
    }
    out
}

fn build(rects: &[Rect<f64>]) -> QuadTree<f64, u32> {
    let mut tree = QuadTree::new(8, 8, Rect::new(0.0, 0.0, WORLD, WORLD));
    for (i, r) in rects.iter().copied().enumerate() {
        let _ = tree.insert(r, i as u32);
    }
    tree
}

fn brute_force_pairs(rects: &[Rect<f64>]) -> usize {
    let mut count = 0;
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            if a.intersects(b) {
                count += 1;
            }
        }
    }
    count
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_insert");
    for &n in &[1024usize, 4096, 16384] {
        let rects = gen_random_rects(n, 12.0, 12.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("random_n{}", n), |b| {
            b.iter(|| black_box(build(&rects)).node_count())
        });
    }
    let rects = gen_clustered_rects(16, 512, 120.0);
    group.bench_function("clustered_n8192", |b| {
        b.iter(|| black_box(build(&rects)).node_count())
    });
    group.finish();
}

fn bench_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_pairs");
    for &n in &[1024usize, 4096] {
        let rects = gen_random_rects(n, 16.0, 16.0);
        let tree = build(&rects);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("quadtree_n{}", n), |b| {
            b.iter(|| {
                let mut count = 0usize;
                tree.each_collision(|_, _| count += 1);
                black_box(count)
            })
        });
        group.bench_function(format!("brute_force_n{}", n), |b| {
            b.iter(|| black_box(brute_force_pairs(&rects)))
        });
    }

    // Per-frame pattern: rebuild from scratch, then enumerate.
    let rects = gen_clustered_rects(16, 256, 120.0);
    group.bench_function("frame_build_and_pairs_clustered", |b| {
        b.iter_batched(
            QuadTree::<f64, u32>::default,
            |mut tree| {
                tree.initialize(8, 8, Rect::new(0.0, 0.0, WORLD, WORLD));
                for (i, r) in rects.iter().copied().enumerate() {
                    let _ = tree.insert(r, i as u32);
                }
                let mut count = 0usize;
                tree.each_collision(|_, _| count += 1);
                black_box(count);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape_query");
    let rects = gen_random_rects(16384, 12.0, 12.0);
    let tree = build(&rects);
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let queries: Vec<Rect<f64>> = (0..256)
        .map(|_| {
            Rect::new(
                rng.next_f64() * (WORLD - 100.0),
                rng.next_f64() * (WORLD - 100.0),
                100.0,
                100.0,
            )
        })
        .collect();

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("quadtree_256_queries", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in &queries {
                total += tree.query(q).count();
            }
            black_box(total)
        })
    });
    group.bench_function("quadtree_256_queries_callback", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in &queries {
                tree.each_collision_with(q, |_| total += 1);
            }
            black_box(total)
        })
    });
    group.bench_function("brute_force_256_queries", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in &queries {
                total += rects.iter().filter(|r| q.intersects(r)).count();
            }
            black_box(total)
        })
    });
    group.finish();
}

fn bench_maintenance(c: &mut Criterion) {
    let mut group = c.benchmark_group("maintenance");
    let rects = gen_random_rects(8192, 12.0, 12.0);
    group.bench_function("remove_half", |b| {
        b.iter_batched(
            || build(&rects),
            |mut tree| black_box(tree.remove_if(|e| e.obj % 2 == 0)),
            BatchSize::SmallInput,
        )
    });
    group.bench_function("remove_half_then_rebuild", |b| {
        b.iter_batched(
            || build(&rects),
            |mut tree| {
                let _ = tree.remove_if(|e| e.obj % 2 == 0);
                tree.rebuild();
                black_box(tree.node_count())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_pairs,
    bench_query,
    bench_maintenance
);
criterion_main!(benches);
