// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use collidoscope::kurbo::{BezPath, Circle, Shape};
use collidoscope::{
    CollisionEngine, GlyphCategory, GlyphPlacement, OverlapBackend, Position, RuleConfig,
    SlabDecomposition,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn disc() -> BezPath {
    Circle::new((300.0, 300.0), 300.0).to_path(0.1)
}

fn run(len: usize, advance: f64) -> Vec<GlyphPlacement> {
    let outline = disc();
    (0..len)
        .map(|i| {
            let position = Position::new(i as f64 * advance, 0.0, advance, 0.0);
            let glyph = GlyphPlacement::new(i, 1, &outline, position);
            if i % 4 == 3 {
                glyph.with_category(GlyphCategory::Mark)
            } else {
                glyph
            }
        })
        .collect()
}

fn overlap(c: &mut Criterion) {
    let mut g = c.benchmark_group("overlap");
    let backend = SlabDecomposition::default();
    let glyphs = run(2, 500.0);
    let (a, b) = (glyphs[0].outline(), glyphs[1].outline());

    g.bench_function("area", |bench| bench.iter(|| backend.area(black_box(a))));
    g.bench_function("intersection_area", |bench| {
        bench.iter(|| backend.intersection_area(black_box(a), black_box(b)));
    });
    g.bench_function("overlaps", |bench| {
        bench.iter(|| backend.overlaps(black_box(a), black_box(b)));
    });
    g.finish();
}

fn engine(c: &mut Criterion) {
    let mut g = c.benchmark_group("engine");
    let clean = run(8, 650.0);
    let crowded = run(8, 500.0);

    let config = RuleConfig::builder()
        .faraway(true)
        .marks(true)
        .area(0.05)
        .build()
        .unwrap();
    let engine = CollisionEngine::new(config);

    g.bench_function("clean_run", |bench| {
        bench.iter(|| engine.has_collisions(black_box(&clean)));
    });
    g.bench_function("first_hit", |bench| {
        bench.iter(|| engine.has_collisions(black_box(&crowded)));
    });
    g.bench_function("exhaustive", |bench| {
        bench.iter(|| engine.all_collisions(black_box(&crowded)));
    });
    g.finish();
}

criterion_group!(o, overlap);
criterion_group!(e, engine);
criterion_main!(o, e);
