// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use understory_sheet::{
    AnimationId, Axis, FloatingSheet, FrameDriver, Gesture, GestureTracker, PositionRule,
    SheetApplier, SheetConfig, SheetContext, SheetLayout, SheetState, StateCatalog, selector,
};

/// Applier that only keeps the latest frame, like a host writing to a view.
struct Sink {
    ctx: SheetContext,
    frame_y: f64,
}

impl SheetApplier for Sink {
    fn current_context(&self) -> SheetContext {
        self.ctx.clone()
    }

    fn apply_state(
        &mut self,
        state: &SheetState,
        ctx: &SheetContext,
        _animated: bool,
        _animation: Option<AnimationId>,
    ) {
        self.frame_y = state.anchor(ctx).y;
    }

    fn apply_progress(&mut self, layout: &SheetLayout, _progress: f64) {
        self.frame_y = layout.frame.y0;
    }
}

/// `n` evenly spaced bottom bands in an 800-unit tall surface.
fn stepped_catalog(n: usize) -> StateCatalog {
    let step = 800.0 / n as f64;
    StateCatalog::new((0..n).map(|i| {
        SheetState::new(
            format!("s{i}"),
            PositionRule::bottom_band(step * (i + 1) as f64),
        )
        .with_gravity(1.0 + (i % 3) as f64)
    }))
    .unwrap()
}

fn bench_target_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet/select");
    let ctx = SheetContext::new(Size::new(400.0, 800.0));

    for n in [3usize, 8, 32] {
        let catalog = stepped_catalog(n);
        let middle = catalog.as_slice()[n / 2].id.clone();

        group.bench_with_input(BenchmarkId::new("closest", n), &catalog, |b, catalog| {
            b.iter(|| {
                black_box(selector::closest_state(
                    catalog,
                    &ctx,
                    black_box(Point::new(0.0, 333.0)),
                    None,
                ))
            });
        });

        group.bench_with_input(BenchmarkId::new("direction", n), &catalog, |b, catalog| {
            b.iter(|| {
                black_box(selector::next_state_in_direction(
                    catalog,
                    &ctx,
                    &middle,
                    black_box(Vec2::new(0.0, -200.0)),
                    Axis::Vertical,
                ))
            });
        });
    }

    group.finish();
}

fn bench_drag_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet/drag");

    for samples in [16usize, 120] {
        group.bench_with_input(
            BenchmarkId::new("drag_release_settle", samples),
            &samples,
            |b, &samples| {
                b.iter_batched(
                    || {
                        FloatingSheet::new(
                            Sink {
                                ctx: SheetContext::new(Size::new(400.0, 800.0)),
                                frame_y: 0.0,
                            },
                            FrameDriver::default(),
                            SheetConfig::default(),
                        )
                        .with_states(stepped_catalog(3))
                    },
                    |mut sheet| {
                        let mut tracker = GestureTracker::default();
                        let mut y = 560.0;
                        let start = tracker.start(Point::new(200.0, y), 0.0);
                        sheet.began(&Gesture::new(start.position, Vec2::new(0.0, -1.0)));
                        let dy = 200.0 / samples as f64;
                        let mut t = 0.0;
                        for _ in 0..samples {
                            t += 1.0 / 120.0;
                            y -= dy;
                            if let Some(g) = tracker.update(Point::new(200.0, y), t) {
                                sheet.changed(&g);
                            }
                        }
                        if let Some(g) = tracker.end(Point::new(200.0, y), t + 1.0 / 120.0) {
                            sheet.ended(&g);
                        }
                        while sheet.machine().is_transitioning() {
                            sheet.advance(1.0 / 120.0);
                        }
                        black_box(sheet.applier().frame_y);
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_target_selection, bench_drag_cycle);
criterion_main!(benches);
