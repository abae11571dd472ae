//! Benchmark for placement resolution and the tooltip layout pass.
//!
//! Run with: cargo bench --package hovertip --bench placement_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hovertip::layout::{Rect, Size};
use hovertip::placement::{fallback_placement, optimal_placement, Offsets, Placement, PlacementQuery};
use hovertip::{Tooltip, WidgetTree};

fn benchmark_optimal_placement(c: &mut Criterion) {
    let screens = [Rect::new(0, 0, 1920, 1080), Rect::new(1920, 0, 2560, 1440)];
    let offsets = Offsets::default();
    let container = Rect::new(0, 0, 1920, 1080);

    c.bench_function("optimal_placement", |b| {
        let mut x = 0;
        b.iter(|| {
            x = (x + 37) % 1900;
            let query = PlacementQuery {
                anchor: Rect::new(x, 500, 100, 30),
                screens: &screens,
                content: Size::new(120, 40),
                triangle_size: 5,
                offsets: &offsets,
            };
            black_box(optimal_placement(black_box(&query), container))
        });
    });

    c.bench_function("fallback_placement", |b| {
        let fallbacks = [Placement::Top, Placement::Bottom, Placement::Right];
        let query = PlacementQuery {
            anchor: Rect::new(0, 500, 100, 30),
            screens: &screens,
            content: Size::new(120, 40),
            triangle_size: 5,
            offsets: &offsets,
        };
        b.iter(|| black_box(fallback_placement(&query, Placement::Left, black_box(&fallbacks))));
    });
}

fn benchmark_layout_pass(c: &mut Criterion) {
    let mut tree = WidgetTree::new();
    let window = tree.add_root(Rect::new(100, 100, 1200, 800));
    let panel = tree.add_child(window, Rect::new(20, 20, 600, 400));
    let button = tree.add_child(panel, Rect::new(40, 40, 100, 30));

    let mut tooltip = Tooltip::new(&tree, Some(button), "Save the document to disk");
    c.bench_function("layout_pass", |b| {
        b.iter(|| {
            tooltip.update();
            black_box(tooltip.geometry())
        });
    });

    tooltip.set_max_width(Some(120));
    c.bench_function("layout_pass_wrapped", |b| {
        b.iter(|| {
            tooltip.update();
            black_box(tooltip.geometry())
        });
    });
}

criterion_group!(benches, benchmark_optimal_placement, benchmark_layout_pass);
criterion_main!(benches);
