use chart_timeline::config::{LocalizationOptions, TimeScaleLabelOptions};
use chart_timeline::core::{IndexRange, Point, Size};
use chart_timeline::horz_scale::{Time, TimeHorzScaleBehavior, Timeline, WhitespaceData};
use chart_timeline::render::{LineType, RecordingCanvas, RenderingTarget, walk_line};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn polyline(len: usize) -> Vec<Point> {
    (0..len)
        .map(|i| {
            let x = i as f64 * 0.2;
            Point::new(x, 300.0 + (x * 0.05).sin() * 120.0)
        })
        .collect()
}

fn bench_walk_line(c: &mut Criterion, name: &str, line_type: LineType) {
    let items = polyline(10_000);
    let range = IndexRange::new(0, items.len());

    c.bench_function(name, |b| {
        b.iter(|| {
            let mut canvas = RecordingCanvas::new();
            let mut target =
                RenderingTarget::with_pixel_ratio(&mut canvas, Size::new(2_000.0, 600.0), 2.0)
                    .expect("target");
            target
                .use_bitmap_coordinate_space(|scope| {
                    walk_line(
                        scope,
                        black_box(&items),
                        line_type,
                        range,
                        6.0,
                        |_, item| item.y > 300.0,
                        |scope, _, _, _| scope.context.stroke(),
                    )
                })
                .expect("walk");
        })
    });
}

fn bench_walk_line_simple_10k(c: &mut Criterion) {
    bench_walk_line(c, "walk_line_simple_10k", LineType::Simple);
}

fn bench_walk_line_curved_10k(c: &mut Criterion) {
    bench_walk_line(c, "walk_line_curved_10k", LineType::Curved);
}

fn bench_timeline_rebuild_10k(c: &mut Criterion) {
    let behavior = TimeHorzScaleBehavior::new(
        TimeScaleLabelOptions::default(),
        LocalizationOptions::default(),
    );
    let data: Vec<WhitespaceData> = (0..10_000)
        .map(|i| WhitespaceData {
            time: Time::Timestamp(1_704_067_200.0 + f64::from(i) * 60.0),
        })
        .collect();

    c.bench_function("timeline_rebuild_10k", |b| {
        b.iter(|| {
            let mut timeline = Timeline::new();
            timeline
                .rebuild(&behavior, &[black_box(data.as_slice())])
                .expect("rebuild");
            timeline
        })
    });
}

criterion_group!(
    benches,
    bench_walk_line_simple_10k,
    bench_walk_line_curved_10k,
    bench_timeline_rebuild_10k
);
criterion_main!(benches);
