//! Single-pass polyline traversal shared by the line and area renderers.
//!
//! Items are in media space; the walk scales them into bitmap space as it
//! emits path segments. Whenever the per-item style changes, the running
//! path is handed to `finish_styled_area` and a new path starts at the
//! boundary item.

use crate::core::{IndexRange, Point};
use crate::error::ChartResult;

use super::{BitmapScope, LineType};

const CURVE_TENSION: f64 = 6.0;

/// Anything with a media-space position.
pub trait LinePoint {
    fn x(&self) -> f64;
    fn y(&self) -> f64;

    fn point(&self) -> Point {
        Point::new(self.x(), self.y())
    }
}

impl LinePoint for Point {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// Bezier control points for the curved segment `points[from] -> points[to]`.
///
/// Neighbors before `from` and after `to` are clamped to the sequence bounds.
#[must_use]
pub fn get_control_points<P: LinePoint>(points: &[P], from: usize, to: usize) -> [Point; 2] {
    let before = from.saturating_sub(1);
    let after = (to + 1).min(points.len().saturating_sub(1));
    let from_point = points[from].point();
    let to_point = points[to].point();
    let before_point = points[before].point();
    let after_point = points[after].point();

    let cp1 = Point::new(
        from_point.x + (to_point.x - before_point.x) / CURVE_TENSION,
        from_point.y + (to_point.y - before_point.y) / CURVE_TENSION,
    );
    let cp2 = Point::new(
        to_point.x - (after_point.x - from_point.x) / CURVE_TENSION,
        to_point.y - (after_point.y - from_point.y) / CURVE_TENSION,
    );
    [cp1, cp2]
}

/// Walks `items[visible_range]` and draws one path per style run.
///
/// `finish_styled_area` receives the run's style and its first and last
/// points; it is expected to stroke or fill the current path. Every run is
/// finished, including the trailing one.
pub fn walk_line<P, S, G, F>(
    scope: &mut BitmapScope<'_>,
    items: &[P],
    line_type: LineType,
    visible_range: IndexRange,
    bar_width: f64,
    mut style_getter: G,
    mut finish_styled_area: F,
) -> ChartResult<()>
where
    P: LinePoint,
    S: PartialEq,
    G: FnMut(&BitmapScope<'_>, &P) -> S,
    F: FnMut(&mut BitmapScope<'_>, &S, Point, Point) -> ChartResult<()>,
{
    let from = visible_range.from;
    let to = visible_range.to.min(items.len());
    if items.is_empty() || from >= items.len() || to == 0 || from >= to {
        return Ok(());
    }

    let hpr = scope.horizontal_pixel_ratio;
    let vpr = scope.vertical_pixel_ratio;
    let first = &items[from];
    let mut current_style = style_getter(&*scope, first);

    if to - from < 2 {
        let half = bar_width / 2.0;
        let left = Point::new(first.x() - half, first.y());
        let right = Point::new(first.x() + half, first.y());
        scope.context.begin_path();
        scope.context.move_to(left.x * hpr, left.y * vpr);
        scope.context.line_to(right.x * hpr, right.y * vpr);
        return finish_styled_area(scope, &current_style, left, right);
    }

    let mut run_start = first.point();
    let mut current = run_start;
    scope.context.begin_path();
    scope.context.move_to(first.x() * hpr, first.y() * vpr);

    for index in from + 1..to {
        let item = &items[index];
        current = item.point();
        let item_style = style_getter(&*scope, item);

        match line_type {
            LineType::Simple => {
                scope.context.line_to(current.x * hpr, current.y * vpr);
            }
            LineType::WithSteps => {
                let previous_y = items[index - 1].y();
                scope.context.line_to(current.x * hpr, previous_y * vpr);
                if item_style != current_style {
                    finish_styled_area(scope, &current_style, run_start, current)?;
                    scope.context.begin_path();
                    current_style = item_style;
                    run_start = current;
                    // Zero-length joint so the new color starts at the riser.
                    scope.context.move_to(current.x * hpr, previous_y * vpr);
                    scope.context.line_to(current.x * hpr, previous_y * vpr);
                }
                scope.context.line_to(current.x * hpr, current.y * vpr);
                continue;
            }
            LineType::Curved => {
                let [cp1, cp2] = get_control_points(items, index - 1, index);
                scope.context.bezier_curve_to(
                    cp1.x * hpr,
                    cp1.y * vpr,
                    cp2.x * hpr,
                    cp2.y * vpr,
                    current.x * hpr,
                    current.y * vpr,
                );
            }
        }

        if item_style != current_style {
            finish_styled_area(scope, &current_style, run_start, current)?;
            scope.context.begin_path();
            current_style = item_style;
            run_start = current;
            scope.context.move_to(current.x * hpr, current.y * vpr);
        }
    }

    finish_styled_area(scope, &current_style, run_start, current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Size;
    use crate::render::{DrawCommand, RecordingCanvas, RenderingTarget};

    use approx::assert_relative_eq;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn control_points_clamp_neighbors_at_the_ends() {
        let pts = points(&[(0.0, 0.0), (6.0, 6.0), (12.0, 0.0)]);
        let [cp1, cp2] = get_control_points(&pts, 0, 1);
        // before == from, so cp1 = p0 + (p1 - p0) / 6
        assert_relative_eq!(cp1.x, 1.0);
        assert_relative_eq!(cp1.y, 1.0);
        // after == 2, so cp2 = p1 - (p2 - p0) / 6
        assert_relative_eq!(cp2.x, 4.0);
        assert_relative_eq!(cp2.y, 6.0);

        let [_, last_cp2] = get_control_points(&pts, 1, 2);
        assert_relative_eq!(last_cp2.x, 12.0 - (12.0 - 6.0) / 6.0);
        assert_relative_eq!(last_cp2.y, 0.0 - (0.0 - 6.0) / 6.0);
    }

    #[test]
    fn step_line_emits_riser_before_new_level() {
        let mut canvas = RecordingCanvas::new();
        {
            let mut target =
                RenderingTarget::new(&mut canvas, Size::new(100.0, 100.0), Size::new(100.0, 100.0))
                    .expect("target");
            target
                .use_bitmap_coordinate_space(|scope| {
                    walk_line(
                        scope,
                        &points(&[(0.0, 10.0), (10.0, 20.0)]),
                        LineType::WithSteps,
                        IndexRange::new(0, 2),
                        1.0,
                        |_, _| 0_u8,
                        |scope, _, _, _| scope.context.stroke(),
                    )
                })
                .expect("walk");
        }
        let line_tos: Vec<_> = canvas
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::LineTo { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(line_tos, vec![(10.0, 10.0), (10.0, 20.0)]);
    }

    #[test]
    fn empty_or_out_of_range_walks_do_nothing() {
        let mut canvas = RecordingCanvas::new();
        {
            let mut target =
                RenderingTarget::new(&mut canvas, Size::new(10.0, 10.0), Size::new(10.0, 10.0))
                    .expect("target");
            let pts = points(&[(1.0, 1.0)]);
            for range in [IndexRange::new(1, 3), IndexRange::new(0, 0)] {
                target
                    .use_bitmap_coordinate_space(|scope| {
                        walk_line(
                            scope,
                            &pts,
                            LineType::Simple,
                            range,
                            4.0,
                            |_, _| (),
                            |_, _, _, _| panic!("nothing to finish"),
                        )
                    })
                    .expect("walk");
            }
        }
        assert!(
            canvas
                .commands()
                .iter()
                .all(|c| matches!(c, DrawCommand::Save | DrawCommand::Restore))
        );
    }
}
