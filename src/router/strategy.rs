//! Two-point route selection.
//!
//! Candidates are tried in a fixed priority order, each checked against the
//! obstacle set as a whole polyline; the first clear candidate wins. When
//! everything is blocked the mid-corridor jog is returned anyway, so a
//! caller always gets a drawable path.

use tracing::debug;

use crate::config::RouterConfig;
use crate::geometry::{Point, Rect};

use super::intersect::path_is_clear;

// ── Strategy selection ──────────────────────────────────────────────
/// Endpoints within this vertical distance count as the same row.
const ALIGN_TOLERANCE: f32 = 2.0;

// ── Corridor search ─────────────────────────────────────────────────
/// Lateral offsets tried for the vertical corridor when the midpoint is
/// blocked. Empirically tuned values, not derived from obstacle geometry.
const LATERAL_SHIFTS: [f32; 6] = [40.0, -40.0, 80.0, -80.0, 120.0, -120.0];

// ── Backward wrap ───────────────────────────────────────────────────
/// Detour distance from the endpoint span when no obstacles exist.
const WRAP_CLEAR_OFFSET: f32 = 60.0;

pub(super) fn route_pair(
    config: &RouterConfig,
    from: Point,
    to: Point,
    obstacles: &[Rect],
    use_stub: bool,
) -> Vec<Point> {
    if let Some(path) = direct_route(from, to, obstacles) {
        return path;
    }
    if let Some(path) = s_route(config, from, to, obstacles) {
        return path;
    }
    if to.x > from.x {
        if let Some(path) = forward_detour(config, from, to, obstacles, use_stub) {
            return path;
        }
    } else if let Some(path) = backward_wrap(config, from, to, obstacles, use_stub) {
        return path;
    }
    debug!(
        from_x = from.x,
        from_y = from.y,
        to_x = to.x,
        to_y = to.y,
        obstacles = obstacles.len(),
        "no clear route found, returning mid-corridor fallback"
    );
    mid_jog(from, to)
}

/// Same-row connection with the target ahead: a single straight segment.
fn direct_route(from: Point, to: Point, obstacles: &[Rect]) -> Option<Vec<Point>> {
    if (from.y - to.y).abs() > ALIGN_TOLERANCE || to.x <= from.x {
        return None;
    }
    let path = vec![from, to];
    path_is_clear(&path, obstacles).then_some(path)
}

/// With plenty of horizontal room, jog vertically at the midpoint.
fn s_route(
    config: &RouterConfig,
    from: Point,
    to: Point,
    obstacles: &[Rect],
) -> Option<Vec<Point>> {
    if to.x - from.x <= config.stub_length * 2.0 {
        return None;
    }
    let path = mid_jog(from, to);
    path_is_clear(&path, obstacles).then_some(path)
}

/// Target ahead of the source: search for a clear vertical corridor
/// between the stub past the source and the back-stub before the target,
/// then sweep over or under the whole obstacle band.
fn forward_detour(
    config: &RouterConfig,
    from: Point,
    to: Point,
    obstacles: &[Rect],
    use_stub: bool,
) -> Option<Vec<Point>> {
    let stub = if use_stub { config.stub_length } else { 0.0 };
    let out_x = from.x + stub;
    let in_x = to.x - config.stub_length;

    let seed = (out_x + in_x) / 2.0;
    for shift in std::iter::once(0.0).chain(LATERAL_SHIFTS) {
        let corridor_x = seed + shift;
        let path = corridor_jog(from, to, corridor_x);
        if path_is_clear(&path, obstacles) {
            return Some(path);
        }
    }

    if obstacles.is_empty() {
        return None;
    }
    debug!(
        from_x = from.x,
        to_x = to.x,
        "corridor search exhausted, sweeping the obstacle band"
    );

    let (band_top, band_bottom) = obstacle_band(obstacles);
    let above_y = (band_top - config.margin).min(from.y).min(to.y);
    let below_y = band_bottom + config.margin;
    for detour_y in [above_y, below_y] {
        let path = band_sweep(from, to, out_x, in_x, detour_y);
        if path_is_clear(&path, obstacles) {
            return Some(path);
        }
    }
    None
}

/// Target behind or level with the source: wrap around the obstacle band,
/// choosing whichever side costs less vertical travel.
fn backward_wrap(
    config: &RouterConfig,
    from: Point,
    to: Point,
    obstacles: &[Rect],
    use_stub: bool,
) -> Option<Vec<Point>> {
    let stub = if use_stub { config.stub_length } else { 0.0 };
    let (top, bottom) = if obstacles.is_empty() {
        (
            from.y.min(to.y) - WRAP_CLEAR_OFFSET,
            from.y.max(to.y) + WRAP_CLEAR_OFFSET,
        )
    } else {
        let (band_top, band_bottom) = obstacle_band(obstacles);
        (band_top - config.margin, band_bottom + config.margin)
    };

    let above_cost = (from.y - top).abs() + (to.y - top).abs();
    let below_cost = (from.y - bottom).abs() + (to.y - bottom).abs();
    let detour_y = if above_cost <= below_cost { top } else { bottom };

    let path = dedup(vec![
        from,
        Point::new(from.x + stub, from.y),
        Point::new(from.x + stub, detour_y),
        Point::new(to.x - config.stub_length, detour_y),
        Point::new(to.x - config.stub_length, to.y),
        to,
    ]);
    path_is_clear(&path, obstacles).then_some(path)
}

/// Vertical span of the whole obstacle set. Callers guarantee the set is
/// non-empty.
fn obstacle_band(obstacles: &[Rect]) -> (f32, f32) {
    let top = obstacles.iter().map(|rect| rect.y).fold(f32::MAX, f32::min);
    let bottom = obstacles.iter().map(Rect::bottom).fold(f32::MIN, f32::max);
    (top, bottom)
}

/// The unconditional fallback shape: jog vertically at the horizontal
/// midpoint.
fn mid_jog(from: Point, to: Point) -> Vec<Point> {
    let mid_x = (from.x + to.x) / 2.0;
    dedup(vec![
        from,
        Point::new(mid_x, from.y),
        Point::new(mid_x, to.y),
        to,
    ])
}

fn corridor_jog(from: Point, to: Point, corridor_x: f32) -> Vec<Point> {
    vec![
        from,
        Point::new(corridor_x, from.y),
        Point::new(corridor_x, to.y),
        to,
    ]
}

fn band_sweep(from: Point, to: Point, out_x: f32, in_x: f32, detour_y: f32) -> Vec<Point> {
    dedup(vec![
        from,
        Point::new(out_x, from.y),
        Point::new(out_x, detour_y),
        Point::new(in_x, detour_y),
        Point::new(in_x, to.y),
        to,
    ])
}

/// Drop zero-length segments left behind when a stub collapses.
fn dedup(points: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for point in points {
        if let Some(last) = out.last()
            && (last.x - point.x).abs() <= f32::EPSILON
            && (last.y - point.y).abs() <= f32::EPSILON
        {
            continue;
        }
        out.push(point);
    }
    out
}
