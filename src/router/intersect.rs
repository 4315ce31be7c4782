use crate::geometry::{Point, Rect};

// ── Intersection testing ────────────────────────────────────────────
/// Shrinkage applied to each obstacle before testing, so a route that
/// merely touches a block edge is not treated as blocked.
const RECT_INSET: f32 = 2.0;
/// Tolerance for classifying a segment as horizontal or vertical.
const AXIS_TOLERANCE: f32 = 1.0;

/// Whether the segment `a`..`b` crosses the inset interior of `rect`.
///
/// Horizontal and vertical segments get exact span tests. The diagonal
/// case only arises when two waypoints are joined directly; it falls back
/// to a bounding-box overlap, which can overreport but never misses a
/// true crossing of an axis-aligned rectangle.
pub fn segment_intersects(a: Point, b: Point, rect: &Rect) -> bool {
    let left = rect.x + RECT_INSET;
    let right = rect.right() - RECT_INSET;
    let top = rect.y + RECT_INSET;
    let bottom = rect.bottom() - RECT_INSET;

    if (a.y - b.y).abs() <= AXIS_TOLERANCE {
        let y = a.y;
        return y > top && y < bottom && a.x.max(b.x) > left && a.x.min(b.x) < right;
    }

    if (a.x - b.x).abs() <= AXIS_TOLERANCE {
        let x = a.x;
        return x > left && x < right && a.y.max(b.y) > top && a.y.min(b.y) < bottom;
    }

    a.x.max(b.x) > left && a.x.min(b.x) < right && a.y.max(b.y) > top && a.y.min(b.y) < bottom
}

/// A candidate polyline is accepted only if no segment crosses any obstacle.
pub fn path_is_clear(points: &[Point], obstacles: &[Rect]) -> bool {
    points.windows(2).all(|segment| {
        obstacles
            .iter()
            .all(|rect| !segment_intersects(segment[0], segment[1], rect))
    })
}
