//! Point and rectangle math shared by the drag engine and the eraser.
//!
//! Everything here is a pure function over [`kurbo`] primitives. Inputs are
//! assumed to be finite.

use kurbo::{Point, Rect, Size, Vec2};

/// Tolerance under which two intersection parameters are treated as one root.
pub const ROOT_EPSILON: f64 = 1e-3;

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: when `min > max` (a surface
/// smaller than the card plus margins) the lower bound wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Inclusive containment test (edges count as inside).
pub fn rect_contains(point: Point, rect: Rect) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Inclusive containment test against `rect` grown by `tolerance` on every side.
pub fn rect_contains_near(point: Point, rect: Rect, tolerance: f64) -> bool {
    rect_contains(point, rect.inflate(tolerance, tolerance))
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Whether `point` lies inside (or on) the circle.
pub fn point_in_circle(point: Point, center: Point, radius: f64) -> bool {
    distance(point, center) <= radius
}

/// Closest point of an axis-aligned rectangle to `point`.
pub fn closest_point_on_rect(point: Point, rect: Rect) -> Point {
    Point::new(clamp(point.x, rect.x0, rect.x1), clamp(point.y, rect.y0, rect.y1))
}

/// Clamp the top-left corner of a box of `item` size so that it stays inside
/// `bounds` (a size anchored at the origin) with `margin` on every side.
pub fn clamp_box(origin: Point, item: Size, bounds: Size, margin: f64) -> Point {
    Point::new(
        clamp(origin.x, margin, bounds.width - item.width - margin),
        clamp(origin.y, margin, bounds.height - item.height - margin),
    )
}

/// Parameters `t0 <= t1` where the infinite line through `p1 → p2` crosses the
/// circle, or `None` when it misses (or the segment is degenerate).
fn line_circle_roots(p1: Point, p2: Point, center: Point, radius: f64) -> Option<(f64, f64)> {
    let d: Vec2 = p2 - p1;
    let f: Vec2 = p1 - center;

    let a = d.dot(d);
    if a < f64::EPSILON {
        return None;
    }
    let b = 2.0 * f.dot(d);
    let c = f.dot(f) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    Some(((-b - root) / (2.0 * a), (-b + root) / (2.0 * a)))
}

/// Intersections between the segment `p1 → p2` and a circle.
///
/// Only roots with parameter `t ∈ [0, 1]` are reported, ordered from `p1`
/// towards `p2`. A tangent touch yields a single point.
pub fn line_circle_intersections(p1: Point, p2: Point, center: Point, radius: f64) -> Vec<Point> {
    let Some((t1, t2)) = line_circle_roots(p1, p2, center, radius) else {
        return Vec::new();
    };

    let mut points = Vec::with_capacity(2);
    if (0.0..=1.0).contains(&t1) {
        points.push(p1.lerp(p2, t1));
    }
    if (0.0..=1.0).contains(&t2) && (t2 - t1).abs() > ROOT_EPSILON {
        points.push(p1.lerp(p2, t2));
    }
    points
}

/// The part of the segment `p1 → p2` covered by the circle, as a parameter
/// range clipped to `[0, 1]`. `None` when the segment stays outside.
///
/// This also catches segments lying entirely inside the circle, where
/// [`line_circle_intersections`] reports nothing.
pub fn segment_span_in_circle(
    p1: Point,
    p2: Point,
    center: Point,
    radius: f64,
) -> Option<(f64, f64)> {
    let Some((t1, t2)) = line_circle_roots(p1, p2, center, radius) else {
        // A zero-length segment is "covered" when its single point is.
        if (p2 - p1).hypot2() < f64::EPSILON && point_in_circle(p1, center, radius) {
            return Some((0.0, 1.0));
        }
        return None;
    };
    let start = t1.max(0.0);
    let end = t2.min(1.0);
    (start <= end).then_some((start, end))
}

/// Axis-aligned bounding box of a point set. `None` for an empty set.
pub fn bounding_rect(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    Some(iter.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
}
