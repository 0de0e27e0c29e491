//! Freehand pen path.

use super::{ElementId, ElementStyle, ElementTrait};
use crate::path::{self, PathSpec, Segment};
use kurbo::{BezPath, Point, Rect, Shape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A smoothed freehand stroke stored as path data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenPath {
    pub(crate) id: ElementId,
    pub data: PathSpec,
    pub style: ElementStyle,
}

impl PenPath {
    pub fn new(data: PathSpec, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            data,
            style,
        }
    }

    /// Smoothed path through a pointer trace.
    pub fn from_points(points: &[Point], style: ElementStyle) -> Self {
        Self::new(path::build_smooth_path(points), style)
    }

    pub fn segments(&self) -> Vec<Segment> {
        path::parse(&self.data)
    }
}

impl ElementTrait for PenPath {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.to_path().bounding_box()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let threshold = tolerance + self.style.stroke_width / 2.0;
        let mut last: Option<Point> = None;
        for segment in self.segments() {
            let hit = match last {
                Some(start) => super::point_to_segment_dist(point, start, segment.end) <= threshold,
                None => point.distance(segment.end) <= threshold,
            };
            if hit {
                return true;
            }
            last = Some(segment.end);
        }
        false
    }

    fn to_path(&self) -> BezPath {
        path::to_bez_path(&self.segments())
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_smooths() {
        let pen = PenPath::from_points(
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(20.0, 0.0)],
            ElementStyle::default(),
        );
        assert_eq!(pen.data.as_str(), "M 0 0 Q 10 0 15 0 T 20 0");
        assert_eq!(pen.segments().len(), 3);
    }

    #[test]
    fn test_hit_test_follows_polyline() {
        let pen = PenPath::new(PathSpec::from("M 0 0 L 100 0 L 100 100"), ElementStyle::default());
        assert!(pen.hit_test(Point::new(50.0, 1.0), 0.0));
        assert!(pen.hit_test(Point::new(101.0, 50.0), 0.0));
        assert!(!pen.hit_test(Point::new(50.0, 50.0), 2.0));
    }
}
