//! Straight line element.

use super::{point_to_segment_dist, ElementId, ElementStyle, ElementTrait};
use kurbo::{BezPath, Line as KurboLine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight segment between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ElementId,
    pub start: Point,
    pub end: Point,
    pub style: ElementStyle,
}

impl Line {
    pub fn new(start: Point, end: Point, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.start, self.end)
    }
}

impl ElementTrait for Line {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start, self.end) <= tolerance + self.style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if self.start != self.end {
            path.move_to(self.start);
            path.line_to(self.end);
        }
        path
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
    fn test_line_length() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(30.0, 40.0), ElementStyle::default());
        assert!((line.length() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_line_hit_test_includes_half_stroke() {
        let mut style = ElementStyle::default();
        style.stroke_width = 4.0;
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), style);
        assert!(line.hit_test(Point::new(50.0, 2.0), 0.0));
        assert!(!line.hit_test(Point::new(50.0, 5.0), 0.0));
        assert!(line.hit_test(Point::new(50.0, 5.0), 3.0));
    }

    #[test]
    fn test_degenerate_line_has_empty_path() {
        let p = Point::new(3.0, 3.0);
        let line = Line::new(p, p, ElementStyle::default());
        assert!(line.to_path().elements().is_empty());
    }
}
