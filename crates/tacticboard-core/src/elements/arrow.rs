//! Arrow element: a shaft line plus a triangular head.

use super::{point_to_segment_dist, ElementId, ElementStyle, ElementTrait, Line};
use crate::config::CanvasConfig;
use crate::geometry::bounding_rect;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Triangular arrowhead anchored at the shaft's end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowHead {
    pub tip: Point,
    pub left: Point,
    pub right: Point,
    /// Outline width of the head itself.
    pub stroke_width: f64,
}

impl ArrowHead {
    /// Head for a shaft `start → end`, sized from the shaft's stroke width.
    pub fn compute(start: Point, end: Point, stroke_width: f64, config: &CanvasConfig) -> Self {
        let length = config
            .arrowhead_min_length
            .max(stroke_width * config.arrowhead_length_factor);
        let angle = (end.y - start.y).atan2(end.x - start.x);
        let spread = config.arrowhead_angle_deg.to_radians();

        let barb = |theta: f64| end - Vec2::from_angle(theta) * length;

        Self {
            tip: end,
            left: barb(angle - spread),
            right: barb(angle + spread),
            stroke_width: (stroke_width * 0.5).max(1.0),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.tip, self.left).union_pt(self.right)
    }

    fn contains(&self, p: Point) -> bool {
        let sign = |a: Point, b: Point, c: Point| (a.x - c.x) * (b.y - c.y) - (b.x - c.x) * (a.y - c.y);
        let d1 = sign(p, self.tip, self.left);
        let d2 = sign(p, self.left, self.right);
        let d3 = sign(p, self.right, self.tip);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }
}

/// A line with an arrowhead at its end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: ElementId,
    pub start: Point,
    pub end: Point,
    pub head: ArrowHead,
    pub style: ElementStyle,
}

impl Arrow {
    pub fn new(start: Point, end: Point, style: ElementStyle, config: &CanvasConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            head: ArrowHead::compute(start, end, style.stroke_width, config),
            style,
        }
    }

    /// Same arrow with a shortened shaft; the head stays where it is.
    pub fn with_start(&self, start: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            ..self.clone()
        }
    }

    /// The shaft as a plain line carrying the arrow's style.
    pub fn shaft(&self) -> Line {
        Line::new(self.start, self.end, self.style)
    }
}

impl ElementTrait for Arrow {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        bounding_rect([self.start, self.end, self.head.left, self.head.right])
            .unwrap_or_else(|| Rect::from_points(self.start, self.end))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start, self.end) <= tolerance + self.style.stroke_width / 2.0
            || self.head.contains(point)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path.move_to(self.head.tip);
        path.line_to(self.head.left);
        path.line_to(self.head.right);
        path.close_path();
        path
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }
}
