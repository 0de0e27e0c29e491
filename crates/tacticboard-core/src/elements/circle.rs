//! Circle element.

use super::{ElementId, ElementStyle, ElementTrait};
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle given by center and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ElementId,
    pub center: Point,
    pub radius: f64,
    pub style: ElementStyle,
}

impl Circle {
    pub fn new(center: Point, radius: f64, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius: radius.abs(),
            style,
        }
    }

    /// Circle centered on `start` passing through `end`.
    pub fn from_drag(start: Point, end: Point, style: ElementStyle) -> Self {
        Self::new(start, start.distance(end), style)
    }
}

impl ElementTrait for Circle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (self.radius * 2.0, self.radius * 2.0))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let half_sw = self.style.stroke_width / 2.0;
        let d = point.distance(self.center);
        if d > self.radius + tolerance + half_sw {
            return false;
        }
        if self.style.fill_enabled {
            return true;
        }
        // Outline only
        d >= self.radius - tolerance - half_sw
    }

    fn to_path(&self) -> BezPath {
        KurboCircle::new(self.center, self.radius).to_path(0.1)
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }
}
