//! Rectangle element.

use super::{ElementId, ElementStyle, ElementTrait};
use kurbo::{BezPath, Point, Rect, Shape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ElementId,
    /// Top-left corner.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub style: ElementStyle,
}

impl Rectangle {
    pub fn new(position: Point, width: f64, height: f64, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style,
        }
    }

    /// Rectangle spanning two opposite corners, dragged in any direction.
    pub fn from_corners(a: Point, b: Point, style: ElementStyle) -> Self {
        let rect = Rect::from_points(a, b);
        Self::new(rect.origin(), rect.width(), rect.height(), style)
    }

    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }
}

impl ElementTrait for Rectangle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.as_rect();
        if self.style.fill_enabled {
            return rect.inflate(tolerance, tolerance).contains(point);
        }
        let grow = tolerance + self.style.stroke_width / 2.0;
        let outer = rect.inflate(grow, grow);
        let inner = rect.inflate(-grow, -grow);
        outer.contains(point) && !inner.contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
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
    fn test_from_corners_any_direction() {
        let style = ElementStyle::default();
        let forward = Rectangle::from_corners(Point::new(10.0, 10.0), Point::new(110.0, 60.0), style);
        let backward = Rectangle::from_corners(Point::new(110.0, 60.0), Point::new(10.0, 10.0), style);
        for rect in [forward, backward] {
            assert_eq!(rect.position, Point::new(10.0, 10.0));
            assert_eq!(rect.width, 100.0);
            assert_eq!(rect.height, 50.0);
        }
    }

    #[test]
    fn test_outline_hit_test() {
        let rect = Rectangle::new(Point::ZERO, 100.0, 100.0, ElementStyle::default());
        assert!(rect.hit_test(Point::new(0.0, 50.0), 1.0));
        assert!(!rect.hit_test(Point::new(50.0, 50.0), 1.0));
    }
}
