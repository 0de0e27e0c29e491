//! Text label element.

use super::{ElementId, ElementStyle, ElementTrait};
use kurbo::{BezPath, Point, Rect, Shape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH_FACTOR: f64 = 0.6;

/// A text label anchored at its baseline start.
///
/// The label is drawn in `style.stroke_color`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ElementId,
    pub position: Point,
    pub content: String,
    pub font_size: f64,
    pub style: ElementStyle,
}

impl Text {
    pub fn new(position: Point, content: String, font_size: f64, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size,
            style,
        }
    }

    /// Approximate rendered width.
    pub fn approx_width(&self) -> f64 {
        self.content.chars().count() as f64 * self.font_size * GLYPH_WIDTH_FACTOR
    }
}

impl ElementTrait for Text {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y - self.font_size,
            self.position.x + self.approx_width(),
            self.position.y,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        // Glyphs are laid out by the host; expose the label box.
        self.bounds().to_path(0.1)
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
    fn test_bounds_sit_above_baseline() {
        let text = Text::new(Point::new(10.0, 50.0), "GOAL".to_string(), 20.0, ElementStyle::default());
        let bounds = text.bounds();
        assert_eq!(bounds.y1, 50.0);
        assert_eq!(bounds.y0, 30.0);
        assert!((bounds.width() - 48.0).abs() < 1e-9);
        assert!(text.hit_test(Point::new(20.0, 40.0), 0.0));
    }
}
