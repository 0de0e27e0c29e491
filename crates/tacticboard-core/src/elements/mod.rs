//! Vector annotation elements drawn on the tactics canvas.

mod arrow;
mod circle;
mod line;
mod pen;
mod rectangle;
mod text;

pub use arrow::{Arrow, ArrowHead};
pub use circle::Circle;
pub use line::Line;
pub use pen::PenPath;
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Format as `#rrggbb`, appending alpha only when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style captured when an element is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    pub fill_color: SerializableColor,
    pub fill_enabled: bool,
}

impl ElementStyle {
    /// Stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Fill color, `None` when filling is disabled.
    pub fn fill(&self) -> Option<Color> {
        self.fill_enabled.then(|| self.fill_color.into())
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::new(0xff, 0x00, 0x00, 0xff),
            stroke_width: 3.0,
            fill_color: SerializableColor::new(0xff, 0x00, 0x00, 0xff),
            fill_enabled: false,
        }
    }
}

/// Common behaviour of all elements.
pub trait ElementTrait {
    /// Unique identifier.
    fn id(&self) -> ElementId;

    /// Bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Whether a point within `tolerance` hits the element.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Outline for rendering.
    fn to_path(&self) -> BezPath;

    fn style(&self) -> &ElementStyle;

    fn style_mut(&mut self) -> &mut ElementStyle;
}

/// Enum wrapper for all element types (for snapshots).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Line(Line),
    Arrow(Arrow),
    Circle(Circle),
    Rectangle(Rectangle),
    Path(PenPath),
    Text(Text),
}

impl Element {
    fn as_trait(&self) -> &dyn ElementTrait {
        match self {
            Element::Line(e) => e,
            Element::Arrow(e) => e,
            Element::Circle(e) => e,
            Element::Rectangle(e) => e,
            Element::Path(e) => e,
            Element::Text(e) => e,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ElementTrait {
        match self {
            Element::Line(e) => e,
            Element::Arrow(e) => e,
            Element::Circle(e) => e,
            Element::Rectangle(e) => e,
            Element::Path(e) => e,
            Element::Text(e) => e,
        }
    }

    pub fn id(&self) -> ElementId {
        self.as_trait().id()
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_trait().hit_test(point, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        self.as_trait().to_path()
    }

    pub fn style(&self) -> &ElementStyle {
        self.as_trait().style()
    }

    pub fn style_mut(&mut self) -> &mut ElementStyle {
        self.as_trait_mut().style_mut()
    }

    /// Short lowercase name, used in log lines.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Line(_) => "line",
            Element::Arrow(_) => "arrow",
            Element::Circle(_) => "circle",
            Element::Rectangle(_) => "rectangle",
            Element::Path(_) => "path",
            Element::Text(_) => "text",
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Distance from a point to the segment `a → b`.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}
