//! Drop surfaces and their on-screen layout.

use crate::config::BoardConfig;
use crate::geometry::{clamp_box, rect_contains, rect_contains_near};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Where a card can live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// The unplaced list. Not positionally addressable.
    Pool,
    /// The playing field.
    Field,
    /// The area surrounding the field.
    Container,
}

impl Surface {
    /// Whether cards on this surface carry a position.
    pub fn is_positional(self) -> bool {
        !matches!(self, Surface::Pool)
    }

    /// Clamp margin used when a card comes to rest on this surface.
    pub fn drop_margin(self, config: &BoardConfig) -> f64 {
        match self {
            Surface::Field => config.field_margin,
            Surface::Container | Surface::Pool => config.container_margin,
        }
    }
}

/// Page-space rectangles of the three surfaces.
///
/// Layout changes on resize, so callers pass a fresh one into every
/// interaction instead of the engine caching it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayout {
    pub field: Rect,
    pub container: Rect,
    pub pool: Rect,
}

impl SurfaceLayout {
    pub fn new(field: Rect, container: Rect, pool: Rect) -> Self {
        Self { field, container, pool }
    }

    pub fn rect(&self, surface: Surface) -> Rect {
        match surface {
            Surface::Field => self.field,
            Surface::Container => self.container,
            Surface::Pool => self.pool,
        }
    }

    /// Surface directly under `point`. The field sits inside the container and wins.
    pub fn hit(&self, point: Point) -> Option<Surface> {
        if rect_contains(point, self.field) {
            Some(Surface::Field)
        } else if rect_contains(point, self.container) {
            Some(Surface::Container)
        } else if rect_contains(point, self.pool) {
            Some(Surface::Pool)
        } else {
            None
        }
    }

    /// Like [`hit`](Self::hit), but the pool also catches points within
    /// `tolerance` of its edge (its scrollbar hangs over the border).
    pub fn hover(&self, point: Point, tolerance: f64) -> Option<Surface> {
        self.hit(point)
            .or_else(|| rect_contains_near(point, self.pool, tolerance).then_some(Surface::Pool))
    }

    /// Within `distance` of the field's bounds.
    pub fn near_field(&self, point: Point, distance: f64) -> bool {
        rect_contains_near(point, self.field, distance)
    }

    /// Convert a page-space point to coordinates local to `surface`.
    pub fn to_local(&self, surface: Surface, point: Point) -> Point {
        let origin = self.rect(surface).origin();
        Point::new(point.x - origin.x, point.y - origin.y)
    }

    /// Convert a surface-local point back to page space.
    pub fn to_page(&self, surface: Surface, local: Point) -> Point {
        local + self.rect(surface).origin().to_vec2()
    }

    /// Local top-left of a card grabbed at `grab` with the pointer at
    /// `pointer`, clamped inside `surface` with `margin`.
    pub fn clamp_card(&self, surface: Surface, pointer: Point, grab: Vec2, card: Size, margin: f64) -> Point {
        let local = self.to_local(surface, pointer - grab);
        clamp_box(local, card, self.rect(surface).size(), margin)
    }
}
