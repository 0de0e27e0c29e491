//! Pointer-driven card dragging between the pool, the field and the container.
//!
//! One [`DragEngine`] serves every card. A press on a card opens a
//! [`DragSession`]; moves are coalesced per animation frame; release resolves
//! the drop target and always closes the session, as does cancel.

use super::surface::{Surface, SurfaceLayout};
use crate::config::BoardConfig;
use crate::geometry::{clamp_box, rect_contains, rect_contains_near};
use crate::input::{FrameCoalescer, PointerKind};
use crate::roster::ItemId;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// What the press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    /// The card body.
    Card,
    /// A button embedded in the card (remove, highlight). Handled by the button.
    Control,
}

/// Same-size stand-in holding the card's slot in its origin layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placeholder {
    pub surface: Surface,
    pub rect: Rect,
}

/// How a card is shown while dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragVisual {
    /// The card itself follows the pointer (page-space top-left).
    Live(Point),
    /// The card stays put and a detached ghost follows the finger.
    Ghost(Point),
}

/// State of one pick-up-to-drop interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub item: ItemId,
    pub kind: PointerKind,
    /// Pointer minus card top-left at press time.
    pub grab: Vec2,
    pub card: Size,
    pub origin: Surface,
    pub placeholder: Placeholder,
    /// Surface the card is clamped to while moving.
    pub active: Surface,
    /// Last clamped spot on the field or container, surface-local.
    pub last_valid: Option<(Surface, Point)>,
    pub pointer: Point,
    /// Page-space top-left of the dragged card.
    pub card_position: Point,
    /// Surface highlighted as the drop target.
    pub hovered: Option<Surface>,
}

impl DragSession {
    pub fn visual(&self) -> DragVisual {
        match self.kind {
            PointerKind::Mouse => DragVisual::Live(self.card_position),
            PointerKind::Touch => DragVisual::Ghost(self.pointer - self.grab),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Which rule decided a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropRule {
    /// Released over the surface.
    Hit,
    /// Released just outside the field.
    Magnet,
    /// Released within tolerance of the pool.
    PoolTolerance,
    /// Released nowhere; back to the last valid spot.
    SnapBack,
    /// Released nowhere with no valid spot; kept on the active surface.
    Fallback,
}

/// Outcome of releasing a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropResolution {
    /// Card rests on `surface` at the surface-local `position`.
    Placed {
        item: ItemId,
        surface: Surface,
        position: Point,
        rule: DropRule,
    },
    /// Card goes back to the pool.
    ReturnedToPool { item: ItemId, rule: DropRule },
}

impl DropResolution {
    pub fn item(&self) -> &ItemId {
        match self {
            DropResolution::Placed { item, .. } | DropResolution::ReturnedToPool { item, .. } => item,
        }
    }
}

/// The single drag session shared by every card.
#[derive(Debug, Clone, Default)]
pub struct DragEngine {
    state: DragState,
    frames: FrameCoalescer,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Whether pointer input belongs to a drag.
    pub fn is_capturing(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn hovered(&self) -> Option<Surface> {
        self.session().and_then(|s| s.hovered)
    }

    /// Pick up `item`, whose card is drawn at page-space `card_rect`.
    ///
    /// Presses on embedded controls and presses while another card is in
    /// flight are ignored.
    #[allow(clippy::too_many_arguments)]
    pub fn begin(
        &mut self,
        item: ItemId,
        origin: Surface,
        card_rect: Rect,
        pointer: Point,
        kind: PointerKind,
        target: PressTarget,
        layout: &SurfaceLayout,
        config: &BoardConfig,
    ) -> bool {
        if target == PressTarget::Control || self.is_capturing() {
            return false;
        }
        let card_origin = card_rect.origin();
        log::debug!("Drag begin: {} from {:?} ({:?})", item, origin, kind);
        self.frames.reset();
        self.state = DragState::Dragging(DragSession {
            item,
            kind,
            grab: pointer - card_origin,
            card: config.card_size(),
            origin,
            placeholder: Placeholder { surface: origin, rect: card_rect },
            active: layout.hit(pointer).unwrap_or(Surface::Field),
            last_valid: None,
            pointer,
            card_position: card_origin,
            hovered: layout.hover(pointer, config.pool_tolerance),
        });
        true
    }

    /// Record a pointer move. The card itself moves on the next [`frame`](Self::frame).
    pub fn pointer_move(&mut self, pointer: Point, layout: &SurfaceLayout, config: &BoardConfig) -> bool {
        let DragState::Dragging(session) = &mut self.state else {
            return false;
        };
        session.pointer = pointer;
        session.hovered = layout.hover(pointer, config.pool_tolerance);
        if let Some(surface) = session.hovered {
            session.active = surface;
        }
        self.frames.push(pointer);
        true
    }

    /// Apply the latest coalesced move. Returns the card's new page-space
    /// top-left, or `None` when there is nothing to do.
    pub fn frame(&mut self, layout: &SurfaceLayout, config: &BoardConfig) -> Option<Point> {
        let pointer = self.frames.take()?;
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        follow(session, pointer, layout, config);
        Some(session.card_position)
    }

    /// Release the card. `pointer` is the release position; touch ends carry
    /// none, so the last known one is used.
    pub fn end(&mut self, pointer: Option<Point>, layout: &SurfaceLayout, config: &BoardConfig) -> Option<DropResolution> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.frames.reset();
        let pointer = pointer.unwrap_or(session.pointer);
        let resolution = resolve(&session, pointer, layout, config);
        log::info!("Drag resolved: {:?}", resolution);
        Some(resolution)
    }

    /// Abort the drag, leaving every placement as it was.
    pub fn cancel(&mut self) -> Option<DragSession> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.frames.reset();
        log::debug!("Drag cancelled: {}", session.item);
        Some(session)
    }
}

/// Move the card toward `pointer` inside the active surface.
fn follow(session: &mut DragSession, pointer: Point, layout: &SurfaceLayout, config: &BoardConfig) {
    let margin = config.field_margin;
    let raw = pointer - session.grab;
    let rect = layout.rect(session.active);

    if rect_contains(pointer, rect) {
        let local = layout.to_local(session.active, raw);
        let relax = config.edge_relax;
        let near_edge = local.x < relax
            || local.y < relax
            || local.x > rect.width() - session.card.width - relax
            || local.y > rect.height() - session.card.height - relax;
        if near_edge {
            session.card_position = raw;
        } else {
            let bounded = clamp_box(local, session.card, rect.size(), margin);
            session.card_position = layout.to_page(session.active, bounded);
            if session.active.is_positional() {
                session.last_valid = Some((session.active, bounded));
            }
        }
    } else if layout.near_field(pointer, config.magnet_distance) {
        let bounded = layout.clamp_card(Surface::Field, pointer, session.grab, session.card, margin);
        session.card_position = layout.to_page(Surface::Field, bounded);
        session.last_valid = Some((Surface::Field, bounded));
        session.active = Surface::Field;
    } else {
        let bounded = layout.clamp_card(session.active, pointer, session.grab, session.card, margin);
        session.card_position = layout.to_page(session.active, bounded);
    }
}

/// Drop target for a release at `pointer`.
fn resolve(session: &DragSession, pointer: Point, layout: &SurfaceLayout, config: &BoardConfig) -> DropResolution {
    let item = session.item.clone();
    let place = |surface: Surface, rule: DropRule| DropResolution::Placed {
        item: item.clone(),
        surface,
        position: layout.clamp_card(surface, pointer, session.grab, session.card, surface.drop_margin(config)),
        rule,
    };

    match layout.hit(pointer) {
        Some(Surface::Pool) => DropResolution::ReturnedToPool { item: item.clone(), rule: DropRule::Hit },
        Some(surface) => place(surface, DropRule::Hit),
        None if layout.near_field(pointer, config.magnet_distance) => place(Surface::Field, DropRule::Magnet),
        None if rect_contains_near(pointer, layout.pool, config.pool_tolerance) => {
            DropResolution::ReturnedToPool { item: item.clone(), rule: DropRule::PoolTolerance }
        }
        None => match session.last_valid {
            // The field always accepts free placement.
            Some((Surface::Field, _)) => place(Surface::Field, DropRule::SnapBack),
            Some((surface, position)) => DropResolution::Placed {
                item: item.clone(),
                surface,
                position,
                rule: DropRule::SnapBack,
            },
            None if session.active == Surface::Pool => {
                DropResolution::ReturnedToPool { item: item.clone(), rule: DropRule::Fallback }
            }
            None => place(session.active, DropRule::Fallback),
        },
    }
}
