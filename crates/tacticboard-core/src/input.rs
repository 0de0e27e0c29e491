//! Pointer and keyboard events fed to the board and the canvas.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Source of a pointer gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, kind: PointerKind },
    Move { position: Point },
    Up { position: Point },
    /// Capture lost, window blurred, touch cancelled.
    Cancel,
    /// Pointer left the surface.
    Leave,
    DoubleClick { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position }
            | PointerEvent::DoubleClick { position } => Some(*position),
            PointerEvent::Cancel | PointerEvent::Leave => None,
        }
    }
}

/// Keys the editors react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Other(String),
}

impl Key {
    /// Map a DOM-style key name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Key::Delete | Key::Backspace)
    }
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// Collapses pointer moves between two animation frames into one.
///
/// The host pushes every move and drains once per frame; only the latest
/// position survives.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCoalescer {
    pending: Option<Point>,
    dropped: usize,
}

impl FrameCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: Point) {
        if self.pending.replace(position).is_some() {
            self.dropped += 1;
        }
    }

    /// Latest position since the last frame, if any.
    pub fn take(&mut self) -> Option<Point> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Discard a pending move, e.g. when the gesture ends before the frame.
    pub fn reset(&mut self) {
        self.pending = None;
    }

    /// Number of moves superseded before being drained.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
