//! Player board: drop surfaces, card placements, the drag engine and the
//! coordinator that projects them against the roster.

mod coordinator;
mod drag;
mod placement;
mod surface;

pub use coordinator::{Board, BoardView, CardView, PoolSource};
pub use drag::{
    DragEngine, DragSession, DragState, DragVisual, DropResolution, DropRule, Placeholder, PressTarget,
};
pub use placement::{Placement, PlacementMap};
pub use surface::{Surface, SurfaceLayout};
