//! TacticBoard Core Library
//!
//! Platform-agnostic model of the formation board: player cards dragged
//! between the pool, the field and its container, plus the vector annotation
//! canvas drawn over the field with its eraser and undo history.

pub mod board;
pub mod canvas;
pub mod config;
pub mod document;
pub mod elements;
pub mod eraser;
pub mod geometry;
pub mod history;
pub mod input;
pub mod path;
pub mod prompt;
pub mod roster;
pub mod storage;
pub mod tools;

pub use board::{Board, BoardView, DragEngine, DropResolution, PoolSource, Surface, SurfaceLayout};
pub use canvas::AnnotationCanvas;
pub use config::{BoardConfig, CanvasConfig, Config, ConfigError};
pub use document::Document;
pub use elements::{Element, ElementId, ElementStyle, SerializableColor};
pub use history::{History, HistoryError};
pub use input::{FrameCoalescer, Key, KeyEvent, PointerEvent, PointerKind};
pub use path::{PathError, PathSpec, Segment};
pub use prompt::{Confirm, PromptRequest, PromptResponse};
pub use roster::{Item, ItemId, MemoryRoster, PoolFilter, Role, RosterFile, RosterStore};
pub use storage::{Storage, StorageError, StorageResult};
pub use tools::{Gesture, ToolKind, ToolManager};
