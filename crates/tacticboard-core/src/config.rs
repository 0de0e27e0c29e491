//! Tunable constants for the board and the drawing canvas.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! { "board": { "card_width": 100.0 }, "canvas": { "history_limit": 20 } }
//! ```

use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Drag, drop and layout parameters for the formation board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub card_width: f64,
    pub card_height: f64,
    /// Inset kept between a card and the field edge.
    pub field_margin: f64,
    /// Inset kept between a card and the container edge.
    pub container_margin: f64,
    /// Distance from the clamp bounds inside which a card follows the raw pointer.
    pub edge_relax: f64,
    /// Distance outside the field that still counts as the field.
    pub magnet_distance: f64,
    /// Slack around the pool rectangle for drops near its scrollbar.
    pub pool_tolerance: f64,
    pub grid_columns: usize,
    pub grid_offset: f64,
    pub grid_step_x: f64,
    pub grid_step_y: f64,
    /// Side length of the square field marker.
    pub marker_size: f64,
}

impl BoardConfig {
    pub fn card_size(&self) -> Size {
        Size::new(self.card_width, self.card_height)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            card_width: 120.0,
            card_height: 160.0,
            field_margin: 12.0,
            container_margin: 6.0,
            edge_relax: 30.0,
            magnet_distance: 14.0,
            pool_tolerance: 24.0,
            grid_columns: 5,
            grid_offset: 50.0,
            grid_step_x: 130.0,
            grid_step_y: 170.0,
            marker_size: 40.0,
        }
    }
}

/// Drawing, erasing and history parameters for the annotation canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Maximum number of history entries kept.
    pub history_limit: usize,
    /// Eraser radius as a multiple of the stroke width.
    pub eraser_radius_factor: f64,
    /// Line pieces shorter than this are discarded after a cut.
    pub min_line_length: f64,
    pub arrowhead_min_length: f64,
    pub arrowhead_length_factor: f64,
    /// Half-angle between the shaft and each barb.
    pub arrowhead_angle_deg: f64,
    /// An arrowhead is erased when its box center is within this many eraser radii.
    pub eraser_head_factor: f64,
    pub text_right_inset: f64,
    pub text_top_inset: f64,
    pub text_bottom_inset: f64,
    pub default_font_size: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            eraser_radius_factor: 5.0,
            min_line_length: 2.0,
            arrowhead_min_length: 10.0,
            arrowhead_length_factor: 3.0,
            arrowhead_angle_deg: 30.0,
            eraser_head_factor: 1.5,
            text_right_inset: 50.0,
            text_top_inset: 14.0,
            text_bottom_inset: 5.0,
            default_font_size: 20.0,
        }
    }
}

/// Combined configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,
    pub canvas: CanvasConfig,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
