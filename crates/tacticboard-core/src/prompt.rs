//! Seams to the host's modal dialogs.
//!
//! Text prompts are asynchronous on the host side, so the canvas hands out a
//! [`PromptRequest`] and later receives the matching [`PromptResponse`].
//! Confirmations are answered synchronously through [`Confirm`].

use crate::elements::{ElementId, SerializableColor};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Parameters for the host's text prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRequest {
    pub title: String,
    pub placeholder: String,
    pub default_value: String,
    /// Show a delete button (editing an existing label).
    pub allow_delete: bool,
    pub default_color: SerializableColor,
    pub default_size: f64,
}

/// The host's answer to a [`PromptRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PromptResponse {
    Submit {
        text: String,
        color: SerializableColor,
        size: f64,
    },
    Delete,
    Cancel,
}

/// What a pending prompt will act on once answered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingPrompt {
    /// New label at this point.
    Create { at: Point },
    /// Edit or delete an existing label.
    Edit { id: ElementId },
}

/// Yes/no confirmation for destructive actions.
pub trait Confirm {
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str, &str) -> bool,
{
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self(title, message)
    }
}
