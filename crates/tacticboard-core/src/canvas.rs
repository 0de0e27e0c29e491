//! Annotation canvas: tool-driven drawing, erasing and history.

use crate::config::CanvasConfig;
use crate::document::Document;
use crate::elements::{Element, ElementId, ElementStyle, ElementTrait, Text};
use crate::eraser::{self, EraserCircle};
use crate::geometry::clamp;
use crate::history::{History, HistoryError};
use crate::input::{Key, KeyEvent, PointerEvent};
use crate::prompt::{PendingPrompt, PromptRequest, PromptResponse};
use crate::tools::{Gesture, ToolKind, ToolManager};
use kurbo::{Point, Size};

/// Hit tolerance for selecting and grabbing elements.
const PICK_TOLERANCE: f64 = 4.0;

/// Default drawing surface size until the host reports one.
const DEFAULT_SIZE: Size = Size::new(800.0, 600.0);

/// The drawing surface laid over the field.
///
/// Owns the committed elements, the undo history and the current gesture.
/// History entry 0 is the empty canvas.
#[derive(Debug, Clone)]
pub struct AnnotationCanvas {
    document: Document,
    history: History,
    tools: ToolManager,
    config: CanvasConfig,
    size: Size,
    selected: Option<ElementId>,
    eraser_preview: Option<EraserCircle>,
}

impl Default for AnnotationCanvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl AnnotationCanvas {
    pub fn new(config: CanvasConfig) -> Self {
        let document = Document::new();
        // An empty element list always serializes.
        let initial = document.to_snapshot().unwrap_or_else(|_| "[]".to_string());
        Self {
            document,
            history: History::new(initial, config.history_limit),
            tools: ToolManager::new(),
            config,
            size: DEFAULT_SIZE,
            selected: None,
            eraser_preview: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn gesture(&self) -> &Gesture {
        &self.tools.gesture
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Eraser cursor to draw, if visible.
    pub fn eraser_preview(&self) -> Option<EraserCircle> {
        self.eraser_preview
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Style picked up by elements created from now on.
    pub fn style(&self) -> &ElementStyle {
        &self.tools.current_style
    }

    pub fn set_style(&mut self, style: ElementStyle) {
        self.tools.current_style = style;
    }

    /// Whether a text prompt is waiting for an answer.
    pub fn is_prompt_pending(&self) -> bool {
        matches!(self.tools.gesture, Gesture::AwaitingPrompt(_))
    }

    /// Serialized committed state.
    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        self.document.to_snapshot()
    }

    /// Record the live state as a new history entry.
    fn commit(&mut self, reason: &str) {
        match self.document.to_snapshot() {
            Ok(snapshot) => {
                self.history.push(snapshot);
                log::debug!("Canvas commit: {}", reason);
            }
            Err(err) => log::error!("Failed to snapshot canvas ({}): {}", reason, err),
        }
    }

    /// Switch tools, closing whatever the previous tool was doing.
    ///
    /// Ignored while a prompt is pending.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        if self.is_prompt_pending() {
            return false;
        }
        self.end_gesture();
        self.tools.set_tool(tool);
        self.eraser_preview = None;
        log::debug!("Tool: {}", tool.name());
        true
    }

    /// Close the current gesture the way a cancel would.
    ///
    /// Previews are discarded, a moved label goes back, and an eraser stroke
    /// that cut something is committed so history matches the canvas.
    fn end_gesture(&mut self) {
        match std::mem::take(&mut self.tools.gesture) {
            Gesture::Erasing { changed: true } => self.commit("erase"),
            Gesture::DraggingText { id, origin, .. } => {
                if let Some(text) = self.document.get_mut(id).and_then(Element::as_text_mut) {
                    text.position = origin;
                }
            }
            pending @ Gesture::AwaitingPrompt(_) => self.tools.gesture = pending,
            _ => {}
        }
        self.document.clear_temporary();
    }

    /// Dispatch a pointer event. Returns a prompt the host must show.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<PromptRequest> {
        match event {
            PointerEvent::Down { position, .. } => return self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => self.pointer_up(position),
            PointerEvent::Cancel => self.pointer_cancel(),
            PointerEvent::Leave => self.pointer_leave(),
            PointerEvent::DoubleClick { position } => return self.double_click(position),
        }
        None
    }

    fn text_at(&self, point: Point) -> Option<ElementId> {
        self.document
            .elements()
            .iter()
            .rev()
            .filter_map(Element::as_text)
            .find(|t| t.hit_test(point, PICK_TOLERANCE))
            .map(|t| t.id)
    }

    fn start_text_drag(&mut self, id: ElementId, point: Point) {
        if let Some(text) = self.document.get(id).and_then(Element::as_text) {
            self.tools.gesture = Gesture::DraggingText {
                id,
                grab: point - text.position,
                origin: text.position,
            };
        }
    }

    pub fn pointer_down(&mut self, point: Point) -> Option<PromptRequest> {
        if !self.tools.is_idle() {
            return None;
        }

        match self.tools.current_tool {
            ToolKind::Select => {
                let hit = self.document.element_at(point, PICK_TOLERANCE);
                self.selected = match hit {
                    Some(id) if self.selected == Some(id) => None,
                    other => other,
                };
                // Only the topmost element can be dragged, and only if it is a label.
                if let Some(id) = hit {
                    self.start_text_drag(id, point);
                }
                None
            }
            ToolKind::Text => {
                if let Some(id) = self.text_at(point) {
                    self.start_text_drag(id, point);
                    return None;
                }
                self.tools.gesture = Gesture::AwaitingPrompt(PendingPrompt::Create { at: point });
                Some(PromptRequest {
                    title: "Add text".to_string(),
                    placeholder: "Enter text...".to_string(),
                    default_value: String::new(),
                    allow_delete: false,
                    default_color: self.tools.current_style.stroke_color,
                    default_size: self.config.default_font_size,
                })
            }
            ToolKind::Eraser => {
                let circle = EraserCircle::new(point, self.tools.eraser_radius(&self.config));
                self.eraser_preview = Some(circle);
                let changed = eraser::erase(&mut self.document, circle, &self.config).changed();
                self.tools.gesture = Gesture::Erasing { changed };
                None
            }
            _ => {
                self.tools.begin_stroke(point);
                if let Some(preview) = self.tools.preview(point, &self.config) {
                    self.document.set_temporary(preview);
                }
                None
            }
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        if self.tools.current_tool == ToolKind::Eraser {
            let circle = EraserCircle::new(point, self.tools.eraser_radius(&self.config));
            self.eraser_preview = Some(circle);
            if let Gesture::Erasing { changed } = self.tools.gesture {
                let cut = eraser::erase(&mut self.document, circle, &self.config).changed();
                self.tools.gesture = Gesture::Erasing { changed: changed || cut };
            }
            return;
        }

        match &self.tools.gesture {
            Gesture::Shape { .. } | Gesture::Pen { .. } => {
                self.tools.extend_stroke(point);
                match self.tools.preview(point, &self.config) {
                    Some(preview) => self.document.set_temporary(preview),
                    None => self.document.clear_temporary(),
                }
            }
            Gesture::DraggingText { id, grab, .. } => {
                let (id, grab) = (*id, *grab);
                let target = point - grab;
                let x = clamp(target.x, 0.0, self.size.width - self.config.text_right_inset);
                let y = clamp(
                    target.y,
                    self.config.text_top_inset,
                    self.size.height - self.config.text_bottom_inset,
                );
                if let Some(text) = self.document.get_mut(id).and_then(Element::as_text_mut) {
                    text.position = Point::new(x, y);
                }
            }
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, point: Point) {
        match &self.tools.gesture {
            Gesture::Shape { .. } | Gesture::Pen { .. } => {
                self.document.clear_temporary();
                if let Some(element) = self.tools.finish_stroke(point, &self.config) {
                    let kind = element.kind_name();
                    self.document.add(element);
                    self.commit(kind);
                }
            }
            Gesture::Erasing { changed } => {
                let changed = *changed;
                self.tools.gesture = Gesture::Idle;
                if changed {
                    self.commit("erase");
                }
            }
            Gesture::DraggingText { id, origin, .. } => {
                let (id, origin) = (*id, *origin);
                self.tools.gesture = Gesture::Idle;
                let moved = self
                    .document
                    .get(id)
                    .and_then(Element::as_text)
                    .is_some_and(|t| t.position != origin);
                if moved {
                    self.commit("move text");
                }
            }
            Gesture::Idle | Gesture::AwaitingPrompt(_) => {}
        }
    }

    pub fn pointer_cancel(&mut self) {
        self.end_gesture();
    }

    pub fn pointer_leave(&mut self) {
        self.eraser_preview = None;
    }

    /// Open the edit prompt for the label under the pointer.
    pub fn double_click(&mut self, point: Point) -> Option<PromptRequest> {
        if !self.tools.is_idle() && !matches!(self.tools.gesture, Gesture::DraggingText { .. }) {
            return None;
        }
        let id = self.text_at(point)?;
        let text = self.document.get(id).and_then(Element::as_text)?.clone();
        // A double click arrives after the press that started a drag.
        self.end_gesture();
        self.tools.gesture = Gesture::AwaitingPrompt(PendingPrompt::Edit { id });
        Some(PromptRequest {
            title: "Edit text".to_string(),
            placeholder: "Enter text...".to_string(),
            default_value: text.content,
            allow_delete: true,
            default_color: text.style.stroke_color,
            default_size: text.font_size,
        })
    }

    /// Answer the pending text prompt. Returns whether the canvas changed.
    pub fn resolve_prompt(&mut self, response: PromptResponse) -> bool {
        let Gesture::AwaitingPrompt(pending) = self.tools.gesture else {
            log::warn!("Prompt response without a pending prompt");
            return false;
        };
        self.tools.gesture = Gesture::Idle;

        match (pending, response) {
            (PendingPrompt::Create { at }, PromptResponse::Submit { text, color, size }) => {
                if text.trim().is_empty() {
                    return false;
                }
                let style = ElementStyle {
                    stroke_color: color,
                    ..self.tools.current_style
                };
                self.document.add(Element::Text(Text::new(at, text, size, style)));
                self.commit("text");
                true
            }
            (PendingPrompt::Edit { id }, PromptResponse::Submit { text, color, size }) => {
                if text.trim().is_empty() {
                    return false;
                }
                let Some(label) = self.document.get_mut(id).and_then(Element::as_text_mut) else {
                    return false;
                };
                label.content = text;
                label.style.stroke_color = color;
                label.font_size = size;
                self.commit("edit text");
                true
            }
            (PendingPrompt::Edit { id }, PromptResponse::Delete) => {
                if self.document.remove(id).is_none() {
                    return false;
                }
                if self.selected == Some(id) {
                    self.selected = None;
                }
                self.commit("delete text");
                true
            }
            _ => false,
        }
    }

    /// Keyboard input. Returns whether the canvas changed.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let KeyEvent::Pressed(key) = event else {
            return false;
        };
        if self.is_prompt_pending() {
            return false;
        }
        match key {
            k if k.is_delete() => self.delete_selected(),
            Key::Escape => {
                self.end_gesture();
                self.selected = None;
                false
            }
            _ => false,
        }
    }

    /// Remove the selected element.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected.take() else {
            return false;
        };
        if self.document.remove(id).is_none() {
            return false;
        }
        self.commit("delete");
        true
    }

    /// Remove every element as a single history step.
    pub fn clear(&mut self) -> bool {
        if self.is_prompt_pending() {
            return false;
        }
        self.end_gesture();
        if self.document.is_empty() {
            return false;
        }
        self.document.clear();
        self.selected = None;
        self.commit("clear");
        true
    }

    fn reset_transients(&mut self) {
        self.end_gesture();
        self.selected = None;
        self.eraser_preview = None;
    }

    /// Step back one history entry. `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, HistoryError> {
        if self.is_prompt_pending() {
            return Ok(false);
        }
        self.reset_transients();
        let document = &mut self.document;
        let moved = self.history.undo(|s| document.restore_snapshot(s))?;
        if moved {
            log::debug!("Undo to entry {}", self.history.index());
        }
        Ok(moved)
    }

    /// Step forward one history entry. `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool, HistoryError> {
        if self.is_prompt_pending() {
            return Ok(false);
        }
        self.reset_transients();
        let document = &mut self.document;
        let moved = self.history.redo(|s| document.restore_snapshot(s))?;
        if moved {
            log::debug!("Redo to entry {}", self.history.index());
        }
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Line, PenPath, SerializableColor};
    use crate::input::PointerKind;
    use crate::path::PathSpec;

    fn drag(canvas: &mut AnnotationCanvas, from: (f64, f64), to: (f64, f64)) {
        canvas.pointer_down(Point::new(from.0, from.1));
        canvas.pointer_move(Point::new((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0));
        canvas.pointer_move(Point::new(to.0, to.1));
        canvas.pointer_up(Point::new(to.0, to.1));
    }

    fn submit(text: &str) -> PromptResponse {
        PromptResponse::Submit {
            text: text.to_string(),
            color: SerializableColor::black(),
            size: 18.0,
        }
    }

    #[test]
    fn test_rectangle_scenario() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, (10.0, 10.0), (110.0, 60.0));

        assert_eq!(canvas.document().len(), 1);
        assert!(canvas.document().temporary().is_none());
        match &canvas.document().elements()[0] {
            Element::Rectangle(r) => {
                assert_eq!(r.position, Point::new(10.0, 10.0));
                assert_eq!(r.width, 100.0);
                assert_eq!(r.height, 50.0);
            }
            other => panic!("expected rectangle, got {:?}", other),
        }
        assert_eq!(canvas.history().len(), 2);
    }

    #[test]
    fn test_preview_replaced_every_move() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Circle);
        canvas.pointer_down(Point::new(100.0, 100.0));
        canvas.pointer_move(Point::new(110.0, 100.0));
        canvas.pointer_move(Point::new(130.0, 100.0));

        assert!(canvas.document().is_empty());
        match canvas.document().temporary() {
            Some(Element::Circle(c)) => assert!((c.radius - 30.0).abs() < 1e-9),
            other => panic!("expected circle preview, got {:?}", other),
        }
    }

    #[test]
    fn test_pen_single_point_commits_nothing() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Pen);
        canvas.pointer_down(Point::new(5.0, 5.0));
        canvas.pointer_up(Point::new(5.0, 5.0));
        assert!(canvas.document().is_empty());
        assert_eq!(canvas.history().len(), 1);

        drag(&mut canvas, (0.0, 0.0), (40.0, 40.0));
        assert!(matches!(canvas.document().elements()[0], Element::Path(_)));
        assert_eq!(canvas.history().len(), 2);
    }

    #[test]
    fn test_switching_tool_discards_preview() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Line);
        canvas.pointer_down(Point::new(0.0, 0.0));
        canvas.pointer_move(Point::new(50.0, 0.0));
        assert!(canvas.document().temporary().is_some());

        canvas.set_tool(ToolKind::Eraser);
        assert!(canvas.document().temporary().is_none());
        assert_eq!(*canvas.gesture(), Gesture::Idle);
        assert!(canvas.document().is_empty());
    }

    #[test]
    fn test_undo_then_redo_is_byte_identical() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Arrow);
        drag(&mut canvas, (10.0, 10.0), (200.0, 75.5));
        canvas.set_tool(ToolKind::Pen);
        drag(&mut canvas, (1.0, 2.0), (33.3, 44.4));

        let before = canvas.snapshot().unwrap();
        assert!(canvas.undo().unwrap());
        assert_ne!(canvas.snapshot().unwrap(), before);
        assert!(canvas.redo().unwrap());
        assert_eq!(canvas.snapshot().unwrap(), before);
    }

    #[test]
    fn test_undo_to_empty_and_bounds() {
        let mut canvas = AnnotationCanvas::default();
        assert!(!canvas.undo().unwrap());
        canvas.set_tool(ToolKind::Line);
        drag(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        assert!(canvas.undo().unwrap());
        assert!(canvas.document().is_empty());
        assert!(!canvas.undo().unwrap());
        assert!(canvas.redo().unwrap());
        assert!(!canvas.redo().unwrap());
    }

    #[test]
    fn test_new_draw_truncates_redo() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Line);
        drag(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        drag(&mut canvas, (20.0, 0.0), (30.0, 10.0));
        canvas.undo().unwrap();
        drag(&mut canvas, (40.0, 0.0), (50.0, 10.0));

        let before = canvas.snapshot().unwrap();
        assert!(!canvas.redo().unwrap());
        assert_eq!(canvas.snapshot().unwrap(), before);
        assert_eq!(canvas.document().len(), 2);
    }

    #[test]
    fn test_eraser_stroke_is_one_entry() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Line);
        drag(&mut canvas, (0.0, 0.0), (100.0, 0.0));
        drag(&mut canvas, (0.0, 50.0), (100.0, 50.0));
        let entries = canvas.history().len();

        canvas.set_tool(ToolKind::Eraser);
        canvas.pointer_down(Point::new(50.0, 0.0));
        canvas.pointer_move(Point::new(50.0, 25.0));
        canvas.pointer_move(Point::new(50.0, 50.0));
        canvas.pointer_up(Point::new(50.0, 50.0));

        assert_eq!(canvas.history().len(), entries + 1);
        assert_eq!(canvas.document().len(), 4);
        assert_eq!(canvas.history().current(), canvas.snapshot().unwrap());
    }

    #[test]
    fn test_eraser_without_effect_adds_no_entry() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Eraser);
        canvas.pointer_down(Point::new(50.0, 50.0));
        canvas.pointer_move(Point::new(60.0, 50.0));
        canvas.pointer_up(Point::new(60.0, 50.0));
        assert_eq!(canvas.history().len(), 1);
    }

    #[test]
    fn test_eraser_three_region_path() {
        let mut canvas = AnnotationCanvas::default();
        let mut style = ElementStyle::default();
        style.stroke_width = 2.0;
        canvas.set_style(style);
        canvas.document.add(Element::Path(PenPath::new(
            PathSpec::from("M 0 0 L 10 0 L 20 0 L 50 0 L 80 0 L 90 0 L 50 5 L 10 5 L 0 5"),
            style,
        )));
        canvas.commit("seed");
        let entries = canvas.history().len();

        canvas.set_tool(ToolKind::Eraser);
        canvas.pointer_down(Point::new(50.0, 0.0));
        canvas.pointer_up(Point::new(50.0, 0.0));

        assert_eq!(canvas.document().len(), 3);
        assert_eq!(canvas.history().len(), entries + 1);
    }

    #[test]
    fn test_eraser_preview_follows_and_hides() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Eraser);
        canvas.pointer_move(Point::new(10.0, 10.0));
        let preview = canvas.eraser_preview().unwrap();
        assert_eq!(preview.radius, canvas.style().stroke_width * 5.0);
        canvas.pointer_leave();
        assert!(canvas.eraser_preview().is_none());

        canvas.pointer_move(Point::new(10.0, 10.0));
        canvas.set_tool(ToolKind::Select);
        assert!(canvas.eraser_preview().is_none());
    }

    #[test]
    fn test_tool_switch_mid_erase_commits() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Line);
        drag(&mut canvas, (0.0, 0.0), (100.0, 0.0));
        canvas.set_tool(ToolKind::Eraser);
        canvas.pointer_down(Point::new(50.0, 0.0));
        canvas.set_tool(ToolKind::Select);
        assert_eq!(canvas.history().current(), canvas.snapshot().unwrap());
        assert_eq!(canvas.history().len(), 3);
    }

    #[test]
    fn test_select_toggle_and_delete() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Line);
        drag(&mut canvas, (0.0, 0.0), (100.0, 0.0));
        canvas.set_tool(ToolKind::Select);

        canvas.pointer_down(Point::new(50.0, 1.0));
        canvas.pointer_up(Point::new(50.0, 1.0));
        let id = canvas.selected().unwrap();
        canvas.pointer_down(Point::new(50.0, 1.0));
        canvas.pointer_up(Point::new(50.0, 1.0));
        assert!(canvas.selected().is_none());

        canvas.pointer_down(Point::new(50.0, 1.0));
        canvas.pointer_up(Point::new(50.0, 1.0));
        assert_eq!(canvas.selected(), Some(id));
        canvas.pointer_down(Point::new(400.0, 400.0));
        canvas.pointer_up(Point::new(400.0, 400.0));
        assert!(canvas.selected().is_none());

        canvas.pointer_down(Point::new(50.0, 1.0));
        canvas.pointer_up(Point::new(50.0, 1.0));
        assert!(canvas.handle_key(&KeyEvent::Pressed(Key::Backspace)));
        assert!(canvas.document().is_empty());
        assert_eq!(canvas.history().len(), 3);
        assert!(!canvas.handle_key(&KeyEvent::Pressed(Key::Delete)));
    }

    #[test]
    fn test_undo_clears_selection_and_preview() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Line);
        drag(&mut canvas, (0.0, 0.0), (100.0, 0.0));
        drag(&mut canvas, (0.0, 50.0), (100.0, 50.0));
        canvas.set_tool(ToolKind::Select);
        canvas.pointer_down(Point::new(50.0, 0.0));
        canvas.pointer_up(Point::new(50.0, 0.0));
        assert!(canvas.selected().is_some());

        canvas.undo().unwrap();
        assert!(canvas.selected().is_none());
        assert!(canvas.eraser_preview().is_none());
    }

    #[test]
    fn test_text_create_and_cancel() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Text);

        let request = canvas.pointer_down(Point::new(100.0, 100.0)).unwrap();
        assert!(!request.allow_delete);
        assert!(canvas.is_prompt_pending());
        // Input is ignored while the prompt is open.
        assert!(!canvas.set_tool(ToolKind::Line));
        assert!(canvas.pointer_down(Point::new(5.0, 5.0)).is_none());

        assert!(!canvas.resolve_prompt(PromptResponse::Cancel));
        assert!(canvas.document().is_empty());
        assert_eq!(canvas.history().len(), 1);
        assert!(!canvas.is_prompt_pending());

        canvas.pointer_down(Point::new(100.0, 100.0)).unwrap();
        assert!(canvas.resolve_prompt(submit("4-3-3")));
        let text = canvas.document().elements()[0].as_text().unwrap();
        assert_eq!(text.content, "4-3-3");
        assert_eq!(text.position, Point::new(100.0, 100.0));
        assert_eq!(text.font_size, 18.0);
        assert_eq!(canvas.history().len(), 2);
    }

    #[test]
    fn test_text_empty_submit_is_noop() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Text);
        canvas.pointer_down(Point::new(10.0, 30.0));
        assert!(!canvas.resolve_prompt(submit("   ")));
        assert!(canvas.document().is_empty());
        assert!(!canvas.resolve_prompt(submit("late")));
    }

    #[test]
    fn test_text_drag_clamped_and_committed() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_size(Size::new(400.0, 300.0));
        canvas.set_tool(ToolKind::Text);
        canvas.pointer_down(Point::new(100.0, 100.0));
        canvas.resolve_prompt(submit("X"));
        let entries = canvas.history().len();

        canvas.set_tool(ToolKind::Select);
        canvas.pointer_down(Point::new(102.0, 95.0));
        canvas.pointer_move(Point::new(1000.0, -500.0));
        canvas.pointer_up(Point::new(1000.0, -500.0));

        let text = canvas.document().elements()[0].as_text().unwrap();
        assert_eq!(text.position, Point::new(350.0, 14.0));
        assert_eq!(canvas.history().len(), entries + 1);

        // Press and release without moving: no entry.
        canvas.pointer_down(Point::new(352.0, 10.0));
        canvas.pointer_up(Point::new(352.0, 10.0));
        assert_eq!(canvas.history().len(), entries + 1);
    }

    #[test]
    fn test_select_over_covered_text_does_not_drag_it() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Text);
        canvas.pointer_down(Point::new(100.0, 100.0));
        canvas.resolve_prompt(submit("X"));
        canvas.set_tool(ToolKind::Line);
        drag(&mut canvas, (80.0, 95.0), (130.0, 95.0));
        let line_id = canvas.document().elements()[1].id();

        canvas.set_tool(ToolKind::Select);
        canvas.pointer_down(Point::new(102.0, 95.0));
        assert_eq!(canvas.selected(), Some(line_id));
        assert_eq!(canvas.gesture(), &Gesture::Idle);
        canvas.pointer_move(Point::new(200.0, 200.0));
        canvas.pointer_up(Point::new(200.0, 200.0));

        let text = canvas.document().elements()[0].as_text().unwrap();
        assert_eq!(text.position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_text_drag_cancel_restores_position() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Text);
        canvas.pointer_down(Point::new(100.0, 100.0));
        canvas.resolve_prompt(submit("X"));

        canvas.handle_pointer(PointerEvent::Down { position: Point::new(102.0, 95.0), kind: PointerKind::Mouse });
        canvas.handle_pointer(PointerEvent::Move { position: Point::new(200.0, 200.0) });
        canvas.handle_pointer(PointerEvent::Cancel);
        let text = canvas.document().elements()[0].as_text().unwrap();
        assert_eq!(text.position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_double_click_edit_and_delete() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Text);
        canvas.pointer_down(Point::new(100.0, 100.0));
        canvas.resolve_prompt(submit("old"));

        let request = canvas.double_click(Point::new(103.0, 95.0)).unwrap();
        assert!(request.allow_delete);
        assert_eq!(request.default_value, "old");
        assert!(canvas.resolve_prompt(PromptResponse::Submit {
            text: "new".to_string(),
            color: SerializableColor::white(),
            size: 30.0,
        }));
        let text = canvas.document().elements()[0].as_text().unwrap();
        assert_eq!(text.content, "new");
        assert_eq!(text.style.stroke_color, SerializableColor::white());

        canvas.double_click(Point::new(103.0, 95.0)).unwrap();
        assert!(canvas.resolve_prompt(PromptResponse::Delete));
        assert!(canvas.document().is_empty());
        assert_eq!(canvas.history().len(), 4);
    }

    #[test]
    fn test_clear_is_one_entry() {
        let mut canvas = AnnotationCanvas::default();
        assert!(!canvas.clear());
        canvas.set_tool(ToolKind::Line);
        drag(&mut canvas, (0.0, 0.0), (10.0, 0.0));
        drag(&mut canvas, (0.0, 10.0), (10.0, 10.0));
        assert!(canvas.clear());
        assert!(canvas.document().is_empty());
        assert_eq!(canvas.history().len(), 4);
        canvas.undo().unwrap();
        assert_eq!(canvas.document().len(), 2);
    }

    #[test]
    fn test_style_is_not_live_bound() {
        let mut canvas = AnnotationCanvas::default();
        canvas.set_tool(ToolKind::Line);
        drag(&mut canvas, (0.0, 0.0), (10.0, 0.0));
        let mut style = *canvas.style();
        style.stroke_width = 9.0;
        canvas.set_style(style);
        let line: &Line = match &canvas.document().elements()[0] {
            Element::Line(l) => l,
            other => panic!("expected line, got {:?}", other),
        };
        assert_eq!(line.style().stroke_width, ElementStyle::default().stroke_width);
    }
}
