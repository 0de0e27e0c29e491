//! Drawing tools and the gesture state they drive.

use crate::config::CanvasConfig;
use crate::elements::{Arrow, Circle, Element, ElementId, ElementStyle, Line, PenPath, Rectangle};
use crate::prompt::PendingPrompt;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Line,
    Arrow,
    Circle,
    Rectangle,
    Pen,
    Text,
    Eraser,
}

impl ToolKind {
    /// Tools that drag out a two-point shape.
    pub fn is_shape(&self) -> bool {
        matches!(self, ToolKind::Line | ToolKind::Arrow | ToolKind::Circle | ToolKind::Rectangle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Line => "line",
            ToolKind::Arrow => "arrow",
            ToolKind::Circle => "circle",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Pen => "pen",
            ToolKind::Text => "text",
            ToolKind::Eraser => "eraser",
        }
    }

    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Select,
            ToolKind::Line,
            ToolKind::Arrow,
            ToolKind::Circle,
            ToolKind::Rectangle,
            ToolKind::Pen,
            ToolKind::Text,
            ToolKind::Eraser,
        ]
    }
}

/// The one interaction in progress on the canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Dragging out a line, arrow, circle or rectangle.
    Shape { tool: ToolKind, start: Point },
    /// Freehand trace.
    Pen { points: Vec<Point> },
    /// Eraser button held; `changed` once anything was cut.
    Erasing { changed: bool },
    /// Moving a text label.
    DraggingText { id: ElementId, grab: Vec2, origin: Point },
    /// Waiting for the host's text prompt.
    AwaitingPrompt(PendingPrompt),
}

/// Build the element a shape tool produces for a drag from `start` to `end`.
pub fn build_shape(
    tool: ToolKind,
    start: Point,
    end: Point,
    style: ElementStyle,
    config: &CanvasConfig,
) -> Option<Element> {
    let element = match tool {
        ToolKind::Line => Element::Line(Line::new(start, end, style)),
        ToolKind::Arrow => Element::Arrow(Arrow::new(start, end, style, config)),
        ToolKind::Circle => Element::Circle(Circle::from_drag(start, end, style)),
        ToolKind::Rectangle => Element::Rectangle(Rectangle::from_corners(start, end, style)),
        _ => return None,
    };
    Some(element)
}

/// Current tool, its gesture, and the style new elements pick up.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    pub current_tool: ToolKind,
    pub gesture: Gesture,
    pub current_style: ElementStyle,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch tools, returning the interrupted gesture.
    pub fn set_tool(&mut self, tool: ToolKind) -> Gesture {
        self.current_tool = tool;
        std::mem::take(&mut self.gesture)
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// Start a shape or pen gesture. Other tools leave the gesture alone.
    pub fn begin_stroke(&mut self, point: Point) -> bool {
        self.gesture = match self.current_tool {
            tool if tool.is_shape() => Gesture::Shape { tool, start: point },
            ToolKind::Pen => Gesture::Pen { points: vec![point] },
            _ => return false,
        };
        true
    }

    /// Record pointer movement for a pen gesture.
    pub fn extend_stroke(&mut self, point: Point) {
        if let Gesture::Pen { points } = &mut self.gesture {
            points.push(point);
        }
    }

    /// Preview element for the stroke in progress, with the pointer at `current`.
    pub fn preview(&self, current: Point, config: &CanvasConfig) -> Option<Element> {
        match &self.gesture {
            Gesture::Shape { tool, start } => {
                build_shape(*tool, *start, current, self.current_style, config)
            }
            Gesture::Pen { points } if points.len() >= 2 => {
                Some(Element::Path(PenPath::from_points(points, self.current_style)))
            }
            _ => None,
        }
    }

    /// Finish the stroke, returning the element to commit.
    ///
    /// A pen trace shorter than two points produces nothing.
    pub fn finish_stroke(&mut self, end: Point, config: &CanvasConfig) -> Option<Element> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Shape { tool, start } => build_shape(tool, start, end, self.current_style, config),
            Gesture::Pen { points } if points.len() >= 2 => {
                Some(Element::Path(PenPath::from_points(&points, self.current_style)))
            }
            Gesture::Pen { .. } => None,
            other => {
                self.gesture = other;
                None
            }
        }
    }

    /// Eraser radius for the current stroke width.
    pub fn eraser_radius(&self, config: &CanvasConfig) -> f64 {
        self.current_style.stroke_width * config.eraser_radius_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_stroke_lifecycle() {
        let config = CanvasConfig::default();
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Rectangle);
        assert!(tools.begin_stroke(Point::new(10.0, 10.0)));

        let preview = tools.preview(Point::new(50.0, 50.0), &config);
        assert!(matches!(preview, Some(Element::Rectangle(_))));

        match tools.finish_stroke(Point::new(110.0, 60.0), &config) {
            Some(Element::Rectangle(r)) => {
                assert_eq!(r.position, Point::new(10.0, 10.0));
                assert_eq!((r.width, r.height), (100.0, 50.0));
            }
            other => panic!("expected rectangle, got {:?}", other),
        }
        assert!(tools.is_idle());
    }

    #[test]
    fn test_pen_needs_two_points() {
        let config = CanvasConfig::default();
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Pen);
        tools.begin_stroke(Point::new(0.0, 0.0));
        assert!(tools.preview(Point::new(0.0, 0.0), &config).is_none());
        assert!(tools.finish_stroke(Point::new(0.0, 0.0), &config).is_none());
        assert!(tools.is_idle());

        tools.begin_stroke(Point::new(0.0, 0.0));
        tools.extend_stroke(Point::new(5.0, 5.0));
        assert!(matches!(tools.finish_stroke(Point::new(5.0, 5.0), &config), Some(Element::Path(_))));
    }

    #[test]
    fn test_select_does_not_stroke() {
        let mut tools = ToolManager::new();
        assert!(!tools.begin_stroke(Point::ZERO));
        assert!(tools.is_idle());
    }

    #[test]
    fn test_set_tool_returns_interrupted_gesture() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Line);
        tools.begin_stroke(Point::ZERO);
        let interrupted = tools.set_tool(ToolKind::Eraser);
        assert!(matches!(interrupted, Gesture::Shape { tool: ToolKind::Line, .. }));
        assert!(tools.is_idle());
    }

    #[test]
    fn test_style_captured_at_creation() {
        let config = CanvasConfig::default();
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Line);
        tools.current_style.stroke_width = 7.0;
        let element = build_shape(ToolKind::Line, Point::ZERO, Point::new(1.0, 1.0), tools.current_style, &config);
        tools.current_style.stroke_width = 1.0;
        assert_eq!(element.map(|e| e.style().stroke_width), Some(7.0));
    }

    #[test]
    fn test_eraser_radius_scales_with_stroke() {
        let mut tools = ToolManager::new();
        tools.current_style.stroke_width = 4.0;
        assert_eq!(tools.eraser_radius(&CanvasConfig::default()), 20.0);
    }
}
