//! Geometric eraser: cuts, trims and removes elements under a circular cursor.

use crate::config::CanvasConfig;
use crate::document::Document;
use crate::elements::{Arrow, Element, ElementId, Line, PenPath};
use crate::geometry::{closest_point_on_rect, distance, segment_span_in_circle, ROOT_EPSILON};
use crate::path;
use kurbo::Point;

/// The eraser cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EraserCircle {
    pub center: Point,
    pub radius: f64,
}

impl EraserCircle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    fn covers(&self, point: Point) -> bool {
        distance(point, self.center) <= self.radius
    }

    /// Parameter range of `a → b` under the cursor, ignoring tangent touches.
    fn cut(&self, a: Point, b: Point) -> Option<(f64, f64)> {
        segment_span_in_circle(a, b, self.center, self.radius)
            .filter(|(t0, t1)| t1 - t0 > ROOT_EPSILON)
    }
}

/// What happens to one element under the cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum EraseAction {
    Keep,
    Remove,
    /// Same element, new geometry.
    Update(Element),
    /// Element replaced by the given pieces (possibly none).
    Replace(Vec<Element>),
}

/// Summary of one erase pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EraseOutcome {
    pub removed: Vec<ElementId>,
    pub updated: Vec<ElementId>,
    pub created: Vec<ElementId>,
}

impl EraseOutcome {
    pub fn changed(&self) -> bool {
        !(self.removed.is_empty() && self.updated.is_empty() && self.created.is_empty())
    }
}

/// Pieces of `a → b` left outside the cut `[t0, t1]` that are long enough to keep.
fn surviving_pieces(
    a: Point,
    b: Point,
    (t0, t1): (f64, f64),
    min_len: f64,
) -> (Option<(Point, Point)>, Option<(Point, Point)>) {
    let head = (t0 > 0.0).then(|| (a, a.lerp(b, t0)));
    let tail = (t1 < 1.0).then(|| (a.lerp(b, t1), b));
    let long_enough = |piece: &(Point, Point)| distance(piece.0, piece.1) > min_len;
    (head.filter(long_enough), tail.filter(long_enough))
}

fn erase_line(line: &Line, eraser: EraserCircle, config: &CanvasConfig) -> EraseAction {
    let Some(span) = eraser.cut(line.start, line.end) else {
        return EraseAction::Keep;
    };
    let (head, tail) = surviving_pieces(line.start, line.end, span, config.min_line_length);
    let pieces: Vec<Element> = [head, tail]
        .into_iter()
        .flatten()
        .map(|(a, b)| Element::Line(Line::new(a, b, line.style)))
        .collect();
    if pieces.is_empty() {
        EraseAction::Remove
    } else {
        EraseAction::Replace(pieces)
    }
}

fn erase_arrow(arrow: &Arrow, eraser: EraserCircle, config: &CanvasConfig) -> EraseAction {
    let head_hit = distance(arrow.head.bounds().center(), eraser.center)
        <= eraser.radius * config.eraser_head_factor;
    let span = eraser.cut(arrow.start, arrow.end);

    match (span, head_hit) {
        (None, false) => EraseAction::Keep,
        // Only the head was touched: the shaft lives on as a plain line.
        (None, true) => EraseAction::Replace(vec![Element::Line(arrow.shaft())]),
        (Some(span), _) => {
            let (head, tail) = surviving_pieces(arrow.start, arrow.end, span, config.min_line_length);
            let mut pieces = Vec::new();
            if let Some((a, b)) = head {
                pieces.push(Element::Line(Line::new(a, b, arrow.style)));
            }
            if let Some((a, b)) = tail {
                if head_hit {
                    pieces.push(Element::Line(Line::new(a, b, arrow.style)));
                } else {
                    pieces.push(Element::Arrow(arrow.with_start(a)));
                }
            }
            if pieces.is_empty() {
                EraseAction::Remove
            } else {
                EraseAction::Replace(pieces)
            }
        }
    }
}

fn erase_path(pen: &PenPath, eraser: EraserCircle) -> EraseAction {
    let marked = mark_path_segments(&pen.segments(), eraser);
    if !marked.iter().any(|(_, inside)| *inside) {
        return EraseAction::Keep;
    }

    let mut groups = path::split_marked(marked);
    match groups.len() {
        0 => EraseAction::Remove,
        1 => {
            let mut updated = pen.clone();
            updated.data = path::render(&groups.remove(0));
            EraseAction::Update(Element::Path(updated))
        }
        _ => EraseAction::Replace(
            groups
                .iter()
                .map(|g| Element::Path(PenPath::new(path::render(g), pen.style)))
                .collect(),
        ),
    }
}

/// Flag each segment the cursor touches.
///
/// A segment is touched when its end is covered or its chord from the previous
/// end crosses the circle. Straight segments are cut at the circle so the parts
/// outside survive; curves are dropped whole.
fn mark_path_segments(segments: &[path::Segment], eraser: EraserCircle) -> Vec<(path::Segment, bool)> {
    let mut marked = Vec::with_capacity(segments.len());
    let mut prev: Option<Point> = None;

    for &segment in segments {
        let span = match (segment.kind, prev) {
            (path::SegmentKind::Move, _) | (_, None) => None,
            (_, Some(start)) => eraser.cut(start, segment.end).map(|span| (start, span)),
        };
        match (segment.kind, span) {
            (path::SegmentKind::Line, Some((start, (t0, t1)))) => {
                if t0 > 0.0 {
                    marked.push((path::Segment::line_to(start.lerp(segment.end, t0)), false));
                }
                marked.push((path::Segment::line_to(start.lerp(segment.end, t1)), true));
                if t1 < 1.0 {
                    marked.push((path::Segment::move_to(start.lerp(segment.end, t1)), false));
                    marked.push((segment, false));
                }
            }
            (_, span) => marked.push((segment, span.is_some() || eraser.covers(segment.end))),
        }
        prev = Some(segment.end);
    }
    marked
}

/// Decide what the cursor does to a single element.
pub fn erase_element(element: &Element, eraser: EraserCircle, config: &CanvasConfig) -> EraseAction {
    let hit = match element {
        Element::Line(line) => return erase_line(line, eraser, config),
        Element::Arrow(arrow) => return erase_arrow(arrow, eraser, config),
        Element::Path(pen) => return erase_path(pen, eraser),
        Element::Circle(circle) => distance(circle.center, eraser.center) <= eraser.radius + circle.radius,
        Element::Rectangle(rect) => eraser.covers(closest_point_on_rect(eraser.center, rect.as_rect())),
        Element::Text(text) => eraser.covers(text.position),
    };
    if hit { EraseAction::Remove } else { EraseAction::Keep }
}

/// Apply the cursor to every element of the document.
///
/// A touched temporary preview is simply discarded.
pub fn erase(document: &mut Document, eraser: EraserCircle, config: &CanvasConfig) -> EraseOutcome {
    let mut outcome = EraseOutcome::default();

    let preview_touched = document
        .temporary()
        .is_some_and(|temp| erase_element(temp, eraser, config) != EraseAction::Keep);
    if preview_touched {
        document.clear_temporary();
    }

    let actions: Vec<(ElementId, EraseAction)> = document
        .elements()
        .iter()
        .map(|e| (e.id(), erase_element(e, eraser, config)))
        .filter(|(_, action)| *action != EraseAction::Keep)
        .collect();

    for (id, action) in actions {
        match action {
            EraseAction::Keep => {}
            EraseAction::Remove => {
                document.remove(id);
                outcome.removed.push(id);
            }
            EraseAction::Update(element) => {
                if let Some(slot) = document.get_mut(id) {
                    *slot = element;
                    outcome.updated.push(id);
                }
            }
            EraseAction::Replace(pieces) => {
                outcome.created.extend(pieces.iter().map(Element::id));
                document.replace(id, pieces);
                outcome.removed.push(id);
            }
        }
    }

    if outcome.changed() {
        log::debug!(
            "Erase at ({:.1}, {:.1}): {} removed, {} updated, {} created",
            eraser.center.x,
            eraser.center.y,
            outcome.removed.len(),
            outcome.updated.len(),
            outcome.created.len()
        );
    }
    outcome
}
