//! Element store for the annotation canvas.

use crate::elements::{Element, ElementId};
use kurbo::Point;

/// Committed elements in paint order plus at most one in-progress preview.
///
/// Only committed elements are part of a snapshot; the temporary element
/// lives for a single draw gesture.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Committed elements, back to front.
    elements: Vec<Element>,
    temporary: Option<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit an element on top of the others.
    pub fn add(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    /// Replace an element with zero or more elements at the same paint depth.
    pub fn replace(&mut self, id: ElementId, replacements: Vec<Element>) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.elements.splice(index..=index, replacements);
        true
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Committed elements, back to front.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(Element::id).collect()
    }

    /// Topmost committed element under `point`.
    pub fn element_at(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.hit_test(point, tolerance))
            .map(Element::id)
    }

    pub fn temporary(&self) -> Option<&Element> {
        self.temporary.as_ref()
    }

    /// Swap in a new preview, discarding the previous one.
    pub fn set_temporary(&mut self, element: Element) {
        self.temporary = Some(element);
    }

    pub fn take_temporary(&mut self) -> Option<Element> {
        self.temporary.take()
    }

    pub fn clear_temporary(&mut self) {
        self.temporary = None;
    }

    /// Remove every committed element and the preview.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.temporary = None;
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Serialize the committed elements.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.elements)
    }

    /// Replace the committed elements from a snapshot. Leaves the document
    /// untouched on error.
    pub fn restore_snapshot(&mut self, snapshot: &str) -> Result<(), serde_json::Error> {
        let elements: Vec<Element> = serde_json::from_str(snapshot)?;
        self.elements = elements;
        self.temporary = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementStyle, Line, Rectangle};

    fn line(x: f64) -> Element {
        Element::Line(Line::new(Point::new(x, 0.0), Point::new(x + 10.0, 0.0), ElementStyle::default()))
    }

    #[test]
    fn test_add_and_remove() {
        let mut doc = Document::new();
        let element = line(0.0);
        let id = element.id();
        doc.add(element);
        assert!(doc.contains(id));
        assert_eq!(doc.len(), 1);
        assert!(doc.remove(id).is_some());
        assert!(doc.is_empty());
        assert!(doc.remove(id).is_none());
    }

    #[test]
    fn test_replace_keeps_paint_order() {
        let mut doc = Document::new();
        let (a, b, c) = (line(0.0), line(20.0), line(40.0));
        let (a_id, b_id, c_id) = (a.id(), b.id(), c.id());
        doc.add(a);
        doc.add(b);
        doc.add(c);

        let (x, y) = (line(100.0), line(200.0));
        let (x_id, y_id) = (x.id(), y.id());
        assert!(doc.replace(b_id, vec![x, y]));
        assert_eq!(doc.ids(), vec![a_id, x_id, y_id, c_id]);

        assert!(doc.replace(x_id, Vec::new()));
        assert_eq!(doc.ids(), vec![a_id, y_id, c_id]);
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let mut doc = Document::new();
        let mut style = ElementStyle::default();
        style.fill_enabled = true;
        let below = Element::Rectangle(Rectangle::new(Point::ZERO, 50.0, 50.0, style));
        let above = Element::Rectangle(Rectangle::new(Point::new(10.0, 10.0), 50.0, 50.0, style));
        let above_id = above.id();
        doc.add(below);
        doc.add(above);
        assert_eq!(doc.element_at(Point::new(20.0, 20.0), 0.0), Some(above_id));
        assert_eq!(doc.element_at(Point::new(200.0, 200.0), 0.0), None);
    }

    #[test]
    fn test_snapshot_excludes_temporary() {
        let mut doc = Document::new();
        doc.add(line(0.0));
        doc.set_temporary(line(50.0));
        let snapshot = doc.to_snapshot().unwrap();

        let mut restored = Document::new();
        restored.restore_snapshot(&snapshot).unwrap();
        assert_eq!(restored.len(), 1);
        assert!(restored.temporary().is_none());
        assert_eq!(restored.to_snapshot().unwrap(), snapshot);
    }

    #[test]
    fn test_restore_corrupt_snapshot_is_noop() {
        let mut doc = Document::new();
        doc.add(line(0.0));
        assert!(doc.restore_snapshot("not json").is_err());
        assert_eq!(doc.len(), 1);
    }
}
