//! Ordered element storage with id lookup.

use crate::shapes::{Element, ElementError, ElementId};
use kurbo::Point;
use std::collections::HashMap;

/// The ordered element sequence.
///
/// Insertion order is preserved and doubles as draw order. Identity lives in
/// each element's id; `positions` maps ids back to their slot.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
    positions: HashMap<ElementId, usize>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and return its id.
    pub fn push(&mut self, element: Element) -> ElementId {
        let id = element.id();
        self.positions.insert(id, self.elements.len());
        self.elements.push(element);
        id
    }

    /// Get an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.positions.get(&id).and_then(|&i| self.elements.get(i))
    }

    /// Position of an element in insertion order.
    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Overwrite the element stored under `id`, keeping its position.
    pub fn replace(&mut self, id: ElementId, element: Element) -> Result<(), ElementError> {
        let index = self.position(id).ok_or(ElementError::NotFound(id))?;
        let new_id = element.id();
        if new_id != id {
            self.positions.remove(&id);
            self.positions.insert(new_id, index);
        }
        self.elements[index] = element;
        Ok(())
    }

    /// Append a sampled point to a freehand stroke.
    pub fn append_point(&mut self, id: ElementId, point: Point) -> Result<(), ElementError> {
        let index = self.position(id).ok_or(ElementError::NotFound(id))?;
        match &mut self.elements[index] {
            Element::Freehand(freehand) => {
                freehand.add_point(point);
                Ok(())
            }
            _ => Err(ElementError::NotFreehand(id)),
        }
    }

    /// The most recently appended element.
    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Anchors, ElementKind, PathPrimitives};

    fn element(kind: ElementKind, anchors: Anchors) -> Element {
        Element::create(kind, anchors, &PathPrimitives)
    }

    #[test]
    fn test_push_and_lookup() {
        let mut store = ElementStore::new();
        let a = store.push(element(ElementKind::Line, Anchors::new(0.0, 0.0, 1.0, 1.0)));
        let b = store.push(element(ElementKind::Rectangle, Anchors::new(0.0, 0.0, 5.0, 5.0)));

        assert_eq!(store.len(), 2);
        assert_eq!(store.position(a), Some(0));
        assert_eq!(store.position(b), Some(1));
        assert_eq!(store.get(b).map(Element::kind), Some(ElementKind::Rectangle));
        assert_eq!(store.last().map(Element::id), Some(b));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut store = ElementStore::new();
        let a = store.push(element(ElementKind::Line, Anchors::new(0.0, 0.0, 1.0, 1.0)));
        store.push(element(ElementKind::Line, Anchors::new(2.0, 2.0, 3.0, 3.0)));

        let moved = store
            .get(a)
            .unwrap()
            .with_anchors(Anchors::new(10.0, 10.0, 11.0, 11.0), &PathPrimitives);
        store.replace(a, moved).unwrap();

        assert_eq!(store.position(a), Some(0));
        assert_eq!(store.as_slice()[0].anchors(), Anchors::new(10.0, 10.0, 11.0, 11.0));
    }

    #[test]
    fn test_replace_unknown_id() {
        let mut store = ElementStore::new();
        let stray = element(ElementKind::Line, Anchors::default());
        let id = stray.id();
        assert!(matches!(
            store.replace(id, stray),
            Err(ElementError::NotFound(missing)) if missing == id
        ));
    }

    #[test]
    fn test_append_point() {
        let mut store = ElementStore::new();
        let stroke = store.push(element(ElementKind::Freehand, Anchors::new(1.0, 1.0, 1.0, 1.0)));
        let line = store.push(element(ElementKind::Line, Anchors::default()));

        store.append_point(stroke, Point::new(4.0, 5.0)).unwrap();
        let Some(Element::Freehand(f)) = store.get(stroke) else {
            panic!("expected freehand");
        };
        assert_eq!(f.len(), 2);

        assert!(matches!(
            store.append_point(line, Point::ZERO),
            Err(ElementError::NotFreehand(_))
        ));
    }

    #[test]
    fn test_clone_is_independent_snapshot() {
        let mut store = ElementStore::new();
        let stroke = store.push(element(ElementKind::Freehand, Anchors::default()));
        let snapshot = store.clone();
        store.append_point(stroke, Point::new(1.0, 1.0)).unwrap();

        let Some(Element::Freehand(f)) = snapshot.get(stroke) else {
            panic!("expected freehand");
        };
        assert_eq!(f.len(), 1);
    }
}
