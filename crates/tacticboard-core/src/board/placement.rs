//! Authoritative record of which card sits where.

use super::surface::Surface;
use crate::roster::ItemId;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One card on the field or the container.
///
/// `position` is the card's top-left as a fraction of the surface size, so
/// placements survive resizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub item: ItemId,
    pub surface: Surface,
    pub position: Point,
    pub z: u32,
}

impl Placement {
    /// Top-left in surface-local pixels.
    pub fn pixel_position(&self, surface_size: Size) -> Point {
        Point::new(self.position.x * surface_size.width, self.position.y * surface_size.height)
    }
}

fn normalize(pixel: Point, size: Size) -> Point {
    let frac = |v: f64, extent: f64| if extent > 0.0 { v / extent } else { 0.0 };
    Point::new(frac(pixel.x, size.width), frac(pixel.y, size.height))
}

/// Placements keyed by item. An item has at most one entry, so it is in the
/// pool or on exactly one surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacementMap {
    placements: BTreeMap<ItemId, Placement>,
    next_z: u32,
}

impl PlacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `item` at the surface-local pixel `position`.
    ///
    /// An existing placement, on either surface, is moved rather than
    /// duplicated. Placing onto the pool removes the placement and returns `None`.
    pub fn place(&mut self, item: ItemId, surface: Surface, position: Point, surface_size: Size) -> Option<&Placement> {
        if !surface.is_positional() {
            self.remove(&item);
            return None;
        }
        self.next_z += 1;
        let position = normalize(position, surface_size);
        let z = self.next_z;
        let placement = self
            .placements
            .entry(item.clone())
            .and_modify(|p| {
                log::debug!("Moving {} from {:?} to {:?}", item, p.surface, surface);
                p.surface = surface;
                p.position = position;
                p.z = z;
            })
            .or_insert_with(|| {
                log::debug!("Placing {} on {:?}", item, surface);
                Placement {
                    item: item.clone(),
                    surface,
                    position,
                    z,
                }
            });
        Some(placement)
    }

    /// Overwrite a placement's position without touching its stacking order.
    pub fn set_position(&mut self, item: &ItemId, position: Point, surface_size: Size) -> bool {
        match self.placements.get_mut(item) {
            Some(p) => {
                p.position = normalize(position, surface_size);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, item: &ItemId) -> Option<Placement> {
        self.placements.remove(item)
    }

    pub fn get(&self, item: &ItemId) -> Option<&Placement> {
        self.placements.get(item)
    }

    pub fn is_placed(&self, item: &ItemId) -> bool {
        self.placements.contains_key(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.values()
    }

    /// Placements on one surface, bottom to top.
    pub fn on(&self, surface: Surface) -> Vec<&Placement> {
        let mut on: Vec<&Placement> = self.iter().filter(|p| p.surface == surface).collect();
        on.sort_by_key(|p| p.z);
        on
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn clear(&mut self) {
        self.placements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Size = Size::new(800.0, 600.0);

    #[test]
    fn test_place_normalizes_position() {
        let mut map = PlacementMap::new();
        let p = map.place("7".into(), Surface::Field, Point::new(200.0, 150.0), FIELD).unwrap();
        assert_eq!(p.position, Point::new(0.25, 0.25));
        assert_eq!(p.pixel_position(FIELD), Point::new(200.0, 150.0));
    }

    #[test]
    fn test_replace_keeps_single_entry() {
        let mut map = PlacementMap::new();
        let id = ItemId::new("7");
        map.place(id.clone(), Surface::Field, Point::new(10.0, 10.0), FIELD);
        map.place(id.clone(), Surface::Container, Point::new(20.0, 20.0), Size::new(900.0, 700.0));
        map.place(id.clone(), Surface::Field, Point::new(30.0, 30.0), FIELD);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&id).map(|p| p.surface), Some(Surface::Field));
        assert!(map.on(Surface::Container).is_empty());
    }

    #[test]
    fn test_place_on_pool_removes() {
        let mut map = PlacementMap::new();
        let id = ItemId::new("7");
        map.place(id.clone(), Surface::Field, Point::new(10.0, 10.0), FIELD);
        assert!(map.place(id.clone(), Surface::Pool, Point::ZERO, FIELD).is_none());
        assert!(!map.is_placed(&id));
    }

    #[test]
    fn test_latest_drop_on_top() {
        let mut map = PlacementMap::new();
        map.place("a".into(), Surface::Field, Point::ZERO, FIELD);
        map.place("b".into(), Surface::Field, Point::ZERO, FIELD);
        map.place("a".into(), Surface::Field, Point::new(5.0, 5.0), FIELD);
        let order: Vec<&str> = map.on(Surface::Field).iter().map(|p| p.item.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_zero_sized_surface() {
        let mut map = PlacementMap::new();
        let p = map.place("a".into(), Surface::Field, Point::new(5.0, 5.0), Size::ZERO).unwrap();
        assert_eq!(p.position, Point::ZERO);
    }
}
