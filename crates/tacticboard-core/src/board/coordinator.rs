//! Board coordinator: owns the placements and rebuilds the board view from
//! them and the roster.

use super::drag::{DragEngine, DropResolution, PressTarget};
use super::placement::PlacementMap;
use super::surface::{Surface, SurfaceLayout};
use crate::config::BoardConfig;
use crate::geometry::clamp_box;
use crate::input::PointerKind;
use crate::prompt::Confirm;
use crate::roster::{Item, ItemId, PoolFilter, RosterStore, pool_order};
use kurbo::{Point, Rect, Size};
use serde::Serialize;

/// Where the marker lands when first added, field-local.
const MARKER_START: Point = Point::new(10.0, 10.0);
/// Positions closer than this count as unmoved.
const RECLAMP_EPSILON: f64 = 1e-6;

/// The roster and the active filter, read whenever the view is rebuilt.
#[derive(Clone, Copy)]
pub struct PoolSource<'a> {
    pub roster: &'a dyn RosterStore,
    pub filter: &'a PoolFilter,
}

impl<'a> PoolSource<'a> {
    pub fn new(roster: &'a dyn RosterStore, filter: &'a PoolFilter) -> Self {
        Self { roster, filter }
    }
}

/// A placed card as drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub item: Item,
    pub surface: Surface,
    /// Surface-local top-left in pixels.
    pub position: Point,
    pub z: u32,
}

/// Projection of the placements onto the three surfaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardView {
    pub pool: Vec<Item>,
    pub field: Vec<CardView>,
    pub container: Vec<CardView>,
    /// Field-local top-left of the marker.
    pub marker: Option<Point>,
}

/// Owns the placement map and the drag engine.
#[derive(Debug, Clone, Default)]
pub struct Board {
    config: BoardConfig,
    placements: PlacementMap,
    drag: DragEngine,
    marker: Option<Point>,
    view: BoardView,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn placements(&self) -> &PlacementMap {
        &self.placements
    }

    pub fn drag(&self) -> &DragEngine {
        &self.drag
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn marker(&self) -> Option<Point> {
        self.marker
    }

    /// Rebuild the view. The pool is every filtered player without a
    /// placement; placed cards show whatever the filter says.
    pub fn refresh(&mut self, source: PoolSource<'_>, layout: &SurfaceLayout) -> &BoardView {
        let items = source.roster.all();

        let mut pool: Vec<Item> = items
            .iter()
            .filter(|item| !self.placements.is_placed(&item.id) && source.filter.matches(item))
            .cloned()
            .collect();
        pool.sort_by(pool_order);

        let cards = |surface: Surface| -> Vec<CardView> {
            let size = layout.rect(surface).size();
            self.placements
                .on(surface)
                .into_iter()
                .filter_map(|placement| {
                    let item = items.iter().find(|item| item.id == placement.item)?;
                    Some(CardView {
                        item: item.clone(),
                        surface,
                        position: placement.pixel_position(size),
                        z: placement.z,
                    })
                })
                .collect()
        };
        let field = cards(Surface::Field);
        let container = cards(Surface::Container);

        self.view = BoardView {
            pool,
            field,
            container,
            marker: self.marker,
        };
        &self.view
    }

    /// Press on a card drawn at page-space `card_origin`.
    pub fn begin_drag(
        &mut self,
        item: ItemId,
        card_origin: Point,
        pointer: Point,
        kind: PointerKind,
        target: PressTarget,
        layout: &SurfaceLayout,
    ) -> bool {
        let origin = self.placements.get(&item).map_or(Surface::Pool, |p| p.surface);
        let card_rect = Rect::from_origin_size(card_origin, self.config.card_size());
        self.drag
            .begin(item, origin, card_rect, pointer, kind, target, layout, &self.config)
    }

    pub fn drag_move(&mut self, pointer: Point, layout: &SurfaceLayout) -> bool {
        self.drag.pointer_move(pointer, layout, &self.config)
    }

    /// Animation-frame tick; see [`DragEngine::frame`].
    pub fn drag_frame(&mut self, layout: &SurfaceLayout) -> Option<Point> {
        self.drag.frame(layout, &self.config)
    }

    /// Release the dragged card and apply the drop.
    pub fn end_drag(
        &mut self,
        pointer: Option<Point>,
        source: PoolSource<'_>,
        layout: &SurfaceLayout,
    ) -> Option<DropResolution> {
        let resolution = self.drag.end(pointer, layout, &self.config)?;
        match &resolution {
            DropResolution::Placed { item, surface, position, .. } => {
                let size = layout.rect(*surface).size();
                self.placements.place(item.clone(), *surface, *position, size);
            }
            DropResolution::ReturnedToPool { item, .. } => {
                self.placements.remove(item);
            }
        }
        self.refresh(source, layout);
        Some(resolution)
    }

    /// Abort the drag. Placements are untouched.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel().is_some()
    }

    /// Send one card back to the pool.
    pub fn return_to_pool(&mut self, item: &ItemId, source: PoolSource<'_>, layout: &SurfaceLayout) -> bool {
        if self.placements.remove(item).is_none() {
            return false;
        }
        log::debug!("Returned {} to the pool", item);
        self.refresh(source, layout);
        true
    }

    /// Unplace every card and drop the marker, once confirmed.
    pub fn clear_board(
        &mut self,
        confirm: &mut dyn Confirm,
        source: PoolSource<'_>,
        layout: &SurfaceLayout,
    ) -> bool {
        if !confirm.confirm("Clear board", "Return every player to the pool?") {
            return false;
        }
        self.drag.cancel();
        self.placements.clear();
        self.marker = None;
        log::info!("Board cleared");
        self.refresh(source, layout);
        true
    }

    /// Lay `items` out in a grid on the container, skipping players already
    /// placed or unknown to the roster. Returns how many were placed.
    pub fn bulk_insert(&mut self, items: &[ItemId], source: PoolSource<'_>, layout: &SurfaceLayout) -> usize {
        let roster = source.roster.all();
        let size = layout.container.size();
        let card = self.config.card_size();
        let columns = self.config.grid_columns.max(1);

        let mut inserted = 0;
        for id in items {
            if self.placements.is_placed(id) || !roster.iter().any(|item| &item.id == id) {
                continue;
            }
            let column = (inserted % columns) as f64;
            let row = (inserted / columns) as f64;
            let planned = Point::new(
                self.config.grid_offset + column * self.config.grid_step_x,
                self.config.grid_offset + row * self.config.grid_step_y,
            );
            let position = clamp_box(planned, card, size, self.config.container_margin);
            self.placements.place(id.clone(), Surface::Container, position, size);
            inserted += 1;
        }

        if inserted > 0 {
            log::info!("Bulk inserted {} players", inserted);
            self.refresh(source, layout);
        }
        inserted
    }

    /// Clamp every placement and the marker back inside their surfaces after a
    /// layout change. The view is rebuilt when anything moved.
    pub fn reclamp(&mut self, source: PoolSource<'_>, layout: &SurfaceLayout) -> bool {
        let card = self.config.card_size();
        let updates: Vec<(ItemId, Point, Size)> = self
            .placements
            .iter()
            .filter_map(|p| {
                let size = layout.rect(p.surface).size();
                let margin = p.surface.drop_margin(&self.config);
                let current = p.pixel_position(size);
                let clamped = clamp_box(current, card, size, margin);
                (clamped.distance(current) > RECLAMP_EPSILON).then(|| (p.item.clone(), clamped, size))
            })
            .collect();
        let mut moved = !updates.is_empty();
        for (id, position, size) in updates {
            self.placements.set_position(&id, position, size);
        }

        if let Some(marker) = self.marker {
            let clamped = self.clamp_marker(marker, layout);
            if clamped != marker {
                self.marker = Some(clamped);
                moved = true;
            }
        }

        if moved {
            log::debug!("Re-clamped board to new layout");
            self.refresh(source, layout);
        }
        moved
    }

    fn clamp_marker(&self, position: Point, layout: &SurfaceLayout) -> Point {
        let side = self.config.marker_size;
        clamp_box(position, Size::new(side, side), layout.field.size(), 0.0)
    }

    /// Put the marker on the field. Re-adding moves it back to the start.
    pub fn add_marker(&mut self, layout: &SurfaceLayout) -> Point {
        let position = self.clamp_marker(MARKER_START, layout);
        self.marker = Some(position);
        self.view.marker = self.marker;
        position
    }

    /// Move the marker to a field-local spot, clamped to the field.
    pub fn move_marker(&mut self, position: Point, layout: &SurfaceLayout) -> Option<Point> {
        self.marker?;
        let position = self.clamp_marker(position, layout);
        self.marker = Some(position);
        self.view.marker = self.marker;
        Some(position)
    }

    pub fn remove_marker(&mut self) -> bool {
        self.view.marker = None;
        self.marker.take().is_some()
    }
}
