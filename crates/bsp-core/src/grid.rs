//! Tile output
//!
//! Generators never own storage. They paint through [`TileWriter`], which
//! also answers the occupancy question for room placement.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::area::{Area, Point};

/// What a generator paints into a cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileKind {
    Ground = 0,
    Room = 1,
    Corridor = 2,
}

impl TileKind {
    /// ASCII glyph
    pub const fn glyph(&self) -> char {
        match self {
            TileKind::Ground => '.',
            TileKind::Room => '#',
            TileKind::Corridor => '+',
        }
    }
}

/// Destination for generated tiles
pub trait TileWriter {
    /// The area generators work inside
    fn bounds(&self) -> Area;

    /// Whether `area` can hold a new room at least `margin` cells away from
    /// existing rooms
    fn is_free(&self, area: &Area, margin: i32) -> bool;

    fn paint_area(&mut self, area: Area, kind: TileKind);

    fn paint_cell(&mut self, p: Point, kind: TileKind);

    /// Fill every untouched cell with ground
    fn paint_ground(&mut self);
}

/// In-memory tile grid
///
/// Cells start empty. A painted cell keeps its first tile; later paints of
/// the same cell are ignored, so corridors never cover rooms and ground never
/// covers either. Writes outside the grid are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    bounds: Area,
    cells: Vec<Option<TileKind>>,
}

impl TileGrid {
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_origin(Point::new(0, 0), width, height)
    }

    pub fn with_origin(origin: Point, width: i32, height: i32) -> Self {
        let bounds = Area::new(origin.x, origin.y, width, height);
        let len = bounds.cell_count() as usize;
        Self {
            bounds,
            cells: vec![None; len],
        }
    }

    pub fn width(&self) -> i32 {
        self.bounds.width
    }

    pub fn height(&self) -> i32 {
        self.bounds.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains_point(p) {
            return None;
        }
        let dx = (p.x - self.bounds.x) as usize;
        let dy = (p.y - self.bounds.y) as usize;
        Some(dy * self.bounds.width as usize + dx)
    }

    /// Tile at `p`, or `None` when empty or outside the grid
    pub fn get(&self, p: Point) -> Option<TileKind> {
        self.index(p).and_then(|i| self.cells[i])
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: TileKind) -> usize {
        self.cells.iter().filter(|c| **c == Some(kind)).count()
    }

    /// Render one line per row; empty cells show as spaces
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.bounds.height as usize);
        for row in self.cells.chunks(self.bounds.width.max(1) as usize) {
            out.extend(row.iter().map(|c| c.map_or(' ', |k| k.glyph())));
            out.push('\n');
        }
        out
    }

    /// Clear every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl TileWriter for TileGrid {
    fn bounds(&self) -> Area {
        self.bounds
    }

    fn is_free(&self, area: &Area, margin: i32) -> bool {
        if area.is_empty() || !self.bounds.contains(area) {
            return false;
        }
        let Some(zone) = area.inflate(margin).intersection(&self.bounds) else {
            return true;
        };
        zone.cells().all(|p| self.get(p) != Some(TileKind::Room))
    }

    fn paint_area(&mut self, area: Area, kind: TileKind) {
        if let Some(clipped) = area.intersection(&self.bounds) {
            for p in clipped.cells() {
                self.paint_cell(p, kind);
            }
        }
    }

    fn paint_cell(&mut self, p: Point, kind: TileKind) {
        if let Some(i) = self.index(p)
            && self.cells[i].is_none()
        {
            self.cells[i] = Some(kind);
        }
    }

    fn paint_ground(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.is_none()) {
            *cell = Some(TileKind::Ground);
        }
    }
}
