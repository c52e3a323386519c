//! Integer grid geometry
//!
//! Axis-aligned rectangles with exclusive max edges, grid points and sizes.
//! Every partition, room and corridor in the crate is expressed in these types.

use serde::{Deserialize, Serialize};
use strum::Display;

/// A cell position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height pair, used for room size limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Component along the given axis
    pub const fn along(&self, axis: SplitAxis) -> i32 {
        match axis {
            SplitAxis::Horizontal => self.height,
            SplitAxis::Vertical => self.width,
        }
    }
}

/// Orientation of a cut line
///
/// A horizontal cut runs along x and divides the height; a vertical cut runs
/// along y and divides the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum SplitAxis {
    Horizontal,
    Vertical,
}

impl SplitAxis {
    /// The other axis
    pub const fn flip(self) -> Self {
        match self {
            SplitAxis::Horizontal => SplitAxis::Vertical,
            SplitAxis::Vertical => SplitAxis::Horizontal,
        }
    }
}

/// An axis-aligned rectangle of grid cells
///
/// Covers `x..x + width` by `y..y + height`. A zero width or height is an
/// empty area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Area {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Area {
    /// Create a new area; negative sizes are clamped to zero
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge
    pub const fn x_max(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub const fn y_max(&self) -> i32 {
        self.y + self.height
    }

    /// Origin plus half the size, rounded down
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Number of cells covered
    pub const fn cell_count(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Extent along the given axis (height for horizontal cuts)
    pub const fn extent(&self, axis: SplitAxis) -> i32 {
        self.size().along(axis)
    }

    /// Start coordinate along the given axis
    pub const fn start(&self, axis: SplitAxis) -> i32 {
        match axis {
            SplitAxis::Horizontal => self.y,
            SplitAxis::Vertical => self.x,
        }
    }

    pub const fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x_max() && p.y >= self.y && p.y < self.y_max()
    }

    /// Check if `other` lies entirely inside this area
    pub const fn contains(&self, other: &Area) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && other.x_max() <= self.x_max()
            && other.y_max() <= self.y_max()
    }

    /// Check if the two areas share at least one cell
    pub const fn intersects(&self, other: &Area) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.x_max()
            && other.x < self.x_max()
            && self.y < other.y_max()
            && other.y < self.y_max()
    }

    pub fn intersection(&self, other: &Area) -> Option<Area> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(Area::new(
            x,
            y,
            self.x_max().min(other.x_max()) - x,
            self.y_max().min(other.y_max()) - y,
        ))
    }

    /// Grow the area by `margin` cells on every side, saturating at the `i32` range
    pub fn inflate(&self, margin: i32) -> Area {
        let grow = margin.saturating_mul(2);
        Area::new(
            self.x.saturating_sub(margin),
            self.y.saturating_sub(margin),
            self.width.saturating_add(grow),
            self.height.saturating_add(grow),
        )
    }

    /// Cut the area at absolute coordinate `cut` along `axis`
    ///
    /// The first half starts at the origin, the second half starts at `cut`.
    /// The two halves never overlap and together cover the whole area.
    pub fn split_at(&self, axis: SplitAxis, cut: i32) -> (Area, Area) {
        match axis {
            SplitAxis::Horizontal => (
                Area::new(self.x, self.y, self.width, cut - self.y),
                Area::new(self.x, cut, self.width, self.y_max() - cut),
            ),
            SplitAxis::Vertical => (
                Area::new(self.x, self.y, cut - self.x, self.height),
                Area::new(cut, self.y, self.x_max() - cut, self.height),
            ),
        }
    }

    /// Row-major iterator over every cell of the area
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (self.y..self.y_max())
            .flat_map(move |y| (self.x..self.x_max()).map(move |x| Point::new(x, y)))
    }
}
