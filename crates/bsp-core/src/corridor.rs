//! Dog-leg corridors
//!
//! A corridor joins two points with one horizontal and one vertical run,
//! forming an "L". Corridors only describe positions; painting them is up to
//! the tile writer.

use serde::Serialize;
use strum::Display;

use crate::area::Point;
use crate::rng::RandomSource;

/// Which run of the "L" is laid first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum Orientation {
    /// Row at `start.y`, then column at `end.x`
    HorizontalFirst,
    /// Column at `start.x`, then row at `end.y`
    VerticalFirst,
}

impl Orientation {
    /// Pick an orientation with a fair coin
    pub fn random(rng: &mut impl RandomSource) -> Self {
        if rng.coin() {
            Orientation::HorizontalFirst
        } else {
            Orientation::VerticalFirst
        }
    }
}

/// A corridor between two anchors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Corridor {
    pub start: Point,
    pub end: Point,
    pub orientation: Orientation,
}

impl Corridor {
    pub fn new(start: Point, end: Point, orientation: Orientation) -> Self {
        Self {
            start,
            end,
            orientation,
        }
    }

    /// Lazily walk the corridor cells
    pub fn cells(&self) -> DogLeg {
        DogLeg::new(self.start, self.end, self.orientation)
    }

    /// The cell where the two runs meet
    pub fn corner(&self) -> Point {
        match self.orientation {
            Orientation::HorizontalFirst => Point::new(self.end.x, self.start.y),
            Orientation::VerticalFirst => Point::new(self.start.x, self.end.y),
        }
    }
}

/// Build a corridor from `start` to `end`, choosing the orientation at random
pub fn dog_leg(start: Point, end: Point, rng: &mut impl RandomSource) -> Corridor {
    Corridor::new(start, end, Orientation::random(rng))
}

/// One straight run, inclusive of both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    horizontal: bool,
    /// Row for horizontal runs, column for vertical runs
    fixed: i32,
    lo: i32,
    hi: i32,
}

impl Run {
    fn horizontal(x1: i32, x2: i32, y: i32) -> Self {
        Self {
            horizontal: true,
            fixed: y,
            lo: x1.min(x2),
            hi: x1.max(x2),
        }
    }

    fn vertical(y1: i32, y2: i32, x: i32) -> Self {
        Self {
            horizontal: false,
            fixed: x,
            lo: y1.min(y2),
            hi: y1.max(y2),
        }
    }

    fn len(&self) -> usize {
        (self.hi - self.lo) as usize + 1
    }

    fn point(&self, offset: i32) -> Point {
        if self.horizontal {
            Point::new(self.lo + offset, self.fixed)
        } else {
            Point::new(self.fixed, self.lo + offset)
        }
    }
}

/// Iterator over the cells of a dog-leg corridor
///
/// Yields the first run from its low end to its high end, then the second
/// run the same way. The corner cell belongs to both runs and is yielded
/// twice.
#[derive(Debug, Clone)]
pub struct DogLeg {
    runs: [Run; 2],
    run: usize,
    offset: i32,
}

impl DogLeg {
    pub fn new(start: Point, end: Point, orientation: Orientation) -> Self {
        let runs = match orientation {
            Orientation::HorizontalFirst => [
                Run::horizontal(start.x, end.x, start.y),
                Run::vertical(start.y, end.y, end.x),
            ],
            Orientation::VerticalFirst => [
                Run::vertical(start.y, end.y, start.x),
                Run::horizontal(start.x, end.x, end.y),
            ],
        };
        Self {
            runs,
            run: 0,
            offset: 0,
        }
    }
}

impl Iterator for DogLeg {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while self.run < self.runs.len() {
            let run = self.runs[self.run];
            if self.offset <= run.hi - run.lo {
                let p = run.point(self.offset);
                self.offset += 1;
                return Some(p);
            }
            self.run += 1;
            self.offset = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.runs[self.run.min(2)..]
            .iter()
            .map(Run::len)
            .sum::<usize>()
            .saturating_sub(self.offset as usize);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DogLeg {}

impl std::iter::FusedIterator for DogLeg {}

/// Disjoint sets over room indices
///
/// Two rooms share a set when some chain of corridors joins them.
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    parent: Vec<usize>,
    components: usize,
}

impl ConnectivityTracker {
    pub fn new(rooms: usize) -> Self {
        Self {
            parent: (0..rooms).collect(),
            components: rooms,
        }
    }

    /// Representative of the set holding `room`, halving the path on the way
    fn root(&mut self, mut room: usize) -> usize {
        while self.parent[room] != room {
            let grandparent = self.parent[self.parent[room]];
            self.parent[room] = grandparent;
            room = grandparent;
        }
        room
    }

    /// Record a corridor between rooms `a` and `b`
    ///
    /// Returns false when the rooms were already joined or an index is out of
    /// range.
    pub fn join(&mut self, a: usize, b: usize) -> bool {
        if a >= self.parent.len() || b >= self.parent.len() {
            return false;
        }
        let (ra, rb) = (self.root(a), self.root(b));
        if ra == rb {
            return false;
        }
        self.parent[rb] = ra;
        self.components -= 1;
        true
    }

    pub fn joined(&mut self, a: usize, b: usize) -> bool {
        a < self.parent.len() && b < self.parent.len() && self.root(a) == self.root(b)
    }

    /// Number of room clusters
    pub fn components(&self) -> usize {
        self.components
    }
}
