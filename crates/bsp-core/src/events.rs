//! Ordered record of generation decisions
//!
//! Generators are pure and never pause. Anything that wants to animate a run
//! replays the log afterwards, as many times as it likes.

use serde::Serialize;
use strum::Display;

use crate::area::{Area, Point, SplitAxis};
use crate::corridor::Orientation;

/// Why a partition node stopped splitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum LeafReason {
    /// Depth limit reached
    MaxDepth,
    /// Too small to halve while keeping the minimum size
    TooSmall,
    /// Every cut attempt on the chosen axis was rejected
    NoValidCut,
}

/// A single generation step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GenEvent {
    Split {
        depth: u32,
        parent: Area,
        axis: SplitAxis,
        first: Area,
        second: Area,
    },
    Leaf {
        depth: u32,
        area: Area,
        reason: LeafReason,
    },
    RoomCarved {
        leaf: Area,
        room: Area,
        attempts: u32,
    },
    /// Every placement attempt collided
    RoomRejected {
        leaf: Area,
        attempts: u32,
    },
    /// Leaf smaller than the minimum room size
    RoomSkipped {
        leaf: Area,
    },
    Linked {
        from: Point,
        to: Point,
        orientation: Orientation,
    },
    LinkSkipped {
        from: Point,
        to: Point,
    },
}

/// Finite, restartable sequence of events in the order they happened
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<GenEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GenEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GenEvent> {
        self.events.iter()
    }

    /// Step through the run from the beginning
    ///
    /// Every call starts a fresh pass over the same events.
    pub fn replay(&self) -> impl Iterator<Item = &GenEvent> + '_ {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[GenEvent] {
        &self.events
    }

    pub fn split_count(&self) -> usize {
        self.count_matching(|e| matches!(e, GenEvent::Split { .. }))
    }

    pub fn leaf_count(&self) -> usize {
        self.count_matching(|e| matches!(e, GenEvent::Leaf { .. }))
    }

    pub fn rooms_carved(&self) -> usize {
        self.count_matching(|e| matches!(e, GenEvent::RoomCarved { .. }))
    }

    pub fn links_made(&self) -> usize {
        self.count_matching(|e| matches!(e, GenEvent::Linked { .. }))
    }

    fn count_matching(&self, pred: impl Fn(&GenEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a GenEvent;
    type IntoIter = std::slice::Iter<'a, GenEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl IntoIterator for EventLog {
    type Item = GenEvent;
    type IntoIter = std::vec::IntoIter<GenEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
