//! Room carving inside partition leaves
//!
//! A room's size is sampled once per leaf, between the minimum room size and
//! the full leaf extent. Only the position is retried when the occupancy
//! check rejects a placement.

use crate::area::{Area, Size};
use crate::partition::PartitionNode;
use crate::rng::RandomSource;

/// Result of one carving attempt on a leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveOutcome {
    /// Room placed after the given number of tries
    Carved { room: Area, attempts: u32 },
    /// Every try collided
    Rejected { attempts: u32 },
    /// Node is not a leaf, or the leaf is smaller than the minimum room size
    Skipped,
}

impl CarveOutcome {
    pub fn carved(&self) -> bool {
        matches!(self, CarveOutcome::Carved { .. })
    }

    pub fn room(&self) -> Option<Area> {
        match self {
            CarveOutcome::Carved { room, .. } => Some(*room),
            _ => None,
        }
    }
}

/// Places rooms in partition leaves
#[derive(Debug, Clone, Copy)]
pub struct RoomCarver {
    min_size: Size,
    max_attempts: u32,
}

impl RoomCarver {
    pub fn new(min_size: Size, max_attempts: u32) -> Self {
        Self {
            min_size,
            max_attempts,
        }
    }

    /// Try to place a room in `node`
    ///
    /// `is_free` answers whether a candidate rectangle may be carved. On
    /// success the node's area is narrowed to the room.
    pub fn try_carve(
        &self,
        node: &mut PartitionNode,
        rng: &mut impl RandomSource,
        mut is_free: impl FnMut(&Area) -> bool,
    ) -> CarveOutcome {
        let leaf = node.area();
        if !node.is_leaf() || node.has_room() {
            return CarveOutcome::Skipped;
        }
        if leaf.width < self.min_size.width || leaf.height < self.min_size.height {
            return CarveOutcome::Skipped;
        }

        let width = rng.range_int(self.min_size.width, leaf.width + 1);
        let height = rng.range_int(self.min_size.height, leaf.height + 1);

        for attempt in 1..=self.max_attempts {
            let x = rng.range_int(leaf.x, leaf.x_max() - width + 1);
            let y = rng.range_int(leaf.y, leaf.y_max() - height + 1);
            let room = Area::new(x, y, width, height);

            if is_free(&room) {
                node.set_room(room);
                return CarveOutcome::Carved {
                    room,
                    attempts: attempt,
                };
            }
        }

        CarveOutcome::Rejected {
            attempts: self.max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GenRng;

    fn leaf(area: Area) -> PartitionNode {
        let mut node = PartitionNode::new(area, 0);
        node.mark_leaf();
        node
    }

    #[test]
    fn test_room_fits_leaf() {
        let carver = RoomCarver::new(Size::new(3, 3), 50);
        let mut rng = GenRng::new(5);
        for _ in 0..200 {
            let bounds = Area::new(4, 7, 9, 6);
            let mut node = leaf(bounds);
            let outcome = carver.try_carve(&mut node, &mut rng, |_| true);

            let room = outcome.room().unwrap();
            assert!(bounds.contains(&room));
            assert!(room.width >= 3 && room.height >= 3);
            assert_eq!(node.area(), room);
            assert_eq!(node.bounds(), bounds);
            assert!(node.has_room());
            assert_eq!(outcome, CarveOutcome::Carved { room, attempts: 1 });
        }
    }

    #[test]
    fn test_min_sized_leaf_is_filled_exactly() {
        let carver = RoomCarver::new(Size::new(5, 5), 50);
        let bounds = Area::new(0, 0, 5, 5);
        let mut node = leaf(bounds);
        let outcome = carver.try_carve(&mut node, &mut GenRng::new(1), |_| true);
        assert_eq!(outcome.room(), Some(bounds));
    }

    #[test]
    fn test_six_by_six_leaf() {
        let carver = RoomCarver::new(Size::new(5, 5), 50);
        let mut node = leaf(Area::new(0, 0, 6, 6));
        let room = carver
            .try_carve(&mut node, &mut GenRng::new(11), |_| true)
            .room()
            .unwrap();
        assert!((5..=6).contains(&room.width));
        assert!((5..=6).contains(&room.height));

        // Already occupied leaves are not carved twice
        let again = carver.try_carve(&mut node, &mut GenRng::new(11), |_| true);
        assert_eq!(again, CarveOutcome::Skipped);
    }

    #[test]
    fn test_rejected_after_all_attempts() {
        let carver = RoomCarver::new(Size::new(3, 3), 7);
        let mut node = leaf(Area::new(0, 0, 10, 10));
        let mut calls = 0;
        let outcome = carver.try_carve(&mut node, &mut GenRng::new(2), |_| {
            calls += 1;
            false
        });
        assert_eq!(outcome, CarveOutcome::Rejected { attempts: 7 });
        assert_eq!(calls, 7);
        assert!(!node.has_room());
        assert_eq!(node.area(), Area::new(0, 0, 10, 10));
    }

    #[test]
    fn test_size_fixed_across_retries() {
        let carver = RoomCarver::new(Size::new(2, 2), 20);
        let mut node = leaf(Area::new(0, 0, 12, 12));
        let mut sizes = Vec::new();
        let outcome = carver.try_carve(&mut node, &mut GenRng::new(8), |r| {
            sizes.push(r.size());
            sizes.len() == 5
        });
        assert!(outcome.carved());
        assert_eq!(sizes.len(), 5);
        assert!(sizes.iter().all(|s| *s == sizes[0]));
    }

    #[test]
    fn test_small_or_inner_nodes_skipped() {
        let carver = RoomCarver::new(Size::new(3, 3), 5);
        let mut small = leaf(Area::new(0, 0, 2, 8));
        assert_eq!(
            carver.try_carve(&mut small, &mut GenRng::new(1), |_| true),
            CarveOutcome::Skipped
        );

        let mut inner = PartitionNode::new(Area::new(0, 0, 10, 10), 0);
        assert_eq!(
            carver.try_carve(&mut inner, &mut GenRng::new(1), |_| true),
            CarveOutcome::Skipped
        );
    }
}
