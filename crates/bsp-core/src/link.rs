//! Sibling linking over a finished partition tree
//!
//! The tree is collapsed post-order. Each subtree reports one anchor, the
//! center of its leftmost room, and two siblings that both have an anchor
//! may be joined by a corridor.

use tracing::debug;

use crate::area::Point;
use crate::corridor::{Corridor, dog_leg};
use crate::events::{EventLog, GenEvent};
use crate::partition::{PartitionNode, PartitionTree};
use crate::rng::RandomSource;

/// Links sibling subtrees with dog-leg corridors
#[derive(Debug, Clone, Copy)]
pub struct ConnectivityLinker {
    link_chance: f32,
}

impl ConnectivityLinker {
    /// `link_chance` is the probability of joining two represented siblings
    pub fn new(link_chance: f32) -> Self {
        Self { link_chance }
    }

    /// Walk `tree` and return the corridors in emission order
    pub fn connect(
        &self,
        tree: &PartitionTree,
        rng: &mut impl RandomSource,
        log: &mut EventLog,
    ) -> Vec<Corridor> {
        let mut corridors = Vec::new();
        self.collapse(tree.root(), rng, log, &mut corridors);
        corridors
    }

    /// Anchor of the subtree rooted at `node`, linking below it on the way
    fn collapse(
        &self,
        node: &PartitionNode,
        rng: &mut impl RandomSource,
        log: &mut EventLog,
        corridors: &mut Vec<Corridor>,
    ) -> Option<Point> {
        let Some((first, second)) = node.children() else {
            return node.room().map(|room| room.center());
        };

        let a = self.collapse(first, rng, log, corridors);
        let b = self.collapse(second, rng, log, corridors);

        if let (Some(from), Some(to)) = (a, b) {
            if rng.chance(self.link_chance) {
                let corridor = dog_leg(from, to, rng);
                debug!(?from, ?to, orientation = %corridor.orientation, "linked");
                log.push(GenEvent::Linked {
                    from,
                    to,
                    orientation: corridor.orientation,
                });
                corridors.push(corridor);
            } else {
                log.push(GenEvent::LinkSkipped { from, to });
            }
        }

        a.or(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{Area, SplitAxis};
    use crate::rng::GenRng;

    /// Root split vertically; the left half split again horizontally
    fn tree_with_rooms(rooms: [bool; 3]) -> PartitionTree {
        let mut root = PartitionNode::new(Area::new(0, 0, 20, 10), 0);
        let (left, right) = root.area().split_at(SplitAxis::Vertical, 10);
        let (top, bottom) = left.split_at(SplitAxis::Horizontal, 5);

        let mut left_node = PartitionNode::new(left, 1);
        let mut leaves = [
            PartitionNode::new(top, 2),
            PartitionNode::new(bottom, 2),
            PartitionNode::new(right, 1),
        ];
        for (leaf, has_room) in leaves.iter_mut().zip(rooms) {
            leaf.mark_leaf();
            if has_room {
                let b = leaf.bounds();
                leaf.set_room(Area::new(b.x + 1, b.y + 1, 3, 3));
            }
        }
        let [top_node, bottom_node, right_node] = leaves;
        left_node.set_children(top_node, bottom_node);
        root.set_children(left_node, right_node);
        PartitionTree::from_root(root)
    }

    #[test]
    fn test_always_link_connects_all() {
        let tree = tree_with_rooms([true, true, true]);
        let mut log = EventLog::new();
        let corridors = ConnectivityLinker::new(1.0).connect(&tree, &mut GenRng::new(4), &mut log);

        assert_eq!(corridors.len(), 2);
        // Inner pair first, then the left anchor (top room) to the right room
        assert_eq!(corridors[0].start, Point::new(2, 2));
        assert_eq!(corridors[0].end, Point::new(2, 7));
        assert_eq!(corridors[1].start, Point::new(2, 2));
        assert_eq!(corridors[1].end, Point::new(12, 2));
        assert_eq!(log.links_made(), 2);
    }

    #[test]
    fn test_never_link() {
        let tree = tree_with_rooms([true, true, true]);
        let mut log = EventLog::new();
        let corridors = ConnectivityLinker::new(0.0).connect(&tree, &mut GenRng::new(4), &mut log);
        assert!(corridors.is_empty());
        assert_eq!(log.len(), 2);
        assert!(log.iter().all(|e| matches!(e, GenEvent::LinkSkipped { .. })));
    }

    #[test]
    fn test_missing_room_propagates_sibling() {
        // Top leaf empty: bottom room represents the left subtree
        let tree = tree_with_rooms([false, true, true]);
        let mut log = EventLog::new();
        let corridors = ConnectivityLinker::new(1.0).connect(&tree, &mut GenRng::new(4), &mut log);
        assert_eq!(corridors.len(), 1);
        assert_eq!(corridors[0].start, Point::new(2, 7));
        assert_eq!(corridors[0].end, Point::new(12, 2));
    }

    #[test]
    fn test_no_rooms_no_corridors() {
        let tree = tree_with_rooms([false, false, false]);
        let mut log = EventLog::new();
        let corridors = ConnectivityLinker::new(1.0).connect(&tree, &mut GenRng::new(4), &mut log);
        assert!(corridors.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_single_leaf_tree() {
        let mut root = PartitionNode::new(Area::new(0, 0, 6, 6), 0);
        root.mark_leaf();
        root.set_room(Area::new(0, 0, 5, 5));
        let tree = PartitionTree::from_root(root);
        let mut log = EventLog::new();
        let corridors = ConnectivityLinker::new(1.0).connect(&tree, &mut GenRng::new(1), &mut log);
        assert!(corridors.is_empty());
    }
}
