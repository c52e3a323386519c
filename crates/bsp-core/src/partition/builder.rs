//! Recursive area splitting
//!
//! Stopping policy, in order:
//! 1. An area smaller than the minimum room size on either axis never splits.
//! 2. An area larger than the maximum room size on either axis must split.
//! 3. Otherwise the node stops at the depth limit, or when it cannot be
//!    halved with both halves at least the minimum size.
//! 4. The axis is chosen, then up to `split_attempts` random cut ratios are
//!    tried on it. The axis is never reconsidered; a node whose attempts all
//!    fail becomes a leaf unless it is oversized, in which case it is cut at
//!    the midpoint.

use tracing::debug;

use crate::area::{Area, SplitAxis};
use crate::config::GenConfig;
use crate::events::{EventLog, GenEvent, LeafReason};
use crate::rng::RandomSource;

use super::node::{PartitionNode, PartitionTree};

/// Builds a partition tree according to a [`GenConfig`]
#[derive(Debug, Clone, Copy)]
pub struct PartitionBuilder<'a> {
    config: &'a GenConfig,
}

impl<'a> PartitionBuilder<'a> {
    pub fn new(config: &'a GenConfig) -> Self {
        Self { config }
    }

    /// Partition `root` into a complete tree
    ///
    /// Assumes a validated configuration.
    pub fn build(
        &self,
        root: Area,
        rng: &mut impl RandomSource,
        log: &mut EventLog,
    ) -> PartitionTree {
        let mut tree = PartitionTree::from_root(PartitionNode::new(root, 0));
        self.split(tree.root_mut(), rng, log);
        tree
    }

    /// Split `node` and its descendants in place
    ///
    /// The first child's subtree is completed before the second is started,
    /// so RNG consumption follows pre-order.
    pub fn split(&self, node: &mut PartitionNode, rng: &mut impl RandomSource, log: &mut EventLog) {
        let area = node.area();
        let depth = node.depth();
        let min = self.config.min_room_size;
        let max = self.config.max_room_size;

        if area.width < min.width || area.height < min.height {
            self.stop(node, LeafReason::TooSmall, log);
            return;
        }

        let wide = area.width > max.width;
        let tall = area.height > max.height;
        let forced = wide || tall;

        if !forced {
            if depth >= self.config.max_depth {
                self.stop(node, LeafReason::MaxDepth, log);
                return;
            }
            if area.width <= 2 * min.width || area.height <= 2 * min.height {
                self.stop(node, LeafReason::TooSmall, log);
                return;
            }
        }

        let axis = match (wide, tall) {
            (true, false) => SplitAxis::Vertical,
            (false, true) => SplitAxis::Horizontal,
            _ if rng.coin() => SplitAxis::Horizontal,
            _ => SplitAxis::Vertical,
        };

        let cut = match self.pick_cut(area, axis, rng) {
            Some(cut) => Some(cut),
            None if forced => self.midpoint_cut(area, axis),
            None => None,
        };

        let Some(cut) = cut else {
            self.stop(node, LeafReason::NoValidCut, log);
            return;
        };

        let (first_area, second_area) = area.split_at(axis, cut);
        debug!(?area, %axis, cut, depth, forced, "split");
        log.push(GenEvent::Split {
            depth,
            parent: area,
            axis,
            first: first_area,
            second: second_area,
        });

        node.set_children(
            PartitionNode::new(first_area, depth + 1),
            PartitionNode::new(second_area, depth + 1),
        );
        if let Some((first, second)) = node.children_mut() {
            self.split(first, rng, log);
            self.split(second, rng, log);
        }
    }

    /// Draw cut ratios until one leaves both halves at least the minimum size
    ///
    /// Returns the absolute cut coordinate along `axis`.
    fn pick_cut(&self, area: Area, axis: SplitAxis, rng: &mut impl RandomSource) -> Option<i32> {
        let extent = area.extent(axis);
        let min = self.config.min_room_size.along(axis);
        let ratio = self.config.split_ratio;

        for _ in 0..self.config.split_attempts {
            let r = rng.range_float(ratio.min, ratio.max);
            let first = (extent as f32 * r).round_ties_even() as i32;
            if first >= min && extent - first >= min {
                return Some(area.start(axis) + first);
            }
        }
        None
    }

    fn midpoint_cut(&self, area: Area, axis: SplitAxis) -> Option<i32> {
        let extent = area.extent(axis);
        let min = self.config.min_room_size.along(axis);
        let first = extent / 2;
        (first >= min && extent - first >= min).then(|| area.start(axis) + first)
    }

    fn stop(&self, node: &mut PartitionNode, reason: LeafReason, log: &mut EventLog) {
        debug!(area = ?node.area(), depth = node.depth(), %reason, "leaf");
        node.mark_leaf();
        log.push(GenEvent::Leaf {
            depth: node.depth(),
            area: node.area(),
            reason,
        });
    }
}
