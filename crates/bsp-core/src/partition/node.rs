//! Partition tree nodes

use bitflags::bitflags;

use crate::area::Area;

bitflags! {
    /// Node state bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// No further split will be attempted
        const LEAF = 0x01;
        /// A room was carved; `area` is now the room
        const HAS_ROOM = 0x02;
    }
}

/// A node of the binary partition tree
///
/// A node is either a leaf or has exactly two children whose areas tile the
/// parent's area. Children are owned by their parent.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionNode {
    /// Extent assigned when the node was created
    bounds: Area,
    /// Current extent; narrowed to the room once one is carved
    area: Area,
    depth: u32,
    flags: NodeFlags,
    children: Option<Box<[PartitionNode; 2]>>,
}

impl PartitionNode {
    pub fn new(area: Area, depth: u32) -> Self {
        Self {
            bounds: area,
            area,
            depth,
            flags: NodeFlags::empty(),
            children: None,
        }
    }

    pub fn area(&self) -> Area {
        self.area
    }

    /// The extent the node was created with, before any room narrowing
    pub fn bounds(&self) -> Area {
        self.bounds
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn is_leaf(&self) -> bool {
        self.flags.contains(NodeFlags::LEAF)
    }

    pub fn has_room(&self) -> bool {
        self.flags.contains(NodeFlags::HAS_ROOM)
    }

    /// The carved room, if any
    pub fn room(&self) -> Option<Area> {
        self.has_room().then_some(self.area)
    }

    pub fn children(&self) -> Option<(&PartitionNode, &PartitionNode)> {
        self.children.as_deref().map(|[a, b]| (a, b))
    }

    pub(crate) fn children_mut(&mut self) -> Option<(&mut PartitionNode, &mut PartitionNode)> {
        self.children.as_deref_mut().map(|[a, b]| (a, b))
    }

    pub(crate) fn mark_leaf(&mut self) {
        self.flags.insert(NodeFlags::LEAF);
    }

    pub(crate) fn set_children(&mut self, first: PartitionNode, second: PartitionNode) {
        debug_assert!(!self.is_leaf(), "leaf nodes cannot take children");
        self.children = Some(Box::new([first, second]));
    }

    /// Narrow a leaf to the room placed inside it
    pub(crate) fn set_room(&mut self, room: Area) {
        debug_assert!(self.is_leaf());
        debug_assert!(self.bounds.contains(&room));
        self.area = room;
        self.flags.insert(NodeFlags::HAS_ROOM);
    }
}

/// The partition tree of one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionTree {
    root: PartitionNode,
}

impl PartitionTree {
    pub(crate) fn from_root(root: PartitionNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &PartitionNode {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut PartitionNode {
        &mut self.root
    }

    /// Pre-order iterator over every node, first child before second
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: vec![&self.root],
        }
    }

    /// Leaves in left-to-right order
    pub fn leaves(&self) -> impl Iterator<Item = &PartitionNode> + '_ {
        self.nodes().filter(|n| n.is_leaf())
    }

    /// Apply `f` to each leaf in left-to-right order
    pub fn for_each_leaf_mut(&mut self, mut f: impl FnMut(&mut PartitionNode)) {
        fn walk(node: &mut PartitionNode, f: &mut impl FnMut(&mut PartitionNode)) {
            match node.children_mut() {
                Some((first, second)) => {
                    walk(first, f);
                    walk(second, f);
                }
                None => f(node),
            }
        }
        walk(&mut self.root, &mut f);
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Rooms in leaf order
    pub fn rooms(&self) -> Vec<Area> {
        self.leaves().filter_map(PartitionNode::room).collect()
    }

    /// Deepest node depth
    pub fn max_depth(&self) -> u32 {
        self.nodes().map(PartitionNode::depth).max().unwrap_or(0)
    }
}

/// Pre-order node iterator
pub struct Nodes<'a> {
    stack: Vec<&'a PartitionNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a PartitionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some((first, second)) = node.children() {
            self.stack.push(second);
            self.stack.push(first);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::SplitAxis;

    fn two_level_tree() -> PartitionTree {
        let mut root = PartitionNode::new(Area::new(0, 0, 10, 6), 0);
        let (a, b) = root.area().split_at(SplitAxis::Vertical, 4);
        let mut first = PartitionNode::new(a, 1);
        let mut second = PartitionNode::new(b, 1);
        first.mark_leaf();
        second.mark_leaf();
        root.set_children(first, second);
        PartitionTree::from_root(root)
    }

    #[test]
    fn test_new_node_is_blank() {
        let node = PartitionNode::new(Area::new(1, 2, 3, 4), 2);
        assert!(!node.is_leaf());
        assert!(!node.has_room());
        assert_eq!(node.room(), None);
        assert_eq!(node.bounds(), node.area());
        assert!(node.children().is_none());
    }

    #[test]
    fn test_preorder_traversal() {
        let tree = two_level_tree();
        let depths: Vec<_> = tree.nodes().map(|n| (n.depth(), n.area().x)).collect();
        assert_eq!(depths, vec![(0, 0), (1, 0), (1, 4)]);
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.max_depth(), 1);
    }

    #[test]
    fn test_set_room_narrows_area() {
        let mut tree = two_level_tree();
        tree.for_each_leaf_mut(|leaf| {
            let b = leaf.bounds();
            leaf.set_room(Area::new(b.x + 1, b.y + 1, 2, 2));
        });

        let rooms = tree.rooms();
        assert_eq!(rooms, vec![Area::new(1, 1, 2, 2), Area::new(5, 1, 2, 2)]);
        for leaf in tree.leaves() {
            assert!(leaf.flags().contains(NodeFlags::LEAF | NodeFlags::HAS_ROOM));
            assert!(leaf.bounds().contains(&leaf.area()));
        }
    }
}
