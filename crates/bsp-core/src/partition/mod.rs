//! Binary space partition tree
//!
//! Splits a root area into a tree of nodes whose leaves tile the root
//! exactly. Leaves are the candidate room locations.

mod builder;
mod node;

pub use builder::PartitionBuilder;
pub use node::{NodeFlags, Nodes, PartitionNode, PartitionTree};
