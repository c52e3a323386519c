//! bsp-core: room and corridor layout generation
//!
//! Recursively partitions a grid area into a binary tree, carves a room in
//! each leaf and stitches sibling subtrees together with dog-leg corridors.
//! The crate has no rendering or storage of its own: output goes through the
//! [`TileWriter`] trait and every decision is recorded in an [`EventLog`].
//!
//! ```
//! use bsp_core::{GenConfig, GenRng, TileGrid, generate_bsp};
//!
//! let mut grid = TileGrid::new(64, 48);
//! let generation = generate_bsp(&mut grid, &GenConfig::default(), &mut GenRng::new(7)).unwrap();
//! assert_eq!(generation.report.rooms, generation.rooms.len());
//! ```

pub mod area;
pub mod carve;
pub mod config;
pub mod corridor;
pub mod error;
pub mod events;
pub mod generate;
pub mod grid;
pub mod link;
pub mod partition;
pub mod scatter;

mod rng;

pub use area::{Area, Point, Size, SplitAxis};
pub use carve::{CarveOutcome, RoomCarver};
pub use config::{GenConfig, ScatterConfig, SplitRatio};
pub use corridor::{ConnectivityTracker, Corridor, DogLeg, Orientation, dog_leg};
pub use error::{ConfigError, GenError};
pub use events::{EventLog, GenEvent, LeafReason};
pub use generate::{Generation, GenerationReport, generate_bsp};
pub use grid::{TileGrid, TileKind, TileWriter};
pub use link::ConnectivityLinker;
pub use partition::{PartitionBuilder, PartitionNode, PartitionTree};
pub use rng::{GenRng, RandomSource};
pub use scatter::scatter_rooms;
