//! Partition generator (partition, carve, link, paint)
//!
//! Builds a partition tree over the canvas bounds, carves a room in each
//! leaf, links sibling subtrees and paints the result. The tree lives only
//! for the duration of the call.

use hashbrown::{HashMap, HashSet};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::area::{Area, Point};
use crate::carve::{CarveOutcome, RoomCarver};
use crate::config::GenConfig;
use crate::corridor::{ConnectivityTracker, Corridor};
use crate::error::GenError;
use crate::events::{EventLog, GenEvent};
use crate::grid::{TileKind, TileWriter};
use crate::link::ConnectivityLinker;
use crate::partition::{PartitionBuilder, PartitionTree};
use crate::rng::RandomSource;

/// Summary counts of one generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Partition leaves (zero for generators without a tree)
    pub leaves: usize,
    pub rooms: usize,
    pub corridors: usize,
    /// Distinct cells covered by corridors
    pub corridor_cells: usize,
    /// Deepest partition node
    pub max_depth: u32,
    /// Room clusters joined by corridors
    pub components: usize,
}

/// Everything a generation run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generation {
    pub rooms: Vec<Area>,
    pub corridors: Vec<Corridor>,
    pub events: EventLog,
    pub report: GenerationReport,
}

impl Generation {
    pub(crate) fn new(
        rooms: Vec<Area>,
        corridors: Vec<Corridor>,
        events: EventLog,
        leaves: usize,
        max_depth: u32,
    ) -> Self {
        let report = GenerationReport {
            leaves,
            rooms: rooms.len(),
            corridors: corridors.len(),
            corridor_cells: distinct_cells(&corridors),
            max_depth,
            components: count_components(&rooms, &corridors),
        };
        Self {
            rooms,
            corridors,
            events,
            report,
        }
    }

    /// True when every room is reachable from every other room
    pub fn is_connected(&self) -> bool {
        self.report.components <= 1
    }
}

/// Run the partition generator over `canvas`
///
/// Fails only on malformed configuration or an empty canvas. A run that
/// places few or no rooms is still a success; inspect the report.
pub fn generate_bsp<W, R>(
    canvas: &mut W,
    config: &GenConfig,
    rng: &mut R,
) -> Result<Generation, GenError>
where
    W: TileWriter,
    R: RandomSource,
{
    config.validate()?;
    let bounds = canvas.bounds();
    if bounds.is_empty() {
        return Err(GenError::EmptyBounds(bounds));
    }

    let mut events = EventLog::new();
    let mut tree = PartitionBuilder::new(config).build(bounds, rng, &mut events);

    carve_leaves(&mut tree, canvas, config, rng, &mut events);

    let corridors = ConnectivityLinker::new(config.link_chance).connect(&tree, rng, &mut events);
    paint_corridors(canvas, &corridors);
    canvas.paint_ground();

    let generation = Generation::new(
        tree.rooms(),
        corridors,
        events,
        tree.leaf_count(),
        tree.max_depth(),
    );
    log_report(&generation.report);
    Ok(generation)
}

/// Carve each leaf in order, painting rooms as they are placed
fn carve_leaves<W, R>(
    tree: &mut PartitionTree,
    canvas: &mut W,
    config: &GenConfig,
    rng: &mut R,
    events: &mut EventLog,
) where
    W: TileWriter,
    R: RandomSource,
{
    let carver = RoomCarver::new(config.min_room_size, config.room_attempts);
    let margin = config.room_margin;

    tree.for_each_leaf_mut(|leaf| {
        let bounds = leaf.bounds();
        let outcome = carver.try_carve(leaf, &mut *rng, |room| canvas.is_free(room, margin));
        match outcome {
            CarveOutcome::Carved { room, attempts } => {
                debug!(?room, attempts, "room carved");
                canvas.paint_area(room, TileKind::Room);
                events.push(GenEvent::RoomCarved {
                    leaf: bounds,
                    room,
                    attempts,
                });
            }
            CarveOutcome::Rejected { attempts } => {
                debug!(leaf = ?bounds, attempts, "no free spot for room");
                events.push(GenEvent::RoomRejected {
                    leaf: bounds,
                    attempts,
                });
            }
            CarveOutcome::Skipped => {
                debug!(leaf = ?bounds, "leaf too small for a room");
                events.push(GenEvent::RoomSkipped { leaf: bounds });
            }
        }
    });
}

pub(crate) fn paint_corridors<W: TileWriter>(canvas: &mut W, corridors: &[Corridor]) {
    for corridor in corridors {
        for p in corridor.cells() {
            canvas.paint_cell(p, TileKind::Corridor);
        }
    }
}

pub(crate) fn log_report(report: &GenerationReport) {
    if report.rooms < 2 {
        warn!(rooms = report.rooms, "too few rooms to connect");
    }
    info!(
        leaves = report.leaves,
        rooms = report.rooms,
        corridors = report.corridors,
        components = report.components,
        "generation complete"
    );
}

fn distinct_cells(corridors: &[Corridor]) -> usize {
    corridors
        .iter()
        .flat_map(Corridor::cells)
        .collect::<HashSet<Point>>()
        .len()
}

/// Count room clusters, treating each corridor as joining the rooms that
/// contain its endpoints
fn count_components(rooms: &[Area], corridors: &[Corridor]) -> usize {
    let mut tracker = ConnectivityTracker::new(rooms.len());
    let centers: HashMap<Point, usize> = rooms
        .iter()
        .enumerate()
        .map(|(i, room)| (room.center(), i))
        .collect();
    let room_of = |p: Point| {
        centers
            .get(&p)
            .copied()
            .or_else(|| rooms.iter().position(|r| r.contains_point(p)))
    };

    for corridor in corridors {
        if let (Some(a), Some(b)) = (room_of(corridor.start), room_of(corridor.end)) {
            tracker.join(a, b);
        }
    }
    tracker.components()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::Size;
    use crate::config::SplitRatio;
    use crate::error::ConfigError;
    use crate::grid::TileGrid;
    use crate::rng::GenRng;

    fn example_config() -> GenConfig {
        GenConfig {
            min_room_size: Size::new(3, 3),
            max_room_size: Size::new(8, 8),
            max_depth: 4,
            ..GenConfig::default()
        }
    }

    #[test]
    fn test_rooms_are_painted() {
        let mut grid = TileGrid::new(40, 30);
        let generation = generate_bsp(&mut grid, &example_config(), &mut GenRng::new(42)).unwrap();

        let room_cells: i64 = generation.rooms.iter().map(Area::cell_count).sum();
        assert_eq!(grid.count(TileKind::Room) as i64, room_cells);
        for room in &generation.rooms {
            assert!(room.cells().all(|p| grid.get(p) == Some(TileKind::Room)));
        }
        // Every cell is painted once ground is filled in
        assert_eq!(
            grid.count(TileKind::Room)
                + grid.count(TileKind::Corridor)
                + grid.count(TileKind::Ground),
            40 * 30
        );
    }

    #[test]
    fn test_rooms_keep_margin() {
        let mut grid = TileGrid::new(48, 48);
        let generation = generate_bsp(&mut grid, &example_config(), &mut GenRng::new(3)).unwrap();
        for (i, a) in generation.rooms.iter().enumerate() {
            for b in &generation.rooms[i + 1..] {
                assert!(!a.inflate(1).intersects(b), "{a:?} too close to {b:?}");
            }
        }
    }

    #[test]
    fn test_report_matches_events() {
        let mut grid = TileGrid::new(40, 40);
        let generation = generate_bsp(&mut grid, &example_config(), &mut GenRng::new(8)).unwrap();
        let report = generation.report;

        assert_eq!(report.rooms, generation.events.rooms_carved());
        assert_eq!(report.corridors, generation.events.links_made());
        assert_eq!(report.leaves, generation.events.leaf_count());
        assert!(report.corridor_cells >= report.corridors);
        assert!(report.components >= 1);
    }

    #[test]
    fn test_full_linking_is_connected() {
        let config = GenConfig {
            link_chance: 1.0,
            ..example_config()
        };
        for seed in 0..20 {
            let mut grid = TileGrid::new(50, 40);
            let generation = generate_bsp(&mut grid, &config, &mut GenRng::new(seed)).unwrap();
            assert!(generation.is_connected(), "seed {seed}: {:?}", generation.report);
            if generation.report.rooms > 0 {
                assert_eq!(generation.report.corridors, generation.report.rooms - 1);
            }
        }
    }

    #[test]
    fn test_no_linking_leaves_islands() {
        let config = GenConfig {
            link_chance: 0.0,
            ..example_config()
        };
        let mut grid = TileGrid::new(50, 40);
        let generation = generate_bsp(&mut grid, &config, &mut GenRng::new(1)).unwrap();
        assert!(generation.corridors.is_empty());
        assert_eq!(generation.report.components, generation.report.rooms);
        assert_eq!(grid.count(TileKind::Corridor), 0);
    }

    #[test]
    fn test_bad_config_fails_fast() {
        let config = GenConfig {
            min_room_size: Size::new(9, 9),
            ..GenConfig::default()
        };
        let mut grid = TileGrid::new(20, 20);
        let result = generate_bsp(&mut grid, &config, &mut GenRng::new(1));
        assert!(matches!(
            result,
            Err(GenError::Config(ConfigError::MinExceedsMax { .. }))
        ));
        assert_eq!(grid.count(TileKind::Ground), 0);
    }

    #[test]
    fn test_bad_ratio_fails_fast() {
        let config = GenConfig {
            split_ratio: SplitRatio { min: 0.8, max: 0.2 },
            ..GenConfig::default()
        };
        let result = generate_bsp(&mut TileGrid::new(20, 20), &config, &mut GenRng::new(1));
        assert!(matches!(result, Err(GenError::Config(_))));
    }

    #[test]
    fn test_huge_margin_is_an_error() {
        let config = GenConfig {
            room_margin: 2_000_000_000,
            ..GenConfig::default()
        };
        let result = generate_bsp(&mut TileGrid::new(20, 20), &config, &mut GenRng::new(1));
        assert_eq!(
            result,
            Err(GenError::Config(ConfigError::MarginTooLarge(2_000_000_000)))
        );
    }

    #[test]
    fn test_small_canvas_leaf_is_skipped() {
        // 2x2 is below the 3x3 minimum: one leaf, no room, no collision
        let mut grid = TileGrid::new(2, 2);
        let generation =
            generate_bsp(&mut grid, &GenConfig::default(), &mut GenRng::new(1)).unwrap();
        let leaf = Area::new(0, 0, 2, 2);
        assert!(generation.rooms.is_empty());
        assert!(generation.events.iter().any(|e| *e == GenEvent::RoomSkipped { leaf }));
        assert!(
            !generation
                .events
                .iter()
                .any(|e| matches!(e, GenEvent::RoomRejected { .. }))
        );
        assert_eq!(grid.count(TileKind::Ground), 4);
    }

    #[test]
    fn test_empty_canvas_rejected() {
        let mut grid = TileGrid::new(0, 10);
        let result = generate_bsp(&mut grid, &GenConfig::default(), &mut GenRng::new(1));
        assert_eq!(result, Err(GenError::EmptyBounds(Area::new(0, 0, 0, 10))));
    }

    #[test]
    fn test_components_follow_corridors() {
        let rooms = vec![
            Area::new(0, 0, 3, 3),
            Area::new(10, 0, 3, 3),
            Area::new(0, 10, 3, 3),
        ];
        let corridors = vec![Corridor::new(
            rooms[0].center(),
            rooms[1].center(),
            crate::corridor::Orientation::HorizontalFirst,
        )];
        assert_eq!(count_components(&rooms, &corridors), 2);
        assert_eq!(count_components(&rooms, &[]), 3);
        assert_eq!(count_components(&[], &[]), 0);
    }
}
