//! Scatter generator (simple room placement)
//!
//! Drops randomly sized rooms at random positions until enough fit or the
//! step budget runs out, then chains them in placement order with dog-leg
//! corridors.

use tracing::{debug, warn};

use crate::area::Area;
use crate::config::ScatterConfig;
use crate::corridor::dog_leg;
use crate::error::GenError;
use crate::events::{EventLog, GenEvent};
use crate::generate::{Generation, log_report, paint_corridors};
use crate::grid::{TileKind, TileWriter};
use crate::rng::RandomSource;

/// Run the scatter generator over `canvas`
pub fn scatter_rooms<W, R>(
    canvas: &mut W,
    config: &ScatterConfig,
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
    let mut rooms: Vec<Area> = Vec::new();
    let mut rejected = 0;

    for step in 1..=config.max_steps {
        if rooms.len() >= config.max_rooms {
            break;
        }

        let room = Area::new(
            rng.range_int(bounds.x, bounds.x_max()),
            rng.range_int(bounds.y, bounds.y_max()),
            rng.range_int(config.min_room_size.width, config.max_room_size.width + 1),
            rng.range_int(config.min_room_size.height, config.max_room_size.height + 1),
        );

        if !canvas.is_free(&room, config.room_margin) {
            rejected += 1;
            continue;
        }

        debug!(?room, step, "room placed");
        canvas.paint_area(room, TileKind::Room);
        events.push(GenEvent::RoomCarved {
            leaf: bounds,
            room,
            attempts: rejected + 1,
        });
        rejected = 0;
        rooms.push(room);
    }

    if rooms.len() < config.max_rooms {
        warn!(
            placed = rooms.len(),
            wanted = config.max_rooms,
            "step budget exhausted"
        );
    }

    let corridors: Vec<_> = rooms
        .windows(2)
        .map(|pair| {
            let corridor = dog_leg(pair[0].center(), pair[1].center(), rng);
            events.push(GenEvent::Linked {
                from: corridor.start,
                to: corridor.end,
                orientation: corridor.orientation,
            });
            corridor
        })
        .collect();

    paint_corridors(canvas, &corridors);
    canvas.paint_ground();

    let generation = Generation::new(rooms, corridors, events, 0, 0);
    log_report(&generation.report);
    Ok(generation)
}
