//! Random, non-overlapping ship placement with a bounded number of trials.

use alloc::format;
use alloc::vec::Vec;

use rand::Rng;

use crate::common::Coordinate;
use crate::config::GameConfig;
use crate::ship::{Orientation, Ship};

/// Result of trying to place one ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Placed(Ship),
    /// Every trial went off the grid or collided with another ship.
    Failed,
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed(_))
    }

    pub fn ship(self) -> Option<Ship> {
        match self {
            Placement::Placed(ship) => Some(ship),
            Placement::Failed => None,
        }
    }
}

/// The `size` cells starting at `anchor` in `orientation`, or `None` if the run
/// leaves an `n×n` grid.
pub fn ship_cells(
    anchor: Coordinate,
    orientation: Orientation,
    size: usize,
    grid_size: u8,
) -> Option<Vec<Coordinate>> {
    (0..size)
        .map(|i| {
            orientation
                .step(anchor, i)
                .filter(|cell| cell.in_bounds(grid_size))
        })
        .collect()
}

/// Try up to `max_attempts` random layouts for a ship of `size` cells.
///
/// Each trial picks a uniform orientation and a uniform anchor over the whole
/// grid; runs that leave the grid or touch a cell of `existing` are rejected.
/// The ship id records the size and the trial that succeeded.
pub fn place_ship<R: Rng>(
    rng: &mut R,
    size: usize,
    existing: &[Ship],
    grid_size: u8,
    max_attempts: usize,
) -> Placement {
    if size == 0 || grid_size == 0 {
        return Placement::Failed;
    }
    for attempt in 0..max_attempts {
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let anchor = Coordinate::new(rng.random_range(0..grid_size), rng.random_range(0..grid_size));
        let Some(cells) = ship_cells(anchor, orientation, size, grid_size) else {
            continue;
        };
        let overlaps = cells
            .iter()
            .any(|cell| existing.iter().any(|ship| ship.contains(*cell)));
        if !overlaps {
            log::debug!("placed {}-cell ship at {} {:?} on trial {}", size, anchor, orientation, attempt);
            return Placement::Placed(Ship::new(format!("ship_{}_{}", size, attempt), cells));
        }
    }
    Placement::Failed
}

/// Place every ship of `config.fleet` in order, each against the ships already
/// committed.
///
/// A ship that cannot be placed is left out, so the fleet may be shorter than
/// the configuration asks for.
pub fn generate_fleet<R: Rng>(rng: &mut R, config: &GameConfig) -> Vec<Ship> {
    let mut fleet: Vec<Ship> = Vec::with_capacity(config.fleet.len());
    for def in config.fleet {
        match place_ship(
            rng,
            def.length(),
            &fleet,
            config.grid_size,
            config.max_placement_attempts,
        ) {
            Placement::Placed(ship) => fleet.push(ship),
            Placement::Failed => log::warn!(
                "could not place {} ({} cells) after {} attempts; fleet will be short",
                def.name(),
                def.length(),
                config.max_placement_attempts
            ),
        }
    }
    fleet
}
