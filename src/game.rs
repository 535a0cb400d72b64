//! Game state: the fleet, the shots fired and the shot rules.

use alloc::vec::Vec;

use crate::common::{Coordinate, GameError, ShotOutcome};
use crate::config::GameConfig;
use crate::ship::Ship;

/// The whole persisted game.
///
/// Serialized field names follow the blob layout used by the web front end:
/// `gridSize`, `battleships`, `shots`, `gameOver`, `victory`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct GameState {
    grid_size: u8,
    #[cfg_attr(feature = "std", serde(rename = "battleships"))]
    ships: Vec<Ship>,
    shots: Vec<Coordinate>,
    game_over: bool,
    victory: bool,
}

/// What a grid cell shows to the player. Unshot ship cells stay hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Untouched,
    Hit,
    Miss,
}

/// Counters shown on the start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct GameSummary {
    pub shots_fired: usize,
    pub ships_sunk: usize,
    pub total_ships: usize,
    pub game_over: bool,
    pub victory: bool,
}

impl GameState {
    /// Fresh game over `ships`, no shots fired.
    ///
    /// The ships are expected not to overlap; [`generate_fleet`](crate::generate_fleet)
    /// guarantees this for random layouts.
    pub fn new(grid_size: u8, ships: Vec<Ship>) -> Self {
        Self {
            grid_size,
            ships,
            shots: Vec::new(),
            game_over: false,
            victory: false,
        }
    }

    pub fn grid_size(&self) -> u8 {
        self.grid_size
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Shots in the order they were fired.
    pub fn shots(&self) -> &[Coordinate] {
        &self.shots
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_victory(&self) -> bool {
        self.victory
    }

    pub fn already_shot(&self, cell: Coordinate) -> bool {
        self.shots.contains(&cell)
    }

    /// Returns `true` when all ships are sunk (vacuously for an empty fleet).
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(|s| s.is_sunk())
    }

    /// Fire at `target`.
    ///
    /// A repeated target leaves the state untouched and reports no hit with the
    /// current end-of-game flags. Otherwise the shot is recorded, the first ship
    /// occupying the cell takes the hit, and sinking the last ship ends the game
    /// in victory, provided the fleet holds at least
    /// `rules.min_fleet_for_victory` ships.
    pub fn fire(&mut self, target: Coordinate, rules: &GameConfig) -> Result<ShotOutcome, GameError> {
        if !target.in_bounds(self.grid_size) {
            return Err(GameError::OutOfBounds {
                row: target.row,
                col: target.col,
            });
        }
        if self.already_shot(target) {
            return Ok(ShotOutcome {
                hit: false,
                sunk: false,
                game_over: self.game_over,
                victory: self.victory,
            });
        }
        self.shots.push(target);

        let mut hit = false;
        let mut sunk = false;
        if let Some(ship) = self.ships.iter_mut().find(|s| s.contains(target)) {
            hit = ship.register_hit(target);
            sunk = ship.is_sunk();
            if sunk {
                log::info!("{} sunk", ship.id());
            }
        }

        if self.ships.len() >= rules.min_fleet_for_victory && self.all_sunk() {
            self.game_over = true;
            self.victory = true;
        }

        Ok(ShotOutcome {
            hit,
            sunk,
            game_over: self.game_over,
            victory: self.victory,
        })
    }

    /// What the player sees at `cell`.
    pub fn cell(&self, cell: Coordinate) -> CellView {
        if !self.already_shot(cell) {
            CellView::Untouched
        } else if self.ships.iter().any(|s| s.contains(cell)) {
            CellView::Hit
        } else {
            CellView::Miss
        }
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            shots_fired: self.shots.len(),
            ships_sunk: self.ships.iter().filter(|s| s.is_sunk()).count(),
            total_ships: self.ships.len(),
            game_over: self.game_over,
            victory: self.victory,
        }
    }
}
