use crate::ship::ShipType;

pub const GRID_SIZE: u8 = 4;
pub const NUM_SHIPS: usize = 2;
/// Fleet in placement order: the 3-cell ship is committed before the 2-cell one.
pub const FLEET: [ShipType; NUM_SHIPS] = [ShipType::new("Cruiser", 3), ShipType::new("Destroyer", 2)];

/// Random trials per ship before placement gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 50;

/// Key under which the single game blob is persisted.
pub const GAME_STATE_KEY: &str = "battleship_game_state";

/// Smallest fleet for which "every ship sunk" counts as a victory.
pub const MIN_FLEET_FOR_VICTORY: usize = 1;

/// Tunable rules of a game.
///
/// The defaults reproduce the standard 4×4 game. Tests and alternative front
/// ends swap in other grids or fleets without touching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub grid_size: u8,
    pub fleet: &'static [ShipType],
    pub max_placement_attempts: usize,
    /// An empty fleet is vacuously "all sunk"; fleets smaller than this never
    /// produce a victory.
    pub min_fleet_for_victory: usize,
}

impl GameConfig {
    pub const fn new(grid_size: u8, fleet: &'static [ShipType]) -> Self {
        Self {
            grid_size,
            fleet,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            min_fleet_for_victory: MIN_FLEET_FOR_VICTORY,
        }
    }

    /// Total number of cells occupied by a fully placed fleet.
    pub fn total_ship_cells(&self) -> usize {
        self.fleet.iter().map(|s| s.length()).sum()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(GRID_SIZE, &FLEET)
    }
}
