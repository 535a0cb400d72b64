//! Engine operations over a state store.

use alloc::vec::Vec;

use rand::Rng;

use crate::common::{Coordinate, GameError, ShotOutcome};
use crate::config::GameConfig;
use crate::game::GameState;
use crate::placement::generate_fleet;
use crate::ship::Ship;
use crate::store::GameStore;
use crate::tag::parse_hid;

/// Handle to one game: the store holding its blob plus the rules it is played
/// under.
///
/// Every operation reads the latest blob, applies its change and writes the
/// result back before returning.
pub struct GameSession<S: GameStore> {
    store: S,
    config: GameConfig,
}

impl<S: GameStore> GameSession<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, GameConfig::default())
    }

    pub fn with_config(store: S, config: GameConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Start a new game with a random fleet, replacing any previous one.
    pub fn new_game<R: Rng>(&mut self, rng: &mut R) -> Result<GameState, GameError> {
        let fleet = generate_fleet(rng, &self.config);
        self.start_with(fleet)
    }

    /// Start a new game over a given fleet, replacing any previous one.
    pub fn start_with(&mut self, ships: Vec<Ship>) -> Result<GameState, GameError> {
        if ships.len() < self.config.fleet.len() {
            log::warn!(
                "starting with {} of {} ships",
                ships.len(),
                self.config.fleet.len()
            );
        }
        let state = GameState::new(self.config.grid_size, ships);
        self.store.save(&state)?;
        log::info!("new game started with {} ships", state.ships().len());
        Ok(state)
    }

    /// The current game, or `None` if none has been started.
    pub fn state(&self) -> Result<Option<GameState>, GameError> {
        Ok(self.store.load()?)
    }

    /// Fire at `target` and persist the result.
    ///
    /// A repeated target is answered from the stored state without writing.
    pub fn process_shot(&mut self, target: Coordinate) -> Result<ShotOutcome, GameError> {
        let mut state = self.store.load()?.ok_or(GameError::UninitializedGame)?;
        let repeat = state.already_shot(target);
        let outcome = state.fire(target, &self.config)?;
        if repeat {
            log::debug!("{} already shot; ignoring", target);
        } else {
            self.store.save(&state)?;
            log::debug!("shot at {}: {:?}", target, outcome);
        }
        Ok(outcome)
    }

    /// Translate a tag identifier and fire at the cell it names.
    pub fn shoot_tag(&mut self, hid: &str) -> Result<ShotOutcome, GameError> {
        let target = parse_hid(hid, self.config.grid_size)?;
        self.process_shot(target)
    }

    /// Remove the stored game.
    pub fn clear(&mut self) -> Result<(), GameError> {
        self.store.clear()?;
        log::info!("game state cleared");
        Ok(())
    }
}
