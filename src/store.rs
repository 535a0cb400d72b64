use crate::common::StoreError;
use crate::game::GameState;

/// Whole-state persistence for one game session.
///
/// Each operation works on the complete blob: `load` returns the last saved
/// state, `save` overwrites it and `clear` removes it.
pub trait GameStore {
    fn load(&self) -> Result<Option<GameState>, StoreError>;
    fn save(&mut self, state: &GameState) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-memory store, used in tests and by callers that keep the game in process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<GameState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `state`.
    pub fn with_state(state: GameState) -> Self {
        Self { slot: Some(state) }
    }
}

impl GameStore for MemoryStore {
    fn load(&self) -> Result<Option<GameState>, StoreError> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, state: &GameState) -> Result<(), StoreError> {
        self.slot = Some(state.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.slot = None;
        Ok(())
    }
}
