use std::cell::Cell;

use nfc_battleship::{
    Coordinate, GameError, GameSession, GameState, GameStore, MemoryStore, Ship, StoreError, TagError,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn c(row: u8, col: u8) -> Coordinate {
    Coordinate::new(row, col)
}

fn scenario_fleet() -> Vec<Ship> {
    vec![
        Ship::new("ship_3_0", vec![c(0, 0), c(0, 1), c(0, 2)]),
        Ship::new("ship_2_0", vec![c(2, 2), c(3, 2)]),
    ]
}

/// Memory store that counts writes and can be told to fail.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    saves: Cell<usize>,
    fail_load: bool,
    fail_save: bool,
}

impl GameStore for CountingStore {
    fn load(&self) -> Result<Option<GameState>, StoreError> {
        if self.fail_load {
            return Err(StoreError::Io("load failed".to_string()));
        }
        self.inner.load()
    }

    fn save(&mut self, state: &GameState) -> Result<(), StoreError> {
        if self.fail_save {
            return Err(StoreError::Io("save failed".to_string()));
        }
        self.saves.set(self.saves.get() + 1);
        self.inner.save(state)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.inner.clear()
    }
}

#[test]
fn test_shot_before_start_is_uninitialized() {
    let mut session = GameSession::new(MemoryStore::new());
    assert_eq!(
        session.process_shot(c(0, 0)),
        Err(GameError::UninitializedGame)
    );
    assert_eq!(session.shoot_tag("11"), Err(GameError::UninitializedGame));
}

#[test]
fn test_new_game_persists_state() {
    let mut session = GameSession::new(MemoryStore::new());
    let mut rng = SmallRng::seed_from_u64(5);
    let state = session.new_game(&mut rng).unwrap();
    assert_eq!(state.grid_size(), 4);
    assert_eq!(state.ships().len(), 2);
    assert!(state.shots().is_empty());
    assert_eq!(session.state().unwrap(), Some(state));
}

#[test]
fn test_new_game_overwrites_previous() {
    let mut session = GameSession::new(MemoryStore::new());
    session.start_with(scenario_fleet()).unwrap();
    session.process_shot(c(0, 0)).unwrap();

    let fresh = session
        .start_with(vec![Ship::new("ship_2_0", vec![c(3, 0), c(3, 1)])])
        .unwrap();
    let loaded = session.state().unwrap().unwrap();
    assert_eq!(loaded, fresh);
    assert!(loaded.shots().is_empty());
}

#[test]
fn test_scenario_through_store() {
    let mut session = GameSession::new(MemoryStore::new());
    session.start_with(scenario_fleet()).unwrap();

    for cell in [c(0, 0), c(0, 1)] {
        assert!(session.process_shot(cell).unwrap().hit);
    }
    let third = session.process_shot(c(0, 2)).unwrap();
    assert!(third.hit && third.sunk && !third.victory);

    assert!(!session.process_shot(c(1, 1)).unwrap().hit);
    assert!(session.shoot_tag("33").unwrap().hit);
    let last = session.shoot_tag("43").unwrap();
    assert!(last.hit && last.sunk && last.game_over && last.victory);

    let stored = session.state().unwrap().unwrap();
    assert!(stored.is_victory());
    assert_eq!(stored.shots().len(), 6);
}

#[test]
fn test_repeat_shot_does_not_write() {
    let mut session = GameSession::new(CountingStore::default());
    session.start_with(scenario_fleet()).unwrap();
    session.process_shot(c(1, 1)).unwrap();
    assert_eq!(session.store().saves.get(), 2);

    let again = session.process_shot(c(1, 1)).unwrap();
    assert!(!again.hit);
    assert_eq!(session.store().saves.get(), 2);
}

#[test]
fn test_invalid_tag_is_reported() {
    let mut session = GameSession::new(MemoryStore::new());
    session.start_with(scenario_fleet()).unwrap();
    assert_eq!(
        session.shoot_tag("a1"),
        Err(GameError::InvalidTagFormat(TagError::NotADigit('a')))
    );
    assert!(session.state().unwrap().unwrap().shots().is_empty());
}

#[test]
fn test_store_failures_surface() {
    let store = CountingStore {
        fail_load: true,
        ..Default::default()
    };
    let mut session = GameSession::new(store);
    assert!(matches!(session.process_shot(c(0, 0)), Err(GameError::Store(_))));

    let store = CountingStore {
        fail_save: true,
        ..Default::default()
    };
    let mut session = GameSession::new(store);
    assert!(matches!(session.start_with(scenario_fleet()), Err(GameError::Store(_))));
}

#[test]
fn test_clear_then_load_is_absent() {
    let mut session = GameSession::new(MemoryStore::new());
    session.start_with(scenario_fleet()).unwrap();
    session.clear().unwrap();
    assert_eq!(session.state().unwrap(), None);
    assert_eq!(
        session.process_shot(c(0, 0)),
        Err(GameError::UninitializedGame)
    );
    // clearing twice is harmless
    session.clear().unwrap();
}
