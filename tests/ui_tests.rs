use nfc_battleship::{render_empty_grid, render_grid, status_line, Coordinate, GameConfig, GameState, Ship};

fn c(row: u8, col: u8) -> Coordinate {
    Coordinate::new(row, col)
}

#[test]
fn test_empty_grid_shows_tag_labels() {
    assert_eq!(render_empty_grid(4), "11 12 13 14\n21 22 23 24\n31 32 33 34\n41 42 43 44\n");
}

#[test]
fn test_grid_marks_hits_and_misses() {
    let rules = GameConfig::default();
    let mut state = GameState::new(4, vec![Ship::new("ship_2_0", vec![c(0, 0), c(0, 1)])]);
    state.fire(c(0, 0), &rules).unwrap();
    state.fire(c(2, 3), &rules).unwrap();
    assert_eq!(
        render_grid(&state),
        " X 12 13 14\n21 22 23 24\n31 32 33  o\n41 42 43 44\n"
    );
}

#[test]
fn test_status_line() {
    let rules = GameConfig::default();
    let mut state = GameState::new(
        4,
        vec![
            Ship::new("ship_3_0", vec![c(0, 0), c(0, 1), c(0, 2)]),
            Ship::new("ship_2_0", vec![c(2, 2), c(3, 2)]),
        ],
    );
    state.fire(c(2, 2), &rules).unwrap();
    state.fire(c(3, 2), &rules).unwrap();
    state.fire(c(1, 1), &rules).unwrap();
    assert_eq!(status_line(&state.summary()), "Shots: 3 | Sunk: 1/2");

    for cell in [c(0, 0), c(0, 1), c(0, 2)] {
        state.fire(cell, &rules).unwrap();
    }
    assert_eq!(status_line(&state.summary()), "Victory! All 2 ships sunk in 6 shots");
}
