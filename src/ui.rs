//! Plain-text views of the grid and the game counters.

use alloc::format;
use alloc::string::String;
use core::fmt::Write;

use crate::common::Coordinate;
use crate::game::{CellView, GameState, GameSummary};

const HIT_MARK: &str = "X";
const MISS_MARK: &str = "o";

/// Render the grid one row per line. Unshot cells show their tag label so the
/// player can find the matching tag; ship cells are never revealed.
pub fn render_grid(state: &GameState) -> String {
    render(state.grid_size(), |cell| match state.cell(cell) {
        CellView::Untouched => cell.to_hid(),
        CellView::Hit => String::from(HIT_MARK),
        CellView::Miss => String::from(MISS_MARK),
    })
}

/// Label grid shown before any game exists.
pub fn render_empty_grid(grid_size: u8) -> String {
    render(grid_size, |cell| cell.to_hid())
}

fn render(grid_size: u8, mut label: impl FnMut(Coordinate) -> String) -> String {
    let mut out = String::new();
    for row in 0..grid_size {
        for col in 0..grid_size {
            if col > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{:>2}", label(Coordinate::new(row, col)));
        }
        out.push('\n');
    }
    out
}

/// One-line status: shots fired and ships sunk, or the victory banner.
pub fn status_line(summary: &GameSummary) -> String {
    if summary.victory {
        format!(
            "Victory! All {} ships sunk in {} shots",
            summary.total_ships, summary.shots_fired
        )
    } else {
        format!(
            "Shots: {} | Sunk: {}/{}",
            summary.shots_fired, summary.ships_sunk, summary.total_ships
        )
    }
}
