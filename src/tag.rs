//! Mapping between NFC tag identifiers and grid cells.
//!
//! A tag identifier (HID) is two decimal digits, `RC`, naming the 1-based row
//! and column of the cell it is stuck to: `"11"` is the top-left cell, `"44"`
//! the bottom-right cell of the standard grid.

use alloc::format;
use alloc::string::String;

use crate::common::{Coordinate, TagError};

/// Parse a tag identifier into a 0-based coordinate on an `n×n` grid.
pub fn parse_hid(hid: &str, grid_size: u8) -> Result<Coordinate, TagError> {
    let len = hid.chars().count();
    if len != 2 {
        return Err(TagError::WrongLength(len));
    }
    let mut digits = hid.chars().map(|c| {
        c.to_digit(10)
            .map(|d| d as u8)
            .ok_or(TagError::NotADigit(c))
    });
    let (Some(row), Some(col)) = (digits.next(), digits.next()) else {
        return Err(TagError::WrongLength(len));
    };
    let (row, col) = (row?, col?);

    // "0" is below the 1-based range; anything past the grid is above it.
    if row == 0 || col == 0 || row > grid_size || col > grid_size {
        return Err(TagError::OutOfRange { row, col });
    }
    Ok(Coordinate::new(row - 1, col - 1))
}

/// Like [`parse_hid`] but discarding the reason: `None` means "invalid tag".
pub fn hid_to_position(hid: &str, grid_size: u8) -> Option<Coordinate> {
    parse_hid(hid, grid_size).ok()
}

impl Coordinate {
    /// Tag identifier for this cell, `(row+1)(col+1)`.
    ///
    /// Only grids up to 9×9 have single-digit labels, so only those round-trip
    /// through [`parse_hid`].
    pub fn to_hid(&self) -> String {
        format!("{}{}", self.row as u16 + 1, self.col as u16 + 1)
    }
}
