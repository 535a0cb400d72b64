//! Common types for the game: coordinates, shot outcomes and errors.

use alloc::string::String;
use core::fmt;

/// A cell on the grid, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: u8,
    pub col: u8,
}

impl Coordinate {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns `true` if the cell lies inside an `n×n` grid.
    pub fn in_bounds(&self, grid_size: u8) -> bool {
        self.row < grid_size && self.col < grid_size
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Effect of a single shot, reflecting the game after the shot was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct ShotOutcome {
    pub hit: bool,
    pub sunk: bool,
    pub game_over: bool,
    pub victory: bool,
}

/// Why a tag identifier could not be mapped to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagError {
    /// Identifier is not exactly two characters long.
    WrongLength(usize),
    /// A character is not a decimal digit.
    NotADigit(char),
    /// Digits parsed but name a cell outside the grid (1-based, as written).
    OutOfRange { row: u8, col: u8 },
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagError::WrongLength(len) => write!(f, "expected 2 characters, got {}", len),
            TagError::NotADigit(c) => write!(f, "'{}' is not a digit", c),
            TagError::OutOfRange { row, col } => {
                write!(f, "row {} / column {} is outside the grid", row, col)
            }
        }
    }
}

/// Failure reported by a [`GameStore`](crate::GameStore) backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not read or write the blob.
    Io(String),
    /// The blob exists but could not be encoded or decoded.
    Codec(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "state store I/O error: {}", e),
            StoreError::Codec(e) => write!(f, "state blob codec error: {}", e),
        }
    }
}

/// Errors returned by game operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A shot was submitted before any game was started.
    UninitializedGame,
    /// Scanned tag identifier is malformed or names a cell off the grid.
    InvalidTagFormat(TagError),
    /// Coordinate submitted directly lies outside the grid.
    OutOfBounds { row: u8, col: u8 },
    /// The state store failed.
    Store(StoreError),
}

impl From<TagError> for GameError {
    fn from(err: TagError) -> Self {
        GameError::InvalidTagFormat(err)
    }
}

impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        GameError::Store(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UninitializedGame => write!(f, "No game state found; start a new game first"),
            GameError::InvalidTagFormat(e) => write!(f, "Invalid tag identifier: {}", e),
            GameError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is outside the grid", row, col)
            }
            GameError::Store(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TagError {}
#[cfg(feature = "std")]
impl std::error::Error for StoreError {}
#[cfg(feature = "std")]
impl std::error::Error for GameError {}
