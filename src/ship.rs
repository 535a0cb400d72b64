//! Ship definitions and per-ship hit tracking.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::common::Coordinate;

/// Orientation of a ship on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Extends to the right of its anchor.
    Horizontal,
    /// Extends downwards from its anchor.
    Vertical,
}

impl Orientation {
    /// The `i`-th cell of a run starting at `anchor`, or `None` if the index
    /// does not fit a `u8`.
    pub fn step(self, anchor: Coordinate, i: usize) -> Option<Coordinate> {
        let i = u8::try_from(i).ok()?;
        match self {
            Orientation::Horizontal => Some(Coordinate::new(anchor.row, anchor.col.checked_add(i)?)),
            Orientation::Vertical => Some(Coordinate::new(anchor.row.checked_add(i)?, anchor.col)),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship laid on the grid together with the cells hit so far.
///
/// `hits` keeps the order in which cells were struck and is always a subset of
/// `positions`.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct Ship {
    id: String,
    positions: Vec<Coordinate>,
    hits: Vec<Coordinate>,
    is_sunk: bool,
}

impl Ship {
    /// Lay a ship over `positions` with no hits recorded.
    pub fn new(id: impl Into<String>, positions: Vec<Coordinate>) -> Self {
        Self {
            id: id.into(),
            positions,
            hits: Vec::new(),
            is_sunk: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Occupied cells in laying order.
    pub fn positions(&self) -> &[Coordinate] {
        &self.positions
    }

    /// Cells hit so far, oldest first.
    pub fn hits(&self) -> &[Coordinate] {
        &self.hits
    }

    /// Number of cells the ship occupies.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, cell: Coordinate) -> bool {
        self.positions.contains(&cell)
    }

    /// Register a hit at `cell`.
    ///
    /// Returns `true` if the ship occupies `cell`. A cell already in the hit set
    /// is not recorded twice.
    pub fn register_hit(&mut self, cell: Coordinate) -> bool {
        if !self.contains(cell) {
            return false;
        }
        if !self.hits.contains(&cell) {
            self.hits.push(cell);
        }
        if self.hits.len() == self.positions.len() {
            self.is_sunk = true;
        }
        true
    }

    /// Check if the ship is sunk (all cells hit).
    pub fn is_sunk(&self) -> bool {
        self.is_sunk
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: \"{}\", positions: {:?}, hits: {}, sunk: {} }}",
            self.id,
            self.positions,
            self.hits.len(),
            self.is_sunk,
        )
    }
}
