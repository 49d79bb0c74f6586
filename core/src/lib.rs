#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Fuse Grid engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative board, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the board executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Fuse Grid.";

/// Commands that express all permissible board mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Configures the board's grid using the provided side length.
    ConfigureGrid {
        /// Side length of the square grid measured in cells.
        size: GridSize,
    },
    /// Clears the board and begins a fresh game session.
    StartGame,
    /// Requests creation of a tile at the provided cell.
    SpawnTile {
        /// Cell that should receive the new tile.
        cell: CellCoord,
        /// Value assigned to the spawned tile.
        value: TileValue,
    },
    /// Requests that all tiles slide and merge in the given direction.
    Move {
        /// Direction of travel for the requested move.
        direction: Direction,
    },
}

/// Events broadcast by the board after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the grid was reconfigured to a new side length.
    GridConfigured {
        /// Side length that became active.
        size: GridSize,
    },
    /// Announces that a fresh game session began on an empty board.
    GameStarted {
        /// Side length of the grid hosting the session.
        size: GridSize,
    },
    /// Confirms that a tile was created at a previously empty cell.
    TileSpawned {
        /// Cell that received the tile.
        cell: CellCoord,
        /// Value assigned to the tile.
        value: TileValue,
    },
    /// Confirms that a tile slid between two cells without merging.
    TileMoved {
        /// Cell the tile occupied before the move.
        from: CellCoord,
        /// Cell the tile occupies after the move.
        to: CellCoord,
        /// Value carried by the tile.
        value: TileValue,
    },
    /// Confirms that two equal tiles fused into one doubled tile.
    TilesMerged {
        /// Cell of the tile closer to the destination edge before the move.
        first: CellCoord,
        /// Cell of the tile that slid into the merge.
        second: CellCoord,
        /// Cell that holds the merged tile after the move.
        into: CellCoord,
        /// Doubled value created by the merge.
        value: TileValue,
    },
    /// Reports the outcome of a move request, whether or not it changed
    /// anything.
    MoveResolved {
        /// Direction that was requested.
        direction: Direction,
        /// Sum of every merged value produced by the move.
        score_delta: u32,
        /// Whether any tile's position or value changed.
        changed: bool,
    },
    /// Announces that the board is full and no move can change it.
    GameEnded,
}

/// Cardinal directions a move request may take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// All four directions in a deterministic order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Side length of the square grid, validated at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridSize(u32);

impl GridSize {
    /// Smallest playable side length.
    pub const MIN: u32 = 2;

    /// Creates a grid size, rejecting boards too small to host a move.
    pub fn new(value: u32) -> Result<Self, GridSizeError> {
        if value < Self::MIN {
            return Err(GridSizeError::TooSmall { provided: value });
        }
        Ok(Self(value))
    }

    /// Retrieves the side length in cells.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        (self.0 as usize) * (self.0 as usize)
    }
}

/// Error raised when a grid size cannot host a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridSizeError {
    /// The provided side length is below [`GridSize::MIN`].
    TooSmall {
        /// Side length that was rejected.
        provided: u32,
    },
}

impl fmt::Display for GridSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { provided } => write!(
                f,
                "grid size {provided} is below the minimum of {}",
                GridSize::MIN
            ),
        }
    }
}

impl Error for GridSizeError {}

/// Value carried by a tile: a power of two, at least 2.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TileValue(u32);

impl TileValue {
    /// The smallest tile value.
    pub const TWO: TileValue = TileValue(2);
    /// The value produced by the rarer spawn roll.
    pub const FOUR: TileValue = TileValue(4);

    /// Creates a tile value, returning `None` unless it is a power of two
    /// no smaller than 2.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        if value >= 2 && value.is_power_of_two() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Retrieves the numeric tile value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Value of the tile created when two tiles of this value merge.
    #[must_use]
    pub const fn doubled(&self) -> TileValue {
        TileValue(self.0.saturating_mul(2))
    }
}

/// Running score total accumulated from merge deltas.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Score(u32);

impl Score {
    /// Score at the start of a session.
    pub const ZERO: Score = Score(0);

    /// Creates a score from a raw total.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric score total.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the score grown by the provided merge delta.
    #[must_use]
    pub const fn saturating_add(&self, delta: u32) -> Score {
        Score(self.0.saturating_add(delta))
    }
}

/// Read-only view into the dense tile grid.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    cells: &'a [Option<TileValue>],
    size: u32,
}

impl<'a> BoardView<'a> {
    /// Captures a new board view backed by the provided cell slice.
    ///
    /// The slice must hold `size * size` entries laid out row-major.
    #[must_use]
    pub fn new(cells: &'a [Option<TileValue>], size: u32) -> Self {
        debug_assert_eq!(cells.len(), (size as usize) * (size as usize));
        Self { cells, size }
    }

    /// Returns the tile occupying the provided cell, if any.
    ///
    /// Out-of-bounds cells read as empty so boundary-scanning callers need no
    /// separate range check.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<TileValue> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Reports whether every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Number of tiles currently on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Side length of the viewed grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Option<TileValue>> + 'a {
        self.cells.iter().copied()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.size && cell.row() < self.size {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.size).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
