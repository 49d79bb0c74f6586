#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for Fuse Grid.
//!
//! The board owns every tile exclusively. Adapters and systems never hold
//! tile references; they submit [`Command`] values through [`apply`] and read
//! state back through the [`query`] module.

use fuse_grid_core::{CellCoord, Command, Event, GridSize, TileValue, WELCOME_BANNER};
use fuse_grid_system_engine as engine;

/// Represents the authoritative Fuse Grid board state.
#[derive(Debug)]
pub struct Board {
    banner: &'static str,
    size: GridSize,
    cells: Vec<Option<TileValue>>,
}

impl Board {
    /// Creates an empty board with the provided side length.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            banner: WELCOME_BANNER,
            size,
            cells: vec![None; size.cell_count()],
        }
    }

    fn reset(&mut self, size: GridSize) {
        self.size = size;
        self.cells.clear();
        self.cells.resize(size.cell_count(), None);
    }

    fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Places a tile on an empty cell. Occupied cells are left untouched.
    ///
    /// Out-of-bounds coordinates are a caller contract violation.
    fn spawn(&mut self, cell: CellCoord, value: TileValue) -> bool {
        let index = self.index(cell);
        debug_assert!(index.is_some(), "spawn outside the grid: {cell:?}");
        match index.and_then(|index| self.cells.get_mut(index)) {
            Some(slot @ None) => {
                *slot = Some(value);
                true
            }
            _ => false,
        }
    }

    fn tile(&self, cell: CellCoord) -> Option<TileValue> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        let size = self.size.get();
        if cell.column() < size && cell.row() < size {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(size).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Applies the provided command to the board, mutating state deterministically.
pub fn apply(board: &mut Board, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { size } => {
            board.reset(size);
            out_events.push(Event::GridConfigured { size });
        }
        Command::StartGame => {
            board.clear();
            out_events.push(Event::GameStarted { size: board.size });
        }
        Command::SpawnTile { cell, value } => {
            if board.spawn(cell, value) {
                out_events.push(Event::TileSpawned { cell, value });
                // Spawning is the only mutation that can fill the last empty
                // cell, so the terminal check lives here.
                if !engine::has_moves_left(&query::board_view(board)) {
                    out_events.push(Event::GameEnded);
                }
            }
        }
        Command::Move { direction } => {
            let resolution = engine::resolve_move(&query::board_view(board), direction);
            if resolution.changed {
                board.cells.copy_from_slice(&resolution.cells);
                for shift in &resolution.shifts {
                    out_events.push(Event::TileMoved {
                        from: shift.from,
                        to: shift.to,
                        value: shift.value,
                    });
                }
                for merge in &resolution.merges {
                    out_events.push(Event::TilesMerged {
                        first: merge.first,
                        second: merge.second,
                        into: merge.into,
                        value: merge.value,
                    });
                }
            }
            out_events.push(Event::MoveResolved {
                direction,
                score_delta: resolution.score_delta,
                changed: resolution.changed,
            });
        }
    }
}

/// Query functions that provide read-only access to the board state.
pub mod query {
    use super::{engine, Board};
    use fuse_grid_core::{BoardView, CellCoord, GridSize, TileValue};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(board: &Board) -> &'static str {
        board.banner
    }

    /// Side length of the board's grid.
    #[must_use]
    pub fn grid_size(board: &Board) -> GridSize {
        board.size
    }

    /// Returns the tile occupying the provided cell, if any.
    ///
    /// Out-of-bounds and empty cells are deliberately indistinguishable.
    #[must_use]
    pub fn tile_at(board: &Board, cell: CellCoord) -> Option<TileValue> {
        board.tile(cell)
    }

    /// Reports whether every cell holds a tile.
    #[must_use]
    pub fn is_full(board: &Board) -> bool {
        board.is_full()
    }

    /// Captures a read-only view of the dense tile grid.
    #[must_use]
    pub fn board_view(board: &Board) -> BoardView<'_> {
        BoardView::new(&board.cells, board.size.get())
    }

    /// Enumerates the cells that currently hold no tile, in row-major order.
    #[must_use]
    pub fn empty_cells(board: &Board) -> Vec<CellCoord> {
        let size = board.size.get();
        let mut cells = Vec::new();
        for row in 0..size {
            for column in 0..size {
                let cell = CellCoord::new(column, row);
                if board.tile(cell).is_none() {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// True while at least one move can still change the board.
    #[must_use]
    pub fn has_moves_left(board: &Board) -> bool {
        engine::has_moves_left(&board_view(board))
    }

    /// True once the board is full and no move can change any tile.
    #[must_use]
    pub fn is_game_over(board: &Board) -> bool {
        !has_moves_left(board)
    }
}
