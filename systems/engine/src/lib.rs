#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure move resolution for the Fuse Grid board.
//!
//! The board decomposes every move into independent lines: rows for
//! horizontal moves, columns for vertical moves, each ordered so offset 0 is
//! the destination edge. This crate compacts and merges those lines, reports
//! the score produced by merges, and decides whether any move remains.

use fuse_grid_core::{BoardView, CellCoord, Direction, TileValue};

/// Complete outcome of resolving a move against a board snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveResolution {
    /// Direction the resolution was computed for.
    pub direction: Direction,
    /// Resolved grid contents in row-major order.
    pub cells: Vec<Option<TileValue>>,
    /// Tiles that slid to a new cell without merging.
    pub shifts: Vec<TileShift>,
    /// Pairs of tiles that fused into a doubled tile.
    pub merges: Vec<TileMerge>,
    /// Sum of every merged value produced by the move.
    pub score_delta: u32,
    /// Whether any tile's position or value changed.
    pub changed: bool,
}

/// A tile that slid between two cells without merging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileShift {
    /// Cell the tile occupied before the move.
    pub from: CellCoord,
    /// Cell the tile occupies after the move.
    pub to: CellCoord,
    /// Value carried by the tile.
    pub value: TileValue,
}

/// Two equal tiles fused into one doubled tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileMerge {
    /// Cell of the tile closer to the destination edge before the move.
    pub first: CellCoord,
    /// Cell of the tile that slid into the merge.
    pub second: CellCoord,
    /// Cell holding the merged tile after the move.
    pub into: CellCoord,
    /// Doubled value created by the merge.
    pub value: TileValue,
}

/// Resolves a move without mutating the provided snapshot.
///
/// Lines with zero or one tiles pass through untouched, and a resolution with
/// `changed == false` reproduces the input grid exactly.
#[must_use]
pub fn resolve_move(view: &BoardView<'_>, direction: Direction) -> MoveResolution {
    let size = view.size();
    let mut resolution = MoveResolution {
        direction,
        cells: vec![None; (size as usize) * (size as usize)],
        shifts: Vec::new(),
        merges: Vec::new(),
        score_delta: 0,
        changed: false,
    };

    for line_index in 0..size {
        let line: Vec<Option<TileValue>> = (0..size)
            .map(|offset| view.tile(line_cell(size, direction, line_index, offset)))
            .collect();
        let resolved = resolve_line(&line);
        resolution.score_delta += resolved.score_delta;

        for (destination, tile) in resolved.tiles.iter().enumerate() {
            let into = line_cell(size, direction, line_index, destination as u32);
            write_cell(&mut resolution.cells, size, into, tile.value);

            match tile.merged_source {
                Some(second_offset) => {
                    resolution.changed = true;
                    resolution.merges.push(TileMerge {
                        first: line_cell(size, direction, line_index, tile.source as u32),
                        second: line_cell(size, direction, line_index, second_offset as u32),
                        into,
                        value: tile.value,
                    });
                }
                None => {
                    if tile.source != destination {
                        resolution.changed = true;
                        resolution.shifts.push(TileShift {
                            from: line_cell(size, direction, line_index, tile.source as u32),
                            to: into,
                            value: tile.value,
                        });
                    }
                }
            }
        }
    }

    resolution
}

/// True while the board still admits a move that changes something.
///
/// Any empty cell suffices; on a full board, only an equal right or down
/// neighbor does. Checking two of four neighbors per cell covers every
/// adjacent pair exactly once.
#[must_use]
pub fn has_moves_left(view: &BoardView<'_>) -> bool {
    if !view.is_full() {
        return true;
    }

    let size = view.size();
    for row in 0..size {
        for column in 0..size {
            let Some(value) = view.tile(CellCoord::new(column, row)) else {
                return true;
            };
            if view.tile(CellCoord::new(column + 1, row)) == Some(value)
                || view.tile(CellCoord::new(column, row + 1)) == Some(value)
            {
                return true;
            }
        }
    }

    false
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct ResolvedLine {
    tiles: Vec<PlacedTile>,
    score_delta: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PlacedTile {
    value: TileValue,
    source: usize,
    merged_source: Option<usize>,
}

/// Compacts a single line toward offset 0, merging equal adjacent pairs.
///
/// A tile created by a merge is sealed: it never merges again within the same
/// resolution, so `[2, _, 2, 2]` compacts to `[4, 2]` rather than `[4, 4]`.
fn resolve_line(line: &[Option<TileValue>]) -> ResolvedLine {
    let mut resolved = ResolvedLine::default();

    for (offset, value) in line
        .iter()
        .enumerate()
        .filter_map(|(offset, slot)| slot.map(|value| (offset, value)))
    {
        match resolved.tiles.last_mut() {
            Some(last) if last.merged_source.is_none() && last.value == value => {
                last.value = value.doubled();
                last.merged_source = Some(offset);
                resolved.score_delta += last.value.get();
            }
            _ => resolved.tiles.push(PlacedTile {
                value,
                source: offset,
                merged_source: None,
            }),
        }
    }

    resolved
}

fn line_cell(size: u32, direction: Direction, line_index: u32, offset: u32) -> CellCoord {
    match direction {
        Direction::Up => CellCoord::new(line_index, offset),
        Direction::Down => CellCoord::new(line_index, size - 1 - offset),
        Direction::Left => CellCoord::new(offset, line_index),
        Direction::Right => CellCoord::new(size - 1 - offset, line_index),
    }
}

fn write_cell(cells: &mut [Option<TileValue>], size: u32, cell: CellCoord, value: TileValue) {
    let index = (cell.row() as usize) * (size as usize) + cell.column() as usize;
    if let Some(slot) = cells.get_mut(index) {
        *slot = Some(value);
    }
}
