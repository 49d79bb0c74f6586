#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Fuse Grid experience.

use fuse_grid_board::{query, Board};
use fuse_grid_core::GridSize;

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'board>(&self, board: &'board Board) -> &'board str {
        query::welcome_banner(board)
    }

    /// Exposes the grid configuration required for rendering.
    #[must_use]
    pub fn grid_size(&self, board: &Board) -> GridSize {
        query::grid_size(board)
    }
}
