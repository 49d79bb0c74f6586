#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Fuse Grid adapters.
//!
//! The board broadcasts events; this crate translates a board snapshot plus
//! the events of the latest turn into a presentation [`Frame`]. Renderers own
//! no game-state authority: they subscribe, draw, and nothing more.

use anyhow::Result as AnyResult;
use fuse_grid_core::{BoardView, CellCoord, Event, TileValue};
use glam::Vec2;

/// Scale hint applied to a tile created by a merge on the latest turn, so
/// renderers can play a brief grow-and-settle pulse.
pub const MERGE_PULSE_SCALE: f32 = 1.2;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Board background drawn behind empty cells.
pub const BOARD_BACKGROUND: Color = Color::from_rgb_u8(0xbb, 0xad, 0xa0);

const VALUE_COLORS: [Color; 11] = [
    Color::from_rgb_u8(0xee, 0xe4, 0xda), // 2
    Color::from_rgb_u8(0xed, 0xe0, 0xc8), // 4
    Color::from_rgb_u8(0xf2, 0xb1, 0x79), // 8
    Color::from_rgb_u8(0xf5, 0x95, 0x63), // 16
    Color::from_rgb_u8(0xf6, 0x7c, 0x5f), // 32
    Color::from_rgb_u8(0xf6, 0x5e, 0x3b), // 64
    Color::from_rgb_u8(0xed, 0xcf, 0x72), // 128
    Color::from_rgb_u8(0xed, 0xcc, 0x61), // 256
    Color::from_rgb_u8(0xed, 0xc8, 0x50), // 512
    Color::from_rgb_u8(0xed, 0xc5, 0x3f), // 1024
    Color::from_rgb_u8(0xed, 0xc2, 0x2e), // 2048
];

const VALUE_COLOR_OVERFLOW: Color = Color::from_rgb_u8(0x3c, 0x3a, 0x32);

/// Fill color assigned to a tile value, saturating past 2048.
#[must_use]
pub fn value_color(value: TileValue) -> Color {
    let exponent = value.get().trailing_zeros() as usize;
    VALUE_COLORS
        .get(exponent.saturating_sub(1))
        .copied()
        .unwrap_or(VALUE_COLOR_OVERFLOW)
}

/// Maps grid cells onto screen-space positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMetrics {
    origin: Vec2,
    tile_length: f32,
}

impl GridMetrics {
    /// Creates metrics anchored at the provided screen-space origin.
    #[must_use]
    pub const fn new(origin: Vec2, tile_length: f32) -> Self {
        Self {
            origin,
            tile_length,
        }
    }

    /// Side length of a single square tile measured in screen units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Screen-space center of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.origin
            + Vec2::new(
                (cell.column() as f32 + 0.5) * self.tile_length,
                (cell.row() as f32 + 0.5) * self.tile_length,
            )
    }

    /// Total screen-space extent of a grid with the provided side length.
    #[must_use]
    pub fn board_extent(&self, size: u32) -> Vec2 {
        Vec2::splat(size as f32 * self.tile_length)
    }
}

/// A single tile prepared for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSprite {
    /// Cell the tile occupies.
    pub cell: CellCoord,
    /// Value carried by the tile.
    pub value: TileValue,
    /// Screen-space center of the tile.
    pub position: Vec2,
    /// Fill color for the tile body.
    pub color: Color,
    /// Scale hint; merged tiles pulse above 1.0 for one frame.
    pub scale: f32,
}

/// Complete drawable description of one turn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Side length of the presented grid.
    pub grid_size: u32,
    /// Tiles to draw, in row-major cell order.
    pub tiles: Vec<TileSprite>,
}

impl Frame {
    /// Composes a frame from the current board snapshot and the events of the
    /// turn that produced it.
    #[must_use]
    pub fn compose(view: &BoardView<'_>, events: &[Event], metrics: &GridMetrics) -> Self {
        let size = view.size();
        let mut tiles = Vec::new();

        for row in 0..size {
            for column in 0..size {
                let cell = CellCoord::new(column, row);
                let Some(value) = view.tile(cell) else {
                    continue;
                };
                let merged_this_turn = events.iter().any(|event| {
                    matches!(event, Event::TilesMerged { into, .. } if *into == cell)
                });
                tiles.push(TileSprite {
                    cell,
                    value,
                    position: metrics.cell_center(cell),
                    color: value_color(value),
                    scale: if merged_this_turn {
                        MERGE_PULSE_SCALE
                    } else {
                        1.0
                    },
                });
            }
        }

        Self {
            grid_size: size,
            tiles,
        }
    }
}

/// Sink that draws composed frames.
pub trait FramePresenter {
    /// Presents the provided frame to the player.
    fn present(&mut self, frame: &Frame) -> AnyResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_follows_the_value_ladder() {
        assert_eq!(
            value_color(TileValue::TWO),
            Color::from_rgb_u8(0xee, 0xe4, 0xda)
        );
        assert_eq!(
            value_color(TileValue::FOUR),
            Color::from_rgb_u8(0xed, 0xe0, 0xc8)
        );
        let big = TileValue::new(4096).expect("power of two");
        assert_eq!(value_color(big), VALUE_COLOR_OVERFLOW);
    }

    #[test]
    fn cell_centers_step_by_tile_length() {
        let metrics = GridMetrics::new(Vec2::ZERO, 100.0);
        assert_eq!(metrics.cell_center(CellCoord::new(0, 0)), Vec2::new(50.0, 50.0));
        assert_eq!(
            metrics.cell_center(CellCoord::new(2, 1)),
            Vec2::new(250.0, 150.0)
        );
        assert_eq!(metrics.board_extent(4), Vec2::splat(400.0));
    }

    #[test]
    fn merged_tiles_pulse_for_one_frame() {
        let cells = vec![Some(TileValue::FOUR), None, None, Some(TileValue::TWO)];
        let view = BoardView::new(&cells, 2);
        let metrics = GridMetrics::new(Vec2::ZERO, 10.0);
        let merge_events = [Event::TilesMerged {
            first: CellCoord::new(0, 0),
            second: CellCoord::new(1, 0),
            into: CellCoord::new(0, 0),
            value: TileValue::FOUR,
        }];

        let frame = Frame::compose(&view, &merge_events, &metrics);
        assert_eq!(frame.tiles.len(), 2);
        assert_eq!(frame.tiles[0].scale, MERGE_PULSE_SCALE);
        assert_eq!(frame.tiles[1].scale, 1.0);

        let settled = Frame::compose(&view, &[], &metrics);
        assert_eq!(settled.tiles[0].scale, 1.0);
    }
}
