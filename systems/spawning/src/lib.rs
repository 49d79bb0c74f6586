#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting tile spawn commands.
//!
//! The system reacts to [`Event::GameStarted`] by seeding the opening tiles
//! and to every changed [`Event::MoveResolved`] by refilling one tile. All
//! randomness flows through a seeded linear congruential generator, so equal
//! seeds replay equal games.

use fuse_grid_core::{CellCoord, Command, Event, TileValue};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;

/// Placement and value policy applied when tiles spawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpawnPolicy {
    /// Standard rules: two random tiles on game start, one random tile after
    /// every changed move. Nine of ten rolls spawn a 2, the tenth a 4.
    Classic,
    /// Scripted opening tiles. `refill` controls whether changed moves still
    /// spawn a classic random tile afterwards.
    FixedOpening {
        /// Tiles placed when a game starts.
        tiles: Vec<(CellCoord, TileValue)>,
        /// Whether changed moves refill the board.
        refill: bool,
    },
}

impl SpawnPolicy {
    /// Scripted diagonal opening: value 2 at (0,0) and (1,1), with no refill
    /// after moves.
    #[must_use]
    pub fn diagonal_opening() -> Self {
        Self::FixedOpening {
            tiles: vec![
                (CellCoord::new(0, 0), TileValue::TWO),
                (CellCoord::new(1, 1), TileValue::TWO),
            ],
            refill: false,
        }
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::Classic
    }
}

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    policy: SpawnPolicy,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided policy and seed.
    #[must_use]
    pub const fn new(policy: SpawnPolicy, rng_seed: u64) -> Self {
        Self { policy, rng_seed }
    }

    /// Creates a classic-rules configuration with the provided seed.
    #[must_use]
    pub const fn classic(rng_seed: u64) -> Self {
        Self::new(SpawnPolicy::Classic, rng_seed)
    }
}

/// Pure system that deterministically emits spawn commands.
#[derive(Debug)]
pub struct Spawning {
    policy: SpawnPolicy,
    rng_state: u64,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            policy: config.policy,
            rng_state: config.rng_seed,
        }
    }

    /// Consumes events and the current empty-cell view to emit spawn commands.
    ///
    /// `empty_cells` must reflect the board state after the provided events
    /// were applied.
    pub fn handle(&mut self, events: &[Event], empty_cells: &[CellCoord], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::GameStarted { .. } => self.emit_opening(empty_cells, out),
                Event::MoveResolved { changed: true, .. } => {
                    if self.refills_after_moves() {
                        let _ = self.emit_random_tile(empty_cells, &[], out);
                    }
                }
                _ => {}
            }
        }
    }

    fn refills_after_moves(&self) -> bool {
        match &self.policy {
            SpawnPolicy::Classic => true,
            SpawnPolicy::FixedOpening { refill, .. } => *refill,
        }
    }

    fn emit_opening(&mut self, empty_cells: &[CellCoord], out: &mut Vec<Command>) {
        match &self.policy {
            SpawnPolicy::Classic => {
                let first = self.emit_random_tile(empty_cells, &[], out);
                if let Some(first) = first {
                    let _ = self.emit_random_tile(empty_cells, &[first], out);
                }
            }
            SpawnPolicy::FixedOpening { tiles, .. } => {
                for (cell, value) in tiles.clone() {
                    out.push(Command::SpawnTile { cell, value });
                }
            }
        }
    }

    /// Picks a random cell outside `taken` and emits a spawn for it.
    fn emit_random_tile(
        &mut self,
        empty_cells: &[CellCoord],
        taken: &[CellCoord],
        out: &mut Vec<Command>,
    ) -> Option<CellCoord> {
        let candidates: Vec<CellCoord> = empty_cells
            .iter()
            .copied()
            .filter(|cell| !taken.contains(cell))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let roll = self.advance_rng();
        let cell = candidates[(roll % candidates.len() as u64) as usize];
        let value = self.next_value();
        out.push(Command::SpawnTile { cell, value });
        Some(cell)
    }

    fn next_value(&mut self) -> TileValue {
        if self.advance_rng() % 10 < 9 {
            TileValue::TWO
        } else {
            TileValue::FOUR
        }
    }

    fn advance_rng(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.rng_state
    }
}
