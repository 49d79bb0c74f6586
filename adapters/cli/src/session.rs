use anyhow::{bail, Context, Result};
use fuse_grid_board::{self as board, query, Board};
use fuse_grid_core::{CellCoord, Command, Direction, Event, GridSize, Score, TileValue};
use fuse_grid_system_scoring::{HighScoreStore, Scoring};
use fuse_grid_system_spawning::Spawning;

use crate::snapshot_transfer::GameSnapshot;

/// Owns one game: the board, its systems, and the injected high score store.
pub(crate) struct Session<S: HighScoreStore> {
    board: Board,
    spawning: Spawning,
    scoring: Scoring,
    store: S,
}

/// Outcome of a single played move, for the driver to report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TurnReport {
    pub(crate) changed: bool,
    pub(crate) score_delta: u32,
    pub(crate) game_over: bool,
    pub(crate) events: Vec<Event>,
}

impl<S: HighScoreStore> Session<S> {
    pub(crate) fn new(size: GridSize, spawning: Spawning, mut store: S) -> Result<Self> {
        let scoring =
            Scoring::with_stored_best(&mut store).context("loading the stored high score")?;
        Ok(Self {
            board: Board::new(size),
            spawning,
            scoring,
            store,
        })
    }

    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn score(&self) -> Score {
        self.scoring.total()
    }

    pub(crate) fn best(&self) -> Score {
        self.scoring.best()
    }

    pub(crate) fn is_game_over(&self) -> bool {
        self.scoring.is_game_over() || query::is_game_over(&self.board)
    }

    /// Starts a fresh game; the spawning system seeds the opening tiles.
    pub(crate) fn start(&mut self) -> Result<Vec<Event>> {
        self.pump(vec![Command::StartGame])
    }

    /// Restores a captured game instead of starting fresh.
    pub(crate) fn restore(&mut self, snapshot: &GameSnapshot) -> Result<Vec<Event>> {
        let size = GridSize::new(snapshot.size).context("snapshot grid size")?;
        let mut commands = vec![Command::ConfigureGrid { size }];
        for (index, value) in snapshot.cells.iter().enumerate() {
            if let Some(value) = *value {
                commands.push(Command::SpawnTile {
                    cell: CellCoord::new(index as u32 % size.get(), index as u32 / size.get()),
                    value,
                });
            }
        }
        let events = self.pump(commands)?;
        self.scoring.resume_total(snapshot.score);
        Ok(events)
    }

    /// Plays one directional move through the command pump.
    pub(crate) fn play(&mut self, direction: Direction) -> Result<TurnReport> {
        let events = self.pump(vec![Command::Move { direction }])?;
        let Some((score_delta, changed)) = events.iter().find_map(|event| match event {
            Event::MoveResolved {
                score_delta,
                changed,
                ..
            } => Some((*score_delta, *changed)),
            _ => None,
        }) else {
            bail!("the board did not resolve the move");
        };

        Ok(TurnReport {
            changed,
            score_delta,
            game_over: self.is_game_over(),
            events,
        })
    }

    /// Captures the current game for snapshot transfer.
    pub(crate) fn snapshot(&self) -> GameSnapshot {
        let view = query::board_view(&self.board);
        let cells: Vec<Option<TileValue>> = view.iter().collect();
        GameSnapshot {
            size: view.size(),
            cells,
            score: self.scoring.total(),
        }
    }

    /// Applies commands, feeds the resulting events to every system, and
    /// repeats with the commands they emit until the queue drains.
    fn pump(&mut self, mut commands: Vec<Command>) -> Result<Vec<Event>> {
        let mut all_events = Vec::new();
        while !commands.is_empty() {
            let mut events = Vec::new();
            for command in commands.drain(..) {
                board::apply(&mut self.board, command, &mut events);
            }
            self.spawning
                .handle(&events, &query::empty_cells(&self.board), &mut commands);
            self.scoring
                .handle(&events, &mut self.store)
                .context("persisting the high score")?;
            all_events.extend(events);
        }
        Ok(all_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryHighScoreStore;
    use fuse_grid_system_spawning::Config;

    fn session() -> Session<MemoryHighScoreStore> {
        let size = GridSize::new(4).expect("four is playable");
        let spawning = Spawning::new(Config::classic(0x5eed));
        Session::new(size, spawning, MemoryHighScoreStore::default())
            .expect("memory store always loads")
    }

    #[test]
    fn starting_seeds_two_tiles() {
        let mut session = session();
        let _ = session.start().expect("start succeeds");
        assert_eq!(query::board_view(session.board()).tile_count(), 2);
        assert_eq!(session.score(), Score::ZERO);
        assert!(!session.is_game_over());
    }

    #[test]
    fn snapshots_round_trip_through_restore() {
        let mut session = session();
        let _ = session.start().expect("start succeeds");
        for direction in [Direction::Left, Direction::Up, Direction::Right] {
            let _ = session.play(direction).expect("move resolves");
        }
        let snapshot = session.snapshot();

        let mut restored = self::session();
        let _ = restored.restore(&snapshot).expect("restore succeeds");

        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.score(), session.score());
    }

    #[test]
    fn unchanged_moves_spawn_nothing() {
        let mut session = session();
        let _ = session.start().expect("start succeeds");

        // Exhaust directions until one reports no change, then verify the
        // board held steady.
        for direction in Direction::ALL {
            let before: Vec<Option<TileValue>> =
                query::board_view(session.board()).iter().collect();
            let report = session.play(direction).expect("move resolves");
            if !report.changed {
                let after: Vec<Option<TileValue>> =
                    query::board_view(session.board()).iter().collect();
                assert_eq!(before, after);
                assert_eq!(report.score_delta, 0);
                return;
            }
        }
        // All four directions changing a sparse board is plausible; nothing
        // to assert in that case.
    }
}
