#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Fuse Grid games in the terminal.
//!
//! The binary wires the board and its systems into a [`session::Session`],
//! drives it with a scripted or randomly generated move sequence, and renders
//! each turn as an ASCII frame.

mod session;
mod snapshot_transfer;
mod store;
mod text;

use std::{io, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use clap::Parser;
use fuse_grid_core::Direction;
use fuse_grid_rendering::{Frame, FramePresenter, GridMetrics};
use fuse_grid_system_bootstrap::Bootstrap;
use fuse_grid_system_scoring::HighScoreStore;
use fuse_grid_system_spawning::{Config, Spawning};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use fuse_grid_board::query;
use session::Session;
use snapshot_transfer::GameSnapshot;
use store::{FileHighScoreStore, MemoryHighScoreStore};

/// Command-line options for a Fuse Grid session.
#[derive(Debug, Parser)]
#[command(name = "fuse-grid", about = "Plays sliding tile merge games")]
struct Args {
    /// Side length of the square grid.
    #[arg(long, default_value_t = 4)]
    grid_size: u32,

    /// Seed for tile spawning; a random seed is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Scripted moves as a string of U, D, L and R characters.
    #[arg(long)]
    moves: Option<MoveScript>,

    /// Number of random moves to play after any scripted moves.
    #[arg(long, default_value_t = 0)]
    random_moves: u32,

    /// Opens every game with the fixed two-tile diagonal layout instead of
    /// random spawns.
    #[arg(long)]
    diagonal_opening: bool,

    /// File used to persist the best score across runs.
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Encoded snapshot to resume from instead of starting a new game.
    #[arg(long)]
    import_snapshot: Option<String>,

    /// Prints an encoded snapshot of the final position.
    #[arg(long)]
    export_snapshot: bool,
}

/// Sequence of directions parsed from a compact move string.
#[derive(Clone, Debug)]
struct MoveScript(Vec<Direction>);

impl FromStr for MoveScript {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .chars()
            .filter(|character| !character.is_whitespace())
            .map(|character| match character.to_ascii_uppercase() {
                'U' => Ok(Direction::Up),
                'D' => Ok(Direction::Down),
                'L' => Ok(Direction::Left),
                'R' => Ok(Direction::Right),
                other => Err(format!("unknown move '{other}', expected U, D, L or R")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// Entry point for the Fuse Grid command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    match args.high_score_file.clone() {
        Some(path) => run(args, FileHighScoreStore::new(path)),
        None => run(args, MemoryHighScoreStore::default()),
    }
}

fn run<S: HighScoreStore>(args: Args, store: S) -> Result<()> {
    let size = fuse_grid_core::GridSize::new(args.grid_size)
        .context("the requested grid size cannot host a game")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = if args.diagonal_opening {
        Config::new(fuse_grid_system_spawning::SpawnPolicy::diagonal_opening(), seed)
    } else {
        Config::classic(seed)
    };

    let mut session = Session::new(size, Spawning::new(config), store)?;

    println!("{}", Bootstrap::default().welcome_banner(session.board()));

    if let Some(encoded) = args.import_snapshot.as_deref() {
        let snapshot = GameSnapshot::decode(encoded).context("importing the snapshot")?;
        let _ = session.restore(&snapshot)?;
    } else {
        let _ = session.start()?;
    }

    let metrics = GridMetrics::new(Vec2::ZERO, 1.0);
    let mut presenter = text::TextPresenter::new(io::stdout().lock());
    present_board(&session, &[], &metrics, &mut presenter)?;

    let mut moves = args.moves.map(|script| script.0).unwrap_or_default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    moves.extend(
        (0..args.random_moves).map(|_| Direction::ALL[rng.gen_range(0..Direction::ALL.len())]),
    );

    for direction in moves {
        if session.is_game_over() {
            break;
        }
        let report = session.play(direction)?;
        println!(
            "move {direction:?}: {} (+{})",
            if report.changed { "shifted" } else { "blocked" },
            report.score_delta
        );
        present_board(&session, &report.events, &metrics, &mut presenter)?;
        if report.game_over {
            println!("no moves left");
            break;
        }
    }

    println!("score {} best {}", session.score().get(), session.best().get());

    if args.export_snapshot {
        println!("{}", session.snapshot().encode());
    }

    Ok(())
}

fn present_board<S: HighScoreStore>(
    session: &Session<S>,
    events: &[fuse_grid_core::Event],
    metrics: &GridMetrics,
    presenter: &mut impl FramePresenter,
) -> Result<()> {
    let view = query::board_view(session.board());
    let frame = Frame::compose(&view, events, metrics);
    presenter.present(&frame).context("presenting the board")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_scripts_parse_all_directions() {
        let script = MoveScript::from_str("uDl R").expect("script parses");
        assert_eq!(
            script.0,
            vec![
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right
            ]
        );
    }

    #[test]
    fn move_scripts_reject_unknown_characters() {
        let error = MoveScript::from_str("UX").expect_err("X is not a move");
        assert!(error.contains('X'));
    }

    #[test]
    fn arguments_parse_with_defaults() {
        let args = Args::parse_from(["fuse-grid"]);
        assert_eq!(args.grid_size, 4);
        assert_eq!(args.random_moves, 0);
        assert!(args.seed.is_none());
        assert!(!args.export_snapshot);
    }
}
