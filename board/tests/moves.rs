use fuse_grid_board::{apply, query, Board};
use fuse_grid_core::{CellCoord, Command, Direction, Event, GridSize, TileValue};

fn board_with(values: &[u32]) -> Board {
    let size = (values.len() as f64).sqrt() as u32;
    let mut board = Board::new(GridSize::new(size).expect("test size is playable"));
    let mut events = Vec::new();
    for (index, &value) in values.iter().enumerate() {
        if let Some(value) = TileValue::new(value) {
            apply(
                &mut board,
                Command::SpawnTile {
                    cell: CellCoord::new(index as u32 % size, index as u32 / size),
                    value,
                },
                &mut events,
            );
        }
    }
    board
}

fn snapshot(board: &Board) -> Vec<Option<TileValue>> {
    query::board_view(board).iter().collect()
}

fn value_sum(board: &Board) -> u64 {
    query::board_view(board)
        .iter()
        .flatten()
        .map(|value| u64::from(value.get()))
        .sum()
}

fn make_move(board: &mut Board, direction: Direction) -> Vec<Event> {
    let mut events = Vec::new();
    apply(board, Command::Move { direction }, &mut events);
    events
}

fn move_resolved(events: &[Event]) -> (u32, bool) {
    for event in events {
        if let Event::MoveResolved {
            score_delta,
            changed,
            ..
        } = event
        {
            return (*score_delta, *changed);
        }
    }
    panic!("move did not resolve: {events:?}");
}

#[test]
fn left_move_merges_and_reports_delta() {
    let mut board = board_with(&[
        2, 2, 0, 0, //
        0, 0, 0, 0, //
        0, 0, 0, 0, //
        0, 0, 0, 0,
    ]);

    let events = make_move(&mut board, Direction::Left);
    let (score_delta, changed) = move_resolved(&events);

    assert!(changed);
    assert_eq!(score_delta, 4);
    assert_eq!(
        query::tile_at(&board, CellCoord::new(0, 0)),
        Some(TileValue::FOUR)
    );
    assert_eq!(query::tile_at(&board, CellCoord::new(1, 0)), None);
    assert!(events.contains(&Event::TilesMerged {
        first: CellCoord::new(0, 0),
        second: CellCoord::new(1, 0),
        into: CellCoord::new(0, 0),
        value: TileValue::FOUR,
    }));
}

#[test]
fn gapped_triple_merges_once_per_move() {
    let mut board = board_with(&[
        2, 0, 2, 2, //
        0, 0, 0, 0, //
        0, 0, 0, 0, //
        0, 0, 0, 0,
    ]);

    let events = make_move(&mut board, Direction::Left);
    let (score_delta, _) = move_resolved(&events);

    assert_eq!(score_delta, 4);
    assert_eq!(
        query::tile_at(&board, CellCoord::new(0, 0)),
        Some(TileValue::FOUR)
    );
    assert_eq!(
        query::tile_at(&board, CellCoord::new(1, 0)),
        Some(TileValue::TWO)
    );
    assert_eq!(query::tile_at(&board, CellCoord::new(2, 0)), None);
}

#[test]
fn unchanged_move_leaves_every_cell_identical() {
    let mut board = board_with(&[
        2, 4, 0, 0, //
        8, 16, 0, 0, //
        0, 0, 0, 0, //
        0, 0, 0, 0,
    ]);
    let before = snapshot(&board);

    let events = make_move(&mut board, Direction::Up);
    let (score_delta, changed) = move_resolved(&events);

    assert!(!changed);
    assert_eq!(score_delta, 0);
    assert_eq!(snapshot(&board), before);
    assert_eq!(
        events.len(),
        1,
        "a no-op move must emit nothing but its resolution"
    );
}

#[test]
fn value_sum_is_conserved_across_a_scripted_game() {
    let mut board = board_with(&[
        2, 2, 4, 0, //
        0, 8, 0, 8, //
        2, 0, 2, 0, //
        4, 4, 0, 2,
    ]);

    let script = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];
    for direction in script {
        let sum_before = value_sum(&board);
        let count_before = query::board_view(&board).tile_count();

        let events = make_move(&mut board, direction);
        let (_, changed) = move_resolved(&events);

        assert_eq!(value_sum(&board), sum_before, "{direction:?} changed the sum");
        let count_after = query::board_view(&board).tile_count();
        assert!(count_after <= count_before);
        if !changed {
            assert_eq!(count_after, count_before);
        }
    }
}

#[test]
fn game_over_matches_the_neighbor_rule() {
    // Full board with a single equal horizontal pair left in the corner.
    let board = board_with(&[
        2, 4, 2, 4, //
        4, 2, 4, 2, //
        2, 4, 2, 4, //
        4, 2, 4, 4,
    ]);
    assert!(query::is_full(&board));
    assert!(!query::is_game_over(&board));

    // Full checkerboard: equal tiles touch only diagonally, which never merges.
    let board = board_with(&[
        2, 4, 2, 4, //
        4, 2, 4, 2, //
        2, 4, 2, 4, //
        4, 2, 4, 2,
    ]);
    assert!(query::is_full(&board));
    assert!(query::is_game_over(&board));
}
