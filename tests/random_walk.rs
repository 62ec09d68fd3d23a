use klotski::board::{COLS, FREE_CELLS, ROWS};
use klotski::{Board, BoardError, Direction, RandomWalk};

fn assert_no_overlaps(board: &Board) {
    let mut owners = [[None; COLS as usize]; ROWS as usize];
    for tile in board.tiles() {
        for (r, c) in tile.cells() {
            assert_eq!(
                owners[r as usize][c as usize],
                None,
                "tile {} overlaps another tile at ({}, {})",
                tile.id(),
                r,
                c
            );
            owners[r as usize][c as usize] = Some(tile.id());
            assert_eq!(board.occupancy().owner(r, c), Some(Some(tile.id())));
        }
    }
}

#[test]
fn walks_preserve_invariants() {
    for seed in 0..20 {
        let mut board = Board::new().unwrap();
        let mut walk = RandomWalk::new(seed);
        for _ in 0..200 {
            walk.step(&mut board).unwrap();
            assert_eq!(board.occupancy().free_count(), FREE_CELLS);
            assert_eq!(board.free_cells().len(), FREE_CELLS);
            assert_no_overlaps(&board);
            assert!(board.find_valid_moves().is_ok());
        }
    }
}

#[test]
fn every_listed_move_applies_and_reverses() {
    let mut board = Board::new().unwrap();
    RandomWalk::new(11).run(&mut board, 60).unwrap();

    for m in board.find_valid_moves().unwrap() {
        let mut copy = board.clone();
        copy.move_block(m.tile, m.direction).unwrap();
        assert_ne!(copy.occupancy(), board.occupancy());

        // Nothing else moved, so the reverse step must be legal
        copy.move_block(m.tile, m.direction.reverse()).unwrap();
        assert_eq!(copy, board);
    }
}

#[test]
fn edge_tiles_never_leave_the_grid() {
    for seed in 0..10 {
        let mut board = Board::new().unwrap();
        let history = RandomWalk::new(seed).run(&mut board, 100).unwrap();
        assert_eq!(history.len(), 100);

        for tile in board.tiles() {
            let movability = tile.movability(board.occupancy());
            if tile.row() == 0 {
                assert!(!movability.allows(Direction::North));
            }
            if tile.col() + tile.width() == COLS {
                assert!(!movability.allows(Direction::East));
            }
            if tile.row() + tile.height() == ROWS {
                assert!(!movability.allows(Direction::South));
            }
            if tile.col() == 0 {
                assert!(!movability.allows(Direction::West));
            }
        }
    }
}

#[test]
fn rejected_moves_do_not_mutate() {
    let mut board = Board::new().unwrap();
    RandomWalk::new(5).run(&mut board, 40).unwrap();
    let snapshot = board.clone();

    assert!(matches!(
        board.move_block(200, Direction::North),
        Err(BoardError::UnknownTile(200))
    ));
    assert!(matches!(
        board.move_block_named(0, "diagonal"),
        Err(BoardError::InvalidDirection(_))
    ));
    assert_eq!(board, snapshot);
}

#[test]
fn main_tile_is_always_two_by_two() {
    let mut board = Board::new().unwrap();
    RandomWalk::new(99).run(&mut board, 300).unwrap();

    let main = board.main_tile();
    assert!(main.is_main());
    assert_eq!((main.height(), main.width()), (2, 2));
    assert_eq!(board.tiles().iter().filter(|t| t.is_main()).count(), 1);
}
