use crate::board::{Board, FREE_CELLS, Move};
use crate::error::BoardError;
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Pick one legal move uniformly at random and apply it.
pub fn take_random_move<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
) -> Result<Move, BoardError> {
    let before = board.occupancy().clone();
    let moves = board.find_valid_moves()?;
    // find_valid_moves never returns an empty list
    let chosen = *moves
        .as_slice()
        .choose(rng)
        .ok_or(BoardError::NoMovesAvailable)?;
    board.move_block(chosen.tile, chosen.direction)?;

    assert_ne!(
        board.occupancy(),
        &before,
        "Occupancy was not updated by move {}:\n{}",
        chosen,
        board
    );
    assert_eq!(
        board.occupancy().free_count(),
        FREE_CELLS,
        "Expected {} free cells after move {}:\n{}",
        FREE_CELLS,
        chosen,
        board
    );

    Ok(chosen)
}

/// A reproducible sequence of random moves.
pub struct RandomWalk {
    rng: ChaCha8Rng,
    steps_taken: usize,
}

impl RandomWalk {
    pub fn new(seed: u64) -> Self {
        RandomWalk {
            rng: ChaCha8Rng::seed_from_u64(seed),
            steps_taken: 0,
        }
    }

    pub fn step(&mut self, board: &mut Board) -> Result<Move, BoardError> {
        let chosen = take_random_move(board, &mut self.rng)?;
        self.steps_taken += 1;
        Ok(chosen)
    }

    /// Take `steps` moves, returning them in the order applied.
    pub fn run(&mut self, board: &mut Board, steps: usize) -> Result<Vec<Move>, BoardError> {
        let mut history = Vec::with_capacity(steps);
        for _ in 0..steps {
            history.push(self.step(board)?);
        }
        Ok(history)
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }
}
