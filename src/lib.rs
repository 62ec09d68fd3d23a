pub mod board;
pub mod error;
pub mod tile;
pub mod walk;

pub use board::{Board, Move, Moves, Occupancy};
pub use error::BoardError;
pub use tile::{Direction, Movability, Tile, TileKind};
pub use walk::{RandomWalk, take_random_move};
