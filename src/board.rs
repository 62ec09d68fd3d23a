use crate::error::BoardError;
use crate::tile::{Direction, Tile};
use arrayvec::ArrayVec;
use log::{debug, trace};
use std::fmt;

pub const ROWS: u8 = 5;
pub const COLS: u8 = 4;
pub const TILE_COUNT: usize = 13;
pub const MAX_MOVES: usize = TILE_COUNT * 4;

/// Number of cells left uncovered by the layout, preserved by every move.
pub const FREE_CELLS: usize = 2;

const MAIN_START: (u8, u8) = (0, 1);

// (row, col, height, width) of every tile except the main one, in id order
const LAYOUT: [(u8, u8, u8, u8); TILE_COUNT - 1] = [
    (0, 0, 1, 1),
    (0, 3, 1, 1),
    (1, 0, 1, 1),
    (1, 3, 1, 1),
    (2, 0, 2, 1),
    (2, 1, 1, 1),
    (2, 2, 1, 1),
    (2, 3, 2, 1),
    (3, 1, 1, 1),
    (3, 2, 1, 1),
    (4, 0, 1, 1),
    (4, 3, 1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Move {
    pub tile: u8,
    pub direction: Direction,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tile, self.direction)
    }
}

pub type Moves = ArrayVec<Move, MAX_MOVES>;

/// Which tile, if any, covers each cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    cells: [[Option<u8>; COLS as usize]; ROWS as usize],
}

impl Occupancy {
    pub fn new() -> Self {
        Occupancy {
            cells: [[None; COLS as usize]; ROWS as usize],
        }
    }

    pub(crate) fn get(&self, row: u8, col: u8) -> Option<u8> {
        self.cells[row as usize][col as usize]
    }

    /// Owner of a cell: `None` off the grid, `Some(None)` for a free cell.
    pub fn owner(&self, row: u8, col: u8) -> Option<Option<u8>> {
        self.cells
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .copied()
    }

    /// Cells off the grid are never free.
    pub fn is_free(&self, row: u8, col: u8) -> bool {
        self.owner(row, col) == Some(None)
    }

    pub(crate) fn set(&mut self, row: u8, col: u8, owner: Option<u8>) {
        self.cells[row as usize][col as usize] = owner;
    }

    /// Free cells in row-major order.
    pub fn free_cells(&self) -> ArrayVec<(u8, u8), { (ROWS * COLS) as usize }> {
        let mut free = ArrayVec::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                if self.is_free(row, col) {
                    free.push((row, col));
                }
            }
        }
        free
    }

    pub fn free_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_none()).count()
    }
}

impl Default for Occupancy {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    occupancy: Occupancy,
    // Indexed by tile id
    tiles: ArrayVec<Tile, TILE_COUNT>,
}

impl Board {
    /// Build the standard starting position: the main block at the top
    /// centre, the two exit cells (4, 1) and (4, 2) free.
    pub fn new() -> Result<Self, BoardError> {
        let mut board = Board {
            occupancy: Occupancy::new(),
            tiles: ArrayVec::new(),
        };

        let id = board.next_id();
        board.place(Tile::new_main(id, MAIN_START.0, MAIN_START.1)?)?;
        for &(row, col, height, width) in LAYOUT.iter() {
            let id = board.next_id();
            board.place(Tile::new(id, row, col, height, width)?)?;
        }

        assert_eq!(
            board.occupancy.free_count(),
            FREE_CELLS,
            "Board has been incorrectly initialised; expected {} free cells:\n{}",
            FREE_CELLS,
            board
        );
        debug!("Initialised board with {} tiles", board.tiles.len());

        Ok(board)
    }

    fn next_id(&self) -> u8 {
        self.tiles.len() as u8
    }

    fn place(&mut self, tile: Tile) -> Result<(), BoardError> {
        assert!(
            self.tiles.len() < TILE_COUNT,
            "Cannot add tile: maximum of {} tiles exceeded",
            TILE_COUNT
        );
        self.check_valid_position(tile.row(), tile.col(), tile.height(), tile.width())?;

        for (r, c) in tile.cells() {
            self.occupancy.set(r, c, Some(tile.id()));
        }
        self.tiles.push(tile);
        Ok(())
    }

    /// Fails if a `height` x `width` footprint at (`row`, `col`) would
    /// overlap an occupied cell or hang off the grid. Sizes outside 1-2 are
    /// rejected as invalid geometry.
    pub fn check_valid_position(
        &self,
        row: u8,
        col: u8,
        height: u8,
        width: u8,
    ) -> Result<(), BoardError> {
        if !(1..=2).contains(&height) || !(1..=2).contains(&width) {
            return Err(BoardError::InvalidGeometry {
                row,
                col,
                height,
                width,
            });
        }
        self.check_footprint(row as i16, col as i16, height, width, None)
    }

    // Cells owned by `mover` do not count as conflicts.
    fn check_footprint(
        &self,
        row: i16,
        col: i16,
        height: u8,
        width: u8,
        mover: Option<u8>,
    ) -> Result<(), BoardError> {
        let conflict = BoardError::PlacementConflict {
            row,
            col,
            height,
            width,
        };

        if row < 0
            || col < 0
            || row + height as i16 > ROWS as i16
            || col + width as i16 > COLS as i16
        {
            return Err(conflict);
        }

        for r in row as u8..row as u8 + height {
            for c in col as u8..col as u8 + width {
                if let Some(owner) = self.occupancy.get(r, c) {
                    if Some(owner) != mover {
                        return Err(conflict);
                    }
                }
            }
        }
        Ok(())
    }

    /// All legal one-cell moves, by tile id and then north, east, south,
    /// west.
    pub fn find_valid_moves(&self) -> Result<Moves, BoardError> {
        let mut moves = Moves::new();
        for tile in &self.tiles {
            for direction in tile.movability(&self.occupancy).directions() {
                moves.push(Move {
                    tile: tile.id(),
                    direction,
                });
            }
        }

        if moves.is_empty() {
            return Err(BoardError::NoMovesAvailable);
        }

        debug!(
            "Found {} valid move(s): {}",
            moves.len(),
            moves
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(moves)
    }

    /// Slide a tile one cell. On error the board is left untouched.
    pub fn move_block(&mut self, tile_id: u8, direction: Direction) -> Result<(), BoardError> {
        let old = *self
            .tiles
            .get(tile_id as usize)
            .ok_or(BoardError::UnknownTile(tile_id))?;

        let (dr, dc) = direction.delta();
        let new_row = old.row() as i16 + dr as i16;
        let new_col = old.col() as i16 + dc as i16;

        if let Err(err) =
            self.check_footprint(new_row, new_col, old.height(), old.width(), Some(tile_id))
        {
            trace!("Rejected move {}:{}: {}", tile_id, direction, err);
            return Err(err);
        }

        let mut moved = old;
        moved.set_position(new_row as u8, new_col as u8)?;

        for (r, c) in old.cells() {
            self.occupancy.set(r, c, None);
        }
        for (r, c) in moved.cells() {
            self.occupancy.set(r, c, Some(tile_id));
        }
        self.tiles[tile_id as usize] = moved;

        debug!(
            "Moved tile {} {} to ({}, {})",
            tile_id,
            direction,
            moved.row(),
            moved.col()
        );
        Ok(())
    }

    /// Like `move_block`, with the direction given as text.
    pub fn move_block_named(&mut self, tile_id: u8, direction: &str) -> Result<(), BoardError> {
        if self.tile(tile_id).is_none() {
            return Err(BoardError::UnknownTile(tile_id));
        }
        let direction = direction.parse::<Direction>()?;
        self.move_block(tile_id, direction)
    }

    pub fn tile(&self, id: u8) -> Option<&Tile> {
        self.tiles.get(id as usize)
    }

    pub fn main_tile(&self) -> &Tile {
        &self.tiles[0]
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    pub fn free_cells(&self) -> ArrayVec<(u8, u8), { (ROWS * COLS) as usize }> {
        self.occupancy.free_cells()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            let mut line = String::new();
            for col in 0..COLS {
                let ch = match self.occupancy.get(row, col) {
                    None => '.',
                    Some(id) if self.tiles[id as usize].is_main() => 'M',
                    Some(id) => (b'a' + id - 1) as char,
                };
                line.push(ch);
            }
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
