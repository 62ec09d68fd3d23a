use crate::board::{COLS, Occupancy, ROWS};
use crate::error::BoardError;
use arrayvec::ArrayVec;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// (row, column) offset of a one-cell step.
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub fn reverse(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    fn index(&self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::East => write!(f, "east"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
        }
    }
}

impl FromStr for Direction {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" => Ok(Direction::North),
            "east" => Ok(Direction::East),
            "south" => Ok(Direction::South),
            "west" => Ok(Direction::West),
            _ => Err(BoardError::InvalidDirection(s.to_string())),
        }
    }
}

/// Which one-cell steps a tile can currently make.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Movability {
    allowed: [bool; 4],
}

impl Movability {
    pub fn allows(&self, direction: Direction) -> bool {
        self.allowed[direction.index()]
    }

    /// Number of movable directions.
    pub fn count(&self) -> usize {
        self.allowed.iter().filter(|&&allowed| allowed).count()
    }

    /// Allowed directions in north, east, south, west order.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + use<> {
        let allowed = self.allowed;
        ALL_DIRECTIONS
            .into_iter()
            .filter(move |dir| allowed[dir.index()])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Normal,
    /// The 2x2 block that has to reach the exit
    Main,
}

/// A rectangular block on the 5x4 grid, anchored at its top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    id: u8,
    row: u8,
    col: u8,
    height: u8,
    width: u8,
    kind: TileKind,
}

impl Tile {
    /// Create a general tile. Fails if the position is off the grid, if
    /// either dimension is outside 1-2, or if the tile would overhang.
    pub fn new(id: u8, row: u8, col: u8, height: u8, width: u8) -> Result<Self, BoardError> {
        Self::validate(row, col, height, width)?;
        Ok(Tile {
            id,
            row,
            col,
            height,
            width,
            kind: TileKind::Normal,
        })
    }

    /// Create the 2x2 main tile.
    pub fn new_main(id: u8, row: u8, col: u8) -> Result<Self, BoardError> {
        let tile = Tile {
            kind: TileKind::Main,
            ..Tile::new(id, row, col, 2, 2)?
        };
        if tile.height != 2 || tile.width != 2 {
            return Err(BoardError::InvalidGeometry {
                row,
                col,
                height: tile.height,
                width: tile.width,
            });
        }
        Ok(tile)
    }

    fn validate(row: u8, col: u8, height: u8, width: u8) -> Result<(), BoardError> {
        let fits = row < ROWS
            && col < COLS
            && (1..=2).contains(&height)
            && (1..=2).contains(&width)
            && row + height <= ROWS
            && col + width <= COLS;
        if fits {
            Ok(())
        } else {
            Err(BoardError::InvalidGeometry {
                row,
                col,
                height,
                width,
            })
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn is_main(&self) -> bool {
        self.kind == TileKind::Main
    }

    /// Cells covered by the tile, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + use<> {
        let (row, col, height, width) = (self.row, self.col, self.height, self.width);
        (row..row + height).flat_map(move |r| (col..col + width).map(move |c| (r, c)))
    }

    pub fn covers(&self, row: u8, col: u8) -> bool {
        (self.row..self.row + self.height).contains(&row)
            && (self.col..self.col + self.width).contains(&col)
    }

    /// Top-left corner after a one-cell step, or None if the tile would
    /// leave the grid.
    pub fn shifted(&self, direction: Direction) -> Option<(u8, u8)> {
        let (dr, dc) = direction.delta();
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;

        if row >= 0
            && col >= 0
            && row + self.height as i16 <= ROWS as i16
            && col + self.width as i16 <= COLS as i16
        {
            Some((row as u8, col as u8))
        } else {
            None
        }
    }

    /// The strip of cells a one-cell step would newly cover, or None if the
    /// step leaves the grid.
    pub fn entered_cells(&self, direction: Direction) -> Option<ArrayVec<(u8, u8), 2>> {
        self.shifted(direction)?;

        let mut cells = ArrayVec::new();
        match direction {
            Direction::North => {
                for c in self.col..self.col + self.width {
                    cells.push((self.row - 1, c));
                }
            }
            Direction::South => {
                for c in self.col..self.col + self.width {
                    cells.push((self.row + self.height, c));
                }
            }
            Direction::West => {
                for r in self.row..self.row + self.height {
                    cells.push((r, self.col - 1));
                }
            }
            Direction::East => {
                for r in self.row..self.row + self.height {
                    cells.push((r, self.col + self.width));
                }
            }
        }
        Some(cells)
    }

    /// Check each direction against the grid edges and the occupancy map.
    /// A step is blocked if any newly entered cell is occupied.
    pub fn movability(&self, occupancy: &Occupancy) -> Movability {
        let mut movability = Movability::default();
        for dir in ALL_DIRECTIONS {
            movability.allowed[dir.index()] = self
                .entered_cells(dir)
                .is_some_and(|cells| cells.iter().all(|&(r, c)| occupancy.is_free(r, c)));
        }
        movability
    }

    pub(crate) fn set_position(&mut self, row: u8, col: u8) -> Result<(), BoardError> {
        Self::validate(row, col, self.height, self.width)?;
        self.row = row;
        self.col = col;
        Ok(())
    }
}
