use std::fmt;

/// Error type for tile construction and board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Tile position or size does not fit the 5x4 grid
    InvalidGeometry {
        row: u8,
        col: u8,
        height: u8,
        width: u8,
    },
    /// Footprint overlaps an occupied cell or leaves the grid
    PlacementConflict {
        row: i16,
        col: i16,
        height: u8,
        width: u8,
    },
    /// No tile with this id exists on the board
    UnknownTile(u8),
    /// Direction text is not one of north/east/south/west
    InvalidDirection(String),
    /// The board has no legal moves left
    NoMovesAvailable,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidGeometry {
                row,
                col,
                height,
                width,
            } => write!(
                f,
                "Invalid tile geometry: row={}, col={}, height={}, width={} (rows 0-4, columns 0-3, sizes 1-2)",
                row, col, height, width
            ),
            BoardError::PlacementConflict {
                row,
                col,
                height,
                width,
            } => write!(
                f,
                "Cannot place a {}x{} tile at ({}, {}): position is occupied or off the board",
                height, width, row, col
            ),
            BoardError::UnknownTile(id) => write!(f, "Tile {} does not exist", id),
            BoardError::InvalidDirection(text) => write!(
                f,
                "Direction must be north, east, south or west; got {:?}",
                text
            ),
            BoardError::NoMovesAvailable => write!(f, "No valid moves available"),
        }
    }
}

impl std::error::Error for BoardError {}
