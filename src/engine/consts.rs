use crate::utils::prelude::*;

/// Cells per side; the board is always `BOARD_SIZE * BOARD_SIZE` squares.
pub const BOARD_SIZE: usize = 8;

/// Total number of addressable cells.
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Which side a piece or engine instance belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    /// The opposing colour.
    pub fn opponent(&self) -> Colour {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }

    pub fn notate(&self) -> &'static str {
        match self {
            Colour::White => "WHITE",
            Colour::Black => "BLACK",
        }
    }

    pub fn parse(s: &str) -> Option<Colour> {
        match s {
            "WHITE" => Some(Colour::White),
            "BLACK" => Some(Colour::Black),
            _ => None,
        }
    }
}

/// A single board cell: either empty or one piece of one colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    Empty,
    King(Colour),
    Queen(Colour),
    Bishop(Colour),
    Knight(Colour),
    Rook(Colour),
    Pawn(Colour),
}

impl Piece {
    /// The colour of this piece, or `None` if the cell is empty.
    pub fn colour(&self) -> Option<Colour> {
        match self {
            Piece::Empty => None,
            Piece::King(c)
            | Piece::Queen(c)
            | Piece::Bishop(c)
            | Piece::Knight(c)
            | Piece::Rook(c)
            | Piece::Pawn(c) => Some(*c),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Piece::Empty)
    }

    pub fn is_colour(&self, colour: Colour) -> bool {
        self.colour() == Some(colour)
    }

    pub fn is_king(&self) -> bool {
        matches!(self, Piece::King(_))
    }

    pub fn is_pawn(&self) -> bool {
        matches!(self, Piece::Pawn(_))
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::Empty
    }
}

/// One of the four cardinal wall-facing directions of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// The row/column delta one step in this direction.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// One of the four diagonal step directions, used only for the corner-seal
/// wall check (straight sliders use [`Direction`] instead).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagonalDirection {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl DiagonalDirection {
    pub fn delta(&self) -> (isize, isize) {
        match self {
            DiagonalDirection::UpLeft => (-1, -1),
            DiagonalDirection::UpRight => (-1, 1),
            DiagonalDirection::DownLeft => (1, -1),
            DiagonalDirection::DownRight => (1, 1),
        }
    }

    /// Classifies a (signed) row/col delta of magnitude 1 in each axis.
    pub fn from_delta(dr: isize, dc: isize) -> Option<DiagonalDirection> {
        match (dr, dc) {
            (-1, -1) => Some(DiagonalDirection::UpLeft),
            (-1, 1) => Some(DiagonalDirection::UpRight),
            (1, -1) => Some(DiagonalDirection::DownLeft),
            (1, 1) => Some(DiagonalDirection::DownRight),
            _ => None,
        }
    }

    /// The two cardinal directions this diagonal is made of, e.g. `UpLeft`
    /// is `(Up, Left)`. Used by the corner-seal wall check.
    pub fn components(&self) -> (Direction, Direction) {
        match self {
            DiagonalDirection::UpLeft => (Direction::Up, Direction::Left),
            DiagonalDirection::UpRight => (Direction::Up, Direction::Right),
            DiagonalDirection::DownLeft => (Direction::Down, Direction::Left),
            DiagonalDirection::DownRight => (Direction::Down, Direction::Right),
        }
    }
}

/// Outcome of a local `move_piece` attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveResult {
    Invalid,
    Success,
    Capture,
    Promotion,
    PromotionCapture,
    EnPassantOpportunity,
}

impl MoveResult {
    /// Every non-invalid outcome mutated the board.
    pub fn is_success(&self) -> bool {
        !matches!(self, MoveResult::Invalid)
    }
}

/// Outcome of a local `build_wall` attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallResult {
    Success,
    Invalid,
    WallExists,
    /// Reserved for a wall-supply limit; this variant is unreachable while
    /// pawns have unlimited walls, but kept so callers can match on it.
    NoWallsLeft,
}

/// The piece kind a pending promotion resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PromotionKind {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionKind {
    pub fn notate(&self) -> char {
        match self {
            PromotionKind::Queen => 'Q',
            PromotionKind::Rook => 'R',
            PromotionKind::Bishop => 'B',
            PromotionKind::Knight => 'K',
        }
    }

    pub fn parse(c: char) -> Option<PromotionKind> {
        match c {
            'Q' | 'q' => Some(PromotionKind::Queen),
            'R' | 'r' => Some(PromotionKind::Rook),
            'B' | 'b' => Some(PromotionKind::Bishop),
            'K' | 'k' => Some(PromotionKind::Knight),
            _ => None,
        }
    }

    /// Builds the concrete promoted piece for the given colour.
    pub fn into_piece(self, colour: Colour) -> Piece {
        match self {
            PromotionKind::Queen => Piece::Queen(colour),
            PromotionKind::Rook => Piece::Rook(colour),
            PromotionKind::Bishop => Piece::Bishop(colour),
            PromotionKind::Knight => Piece::Knight(colour),
        }
    }
}

/// Converts a 0-based `(row, col)` pair into a linear cell index, if in bounds.
pub fn try_index(row: isize, col: isize) -> Option<usize> {
    if (0..BOARD_SIZE as isize).contains(&row) && (0..BOARD_SIZE as isize).contains(&col) {
        Some(row as usize * BOARD_SIZE + col as usize)
    } else {
        None
    }
}

/// Splits a linear cell index into `(row, col)`.
pub fn row_col(index: usize) -> (usize, usize) {
    (index / BOARD_SIZE, index % BOARD_SIZE)
}
