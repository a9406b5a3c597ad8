use super::consts::*;
use crate::utils::prelude::*;

/// Number of inter-column (vertical) edges: `BOARD_SIZE - 1` per row.
const VERTICAL_EDGES: usize = (BOARD_SIZE - 1) * BOARD_SIZE;

/// Number of inter-row (horizontal) edges: `BOARD_SIZE - 1` per column.
const HORIZONTAL_EDGES: usize = BOARD_SIZE * (BOARD_SIZE - 1);

/// The four wall flags visible from a single cell, as seen by `walls_at`.
///
/// A board-edge direction always reads `false` here - the `true`-means-blocked
/// convention used by slider wall checks lives in [`Board::is_blocked`], not here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Walls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Walls {
    pub fn get(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// The 64-cell grid plus the shared wall-edge graph (invariants W1/W2 in spec.md).
///
/// Walls are stored as two flat arrays rather than per-cell aliased booleans:
/// a vertical-edge array (inter-column) and a horizontal-edge array
/// (inter-row). Every cell resolves its four wall faces into one of these
/// two arrays, so the two cells sharing an edge always read/write the same
/// slot - invariant W1 holds by construction, not by convention.
#[derive(Clone, Debug)]
pub struct Board {
    cells: [Piece; NUM_CELLS],
    vertical_walls: [bool; VERTICAL_EDGES],
    horizontal_walls: [bool; HORIZONTAL_EDGES],
}

impl Board {
    /// Builds a fresh board in `player`'s own frame: this side's pieces sit
    /// on rows 6-7, the opponent's on rows 0-1, matching the layout every
    /// engine instance uses for itself regardless of which colour it plays.
    ///
    /// For black this is a true 180-degree rotation of the white layout, not
    /// just a row swap: the source builds one fixed white-first array and
    /// `std::reverse()`s the whole thing for `PL_BLACK`, which mirrors each
    /// back rank's column order too. That's why black's own king ends up at
    /// local index 59 (column 3) and queen at 60 (column 4) - swapped from
    /// white's king-at-60/queen-at-59 - which `handle_castling` assumes.
    pub fn new(player: Colour) -> Board {
        use Piece::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let opponent = player.opponent();
        let order = |col: usize| if player == Colour::Black { 7 - col } else { col };

        let mut cells = [Piece::Empty; NUM_CELLS];
        for col in 0..BOARD_SIZE {
            cells[0 * BOARD_SIZE + col] = back_rank[order(col)](opponent);
            cells[1 * BOARD_SIZE + col] = Pawn(opponent);
            cells[6 * BOARD_SIZE + col] = Pawn(player);
            cells[7 * BOARD_SIZE + col] = back_rank[order(col)](player);
        }

        Board {
            cells,
            vertical_walls: [false; VERTICAL_EDGES],
            horizontal_walls: [false; HORIZONTAL_EDGES],
        }
    }

    /// Clears all pieces and walls back to the initial position.
    pub fn reset(&mut self, player: Colour) {
        *self = Board::new(player);
    }

    pub fn piece_at(&self, index: usize) -> Piece {
        self.cells[index]
    }

    pub fn set_piece(&mut self, index: usize, piece: Piece) {
        self.cells[index] = piece;
    }

    /// The four wall faces visible from `index`, `false` at board edges.
    pub fn walls_at(&self, index: usize) -> Walls {
        Walls {
            up: self.wall_ref(index, Direction::Up).unwrap_or(false),
            down: self.wall_ref(index, Direction::Down).unwrap_or(false),
            left: self.wall_ref(index, Direction::Left).unwrap_or(false),
            right: self.wall_ref(index, Direction::Right).unwrap_or(false),
        }
    }

    pub fn is_wall_at(&self, index: usize, dir: Direction) -> bool {
        self.wall_ref(index, dir).unwrap_or(false)
    }

    /// Whether any of the four faces of `index` carries a wall.
    pub fn has_any_wall(&self, index: usize) -> bool {
        self.walls_at(index).any()
    }

    /// Sets the wall on `index`'s `dir` face to `value`. No-op (returns
    /// `false`) if `dir` points off the board - there is no edge to toggle.
    pub fn set_wall(&mut self, index: usize, dir: Direction, value: bool) -> bool {
        match self.edge_slot(index, dir) {
            Some((array, slot)) => {
                match array {
                    EdgeArray::Vertical => self.vertical_walls[slot] = value,
                    EdgeArray::Horizontal => self.horizontal_walls[slot] = value,
                }
                true
            }
            None => false,
        }
    }

    /// Clears the wall on `index`'s `dir` face if one is present there.
    /// Used by rook/queen wall-breaking; a no-op if there was no wall.
    pub fn break_wall(&mut self, index: usize, dir: Direction) {
        self.set_wall(index, dir, false);
    }

    /// The physical boolean behind `index`'s `dir` face, or `None` at a
    /// board edge (no wall object exists there - invariant W2).
    fn wall_ref(&self, index: usize, dir: Direction) -> Option<bool> {
        let (array, slot) = self.edge_slot(index, dir)?;
        Some(match array {
            EdgeArray::Vertical => self.vertical_walls[slot],
            EdgeArray::Horizontal => self.horizontal_walls[slot],
        })
    }

    /// A straight slider is blocked stepping out of `index` in `dir` iff
    /// this returns `true`. Board edges count as blocked so iteration
    /// terminates naturally there, even though `walls_at` reports `false`.
    pub fn is_blocked(&self, index: usize, dir: Direction) -> bool {
        self.wall_ref(index, dir).unwrap_or(true)
    }

    /// Resolves which flat array and slot backs `index`'s `dir` face.
    fn edge_slot(&self, index: usize, dir: Direction) -> Option<(EdgeArray, usize)> {
        let (row, col) = row_col(index);
        match dir {
            Direction::Right if col + 1 < BOARD_SIZE => {
                Some((EdgeArray::Vertical, row * (BOARD_SIZE - 1) + col))
            }
            Direction::Left if col > 0 => {
                Some((EdgeArray::Vertical, row * (BOARD_SIZE - 1) + (col - 1)))
            }
            Direction::Down if row + 1 < BOARD_SIZE => {
                Some((EdgeArray::Horizontal, row * BOARD_SIZE + col))
            }
            Direction::Up if row > 0 => {
                Some((EdgeArray::Horizontal, (row - 1) * BOARD_SIZE + col))
            }
            _ => None,
        }
    }

    /// The neighbouring cell index one step in `dir` from `index`, if in bounds.
    pub fn neighbour(&self, index: usize, dir: Direction) -> Option<usize> {
        let (row, col) = row_col(index);
        let (dr, dc) = dir.delta();
        try_index(row as isize + dr, col as isize + dc)
    }

    /// The direction from `from` to `adjacent`, if the two cells are
    /// orthogonal neighbours; `None` otherwise (diagonal, distant, or equal).
    pub fn direction_to(&self, from: usize, adjacent: usize) -> Option<Direction> {
        Direction::all()
            .into_iter()
            .find(|&dir| self.neighbour(from, dir) == Some(adjacent))
    }

    /// The neighbouring cell index one diagonal step in `dir`, if in bounds.
    pub fn diagonal_neighbour(&self, index: usize, dir: DiagonalDirection) -> Option<usize> {
        let (row, col) = row_col(index);
        let (dr, dc) = dir.delta();
        try_index(row as isize + dr, col as isize + dc)
    }

    /// Whether a diagonal slider may step from `from` to its `dir` neighbour.
    ///
    /// A diagonal step is sealed off by a corner of up to four walls around
    /// the two cells it passes between, not just the one edge a straight
    /// step would cross. Missing wall references (board edges) count as
    /// present, same convention as [`Board::is_blocked`].
    pub fn can_step_diagonal(&self, from: usize, dir: DiagonalDirection) -> bool {
        let (d1, d2) = dir.components();
        let Some(target) = self.diagonal_neighbour(from, dir) else {
            return false;
        };

        let from_d1 = self.is_blocked(from, d1);
        let from_d2 = self.is_blocked(from, d2);
        let target_o1 = self.is_blocked(target, d1.opposite());
        let target_o2 = self.is_blocked(target, d2.opposite());

        let sealed = (from_d1 && from_d2)
            || (target_o1 && target_o2)
            || (target_o2 && from_d2)
            || (target_o1 && from_d1);

        !sealed
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(Colour::White)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EdgeArray {
    Vertical,
    Horizontal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_places_own_pieces_on_rows_six_and_seven() {
        let board = Board::new(Colour::White);
        assert_eq!(board.piece_at(60), Piece::King(Colour::White));
        assert_eq!(board.piece_at(63), Piece::Rook(Colour::White));
        assert_eq!(board.piece_at(4), Piece::King(Colour::Black));
        assert!(board.piece_at(32).is_empty());
    }

    #[test]
    fn black_own_back_rank_is_column_mirrored_not_just_row_swapped() {
        let board = Board::new(Colour::Black);
        assert_eq!(board.piece_at(59), Piece::King(Colour::Black));
        assert_eq!(board.piece_at(60), Piece::Queen(Colour::Black));
        assert_eq!(board.piece_at(56), Piece::Rook(Colour::Black));
        assert_eq!(board.piece_at(63), Piece::Rook(Colour::Black));
        // The opponent-held rank at the top mirrors the same column order.
        assert_eq!(board.piece_at(3), Piece::King(Colour::White));
        assert_eq!(board.piece_at(4), Piece::Queen(Colour::White));
    }

    #[test]
    fn shared_wall_edge_is_visible_from_both_cells() {
        let mut board = Board::new(Colour::White);
        assert!(board.set_wall(52, Direction::Up, true));
        assert!(board.walls_at(52).up);
        assert!(board.walls_at(44).down);
    }

    #[test]
    fn board_edge_has_no_wall_reference() {
        let board = Board::new(Colour::White);
        assert!(!board.set_wall(0, Direction::Up, true));
        assert!(!board.walls_at(0).up);
        assert!(board.is_blocked(0, Direction::Up));
    }

    #[test]
    fn diagonal_step_is_sealed_only_by_both_corner_walls() {
        let mut board = Board::new(Colour::White);
        assert!(board.can_step_diagonal(36, DiagonalDirection::UpLeft));

        board.set_wall(36, Direction::Up, true);
        assert!(board.can_step_diagonal(36, DiagonalDirection::UpLeft));

        board.set_wall(36, Direction::Left, true);
        assert!(!board.can_step_diagonal(36, DiagonalDirection::UpLeft));
    }

    #[test]
    fn break_wall_clears_both_twin_views() {
        let mut board = Board::new(Colour::White);
        board.set_wall(48, Direction::Up, true);
        assert!(board.walls_at(40).down);
        board.break_wall(48, Direction::Up);
        assert!(!board.walls_at(48).up);
        assert!(!board.walls_at(40).down);
    }
}
