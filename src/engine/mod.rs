/*
 *  The wall-chess rules engine: a single-threaded board model plus a move
 *  validator that each peer runs independently from its own colour's frame.
 */

mod board;
mod consts;
mod cooldown;
mod en_passant;
mod moves;
mod perspective;
mod walls;

use std::time::Duration;

pub use board::{Board, Walls};
pub use consts::{
    Colour, Direction, DiagonalDirection, MoveResult, Piece, PromotionKind, WallResult,
    BOARD_SIZE, NUM_CELLS,
};
pub use cooldown::CooldownSet;
pub use en_passant::EnPassantWindow;

pub mod prelude {
    pub use super::{
        Board, ChessEngine, Colour, Direction, DiagonalDirection, MoveResult, Piece,
        PromotionKind, WallResult, Walls,
    };
}

/// A pending pawn promotion: the move that reached the back rank, awaiting a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: usize,
    pub to: usize,
}

/// One side's view of the game: its own board (in its own frame), its
/// cooldowns, its en-passant window, and the handful of flags that gate
/// castling and promotion.
///
/// Every public method here is either a *local* entry point (`move_piece`,
/// `build_wall`, `promote`) that validates before mutating, or an
/// *opponent-apply* entry point (`opponent_move`, `build_wall_opponent`,
/// `opponent_promote`) that trusts the sender and only mutates.
pub struct ChessEngine {
    player: Colour,
    board: Board,
    cooldowns: CooldownSet,
    en_passant: EnPassantWindow,
    waiting_for_promotion: Option<PendingPromotion>,
    king_moved: bool,
    game_moves_count: u64,
    timeout: Duration,
}

impl ChessEngine {
    pub fn new(player: Colour, timeout_ms: u64) -> ChessEngine {
        ChessEngine {
            player,
            board: Board::new(player),
            cooldowns: CooldownSet::new(),
            en_passant: EnPassantWindow::new(),
            waiting_for_promotion: None,
            king_moved: false,
            game_moves_count: 0,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Resets to a fresh game: new board, flags, and clocks all cleared.
    pub fn reset_board(&mut self) {
        self.board.reset(self.player);
        self.cooldowns = CooldownSet::new();
        self.en_passant = EnPassantWindow::new();
        self.waiting_for_promotion = None;
        self.king_moved = false;
        self.game_moves_count = 0;
    }

    pub fn player(&self) -> Colour {
        self.player
    }

    pub fn piece_at(&self, index: usize) -> Piece {
        self.board.piece_at(index)
    }

    pub fn walls_at(&self, index: usize) -> Walls {
        self.board.walls_at(index)
    }

    pub fn is_wall_at(&self, index: usize, dir: Direction) -> bool {
        self.board.is_wall_at(index, dir)
    }

    pub fn get_board(&self) -> &Board {
        &self.board
    }

    /// The number of this engine's own pieces still on the board (invariant I2).
    pub fn piece_count(&self) -> usize {
        (0..NUM_CELLS)
            .filter(|&i| self.board.piece_at(i).is_colour(self.player))
            .count()
    }

    pub fn get_waiting_for_promotion(&self) -> Option<PendingPromotion> {
        self.waiting_for_promotion
    }

    pub fn get_game_moves_count(&self) -> u64 {
        self.game_moves_count
    }

    /// The square one row in front of `square` (in this engine's frame),
    /// i.e. the square an en-passant-opening pawn skipped over. `None` for
    /// a pawn that landed on the last rank, which cannot happen via a
    /// double-advance but is guarded for symmetry with the source.
    pub fn get_under_position_of(&self, square: usize) -> Option<usize> {
        let (row, col) = consts::row_col(square);
        if row == 7 {
            return None;
        }
        consts::try_index(row as isize + 1, col as isize)
    }

    /// The pure frame-reversal involution; see invariant I5.
    pub fn reverse(&self, index: usize) -> usize {
        perspective::reverse(index)
    }

    pub fn did_opponent_lose(&self) -> bool {
        !(0..NUM_CELLS).any(|i| self.board.piece_at(i) == Piece::King(self.player.opponent()))
    }

    /// Drops expired cooldown entries. Call once per frame/tick.
    pub fn check_timeouts(&mut self) {
        self.cooldowns.sweep();
    }

    /// Registers an en-passant opportunity received from the opponent
    /// (the `ENPS` wire message, already reversed into this engine's frame).
    pub fn add_en_passant_opportunity(&mut self, square: usize, move_index: u64) {
        self.en_passant.open(square, move_index);
    }

    fn is_down(&self, cell: usize) -> bool {
        self.cooldowns.is_down(cell)
    }

    /// Places the mover's piece at `to`, clears `from`, arms cooldown on
    /// `to`, sweeps the en-passant window, and advances the game counter -
    /// the common tail of every successful non-castling move.
    fn apply_move(&mut self, from: usize, to: usize) {
        let piece = self.board.piece_at(from);
        self.board.set_piece(to, piece);
        self.board.set_piece(from, Piece::Empty);
        self.en_passant.sweep(self.game_moves_count);
        self.game_moves_count += 1;
        self.cooldowns.arm(to, self.timeout);
    }
}
