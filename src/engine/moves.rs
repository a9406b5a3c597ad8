use super::consts::*;
use super::{ChessEngine, PendingPromotion};

impl ChessEngine {
    /// Validates and applies a local move. See spec §4.D for the geometry
    /// table; this dispatches on piece kind after the common preconditions.
    pub fn move_piece(&mut self, from: usize, to: usize) -> MoveResult {
        if !self.board.piece_at(from).is_colour(self.player)
            || self.is_down(from)
            || to == from
            || self.waiting_for_promotion.is_some()
        {
            return MoveResult::Invalid;
        }

        match self.board.piece_at(from) {
            Piece::Pawn(_) => self.handle_pawn_move(from, to),
            Piece::Rook(_) => self.handle_rook_move(from, to),
            Piece::Knight(_) => self.handle_knight_move(from, to),
            Piece::Bishop(_) => self.handle_bishop_move(from, to),
            Piece::Queen(_) => self.handle_queen_move(from, to),
            Piece::King(_) => self.handle_king_move(from, to),
            Piece::Empty => MoveResult::Invalid,
        }
    }

    /// Applies a move already validated by the sender, onto this engine's
    /// mirrored board. `from`/`to` are already in this engine's frame.
    ///
    /// Unlike the source, this also infers an en-passant capture from board
    /// state (a pawn stepping diagonally onto an empty square can only mean
    /// that) and removes the jumped pawn, so the two boards stay true
    /// mirror images under `reverse` (round-trip law R1) instead of
    /// silently drifting apart the way a blind `move_piece_no_check` would.
    pub fn opponent_move(&mut self, from: usize, to: usize) {
        let moving_piece = self.board.piece_at(from);
        let (from_row, from_col) = row_col(from);
        let (to_row, to_col) = row_col(to);
        let is_pawn_diagonal = moving_piece.is_pawn()
            && to_row != from_row
            && (to_col as isize - from_col as isize).abs() == 1
            && self.board.piece_at(to).is_empty();

        if is_pawn_diagonal {
            if let Some(captured) = try_index(from_row as isize, to_col as isize) {
                self.board.set_piece(captured, Piece::Empty);
            }
        }

        self.apply_move(from, to);
    }

    /// Clears the pending promotion's pawn and replaces it with `kind`,
    /// for this engine's own colour.
    pub fn promote(&mut self, kind: PromotionKind) {
        let Some(PendingPromotion { to, .. }) = self.waiting_for_promotion else {
            return;
        };
        self.board.set_piece(to, kind.into_piece(self.player));
        self.waiting_for_promotion = None;
    }

    /// Mirrors the opponent's resolved promotion onto this engine's board.
    /// The promoted piece belongs to the opponent's colour from here.
    pub fn opponent_promote(&mut self, from: usize, to: usize, kind: PromotionKind) {
        self.board.set_piece(from, Piece::Empty);
        self.board.set_piece(to, kind.into_piece(self.player.opponent()));
    }

    pub(super) fn handle_pawn_move(&mut self, from: usize, to: usize) -> MoveResult {
        let (from_row, from_col) = row_col(from);
        let (to_row, to_col) = row_col(to);

        if !self.board.is_blocked(from, Direction::Up) {
            if to_col == from_col && to_row + 1 == from_row && self.board.piece_at(to).is_empty() {
                self.apply_move(from, to);
                return self.land_pawn(from, to, to_row, MoveResult::Success, MoveResult::Promotion);
            }

            if to_col == from_col && from_row == 6 && to_row + 2 == from_row {
                if let Some(skipped) = try_index(from_row as isize - 1, from_col as isize) {
                    if self.board.piece_at(skipped).is_empty() && self.board.piece_at(to).is_empty()
                    {
                        self.apply_move(from, to);
                        return MoveResult::EnPassantOpportunity;
                    }
                }
            }
        }

        let dr = to_row as isize - from_row as isize;
        let dc = to_col as isize - from_col as isize;
        if dr == -1 && dc.abs() == 1 {
            let Some(diag_dir) = DiagonalDirection::from_delta(dr, dc) else {
                return MoveResult::Invalid;
            };
            if !self.board.can_step_diagonal(from, diag_dir) {
                return MoveResult::Invalid;
            }

            if self.en_passant.available(to, self.game_moves_count) {
                if let Some(captured) = try_index(from_row as isize, to_col as isize) {
                    self.apply_move(from, to);
                    self.board.set_piece(captured, Piece::Empty);
                    return MoveResult::Capture;
                }
            } else if self.board.piece_at(to).is_colour(self.player.opponent()) {
                self.apply_move(from, to);
                return self.land_pawn(from, to, to_row, MoveResult::Capture, MoveResult::PromotionCapture);
            }
        }

        MoveResult::Invalid
    }

    /// Latches promotion if `to_row` is the last rank, otherwise returns `plain`.
    fn land_pawn(
        &mut self,
        from: usize,
        to: usize,
        to_row: usize,
        plain: MoveResult,
        promoted: MoveResult,
    ) -> MoveResult {
        if to_row == 0 {
            self.waiting_for_promotion = Some(PendingPromotion { from, to });
            promoted
        } else {
            plain
        }
    }

    pub(super) fn handle_rook_move(&mut self, from: usize, to: usize) -> MoveResult {
        self.slide_straight(from, to, true)
    }

    pub(super) fn handle_bishop_move(&mut self, from: usize, to: usize) -> MoveResult {
        self.slide_diagonal(from, to)
    }

    pub(super) fn handle_queen_move(&mut self, from: usize, to: usize) -> MoveResult {
        let (from_row, from_col) = row_col(from);
        let (to_row, to_col) = row_col(to);

        if from_row == to_row || from_col == to_col {
            self.slide_straight(from, to, false)
        } else if (to_row as isize - from_row as isize).abs()
            == (to_col as isize - from_col as isize).abs()
        {
            self.slide_diagonal(from, to)
        } else {
            MoveResult::Invalid
        }
    }

    pub(super) fn handle_knight_move(&mut self, from: usize, to: usize) -> MoveResult {
        let (from_row, from_col) = row_col(from);
        let (to_row, to_col) = row_col(to);
        let dr = (to_row as isize - from_row as isize).abs();
        let dc = (to_col as isize - from_col as isize).abs();

        if !((dr == 2 && dc == 1) || (dr == 1 && dc == 2)) {
            return MoveResult::Invalid;
        }

        if self.board.piece_at(to).is_colour(self.player.opponent()) {
            self.apply_move(from, to);
            MoveResult::Capture
        } else if self.board.piece_at(to).is_empty() {
            self.apply_move(from, to);
            MoveResult::Success
        } else {
            MoveResult::Invalid
        }
    }

    pub(super) fn handle_king_move(&mut self, from: usize, to: usize) -> MoveResult {
        let (from_row, from_col) = row_col(from);
        let (to_row, to_col) = row_col(to);
        let dr = (to_row as isize - from_row as isize).abs();
        let dc = (to_col as isize - from_col as isize).abs();

        if dr <= 1 && dc <= 1 && (dr != 0 || dc != 0) {
            self.king_moved = true;
            return if self.board.piece_at(to).is_colour(self.player.opponent()) {
                self.apply_move(from, to);
                MoveResult::Capture
            } else if self.board.piece_at(to).is_empty() {
                self.apply_move(from, to);
                MoveResult::Success
            } else {
                MoveResult::Invalid
            };
        }

        self.handle_castling(from, to)
    }

    /// The four literal castling destinations; see SPEC_FULL.md for why
    /// black's indices differ from a simple column-shift of white's (its
    /// own frame is built from a reversed initial layout, king included).
    fn handle_castling(&mut self, from: usize, to: usize) -> MoveResult {
        if self.king_moved {
            return MoveResult::Invalid;
        }

        use Colour::*;
        use Piece::{Empty, Rook};

        let Some((king_from, king_to, rook_from, rook_to, clear)) =
            (match (self.player, to) {
                (White, 62) => Some((60, 62, 63, 61, &[61, 62][..])),
                (White, 58) => Some((60, 58, 56, 59, &[57, 58, 59][..])),
                (Black, 61) => Some((59, 61, 63, 60, &[60, 61, 62][..])),
                (Black, 57) => Some((59, 57, 56, 58, &[57, 58][..])),
                _ => None,
            })
        else {
            return MoveResult::Invalid;
        };

        if from != king_from
            || self.board.piece_at(king_from) != Piece::King(self.player)
            || self.board.piece_at(rook_from) != Rook(self.player)
            || !clear.iter().all(|&i| self.board.piece_at(i).is_empty())
        {
            return MoveResult::Invalid;
        }

        self.board.set_piece(king_from, Empty);
        self.board.set_piece(rook_from, Empty);
        self.board.set_piece(king_to, Piece::King(self.player));
        self.board.set_piece(rook_to, Rook(self.player));
        self.king_moved = true;
        self.game_moves_count += 1;
        self.cooldowns.arm(king_to, self.timeout);
        self.cooldowns.arm(rook_to, self.timeout);

        MoveResult::Success
    }

    /// Straight slide in whichever of the four cardinal directions `to`
    /// lies in, stopping on the first occupied cell (capturing if it's the
    /// opponent's) and breaking any wall crossed if `can_break` is set.
    fn slide_straight(&mut self, from: usize, to: usize, can_break: bool) -> MoveResult {
        let (from_row, from_col) = row_col(from);
        let (to_row, to_col) = row_col(to);

        let dir = if from_row == to_row && to_col > from_col {
            Direction::Right
        } else if from_row == to_row && to_col < from_col {
            Direction::Left
        } else if from_col == to_col && to_row > from_row {
            Direction::Down
        } else if from_col == to_col && to_row < from_row {
            Direction::Up
        } else {
            return MoveResult::Invalid;
        };

        let mut current = from;
        loop {
            if current == to {
                return if self.board.piece_at(current).is_colour(self.player.opponent()) {
                    self.apply_move(from, to);
                    MoveResult::Capture
                } else if self.board.piece_at(current).is_empty() {
                    self.apply_move(from, to);
                    MoveResult::Success
                } else {
                    MoveResult::Invalid
                };
            }

            let Some(next) = self.board.neighbour(current, dir) else {
                return MoveResult::Invalid;
            };
            if !self.board.piece_at(next).is_empty() && next != to {
                return MoveResult::Invalid;
            }

            if can_break {
                self.board.break_wall(current, dir);
            } else if self.board.is_blocked(current, dir) {
                return MoveResult::Invalid;
            }

            current = next;
        }
    }

    /// Diagonal slide; never breaks walls, stops on the first occupied cell.
    fn slide_diagonal(&mut self, from: usize, to: usize) -> MoveResult {
        let (from_row, from_col) = row_col(from);
        let (to_row, to_col) = row_col(to);
        if (to_row as isize - from_row as isize).abs() != (to_col as isize - from_col as isize).abs()
        {
            return MoveResult::Invalid;
        }

        let dir = match (to_row > from_row, to_col > from_col) {
            (true, true) => DiagonalDirection::DownRight,
            (true, false) => DiagonalDirection::DownLeft,
            (false, true) => DiagonalDirection::UpRight,
            (false, false) => DiagonalDirection::UpLeft,
        };

        let mut current = from;
        loop {
            if current == to {
                return if self.board.piece_at(current).is_colour(self.player.opponent()) {
                    self.apply_move(from, to);
                    MoveResult::Capture
                } else if self.board.piece_at(current).is_empty() {
                    self.apply_move(from, to);
                    MoveResult::Success
                } else {
                    MoveResult::Invalid
                };
            }

            let Some(next) = self.board.diagonal_neighbour(current, dir) else {
                return MoveResult::Invalid;
            };
            if !self.board.can_step_diagonal(current, dir) {
                return MoveResult::Invalid;
            }
            if !self.board.piece_at(next).is_empty() && next != to {
                return MoveResult::Invalid;
            }

            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_pawn_push_opens_en_passant_and_arms_cooldown() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        let result = engine.move_piece(52, 36);
        assert_eq!(result, MoveResult::EnPassantOpportunity);
        assert_eq!(engine.piece_at(36), Piece::Pawn(Colour::White));
        assert!(engine.piece_at(52).is_empty());
        assert!(engine.is_down(36));
        assert_eq!(engine.get_game_moves_count(), 1);
    }

    #[test]
    fn single_step_blocked_by_own_up_wall() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        engine.board.set_wall(52, Direction::Up, true);
        assert_eq!(engine.move_piece(52, 44), MoveResult::Invalid);
    }

    #[test]
    fn en_passant_capture_clears_the_jumped_pawn() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        engine.board.set_piece(28, Piece::Pawn(Colour::White));
        engine.board.set_piece(27, Piece::Pawn(Colour::Black));
        engine.en_passant.open(19, 0);
        // Simulate the double-push itself having already advanced the
        // counter once - the window is live for exactly the move after.
        engine.game_moves_count = 1;

        let result = engine.move_piece(28, 19);
        assert_eq!(result, MoveResult::Capture);
        assert!(engine.piece_at(27).is_empty());
        assert_eq!(engine.piece_at(19), Piece::Pawn(Colour::White));
    }

    #[test]
    fn rook_breaks_wall_while_sliding_through() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        engine.board.set_piece(48, Piece::Empty);
        engine.board.set_piece(40, Piece::Empty);
        engine.board.set_wall(48, Direction::Up, true);

        let result = engine.move_piece(56, 32);
        assert_eq!(result, MoveResult::Success);
        assert!(!engine.board.walls_at(48).up);
        assert!(!engine.board.walls_at(40).down);
    }

    #[test]
    fn bishop_does_not_break_a_sealing_wall() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        engine.board.set_piece(52, Piece::Empty);
        engine.board.set_wall(52, Direction::Up, true);
        engine.board.set_wall(52, Direction::Left, true);

        let result = engine.move_piece(61, 43);
        assert_eq!(result, MoveResult::Invalid);
        assert!(engine.board.walls_at(52).up);
    }

    #[test]
    fn castling_kingside_then_blocked_forever() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        engine.board.set_piece(61, Piece::Empty);
        engine.board.set_piece(62, Piece::Empty);

        let result = engine.move_piece(60, 62);
        assert_eq!(result, MoveResult::Success);
        assert_eq!(engine.piece_at(62), Piece::King(Colour::White));
        assert_eq!(engine.piece_at(61), Piece::Rook(Colour::White));
        assert!(engine.piece_at(60).is_empty());
        assert!(engine.piece_at(63).is_empty());
        assert!(engine.is_down(62));
        assert!(engine.is_down(61));

        // Put the king back at its home square and reopen the path: even
        // though the squares line up for kingside castling again, having
        // moved once already forbids it forever.
        engine.board.set_piece(60, Piece::King(Colour::White));
        engine.board.set_piece(62, Piece::Empty);
        engine.board.set_piece(63, Piece::Rook(Colour::White));
        assert_eq!(engine.move_piece(60, 62), MoveResult::Invalid);
    }

    #[test]
    fn corrected_white_queenside_castle_empties_both_origins() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        engine.board.set_piece(57, Piece::Empty);
        engine.board.set_piece(58, Piece::Empty);
        engine.board.set_piece(59, Piece::Empty);

        let result = engine.move_piece(60, 58);
        assert_eq!(result, MoveResult::Success);
        assert_eq!(engine.piece_at(58), Piece::King(Colour::White));
        assert_eq!(engine.piece_at(59), Piece::Rook(Colour::White));
        assert!(engine.piece_at(56).is_empty());
        assert!(engine.piece_at(57).is_empty());
        assert!(engine.is_down(58));
        assert!(engine.is_down(59));
    }

    #[test]
    fn black_kingside_castle_reaches_the_mirrored_squares() {
        // Black's own back rank is column-mirrored from white's: king at
        // 59, queen at 60, so its kingside castle (h-rook side) lands the
        // king on 61 and the rook on 60, not white's 62/61.
        let mut engine = ChessEngine::new(Colour::Black, 60_000);
        engine.board.set_piece(60, Piece::Empty);
        engine.board.set_piece(61, Piece::Empty);
        engine.board.set_piece(62, Piece::Empty);

        let result = engine.move_piece(59, 61);
        assert_eq!(result, MoveResult::Success);
        assert_eq!(engine.piece_at(61), Piece::King(Colour::Black));
        assert_eq!(engine.piece_at(60), Piece::Rook(Colour::Black));
        assert!(engine.piece_at(59).is_empty());
        assert!(engine.piece_at(63).is_empty());
        assert!(engine.is_down(61));
        assert!(engine.is_down(60));
    }

    #[test]
    fn black_queenside_castle_reaches_the_mirrored_squares() {
        let mut engine = ChessEngine::new(Colour::Black, 60_000);
        engine.board.set_piece(57, Piece::Empty);
        engine.board.set_piece(58, Piece::Empty);

        let result = engine.move_piece(59, 57);
        assert_eq!(result, MoveResult::Success);
        assert_eq!(engine.piece_at(57), Piece::King(Colour::Black));
        assert_eq!(engine.piece_at(58), Piece::Rook(Colour::Black));
        assert!(engine.piece_at(59).is_empty());
        assert!(engine.piece_at(56).is_empty());
    }

    #[test]
    fn castling_rejects_a_king_not_standing_on_its_table_from_square() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        // Place the king somewhere other than its home square, with the
        // castling squares otherwise clear: the table's `to` still matches,
        // but `from` doesn't match the table's `king_from` anymore.
        engine.board.set_piece(60, Piece::Empty);
        engine.board.set_piece(52, Piece::King(Colour::White));
        engine.board.set_piece(61, Piece::Empty);
        engine.board.set_piece(62, Piece::Empty);

        assert_eq!(engine.move_piece(52, 62), MoveResult::Invalid);
        assert_eq!(engine.piece_at(52), Piece::King(Colour::White));
        assert!(engine.piece_at(62).is_empty());
    }

    #[test]
    fn promotion_latch_blocks_every_other_move_until_resolved() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        engine.board.set_piece(9, Piece::Pawn(Colour::White));
        engine.board.set_piece(0, Piece::Rook(Colour::Black));

        let result = engine.move_piece(9, 0);
        assert_eq!(result, MoveResult::PromotionCapture);
        assert_eq!(
            engine.get_waiting_for_promotion(),
            Some(PendingPromotion { from: 9, to: 0 })
        );
        assert_eq!(engine.move_piece(48, 40), MoveResult::Invalid);

        engine.promote(PromotionKind::Queen);
        assert_eq!(engine.piece_at(0), Piece::Queen(Colour::White));
        assert!(engine.get_waiting_for_promotion().is_none());
        assert_eq!(engine.move_piece(48, 40), MoveResult::Success);
    }

    #[test]
    fn opponent_move_mirrors_en_passant_capture_without_revalidating() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        engine.board.set_piece(13, Piece::Pawn(Colour::White));
        engine.board.set_piece(12, Piece::Pawn(Colour::Black));
        engine.board.set_piece(21, Piece::Empty);

        engine.opponent_move(12, 21);
        assert!(engine.piece_at(13).is_empty());
        assert_eq!(engine.piece_at(21), Piece::Pawn(Colour::Black));
    }
}
