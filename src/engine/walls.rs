use super::consts::WallResult;
use super::ChessEngine;

impl ChessEngine {
    /// Builds a wall on the edge between `from` and `adjacent`. Only this
    /// engine's own pawns may build, and only onto one of their four
    /// cardinal neighbours. Does not advance the game counter (wall builds
    /// aren't moves) but does arm a cooldown on `from`.
    pub fn build_wall(&mut self, from: usize, adjacent: usize) -> WallResult {
        if !self.board.piece_at(from).is_colour(self.player) || !self.board.piece_at(from).is_pawn()
        {
            return WallResult::Invalid;
        }

        let Some(dir) = self.board.direction_to(from, adjacent) else {
            return WallResult::Invalid;
        };

        if self.board.is_wall_at(from, dir) {
            return WallResult::WallExists;
        }

        self.board.set_wall(from, dir, true);
        self.cooldowns_arm_build(from);
        WallResult::Success
    }

    /// Mirrors an opponent's wall build onto this engine's board, unchecked.
    pub fn build_wall_opponent(&mut self, from: usize, adjacent: usize) {
        if let Some(dir) = self.board.direction_to(from, adjacent) {
            self.board.set_wall(from, dir, true);
        }
    }

    fn cooldowns_arm_build(&mut self, from: usize) {
        self.cooldowns.arm(from, self.timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Colour, Direction};
    use super::*;

    #[test]
    fn pawn_builds_a_wall_on_a_cardinal_neighbour() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        let result = engine.build_wall(52, 44);
        assert_eq!(result, WallResult::Success);
        assert!(engine.walls_at(52).get(Direction::Up));
        assert!(engine.walls_at(44).get(Direction::Down));
    }

    #[test]
    fn building_an_existing_wall_is_rejected() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        assert_eq!(engine.build_wall(52, 44), WallResult::Success);
        assert_eq!(engine.build_wall(52, 44), WallResult::WallExists);
    }

    #[test]
    fn only_this_engines_own_pawn_may_build() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        assert_eq!(engine.build_wall(4, 12), WallResult::Invalid);
        assert_eq!(engine.build_wall(60, 52), WallResult::Invalid);
    }

    #[test]
    fn opponent_wall_build_is_unconditional() {
        let mut engine = ChessEngine::new(Colour::White, 60_000);
        engine.build_wall_opponent(12, 20);
        assert!(engine.walls_at(12).get(Direction::Down));
    }
}
