use super::consts::BOARD_SIZE;

/// Reverses a cell index between the two players' frames.
///
/// Every index that crosses the wire is expressed in the sender's frame;
/// the receiver applies this involution before touching its own board.
/// `reverse(reverse(i)) == i` for all `i` (invariant I5).
pub fn reverse(index: usize) -> usize {
    let row = index / BOARD_SIZE;
    let col = index % BOARD_SIZE;
    (BOARD_SIZE - 1 - row) * BOARD_SIZE + (BOARD_SIZE - 1 - col)
}
