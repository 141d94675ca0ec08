//! Draw detection logic for tic-tac-toe.

use crate::Board;

/// Checks if no empty square remains.
///
/// A full board can still hold a winning line; check both players with
/// [`super::has_winning_line`] before calling this a draw.
pub fn is_tie(board: &Board) -> bool {
    board.is_full()
}
