//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Nothing here is cached: the outcome
//! is recomputed from the squares every time it is asked for.

pub mod draw;
pub mod win;

pub use draw::is_tie;
pub use win::{has_winning_line, LINES};

use crate::{Board, Outcome, Player};

/// Derives the outcome of `board`.
///
/// Wins are checked before the tie, human first, so a full board with a
/// completed line is reported as a win.
pub fn outcome(board: &Board) -> Outcome {
    if has_winning_line(board, Player::Human) {
        Outcome::HumanWins
    } else if has_winning_line(board, Player::Computer) {
        Outcome::ComputerWins
    } else if is_tie(board) {
        Outcome::Tie
    } else {
        Outcome::InProgress
    }
}
