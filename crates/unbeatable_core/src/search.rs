//! Exhaustive minimax search.
//!
//! Scores are always from the human's point of view: a human win is
//! [`HUMAN_WIN`], a computer win [`COMPUTER_WIN`], a tie [`TIE`]. The human
//! maximizes and the computer minimizes. There is no depth adjustment, so
//! the engine finds *a* best line rather than the shortest one, and there is
//! no pruning: every continuation is visited.
//!
//! The search explores the caller's board in place. Each hypothetical mark
//! is held by a [`Placement`] guard that clears it again when dropped, so
//! the board is restored on every exit path.

use crate::rules::outcome;
use crate::{Board, BoardError, Outcome, Player, Position};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Minimax score, from the human's point of view.
pub type Score = i32;

/// Score of a board the human has won.
pub const HUMAN_WIN: Score = 10;
/// Score of a board the computer has won.
pub const COMPUTER_WIN: Score = -10;
/// Score of a drawn board.
pub const TIE: Score = 0;

/// Search was requested on a board with nothing left to decide.
///
/// Normal game flow checks the outcome before asking for a move, so either
/// variant indicates a logic fault in the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SearchError {
    /// Every square is taken.
    #[display("search requested on a full board")]
    NoMovesRemaining,
    /// A player already holds a line.
    #[display("search requested after the game was decided ({})", outcome)]
    GameAlreadyDecided {
        /// What the board already says.
        outcome: Outcome,
    },
}

/// The move an engine settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Decision {
    /// Square to claim.
    position: Position,
    /// Minimax value of the board after claiming it.
    score: Score,
    /// Board positions visited while deciding.
    nodes: u64,
}

/// Fixed score of a terminal board, or `None` while play continues.
pub fn terminal_score(board: &Board) -> Option<Score> {
    match outcome(board) {
        Outcome::HumanWins => Some(HUMAN_WIN),
        Outcome::ComputerWins => Some(COMPUTER_WIN),
        Outcome::Tie => Some(TIE),
        Outcome::InProgress => None,
    }
}

/// A mark placed for the duration of one search branch.
///
/// Derefs to the board so the recursion can keep exploring through it;
/// dropping the guard clears the square again.
struct Placement<'a> {
    board: &'a mut Board,
    position: Position,
}

impl<'a> Placement<'a> {
    fn new(board: &'a mut Board, position: Position, player: Player) -> Result<Self, BoardError> {
        board.place(position, player)?;
        Ok(Self { board, position })
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        let cleared = self.board.clear(self.position);
        debug_assert!(cleared.is_ok(), "placement at {} undone twice", self.position);
    }
}

/// Node counter for one decision.
#[derive(Debug, Default)]
struct Search {
    nodes: u64,
}

impl Search {
    /// Value of `board` with `to_move` about to play.
    fn value(&mut self, board: &mut Board, to_move: Player) -> Score {
        match to_move {
            Player::Human => self.maximize_human(board),
            Player::Computer => self.minimize_computer(board),
        }
    }

    fn maximize_human(&mut self, board: &mut Board) -> Score {
        self.nodes += 1;
        if let Some(score) = terminal_score(board) {
            return score;
        }

        let mut best = Score::MIN;
        for position in Position::iter() {
            let Ok(mut placed) = Placement::new(board, position, Player::Human) else {
                continue;
            };
            best = best.max(self.minimize_computer(&mut placed));
        }
        best
    }

    fn minimize_computer(&mut self, board: &mut Board) -> Score {
        self.nodes += 1;
        if let Some(score) = terminal_score(board) {
            return score;
        }

        let mut best = Score::MAX;
        for position in Position::iter() {
            let Ok(mut placed) = Placement::new(board, position, Player::Computer) else {
                continue;
            };
            best = best.min(self.maximize_human(&mut placed));
        }
        best
    }
}

/// Whether `candidate` is strictly better than `current` for `side`.
fn improves(side: Player, candidate: Score, current: Score) -> bool {
    match side {
        Player::Human => candidate > current,
        Player::Computer => candidate < current,
    }
}

/// Full-width minimax engine for the 3x3 game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimaxEngine;

impl MinimaxEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Picks the computer's best move on `board`.
    ///
    /// Candidate squares are tried row-major and the first one reaching the
    /// lowest score is kept. The board is explored in place and handed back
    /// unchanged; committing the move is up to the caller.
    ///
    /// # Errors
    ///
    /// Fails with [`SearchError`] if the board is full or already decided.
    pub fn best_move(&self, board: &mut Board) -> Result<Decision, SearchError> {
        self.best_move_for(board, Player::Computer)
    }

    /// Picks the best move for either side; the human maximizes.
    ///
    /// # Errors
    ///
    /// Fails with [`SearchError`] if the board is full or already decided.
    #[instrument(skip(self, board), fields(remaining = board.remaining_moves()))]
    pub fn best_move_for(&self, board: &mut Board, side: Player) -> Result<Decision, SearchError> {
        if board.is_full() {
            return Err(SearchError::NoMovesRemaining);
        }
        let status = outcome(board);
        if status.is_terminal() {
            return Err(SearchError::GameAlreadyDecided { outcome: status });
        }

        let mut search = Search::default();
        let mut best: Option<(Position, Score)> = None;
        for position in Position::iter() {
            let Ok(mut placed) = Placement::new(board, position, side) else {
                continue;
            };
            let score = search.value(&mut placed, side.opponent());
            drop(placed);

            let better = match best {
                None => true,
                Some((_, current)) => improves(side, score, current),
            };
            if better {
                best = Some((position, score));
            }
        }

        let (position, score) = best.ok_or(SearchError::NoMovesRemaining)?;
        debug!(%side, %position, score, nodes = search.nodes, "Search settled on a move");
        Ok(Decision::new(position, score, search.nodes))
    }

    /// Minimax value of `board` with `to_move` about to play.
    pub fn evaluate(&self, board: &mut Board, to_move: Player) -> Score {
        Search::default().value(board, to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(human: &[Position], computer: &[Position]) -> Board {
        let mut board = Board::new();
        for pos in human {
            board.place(*pos, Player::Human).unwrap();
        }
        for pos in computer {
            board.place(*pos, Player::Computer).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut board = Board::new();
        assert_eq!(MinimaxEngine::new().evaluate(&mut board, Player::Human), TIE);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_takes_the_only_winning_square() {
        // O O -
        // X X -
        // X - -
        let mut board = board_from(
            &[Position::MiddleLeft, Position::Center, Position::BottomLeft],
            &[Position::TopLeft, Position::TopCenter],
        );
        let decision = MinimaxEngine::new().best_move(&mut board).unwrap();
        assert_eq!(*decision.score(), COMPUTER_WIN);
        assert_eq!(*decision.position(), Position::TopRight);
    }

    #[test]
    fn test_strict_minimum_keeps_first_of_equal_scores() {
        // Every opening draws, so the first square tried must be kept.
        let mut board = Board::new();
        let decision = MinimaxEngine::new().best_move(&mut board).unwrap();
        assert_eq!(*decision.position(), Position::TopLeft);
        assert_eq!(*decision.score(), TIE);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_full_board_is_rejected() {
        let mut board = Board::new();
        for (i, pos) in Position::ALL.into_iter().enumerate() {
            let player = if i % 2 == 0 { Player::Human } else { Player::Computer };
            board.place(pos, player).unwrap();
        }
        assert_eq!(
            MinimaxEngine::new().best_move(&mut board),
            Err(SearchError::NoMovesRemaining)
        );
    }

    #[test]
    fn test_decided_board_is_rejected() {
        let mut board = board_from(
            &[Position::TopLeft, Position::TopCenter, Position::TopRight],
            &[Position::Center, Position::BottomLeft],
        );
        let before = board.clone();
        assert_eq!(
            MinimaxEngine::new().best_move(&mut board),
            Err(SearchError::GameAlreadyDecided {
                outcome: Outcome::HumanWins
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_placement_guard_restores_board() {
        let mut board = board_from(&[Position::Center], &[]);
        let before = board.clone();
        {
            let mut placed = Placement::new(&mut board, Position::TopLeft, Player::Computer).unwrap();
            assert_eq!(placed.remaining_moves(), 7);
            let inner = Placement::new(&mut placed, Position::TopRight, Player::Human).unwrap();
            assert_eq!(inner.remaining_moves(), 6);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_placement_on_occupied_square_fails() {
        let mut board = board_from(&[Position::Center], &[]);
        assert!(Placement::new(&mut board, Position::Center, Player::Computer).is_err());
        assert_eq!(board.remaining_moves(), 8);
    }

    #[test]
    fn test_human_side_takes_the_win() {
        // X X -
        // O O -
        // - - -
        let mut board = board_from(
            &[Position::TopLeft, Position::TopCenter],
            &[Position::MiddleLeft, Position::Center],
        );
        let decision = MinimaxEngine::new()
            .best_move_for(&mut board, Player::Human)
            .unwrap();
        assert_eq!(*decision.score(), HUMAN_WIN);
    }
}
