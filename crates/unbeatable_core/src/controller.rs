//! Turn-by-turn game controller.
//!
//! A [`Game`] owns the only board of a game and walks it through
//! [`Phase::AwaitingHumanMove`] → [`Phase::ComputerToMove`] → … until
//! [`Phase::GameOver`]. Playing again means constructing a new `Game`.

use crate::invariants::assert_invariants;
use crate::rules::outcome;
use crate::search::{Decision, MinimaxEngine, SearchError};
use crate::{Board, BoardError, Outcome, Phase, Player, Position};
use derive_more::{Display, Error, From};
use tracing::{debug, info, instrument};

/// Why a human move was refused. The board is never touched on refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Row or column outside `1..=3`.
    #[display("Put in coordinates between 1 and 3")]
    OutOfRange {
        /// Row as entered (1-indexed).
        row: i64,
        /// Column as entered (1-indexed).
        col: i64,
    },
    /// The target square is already taken.
    #[display("Selected space is occupied, select an empty space")]
    SquareOccupied {
        /// The contested square.
        position: Position,
    },
    /// The computer is to move.
    #[display("It is not the human's turn")]
    NotHumansTurn,
    /// The game has finished.
    #[display("Game is already over ({})", outcome)]
    GameOver {
        /// How the game ended.
        outcome: Outcome,
    },
}

/// Faults while advancing a game. None of these happen in normal play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum GameError {
    /// The computer was asked to move out of turn.
    #[display("It is not the computer's turn")]
    #[from(skip)]
    NotComputersTurn,
    /// The engine refused the board.
    #[display("Search failed: {}", _0)]
    Search(SearchError),
    /// The engine picked a square the board would not accept.
    #[display("Board rejected move: {}", _0)]
    Board(BoardError),
    /// A human move generated by the controller itself was refused.
    #[display("Generated move refused: {}", _0)]
    Move(MoveError),
}

/// Validates a 1-indexed `(row, col)` human move against `board`.
///
/// A move is valid when `1 <= row <= 3`, `1 <= col <= 3` and the square at
/// `(row - 1, col - 1)` is empty.
///
/// # Errors
///
/// [`MoveError::OutOfRange`] or [`MoveError::SquareOccupied`].
pub fn validate_human_move(board: &Board, row: i64, col: i64) -> Result<Position, MoveError> {
    let in_range = (1..=3).contains(&row) && (1..=3).contains(&col);
    let position = in_range
        .then(|| Position::from_row_col((row - 1) as usize, (col - 1) as usize))
        .flatten()
        .ok_or(MoveError::OutOfRange { row, col })?;

    if !board.is_empty(position) {
        return Err(MoveError::SquareOccupied { position });
    }
    Ok(position)
}

/// Supplies human moves as 1-indexed `(row, col)` pairs.
pub trait MoveSource {
    /// Next move to try, or `None` when the source has nothing more to offer.
    fn next_move(&mut self, board: &Board) -> anyhow::Result<Option<(i64, i64)>>;

    /// Called when the previous move was refused, before asking again.
    fn rejected(&mut self, _error: &MoveError) -> anyhow::Result<()> {
        Ok(())
    }
}

/// One game of human versus engine.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    phase: Phase,
    engine: MinimaxEngine,
}

impl Game {
    /// Creates a new game: empty board, human to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            phase: Phase::AwaitingHumanMove,
            engine: MinimaxEngine::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Outcome of the board right now.
    pub fn outcome(&self) -> Outcome {
        outcome(&self.board)
    }

    /// Empty squares left.
    pub fn remaining_moves(&self) -> u8 {
        self.board.remaining_moves()
    }

    /// Applies a 1-indexed human move.
    ///
    /// # Errors
    ///
    /// Refuses moves out of turn, after the game ended, off the board or
    /// onto an occupied square. A refused move changes nothing.
    #[instrument(skip(self))]
    pub fn submit_human_move(&mut self, row: i64, col: i64) -> Result<Phase, MoveError> {
        match self.phase {
            Phase::AwaitingHumanMove => {}
            Phase::ComputerToMove => return Err(MoveError::NotHumansTurn),
            Phase::GameOver(outcome) => return Err(MoveError::GameOver { outcome }),
        }

        let position = validate_human_move(&self.board, row, col)?;
        self.board
            .place(position, Player::Human)
            .map_err(|_| MoveError::SquareOccupied { position })?;
        debug!(%position, remaining = self.board.remaining_moves(), "Human moved");
        Ok(self.advance(Player::Human))
    }

    /// Runs the engine and commits its move.
    ///
    /// # Errors
    ///
    /// [`GameError::NotComputersTurn`] outside [`Phase::ComputerToMove`];
    /// the other variants indicate a broken board.
    #[instrument(skip(self))]
    pub fn play_computer_turn(&mut self) -> Result<Decision, GameError> {
        if self.phase != Phase::ComputerToMove {
            return Err(GameError::NotComputersTurn);
        }

        let decision = self.engine.best_move(&mut self.board)?;
        self.board.place(*decision.position(), Player::Computer)?;
        debug!(
            position = %decision.position(),
            score = decision.score(),
            nodes = decision.nodes(),
            "Computer moved"
        );
        self.advance(Player::Computer);
        Ok(decision)
    }

    /// Asks `source` for moves until one is accepted.
    ///
    /// Returns the square the human took, or `None` if the source ran dry.
    ///
    /// # Errors
    ///
    /// Propagates source failures, and [`MoveError`]s that re-asking cannot
    /// fix (out of turn, game over).
    pub fn take_human_turn<S: MoveSource>(
        &mut self,
        source: &mut S,
    ) -> anyhow::Result<Option<Position>> {
        loop {
            let Some((row, col)) = source.next_move(&self.board)? else {
                return Ok(None);
            };
            match self.submit_human_move(row, col) {
                Ok(_) => {
                    let position = Position::from_row_col((row - 1) as usize, (col - 1) as usize);
                    return Ok(position);
                }
                Err(e @ (MoveError::OutOfRange { .. } | MoveError::SquareOccupied { .. })) => {
                    debug!(error = %e, "Human move refused");
                    source.rejected(&e)?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Plays the game to the end, taking human moves from `source`.
    ///
    /// Returns `None` if the source ran out of moves first.
    ///
    /// # Errors
    ///
    /// Source failures and engine faults.
    pub fn play_out<S: MoveSource>(&mut self, source: &mut S) -> anyhow::Result<Option<Outcome>> {
        loop {
            match self.phase {
                Phase::AwaitingHumanMove => {
                    if self.take_human_turn(source)?.is_none() {
                        return Ok(None);
                    }
                }
                Phase::ComputerToMove => {
                    self.play_computer_turn()?;
                }
                Phase::GameOver(outcome) => return Ok(Some(outcome)),
            }
        }
    }

    /// Moves to the next phase after `mover` committed a move.
    fn advance(&mut self, mover: Player) -> Phase {
        assert_invariants(&self.board);
        let status = outcome(&self.board);
        self.phase = if status.is_terminal() {
            info!(outcome = %status, "Game over");
            Phase::GameOver(status)
        } else {
            match mover.opponent() {
                Player::Human => Phase::AwaitingHumanMove,
                Player::Computer => Phase::ComputerToMove,
            }
        };
        self.phase
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
