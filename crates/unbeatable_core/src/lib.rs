//! Unbeatable tic-tac-toe - the game logic.
//!
//! A human plays `X` against a computer playing `O`. The computer picks
//! its moves by exhaustive minimax search, so it never loses.
//!
//! # Architecture
//!
//! - **Board**: nine squares plus a remaining-move counter
//! - **Rules**: winning lines, full board, derived outcome
//! - **Search**: full-width minimax with scoped place/undo
//! - **Controller**: one game, alternating human and engine turns
//! - **Audit**: every human strategy against the engine
//!
//! # Example
//!
//! ```
//! use unbeatable_core::{Game, Phase, Position};
//!
//! let mut game = Game::new();
//! game.submit_human_move(1, 1).unwrap();
//! assert_eq!(game.phase(), Phase::ComputerToMove);
//!
//! let decision = game.play_computer_turn().unwrap();
//! assert_eq!(*decision.position(), Position::Center);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod audit;
mod controller;
mod phases;
mod position;
mod search;
mod types;

pub mod invariants;
pub mod rules;

// Crate-level exports - Board types
pub use position::Position;
pub use types::{Board, BoardError, Player, Square, SQUARES};

// Crate-level exports - Phases
pub use phases::{Outcome, Phase};

// Crate-level exports - Search
pub use search::{
    terminal_score, Decision, MinimaxEngine, Score, SearchError, COMPUTER_WIN, HUMAN_WIN, TIE,
};

// Crate-level exports - Controller
pub use controller::{validate_human_move, Game, GameError, MoveError, MoveSource};

// Crate-level exports - Audit
pub use audit::{audit, AuditReport};
