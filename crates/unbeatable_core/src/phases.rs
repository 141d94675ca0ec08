//! Game phases and outcomes.

use super::Player;
use serde::{Deserialize, Serialize};

/// Outcome of a board, derived on demand by [`crate::rules::outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The human holds a complete line.
    HumanWins,
    /// The computer holds a complete line.
    ComputerWins,
    /// Board is full and nobody holds a line.
    Tie,
    /// Moves remain and nobody has won.
    InProgress,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::HumanWins => Some(Player::Human),
            Outcome::ComputerWins => Some(Player::Computer),
            Outcome::Tie | Outcome::InProgress => None,
        }
    }

    /// True for every outcome except [`Outcome::InProgress`].
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::HumanWins => write!(f, "Human wins"),
            Outcome::ComputerWins => write!(f, "Computer wins"),
            Outcome::Tie => write!(f, "Tie"),
            Outcome::InProgress => write!(f, "In progress"),
        }
    }
}

/// Where a game controller is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to supply a valid move.
    AwaitingHumanMove,
    /// The engine moves next.
    ComputerToMove,
    /// The game has ended; only a fresh game can continue play.
    GameOver(Outcome),
}
