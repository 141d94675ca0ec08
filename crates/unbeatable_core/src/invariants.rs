//! First-class invariants for tic-tac-toe boards.
//!
//! Invariants are logical properties that must hold after every committed
//! move. The controller checks them in debug builds.

use crate::{Board, Player, Square, SQUARES};
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: occupied squares plus the remaining-move counter equal nine.
pub struct RemainingMovesConsistent;

impl Invariant<Board> for RemainingMovesConsistent {
    fn holds(board: &Board) -> bool {
        let occupied = board
            .squares()
            .iter()
            .filter(|s| **s != Square::Empty)
            .count();
        occupied + board.remaining_moves() as usize == SQUARES
    }

    fn description() -> &'static str {
        "Occupied squares plus remaining moves equal nine"
    }
}

/// Invariant: the human moves first and turns alternate.
///
/// With no history kept, alternation shows up as the human holding either
/// as many squares as the computer or exactly one more.
pub struct AlternatingTurns;

impl Invariant<Board> for AlternatingTurns {
    fn holds(board: &Board) -> bool {
        let human = board.count(Player::Human);
        let computer = board.count(Player::Computer);
        human == computer || human == computer + 1
    }

    fn description() -> &'static str {
        "Human moves first and players alternate"
    }
}

/// Every invariant a controller-owned board satisfies.
pub type BoardInvariants = (RemainingMovesConsistent, AlternatingTurns);

/// Asserts that all board invariants hold (panics on violation in debug builds).
pub fn assert_invariants(board: &Board) {
    if let Err(violations) = BoardInvariants::check_all(board) {
        for violation in &violations {
            warn!(description = %violation.description, "Board invariant violated");
        }
        debug_assert!(false, "Board invariants violated: {violations:?}");
    }
}
