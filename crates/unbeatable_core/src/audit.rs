//! Exhaustive audit of the engine against every human strategy.
//!
//! At each human turn every empty square is tried; the engine answers
//! deterministically. Every finished game lands in the tally, so a report
//! with zero human wins shows the engine cannot be beaten.

use crate::controller::{Game, GameError};
use crate::{Outcome, Phase};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Tally of every game reachable by varying the human's moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct AuditReport {
    /// Distinct games played to completion.
    games: u64,
    /// Games the human won.
    human_wins: u64,
    /// Games the computer won.
    computer_wins: u64,
    /// Games that filled the board without a line.
    ties: u64,
    /// Total positions the engine visited across all decisions.
    nodes: u64,
}

impl AuditReport {
    /// True when no human strategy beats the engine.
    pub fn engine_unbeaten(&self) -> bool {
        self.human_wins == 0
    }

    fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::HumanWins => self.human_wins += 1,
            Outcome::ComputerWins => self.computer_wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::InProgress => {}
        }
    }
}

/// Plays out every human strategy from a fresh game.
///
/// # Errors
///
/// Only engine or controller faults, which would mean a broken controller.
#[instrument]
pub fn audit() -> Result<AuditReport, GameError> {
    let mut report = AuditReport::default();
    explore(Game::new(), &mut report)?;
    info!(
        games = report.games,
        human_wins = report.human_wins,
        computer_wins = report.computer_wins,
        ties = report.ties,
        "Audit complete"
    );
    Ok(report)
}

fn explore(game: Game, report: &mut AuditReport) -> Result<(), GameError> {
    for position in game.board().empty_positions() {
        let mut next = game.clone();
        let row = position.row() as i64 + 1;
        let col = position.col() as i64 + 1;
        next.submit_human_move(row, col)?;
        if next.phase() == Phase::ComputerToMove {
            let decision = next.play_computer_turn()?;
            report.nodes += decision.nodes();
        }
        match next.phase() {
            Phase::GameOver(outcome) => report.record(outcome),
            Phase::AwaitingHumanMove | Phase::ComputerToMove => explore(next, report)?,
        }
    }
    Ok(())
}
