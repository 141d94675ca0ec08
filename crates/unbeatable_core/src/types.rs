//! Core domain types for tic-tac-toe.

use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Number of squares on the board.
pub const SQUARES: usize = 9;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Player {
    /// The person at the console (plays `X`, always moves first).
    Human,
    /// The minimax engine (plays `O`).
    Computer,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Glyph used when printing the board.
    pub fn glyph(self) -> char {
        match self {
            Player::Human => 'X',
            Player::Computer => 'O',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Glyph used when printing the board.
    pub fn glyph(self) -> char {
        match self {
            Square::Empty => '-',
            Square::Occupied(player) => player.glyph(),
        }
    }
}

/// Errors raised by direct board mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Tried to place a mark on a square that already holds one.
    #[display("Square {} is already occupied", position)]
    Occupied {
        /// The contested square.
        position: Position,
    },
    /// Tried to clear a square that holds no mark.
    #[display("Square {} is already empty", position)]
    AlreadyEmpty {
        /// The square that was cleared twice.
        position: Position,
    },
    /// A stored remaining-move count disagrees with the squares.
    #[display("Board records {} remaining moves but has {} empty squares", recorded, actual)]
    RemainingMismatch {
        /// Count carried by the serialized board.
        recorded: u8,
        /// Empty squares actually present.
        actual: u8,
    },
}

/// 3x3 tic-tac-toe board.
///
/// Tracks the number of empty squares alongside the squares themselves.
/// Every mutation goes through [`Board::place`] or [`Board::clear`], so
/// occupied squares plus `remaining` always add up to nine. Deserialized
/// boards are checked against the same rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; SQUARES],
    /// Empty squares left.
    remaining: u8,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; SQUARES],
            remaining: SQUARES as u8,
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Claims an empty square for `player`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Occupied`] and leaves the board untouched if the
    /// square already holds a mark.
    pub fn place(&mut self, pos: Position, player: Player) -> Result<(), BoardError> {
        if !self.is_empty(pos) {
            return Err(BoardError::Occupied { position: pos });
        }
        self.squares[pos.to_index()] = Square::Occupied(player);
        self.remaining -= 1;
        Ok(())
    }

    /// Empties an occupied square, returning the mark that was there.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AlreadyEmpty`] if there was nothing to clear.
    pub fn clear(&mut self, pos: Position) -> Result<Player, BoardError> {
        match self.get(pos) {
            Square::Empty => Err(BoardError::AlreadyEmpty { position: pos }),
            Square::Occupied(player) => {
                self.squares[pos.to_index()] = Square::Empty;
                self.remaining += 1;
                Ok(player)
            }
        }
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; SQUARES] {
        &self.squares
    }

    /// Number of empty squares left.
    pub fn remaining_moves(&self) -> u8 {
        self.remaining
    }

    /// True once no empty square remains.
    pub fn is_full(&self) -> bool {
        self.remaining == 0
    }

    /// Number of squares held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Empty positions in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::iter().filter(|pos| self.is_empty(*pos))
    }
}

/// Wire form of [`Board`], before the remaining count is checked.
#[derive(Deserialize)]
struct RawBoard {
    squares: [Square; SQUARES],
    remaining: u8,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let actual = raw.squares.iter().filter(|s| **s == Square::Empty).count() as u8;
        if raw.remaining != actual {
            return Err(BoardError::RemainingMismatch {
                recorded: raw.remaining,
                actual,
            });
        }
        Ok(Self {
            squares: raw.squares,
            remaining: raw.remaining,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.squares.chunks(3) {
            let line: Vec<String> = row.iter().map(|s| s.glyph().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
