//! Console glue: reads moves from a reader, prints boards to a writer.
//!
//! Input is whitespace-separated tokens, so a move may be typed as
//! `2 3` on one line or split across two. Coordinates are 1-indexed,
//! row first; row 1 is the top printed line.

use anyhow::Result;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;
use tracing::{debug, info, instrument};
use unbeatable_core::{Board, Game, MoveError, MoveSource, Outcome, Phase, Player};

/// Whitespace-separated tokens pulled from a line-oriented reader.
#[derive(Debug)]
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    /// Wraps a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, reading more lines as needed. `None` at end of input.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }

    /// Drops whatever is left of the current line.
    pub fn discard_line(&mut self) {
        self.pending.clear();
    }
}

/// An interactive session: any number of games until the player quits.
#[derive(Debug)]
pub struct ConsoleSession<R, W> {
    input: Tokens<R>,
    out: W,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    /// Creates a session over the given input and output.
    pub fn new(reader: R, out: W) -> Self {
        Self {
            input: Tokens::new(reader),
            out,
        }
    }

    /// Consumes the session, returning the output writer.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Plays games until the player declines a replay or input ends.
    ///
    /// # Errors
    ///
    /// Write failures on the output and engine faults.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<()> {
        let mut games = 0u32;
        loop {
            let Some(outcome) = self.play_one_game()? else {
                info!(games, "Input closed during a game");
                break;
            };
            games += 1;
            debug!(games, %outcome, "Game finished");

            match self.ask_replay()? {
                Some(true) => writeln!(self.out, "\n\n")?,
                Some(false) | None => break,
            }
        }
        writeln!(self.out, "THANKS FOR PLAYING !!!")?;
        self.out.flush()?;
        Ok(())
    }

    /// Plays a single game from an empty board.
    ///
    /// Returns `None` if input ended before the game did.
    ///
    /// # Errors
    ///
    /// Write failures on the output and engine faults.
    pub fn play_one_game(&mut self) -> Result<Option<Outcome>> {
        writeln!(self.out, "WELCOME TO TICTACTOE!")?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "PLEASE INPUT YOUR MOVE IN THE FORM \"row[1,2,3] column[1,2,3]\""
        )?;

        let mut game = Game::new();
        write!(self.out, "{}", game.board())?;

        loop {
            match game.phase() {
                Phase::AwaitingHumanMove => {
                    if game.take_human_turn(&mut *self)?.is_none() {
                        return Ok(None);
                    }
                    self.show(&game)?;
                }
                Phase::ComputerToMove => {
                    let decision = game.play_computer_turn()?;
                    let position = decision.position();
                    writeln!(
                        self.out,
                        "Computer plays row {}, column {}",
                        position.row() + 1,
                        position.col() + 1
                    )?;
                    self.show(&game)?;
                }
                Phase::GameOver(outcome) => {
                    // Typed-ahead moves do not carry into the replay prompt.
                    self.input.discard_line();
                    self.announce(outcome)?;
                    return Ok(Some(outcome));
                }
            }
        }
    }

    /// Asks whether to play again, re-prompting until `y`, `Y`, `n` or `N`.
    ///
    /// Returns `None` at end of input.
    ///
    /// # Errors
    ///
    /// Read or write failures.
    pub fn ask_replay(&mut self) -> Result<Option<bool>> {
        loop {
            write!(self.out, "PLAY AGAIN? (y/n) ")?;
            self.out.flush()?;
            let Some(token) = self.input.next_token()? else {
                writeln!(self.out)?;
                return Ok(None);
            };
            match token.as_str() {
                "y" | "Y" => return Ok(Some(true)),
                "n" | "N" => return Ok(Some(false)),
                other => debug!(answer = other, "Unrecognised replay answer"),
            }
        }
    }

    fn show(&mut self, game: &Game) -> io::Result<()> {
        write!(self.out, "{}", game.board())?;
        writeln!(self.out, "Moves Remaining: {}", game.remaining_moves())
    }

    fn announce(&mut self, outcome: Outcome) -> io::Result<()> {
        let banner = match outcome.winner() {
            Some(Player::Human) => "Winner is X's, congratulations!",
            Some(Player::Computer) => "Winner is O's, tough loss!",
            None => "It's a draw!",
        };
        writeln!(self.out, "{banner}")?;
        writeln!(self.out)?;
        writeln!(self.out, "GAMEOVER")?;
        writeln!(self.out)
    }

    /// Reads one coordinate: `None` at end of input, `Some(None)` if not a number.
    ///
    /// Numbers too large for `i64` saturate, so they still read as out of range.
    fn read_coordinate(&mut self) -> io::Result<Option<Option<i64>>> {
        Ok(self.input.next_token()?.map(|token| parse_coordinate(&token)))
    }
}

fn parse_coordinate(token: &str) -> Option<i64> {
    match token.parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

impl<R: BufRead, W: Write> MoveSource for ConsoleSession<R, W> {
    fn next_move(&mut self, _board: &Board) -> Result<Option<(i64, i64)>> {
        loop {
            write!(self.out, "Your move: ")?;
            self.out.flush()?;

            let Some(row) = self.read_coordinate()? else {
                writeln!(self.out)?;
                return Ok(None);
            };
            let col = match row {
                Some(_) => self.read_coordinate()?,
                None => Some(None),
            };
            let Some(col) = col else {
                writeln!(self.out)?;
                return Ok(None);
            };

            match (row, col) {
                (Some(row), Some(col)) => return Ok(Some((row, col))),
                _ => {
                    self.input.discard_line();
                    writeln!(self.out, "Please enter two numbers: row and column")?;
                }
            }
        }
    }

    fn rejected(&mut self, error: &MoveError) -> Result<()> {
        writeln!(self.out, "{error}")?;
        Ok(())
    }
}
