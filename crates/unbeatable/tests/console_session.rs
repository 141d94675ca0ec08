//! End-to-end console sessions driven from in-memory input.

use std::io::Cursor;
use unbeatable::{run_audit, ConsoleSession};

/// Every square, row-major. Played in order, refused squares are skipped,
/// so one pass always lasts until the game is over.
const ROW_MAJOR: &str = "1 1 1 2 1 3 2 1 2 2 2 3 3 1 3 2 3 3";

fn run_session(input: &str) -> String {
    let mut session = ConsoleSession::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    session.run().unwrap();
    String::from_utf8(session.into_output()).unwrap()
}

#[test]
fn test_invalid_first_move_leaves_board_untouched() {
    let output = run_session("4 1\n");
    assert!(output.contains("Put in coordinates between 1 and 3"));
    assert!(!output.contains("Moves Remaining"));
    assert!(!output.contains("Computer plays"));
    assert!(output.ends_with("THANKS FOR PLAYING !!!\n"));
}

#[test]
fn test_oversized_coordinate_is_out_of_range() {
    let output = run_session("99999999999999999999 1\n");
    assert!(output.contains("Put in coordinates between 1 and 3"));
    assert!(!output.contains("Please enter two numbers"));
}

#[test]
fn test_corner_opening_answered_in_center() {
    let output = run_session("1 1\n");
    assert!(output.starts_with("WELCOME TO TICTACTOE!"));
    assert!(output.contains("X - -\n- - -\n- - -\nMoves Remaining: 8"));
    assert!(output.contains("Computer plays row 2, column 2"));
    assert!(output.contains("X - -\n- O -\n- - -\nMoves Remaining: 7"));
}

#[test]
fn test_full_game_then_quit() {
    let output = run_session(&format!("{ROW_MAJOR}\nn\n"));
    assert_eq!(output.matches("GAMEOVER").count(), 1);
    assert!(!output.contains("congratulations"));
    assert!(output.contains("tough loss") || output.contains("It's a draw!"));
    assert!(output.contains("PLAY AGAIN? (y/n)"));
    assert!(output.ends_with("THANKS FOR PLAYING !!!\n"));
}

#[test]
fn test_replay_starts_a_fresh_game() {
    let output = run_session(&format!("{ROW_MAJOR}\nwhat\ny\n{ROW_MAJOR}\nN\n"));
    assert_eq!(output.matches("WELCOME TO TICTACTOE!").count(), 2);
    assert_eq!(output.matches("GAMEOVER").count(), 2);
    assert_eq!(output.matches("PLAY AGAIN?").count(), 3);
    assert!(output.contains("X - -\n- - -\n- - -\nMoves Remaining: 8"));
}

#[test]
fn test_garbage_input_reprompts() {
    let output = run_session("one two\n1 1\n");
    assert!(output.contains("Please enter two numbers: row and column"));
    assert!(output.contains("Computer plays row 2, column 2"));
}

#[test]
fn test_audit_reports_no_human_wins() {
    let mut out = Vec::new();
    let report = run_audit(false, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(report.engine_unbeaten());
    assert!(text.contains("Human wins:    0"));
}

#[test]
fn test_audit_json() {
    let mut out = Vec::new();
    run_audit(true, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["human_wins"], 0);
    assert!(value["games"].as_u64().unwrap() > 0);
}
