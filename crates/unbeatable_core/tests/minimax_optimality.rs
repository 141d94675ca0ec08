//! Optimality and determinism of the minimax engine.

use std::collections::HashSet;
use unbeatable_core::rules::{has_winning_line, outcome};
use unbeatable_core::{
    audit, Board, MinimaxEngine, Outcome, Player, Position, Square, COMPUTER_WIN, TIE,
};

fn create_board(human: &[(usize, usize)], computer: &[(usize, usize)]) -> Board {
    let mut board = Board::new();
    for &(row, col) in human {
        let pos = Position::from_row_col(row, col).expect("test coordinates in range");
        board.place(pos, Player::Human).expect("Failed to set cell in test setup");
    }
    for &(row, col) in computer {
        let pos = Position::from_row_col(row, col).expect("test coordinates in range");
        board.place(pos, Player::Computer).expect("Failed to set cell in test setup");
    }
    board
}

/// Every board reachable from the empty board by alternating play, human first.
fn reachable_boards() -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut stack = vec![(Board::new(), Player::Human)];
    let mut boards = Vec::new();
    while let Some((board, to_move)) = stack.pop() {
        if !seen.insert(board.clone()) {
            continue;
        }
        boards.push(board.clone());
        if outcome(&board) != Outcome::InProgress {
            continue;
        }
        for pos in board.empty_positions() {
            let mut next = board.clone();
            next.place(pos, to_move).unwrap();
            stack.push((next, to_move.opponent()));
        }
    }
    boards
}

/// Line check spelled out square by square, independent of the rules table.
fn manual_line(board: &Board, player: Player) -> bool {
    let at = |row: usize, col: usize| {
        board.get(Position::from_row_col(row, col).unwrap()) == Square::Occupied(player)
    };
    let mut won = false;
    for i in 0..3 {
        won |= at(i, 0) && at(i, 1) && at(i, 2);
        won |= at(0, i) && at(1, i) && at(2, i);
    }
    won |= at(0, 0) && at(1, 1) && at(2, 2);
    won |= at(0, 2) && at(1, 1) && at(2, 0);
    won
}

#[test]
fn test_reachable_board_count() {
    assert_eq!(reachable_boards().len(), 5478);
}

#[test]
fn test_winning_lines_match_manual_enumeration() {
    for board in reachable_boards() {
        for player in [Player::Human, Player::Computer] {
            assert_eq!(
                has_winning_line(&board, player),
                manual_line(&board, player),
                "{board}"
            );
        }
    }
}

#[test]
fn test_corner_opening_is_answered_in_the_center() {
    let mut board = create_board(&[(0, 0)], &[]);
    let decision = MinimaxEngine::new().best_move(&mut board).unwrap();
    assert_eq!(*decision.position(), Position::Center);
    assert_eq!(*decision.score(), TIE);
}

#[test]
fn test_blocks_main_diagonal() {
    // X - O
    // - X -
    // - - -
    let mut board = create_board(&[(0, 0), (1, 1)], &[(0, 2)]);
    let decision = MinimaxEngine::new().best_move(&mut board).unwrap();
    assert_eq!(
        *decision.position(),
        Position::BottomRight,
        "Minimax failed to block the main diagonal"
    );
    assert_eq!(*decision.score(), TIE);
}

#[test]
fn test_blocks_middle_row() {
    // O - X
    // X X -
    // O - -
    let mut board = create_board(&[(0, 2), (1, 0), (1, 1)], &[(0, 0), (2, 0)]);
    let decision = MinimaxEngine::new().best_move(&mut board).unwrap();
    assert_eq!(*decision.position(), Position::MiddleRight);
}

#[test]
fn test_wins_when_a_win_is_forced() {
    // O O -
    // X X -
    // X - -
    let mut board = create_board(&[(1, 0), (1, 1), (2, 0)], &[(0, 0), (0, 1)]);
    let decision = MinimaxEngine::new().best_move(&mut board).unwrap();
    assert_eq!(*decision.score(), COMPUTER_WIN);
    assert_eq!(*decision.position(), Position::TopRight);
}

#[test]
fn test_search_is_deterministic() {
    let engine = MinimaxEngine::new();
    let mut board = create_board(&[(0, 1)], &[]);
    let first = engine.best_move(&mut board).unwrap();
    let second = engine.best_move(&mut board).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_search_restores_the_board() {
    let engine = MinimaxEngine::new();
    for board in reachable_boards() {
        let computer_to_move = board.count(Player::Human) == board.count(Player::Computer) + 1;
        if !computer_to_move || outcome(&board) != Outcome::InProgress {
            continue;
        }
        if board.remaining_moves() > 6 {
            continue;
        }
        let mut scratch = board.clone();
        let decision = engine.best_move(&mut scratch).unwrap();
        assert_eq!(scratch, board, "search left marks behind");
        assert!(board.is_empty(*decision.position()));
    }
}

#[test]
fn test_engine_never_loses_to_any_strategy() {
    let report = audit().unwrap();
    assert!(report.engine_unbeaten(), "{report:?}");
    assert_eq!(*report.human_wins(), 0);
    assert!(*report.ties() > 0);
    assert!(*report.computer_wins() > 0);
    assert_eq!(
        *report.games(),
        report.ties() + report.computer_wins() + report.human_wins()
    );
}
