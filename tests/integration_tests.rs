//! Integration tests for the session state machine

use blocktris::core::{Board, GameSession, PieceQueue, Rules};
use blocktris::types::{Command, GameStatus, PieceKind};

fn session_on(board: Board, kinds: &[PieceKind], rules: Rules) -> GameSession {
    let mut s = GameSession::from_board(rules, board, PieceQueue::scripted(7, kinds.iter().copied()));
    assert!(s.start());
    s
}

#[test]
fn test_game_lifecycle() {
    let mut s = GameSession::new(Rules::default(), 12345);
    assert_eq!(s.status(), GameStatus::NotStarted);

    assert!(s.apply(Command::Start));
    assert_eq!(s.status(), GameStatus::Running);
    assert!(s.active().is_some());

    assert!(s.apply(Command::Pause));
    assert_eq!(s.status(), GameStatus::Paused);
    assert!(s.apply(Command::Pause));
    assert_eq!(s.status(), GameStatus::Running);

    assert!(s.apply(Command::Reset));
    assert_eq!(s.status(), GameStatus::Running);
    assert_eq!(s.score(), 0);
}

#[test]
fn test_hard_drop_distance_on_empty_board() {
    for kind in PieceKind::ALL {
        let mut s = session_on(Board::default(), &[kind], Rules::default());
        let piece = s.active().unwrap();
        let height = piece.shape.bottom_row().unwrap() as u32 + 1;
        let expected = 20 - height - piece.y as u32;

        assert_eq!(s.hard_drop(), expected, "{:?}", kind);
        assert_eq!(s.score(), 2 * expected, "{:?}", kind);
    }
}

/// Rows 16..=19 full except column 0, then a vertical I into the well.
fn tetris_score(rules: Rules) -> (u32, u32) {
    let board = Board::from_rows(
        10,
        20,
        &[".ZZZZZZZZZ", ".ZZZZZZZZZ", ".ZZZZZZZZZ", ".ZZZZZZZZZ"],
    );
    let mut s = session_on(board, &[PieceKind::I, PieceKind::O], rules);

    assert!(s.apply(Command::Rotate));
    for _ in 0..5 {
        assert!(s.apply(Command::MoveLeft));
    }
    assert!(!s.apply(Command::MoveLeft));
    assert_eq!(s.hard_drop(), 16);
    assert_eq!(s.board().occupied_count(), 0);
    (s.score(), s.lines())
}

#[test]
fn test_tetris_at_level_one() {
    let (score, lines) = tetris_score(Rules::default());
    assert_eq!(lines, 4);
    assert_eq!(score, 800 + 2 * 16);
}

#[test]
fn test_tetris_at_level_three() {
    let rules = Rules {
        initial_level: 3,
        ..Rules::default()
    };
    let (score, _) = tetris_score(rules);
    assert_eq!(score, 2400 + 2 * 16);
}

#[test]
fn test_level_changes_on_tenth_line() {
    let board = Board::from_rows(10, 20, &["III....III"; 10]);
    let mut s = session_on(board, &[PieceKind::I; 11], Rules::default());

    for cleared in 1..=9 {
        assert_eq!(s.hard_drop(), 18);
        assert_eq!(s.lines(), cleared);
        assert_eq!(s.level(), 1);
        assert_eq!(s.drop_interval_ms(), 1000);
    }

    assert_eq!(s.hard_drop(), 18);
    assert_eq!(s.lines(), 10);
    assert_eq!(s.level(), 2);
    assert_eq!(s.drop_interval_ms(), 900);
    assert_eq!(s.score(), 10 * 36 + 10 * 100);
    assert_eq!(s.board().occupied_count(), 0);
}

#[test]
fn test_soft_drop_until_lock_spawns_next() {
    let mut s = GameSession::with_queue(
        Rules::default(),
        PieceQueue::scripted(3, [PieceKind::O, PieceKind::L, PieceKind::S]),
    );
    // Reset discards the pending O and draws a fresh next piece.
    s.reset();
    let first = s.active().unwrap();
    assert_eq!(first.kind, PieceKind::L);
    assert_eq!((first.x, first.y), (4, 0));

    let mut moves = 0;
    while s.move_piece(0, 1) {
        moves += 1;
    }
    assert_eq!(moves, 18);
    assert_eq!(s.score(), 18);
    assert_eq!(s.board().occupied_count(), 4);
    assert_eq!(s.active().unwrap().kind, PieceKind::S);
    assert_eq!(s.status(), GameStatus::Running);
}

#[test]
fn test_blocked_spawn_ends_game_and_freezes_state() {
    let board = Board::from_rows(10, 20, &["ZZZZZZZZZ."; 18]);
    let mut s = session_on(board, &[PieceKind::O, PieceKind::O], Rules::default());

    assert_eq!(s.hard_drop(), 0);
    assert!(s.is_game_over());
    assert!(s.active().is_none());

    let frozen = s.snapshot();
    assert!(frozen.game_over);
    for command in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
        Command::HardDrop,
        Command::Pause,
    ] {
        assert!(!s.apply(command), "{:?}", command);
    }
    assert!(!s.tick(1_000_000));
    assert_eq!(s.snapshot(), frozen);

    s.reset();
    assert_eq!(s.status(), GameStatus::Running);
    assert_eq!(s.board().occupied_count(), 0);
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Command::Rotate,
        Command::MoveLeft,
        Command::HardDrop,
        Command::MoveRight,
        Command::MoveRight,
        Command::SoftDrop,
        Command::HardDrop,
        Command::HardDrop,
    ];

    let play = || {
        let mut s = GameSession::new(Rules::default(), 99);
        s.start();
        for (i, command) in script.iter().enumerate() {
            s.apply(*command);
            s.tick(i as u64 * 700);
        }
        s.snapshot()
    };

    assert_eq!(play(), play());
}

#[test]
fn test_narrow_board_rules() {
    let rules = Rules::from_json_str(r#"{ "cols": 6, "rows": 8 }"#).unwrap();
    let mut s = GameSession::with_queue(rules, PieceQueue::scripted(1, [PieceKind::T]));
    s.start();

    let piece = s.active().unwrap();
    assert_eq!(piece.x, 2);
    assert_eq!(s.board().width(), 6);
    assert_eq!(s.hard_drop(), 6);
}

#[test]
fn test_zero_lines_per_level_still_clears_lines() {
    let rules = Rules {
        lines_per_level: 0,
        ..Rules::default()
    };
    let board = Board::from_rows(10, 20, &["III....III"]);
    let mut s = session_on(board, &[PieceKind::I, PieceKind::O], rules);

    assert_eq!(s.rules().lines_per_level, 1);
    assert_eq!(s.hard_drop(), 18);
    assert_eq!(s.lines(), 1);
    assert_eq!(s.level(), 2);
    assert_eq!(s.drop_interval_ms(), 900);
    assert_eq!(s.score(), 2 * 18 + 100);
    assert_eq!(s.status(), GameStatus::Running);
}

#[test]
fn test_out_of_range_rules_are_sanitized() {
    let rules = Rules {
        cols: 200,
        rows: 2,
        min_drop_ms: 0,
        initial_level: 0,
        ..Rules::default()
    };
    let mut s = GameSession::new(rules, 4);

    assert_eq!(s.board().width(), 64);
    assert_eq!(s.board().height(), 4);
    assert_eq!(s.level(), 1);
    assert!(s.rules().validate().is_ok());
    assert!(s.start());
    while s.apply(Command::MoveRight) {}
    assert_eq!(s.status(), GameStatus::Running);
}

#[test]
fn test_paused_session_cannot_end() {
    let board = Board::from_rows(10, 20, &["ZZZZZZZZZ."; 18]);
    let mut s = session_on(board, &[PieceKind::O, PieceKind::O], Rules::default());
    assert!(s.toggle_pause());

    assert_eq!(s.hard_drop(), 0);
    assert!(!s.apply(Command::SoftDrop));
    s.tick(0);
    assert!(!s.tick(1_000_000));
    assert_eq!(s.status(), GameStatus::Paused);

    assert!(s.toggle_pause());
    s.hard_drop();
    assert!(s.is_game_over());
}
