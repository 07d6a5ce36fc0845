//! Repeated passes against live boards.

use proptest::prelude::*;
use sweep_deduce::autoplay::{self, is_solvable};
use sweep_deduce::board::{generate_solvable_board, Board};
use sweep_deduce::rng::BoardRng;
use sweep_deduce::{Action, AutoplayConfig, BoardConfig, Position};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn open_start_area(board: &mut Board, start: Position) {
    for x in start.x.saturating_sub(1)..=start.x + 1 {
        for y in start.y.saturating_sub(1)..=start.y + 1 {
            board.uncover(Position::new(x, y));
        }
    }
}

#[test]
fn test_generated_board_is_cleared_by_autoplay() {
    init_logging();
    let start = Position::new(4, 4);
    let config = BoardConfig {
        width: 9,
        height: 9,
        hazard_count: 10,
        start: Some(start),
        seed: Some(2024),
        ..BoardConfig::default()
    };
    let mut rng = BoardRng::new(config.seed);
    let result = generate_solvable_board(&config, 500, &mut rng, |b| is_solvable(b, start)).unwrap();
    assert!(result.success, "no solvable layout in {} attempts", result.attempts);
    assert_eq!(result.board.hazard_count(), 10);

    let mut board = result.board;
    open_start_area(&mut board, start);
    let report = autoplay::run(&mut board, &AutoplayConfig::default());
    assert!(report.cleared);
    assert!(!report.detonated);
}

#[test]
fn test_generation_rejects_overfull_board() {
    let config = BoardConfig {
        width: 3,
        height: 3,
        hazard_count: 5,
        start: Some(Position::new(1, 1)),
        safe_radius: 1,
        seed: Some(1),
    };
    let mut rng = BoardRng::new(config.seed);
    assert!(generate_solvable_board(&config, 10, &mut rng, |_| true).is_err());
}

proptest! {
    #[test]
    fn prop_autoplay_never_detonates(seed in any::<u64>(), w in 3usize..=10, h in 3usize..=10) {
        let start = Position::new(w / 2, h / 2);
        let config = BoardConfig {
            width: w,
            height: h,
            hazard_count: (w * h).saturating_sub(9) / 4,
            start: Some(start),
            safe_radius: 1,
            seed: Some(seed),
        };
        let mut rng = BoardRng::new(config.seed);
        let mut board = Board::random(&config, &mut rng).unwrap();
        open_start_area(&mut board, start);

        let report = autoplay::run(&mut board, &AutoplayConfig::default());
        prop_assert!(!report.detonated);
        for m in &report.applied {
            prop_assert_eq!(m.action == Action::Flag, board.is_hazard(m.pos));
        }
        if report.cleared {
            prop_assert!(is_solvable(&board, start));
        }
    }
}
