//! Integration tests for the Jungle rules engine
//!
//! Tests the full stack: setup, move generation, captures and win detection

use jungle_core::{
    board::{Board, Pos, Terrain},
    game::{GameState, Move, Player},
    GameError, Placement, Setup,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn p(col: i8, row: i8) -> Pos {
    Pos::new(col, row)
}

fn play(game: &mut GameState, moves: &[&str]) {
    for (i, raw) in moves.iter().enumerate() {
        let mv: Move = raw.parse().unwrap();
        assert_eq!(game.winner(), None, "game ended before move {} ({})", i + 1, raw);
        game.apply_move(mv.from, mv.to)
            .unwrap_or_else(|e| panic!("move {} ({}) rejected: {}", i + 1, raw, e));
    }
}

/// Every stored position matches its cell and no piece sits in its own den
fn assert_consistent(game: &GameState) {
    let board = game.board();
    let mut seen = Vec::new();
    for piece in game.pieces() {
        assert_eq!(game.piece_at(piece.pos), Some(piece));
        assert!(board.contains(piece.pos));
        assert_ne!(board.get(piece.pos), Some(Terrain::Den(piece.owner)));
        assert!(!seen.contains(&piece.pos));
        seen.push(piece.pos);
    }
}

// ============================================================================
// BOARD TESTS
// ============================================================================

#[test]
fn test_contains_boundaries() {
    let game = GameState::standard();
    assert!(game.contains(p(0, 0)));
    assert!(game.contains(p(1, 1)));
    assert!(game.contains(p(6, 8)));

    assert!(!game.contains(p(-1, 0)));
    assert!(!game.contains(p(1, -1)));
    assert!(!game.contains(p(7, 7)));
    assert!(!game.contains(p(6, 9)));
}

#[test]
fn test_terrain_queries() {
    let game = GameState::standard();
    assert_eq!(game.terrain_at(p(3, 0)), Ok(Terrain::Den(Player::Black)));
    assert_eq!(game.is_wet(p(4, 5)), Ok(true));
    assert_eq!(game.is_wet(p(3, 5)), Ok(false));
    assert_eq!(game.terrain_at(p(0, 9)), Err(GameError::OutOfBounds(p(0, 9))));
}

// ============================================================================
// GAME LOGIC TESTS
// ============================================================================

#[test]
fn test_apply_move_is_relocation() {
    let mut game = GameState::standard();
    let before = *game.piece_at(p(0, 8)).unwrap();
    game.apply_move(p(0, 8), p(0, 7)).unwrap();

    assert!(game.piece_at(p(0, 8)).is_none());
    let after = game.piece_at(p(0, 7)).unwrap();
    assert_eq!(after.rank, before.rank);
    assert_eq!(after.owner, before.owner);
    assert_eq!(after.pos, p(0, 7));
    assert_eq!(game.current_player(), before.owner.opponent());
}

#[test]
fn test_jump_blocked_in_channel() {
    // Lion on the north bank, Black rat in the middle of the three-cell channel
    let mut game = GameState::new(&[(7, p(1, 2)), (3, p(6, 8))], &[(1, p(1, 4)), (2, p(6, 0))], Player::White).unwrap();
    assert!(!game.legal_destinations(p(1, 2)).contains(&p(1, 6)));

    // White steps aside, the rat swims out of the way
    game.apply_move(p(6, 8), p(5, 8)).unwrap();
    game.apply_move(p(1, 4), p(0, 4)).unwrap();
    assert!(game.legal_destinations(p(1, 2)).contains(&p(1, 6)));
}

#[test]
fn test_rat_and_elephant() {
    let mut game = GameState::new(&[(1, p(3, 4)), (4, p(6, 8))], &[(8, p(3, 3)), (2, p(6, 0))], Player::White).unwrap();
    let captured = game.apply_move(p(3, 4), p(3, 3)).unwrap();
    assert_eq!(captured.map(|c| c.name()), Some("Elephant"));
    assert_eq!(game.piece_at(p(3, 3)).map(|r| r.name()), Some("Rat"));
}

#[test]
fn test_trapped_piece_falls_to_anyone() {
    let mut game = GameState::new(&[(2, p(3, 6)), (4, p(6, 8))], &[(8, p(3, 7)), (2, p(6, 0))], Player::White).unwrap();
    let captured = game.apply_move(p(3, 6), p(3, 7)).unwrap();
    assert_eq!(captured.map(|c| c.rank), Some(8));
}

#[test]
fn test_illegal_moves_leave_state_untouched() {
    let mut game = GameState::standard();
    let before = game.to_string();

    // Leopard cannot walk into the water
    assert!(matches!(
        game.apply_move(p(4, 6), p(4, 5)),
        Err(GameError::IllegalMove { .. })
    ));
    // Black may not move out of turn
    assert!(matches!(
        game.apply_move(p(6, 2), p(6, 3)),
        Err(GameError::WrongTurn { .. })
    ));
    assert_eq!(game.to_string(), before);
    assert_eq!(game.current_player(), Player::White);
}

// ============================================================================
// END-TO-END SCENARIOS
// ============================================================================

#[test]
fn test_rat_reaches_black_den() {
    let mut game = GameState::standard();
    play(
        &mut game,
        &[
            "6,6-6,5", "0,0-0,1", // rat to the bank
            "6,5-5,5", "0,1-0,0", // into the water
            "5,5-5,4", "0,0-0,1",
            "5,4-5,3", "5,1-5,0", // Black's cat clears the way
            "5,3-5,2", "0,1-0,0", // out onto Black's side
            "5,2-5,1", "0,0-0,1",
            "5,1-4,1", "0,1-0,0",
            "4,1-3,1", "0,0-0,1", // onto the trap before the den
        ],
    );
    assert!(game.is_wet(p(5, 4)).unwrap());
    assert_eq!(game.winner(), None);

    game.apply_move(p(3, 1), p(3, 0)).unwrap();
    assert_eq!(game.winner(), Some(Player::White));
    assert!(matches!(game.apply_move(p(0, 1), p(0, 0)), Err(GameError::GameOver(Player::White))));
}

#[test]
fn test_stalemate_from_setup() {
    let setup = Setup {
        name: "cornered".to_string(),
        first_player: Player::White,
        white: vec![Placement::new(2, 0, 8)],
        black: vec![Placement::new(8, 1, 8), Placement::new(7, 0, 7)],
    };
    let game = setup.to_game_state().unwrap();
    assert!(game.active_pieces().is_empty());
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.winner(), Some(Player::Black));
}

#[test]
fn test_setup_json_file() {
    let json = r#"{
        "name": "duel",
        "first_player": "Black",
        "white": [{"rank": 1, "pos": {"col": 3, "row": 4}}],
        "black": [{"rank": 8, "pos": {"col": 3, "row": 3}}]
    }"#;
    let setup = Setup::from_json(json).unwrap();
    let game = setup.to_game_state().unwrap();
    assert_eq!(game.current_player(), Player::Black);
    assert!(game.legal_destinations(p(3, 3)).contains(&p(3, 4)));
}

// ============================================================================
// RANDOMIZED PLAYOUTS
// ============================================================================

#[test]
fn test_random_playouts_keep_invariants() {
    for seed in 0..20u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = GameState::standard();

        for _ in 0..300 {
            assert_consistent(&game);
            if game.winner().is_some() {
                break;
            }

            let moves = game.legal_moves();
            assert!(!moves.is_empty(), "side to move has moves when no winner");
            let mover = game.current_player();
            let count = game.pieces().count();

            let mv = *moves.choose(&mut rng).unwrap();
            let captured = game.apply_move(mv.from, mv.to).unwrap();

            assert_eq!(game.current_player(), mover.opponent());
            assert_eq!(game.piece_at(mv.to).map(|p| p.owner), Some(mover));
            assert!(game.piece_at(mv.from).is_none());
            let expected = if captured.is_some() { count - 1 } else { count };
            assert_eq!(game.pieces().count(), expected);
            if let Some(victim) = captured {
                assert_eq!(victim.owner, mover.opponent());
            }
        }
    }
}

#[test]
fn test_random_positions_never_enter_own_den() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let cells: Vec<Pos> = Board::positions().collect();

    for _ in 0..200 {
        let mut picks = cells.clone();
        picks.shuffle(&mut rng);
        let white: Vec<(u8, Pos)> = (1..=8).zip(picks[..8].iter().copied()).collect();
        let black: Vec<(u8, Pos)> = (1..=8).zip(picks[8..16].iter().copied()).collect();

        for first in [Player::White, Player::Black] {
            // Cells are distinct and ranks valid, so only a den placement is refused
            let Ok(game) = GameState::new(&white, &black, first) else {
                let board = Board::standard();
                assert!(
                    white.iter().any(|&(_, pos)| pos == board.den(Player::White))
                        || black.iter().any(|&(_, pos)| pos == board.den(Player::Black))
                );
                continue;
            };
            let den = game.board().den(first);
            for mv in game.legal_moves() {
                assert_ne!(mv.to, den);
                assert_ne!(game.piece_at(mv.to).map(|p| p.owner), Some(first));
            }
        }
    }
}
