//! Property tests over boards produced by seeded random walks from the solved board, and over
//! arbitrary permutations, which include unsolvable boards.

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use taquin::{Puzzle, MAX_SIZE};

fn walked(size: u8, steps: usize, seed: u64) -> Puzzle {
    Puzzle::shuffled(size, steps, &mut StdRng::seed_from_u64(seed)).unwrap()
}

/// Any valid board of side 1 to 6, solvable or not.
fn any_board() -> impl Strategy<Value = Puzzle> {
    (1u8..=6).prop_flat_map(|size| {
        let cells = usize::from(size) * usize::from(size);
        Just((0..cells).map(|t| t as u8).collect::<Vec<u8>>())
            .prop_shuffle()
            .prop_map(move |tiles| Puzzle::from_tiles(size, tiles).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_board_display_parses_back(puzzle in any_board()) {
        let reparsed = Puzzle::parse(puzzle.size(), &puzzle.to_string()).unwrap();
        prop_assert_eq!(&reparsed, &puzzle);
        let reparsed: Puzzle = puzzle.to_layout().parse().unwrap();
        prop_assert_eq!(&reparsed, &puzzle);
    }

    #[test]
    fn any_board_has_moves(puzzle in any_board()) {
        let moves = puzzle.available_moves();
        if puzzle.size() == 1 {
            prop_assert!(moves.is_empty());
        } else {
            prop_assert!((2..=4).contains(&moves.len()));
        }
    }

    #[test]
    fn any_board_inverse_move_restores(puzzle in any_board()) {
        for movement in puzzle.available_moves() {
            let there = puzzle.apply_move(movement).unwrap();
            prop_assert_eq!(there.is_solvable(), puzzle.is_solvable());
            let back = there.apply_move(movement.inverse()).unwrap();
            prop_assert_eq!(&back, &puzzle);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn display_parses_back(size in 1u8..=8, steps in 0usize..200, seed in any::<u64>()) {
        let puzzle = walked(size, steps, seed);
        let reparsed = Puzzle::parse(size, &puzzle.to_string()).unwrap();
        prop_assert_eq!(&reparsed, &puzzle);
        prop_assert_eq!(reparsed.to_string(), puzzle.to_string());
    }

    #[test]
    fn layout_parses_back(size in 1u8..=8, steps in 0usize..200, seed in any::<u64>()) {
        let puzzle = walked(size, steps, seed);
        let reparsed: Puzzle = puzzle.to_layout().parse().unwrap();
        prop_assert_eq!(reparsed, puzzle);
    }

    #[test]
    fn moves_exist_on_non_trivial_boards(size in 2u8..=8, steps in 0usize..200, seed in any::<u64>()) {
        let puzzle = walked(size, steps, seed);
        let moves = puzzle.available_moves();
        prop_assert!((2..=4).contains(&moves.len()));
    }

    #[test]
    fn inverse_move_restores_board(size in 2u8..=8, steps in 0usize..200, seed in any::<u64>()) {
        let puzzle = walked(size, steps, seed);
        for movement in puzzle.available_moves() {
            let there = puzzle.apply_move(movement).unwrap();
            prop_assert_ne!(&there, &puzzle);
            let back = there.apply_move(movement.inverse()).unwrap();
            prop_assert_eq!(&back, &puzzle);
        }
    }

    #[test]
    fn shuffled_boards_are_solvable(size in 2u8..=10, steps in 0usize..500, seed in any::<u64>()) {
        prop_assert!(walked(size, steps, seed).is_solvable());
    }

    #[test]
    fn random_permutations_are_solvable(size in 1u8..=6, seed in any::<u64>()) {
        let puzzle = Puzzle::random_solvable(size, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert!(puzzle.is_solvable());

        let mut tiles = puzzle.tiles().to_vec();
        tiles.sort_unstable();
        let cells = usize::from(size) * usize::from(size);
        prop_assert!(tiles.iter().enumerate().all(|(i, &t)| usize::from(t) == i));
        prop_assert_eq!(tiles.len(), cells);
    }
}

#[test]
fn unsolvable_board_round_trips() {
    let puzzle = Puzzle::parse(4, "1,2,3,4,5,6,7,8,9,10,11,12,13,15,14,0").unwrap();
    assert!(!puzzle.is_solvable());
    assert_eq!(Puzzle::parse(4, &puzzle.to_string()).unwrap(), puzzle);
}

#[test]
fn solved_boards_have_no_inversions() {
    for size in 1..=MAX_SIZE {
        let puzzle = Puzzle::new(size).unwrap();
        assert!(puzzle.is_solved(), "size {size}");
        assert!(puzzle.is_solvable(), "size {size}");
        assert_eq!(puzzle.count_inversions(), 0, "size {size}");
    }
}
