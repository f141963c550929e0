//! Property-based tests for the grid-world model.

use proptest::prelude::*;

use bellman_mdp::{ActionSet, Dynamics, GridSpace, GridWorld, Move, Pos};

/// Strategy: a grid size together with a valid state id on that grid.
fn grid_and_state() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=32).prop_flat_map(|n| (Just(n), 0..n * n))
}

/// Strategy: an arbitrary move with a small delta.
fn any_move() -> impl Strategy<Value = Move> {
    (-3i64..=3, -3i64..=3).prop_map(|(dr, dc)| Move::new("m", dr, dc))
}

proptest! {
    // 1. state_to_pos and pos_to_state are inverse
    #[test]
    fn state_pos_roundtrip((n, s) in grid_and_state()) {
        let space = GridSpace::new(n).unwrap();
        let pos = space.state_to_pos(s).unwrap();
        prop_assert!(pos.row < n && pos.col < n);
        prop_assert_eq!(space.pos_to_state(pos).unwrap(), s);
    }

    // 2. pos_to_state is row * n + col inside the grid
    #[test]
    fn pos_to_state_matches_row_major(n in 1usize..=32, r in 0usize..32, c in 0usize..32) {
        prop_assume!(r < n && c < n);
        let space = GridSpace::new(n).unwrap();
        prop_assert_eq!(space.pos_to_state(Pos::new(r, c)).unwrap(), r * n + c);
    }

    // 3. Ids at or beyond num_states are rejected
    #[test]
    fn out_of_range_rejected(n in 1usize..=32, extra in 0usize..100) {
        let space = GridSpace::new(n).unwrap();
        prop_assert!(space.state_to_pos(n * n + extra).is_err());
    }

    // 4. step never leaves the state space
    #[test]
    fn step_stays_in_space((n, s) in grid_and_state(), m in any_move()) {
        let world = GridWorld::new(n).unwrap();
        let t = world.step(s, &m).unwrap();
        prop_assert!(t.next_state < world.num_states());
    }

    // 5. An off-grid target is a self-transition; an in-grid target is exact
    #[test]
    fn step_applies_delta_or_stays((n, s) in grid_and_state(), m in any_move()) {
        let world = GridWorld::new(n).unwrap();
        let space = world.space();
        let pos = space.state_to_pos(s).unwrap();
        let row = pos.row as i64 + m.d_row;
        let col = pos.col as i64 + m.d_col;
        let t = world.step(s, &m).unwrap();
        if space.contains(row, col) {
            prop_assert_eq!(t.next_state, (row as usize) * n + col as usize);
        } else {
            prop_assert_eq!(t.next_state, s);
        }
    }

    // 6. Uniform action sets are always normalized
    #[test]
    fn uniform_sets_are_valid(k in 1usize..64) {
        let moves: Vec<Move> = (0..k).map(|i| Move::new(format!("m{i}"), 0, 0)).collect();
        let set = ActionSet::uniform(moves).unwrap();
        let sum: f64 = set.iter().map(|(_, p)| p).sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
    }
}

#[test]
fn corner_up_and_left_self_transition() {
    let world = GridWorld::new(4).unwrap();
    for m in [Move::UP, Move::LEFT] {
        let t = world.step(0, &m).unwrap();
        assert_eq!(t.next_state, 0);
        assert_eq!(world.space().state_to_pos(t.next_state).unwrap(), Pos::new(0, 0));
    }
}
