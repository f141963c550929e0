//! Property-based tests for the value-iteration engine.

use proptest::prelude::*;

use bellman_mdp::{ActionSet, GridWorld};
use bellman_solver::{SolverConfig, ValueIteration};

/// Strategy: a small discounted grid with an arbitrary set of terminal states.
fn discounted_config() -> impl Strategy<Value = SolverConfig> {
    (1usize..=5, 0.0f64..0.95, 1e-8f64..1e-3)
        .prop_flat_map(|(n, discount, tolerance)| {
            let terminals = prop::collection::vec(0..n * n, 0..3);
            (Just(n), Just(discount), Just(tolerance), terminals)
        })
        .prop_map(|(grid_size, discount, tolerance, terminals)| SolverConfig {
            grid_size,
            discount,
            tolerance,
            terminal_states: Some(terminals),
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // 1. Terminal states end at exactly zero
    #[test]
    fn terminals_pinned(config in discounted_config()) {
        let solution = bellman_solver::evaluate(&config).unwrap();
        for s in config.terminal_states() {
            prop_assert_eq!(solution.values[s], 0.0);
        }
    }

    // 2. Values stay within [-1/(1-γ), 0] when every step costs 1
    #[test]
    fn values_bounded(config in discounted_config()) {
        let solution = bellman_solver::evaluate(&config).unwrap();
        let floor = -1.0 / (1.0 - config.discount) - 1e-9;
        for &v in solution.values.as_slice() {
            prop_assert!(v <= 0.0 && v >= floor, "value {} outside [{}, 0]", v, floor);
        }
    }

    // 3. One more sweep on the result changes nothing by θ or more
    #[test]
    fn converged_is_near_fixed_point(config in discounted_config()) {
        let engine = ValueIteration::from_config(&config).unwrap();
        let solution = engine.run().unwrap();
        let current = solution.values.as_slice();
        let mut next = vec![0.0; current.len()];
        let delta = engine.sweep(current, &mut next).unwrap();
        prop_assert!(delta < config.tolerance);
    }

    // 4. Discounted deltas never grow
    #[test]
    fn discounted_deltas_non_increasing(config in discounted_config()) {
        let solution = bellman_solver::evaluate(&config).unwrap();
        for pair in solution.deltas.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
    }

    // 5. Parallel sweeps match sequential ones exactly
    #[test]
    fn parallel_matches_sequential(n in 1usize..=6) {
        let world = GridWorld::new(n).unwrap();
        let engine = ValueIteration::new(&world, ActionSet::four_way())
            .with_terminal_states([n * n - 1]);
        let a = engine.clone().run().unwrap();
        let b = engine.parallel(true).run().unwrap();
        prop_assert_eq!(a.values, b.values);
    }
}
