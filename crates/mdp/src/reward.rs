//! Rewards paid on every transition.

use crate::action::Move;
use crate::space::StateId;

/// A reward function `R(s, a, s')`.
///
/// Closures with the matching signature are reward functions too:
///
/// ```rust
/// use bellman_mdp::action::Move;
/// use bellman_mdp::reward::RewardFn;
///
/// let bump = |s: usize, _a: &Move, next: usize| if s == next { -2.0 } else { -1.0 };
/// assert_eq!(bump.reward(0, &Move::UP, 0), -2.0);
/// ```
pub trait RewardFn {
    fn reward(&self, state: StateId, action: &Move, next_state: StateId) -> f64;
}

/// The same reward for every transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantReward(pub f64);

impl Default for ConstantReward {
    fn default() -> Self {
        ConstantReward(-1.0)
    }
}

impl RewardFn for ConstantReward {
    fn reward(&self, _state: StateId, _action: &Move, _next_state: StateId) -> f64 {
        self.0
    }
}

impl<F> RewardFn for F
where
    F: Fn(StateId, &Move, StateId) -> f64,
{
    fn reward(&self, state: StateId, action: &Move, next_state: StateId) -> f64 {
        self(state, action, next_state)
    }
}
