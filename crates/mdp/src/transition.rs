//! Transition dynamics: `(State, Move) → (State', Reward)`.
//!
//! [`Dynamics`] is the seam between the model and the solver. The solver
//! only ever asks "what state and reward result from this move?", so any
//! deterministic finite MDP can be plugged in.
//!
//! ```text
//!         ┌──────────────┐
//!  Move ─▶│              │─▶ next_state
//!         │   Dynamics   │
//! State ─▶│              │─▶ reward
//!         └──────────────┘
//! ```

use crate::action::Move;
use crate::reward::{ConstantReward, RewardFn};
use crate::space::{GridSpace, Pos, StateId};
use crate::MdpError;

/// Result of applying one move from one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// State after the move
    pub next_state: StateId,
    /// Reward received
    pub reward: f64,
}

/// Deterministic world dynamics over a finite state space.
pub trait Dynamics {
    /// Number of states; valid ids are `0..num_states()`.
    fn num_states(&self) -> usize;

    /// Apply `action` in `state`.
    fn step(&self, state: StateId, action: &Move) -> Result<Transition, MdpError>;
}

impl<D: Dynamics + ?Sized> Dynamics for &D {
    fn num_states(&self) -> usize {
        (**self).num_states()
    }

    fn step(&self, state: StateId, action: &Move) -> Result<Transition, MdpError> {
        (**self).step(state, action)
    }
}

// ============================================================================
// Grid World
// ============================================================================

/// A square grid world.
///
/// Moves that would leave the grid are no-ops: the agent stays in place
/// and still collects the reward. Terminal states are not special here;
/// the solver decides which states it updates.
///
/// # Example
///
/// ```rust
/// use bellman_mdp::action::Move;
/// use bellman_mdp::transition::{Dynamics, GridWorld};
///
/// let world = GridWorld::new(4).unwrap();
///
/// // (0, 0) is the top-left corner: moving up stays put.
/// let t = world.step(0, &Move::UP).unwrap();
/// assert_eq!(t.next_state, 0);
/// assert_eq!(t.reward, -1.0);
///
/// let t = world.step(0, &Move::RIGHT).unwrap();
/// assert_eq!(t.next_state, 1);
/// ```
#[derive(Debug, Clone)]
pub struct GridWorld<R = ConstantReward> {
    space: GridSpace,
    reward: R,
}

impl GridWorld {
    /// Create an `size × size` grid world paying `-1` per step.
    pub fn new(size: usize) -> Result<Self, MdpError> {
        Ok(Self {
            space: GridSpace::new(size)?,
            reward: ConstantReward::default(),
        })
    }
}

impl<R: RewardFn> GridWorld<R> {
    /// Replace the reward function.
    pub fn with_reward<R2: RewardFn>(self, reward: R2) -> GridWorld<R2> {
        GridWorld {
            space: self.space,
            reward,
        }
    }

    pub fn space(&self) -> &GridSpace {
        &self.space
    }

    pub fn reward_fn(&self) -> &R {
        &self.reward
    }

    /// Target cell of `action` from `pos`, before the boundary check.
    fn tentative(pos: Pos, action: &Move) -> (i64, i64) {
        (
            (pos.row as i64).saturating_add(action.d_row),
            (pos.col as i64).saturating_add(action.d_col),
        )
    }
}

impl<R: RewardFn> Dynamics for GridWorld<R> {
    fn num_states(&self) -> usize {
        self.space.num_states()
    }

    fn step(&self, state: StateId, action: &Move) -> Result<Transition, MdpError> {
        let pos = self.space.state_to_pos(state)?;
        let (row, col) = Self::tentative(pos, action);

        // Off-grid moves are self-transitions
        let next_state = if self.space.contains(row, col) {
            self.space
                .pos_to_state(Pos::new(row as usize, col as usize))?
        } else {
            state
        };

        Ok(Transition {
            next_state,
            reward: self.reward.reward(state, action, next_state),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_moves() {
        let world = GridWorld::new(4).unwrap();
        // state 5 = (1, 1)
        assert_eq!(world.step(5, &Move::UP).unwrap().next_state, 1);
        assert_eq!(world.step(5, &Move::DOWN).unwrap().next_state, 9);
        assert_eq!(world.step(5, &Move::LEFT).unwrap().next_state, 4);
        assert_eq!(world.step(5, &Move::RIGHT).unwrap().next_state, 6);
    }

    #[test]
    fn test_corner_stays_put() {
        let world = GridWorld::new(4).unwrap();
        assert_eq!(world.step(0, &Move::UP).unwrap().next_state, 0);
        assert_eq!(world.step(0, &Move::LEFT).unwrap().next_state, 0);
        assert_eq!(world.step(15, &Move::DOWN).unwrap().next_state, 15);
        assert_eq!(world.step(15, &Move::RIGHT).unwrap().next_state, 15);
    }

    #[test]
    fn test_no_wrap_on_row_edge() {
        let world = GridWorld::new(4).unwrap();
        // state 3 = (0, 3): right must not wrap to state 4
        assert_eq!(world.step(3, &Move::RIGHT).unwrap().next_state, 3);
        // state 4 = (1, 0): left must not wrap to state 3
        assert_eq!(world.step(4, &Move::LEFT).unwrap().next_state, 4);
    }

    #[test]
    fn test_constant_reward_on_every_edge() {
        let world = GridWorld::new(3).unwrap();
        for s in 0..9 {
            for m in [Move::UP, Move::DOWN, Move::LEFT, Move::RIGHT] {
                assert_eq!(world.step(s, &m).unwrap().reward, -1.0);
            }
        }
    }

    #[test]
    fn test_terminal_not_special() {
        // The bottom-right cell still moves like any other cell.
        let world = GridWorld::new(2).unwrap();
        assert_eq!(world.step(3, &Move::UP).unwrap().next_state, 1);
    }

    #[test]
    fn test_custom_reward_sees_next_state() {
        let world = GridWorld::new(2)
            .unwrap()
            .with_reward(|s: StateId, _a: &Move, next: StateId| if s == next { -5.0 } else { -1.0 });
        assert_eq!(world.step(0, &Move::UP).unwrap().reward, -5.0);
        assert_eq!(world.step(0, &Move::DOWN).unwrap().reward, -1.0);
    }

    #[test]
    fn test_long_jump_move() {
        let world = GridWorld::new(4).unwrap();
        let knight = Move::new("knight", 2, 1);
        assert_eq!(world.step(0, &knight).unwrap().next_state, 9);
        assert_eq!(world.step(12, &knight).unwrap().next_state, 12);
    }

    #[test]
    fn test_out_of_range_state() {
        let world = GridWorld::new(2).unwrap();
        assert!(matches!(
            world.step(4, &Move::UP),
            Err(MdpError::OutOfRange { state: 4, num_states: 4 })
        ));
    }
}
