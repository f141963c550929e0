//! # Bellman MDP - Grid-World Model
//!
//! This crate describes a finite, deterministic grid-world Markov Decision
//! Process as independent, swappable pieces:
//!
//! - [`space::GridSpace`]: the state space and the id ↔ coordinate bijection
//! - [`action::ActionSet`]: the moves and their selection probabilities `π(a|s)`
//! - [`reward::RewardFn`]: `R(s, a, s')`
//! - [`transition::Dynamics`]: `(State, Move) → (State', Reward)`
//!
//! ## Example
//!
//! ```rust
//! use bellman_mdp::{ActionSet, Dynamics, GridWorld};
//!
//! let world = GridWorld::new(4).unwrap();
//! let actions = ActionSet::four_way();
//!
//! // Expected one-step reward from state 5 under the uniform policy
//! let expected: f64 = actions
//!     .iter()
//!     .map(|(m, p)| p * world.step(5, m).unwrap().reward)
//!     .sum();
//! assert_eq!(expected, -1.0);
//! ```
//!
//! ## Boundary Policy
//!
//! A move that would leave the grid leaves the agent where it is:
//!
//! ```text
//!   ┌───┬───┐
//!   │ ● │   │   up from (0,0)   → (0,0)
//!   ├───┼───┤   left from (0,0) → (0,0)
//!   │   │   │   right from (0,0) → (0,1)
//!   └───┴───┘
//! ```

pub mod action;
mod error;
pub mod reward;
pub mod space;
pub mod transition;

pub use action::{ActionSet, Move};
pub use error::MdpError;
pub use reward::{ConstantReward, RewardFn};
pub use space::{GridSpace, Pos, StateId};
pub use transition::{Dynamics, GridWorld, Transition};
