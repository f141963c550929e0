//! Moves and the action-selection distribution of the evaluated policy.
//!
//! A [`Move`] is a symbolic action with a deterministic coordinate delta.
//! An [`ActionSet`] pairs every move with its selection probability
//! `π(a|s)`, which is the same in every state.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::MdpError;

/// Tolerance for the sum of action probabilities.
pub const PROB_TOLERANCE: f64 = 1e-9;

/// A symbolic move with a `(Δrow, Δcol)` delta.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub name: Cow<'static, str>,
    pub d_row: i64,
    pub d_col: i64,
}

impl Move {
    pub const UP: Move = Move::named("up", -1, 0);
    pub const DOWN: Move = Move::named("down", 1, 0);
    pub const LEFT: Move = Move::named("left", 0, -1);
    pub const RIGHT: Move = Move::named("right", 0, 1);

    const fn named(name: &'static str, d_row: i64, d_col: i64) -> Self {
        Self {
            name: Cow::Borrowed(name),
            d_row,
            d_col,
        }
    }

    /// Create a move with an arbitrary name and delta.
    pub fn new(name: impl Into<String>, d_row: i64, d_col: i64) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            d_row,
            d_col,
        }
    }
}

/// One entry of an [`ActionSet`] as it appears in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedMove {
    #[serde(rename = "move")]
    pub action: Move,
    pub probability: f64,
}

/// The moves available in every state, with their selection probabilities.
///
/// Invariants:
/// - At least one move
/// - All probabilities are non-negative
/// - Probabilities sum to 1 (within [`PROB_TOLERANCE`])
///
/// # Example
///
/// ```rust
/// use bellman_mdp::action::{ActionSet, Move};
///
/// let actions = ActionSet::four_way();
/// assert_eq!(actions.len(), 4);
///
/// let biased = ActionSet::new(vec![(Move::UP, 0.7), (Move::DOWN, 0.3)]).unwrap();
/// assert_eq!(biased.probability(0), Some(0.7));
/// assert_eq!(biased.probability(2), None);
///
/// assert!(ActionSet::new(vec![(Move::UP, 0.5)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WeightedMove>", into = "Vec<WeightedMove>")]
pub struct ActionSet {
    moves: Vec<Move>,
    probs: Vec<f64>,
}

impl ActionSet {
    /// Create an action set from `(move, probability)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`MdpError::InvalidConfiguration`] if:
    /// - The set is empty
    /// - Any probability is negative or not finite
    /// - The probabilities don't sum to 1 (within tolerance)
    pub fn new(entries: Vec<(Move, f64)>) -> Result<Self, MdpError> {
        if entries.is_empty() {
            return Err(MdpError::invalid("action set cannot be empty"));
        }

        if let Some((m, p)) = entries.iter().find(|(_, p)| !p.is_finite() || *p < 0.0) {
            return Err(MdpError::invalid(format!(
                "action '{}' has invalid probability {p}",
                m.name
            )));
        }

        let sum: f64 = entries.iter().map(|(_, p)| p).sum();
        if (sum - 1.0).abs() > PROB_TOLERANCE {
            return Err(MdpError::invalid(format!(
                "action probabilities sum to {sum} (expected 1.0)"
            )));
        }

        let (moves, probs) = entries.into_iter().unzip();
        Ok(Self { moves, probs })
    }

    /// Equiprobable selection over the given moves.
    pub fn uniform(moves: Vec<Move>) -> Result<Self, MdpError> {
        if moves.is_empty() {
            return Err(MdpError::invalid("action set cannot be empty"));
        }
        let p = 1.0 / moves.len() as f64;
        let probs = vec![p; moves.len()];
        Ok(Self { moves, probs })
    }

    /// Up, Down, Left, Right, each with probability 0.25.
    pub fn four_way() -> Self {
        Self {
            moves: vec![Move::UP, Move::DOWN, Move::LEFT, Move::RIGHT],
            probs: vec![0.25; 4],
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Always false for a valid set.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Selection probability of the move at `index`.
    pub fn probability(&self, index: usize) -> Option<f64> {
        self.probs.get(index).copied()
    }

    /// `(move, probability)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Move, f64)> + '_ {
        self.moves.iter().zip(self.probs.iter().copied())
    }
}

impl Default for ActionSet {
    fn default() -> Self {
        Self::four_way()
    }
}

impl TryFrom<Vec<WeightedMove>> for ActionSet {
    type Error = MdpError;

    fn try_from(entries: Vec<WeightedMove>) -> Result<Self, Self::Error> {
        ActionSet::new(
            entries
                .into_iter()
                .map(|w| (w.action, w.probability))
                .collect(),
        )
    }
}

impl From<ActionSet> for Vec<WeightedMove> {
    fn from(set: ActionSet) -> Self {
        set.moves
            .into_iter()
            .zip(set.probs)
            .map(|(action, probability)| WeightedMove {
                action,
                probability,
            })
            .collect()
    }
}
