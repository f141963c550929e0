//! Value mappings: one real number per state.

use serde::{Deserialize, Serialize};

use bellman_mdp::StateId;

/// A dense value function indexed by linear state id.
///
/// # Example
///
/// ```rust
/// use bellman_solver::ValueMapping;
///
/// let v = ValueMapping::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(v.get(2), Some(3.0));
/// assert_eq!(v.reshape(2), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMapping {
    values: Vec<f64>,
}

impl ValueMapping {
    /// All-zero mapping over `num_states` states.
    pub fn zeros(num_states: usize) -> Self {
        Self {
            values: vec![0.0; num_states],
        }
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn get(&self, state: StateId) -> Option<f64> {
        self.values.get(state).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Sup-norm distance `max_s |self[s] - other[s]|`.
    ///
    /// Mappings of different lengths are compared over the shorter one.
    pub fn max_abs_diff(&self, other: &ValueMapping) -> f64 {
        self.values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Row-major reshape into rows of `cols` values (the last row may be
    /// short). Returns no rows when `cols` is zero.
    pub fn reshape(&self, cols: usize) -> Vec<Vec<f64>> {
        if cols == 0 {
            return Vec::new();
        }
        self.values.chunks(cols).map(<[f64]>::to_vec).collect()
    }
}

impl std::ops::Index<StateId> for ValueMapping {
    type Output = f64;

    fn index(&self, state: StateId) -> &f64 {
        &self.values[state]
    }
}

impl From<Vec<f64>> for ValueMapping {
    fn from(values: Vec<f64>) -> Self {
        Self::from_vec(values)
    }
}
