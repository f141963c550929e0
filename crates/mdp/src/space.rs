//! State space: a square grid of cells addressed by a linear id.
//!
//! Ids are row-major, so cell `(row, col)` on an `N × N` grid is state
//! `row * N + col`:
//!
//! ```text
//!   col →   0   1   2   3
//! row 0   [ 0] [ 1] [ 2] [ 3]
//! row 1   [ 4] [ 5] [ 6] [ 7]
//! row 2   [ 8] [ 9] [10] [11]
//! row 3   [12] [13] [14] [15]
//! ```

use serde::{Deserialize, Serialize};

use crate::MdpError;

/// Linear identifier of one grid cell.
pub type StateId = usize;

/// Grid coordinate of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The finite state space of an `N × N` grid.
///
/// # Example
///
/// ```rust
/// use bellman_mdp::space::{GridSpace, Pos};
///
/// let space = GridSpace::new(4).unwrap();
/// assert_eq!(space.num_states(), 16);
/// assert_eq!(space.state_to_pos(6).unwrap(), Pos::new(1, 2));
/// assert_eq!(space.pos_to_state(Pos::new(1, 2)).unwrap(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpace {
    size: usize,
}

impl GridSpace {
    /// Create the state space of a `size × size` grid.
    ///
    /// # Errors
    ///
    /// Returns [`MdpError::InvalidConfiguration`] if `size` is zero or
    /// `size * size` overflows.
    pub fn new(size: usize) -> Result<Self, MdpError> {
        if size == 0 {
            return Err(MdpError::invalid("grid size must be positive"));
        }
        if size.checked_mul(size).is_none() {
            return Err(MdpError::invalid(format!("grid size {size} is too large")));
        }
        Ok(Self { size })
    }

    /// Side length `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of states, `N * N`.
    pub fn num_states(&self) -> usize {
        self.size * self.size
    }

    /// All state ids in ascending order.
    pub fn states(&self) -> std::ops::Range<StateId> {
        0..self.num_states()
    }

    /// Convert a state id to its grid coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`MdpError::OutOfRange`] if `state >= num_states()`.
    pub fn state_to_pos(&self, state: StateId) -> Result<Pos, MdpError> {
        if state >= self.num_states() {
            return Err(MdpError::OutOfRange {
                state,
                num_states: self.num_states(),
            });
        }
        Ok(Pos::new(state / self.size, state % self.size))
    }

    /// Convert an in-grid coordinate back to its state id.
    ///
    /// # Errors
    ///
    /// Returns [`MdpError::OutOfGrid`] if either coordinate is `>= size()`.
    pub fn pos_to_state(&self, pos: Pos) -> Result<StateId, MdpError> {
        if pos.row >= self.size || pos.col >= self.size {
            return Err(MdpError::OutOfGrid {
                row: i64::try_from(pos.row).unwrap_or(i64::MAX),
                col: i64::try_from(pos.col).unwrap_or(i64::MAX),
                size: self.size,
            });
        }
        Ok(pos.row * self.size + pos.col)
    }

    /// Whether a signed (tentative) coordinate lies inside the grid.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        let n = self.size as i64;
        (0..n).contains(&row) && (0..n).contains(&col)
    }
}
