use crate::info::{SolveInfo, SolveStats};
use crate::math::RealNumber;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    Optimal,
    MaxIterations,
    MaxTime,
    NumericalFailure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution<T: RealNumber> {
    /// Primal block of the projected iterate, length n.
    pub primal: Vec<T>,
    /// Constraint-row multipliers rho * u over the slack block, length m.
    pub dual: Vec<T>,
    pub status: Status,
    pub objective_value: T,
    pub iterations: usize,
    pub info: SolveInfo<T>,
    pub stats: SolveStats<T>,
}
