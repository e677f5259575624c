use crate::math::RealNumber;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-iteration snapshot handed to reporting collaborators. Written once
/// per iteration by the info recorder, never read by the numeric core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveInfo<T: RealNumber> {
    pub iterations: usize,
    pub objective: T,
    pub primal_residual: T,
    pub dual_residual: T,
}

impl<T> Default for SolveInfo<T>
where
    T: RealNumber,
{
    fn default() -> Self {
        Self {
            iterations: 0,
            objective: T::zero(),
            primal_residual: T::infinity(),
            dual_residual: T::infinity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord<T: RealNumber> {
    pub iteration: usize,
    pub objective: T,
    pub primal_residual: T,
    pub dual_residual: T,
    pub rho: T,
    pub elapsed: Duration,
}

impl<T> IterationRecord<T>
where
    T: RealNumber,
{
    pub fn new(
        iteration: usize,
        objective: T,
        primal_residual: T,
        dual_residual: T,
        rho: T,
        elapsed: Duration,
    ) -> Self {
        Self {
            iteration,
            objective,
            primal_residual,
            dual_residual,
            rho,
            elapsed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveStats<T: RealNumber> {
    pub history: Vec<IterationRecord<T>>,
    pub solve_time: Duration,
    pub factorizations: usize,
    pub linear_solves: usize,
}

impl<T> SolveStats<T>
where
    T: RealNumber,
{
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            solve_time: Duration::ZERO,
            factorizations: 0,
            linear_solves: 0,
        }
    }

    pub fn push(&mut self, record: IterationRecord<T>) {
        self.history.push(record);
    }
}

impl<T> Default for SolveStats<T>
where
    T: RealNumber,
{
    fn default() -> Self {
        Self::new()
    }
}
