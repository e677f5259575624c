use crate::math::RealNumber;
use serde::{Deserialize, Serialize};

/// Mutable per-iteration vectors of the splitting scheme.
///
/// Each vector has length `n + m` and is split by a fixed convention:
/// indices `[0, n)` hold the primal block, indices `[n, n + m)` hold the
/// slack block (one entry per constraint row). The `primal`/`slack`
/// accessors are the only sanctioned way to address the two blocks.
///
/// Allocated once before the first iteration and mutated in place; the
/// driver loop owns it exclusively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationState<T> {
    n: usize,
    m: usize,
    /// Working primal/slack vector; doubles as the RHS buffer for the
    /// linear-system solve.
    pub x: Vec<T>,
    /// Projected (consensus) vector.
    pub z: Vec<T>,
    /// Value of `z` at the end of the previous iteration, captured by
    /// `snapshot_z` before the projection overwrites `z`.
    pub z_prev: Vec<T>,
    /// Scaled dual vector.
    pub u: Vec<T>,
}

impl<T> IterationState<T>
where
    T: RealNumber,
{
    pub fn new(n: usize, m: usize) -> Self {
        let dim = n + m;
        Self {
            n,
            m,
            x: vec![T::zero(); dim],
            z: vec![T::zero(); dim],
            z_prev: vec![T::zero(); dim],
            u: vec![T::zero(); dim],
        }
    }

    pub fn nvars(&self) -> usize {
        self.n
    }

    pub fn nconstr(&self) -> usize {
        self.m
    }

    pub fn dim(&self) -> usize {
        self.n + self.m
    }

    /// Reset x, z, u to the zero vector.
    pub fn cold_start(&mut self) {
        for value in self
            .x
            .iter_mut()
            .chain(self.z.iter_mut())
            .chain(self.u.iter_mut())
        {
            *value = T::zero();
        }
    }

    /// Capture the current z into z_prev. Must run before the projection
    /// step of each iteration; the dual update and the dual residual read
    /// the pre-projection value through z_prev.
    pub fn snapshot_z(&mut self) {
        self.z_prev.copy_from_slice(&self.z);
    }

    /// Primal block of a state-sized vector.
    pub fn primal<'a>(&self, vector: &'a [T]) -> &'a [T] {
        &vector[..self.n]
    }

    /// Slack block of a state-sized vector.
    pub fn slack<'a>(&self, vector: &'a [T]) -> &'a [T] {
        &vector[self.n..]
    }
}

/// Starting point supplied by the caller in place of a cold start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarmStart<T> {
    pub x: Vec<T>,
    pub z: Vec<T>,
    pub u: Vec<T>,
}
