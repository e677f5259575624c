use crate::math::RealNumber;
use crate::problem::ProblemData;
use anyhow::Result;

/// The linear-system collaborator of the splitting scheme.
///
/// `factor` prepares the KKT-like system for a penalty value; `solve`
/// overwrites a length n + m right-hand side with the solution in place.
/// The factorization algorithm is opaque to the iteration kernel, which
/// only builds the right-hand side and post-processes the returned vector.
pub trait KktSolver<T: RealNumber> {
    fn factor(&mut self, problem: &ProblemData<T>, rho: T) -> Result<()>;

    fn solve(&self, rhs: &mut [T]) -> Result<()>;
}
