use anyhow::{anyhow, Result};
use splitqp_core::math::RealNumber;
use splitqp_core::problem::ProblemData;
use splitqp_core::traits::KktSolver;
use tracing::debug;

/// Dense LDLᵀ backend for the splitting scheme's KKT system
///
///   [ P + rho I    Aᵀ       ]
///   [ A           -(1/rho) I ]
///
/// of dimension (n + m)². The matrix is quasi-definite for rho > 0 and
/// positive semidefinite P, so the factorization needs no pivoting. Every
/// `factor` call rebuilds and refactors the system, so one backend can be
/// reused across problems; the driver invokes it once per solve.
pub struct DenseKkt<T: RealNumber> {
    dim: usize,
    l: Vec<T>,
    d: Vec<T>,
    factored: bool,
}

impl<T> DenseKkt<T>
where
    T: RealNumber,
{
    pub fn new() -> Self {
        Self {
            dim: 0,
            l: Vec::new(),
            d: Vec::new(),
            factored: false,
        }
    }

    fn epsilon() -> T {
        T::from_f64(1e-12).unwrap()
    }

    fn assemble(problem: &ProblemData<T>, rho: T) -> Result<Vec<T>> {
        let n = problem.nvars();
        let m = problem.nconstr();
        let dim = n + m;
        let mut matrix = vec![T::zero(); dim * dim];

        let p = problem.p.to_csmat()?;
        for (col, column) in p.outer_iterator().enumerate() {
            for (row, value) in column.iter() {
                matrix[row * dim + col] = *value;
            }
        }
        for i in 0..n {
            matrix[i * dim + i] += rho;
        }

        let a = problem.a.to_csmat()?;
        for (col, column) in a.outer_iterator().enumerate() {
            for (row, value) in column.iter() {
                matrix[(n + row) * dim + col] = *value;
                matrix[col * dim + (n + row)] = *value;
            }
        }
        let neg_inv_rho = -rho.recip();
        for i in n..dim {
            matrix[i * dim + i] = neg_inv_rho;
        }
        Ok(matrix)
    }

    fn factorize(&mut self, matrix: &[T]) -> Result<()> {
        let dim = self.dim;
        self.l = vec![T::zero(); dim * dim];
        self.d = vec![T::zero(); dim];
        for i in 0..dim {
            self.l[i * dim + i] = T::one();
        }

        for j in 0..dim {
            let mut d_j = matrix[j * dim + j];
            for k in 0..j {
                let l_jk = self.l[j * dim + k];
                d_j -= l_jk * l_jk * self.d[k];
            }
            if d_j.abs() <= Self::epsilon() {
                let magnitude = d_j.abs().to_f64().unwrap_or(f64::NAN);
                return Err(anyhow!(
                    "near-singular pivot encountered at column {} (|d_j| = {:.3e})",
                    j,
                    magnitude
                ));
            }
            self.d[j] = d_j;

            for i in (j + 1)..dim {
                let mut l_ij = matrix[i * dim + j];
                for k in 0..j {
                    l_ij -= self.l[i * dim + k] * self.l[j * dim + k] * self.d[k];
                }
                self.l[i * dim + j] = l_ij / d_j;
            }
        }
        Ok(())
    }
}

impl<T> Default for DenseKkt<T>
where
    T: RealNumber,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> KktSolver<T> for DenseKkt<T>
where
    T: RealNumber,
{
    fn factor(&mut self, problem: &ProblemData<T>, rho: T) -> Result<()> {
        // Invalidate up front: a failed assembly or factorization must not
        // leave a previous problem's factor answering solves.
        self.factored = false;
        let dim = problem.nvars() + problem.nconstr();
        self.dim = dim;
        let matrix = Self::assemble(problem, rho)?;
        self.factorize(&matrix)?;
        self.factored = true;
        debug!(
            dim,
            rho = rho.to_f64().unwrap_or(f64::NAN),
            "factored KKT system"
        );
        Ok(())
    }

    fn solve(&self, rhs: &mut [T]) -> Result<()> {
        let dim = self.dim;
        if rhs.len() != dim {
            return Err(anyhow!(
                "rhs length {} does not match system dimension {}",
                rhs.len(),
                dim
            ));
        }
        if !self.factored {
            return Err(anyhow!("solve called without a successful factor"));
        }
        for i in 0..dim {
            for j in 0..i {
                let l_ij = self.l[i * dim + j];
                rhs[i] -= l_ij * rhs[j];
            }
        }
        for i in 0..dim {
            rhs[i] = rhs[i] / self.d[i];
        }
        for i in (0..dim).rev() {
            for j in (i + 1)..dim {
                let l_ji = self.l[j * dim + i];
                rhs[i] -= l_ji * rhs[j];
            }
        }
        Ok(())
    }
}
