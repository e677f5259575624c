use crate::math::{dot, RealNumber};
use serde::{Deserialize, Serialize};
use sprs::CsMat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("invalid structure: {0}")]
    InvalidStructure(String),
}

pub type ProblemResult<T> = Result<T, ProblemError>;

/// Compressed sparse column matrix, stored with full (not triangular) data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CscMatrix<T> {
    pub nrows: usize,
    pub ncols: usize,
    pub indptr: Vec<usize>,
    pub indices: Vec<usize>,
    pub data: Vec<T>,
}

impl<T> CscMatrix<T>
where
    T: RealNumber,
{
    pub fn empty() -> Self {
        Self {
            nrows: 0,
            ncols: 0,
            indptr: vec![0],
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn identity(n: usize, value: T) -> Self {
        let mut indptr = Vec::with_capacity(n + 1);
        let mut indices = Vec::with_capacity(n);
        let mut data = Vec::with_capacity(n);
        indptr.push(0);
        for idx in 0..n {
            indices.push(idx);
            data.push(value);
            indptr.push(indices.len());
        }
        Self {
            nrows: n,
            ncols: n,
            indptr,
            indices,
            data,
        }
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn validate(&self) -> ProblemResult<()> {
        if self.indptr.len() != self.ncols + 1 {
            return Err(ProblemError::DimensionMismatch(format!(
                "indptr length {} != ncols + 1 ({})",
                self.indptr.len(),
                self.ncols + 1
            )));
        }
        if self.indices.len() != self.data.len() {
            return Err(ProblemError::DimensionMismatch(format!(
                "indices length {} != data length {}",
                self.indices.len(),
                self.data.len()
            )));
        }
        if let Some(row) = self.indices.iter().find(|row| **row >= self.nrows) {
            return Err(ProblemError::InvalidStructure(format!(
                "row index {row} out of range for {} rows",
                self.nrows
            )));
        }
        Ok(())
    }

    pub fn to_csmat(&self) -> ProblemResult<CsMat<T>> {
        self.validate()?;
        Ok(CsMat::new_csc(
            (self.nrows, self.ncols),
            self.indptr.clone(),
            self.indices.clone(),
            self.data.clone(),
        ))
    }

    /// y = M x
    pub fn mat_vec(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.ncols, "mat_vec input dimension mismatch");
        assert_eq!(y.len(), self.nrows, "mat_vec output dimension mismatch");
        for entry in y.iter_mut() {
            *entry = T::zero();
        }
        for col in 0..self.ncols {
            let start = self.indptr[col];
            let end = self.indptr[col + 1];
            for idx in start..end {
                y[self.indices[idx]] += self.data[idx] * x[col];
            }
        }
    }

    /// (1/2) xᵀ M x for a square symmetric matrix.
    pub fn quad_form(&self, x: &[T]) -> T {
        assert_eq!(self.nrows, self.ncols, "quad_form requires a square matrix");
        let mut mx = vec![T::zero(); self.nrows];
        self.mat_vec(x, &mut mx);
        T::from_f64(0.5).unwrap() * dot(x, &mx)
    }
}

/// Immutable description of the box-constrained QP
///
///   minimize  (1/2) xᵀ P x + qᵀ x
///   s.t.      lx <= x <= ux,  la <= A x <= ua.
///
/// The iteration kernel reads only `p`, `q` and the bounds; `a` is consumed
/// by the linear-system collaborator that assembles the KKT system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemData<T> {
    pub p: CscMatrix<T>,
    pub q: Vec<T>,
    pub a: CscMatrix<T>,
    pub lx: Vec<T>,
    pub ux: Vec<T>,
    pub la: Vec<T>,
    pub ua: Vec<T>,
}

impl<T> ProblemData<T>
where
    T: RealNumber,
{
    /// Number of primal variables n.
    pub fn nvars(&self) -> usize {
        self.q.len()
    }

    /// Number of constraint rows m.
    pub fn nconstr(&self) -> usize {
        self.a.nrows
    }

    pub fn validate(&self) -> ProblemResult<()> {
        let n = self.nvars();
        let m = self.nconstr();
        self.p.validate()?;
        if self.p.nrows != n || self.p.ncols != n {
            return Err(ProblemError::DimensionMismatch(format!(
                "quadratic matrix must be square and match variable dimension {n}"
            )));
        }
        self.a.validate()?;
        if self.a.ncols != n {
            return Err(ProblemError::DimensionMismatch(format!(
                "constraint matrix columns {} != nvars {n}",
                self.a.ncols
            )));
        }
        validate_bounds(&self.lx, &self.ux, n, "variable")?;
        validate_bounds(&self.la, &self.ua, m, "constraint")?;
        Ok(())
    }
}

fn validate_bounds<T: RealNumber>(
    lower: &[T],
    upper: &[T],
    dim: usize,
    which: &str,
) -> ProblemResult<()> {
    if lower.len() != dim || upper.len() != dim {
        return Err(ProblemError::DimensionMismatch(format!(
            "{which} bounds lengths {}/{} != dimension {dim}",
            lower.len(),
            upper.len()
        )));
    }
    for (i, (lo, hi)) in lower.iter().zip(upper.iter()).enumerate() {
        if lo > hi {
            return Err(ProblemError::InvalidStructure(format!(
                "{which} lower bound exceeds upper bound at index {i}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Scalar;

    fn small_problem() -> ProblemData<Scalar> {
        ProblemData {
            p: CscMatrix::identity(2, 1.0),
            q: vec![1.0, -1.0],
            a: CscMatrix::identity(2, 1.0),
            lx: vec![0.0, 0.0],
            ux: vec![1.0, 1.0],
            la: vec![0.0, 0.0],
            ua: vec![1.0, 1.0],
        }
    }

    #[test]
    fn validation_passes() {
        assert!(small_problem().validate().is_ok());
    }

    #[test]
    fn detects_inverted_bounds() {
        let mut problem = small_problem();
        problem.lx[1] = 2.0;
        assert!(problem.validate().is_err());
    }

    #[test]
    fn detects_dimension_mismatch() {
        let mut problem = small_problem();
        problem.q.push(0.0);
        assert!(problem.validate().is_err());
    }

    #[test]
    fn mat_vec_and_quad_form() {
        let m = CscMatrix::identity(2, 4.0);
        let x = [3.0 as Scalar, 4.0];
        let mut y = [0.0; 2];
        m.mat_vec(&x, &mut y);
        assert_eq!(y, [12.0, 16.0]);
        // (1/2) xᵀ (4I) x = 2 * 25
        assert!((m.quad_form(&x) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn csmat_conversion() {
        let m = CscMatrix::identity(3, 2.0);
        let cs = m.to_csmat().unwrap();
        assert_eq!(cs.shape(), (3, 3));
        assert_eq!(cs.nnz(), 3);
    }
}
