#![forbid(unsafe_code)]

pub mod iteration;
pub mod solver;

pub use solver::AdmmSolver;
