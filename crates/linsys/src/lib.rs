#![forbid(unsafe_code)]

pub mod kkt;

pub use kkt::DenseKkt;
