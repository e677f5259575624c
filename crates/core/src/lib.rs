#![forbid(unsafe_code)]

pub mod info;
pub mod math;
pub mod problem;
pub mod settings;
pub mod solution;
pub mod state;
pub mod traits;

pub use info::*;
pub use math::*;
pub use problem::*;
pub use settings::*;
pub use solution::*;
pub use state::*;
pub use traits::*;
