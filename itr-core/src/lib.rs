pub mod calculations;
pub mod models;

pub use calculations::{ComputeError, compute};
pub use models::*;
