//! Data models

pub mod salary;
pub mod prediction;

pub use salary::*;
pub use prediction::*;
