//! Features Module - request record to model input
//!
//! `frame` holds the single-row table handed to the preprocessor,
//! `normalize` builds it from an incoming `SalaryInput`.

pub mod frame;
pub mod normalize;

pub use frame::{Cell, FeatureFrame};
pub use normalize::normalize;
