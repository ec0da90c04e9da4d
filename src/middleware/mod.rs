//! Request middleware and extractors

pub mod json;

pub use json::ValidatedJson;
