//! Feature Normalizer
//!
//! Turns the HTTP record into the column layout the preprocessor was fitted
//! on: `Field` becomes `EducationField` and the `Education` label becomes its
//! ordinal rank.

use crate::models::SalaryInput;
use super::frame::{Cell, FeatureFrame};

/// Ordinal scale used at training time
const EDUCATION_LEVELS: [(&str, f64); 5] = [
    ("Below College", 1.0),
    ("College", 2.0),
    ("Bachelor", 3.0),
    ("Master", 4.0),
    ("Doctor", 5.0),
];

/// Rank of a known education label
pub fn education_rank(label: &str) -> Option<f64> {
    EDUCATION_LEVELS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, rank)| *rank)
}

/// Build the preprocessor input frame. Unknown education labels are kept as text.
pub fn normalize(input: &SalaryInput) -> FeatureFrame {
    let mut frame = input.to_frame();
    frame.rename("Field", "EducationField");

    let education = match education_rank(&input.education) {
        Some(rank) => Cell::Number(rank),
        None => Cell::text(input.education.as_str()),
    };
    frame.insert("Education", education);

    frame
}
