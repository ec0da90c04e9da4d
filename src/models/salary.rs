//! Salary prediction request model

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

use crate::features::{Cell, FeatureFrame};

/// Employee record accepted by `POST /predict/salary`
///
/// Every field is required; serde rejects missing, null or mistyped values
/// before a handler runs. Numeric fields also take numeric strings, which is
/// what HTML form clients post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SalaryInput {
    #[serde(deserialize_with = "number")]
    pub age: f64,
    pub gender: String,
    pub education: String,
    pub field: String,
    pub department: String,
    pub job_role: String,
    #[serde(deserialize_with = "number")]
    pub job_level: f64,
    #[serde(deserialize_with = "number")]
    pub years_at_company: f64,
    #[serde(deserialize_with = "number")]
    pub total_working_years: f64,
    #[serde(deserialize_with = "number")]
    pub years_in_current_role: f64,
    #[serde(deserialize_with = "number")]
    pub years_since_last_promotion: f64,
    #[serde(deserialize_with = "number")]
    pub years_with_curr_manager: f64,
    #[serde(deserialize_with = "number")]
    pub distance_from_home: f64,
    #[serde(deserialize_with = "number")]
    pub percent_salary_hike: f64,
    #[serde(deserialize_with = "number")]
    pub performance_rating: f64,
}

/// A JSON number, or a string that parses as one
fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Cell::deserialize(deserializer)? {
        Cell::Number(v) => Ok(v),
        Cell::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&s), &"a number")),
    }
}

impl SalaryInput {
    /// Raw frame in wire order, column names as sent by the client
    pub fn to_frame(&self) -> FeatureFrame {
        FeatureFrame::new()
            .with("Age", self.age)
            .with("Gender", self.gender.clone())
            .with("Education", self.education.clone())
            .with("Field", self.field.clone())
            .with("Department", self.department.clone())
            .with("JobRole", self.job_role.clone())
            .with("JobLevel", self.job_level)
            .with("YearsAtCompany", self.years_at_company)
            .with("TotalWorkingYears", self.total_working_years)
            .with("YearsInCurrentRole", self.years_in_current_role)
            .with("YearsSinceLastPromotion", self.years_since_last_promotion)
            .with("YearsWithCurrManager", self.years_with_curr_manager)
            .with("DistanceFromHome", self.distance_from_home)
            .with("PercentSalaryHike", self.percent_salary_hike)
            .with("PerformanceRating", self.performance_rating)
    }
}

/// Record used throughout the tests
#[cfg(test)]
pub fn sample_input() -> SalaryInput {
    SalaryInput {
        age: 30.0,
        gender: "Male".to_string(),
        education: "Bachelor".to_string(),
        field: "Life Sciences".to_string(),
        department: "R&D".to_string(),
        job_role: "Research Scientist".to_string(),
        job_level: 2.0,
        years_at_company: 5.0,
        total_working_years: 8.0,
        years_in_current_role: 3.0,
        years_since_last_promotion: 1.0,
        years_with_curr_manager: 3.0,
        distance_from_home: 10.0,
        percent_salary_hike: 12.0,
        performance_rating: 3.0,
    }
}
