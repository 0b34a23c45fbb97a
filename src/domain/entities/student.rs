use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{
    entities::person::{PersonDetails, PersonId},
    errors::AppError,
};

/// Performance tier derived from a student's GPA.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GpaStatus {
    Poor,
    Average,
    Good,
    VeryGood,
    Excellent,
}

impl GpaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GpaStatus::Poor => "Poor",
            GpaStatus::Average => "Average",
            GpaStatus::Good => "Good",
            GpaStatus::VeryGood => "VeryGood",
            GpaStatus::Excellent => "Excellent",
        }
    }
}

impl FromStr for GpaStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Poor" => Ok(GpaStatus::Poor),
            "Average" => Ok(GpaStatus::Average),
            "Good" => Ok(GpaStatus::Good),
            "VeryGood" => Ok(GpaStatus::VeryGood),
            "Excellent" => Ok(GpaStatus::Excellent),
            _ => Err(AppError::InternalError(format!("Unknown GPA status: {}", s))),
        }
    }
}

// ───── Domain Model ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub id: PersonId,
    #[serde(flatten)]
    pub details: PersonDetails,
    pub major: String,
    pub year_of_study: u8,
    pub gpa: f32,
    pub gpa_status: GpaStatus,
}

// ───── Input ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRequest {
    #[serde(flatten)]
    pub details: PersonDetails,
    pub major: String,
    pub gpa: f32,
    #[serde(default)]
    pub teacher_ids: Option<Vec<PersonId>>,
}
