use serde::{Deserialize, Serialize};

use crate::entities::person::{PersonDetails, PersonId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Teacher {
    pub id: PersonId,
    #[serde(flatten)]
    pub details: PersonDetails,
    pub subject: String,
    /// Years of teaching experience.
    pub experience: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherRequest {
    #[serde(flatten)]
    pub details: PersonDetails,
    pub subject: String,
    pub experience: f64,
    #[serde(default)]
    pub student_ids: Option<Vec<PersonId>>,
}
