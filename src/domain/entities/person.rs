use std::str::FromStr;

use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::{student::{GpaStatus, Student}, teacher::Teacher},
    errors::AppError,
    validation::{validate_date_of_birth, validate_name, EMAIL_PATTERN, PIN_PATTERN},
};

/// Store-generated identity shared by every person.
pub type PersonId = u32;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            _ => Err(AppError::InternalError(format!("Unknown sex value: {}", s))),
        }
    }
}

/// Value of the `discriminator` column, naming the concrete kind of a person row.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discriminator {
    Student,
    Teacher,
}

impl Discriminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discriminator::Student => "Student",
            Discriminator::Teacher => "Teacher",
        }
    }

    /// The kind on the other side of the student/teacher association.
    pub fn counterpart(&self) -> Discriminator {
        match self {
            Discriminator::Student => Discriminator::Teacher,
            Discriminator::Teacher => Discriminator::Student,
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Discriminator::Student => "students",
            Discriminator::Teacher => "teachers",
        }
    }
}

impl FromStr for Discriminator {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Student" => Ok(Discriminator::Student),
            "Teacher" => Ok(Discriminator::Teacher),
            _ => Err(AppError::InternalError(format!("Unknown person discriminator: {}", s))),
        }
    }
}

// ───── Shared person fields ─────────────────────────────────────────

/// Fields every person carries, both on the way in (request DTOs) and on the
/// stored entity. The validation rules live on the field attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PersonDetails {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_date_of_birth"))]
    pub date_of_birth: NaiveDate,

    #[validate(regex(path = *PIN_PATTERN, message = "PIN must consist of exactly 10 digits."))]
    pub pin: String,

    pub sex: Gender,

    #[validate(regex(path = *EMAIL_PATTERN, message = "Email is not in a valid format."))]
    pub email: String,
}

// ───── Tagged union over the concrete kinds ─────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Person {
    Student(Student),
    Teacher(Teacher),
}

impl Person {
    pub fn id(&self) -> PersonId {
        match self {
            Person::Student(s) => s.id,
            Person::Teacher(t) => t.id,
        }
    }

    pub fn details(&self) -> &PersonDetails {
        match self {
            Person::Student(s) => &s.details,
            Person::Teacher(t) => &t.details,
        }
    }

    pub fn discriminator(&self) -> Discriminator {
        match self {
            Person::Student(_) => Discriminator::Student,
            Person::Teacher(_) => Discriminator::Teacher,
        }
    }
}

// ───── Database Models ───────────────────────────────────────────────

/// One row of the `person` table; subtype columns are NULL for the other kind.
#[derive(Debug, sqlx::FromRow)]
pub struct PersonRow {
    pub id: i64,
    pub discriminator: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub pin: String,
    pub sex: String,
    pub email: String,
    pub major: Option<String>,
    pub year_of_study: Option<i32>,
    pub gpa: Option<f32>,
    pub gpa_status: Option<String>,
    pub subject: Option<String>,
    pub experience: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonInsert {
    pub discriminator: Discriminator,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub pin: String,
    pub sex: Gender,
    pub email: String,
    pub major: Option<String>,
    pub year_of_study: Option<i32>,
    pub gpa: Option<f32>,
    pub gpa_status: Option<GpaStatus>,
    pub subject: Option<String>,
    pub experience: Option<f64>,
}

impl PersonInsert {
    fn from_details(discriminator: Discriminator, details: &PersonDetails) -> Self {
        PersonInsert {
            discriminator,
            name: details.name.clone(),
            date_of_birth: details.date_of_birth,
            pin: details.pin.clone(),
            sex: details.sex,
            email: details.email.clone(),
            major: None,
            year_of_study: None,
            gpa: None,
            gpa_status: None,
            subject: None,
            experience: None,
        }
    }
}

impl From<&Student> for PersonInsert {
    fn from(student: &Student) -> Self {
        PersonInsert {
            major: Some(student.major.clone()),
            year_of_study: Some(i32::from(student.year_of_study)),
            gpa: Some(student.gpa),
            gpa_status: Some(student.gpa_status),
            ..PersonInsert::from_details(Discriminator::Student, &student.details)
        }
    }
}

impl From<&Teacher> for PersonInsert {
    fn from(teacher: &Teacher) -> Self {
        PersonInsert {
            subject: Some(teacher.subject.clone()),
            experience: Some(teacher.experience),
            ..PersonInsert::from_details(Discriminator::Teacher, &teacher.details)
        }
    }
}

/// Converts a store id back into the domain id type.
pub fn person_id_from_db(id: i64) -> Result<PersonId, AppError> {
    PersonId::try_from(id)
        .map_err(|_| AppError::InternalError(format!("Person id out of range: {}", id)))
}

fn required<T>(value: Option<T>, column: &str, id: i64) -> Result<T, AppError> {
    value.ok_or_else(|| {
        AppError::InternalError(format!("Column '{}' is NULL for person {}", column, id))
    })
}

impl TryFrom<PersonRow> for Person {
    type Error = AppError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        let id = person_id_from_db(row.id)?;
        let details = PersonDetails {
            name: row.name,
            date_of_birth: row.date_of_birth,
            pin: row.pin,
            sex: row.sex.parse()?,
            email: row.email,
        };

        match row.discriminator.parse::<Discriminator>()? {
            Discriminator::Student => {
                let year_of_study = required(row.year_of_study, "year_of_study", row.id)?;
                Ok(Person::Student(Student {
                    id,
                    details,
                    major: required(row.major, "major", row.id)?,
                    year_of_study: u8::try_from(year_of_study).map_err(|_| {
                        AppError::InternalError(format!("Invalid year of study: {}", year_of_study))
                    })?,
                    gpa: required(row.gpa, "gpa", row.id)?,
                    gpa_status: required(row.gpa_status, "gpa_status", row.id)?.parse()?,
                }))
            }
            Discriminator::Teacher => Ok(Person::Teacher(Teacher {
                id,
                details,
                subject: required(row.subject, "subject", row.id)?,
                experience: required(row.experience, "experience", row.id)?,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(discriminator: &str) -> PersonRow {
        PersonRow {
            id: 3,
            discriminator: discriminator.to_string(),
            name: "Maria Ivanova".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 4, 12).unwrap(),
            pin: "0123456789".to_string(),
            sex: "Female".to_string(),
            email: "maria@school.bg".to_string(),
            major: Some("Physics".to_string()),
            year_of_study: Some(12),
            gpa: Some(5.25),
            gpa_status: Some("VeryGood".to_string()),
            subject: None,
            experience: None,
        }
    }

    #[test]
    fn student_row_decodes_into_student_variant() {
        let person = Person::try_from(row("Student")).unwrap();

        let Person::Student(student) = person else {
            panic!("expected a student");
        };
        assert_eq!(student.id, 3);
        assert_eq!(student.details.pin, "0123456789");
        assert_eq!(student.gpa_status, GpaStatus::VeryGood);
        assert_eq!(student.year_of_study, 12);
    }

    #[test]
    fn teacher_row_missing_subject_is_rejected() {
        let err = Person::try_from(row("Teacher")).unwrap_err();
        assert!(matches!(err, AppError::InternalError(msg) if msg.contains("subject")));
    }

    #[test]
    fn unknown_discriminator_is_rejected() {
        assert!(Person::try_from(row("Janitor")).is_err());
    }

    #[test]
    fn student_insert_fills_only_student_columns() {
        let Person::Student(student) = Person::try_from(row("Student")).unwrap() else {
            panic!("expected a student");
        };

        let insert = PersonInsert::from(&student);

        assert_eq!(insert.discriminator, Discriminator::Student);
        assert_eq!(insert.gpa_status, Some(GpaStatus::VeryGood));
        assert!(insert.subject.is_none());
        assert!(insert.experience.is_none());
    }
}
