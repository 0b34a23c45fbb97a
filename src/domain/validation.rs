use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError};

use crate::entities::person::PersonDetails;

const NAME_MIN_LENGTH: usize = 4;
const NAME_MAX_LENGTH: usize = 30;
const EARLIEST_BIRTH_YEAR: i32 = 1900;

pub static PIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("PIN pattern is valid"));

pub static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Order in which violations are reported.
const FIELD_ORDER: [&str; 4] = ["name", "date_of_birth", "pin", "email"];

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let length = name.chars().count();
    if name.trim().is_empty() || !(NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&length) {
        let mut error = ValidationError::new("name_length");
        error.message = Some(
            format!(
                "Name must be between {} and {} characters long.",
                NAME_MIN_LENGTH, NAME_MAX_LENGTH
            )
            .into(),
        );
        return Err(error);
    }
    Ok(())
}

pub fn validate_date_of_birth(date: &NaiveDate) -> Result<(), ValidationError> {
    check_date_of_birth(date, Local::now().date_naive())
}

fn check_date_of_birth(date: &NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if date.year() < EARLIEST_BIRTH_YEAR || *date > today {
        let mut error = ValidationError::new("invalid_date_of_birth");
        error.message = Some("Invalid Date of Birth.".into());
        return Err(error);
    }
    Ok(())
}

/// Checks the shared person fields and returns every violation, in field order.
/// An empty list means the input is valid.
pub fn validate_person(details: &PersonDetails) -> Vec<String> {
    let Err(errors) = details.validate() else {
        return Vec::new();
    };

    let field_errors = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .flat_map(|errors| errors.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value: {}", e.code))
        })
        .collect()
}

/// Joins violations into the single multi-line message carried by a failed result.
pub fn join_violations(violations: &[String]) -> String {
    violations.join("\n")
}
