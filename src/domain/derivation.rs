use chrono::{Datelike, NaiveDate};
use derive_more::Display;

use crate::{entities::student::GpaStatus, errors::AppError};

pub const MIN_GPA: f32 = 2.0;
pub const MAX_GPA: f32 = 6.0;

const SCHOOL_START_AGE: i32 = 7;
const FINAL_YEAR: u8 = 12;

#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum DerivationError {
    #[display("GPA must be at least 2.0")]
    GpaTooLow(f32),

    #[display("GPA cannot exceed 6.0")]
    GpaTooHigh(f32),

    #[display("GPA is not a number")]
    GpaNotANumber,
}

impl From<DerivationError> for AppError {
    fn from(err: DerivationError) -> Self {
        AppError::OutOfRange(err.to_string())
    }
}

/// Age in whole years on `today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// School year a student of this birth date belongs to: 0 before school age,
/// 1 through 12 between 7 and 18, capped at 12 afterwards.
pub fn year_of_study(birth_date: NaiveDate, today: NaiveDate) -> u8 {
    let age = age_on(birth_date, today);
    if age < SCHOOL_START_AGE {
        0
    } else {
        // age - 6 is in 1..=12 for ages 7..=18
        let year = age - (SCHOOL_START_AGE - 1);
        u8::try_from(year).map_or(FINAL_YEAR, |y| y.min(FINAL_YEAR))
    }
}

/// Maps a GPA on the closed [2.0, 6.0] scale to its tier.
pub fn gpa_status(gpa: f32) -> Result<GpaStatus, DerivationError> {
    if gpa.is_nan() {
        return Err(DerivationError::GpaNotANumber);
    }
    if gpa < MIN_GPA {
        return Err(DerivationError::GpaTooLow(gpa));
    }
    if gpa > MAX_GPA {
        return Err(DerivationError::GpaTooHigh(gpa));
    }

    let status = if gpa < 3.0 {
        GpaStatus::Poor
    } else if gpa < 3.5 {
        GpaStatus::Average
    } else if gpa < 4.5 {
        GpaStatus::Good
    } else if gpa < 5.5 {
        GpaStatus::VeryGood
    } else {
        GpaStatus::Excellent
    };
    Ok(status)
}
