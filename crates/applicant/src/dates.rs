//! Date of birth parsing and date formatting

use crate::{ApplicantError, Result};
use chrono::{Local, NaiveDate};

/// Format of the `dob` input (HTML date input)
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Format of today's date on the forms
pub const TODAY_FORMAT: &str = "%d/%m/%Y";

/// A parsed date of birth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Parse a `YYYY-MM-DD` date
    pub fn parse(raw: &str) -> Result<Self> {
        NaiveDate::parse_from_str(raw.trim(), DOB_FORMAT)
            .map(Self)
            .map_err(|_| ApplicantError::InvalidDate(raw.to_string()))
    }

    /// Two-digit day of month
    pub fn day(&self) -> String {
        self.0.format("%d").to_string()
    }

    /// Two-digit month
    pub fn month(&self) -> String {
        self.0.format("%m").to_string()
    }

    /// Four-digit year
    pub fn year(&self) -> String {
        self.0.format("%Y").to_string()
    }
}

/// Day, month and year strings of a date of birth
///
/// All three are empty when the input is missing or malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateParts {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl DateParts {
    pub fn from_input(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::default();
        };

        match BirthDate::parse(raw) {
            Ok(date) => Self {
                day: date.day(),
                month: date.month(),
                year: date.year(),
            },
            Err(_) => Self::default(),
        }
    }
}

/// Format a date as `DD/MM/YYYY`
pub fn format_today(today: NaiveDate) -> String {
    today.format(TODAY_FORMAT).to_string()
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
