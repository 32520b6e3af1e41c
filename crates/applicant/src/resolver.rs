//! Placeholder token resolution
//!
//! Maps every token the geometry files may carry to its display string.
//! Several tokens are aliases of the same input (casing variants, or the
//! wording printed on a template), so the table is wider than the form.

use crate::dates::{format_today, DateParts};
use crate::form_data::FormData;
use crate::marks::{
    CertificateType, Choice, DocumentType, MaritalStatus, Motive, Sex, StatusInCountry,
    SubmissionOffice,
};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Resolved display string for each known placeholder token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: HashMap<String, String>,
}

impl FieldValues {
    /// Resolved value of a token, `None` when the token is unknown
    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn set(&mut self, token: &str, value: impl Into<String>) {
        self.values.insert(token.to_string(), value.into());
    }

    /// Set the same value under several alias tokens
    fn set_all(&mut self, tokens: &[&str], value: &str) {
        for token in tokens {
            self.set(token, value);
        }
    }

    fn set_choice<C: Choice>(&mut self, data: &FormData) {
        let choice = C::parse(data.get_or_empty(C::INPUT));
        for (token, mark) in choice.slot_marks() {
            self.set(token, mark);
        }
    }
}

/// Join two parts with a space, trimming the result
fn join_trimmed(first: &str, second: &str) -> String {
    format!("{first} {second}").trim().to_string()
}

/// Resolve every known token from the submitted data
///
/// `today` is passed in so callers control the clock.
pub fn resolve(data: &FormData, today: NaiveDate) -> FieldValues {
    let mut values = FieldValues::default();
    let field = |key: &str| data.get_or_empty(key);

    let dob = field("dob");
    let dob_parts = DateParts::from_input(data.get("dob"));
    let date_today = format_today(today);
    let full_name = join_trimmed(field("birth_names"), field("last_name"));
    let street_and_number = join_trimmed(field("street"), field("street_number"));

    // Identity
    values.set("{passport_number}", field("passport_number"));
    values.set("{last_name}", field("last_name"));
    values.set("{birth_names}", field("birth_names"));
    values.set_all(
        &["{full_name}", "{Full name and surname}", "{full name and surname}"],
        &full_name,
    );

    // Dates
    values.set("{dob_day}", dob_parts.day);
    values.set("{dob_month}", dob_parts.month);
    values.set("{dob_year}", dob_parts.year);
    values.set_all(&["{dob}", "{Date of birth}"], dob);
    values.set_all(&["{date_today}", "{date of today}"], &date_today);

    // Place of birth
    values.set_all(&["{birth_city}", "{City of birth}"], field("birth_city"));
    values.set_all(
        &["{birth_country}", "{Country of birth}", "{country}"],
        field("birth_country"),
    );
    values.set_all(&["{nationality}", "{Nationality}"], field("nationality"));

    // Parents
    values.set("{father_name}", field("father_name"));
    values.set("{mother_name}", field("mother_name"));

    // Address
    values.set_all(&["{street}", "{Street}"], field("street"));
    values.set("{street_number}", field("street_number"));
    values.set_all(
        &["{street_and_number}", "{Street and number}"],
        &street_and_number,
    );
    values.set_all(&["{town}", "{city}", "{City}"], field("town"));
    values.set_all(&["{postcode}", "{postalcode}"], field("postcode"));
    values.set_all(&["{province}", "{Province}"], field("province"));

    // Contact
    values.set("{phone}", field("phone"));
    values.set("{email}", field("email"));

    // Marks
    values.set_choice::<Sex>(data);
    values.set_choice::<MaritalStatus>(data);
    values.set_choice::<DocumentType>(data);
    values.set_choice::<CertificateType>(data);
    values.set_choice::<SubmissionOffice>(data);
    values.set_choice::<StatusInCountry>(data);
    for motive in Motive::ALL {
        values.set(motive.token(), Motive::mark(data.get(motive.input())));
    }

    values
}
