//! Resolution of a full applicant submission

use applicant::{resolve, FieldValues, FormData, TEMPLATE_PLACEHOLDERS};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn submission() -> FormData {
    FormData::from_pairs([
        ("passport_number", "X1234567"),
        ("last_name", "Garcia"),
        ("birth_names", "Ana Maria"),
        ("sex", "FEMALE"),
        ("dob", "1990-05-17"),
        ("birth_city", "Lima"),
        ("birth_country", "Peru"),
        ("nationality", "Peruvian"),
        ("marital_status", "married"),
        ("father_name", "Jose"),
        ("mother_name", "Rosa"),
        ("street", "Carrer Major"),
        ("street_number", "12"),
        ("town", "Alzira"),
        ("postcode", "46600"),
        ("province", "Valencia"),
        ("phone", "600123123"),
        ("email", "ana@example.com"),
        ("doc_type", "NIE"),
        ("cert_type", "residente"),
        ("motivo_economico", "on"),
        ("lugar", "POLICIA"),
        ("situacion", "ESTANCIA"),
        ("selected_forms", "ex15_alzira"),
    ])
}

fn get<'a>(values: &'a FieldValues, token: &str) -> &'a str {
    values
        .get(token)
        .unwrap_or_else(|| panic!("missing token {token}"))
}

#[test]
fn test_date_of_birth_split() {
    let values = resolve(&submission(), today());

    assert_eq!(get(&values, "{dob_day}"), "17");
    assert_eq!(get(&values, "{dob_month}"), "05");
    assert_eq!(get(&values, "{dob_year}"), "1990");
    assert_eq!(get(&values, "{dob}"), "1990-05-17");
    assert_eq!(get(&values, "{Date of birth}"), "1990-05-17");
}

#[test]
fn test_invalid_date_of_birth_leaves_parts_empty() {
    let data = FormData::from_pairs([("dob", "17/05/1990")]);
    let values = resolve(&data, today());

    assert_eq!(get(&values, "{dob_day}"), "");
    assert_eq!(get(&values, "{dob_month}"), "");
    assert_eq!(get(&values, "{dob_year}"), "");
    // The raw input is still shown where the whole date is printed
    assert_eq!(get(&values, "{Date of birth}"), "17/05/1990");
}

#[test]
fn test_today() {
    let values = resolve(&FormData::new(), today());
    assert_eq!(get(&values, "{date_today}"), "30/06/2025");
    assert_eq!(get(&values, "{date of today}"), "30/06/2025");
}

#[test]
fn test_female_marks_female_slot() {
    let values = resolve(&submission(), today());
    assert_eq!(get(&values, "{sex_m}"), "X");
    assert_eq!(get(&values, "{sex_h}"), "");
}

#[test]
fn test_male_marks_male_slot() {
    for code in ["MALE", "H", "male"] {
        let values = resolve(&FormData::from_pairs([("sex", code)]), today());
        assert_eq!(get(&values, "{sex_h}"), "X", "{code}");
        assert_eq!(get(&values, "{sex_m}"), "", "{code}");
    }
}

#[test]
fn test_unmatched_codes_mark_nothing() {
    let data = FormData::from_pairs([
        ("sex", "unknown"),
        ("marital_status", "complicated"),
        ("doc_type", "passport"),
        ("lugar", "embassy"),
    ]);
    let values = resolve(&data, today());

    for token in [
        "{sex_h}",
        "{sex_m}",
        "{civil_s}",
        "{civil_c}",
        "{civil_v}",
        "{civil_d}",
        "{civil_sp}",
        "{doc_nie}",
        "{doc_cert}",
        "{lugar_extranjeria}",
        "{lugar_policia}",
        "{lugar_consular}",
    ] {
        assert_eq!(get(&values, token), "", "{token}");
    }
}

#[test]
fn test_section_four_marks() {
    let values = resolve(&submission(), today());

    assert_eq!(get(&values, "{civil_c}"), "X");
    assert_eq!(get(&values, "{civil_s}"), "");
    assert_eq!(get(&values, "{doc_nie}"), "☑");
    assert_eq!(get(&values, "{doc_cert}"), "");
    assert_eq!(get(&values, "{cert_residente}"), "☑");
    assert_eq!(get(&values, "{cert_no_residente}"), "");
    assert_eq!(get(&values, "{motivo_economico}"), "☑");
    assert_eq!(get(&values, "{motivo_profesional}"), "");
    assert_eq!(get(&values, "{lugar_policia}"), "☑");
    assert_eq!(get(&values, "{situacion_estancia}"), "☑");
    assert_eq!(get(&values, "{situacion_residencia}"), "");
}

#[test]
fn test_concatenations() {
    let values = resolve(&submission(), today());

    assert_eq!(get(&values, "{full_name}"), "Ana Maria Garcia");
    assert_eq!(get(&values, "{Full name and surname}"), "Ana Maria Garcia");
    assert_eq!(get(&values, "{full name and surname}"), "Ana Maria Garcia");
    assert_eq!(get(&values, "{street_and_number}"), "Carrer Major 12");
    assert_eq!(get(&values, "{Street and number}"), "Carrer Major 12");
}

#[test]
fn test_concatenation_with_missing_part() {
    let values = resolve(&FormData::from_pairs([("last_name", "Garcia")]), today());
    assert_eq!(get(&values, "{full_name}"), "Garcia");
    assert_eq!(get(&values, "{street_and_number}"), "");
}

#[test]
fn test_unknown_token_is_not_resolved() {
    let values = resolve(&submission(), today());
    assert_eq!(values.get("{Autofill}"), None);
    assert_eq!(values.get("{favourite_colour}"), None);
}

#[test]
fn test_selected_forms_are_not_field_values() {
    let data = submission();
    assert_eq!(data.selected_forms(), &["ex15_alzira".to_string()]);
    assert!(resolve(&data, today())
        .tokens()
        .all(|token| token.starts_with('{') && token.ends_with('}')));
}

#[test]
fn test_template_placeholder_list() {
    assert_eq!(TEMPLATE_PLACEHOLDERS.len(), 31);
    assert!(TEMPLATE_PLACEHOLDERS.iter().any(|p| p.text == "{Last name}"));
    assert!(TEMPLATE_PLACEHOLDERS.iter().any(|p| p.text == "jjjj"));
}
