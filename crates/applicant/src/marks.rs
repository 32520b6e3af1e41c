//! Coded choices and the marks they put on the forms
//!
//! Each choice is a closed enumeration. Parsing is an exact, case-insensitive
//! match against the accepted codes and their English synonyms; anything else
//! is `Unset`, which marks no slot at all.

/// Mark used by the personal-data boxes (sex, marital status)
pub const CROSS_MARK: &str = "X";

/// Mark used by the EX-15 section 4 checkboxes
pub const CHECK_MARK: &str = "☑";

/// A coded input whose selected variant marks one template slot
pub trait Choice: Copy + Eq + Sized + 'static {
    /// Name of the form input carrying the code
    const INPUT: &'static str;

    /// Mark drawn in the slot of the selected variant
    const MARK: &'static str;

    /// Template token of every selectable variant
    const SLOTS: &'static [(Self, &'static str)];

    /// Decode raw input; unknown or missing codes yield `Unset`
    fn parse(raw: &str) -> Self;

    /// Mark for every slot: [`Self::MARK`] for the selected one, empty elsewhere
    fn slot_marks(self) -> Vec<(&'static str, &'static str)> {
        Self::SLOTS
            .iter()
            .map(|(variant, token)| (*token, if *variant == self { Self::MARK } else { "" }))
            .collect()
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unset,
}

impl Choice for Sex {
    const INPUT: &'static str = "sex";
    const MARK: &'static str = CROSS_MARK;
    const SLOTS: &'static [(Self, &'static str)] =
        &[(Sex::Male, "{sex_h}"), (Sex::Female, "{sex_m}")];

    fn parse(raw: &str) -> Self {
        // H = hombre, M = mujer
        match normalize(raw).as_str() {
            "H" | "MALE" => Sex::Male,
            "M" | "F" | "FEMALE" => Sex::Female,
            _ => Sex::Unset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaritalStatus {
    Single,
    Married,
    Widowed,
    Divorced,
    Separated,
    #[default]
    Unset,
}

impl Choice for MaritalStatus {
    const INPUT: &'static str = "marital_status";
    const MARK: &'static str = CROSS_MARK;
    const SLOTS: &'static [(Self, &'static str)] = &[
        (MaritalStatus::Single, "{civil_s}"),
        (MaritalStatus::Married, "{civil_c}"),
        (MaritalStatus::Widowed, "{civil_v}"),
        (MaritalStatus::Divorced, "{civil_d}"),
        (MaritalStatus::Separated, "{civil_sp}"),
    ];

    fn parse(raw: &str) -> Self {
        match normalize(raw).as_str() {
            "S" | "SINGLE" => MaritalStatus::Single,
            "C" | "MARRIED" => MaritalStatus::Married,
            "V" | "WIDOWED" => MaritalStatus::Widowed,
            "D" | "DIVORCED" => MaritalStatus::Divorced,
            "SP" | "SEPARATED" => MaritalStatus::Separated,
            _ => MaritalStatus::Unset,
        }
    }
}

/// Document requested on the EX-15
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentType {
    Nie,
    Certificate,
    #[default]
    Unset,
}

impl Choice for DocumentType {
    const INPUT: &'static str = "doc_type";
    const MARK: &'static str = CHECK_MARK;
    const SLOTS: &'static [(Self, &'static str)] = &[
        (DocumentType::Nie, "{doc_nie}"),
        (DocumentType::Certificate, "{doc_cert}"),
    ];

    fn parse(raw: &str) -> Self {
        match normalize(raw).as_str() {
            "NIE" => DocumentType::Nie,
            "CERT" | "CERTIFICATE" => DocumentType::Certificate,
            _ => DocumentType::Unset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CertificateType {
    Resident,
    NonResident,
    #[default]
    Unset,
}

impl Choice for CertificateType {
    const INPUT: &'static str = "cert_type";
    const MARK: &'static str = CHECK_MARK;
    const SLOTS: &'static [(Self, &'static str)] = &[
        (CertificateType::Resident, "{cert_residente}"),
        (CertificateType::NonResident, "{cert_no_residente}"),
    ];

    fn parse(raw: &str) -> Self {
        match normalize(raw).as_str() {
            "RESIDENTE" | "RESIDENT" => CertificateType::Resident,
            "NO_RESIDENTE" | "NON_RESIDENT" => CertificateType::NonResident,
            _ => CertificateType::Unset,
        }
    }
}

/// Office where the application is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionOffice {
    Immigration,
    Police,
    Consulate,
    #[default]
    Unset,
}

impl Choice for SubmissionOffice {
    const INPUT: &'static str = "lugar";
    const MARK: &'static str = CHECK_MARK;
    const SLOTS: &'static [(Self, &'static str)] = &[
        (SubmissionOffice::Immigration, "{lugar_extranjeria}"),
        (SubmissionOffice::Police, "{lugar_policia}"),
        (SubmissionOffice::Consulate, "{lugar_consular}"),
    ];

    fn parse(raw: &str) -> Self {
        match normalize(raw).as_str() {
            "EXTRANJERIA" | "IMMIGRATION_OFFICE" => SubmissionOffice::Immigration,
            "POLICIA" | "POLICE" => SubmissionOffice::Police,
            "CONSULAR" | "CONSULATE" => SubmissionOffice::Consulate,
            _ => SubmissionOffice::Unset,
        }
    }
}

/// The applicant's current status in Spain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusInCountry {
    Stay,
    Residence,
    #[default]
    Unset,
}

impl Choice for StatusInCountry {
    const INPUT: &'static str = "situacion";
    const MARK: &'static str = CHECK_MARK;
    const SLOTS: &'static [(Self, &'static str)] = &[
        (StatusInCountry::Stay, "{situacion_estancia}"),
        (StatusInCountry::Residence, "{situacion_residencia}"),
    ];

    fn parse(raw: &str) -> Self {
        match normalize(raw).as_str() {
            "ESTANCIA" | "STAY" => StatusInCountry::Stay,
            "RESIDENCIA" | "RESIDENCE" => StatusInCountry::Residence,
            _ => StatusInCountry::Unset,
        }
    }
}

/// Reasons for the application, each an independent checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motive {
    Economic,
    Professional,
    Social,
}

impl Motive {
    pub const ALL: [Motive; 3] = [Motive::Economic, Motive::Professional, Motive::Social];

    /// Name of the checkbox input
    pub fn input(self) -> &'static str {
        match self {
            Motive::Economic => "motivo_economico",
            Motive::Professional => "motivo_profesional",
            Motive::Social => "motivo_social",
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Motive::Economic => "{motivo_economico}",
            Motive::Professional => "{motivo_profesional}",
            Motive::Social => "{motivo_social}",
        }
    }

    /// Mark for a checkbox value: ticked boxes post `on`
    pub fn mark(value: Option<&str>) -> &'static str {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("on") => CHECK_MARK,
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sex_codes() {
        assert_eq!(Sex::parse("H"), Sex::Male);
        assert_eq!(Sex::parse("male"), Sex::Male);
        assert_eq!(Sex::parse("M"), Sex::Female);
        assert_eq!(Sex::parse("f"), Sex::Female);
        assert_eq!(Sex::parse("FEMALE"), Sex::Female);
        assert_eq!(Sex::parse("other"), Sex::Unset);
        assert_eq!(Sex::parse(""), Sex::Unset);
    }

    #[test]
    fn test_sex_slot_marks() {
        assert_eq!(Sex::Female.slot_marks(), vec![("{sex_h}", ""), ("{sex_m}", "X")]);
        assert_eq!(Sex::Male.slot_marks(), vec![("{sex_h}", "X"), ("{sex_m}", "")]);
        assert_eq!(Sex::Unset.slot_marks(), vec![("{sex_h}", ""), ("{sex_m}", "")]);
    }

    #[test]
    fn test_marital_status_codes() {
        assert_eq!(MaritalStatus::parse("s"), MaritalStatus::Single);
        assert_eq!(MaritalStatus::parse("Married"), MaritalStatus::Married);
        assert_eq!(MaritalStatus::parse("V"), MaritalStatus::Widowed);
        assert_eq!(MaritalStatus::parse("divorced"), MaritalStatus::Divorced);
        assert_eq!(MaritalStatus::parse("SP"), MaritalStatus::Separated);
        assert_eq!(MaritalStatus::parse("engaged"), MaritalStatus::Unset);
    }

    #[test]
    fn test_marital_status_marks_one_slot() {
        let marks = MaritalStatus::Separated.slot_marks();
        assert_eq!(marks.len(), 5);
        assert_eq!(marks.iter().filter(|(_, m)| !m.is_empty()).count(), 1);
        assert!(marks.contains(&("{civil_sp}", "X")));
    }

    #[test]
    fn test_section_four_codes() {
        assert_eq!(DocumentType::parse("nie"), DocumentType::Nie);
        assert_eq!(DocumentType::parse("CERT"), DocumentType::Certificate);
        assert_eq!(DocumentType::parse("certificate"), DocumentType::Certificate);
        assert_eq!(CertificateType::parse("no_residente"), CertificateType::NonResident);
        assert_eq!(CertificateType::parse("RESIDENT"), CertificateType::Resident);
        assert_eq!(SubmissionOffice::parse("policia"), SubmissionOffice::Police);
        assert_eq!(SubmissionOffice::parse("CONSULATE"), SubmissionOffice::Consulate);
        assert_eq!(StatusInCountry::parse("Residencia"), StatusInCountry::Residence);
        assert_eq!(StatusInCountry::parse("visit"), StatusInCountry::Unset);
    }

    #[test]
    fn test_check_mark_slots() {
        assert_eq!(
            DocumentType::Nie.slot_marks(),
            vec![("{doc_nie}", "☑"), ("{doc_cert}", "")]
        );
        assert!(SubmissionOffice::Unset
            .slot_marks()
            .iter()
            .all(|(_, mark)| mark.is_empty()));
    }

    #[test]
    fn test_every_variant_has_one_slot() {
        fn distinct<C: Choice>() -> usize {
            let mut tokens: Vec<&str> = C::SLOTS.iter().map(|(_, t)| *t).collect();
            tokens.sort_unstable();
            tokens.dedup();
            tokens.len()
        }
        assert_eq!(distinct::<Sex>(), 2);
        assert_eq!(distinct::<MaritalStatus>(), 5);
        assert_eq!(distinct::<DocumentType>(), 2);
        assert_eq!(distinct::<CertificateType>(), 2);
        assert_eq!(distinct::<SubmissionOffice>(), 3);
        assert_eq!(distinct::<StatusInCountry>(), 2);
    }

    #[test]
    fn test_motive_mark() {
        assert_eq!(Motive::mark(Some("on")), "☑");
        assert_eq!(Motive::mark(Some("ON")), "☑");
        assert_eq!(Motive::mark(Some("off")), "");
        assert_eq!(Motive::mark(None), "");
    }
}
