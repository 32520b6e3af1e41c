//! Literal placeholders printed on the template PDFs

/// How a printed placeholder is recognized in page text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `{...}` token, matched wherever it occurs
    Braced,
    /// Short bare token such as `dd`, matched only as a whole word
    Bare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplatePlaceholder {
    pub text: &'static str,
    pub kind: PlaceholderKind,
}

const fn braced(text: &'static str) -> TemplatePlaceholder {
    TemplatePlaceholder {
        text,
        kind: PlaceholderKind::Braced,
    }
}

const fn bare(text: &'static str) -> TemplatePlaceholder {
    TemplatePlaceholder {
        text,
        kind: PlaceholderKind::Bare,
    }
}

/// Placeholders erased from every template before the values are overlaid
pub const TEMPLATE_PLACEHOLDERS: &[TemplatePlaceholder] = &[
    braced("{Passport number}"),
    braced("{Last name}"),
    braced("{Birth Names}"),
    braced("{Birth names}"),
    braced("{City of birth}"),
    braced("{Country of birth}"),
    braced("{Nationality}"),
    braced("{First Name Father}"),
    braced("{First Name Mother}"),
    braced("{Street}"),
    braced("{NR}"),
    braced("{City / town}"),
    braced("{Postal code}"),
    braced("{Province}"),
    braced("{Phone number}"),
    braced("{Email}"),
    braced("{Autofill}"),
    // Date of birth boxes (jjjj: Dutch for yyyy)
    bare("dd"),
    bare("mm"),
    bare("jjjj"),
    braced("{passportnumber}"),
    braced("{full name and surname}"),
    braced("{Street and number}"),
    braced("{postalcode}"),
    braced("{City}"),
    braced("{country}"),
    braced("{Date of birth}"),
    braced("{date of today}"),
    braced("{Signature}"),
    braced("{Full customer name}"),
    braced("{Name of customer}"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_follow_braces() {
        for placeholder in TEMPLATE_PLACEHOLDERS {
            let is_braced = placeholder.text.starts_with('{') && placeholder.text.ends_with('}');
            assert_eq!(
                placeholder.kind == PlaceholderKind::Braced,
                is_braced,
                "{}",
                placeholder.text
            );
        }
    }

    #[test]
    fn test_no_duplicates() {
        let mut texts: Vec<&str> = TEMPLATE_PLACEHOLDERS.iter().map(|p| p.text).collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), TEMPLATE_PLACEHOLDERS.len());
    }
}
