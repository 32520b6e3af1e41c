//! Submitted form data

use std::collections::HashMap;

/// Input name that may be repeated to select several forms
pub const SELECTED_FORMS_KEY: &str = "selected_forms";

/// Flat mapping of input name to value, as posted by the applicant form
///
/// Repeated keys keep their first value, except [`SELECTED_FORMS_KEY`]
/// whose values are collected in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: HashMap<String, String>,
    selected_forms: Vec<String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build form data from key/value pairs in submission order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = Self::new();
        for (key, value) in pairs {
            data.insert(key, value);
        }
        data
    }

    /// Record one submitted value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if key == SELECTED_FORMS_KEY {
            let id = value.trim();
            if !id.is_empty() {
                self.selected_forms.push(id.to_string());
            }
            return;
        }

        self.values.entry(key).or_insert(value);
    }

    /// Raw value of an input, if it was submitted
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Raw value of an input, or the empty string
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Form ids listed under [`SELECTED_FORMS_KEY`], in submission order
    pub fn selected_forms(&self) -> &[String] {
        &self.selected_forms
    }

    /// The applicant's last name, when present and not blank
    pub fn last_name(&self) -> Option<&str> {
        self.get("last_name")
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.selected_forms.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
