//! Submitted form data
//!
//! Forms arrive as urlencoded key/value pairs. Keys may repeat (the genre
//! multi-select), so the pairs are kept in submission order.

use chrono::NaiveDateTime;

use crate::utils::dates::parse_datetime;

/// Problems with a submitted form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("field '{0}' is required")]
    Missing(&'static str),
    #[error("field '{field}' must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("field '{field}' is not a date/time: {value:?}")]
    InvalidDateTime { field: &'static str, value: String },
}

/// Decoded urlencoded form body
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value submitted for a field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted for a field, in order
    pub fn get_all(&self, field: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == field)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// A multi-valued field with at least one non-blank value
    pub fn required_all(&self, field: &'static str) -> Result<Vec<String>, FormError> {
        let values = self.get_all(field);
        if values.is_empty() {
            return Err(FormError::Missing(field));
        }
        Ok(values)
    }

    /// A non-empty text field
    pub fn required(&self, field: &'static str) -> Result<String, FormError> {
        self.optional(field).ok_or(FormError::Missing(field))
    }

    /// A text field where blank means absent
    pub fn optional(&self, field: &str) -> Option<String> {
        self.get(field)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    }

    /// A checkbox; unticked boxes are not submitted at all
    pub fn checkbox(&self, field: &str) -> bool {
        matches!(
            self.get(field).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("y" | "yes" | "on" | "true" | "1")
        )
    }

    /// A required integer id
    pub fn id(&self, field: &'static str) -> Result<i64, FormError> {
        let raw = self.required(field)?;
        raw.parse().map_err(|_| FormError::InvalidNumber {
            field,
            value: raw.clone(),
        })
    }

    /// A required date/time
    pub fn datetime(&self, field: &'static str) -> Result<NaiveDateTime, FormError> {
        let raw = self.required(field)?;
        parse_datetime(&raw).map_err(|_| FormError::InvalidDateTime { field, value: raw })
    }
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

/// US state choices offered by the venue and artist forms
pub const STATE_CHOICES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];
