use std::fmt;

use serde::{Deserialize, Serialize};

/// A captured answer value.
///
/// The store does not interpret values: every capture behavior normalizes its
/// input to the raw string the server expects (`"on"`/`"off"` for toggles, the
/// option value for selections, the file name for uploads).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerValue(String);

impl AnswerValue {
    /// Create a value from its raw string form.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the raw value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the user left the field blank.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&String> for AnswerValue {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}
