//! One person returned by the user lookup endpoint.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// A lookup result. The `email` is the identifier committed on selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Candidate {
    /// Opaque server-side id, when the endpoint includes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<String>")]
    pub faculty: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<String>")]
    pub department: Option<String>,
}

impl Candidate {
    /// Secondary line shown under the email, e.g. `"FER - Computing"`.
    ///
    /// Only present when a faculty is known.
    #[must_use]
    pub fn affiliation(&self) -> Option<String> {
        let faculty = self.faculty.as_deref()?;
        Some(match self.department.as_deref() {
            Some(department) => format!("{faculty} - {department}"),
            None => faculty.to_string(),
        })
    }

    /// Selection needs a non-blank email to be unambiguous.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the email is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.email.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "candidate '{}' has no email",
                self.name
            )));
        }
        Ok(())
    }
}

// The endpoint sends `""` for unknown faculty/department.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
