//! Typed record for one rendered review row.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One review entry subject to filtering.
///
/// Built from the row's tagged attributes; the rest of the row is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Entry {
    /// Star rating, `None` when the row carried no parseable number.
    #[serde(default)]
    pub rating: Option<u32>,
    /// Project category label, matched exactly.
    #[serde(default)]
    pub project: String,
    /// Display name of the reviewed user, matched by substring.
    #[serde(default, alias = "user")]
    pub user_name: String,
}

impl Entry {
    /// Build an entry from raw attribute text as rendered by the server.
    ///
    /// A missing or non-numeric rating yields `rating: None`; missing text
    /// attributes become empty strings.
    #[must_use]
    pub fn from_attributes(rating: Option<&str>, project: Option<&str>, user: Option<&str>) -> Self {
        Self {
            rating: rating.and_then(|raw| parse_ordinal("rating", raw).ok()),
            project: project.unwrap_or_default().to_string(),
            user_name: user.unwrap_or_default().to_string(),
        }
    }
}

/// Parse a non-negative integer out of attribute or widget text.
///
/// Surrounding whitespace is ignored. Anything else that is not a base-10
/// integer is rejected, so `"3"` parses and `"3 stars"` does not.
///
/// # Errors
///
/// Returns [`CoreError::InvalidValue`] naming `field` when `raw` is not a number.
pub fn parse_ordinal(field: &str, raw: &str) -> Result<u32, CoreError> {
    raw.trim().parse::<u32>().map_err(|_| CoreError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("3", Some(3))]
    #[case(" 5 ", Some(5))]
    #[case("10", Some(10))]
    #[case("", None)]
    #[case("three", None)]
    #[case("-1", None)]
    fn rating_attribute_parsing(#[case] raw: &str, #[case] expected: Option<u32>) {
        let entry = Entry::from_attributes(Some(raw), Some("Thesis"), Some("Ana"));
        assert_eq!(entry.rating, expected);
    }

    #[test]
    fn missing_attributes_become_empty() {
        let entry = Entry::from_attributes(None, None, None);
        assert_eq!(
            entry,
            Entry {
                rating: None,
                project: String::new(),
                user_name: String::new(),
            }
        );
    }

    #[test]
    fn parse_ordinal_names_the_field() {
        let err = parse_ordinal("rating filter", "abc").unwrap_err();
        assert_eq!(err.to_string(), "Invalid rating filter: \"abc\"");
    }

    #[test]
    fn deserializes_with_user_alias() {
        let entry: Entry =
            serde_json::from_str(r#"{"rating": 4, "project": "Timski rad", "user": "Ivo"}"#)
                .unwrap();
        assert_eq!(entry.rating, Some(4));
        assert_eq!(entry.user_name, "Ivo");
    }
}
