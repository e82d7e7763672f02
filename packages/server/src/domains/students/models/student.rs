use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    // Email pattern - RFC 5322 simplified
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap();
}

/// A persisted student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Creation payload for `POST /api/students`.
///
/// Fields default on decode so a missing field surfaces as a validation
/// error naming the field, not as a generic decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewStudent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: i64,
}

/// Partial update payload for `PATCH /api/students/{id}`.
///
/// An empty string or zero age means "leave unchanged", which also means
/// age cannot be patched to 0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentPatch {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: i64,
}

impl StudentPatch {
    /// True when no field carries a new value.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.age == 0
    }
}

/// Every field-level violation found in a creation payload.
#[derive(Debug, Error)]
#[error("{}", .0.join(", "))]
pub struct ValidationErrors(pub Vec<String>);

impl NewStudent {
    /// Check field constraints, collecting every violation rather than
    /// stopping at the first.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Vec::new();

        if self.name.is_empty() {
            violations.push("field name is a required field".to_string());
        }

        if self.email.is_empty() {
            violations.push("field email is a required field".to_string());
        } else if !EMAIL_REGEX.is_match(&self.email) {
            violations.push("field email must be a valid email address".to_string());
        }

        // The zero value counts as missing.
        if self.age == 0 {
            violations.push("field age is a required field".to_string());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_payload_passes() {
        let new = NewStudent {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            age: 21,
        };

        assert!(new.validate().is_ok());
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let err = NewStudent::default().validate().unwrap_err();

        assert_eq!(err.0.len(), 3);
        assert!(err.0.iter().any(|m| m.contains("name")));
        assert!(err.0.iter().any(|m| m.contains("email")));
        assert!(err.0.iter().any(|m| m.contains("age")));
    }

    #[test]
    fn bad_email_syntax_is_rejected() {
        let new = NewStudent {
            name: "Ann".to_string(),
            email: "not-an-email".to_string(),
            age: 21,
        };

        let err = new.validate().unwrap_err();
        assert_eq!(err.0.len(), 1);
        assert!(err.0[0].contains("valid email"));
    }

    #[test]
    fn zero_age_counts_as_missing() {
        let new = NewStudent {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            age: 0,
        };

        let err = new.validate().unwrap_err();
        assert_eq!(err.0, vec!["field age is a required field".to_string()]);
    }

    #[test]
    fn violations_join_into_one_message() {
        let err = ValidationErrors(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "a, b");
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(StudentPatch::default().is_empty());

        let patch = StudentPatch {
            email: "new@x.com".to_string(),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
