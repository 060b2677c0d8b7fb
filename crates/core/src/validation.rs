//! Validation schema for the session settings form

use crate::session::{Seconds, SessionConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A required numeric form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberField {
    /// Form field name
    pub name: &'static str,
    /// Label used in generated messages
    pub label: &'static str,
    /// Message shown when the value is not a number
    pub type_error: &'static str,
}

impl NumberField {
    pub fn required_message(&self) -> String {
        format!("{} is a required field", self.label)
    }

    /// Validate a raw input value
    pub fn validate(&self, raw: &str) -> Result<Seconds, FieldError> {
        if raw.trim().is_empty() {
            return Err(FieldError {
                kind: FieldErrorKind::Required,
                message: self.required_message(),
            });
        }

        coerce_number(raw).ok_or_else(|| FieldError {
            kind: FieldErrorKind::NotANumber,
            message: self.type_error.to_string(),
        })
    }
}

/// Coerce an input string to a number of seconds
///
/// Whitespace is ignored. Any finite decimal or exponent form is a number,
/// fractions included.
pub fn coerce_number(raw: &str) -> Option<Seconds> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    compact.parse::<f64>().ok().and_then(Seconds::new)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldErrorKind {
    Required,
    NotANumber,
}

/// A validation failure for a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Fields of the session settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionField {
    AccessTokenExpiresIn,
    RefreshTokenExpiresIn,
}

pub const ACCESS_TOKEN_EXPIRES_IN: NumberField = NumberField {
    name: "accessTokenExpiresIn",
    label: "Access token expiration",
    type_error: "Access token expiration must be a number",
};

pub const REFRESH_TOKEN_EXPIRES_IN: NumberField = NumberField {
    name: "refreshTokenExpiresIn",
    label: "Refresh token expiration",
    type_error: "Refresh token expiration must be a number",
};

impl SessionField {
    pub const ALL: [Self; 2] = [Self::AccessTokenExpiresIn, Self::RefreshTokenExpiresIn];

    pub fn schema(self) -> &'static NumberField {
        match self {
            Self::AccessTokenExpiresIn => &ACCESS_TOKEN_EXPIRES_IN,
            Self::RefreshTokenExpiresIn => &REFRESH_TOKEN_EXPIRES_IN,
        }
    }

    pub fn name(self) -> &'static str {
        self.schema().name
    }

    /// Label of the input element
    pub fn input_label(self) -> &'static str {
        match self {
            Self::AccessTokenExpiresIn => "Access Token Expires In (Seconds)",
            Self::RefreshTokenExpiresIn => "Refresh Token Expires In (Seconds)",
        }
    }

    pub fn get(self, config: &SessionConfig) -> Seconds {
        match self {
            Self::AccessTokenExpiresIn => config.access_token_expires_in,
            Self::RefreshTokenExpiresIn => config.refresh_token_expires_in,
        }
    }

    pub fn set(self, config: &mut SessionConfig, value: Seconds) {
        match self {
            Self::AccessTokenExpiresIn => config.access_token_expires_in = value,
            Self::RefreshTokenExpiresIn => config.refresh_token_expires_in = value,
        }
    }
}

pub type FieldErrors = BTreeMap<SessionField, FieldError>;

/// Validate a full set of raw form values
///
/// Every field is checked so that all errors surface at once.
pub fn validate_session(values: &BTreeMap<SessionField, String>) -> Result<SessionConfig, FieldErrors> {
    let mut config = SessionConfig::default();
    let mut errors = FieldErrors::new();

    for field in SessionField::ALL {
        let raw = values.get(&field).map_or("", String::as_str);
        match field.schema().validate(raw) {
            Ok(value) => field.set(&mut config, value),
            Err(error) => {
                errors.insert(field, error);
            }
        }
    }

    if errors.is_empty() {
        Ok(config)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(access: &str, refresh: &str) -> BTreeMap<SessionField, String> {
        BTreeMap::from([
            (SessionField::AccessTokenExpiresIn, access.to_string()),
            (SessionField::RefreshTokenExpiresIn, refresh.to_string()),
        ])
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("900"), Some(Seconds::from(900)));
        assert_eq!(coerce_number(" 1 200 "), Some(Seconds::from(1200)));
        assert_eq!(coerce_number("-5"), Some(Seconds::from(-5)));
        assert_eq!(coerce_number("1e3"), Some(Seconds::from(1000)));
        assert_eq!(coerce_number("12.5"), Seconds::new(12.5));
        assert_eq!(coerce_number(".25"), Seconds::new(0.25));
        assert_eq!(coerce_number("abc"), None);
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("inf"), None);
        assert_eq!(coerce_number(""), None);
    }

    #[test]
    fn test_fractional_value_is_a_number() {
        assert_eq!(ACCESS_TOKEN_EXPIRES_IN.validate("1.5"), Ok(Seconds::new(1.5).unwrap()));
        assert_eq!(
            validate_session(&values("1.5", "7200.25")),
            Ok(SessionConfig::new(
                Seconds::new(1.5).unwrap(),
                Seconds::new(7200.25).unwrap()
            ))
        );
    }

    #[test]
    fn test_required_message_uses_label() {
        let err = ACCESS_TOKEN_EXPIRES_IN.validate("  ").unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::Required);
        assert_eq!(err.message, "Access token expiration is a required field");
    }

    #[test]
    fn test_type_error_message() {
        let err = REFRESH_TOKEN_EXPIRES_IN.validate("soon").unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::NotANumber);
        assert_eq!(err.message, "Refresh token expiration must be a number");
    }

    #[test]
    fn test_no_bounds_enforced() {
        assert_eq!(
            validate_session(&values("0", "-1")),
            Ok(SessionConfig::new(0, -1))
        );
    }

    #[test]
    fn test_all_field_errors_reported() {
        let errors = validate_session(&values("x", "")).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[&SessionField::AccessTokenExpiresIn].message,
            "Access token expiration must be a number"
        );
        assert_eq!(
            errors[&SessionField::RefreshTokenExpiresIn].kind,
            FieldErrorKind::Required
        );
    }
}
