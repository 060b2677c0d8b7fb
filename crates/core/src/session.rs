//! Session token expiration settings
//!
//! Read shapes mirror the nested `config.auth.session` object returned by the
//! configuration API, where every level may be absent. [`SessionConfig`] is the
//! flattened, always-populated view edited by the settings panel, and
//! [`ConfigPatch`] is the write shape sent back.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Access token lifetime used when the project has none configured (15 minutes)
pub const DEFAULT_ACCESS_TOKEN_EXPIRES_IN: Seconds = Seconds(900.0);

/// Refresh token lifetime used when the project has none configured (12 hours)
pub const DEFAULT_REFRESH_TOKEN_EXPIRES_IN: Seconds = Seconds(43_200.0);

/// Largest magnitude an `f64` holds without skipping integers (2^53)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A token lifetime in seconds
///
/// Any finite number is accepted, fractions included. Whole values are written
/// as JSON integers so `900` goes over the wire as `900`, not `900.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Seconds(f64);

// The value is always finite, so equality is reflexive.
impl Eq for Seconds {}

impl Seconds {
    /// Returns `None` for NaN and infinities
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    #[allow(clippy::cast_possible_truncation)]
    fn as_exact_integer(self) -> Option<i64> {
        (self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT_INTEGER).then(|| self.0 as i64)
    }
}

impl From<i32> for Seconds {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_exact_integer() {
            Some(whole) => write!(f, "{whole}"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Seconds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_exact_integer() {
            Some(whole) => serializer.serialize_i64(whole),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Seconds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::new(value)
            .ok_or_else(|| serde::de::Error::custom("expected a finite number of seconds"))
    }
}

/// Identifier of the project (app) whose configuration is edited
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Token expiration as stored remotely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenExpiration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<Seconds>,
}

/// `config.auth.session` as returned by the configuration API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSessionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<TokenExpiration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<TokenExpiration>,
}

impl AuthSessionSettings {
    pub fn access_token_expires_in(&self) -> Option<Seconds> {
        self.access_token.and_then(|t| t.expires_in)
    }

    pub fn refresh_token_expires_in(&self) -> Option<Seconds> {
        self.refresh_token.and_then(|t| t.expires_in)
    }
}

impl From<SessionConfig> for AuthSessionSettings {
    fn from(config: SessionConfig) -> Self {
        Self {
            access_token: Some(TokenExpiration {
                expires_in: Some(config.access_token_expires_in),
            }),
            refresh_token: Some(TokenExpiration {
                expires_in: Some(config.refresh_token_expires_in),
            }),
        }
    }
}

/// `config.auth`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub session: Option<AuthSessionSettings>,
}

/// The slice of the project configuration the console reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

impl ProjectConfig {
    pub fn session(&self) -> Option<AuthSessionSettings> {
        self.auth.and_then(|auth| auth.session)
    }
}

/// Effective session token lifetimes, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub access_token_expires_in: Seconds,
    pub refresh_token_expires_in: Seconds,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_token_expires_in: DEFAULT_ACCESS_TOKEN_EXPIRES_IN,
            refresh_token_expires_in: DEFAULT_REFRESH_TOKEN_EXPIRES_IN,
        }
    }
}

impl SessionConfig {
    pub fn new(
        access_token_expires_in: impl Into<Seconds>,
        refresh_token_expires_in: impl Into<Seconds>,
    ) -> Self {
        Self {
            access_token_expires_in: access_token_expires_in.into(),
            refresh_token_expires_in: refresh_token_expires_in.into(),
        }
    }

    /// Resolve the values to edit, filling each missing field with its default
    pub fn from_settings(settings: Option<&AuthSessionSettings>) -> Self {
        let access = settings.and_then(AuthSessionSettings::access_token_expires_in);
        let refresh = settings.and_then(AuthSessionSettings::refresh_token_expires_in);

        Self {
            access_token_expires_in: access.unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRES_IN),
            refresh_token_expires_in: refresh.unwrap_or(DEFAULT_REFRESH_TOKEN_EXPIRES_IN),
        }
    }

    /// Build the configuration patch that persists these values
    pub fn to_patch(&self) -> ConfigPatch {
        ConfigPatch {
            auth: AuthPatch {
                session: SessionPatch {
                    access_token: ExpiresInPatch {
                        expires_in: self.access_token_expires_in,
                    },
                    refresh_token: ExpiresInPatch {
                        expires_in: self.refresh_token_expires_in,
                    },
                },
            },
        }
    }
}

/// Configuration update input carrying only the session expiration fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPatch {
    pub auth: AuthPatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPatch {
    pub session: SessionPatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    pub access_token: ExpiresInPatch,
    pub refresh_token: ExpiresInPatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiresInPatch {
    pub expires_in: Seconds,
}
