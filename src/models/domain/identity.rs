use std::{
    fmt::{self, Debug, Display},
    hash::Hash,
    str::FromStr,
};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9][0-9]{6,14}$").expect("PHONE_REGEX is a valid regex pattern"));

/// Which student store layout is active. Older deployments key students by
/// email; current ones key them by the identity provider's opaque uid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreGeneration {
    Email,
    Uid,
}

impl StoreGeneration {
    pub fn route_prefix(&self) -> &'static str {
        match self {
            StoreGeneration::Email => "/v1",
            StoreGeneration::Uid => "/v3",
        }
    }

    pub fn students_collection(&self) -> &'static str {
        match self {
            StoreGeneration::Email => "students",
            StoreGeneration::Uid => "students_v3",
        }
    }

    pub fn attempts_collection(&self) -> &'static str {
        match self {
            StoreGeneration::Email => "student_quiz_attempts",
            StoreGeneration::Uid => "student_quiz_attempts_v3",
        }
    }
}

impl FromStr for StoreGeneration {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" | "v1" => Ok(StoreGeneration::Email),
            "uid" | "v3" => Ok(StoreGeneration::Uid),
            other => Err(AppError::InternalError(format!(
                "Unknown store generation '{}'",
                other
            ))),
        }
    }
}

/// The identifier a student record is stored under.
///
/// Handlers, services and repositories are written once against this trait;
/// [`Email`] and [`Uid`] adapt them to the two store generations.
pub trait StudentKey:
    Clone + Debug + Display + PartialEq + Eq + Hash + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const GENERATION: StoreGeneration;

    /// Derive the caller's key from already-verified token claims.
    fn from_claims(claims: &Claims) -> AppResult<Self>;

    fn as_str(&self) -> &str;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    pub fn new(uid: impl Into<String>) -> Self {
        Uid(uid.into())
    }
}

impl Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StudentKey for Uid {
    const GENERATION: StoreGeneration = StoreGeneration::Uid;

    fn from_claims(claims: &Claims) -> AppResult<Self> {
        Ok(Uid(claims.sub.clone()))
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lowercased, trimmed email address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Self {
        Email(raw.trim().to_lowercase())
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StudentKey for Email {
    const GENERATION: StoreGeneration = StoreGeneration::Email;

    fn from_claims(claims: &Claims) -> AppResult<Self> {
        claims
            .email
            .as_deref()
            .map(Email::new)
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

/// How an admin names another student: by email or by E.164 phone number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Contact {
    Email(String),
    Phone(String),
}

impl FromStr for Contact {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let identifier = s.trim();

        if identifier.contains('@') {
            Ok(Contact::Email(identifier.to_lowercase()))
        } else if PHONE_REGEX.is_match(identifier) {
            Ok(Contact::Phone(identifier.to_string()))
        } else {
            Err(AppError::BadRequest(
                "Invalid identifier. Must be a valid email or E.164 phone number.".to_string(),
            ))
        }
    }
}
