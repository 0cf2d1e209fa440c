use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Verified caller attributes. Handlers trust these without re-checking the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (identity provider uid)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(sub: &str, email: Option<&str>, phone_number: Option<&str>, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: sub.to_string(),
            email: email.map(str::to_string),
            phone_number: phone_number.map(str::to_string),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    /// Boundary check run once per request: the subject must be present and
    /// blank optional claims are dropped.
    pub fn validated(mut self) -> AppResult<Self> {
        if self.sub.trim().is_empty() {
            return Err(AppError::Unauthorized("Unauthorized".to_string()));
        }

        self.email = self.email.filter(|e| !e.trim().is_empty());
        self.phone_number = self.phone_number.filter(|p| !p.trim().is_empty());
        Ok(self)
    }
}
