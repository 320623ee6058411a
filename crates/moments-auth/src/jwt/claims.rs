//! JWT claims structure carried by access tokens.

use serde::{Deserialize, Serialize};

use moments_core::types::UserId;

/// Claims payload embedded in every access token.
///
/// Field names follow the account service's token layout so tokens it
/// issues verify here unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Email address; the caller's identity.
    #[serde(rename = "Email")]
    pub email: String,
    /// Given name.
    #[serde(rename = "First_name", default)]
    pub first_name: String,
    /// Family name.
    #[serde(rename = "Last_name", default)]
    pub last_name: String,
    /// Account record identifier.
    #[serde(rename = "Uid", default)]
    pub uid: String,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default)]
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the caller identity.
    pub fn user_id(&self) -> UserId {
        UserId::new(self.email.clone())
    }
}
