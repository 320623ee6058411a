//! User entity model.

use serde::{Deserialize, Serialize};

/// How a user signs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// Email and password.
    #[default]
    Email,
    /// Google OAuth only.
    Google,
    /// Both methods are linked.
    Both,
}

impl AuthType {
    /// Return the sign-in method as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Google => "google",
            Self::Both => "both",
        }
    }
}

impl std::str::FromStr for AuthType {
    type Err = moments_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "google" => Ok(Self::Google),
            "both" => Ok(Self::Both),
            _ => Err(moments_core::AppError::invalid_input(format!(
                "Invalid auth type: '{s}'"
            ))),
        }
    }
}

/// A registered user. Password material is owned by the auth service and
/// never loaded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Email address; also the user's identity.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Linked Google account, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    /// Sign-in method.
    #[serde(default)]
    pub auth_type: AuthType,
}

impl User {
    /// Full display name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
