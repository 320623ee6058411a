//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Settings for verifying caller tokens issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Shared with the issuer.
    pub jwt_secret: String,
    /// Clock skew tolerated when checking `exp`, in seconds.
    #[serde(default = "default_leeway")]
    pub jwt_leeway_seconds: u64,
    /// Lifetime of access tokens minted locally (tests, tooling) in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: i64,
}

fn default_leeway() -> u64 {
    5
}

fn default_access_ttl() -> i64 {
    60
}
