//! Request context carrying the authenticated caller.

use serde::{Deserialize, Serialize};

use moments_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the API extractor from verified token claims and passed into
/// service methods so that every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The caller's identity.
    pub user_id: UserId,
    /// The caller's email address.
    pub email: String,
}

impl RequestContext {
    /// Creates a context for a caller identified by email.
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            user_id: UserId::new(email.clone()),
            email,
        }
    }
}
