//! Route sharing: share tokens, collaborator admission, and the facade
//! the API calls.

pub mod admission;
pub mod link;
pub mod service;
pub mod token;

pub use admission::CollaboratorAdmission;
pub use link::generate_share_token;
pub use service::{ShareInfo, ShareService};
pub use token::{MintedToken, ShareTokenManager};
