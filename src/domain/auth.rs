//! Identity carried in the session cookie.

use serde::{Deserialize, Serialize};

/// Claims of the signed session token.
///
/// The role is intentionally absent: admin access is checked against the
/// database on every request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User id as a string.
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Expiry as a unix timestamp.
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Parses the user id stored in `sub`.
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}
