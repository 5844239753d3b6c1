use serde::Serialize;

use crate::domain::user::User;

#[derive(Debug, Serialize)]
pub struct AccountPageData {
    pub user: User,
}

/// JSON body of a successful account API call.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// JSON body of a rejected API call.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
