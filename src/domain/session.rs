use std::fmt;

use chrono::{DateTime, Utc};

/// Authenticated anonymous identity handed out by the identity service.
///
/// Tokens are opaque to this crate and are never printed.
#[derive(Clone)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub device_id: Option<String>,
    pub established_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: access_token.into(),
            refresh_token: None,
            device_id: None,
            established_at: Utc::now(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("device_id", &self.device_id)
            .field("established_at", &self.established_at)
            .finish()
    }
}
