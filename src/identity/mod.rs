pub mod anonymous;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Session;

pub use anonymous::AnonymousLogin;

/// Remote service that hands out anonymous sessions.
#[async_trait]
pub trait IdentityProvider {
    async fn login_anonymous(&self) -> Result<Session>;
}
