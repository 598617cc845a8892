//! One-shot anonymous session bootstrap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use crate::app::Result;
use crate::domain::Session;
use crate::identity::IdentityProvider;
use crate::report::{Failure, FailureReporter};

/// Application-wide holder for the anonymous session. Written at most once.
#[derive(Debug, Default)]
pub struct SessionSlot {
    cell: OnceLock<Session>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&Session> {
        self.cell.get()
    }

    pub fn is_established(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Returns false if a session was already stored.
    pub fn set(&self, session: Session) -> bool {
        self.cell.set(session).is_ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Established,
    /// The login failed and was reported; no retry follows.
    Failed,
    /// `bootstrap()` already ran once for this application.
    AlreadyAttempted,
}

pub struct SessionBootstrapper {
    provider: Arc<dyn IdentityProvider + Send + Sync>,
    slot: Arc<SessionSlot>,
    reporter: Arc<dyn FailureReporter>,
    attempted: AtomicBool,
}

impl SessionBootstrapper {
    pub fn new(
        provider: Arc<dyn IdentityProvider + Send + Sync>,
        slot: Arc<SessionSlot>,
        reporter: Arc<dyn FailureReporter>,
    ) -> Self {
        Self {
            provider,
            slot,
            reporter,
            attempted: AtomicBool::new(false),
        }
    }

    /// Log in anonymously and keep the session for the rest of the run.
    ///
    /// Never fails: errors go to the reporter and the application carries on
    /// without a session.
    pub async fn bootstrap(&self) -> BootstrapOutcome {
        if self.attempted.swap(true, Ordering::SeqCst) {
            warn!("Session bootstrap already attempted; ignoring");
            return BootstrapOutcome::AlreadyAttempted;
        }

        match self.establish().await {
            Ok(()) => BootstrapOutcome::Established,
            Err(e) => {
                self.reporter.report(Failure::Auth(&e));
                BootstrapOutcome::Failed
            }
        }
    }

    async fn establish(&self) -> Result<()> {
        let session = self.provider.login_anonymous().await?;
        info!(user_id = %session.user_id, "Logged in anonymously");
        if !self.slot.set(session) {
            warn!("Session slot already populated; keeping the existing session");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingReporter, StaticIdentity};

    fn setup(
        provider: StaticIdentity,
    ) -> (SessionBootstrapper, Arc<SessionSlot>, Arc<RecordingReporter>, Arc<StaticIdentity>) {
        let provider = Arc::new(provider);
        let slot = Arc::new(SessionSlot::new());
        let reporter = Arc::new(RecordingReporter::default());
        let bootstrapper = SessionBootstrapper::new(provider.clone(), slot.clone(), reporter.clone());
        (bootstrapper, slot, reporter, provider)
    }

    #[tokio::test]
    async fn test_bootstrap_stores_session() {
        let (bootstrapper, slot, reporter, _) = setup(StaticIdentity::succeeding("anon-1"));

        assert_eq!(bootstrapper.bootstrap().await, BootstrapOutcome::Established);

        assert_eq!(slot.get().unwrap().user_id, "anon-1");
        assert!(reporter.is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_failure_is_only_reported() {
        let (bootstrapper, slot, reporter, _) = setup(StaticIdentity::failing("service down"));

        assert_eq!(bootstrapper.bootstrap().await, BootstrapOutcome::Failed);

        assert!(!slot.is_established());
        let entries = reporter.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].starts_with("auth:"));
        assert!(entries[0].contains("service down"));
    }

    #[tokio::test]
    async fn test_bootstrap_runs_once() {
        let (bootstrapper, _, reporter, provider) = setup(StaticIdentity::failing("down"));

        bootstrapper.bootstrap().await;
        assert_eq!(
            bootstrapper.bootstrap().await,
            BootstrapOutcome::AlreadyAttempted
        );

        assert_eq!(provider.calls(), 1);
        assert_eq!(reporter.entries().len(), 1);
    }

    #[test]
    fn test_slot_written_once() {
        let slot = SessionSlot::new();
        assert!(slot.set(Session::new("a", "t1")));
        assert!(!slot.set(Session::new("b", "t2")));
        assert_eq!(slot.get().unwrap().user_id, "a");
    }
}
