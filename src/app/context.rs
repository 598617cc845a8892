use std::sync::Arc;
use std::time::Duration;

use crate::app::{NewsdeskError, Result};
use crate::config::Config;
use crate::domain::HeadlineBoard;
use crate::fetcher::http_fetcher::{build_client, HttpNewsSource};
use crate::fetcher::NewsSource;
use crate::identity::{AnonymousLogin, IdentityProvider};
use crate::report::{FailureReporter, TracingReporter};
use crate::session::{SessionBootstrapper, SessionSlot};
use crate::sync::{FeedSynchronizer, TeardownSignal};

/// Root of the application state.
///
/// Owns the published headlines and the session slot and hands references
/// to the components that write them.
pub struct AppContext {
    pub config: Config,
    pub board: Arc<HeadlineBoard>,
    pub session: Arc<SessionSlot>,
    pub teardown: TeardownSignal,
    pub source: Arc<dyn NewsSource + Send + Sync>,
    pub identity: Arc<dyn IdentityProvider + Send + Sync>,
    pub reporter: Arc<dyn FailureReporter>,
    /// The single bootstrapper for this run.
    pub bootstrapper: SessionBootstrapper,
}

impl AppContext {
    /// Wire the HTTP collaborators described by `config`.
    pub fn new(config: Config) -> Result<Self> {
        let client = build_client()?;
        let source: Arc<dyn NewsSource + Send + Sync> =
            Arc::new(HttpNewsSource::new(client.clone(), &config.news)?);
        let identity: Arc<dyn IdentityProvider + Send + Sync> =
            Arc::new(AnonymousLogin::new(client, &config.identity)?);

        Ok(Self::with_collaborators(
            config,
            source,
            identity,
            Arc::new(TracingReporter),
        ))
    }

    pub fn with_collaborators(
        config: Config,
        source: Arc<dyn NewsSource + Send + Sync>,
        identity: Arc<dyn IdentityProvider + Send + Sync>,
        reporter: Arc<dyn FailureReporter>,
    ) -> Self {
        let session = Arc::new(SessionSlot::new());
        let bootstrapper =
            SessionBootstrapper::new(identity.clone(), session.clone(), reporter.clone());

        Self {
            config,
            board: Arc::new(HeadlineBoard::new()),
            session,
            teardown: TeardownSignal::new(),
            source,
            identity,
            reporter,
            bootstrapper,
        }
    }

    pub fn refresh_period(&self) -> Result<Duration> {
        self.config
            .news
            .refresh_period()
            .map_err(|e| NewsdeskError::Config(e.to_string()))
    }

    pub fn flush_timeout(&self) -> Result<Duration> {
        self.config
            .shutdown
            .flush_timeout()
            .map_err(|e| NewsdeskError::Config(e.to_string()))
    }

    pub fn feed_synchronizer(&self) -> Result<FeedSynchronizer> {
        Ok(FeedSynchronizer::with_period(
            self.source.clone(),
            self.board.clone(),
            self.reporter.clone(),
            self.teardown.clone(),
            self.refresh_period()?,
        ))
    }
}
