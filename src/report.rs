//! Routing of swallowed failures.
//!
//! Session and feed failures never reach the user. They are handed to a
//! [`FailureReporter`] so callers can decide where they end up; the default
//! sends them to `tracing`.

use std::fmt;

use tracing::error;

use crate::app::NewsdeskError;

/// Which event started a fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    /// The immediate fetch performed by `start()`.
    Startup,
    /// A periodic timer tick.
    Tick,
    /// The teardown flush.
    Teardown,
    /// A direct `fetch_once()` call.
    Manual,
}

impl fmt::Display for FetchTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchTrigger::Startup => "startup",
            FetchTrigger::Tick => "tick",
            FetchTrigger::Teardown => "teardown",
            FetchTrigger::Manual => "manual",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum Failure<'a> {
    /// Anonymous login failed; the session stays absent for this run.
    Auth(&'a NewsdeskError),
    /// A fetch cycle failed; the published list is left untouched.
    Fetch {
        trigger: FetchTrigger,
        error: &'a NewsdeskError,
    },
}

pub trait FailureReporter: Send + Sync {
    fn report(&self, failure: Failure<'_>);
}

/// Default reporter: logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, failure: Failure<'_>) {
        match failure {
            Failure::Auth(e) => error!(error = %e, "Error logging in anonymously"),
            Failure::Fetch { trigger, error } => {
                error!(%trigger, error = %error, "Error fetching news data")
            }
        }
    }
}
