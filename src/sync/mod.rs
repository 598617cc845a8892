//! Periodic headline refresh.
//!
//! [`FeedSynchronizer`] owns the refresh timer and the teardown listener.
//! Timer ticks are serialized: a tick fetches to completion before the next
//! one is awaited. The teardown flush runs outside that loop and may race a
//! tick, in which case whichever response lands last is what stays
//! published.

pub mod teardown;

pub use teardown::{ListenerId, TeardownSignal};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::app::Result;
use crate::config::MAX_INTERVAL;
use crate::domain::HeadlineBoard;
use crate::fetcher::NewsSource;
use crate::report::{Failure, FailureReporter, FetchTrigger};

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(30);
const MIN_REFRESH_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Stopped,
    Running,
}

/// The part of a fetch cycle shared between the timer task and the
/// teardown listener.
struct SyncCycle {
    source: Arc<dyn NewsSource + Send + Sync>,
    board: Arc<HeadlineBoard>,
    reporter: Arc<dyn FailureReporter>,
    in_flight: AtomicUsize,
}

/// Counts one fetch as in flight until dropped, including when the fetch
/// future is cancelled.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SyncCycle {
    async fn run(&self, trigger: FetchTrigger) -> Result<usize> {
        let result = {
            let _in_flight = InFlight::enter(&self.in_flight);
            self.source.fetch_headlines().await
        };

        match result {
            Ok(articles) => {
                let count = articles.len();
                let revision = self.board.publish(articles);
                info!(%trigger, articles = count, revision, "Headlines refreshed");
                Ok(count)
            }
            Err(e) => {
                self.reporter.report(Failure::Fetch { trigger, error: &e });
                Err(e)
            }
        }
    }
}

struct RunningCycle {
    stop_tx: watch::Sender<bool>,
    // Detached on stop; the task exits after any fetch it is in the middle of.
    _timer: JoinHandle<()>,
    listener: ListenerId,
}

pub struct FeedSynchronizer {
    cycle: Arc<SyncCycle>,
    teardown: TeardownSignal,
    period: Duration,
    running: Option<RunningCycle>,
}

impl FeedSynchronizer {
    pub fn new(
        source: Arc<dyn NewsSource + Send + Sync>,
        board: Arc<HeadlineBoard>,
        reporter: Arc<dyn FailureReporter>,
        teardown: TeardownSignal,
    ) -> Self {
        Self::with_period(source, board, reporter, teardown, DEFAULT_REFRESH_PERIOD)
    }

    pub fn with_period(
        source: Arc<dyn NewsSource + Send + Sync>,
        board: Arc<HeadlineBoard>,
        reporter: Arc<dyn FailureReporter>,
        teardown: TeardownSignal,
        period: Duration,
    ) -> Self {
        // tokio intervals panic on a zero period and instants overflow on
        // huge ones.
        let clamped = period.clamp(MIN_REFRESH_PERIOD, MAX_INTERVAL);
        if clamped != period {
            warn!(
                requested_secs = period.as_secs_f64(),
                used_secs = clamped.as_secs_f64(),
                "Refresh period out of range; clamping"
            );
        }

        Self {
            cycle: Arc::new(SyncCycle {
                source,
                board,
                reporter,
                in_flight: AtomicUsize::new(0),
            }),
            teardown,
            period: clamped,
            running: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> SyncState {
        if self.running.is_some() {
            SyncState::Running
        } else {
            SyncState::Stopped
        }
    }

    /// Number of fetches currently awaiting the remote.
    pub fn fetches_in_flight(&self) -> usize {
        self.cycle.in_flight.load(Ordering::SeqCst)
    }

    /// Fetch now, then every `period` until [`stop`](Self::stop). Also
    /// registers the teardown flush.
    ///
    /// The timer and the teardown listener are in place before the first
    /// fetch is awaited; the first tick is one period after the call.
    pub async fn start(&mut self) {
        if self.running.is_some() {
            warn!("Feed synchronizer already running; ignoring start");
            return;
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let first_tick = Instant::now() + self.period;
        let timer = tokio::spawn(tick_loop(
            self.cycle.clone(),
            first_tick,
            self.period,
            stop_rx,
        ));

        let cycle = self.cycle.clone();
        let listener = self.teardown.subscribe(move || {
            let cycle = cycle.clone();
            async move {
                let _ = cycle.run(FetchTrigger::Teardown).await;
            }
        });

        self.running = Some(RunningCycle {
            stop_tx,
            _timer: timer,
            listener,
        });
        info!(period_secs = self.period.as_secs_f64(), "Feed synchronizer started");

        let _ = self.cycle.run(FetchTrigger::Startup).await;
    }

    /// Cancel the timer and drop the teardown listener. A fetch already in
    /// progress still completes and publishes.
    pub fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        let _ = running.stop_tx.send(true);
        self.teardown.unsubscribe(running.listener);
        info!("Feed synchronizer stopped");
    }

    /// One fetch cycle outside the timer. Failures are reported as well as
    /// returned.
    pub async fn fetch_once(&self) -> Result<usize> {
        self.cycle.run(FetchTrigger::Manual).await
    }
}

impl Drop for FeedSynchronizer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn tick_loop(
    cycle: Arc<SyncCycle>,
    first_tick: Instant,
    period: Duration,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut ticker = interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = stop_rx.changed() => break,
            _ = ticker.tick() => {}
        }

        debug!("Running scheduled refresh");
        let _ = cycle.run(FetchTrigger::Tick).await;
    }

    debug!("Refresh timer finished");
}
