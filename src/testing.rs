//! Test doubles shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::{NewsdeskError, Result};
use crate::domain::{Article, Session};
use crate::fetcher::NewsSource;
use crate::identity::IdentityProvider;
use crate::report::{Failure, FailureReporter};

pub fn articles(prefix: &str, n: usize) -> Vec<Article> {
    (0..n)
        .map(|i| {
            Article::new(
                format!("{prefix} headline {i}"),
                format!("{prefix} description {i}"),
                format!("https://news.example.com/{prefix}/{i}"),
            )
        })
        .collect()
}

/// News source returning whatever list it currently holds.
pub struct ScriptedSource {
    articles: Mutex<Vec<Article>>,
    failing_calls: Mutex<HashSet<usize>>,
    call_articles: Mutex<HashMap<usize, Vec<Article>>>,
    call_delays: Mutex<HashMap<usize, Duration>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles: Mutex::new(articles),
            failing_calls: Mutex::new(HashSet::new()),
            call_articles: Mutex::new(HashMap::new()),
            call_delays: Mutex::new(HashMap::new()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_articles(&self, articles: Vec<Article>) {
        *self.articles.lock().unwrap() = articles;
    }

    /// Make the `n`th call (1-based) fail.
    pub fn fail_call(&self, n: usize) {
        self.failing_calls.lock().unwrap().insert(n);
    }

    /// Answer the `n`th call with `articles` instead of the current list.
    pub fn respond_on_call(&self, n: usize, articles: Vec<Article>) {
        self.call_articles.lock().unwrap().insert(n, articles);
    }

    /// Delay the `n`th call by `delay` instead of the default delay.
    pub fn delay_call(&self, n: usize, delay: Duration) {
        self.call_delays.lock().unwrap().insert(n, delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsSource for ScriptedSource {
    async fn fetch_headlines(&self) -> Result<Vec<Article>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self
            .call_delays
            .lock()
            .unwrap()
            .get(&call)
            .copied()
            .or(self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_calls.lock().unwrap().contains(&call) {
            return Err(NewsdeskError::Status {
                status: 503,
                message: "scripted failure".into(),
            });
        }
        if let Some(articles) = self.call_articles.lock().unwrap().remove(&call) {
            return Ok(articles);
        }
        Ok(self.articles.lock().unwrap().clone())
    }
}

pub struct StaticIdentity {
    outcome: std::result::Result<String, String>,
    calls: AtomicUsize,
}

impl StaticIdentity {
    pub fn succeeding(user_id: &str) -> Self {
        Self {
            outcome: Ok(user_id.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn login_anonymous(&self) -> Result<Session> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(user_id) => Ok(Session::new(user_id.clone(), "test-token")),
            Err(reason) => Err(NewsdeskError::Identity(reason.clone())),
        }
    }
}

/// Reporter that keeps one line per failure.
#[derive(Default)]
pub struct RecordingReporter {
    entries: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl FailureReporter for RecordingReporter {
    fn report(&self, failure: Failure<'_>) {
        let line = match failure {
            Failure::Auth(e) => format!("auth: {}", e),
            Failure::Fetch { trigger, error } => format!("fetch({}): {}", trigger, error),
        };
        self.entries.lock().unwrap().push(line);
    }
}
