use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::domain::Article;

/// Snapshot of the published article list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headlines {
    pub articles: Vec<Article>,
    /// Bumped on every successful publish; 0 means nothing fetched yet.
    pub revision: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Headlines {
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Holder of the published article list.
///
/// Each publish replaces the whole list; readers see either the old or the
/// new snapshot, never a mix.
pub struct HeadlineBoard {
    tx: watch::Sender<Headlines>,
}

impl Default for HeadlineBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlineBoard {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Headlines::default());
        Self { tx }
    }

    /// Replace the published list and return the new revision.
    pub fn publish(&self, articles: Vec<Article>) -> u64 {
        let mut revision = 0;
        self.tx.send_modify(|current| {
            current.articles = articles;
            current.revision += 1;
            current.refreshed_at = Some(Utc::now());
            revision = current.revision;
        });
        revision
    }

    pub fn current(&self) -> Headlines {
        self.tx.borrow().clone()
    }

    /// Receiver that wakes on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Headlines> {
        self.tx.subscribe()
    }
}
