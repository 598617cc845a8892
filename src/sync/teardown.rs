use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use tracing::debug;

type Listener = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

/// "Host is about to go away" notification.
///
/// Listeners are async; [`fire`](TeardownSignal::fire) runs all of them
/// concurrently and returns once every one has finished. Clones share the
/// same listener set.
#[derive(Clone, Default)]
pub struct TeardownSignal {
    inner: Arc<Mutex<Registry>>,
}

impl TeardownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe<F, Fut>(&self, listener: F) -> ListenerId
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut registry = self.registry();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        let boxed: Listener = Arc::new(move || listener().boxed());
        registry.listeners.push((id, boxed));
        id
    }

    /// Returns false if the listener was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut registry = self.registry();
        let before = registry.listeners.len();
        registry.listeners.retain(|(existing, _)| *existing != id);
        registry.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.registry().listeners.len()
    }

    pub async fn fire(&self) {
        let listeners: Vec<Listener> = self
            .registry()
            .listeners
            .iter()
            .map(|(_, l)| l.clone())
            .collect();

        debug!(listeners = listeners.len(), "Firing teardown signal");
        join_all(listeners.iter().map(|l| l())).await;
    }
}
