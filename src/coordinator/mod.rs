//! Cached, de-duplicated fetch subscriptions.
//!
//! One logical subscription exists per key. Concurrent subscribers with the
//! same key share one in-flight call and observe the same state through a
//! watch channel. A successful response whose value is still absent schedules
//! exactly one re-fetch after the poll interval; a present value and a
//! failure are both terminal for the key.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;

use crate::error::RpcError;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Composite identity of one subscription: the operation name plus the
/// parameters that make its result unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionKey {
    pub operation: &'static str,
    pub chain_id: String,
    pub account: Option<String>,
}

impl SubscriptionKey {
    pub fn new(operation: &'static str, chain_id: impl Into<String>) -> Self {
        Self {
            operation,
            chain_id: chain_id.into(),
            account: None,
        }
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }
}

/// Observable state of one subscription.
///
/// `Inactive` is distinct from `Loading`: a subscription whose inputs are
/// invalid (no connected account, say) never starts a query and must not
/// show up as loading or failed. `Success(None)` means the endpoint answered
/// but the value is not there yet; it is the only state that re-polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Inactive,
    Loading,
    Success(Option<T>),
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Success(Some(v)) => Some(v),
            _ => None,
        }
    }

    /// True once no further transition can happen for this key.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            FetchState::Inactive | FetchState::Success(Some(_)) | FetchState::Error(_)
        )
    }
}

/// Handle held by one subscriber. Dropping the last handle for a key stops
/// any further re-polling; an in-flight call finishes and its result is
/// discarded rather than aborted mid-transport.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: watch::Receiver<FetchState<T>>,
}

impl<T: Clone> Subscription<T> {
    fn attached(rx: watch::Receiver<FetchState<T>>) -> Self {
        Self { rx }
    }

    /// A subscription that was skipped before issuing any query.
    pub fn inactive() -> Self {
        let (_tx, rx) = watch::channel(FetchState::Inactive);
        Self { rx }
    }

    pub fn state(&self) -> FetchState<T> {
        self.rx.borrow().clone()
    }

    /// Waits for the next state change. Returns false when no further change
    /// can arrive.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Waits until the subscription reaches a terminal state and returns it.
    pub async fn settled(&mut self) -> FetchState<T> {
        loop {
            let state = self.state();
            if state.is_settled() || !self.changed().await {
                return self.state();
            }
        }
    }
}

struct ActiveEntry<T> {
    id: u64,
    tx: Arc<watch::Sender<FetchState<T>>>,
}

pub struct FetchCoordinator<T> {
    poll_interval: Duration,
    next_id: AtomicU64,
    active: Arc<Mutex<HashMap<SubscriptionKey, ActiveEntry<T>>>>,
}

impl<T: Clone + Send + Sync + 'static> FetchCoordinator<T> {
    pub fn new() -> Self {
        Self::with_poll_interval(DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            next_id: AtomicU64::new(0),
            active: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Subscribes to `key`, starting a fetch task only if no live
    /// subscription for that key exists yet.
    pub fn subscribe<F, Fut>(&self, key: SubscriptionKey, fetch: F) -> Subscription<T>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Option<T>, RpcError>> + Send + 'static,
    {
        let mut active = self.active.lock().unwrap();

        if let Some(entry) = active.get(&key) {
            // share settled results and in-flight calls; an entry whose
            // subscribers all left mid-flight is stale and gets replaced
            let shareable = entry.tx.borrow().is_settled() || entry.tx.receiver_count() > 0;
            if shareable {
                return Subscription::attached(entry.tx.subscribe());
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = watch::channel(FetchState::Loading);
        let tx = Arc::new(tx);
        active.insert(
            key.clone(),
            ActiveEntry {
                id,
                tx: Arc::clone(&tx),
            },
        );
        drop(active);

        let registry = Arc::clone(&self.active);
        let poll_interval = self.poll_interval;
        tokio::spawn(async move {
            loop {
                match fetch().await {
                    Ok(Some(value)) => {
                        let _ = tx.send(FetchState::Success(Some(value)));
                        break;
                    }
                    Ok(None) => {
                        let _ = tx.send(FetchState::Success(None));
                        // value still absent: one re-fetch after the fixed
                        // delay, unless every subscriber has gone away
                        tokio::select! {
                            _ = tx.closed() => break,
                            _ = tokio::time::sleep(poll_interval) => {}
                        }
                        let _ = tx.send(FetchState::Loading);
                    }
                    Err(err) => {
                        let _ = tx.send(FetchState::Error(err.to_string()));
                        break;
                    }
                }
            }

            // hold the entry so late subscribers share the settled state,
            // then evict once the last subscriber departs
            tx.closed().await;
            let mut active = registry.lock().unwrap();
            if active.get(&key).is_some_and(|entry| entry.id == id) {
                active.remove(&key);
            }
        });

        Subscription::attached(rx)
    }
}

impl<T: Clone + Send + Sync + 'static> Default for FetchCoordinator<T> {
    fn default() -> Self {
        Self::new()
    }
}
