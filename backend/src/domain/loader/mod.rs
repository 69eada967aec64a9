//! Per-request batch coalescer.
//!
//! A [`BatchLoader`] collects keys registered through [`BatchLoader::load`]
//! into an open batch. Registration is synchronous and returns a
//! [`LoadHandle`]; the first time any handle of a batch is awaited the batch
//! is sealed and its keys are fetched with one call to the [`BatchFn`]. Every
//! handle of that batch then reads its value from the shared outcome.
//!
//! Loaders also remember which batch each key went into, so a key requested
//! again later in the same request is answered from the earlier outcome
//! (including a failed one) instead of triggering another fetch.

mod relations;

use std::collections::HashMap;
use std::fmt;
use std::future::IntoFuture;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tokio::sync::OnceCell;
use tracing::debug;

use super::Error;

pub use relations::{Direction, SubscriptionAttribution, SubscriptionBatch, ToMany, ToOne};

/// Result of one batched fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutput<V> {
    /// Element `i` belongs to key `i`; `None` means the key had no match.
    Positional(Vec<Option<V>>),
    /// One value shared by every key of the batch.
    Broadcast(V),
}

/// Multi-key fetch used by a [`BatchLoader`].
#[async_trait]
pub trait BatchFn: Send + Sync {
    type Key: Clone + Eq + Hash + fmt::Debug + Send + Sync;
    type Value: Clone + Send + Sync;

    /// Label used in log events.
    fn name(&self) -> &'static str;

    /// Fetch values for `keys`, which are distinct and in registration order.
    async fn fetch(&self, keys: &[Self::Key]) -> Result<BatchOutput<Self::Value>, Error>;
}

struct Batch<K, V> {
    keys: Mutex<Vec<K>>,
    outcome: OnceCell<Result<BatchOutput<V>, Error>>,
}

impl<K, V> Batch<K, V> {
    fn new() -> Self {
        Self {
            keys: Mutex::new(Vec::new()),
            outcome: OnceCell::new(),
        }
    }
}

struct Slot<K, V> {
    batch: Arc<Batch<K, V>>,
    index: usize,
}

struct LoaderState<K, V> {
    open: Option<Arc<Batch<K, V>>>,
    slots: HashMap<K, Slot<K, V>>,
    dispatched: usize,
}

/// Coalesces single-key loads into one fetch per batch.
///
/// Loaders are built per request; nothing is shared between two loaders.
pub struct BatchLoader<F: BatchFn> {
    batch_fn: F,
    state: Mutex<LoaderState<F::Key, F::Value>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<F: BatchFn> BatchLoader<F> {
    pub fn new(batch_fn: F) -> Self {
        Self {
            batch_fn,
            state: Mutex::new(LoaderState {
                open: None,
                slots: HashMap::new(),
                dispatched: 0,
            }),
        }
    }

    /// Register `key` and return a handle to its eventual value.
    ///
    /// Keys registered before any handle is awaited end up in the same batch.
    /// A key seen before in this loader shares the earlier slot.
    pub fn load(&self, key: F::Key) -> LoadHandle<'_, F> {
        let mut state = lock(&self.state);
        if let Some(slot) = state.slots.get(&key) {
            return LoadHandle {
                loader: self,
                batch: Arc::clone(&slot.batch),
                index: slot.index,
            };
        }

        let batch = Arc::clone(state.open.get_or_insert_with(|| Arc::new(Batch::new())));
        let index = {
            let mut keys = lock(&batch.keys);
            keys.push(key.clone());
            keys.len() - 1
        };
        state.slots.insert(
            key,
            Slot {
                batch: Arc::clone(&batch),
                index,
            },
        );
        LoadHandle {
            loader: self,
            batch,
            index,
        }
    }

    /// Number of fetches issued so far.
    pub fn dispatch_count(&self) -> usize {
        lock(&self.state).dispatched
    }

    /// Forget every cached key. Pending handles keep their batch.
    pub fn clear(&self) {
        let mut state = lock(&self.state);
        state.slots.clear();
        state.open = None;
    }

    fn seal(&self, batch: &Arc<Batch<F::Key, F::Value>>) -> Vec<F::Key> {
        let mut state = lock(&self.state);
        if state
            .open
            .as_ref()
            .is_some_and(|open| Arc::ptr_eq(open, batch))
        {
            state.open = None;
        }
        state.dispatched += 1;
        std::mem::take(&mut *lock(&batch.keys))
    }

    async fn dispatch(
        &self,
        batch: &Arc<Batch<F::Key, F::Value>>,
    ) -> Result<BatchOutput<F::Value>, Error> {
        let keys = self.seal(batch);
        let loader = self.batch_fn.name();
        debug!(loader, keys = keys.len(), "dispatching batch");

        let output = self
            .batch_fn
            .fetch(&keys)
            .await
            .inspect_err(|error| debug!(loader, %error, "batch fetch failed"))?;

        if let BatchOutput::Positional(values) = &output {
            if values.len() != keys.len() {
                return Err(Error::internal(format!(
                    "{loader} returned {} values for {} keys",
                    values.len(),
                    keys.len()
                )));
            }
        }
        Ok(output)
    }
}

/// Pending value of one registered key.
///
/// Await it (or call [`LoadHandle::resolve`]) to obtain the value; `None`
/// means the batch function reported no match for the key.
pub struct LoadHandle<'a, F: BatchFn> {
    loader: &'a BatchLoader<F>,
    batch: Arc<Batch<F::Key, F::Value>>,
    index: usize,
}

impl<'a, F: BatchFn> LoadHandle<'a, F> {
    /// Wait for the batch holding this key, dispatching it if nobody has yet.
    pub async fn resolve(self) -> Result<Option<F::Value>, Error> {
        let Self {
            loader,
            batch,
            index,
        } = self;
        let outcome = batch
            .outcome
            .get_or_init(|| loader.dispatch(&batch))
            .await;
        match outcome {
            Ok(BatchOutput::Positional(values)) => Ok(values.get(index).cloned().flatten()),
            Ok(BatchOutput::Broadcast(value)) => Ok(Some(value.clone())),
            Err(error) => Err(error.clone()),
        }
    }
}

impl<'a, F: BatchFn + 'a> IntoFuture for LoadHandle<'a, F> {
    type Output = Result<Option<F::Value>, Error>;
    type IntoFuture = BoxFuture<'a, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.resolve())
    }
}
