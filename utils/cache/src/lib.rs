//! A small least-recently-used map that can be shared between threads and used
//! from synchronous code, whether or not a tokio runtime is driving the caller.

use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;
use tokio::runtime::Handle;
use tokio::runtime::RuntimeFlavor;
use tokio::sync::Mutex;
use tokio::sync::MutexGuard;

/// LRU cache guarded by a [`tokio::sync::Mutex`].
///
/// All operations are synchronous. Off a runtime the mutex is taken with
/// `blocking_lock`; on a multi-thread runtime the lock is taken inside
/// [`tokio::task::block_in_place`]. A current-thread runtime cannot block, so the
/// lock is only *tried* there and a contended lookup behaves like a miss that is
/// not recorded.
pub struct BlockingLruCache<K, V> {
    inner: Mutex<LruCache<K, V>>,
}

impl<K, V> BlockingLruCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Cache holding at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cache that never evicts.
    pub fn unbounded() -> Self {
        Self {
            inner: Mutex::new(LruCache::unbounded()),
        }
    }

    /// `0` selects [`Self::unbounded`].
    pub fn with_capacity(capacity: usize) -> Self {
        match NonZeroUsize::new(capacity) {
            Some(capacity) => Self::new(capacity),
            None => Self::unbounded(),
        }
    }

    /// Returns a clone of the cached value and marks it as most recently used.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut guard = self.lock()?;
        guard.get(key).cloned()
    }

    /// Inserts `value`, returning the value previously stored under an equal key.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let mut guard = self.lock()?;
        guard.put(key, value)
    }

    /// Returns the cached value for `key`, or computes, stores and returns it.
    ///
    /// The lock is not held while `value` runs, so two threads racing on the same
    /// missing key may both compute it; the later insert supersedes the earlier.
    pub fn get_or_insert_with(&self, key: K, value: impl FnOnce() -> V) -> V {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let computed = value();
        if let Some(mut guard) = self.lock() {
            guard.put(key, computed.clone());
        }
        computed
    }

    pub fn len(&self) -> usize {
        self.lock().map_or(0, |guard| guard.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Some(mut guard) = self.lock() {
            guard.clear();
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, LruCache<K, V>>> {
        match Handle::try_current() {
            Ok(handle) => match handle.runtime_flavor() {
                RuntimeFlavor::CurrentThread => self.inner.try_lock().ok(),
                _ => Some(tokio::task::block_in_place(|| self.inner.blocking_lock())),
            },
            Err(_) => Some(self.inner.blocking_lock()),
        }
    }
}
