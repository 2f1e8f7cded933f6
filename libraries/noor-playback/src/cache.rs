//! Preload cache of warmed media handles
//!
//! Keyed by (reciter, verse). The coordinator owns the cache behind its
//! state lock, so every mutation takes `&mut self` and a [`claim`] can
//! never hand the same handle to two callers.
//!
//! [`claim`]: PreloadCache::claim

use crate::media::MediaHandle;
use lru::LruCache;
use noor_core::{ReciterId, VerseKey};
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

type Key = (ReciterId, VerseKey);

pub struct PreloadCache {
    entries: LruCache<Key, Arc<dyn MediaHandle>>,
    in_flight: HashSet<Key>,
    epoch: u64,
}

impl PreloadCache {
    /// Create a cache holding at most `capacity` warmed handles
    ///
    /// The least recently used handle is evicted first; a capacity of 0 is
    /// treated as 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            in_flight: HashSet::new(),
            epoch: 0,
        }
    }

    pub fn get(&mut self, reciter: ReciterId, verse: VerseKey) -> Option<Arc<dyn MediaHandle>> {
        self.entries.get(&(reciter, verse)).cloned()
    }

    pub fn put(&mut self, reciter: ReciterId, verse: VerseKey, handle: Arc<dyn MediaHandle>) {
        debug!(%reciter, %verse, "Preload cached");
        self.entries.put((reciter, verse), handle);
    }

    pub fn remove(&mut self, reciter: ReciterId, verse: VerseKey) -> Option<Arc<dyn MediaHandle>> {
        self.entries.pop(&(reciter, verse))
    }

    /// Take a warmed handle out of the cache
    ///
    /// Equivalent to `get` followed by `remove`; once claimed, no later
    /// lookup returns this handle until it is put back.
    pub fn claim(&mut self, reciter: ReciterId, verse: VerseKey) -> Option<Arc<dyn MediaHandle>> {
        let handle = self.remove(reciter, verse);
        if handle.is_some() {
            debug!(%reciter, %verse, "Preload claimed");
        }
        handle
    }

    pub fn contains(&self, reciter: ReciterId, verse: VerseKey) -> bool {
        self.entries.contains(&(reciter, verse))
    }

    /// Whether a preload for this key is currently resolving
    pub fn is_in_flight(&self, reciter: ReciterId, verse: VerseKey) -> bool {
        self.in_flight.contains(&(reciter, verse))
    }

    /// Mark a preload as started
    ///
    /// Returns `false` when the key is already warm or already being
    /// fetched, in which case the caller must not resolve it again.
    pub fn begin_fetch(&mut self, reciter: ReciterId, verse: VerseKey) -> bool {
        let key = (reciter, verse);
        if self.entries.contains(&key) {
            return false;
        }
        self.in_flight.insert(key)
    }

    /// Mark a preload as finished
    ///
    /// Returns whether the result may still be cached: `false` when the
    /// cache was cleared after the fetch began at `epoch`.
    pub fn finish_fetch(&mut self, reciter: ReciterId, verse: VerseKey, epoch: u64) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.in_flight.remove(&(reciter, verse));
        true
    }

    /// Generation counter, bumped by every [`clear`](Self::clear)
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Drop every warmed handle and forget in-flight fetches
    pub fn clear(&mut self) {
        debug!(
            entries = self.entries.len(),
            in_flight = self.in_flight.len(),
            "Preload cache cleared"
        );
        self.entries.clear();
        self.in_flight.clear();
        self.epoch += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for PreloadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreloadCache")
            .field("entries", &self.entries.len())
            .field("in_flight", &self.in_flight.len())
            .field("epoch", &self.epoch)
            .finish()
    }
}
