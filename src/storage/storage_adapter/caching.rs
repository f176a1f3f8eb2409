//! A least recently used caching storage adapter.

use std::{num::NonZeroUsize, sync::Arc};

use lru::LruCache;
use parking_lot::Mutex;

use crate::{
    config::global_config,
    storage::{
        Bytes, ListableStorageTraits, MaybeBytes, ReadableStorageTraits, StorageError, StoreKey,
        StoreKeys, StorePrefix, WritableStorageTraits,
    },
};

/// A caching store with a fixed entry capacity and least recently used (LRU) eviction.
///
/// - `get` returns a cached value and marks it most recently used. On a miss, the value is read from the inner storage and cached if present.
/// - `set` writes through to the inner storage, then caches the value as most recently used.
/// - `erase` erases from the inner storage and drops the cached value.
/// - `exists`, `list`, and `list_prefix` go straight to the inner storage.
///
/// The cache lock is held for the whole of each call, so a lookup, its recency update, and any eviction are one atomic step.
/// The inner storage sees at most one call from this adapter at a time.
pub struct CachingStore<TStorage: ?Sized> {
    storage: Arc<TStorage>,
    cache: Mutex<LruCache<StoreKey, Bytes>>,
}

impl<TStorage: ?Sized> core::fmt::Debug for CachingStore<TStorage> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let cache = self.cache.lock();
        write!(f, "caching store ({}/{})", cache.len(), cache.cap())
    }
}

impl<TStorage: ?Sized> CachingStore<TStorage> {
    /// Create a new caching store with the [cache capacity](crate::config::Config#cache-capacity) of the global configuration.
    #[must_use]
    pub fn new(storage: Arc<TStorage>) -> Self {
        let capacity = NonZeroUsize::new(global_config().cache_capacity()).unwrap_or(NonZeroUsize::MIN);
        Self::with_capacity(storage, capacity)
    }

    /// Create a new caching store holding at most `capacity` values.
    #[must_use]
    pub fn with_capacity(storage: Arc<TStorage>, capacity: NonZeroUsize) -> Self {
        Self {
            storage,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the number of cached values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Returns true if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of cached values.
    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize {
        self.cache.lock().cap()
    }

    /// Returns true if `key` is cached. Does not change its recency.
    #[must_use]
    pub fn contains(&self, key: &StoreKey) -> bool {
        self.cache.lock().contains(key)
    }

    /// Returns the cached keys from most to least recently used.
    #[must_use]
    pub fn cached_keys(&self) -> StoreKeys {
        self.cache.lock().iter().map(|(key, _)| key.clone()).collect()
    }

    /// Drop every cached value. The inner storage is unchanged.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    /// Returns the inner storage.
    #[must_use]
    pub fn storage(&self) -> &Arc<TStorage> {
        &self.storage
    }
}

fn cache_insert(cache: &mut LruCache<StoreKey, Bytes>, key: &StoreKey, value: Bytes) {
    if let Some((evicted, _)) = cache.push(key.clone(), value) {
        if &evicted != key {
            log::trace!("caching store evicted {evicted}");
        }
    }
}

impl<TStorage: ?Sized + ReadableStorageTraits> ReadableStorageTraits for CachingStore<TStorage> {
    fn get(&self, key: &StoreKey) -> Result<MaybeBytes, StorageError> {
        let mut cache = self.cache.lock();
        if let Some(value) = cache.get(key) {
            log::trace!("caching store hit {key}");
            return Ok(Some(value.clone()));
        }
        log::trace!("caching store miss {key}");
        let value = self.storage.get(key)?;
        if let Some(value) = &value {
            cache_insert(&mut cache, key, value.clone());
        }
        Ok(value)
    }

    fn exists(&self, key: &StoreKey) -> Result<bool, StorageError> {
        self.storage.exists(key)
    }
}

impl<TStorage: ?Sized + WritableStorageTraits> WritableStorageTraits for CachingStore<TStorage> {
    fn set(&self, key: &StoreKey, value: Bytes) -> Result<(), StorageError> {
        let mut cache = self.cache.lock();
        // a failed write leaves no stale cached value
        cache.pop(key);
        self.storage.set(key, value.clone())?;
        cache_insert(&mut cache, key, value);
        Ok(())
    }

    fn erase(&self, key: &StoreKey) -> Result<(), StorageError> {
        let mut cache = self.cache.lock();
        cache.pop(key);
        self.storage.erase(key)
    }

    fn erase_prefix(&self, prefix: &StorePrefix) -> Result<(), StorageError> {
        let mut cache = self.cache.lock();
        let erased: Vec<StoreKey> = cache
            .iter()
            .filter(|(key, _)| key.has_prefix(prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &erased {
            cache.pop(key);
        }
        self.storage.erase_prefix(prefix)
    }
}

impl<TStorage: ?Sized + ListableStorageTraits> ListableStorageTraits for CachingStore<TStorage> {
    fn list(&self) -> Result<StoreKeys, StorageError> {
        self.storage.list()
    }

    fn list_prefix(&self, prefix: &StorePrefix) -> Result<StoreKeys, StorageError> {
        self.storage.list_prefix(prefix)
    }
}
