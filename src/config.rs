//! `zarrs_lite` global configuration options.

use std::sync::OnceLock;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Global configuration options for the `zarrs_lite` crate.
///
/// Retrieve the global [`Config`] with [`global_config`] and modify it with [`global_config_mut`].
///
/// ## Validate Checksums
///  > default: [`true`]
///
/// If enabled, checksum codecs (e.g. `crc32c`) will validate that encoded data matches stored checksums, otherwise validation is skipped.
///
/// ## Cache Capacity
///  > default: `128`
///
/// The number of entries retained by a [`CachingStore`](crate::storage::storage_adapter::CachingStore) created with [`CachingStore::new`](crate::storage::storage_adapter::CachingStore::new).
///
/// ## Metadata Pretty
///  > default: [`true`]
///
/// If enabled, `zarr.json` metadata documents are written pretty-printed.
#[derive(Debug)]
pub struct Config {
    validate_checksums: bool,
    cache_capacity: usize,
    metadata_pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            validate_checksums: true,
            cache_capacity: 128,
            metadata_pretty: true,
        }
    }
}

impl Config {
    /// Get the [validate checksums](#validate-checksums) configuration.
    #[must_use]
    pub fn validate_checksums(&self) -> bool {
        self.validate_checksums
    }

    /// Set the [validate checksums](#validate-checksums) configuration.
    pub fn set_validate_checksums(&mut self, validate_checksums: bool) {
        self.validate_checksums = validate_checksums;
    }

    /// Get the [cache capacity](#cache-capacity) configuration.
    #[must_use]
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }

    /// Set the [cache capacity](#cache-capacity) configuration.
    ///
    /// A capacity of zero is treated as one.
    pub fn set_cache_capacity(&mut self, cache_capacity: usize) {
        self.cache_capacity = cache_capacity.max(1);
    }

    /// Get the [metadata pretty](#metadata-pretty) configuration.
    #[must_use]
    pub fn metadata_pretty(&self) -> bool {
        self.metadata_pretty
    }

    /// Set the [metadata pretty](#metadata-pretty) configuration.
    pub fn set_metadata_pretty(&mut self, metadata_pretty: bool) {
        self.metadata_pretty = metadata_pretty;
    }
}

static CONFIG: OnceLock<RwLock<Config>> = OnceLock::new();

/// Returns a reference to the global `zarrs_lite` configuration.
///
/// Deadlocks if the current thread holds the guard returned by [`global_config_mut`].
pub fn global_config() -> RwLockReadGuard<'static, Config> {
    CONFIG
        .get_or_init(|| RwLock::new(Config::default()))
        .read()
}

/// Returns a mutable reference to the global `zarrs_lite` configuration.
///
/// Deadlocks if the current thread already holds a guard of the global configuration.
pub fn global_config_mut() -> RwLockWriteGuard<'static, Config> {
    CONFIG
        .get_or_init(|| RwLock::new(Config::default()))
        .write()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_cache_capacity() {
        let capacity = global_config().cache_capacity();
        global_config_mut().set_cache_capacity(0);
        assert_eq!(global_config().cache_capacity(), 1);
        global_config_mut().set_cache_capacity(capacity);
        assert_eq!(global_config().cache_capacity(), capacity);
    }

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert!(config.validate_checksums());
        assert!(config.metadata_pretty());
        assert_eq!(config.cache_capacity(), 128);
    }
}
