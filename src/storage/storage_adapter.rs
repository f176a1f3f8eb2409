//! Storage adapters.
//!
//! A storage adapter wraps another storage and exposes the same storage traits.

mod caching;
mod usage_log;

pub use caching::CachingStore;
pub use usage_log::UsageLogStorageAdapter;
