//! Zarr stores.
//!
//! A store holds encoded chunks and `zarr.json` metadata documents as opaque values under [`StoreKey`](super::StoreKey)s.

mod store_sync;

pub use store_sync::filesystem_store::{FilesystemStore, FilesystemStoreCreateError};
pub use store_sync::memory_store::MemoryStore;

#[cfg(feature = "zip")]
pub use store_sync::zip_store::{ZipStore, ZipStoreCreateError};
