pub mod filesystem_store;
pub mod memory_store;

#[cfg(feature = "zip")]
pub mod zip_store;
