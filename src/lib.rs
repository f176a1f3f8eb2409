//! A compact rust library for chunked N-dimensional arrays stored in the [Zarr V3](https://zarr.dev) format.
//!
//! Arrays are split into independently addressable chunks.
//! Each chunk is passed through a [codec chain](array::codec::CodecChain) (byte order normalisation, compression, checksumming) and written as an opaque value under a key in a [store](storage::store).
//! [Groups](group::Group) provide a hierarchical namespace over a store.
//!
//! ## Getting Started
//! [`array::Array`], [`group::Group`], and [`storage`] are good places to start.
//!
//! ## Example
//! ```rust
//! # use std::sync::Arc;
//! use zarrs_lite::array::{ArrayBuilder, DataType};
//! use zarrs_lite::storage::store::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let array = ArrayBuilder::new(vec![10, 20], DataType::Int32, vec![5, 5], 0i64.into())
//!     .build(store.clone(), "/data")?;
//! array.store_metadata()?;
//!
//! array.write_chunk(&[0, 0], &[42i32; 25])?;
//! assert_eq!(array.read_chunk::<i32>(&[0, 0])?, vec![42; 25]);
//! assert_eq!(array.read_chunk::<i32>(&[1, 3])?, vec![0; 25]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Features
//! #### Default
//!  - Codecs: `crc32c`, `gzip`, `zstd`.
//!  - Stores: `zip` (read-only).
//!
//! #### Non-Default
//!  - `cli`: the `zarrs_lite` command line tool.
//!
//! ## Logging
//! Diagnostics are emitted through the [`log`] facade.
//! Storage access patterns can be traced with the [`UsageLogStorageAdapter`](storage::storage_adapter::UsageLogStorageAdapter).

#![warn(unused_variables)]
#![warn(dead_code)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![deny(clippy::missing_panics_doc)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod array;
pub mod config;
pub mod group;
pub mod metadata;
pub mod node;
pub mod plugin;
pub mod storage;
