#![forbid(unsafe_code)]
//! Columnar codec engine for the Apache Parquet format.
//!
//! This crate translates between logical per-row values and the bit-level
//! byte streams that make up a Parquet column chunk on disk: wire-level
//! encodings, definition/repetition levels, page framing, compression and
//! the row-group/footer assembly required to read and write whole files.

pub mod compression;
pub mod deserialize;
pub mod encoding;
pub mod error;
pub mod metadata;
pub mod page;
mod parquet_bridge;
pub mod read;
pub mod schema;
pub mod statistics;
pub mod types;
pub mod write;

pub use streaming_decompression::fallible_streaming_iterator;
pub use streaming_decompression::FallibleStreamingIterator;

const FOOTER_SIZE: u64 = 8;
const PARQUET_MAGIC: [u8; 4] = [b'P', b'A', b'R', b'1'];

/// The number of bytes read at the end of the parquet file on first read
const DEFAULT_FOOTER_READ_SIZE: u64 = 64 * 1024;
