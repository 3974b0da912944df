//! Models of the parquet schema: physical types, the type tree, and the
//! conversions from/to the thrift `SchemaElement` sequence.

pub mod io_thrift;
pub mod types;

pub use crate::parquet_bridge::Repetition;
