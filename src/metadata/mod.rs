mod column_chunk_metadata;
mod column_descriptor;
mod file_metadata;
mod logical_descriptor;
mod row_metadata;
mod schema_descriptor;

pub use column_chunk_metadata::ColumnChunkMetaData;
pub use column_descriptor::ColumnDescriptor;
pub use file_metadata::FileMetaData;
pub use logical_descriptor::{logical_columns, LogicalDescriptor};
pub use row_metadata::RowGroupMetaData;
pub use schema_descriptor::SchemaDescriptor;

pub use parquet_format_safe::KeyValue;
