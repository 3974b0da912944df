use std::sync::Arc;

use parquet_format_safe::{ColumnChunk, ColumnMetaData, Encoding};

use super::column_descriptor::ColumnDescriptor;
use crate::compression::Compression;
use crate::error::{Error, Result};
use crate::statistics::{deserialize_statistics, Statistics};

/// Metadata for a column chunk.
// This contains the `ColumnDescriptor` associated with the chunk so that
// deserializers have access to the descriptor (e.g. physical, converted, logical).
#[derive(Debug, Clone)]
pub struct ColumnChunkMetaData {
    column_chunk: ColumnChunk,
    column_descr: ColumnDescriptor,
}

impl ColumnChunkMetaData {
    /// File offset of the metadata of this column chunk, if stored separately.
    pub fn file_offset(&self) -> i64 {
        self.column_chunk.file_offset
    }

    fn column_metadata(&self) -> &ColumnMetaData {
        // the existence of the metadata is verified in `try_from_thrift`
        self.column_chunk.meta_data.as_ref().unwrap()
    }

    /// The [`ColumnDescriptor`] of this column chunk.
    pub fn descriptor(&self) -> &ColumnDescriptor {
        &self.column_descr
    }

    /// Total number of values in this column chunk, nulls included.
    pub fn num_values(&self) -> i64 {
        self.column_metadata().num_values
    }

    /// The [`Compression`] of this column chunk.
    pub fn compression(&self) -> Compression {
        // the codec is verified in `try_from_thrift`
        self.column_metadata().codec.try_into().unwrap()
    }

    /// Returns the total compressed data size of this column chunk.
    pub fn compressed_size(&self) -> i64 {
        self.column_metadata().total_compressed_size
    }

    /// Returns the total uncompressed data size of this column chunk.
    pub fn uncompressed_size(&self) -> i64 {
        self.column_metadata().total_uncompressed_size
    }

    /// Returns the offset of the first data page.
    pub fn data_page_offset(&self) -> i64 {
        self.column_metadata().data_page_offset
    }

    /// Returns the offset of the dictionary page, if any.
    pub fn dictionary_page_offset(&self) -> Option<i64> {
        self.column_metadata().dictionary_page_offset
    }

    /// Returns the encodings used in this column chunk.
    pub fn encodings(&self) -> &Vec<Encoding> {
        &self.column_metadata().encodings
    }

    /// Decodes the chunk's statistics, if any.
    pub fn statistics(&self) -> Option<Result<Arc<dyn Statistics>>> {
        self.column_metadata()
            .statistics
            .as_ref()
            .map(|x| deserialize_statistics(x, self.column_descr.physical_type()))
    }

    /// Returns the offset and length in bytes of this column chunk's
    /// compressed span within the file.
    pub fn byte_range(&self) -> (u64, u64) {
        let col_start = if let Some(dict_page_offset) = self.dictionary_page_offset() {
            dict_page_offset
        } else {
            self.data_page_offset()
        };
        let col_len = self.compressed_size();
        debug_assert!(col_start >= 0 && col_len >= 0);
        (col_start as u64, col_len as u64)
    }

    /// Method to convert from Thrift.
    pub fn try_from_thrift(
        column_descr: ColumnDescriptor,
        column_chunk: ColumnChunk,
    ) -> Result<Self> {
        let metadata = column_chunk
            .meta_data
            .as_ref()
            .ok_or_else(|| Error::oos("A column chunk must have metadata"))?;
        let _: Compression = metadata.codec.try_into()?;

        Ok(Self {
            column_chunk,
            column_descr,
        })
    }

    /// Method to convert to Thrift.
    pub fn into_thrift(self) -> ColumnChunk {
        self.column_chunk
    }
}
