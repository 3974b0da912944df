mod compression;
pub mod levels;
mod metadata;
mod page;

use std::io::{Read, Seek, SeekFrom};

pub use compression::{decompress, BasicDecompressor, Decompressor};
pub use metadata::{deserialize_metadata, read_metadata};
pub use page::{PageMetaData, PageReader};

use crate::deserialize::{self, compose_map, Array, DecodedPage, Value};
use crate::error::{Error, Result};
use crate::metadata::{
    logical_columns, ColumnChunkMetaData, ColumnDescriptor, FileMetaData, LogicalDescriptor,
    RowGroupMetaData,
};
use crate::schema::types::PhysicalType;
use crate::FallibleStreamingIterator;

/// The default maximum number of bytes thrift is allowed to allocate to
/// read a page header.
pub const DEFAULT_MAX_HEADER_SIZE: usize = 1024 * 1024;

/// Returns a new [`PageReader`] by seeking `reader` to the beginning of
/// `column_chunk`. `max_header_size` is the maximum number of bytes thrift
/// is allowed to allocate to read a page header.
pub fn get_page_iterator<R: Read + Seek>(
    column_chunk: &ColumnChunkMetaData,
    mut reader: R,
    scratch: Vec<u8>,
    max_header_size: usize,
) -> Result<PageReader<R>> {
    let (col_start, _) = column_chunk.byte_range();
    reader.seek(SeekFrom::Start(col_start))?;
    Ok(PageReader::new(
        reader,
        column_chunk,
        scratch,
        max_header_size,
    ))
}

fn empty_array(column: &ColumnChunkMetaData) -> Array {
    let base = match column.descriptor().physical_type() {
        PhysicalType::Boolean => Array::Boolean(vec![]),
        PhysicalType::Int32 => Array::Int32(vec![]),
        PhysicalType::Int64 => Array::Int64(vec![]),
        PhysicalType::Int96 => Array::Int96(vec![]),
        PhysicalType::Float => Array::Float32(vec![]),
        PhysicalType::Double => Array::Float64(vec![]),
        PhysicalType::ByteArray => Array::Binary(vec![]),
        PhysicalType::FixedLenByteArray(_) => Array::FixedLenBinary(vec![]),
    };
    if column.descriptor().max_rep_level() > 0 {
        Array::List(vec![])
    } else {
        base
    }
}

/// Decodes a whole column chunk into an [`Array`], page by page in file
/// order. An empty chunk (0 rows) decodes to an empty typed array.
pub fn read_column_chunk<R: Read + Seek>(
    reader: &mut R,
    column: &ColumnChunkMetaData,
) -> Result<Array> {
    let pages = get_page_iterator(column, reader, vec![], DEFAULT_MAX_HEADER_SIZE)?;
    let mut decompressor = BasicDecompressor::new(pages, vec![]);

    let mut array: Option<Array> = None;
    while let Some(page) = decompressor.next()? {
        let page_array = deserialize::page_to_array(page)?;
        match array.as_mut() {
            Some(array) => array.extend(page_array)?,
            None => array = Some(page_array),
        }
    }
    Ok(array.unwrap_or_else(|| empty_array(column)))
}

/// Decodes a whole column chunk into its levels and dense values, page by
/// page in file order, without assembling its shape.
fn read_decoded_chunk<R: Read + Seek>(
    reader: &mut R,
    column: &ColumnChunkMetaData,
) -> Result<Option<DecodedPage>> {
    let pages = get_page_iterator(column, reader, vec![], DEFAULT_MAX_HEADER_SIZE)?;
    let mut decompressor = BasicDecompressor::new(pages, vec![]);

    let mut decoded: Option<DecodedPage> = None;
    while let Some(page) = decompressor.next()? {
        let page_decoded = deserialize::decode_page(page)?;
        match decoded.as_mut() {
            Some(decoded) => decoded.extend(page_decoded)?,
            None => decoded = Some(page_decoded),
        }
    }
    Ok(decoded)
}

fn chunk_of<'a>(
    row_group: &'a RowGroupMetaData,
    leaf: &ColumnDescriptor,
) -> Result<&'a ColumnChunkMetaData> {
    row_group
        .columns()
        .iter()
        .find(|column| column.descriptor().path_in_schema() == leaf.path_in_schema())
        .ok_or_else(|| {
            Error::oos(format!(
                "the row group has no column chunk for the leaf {:?}",
                leaf.path_in_schema()
            ))
        })
}

/// Reads one [`LogicalDescriptor`] of `row_group` into an [`Array`]. The key
/// and value leaves of a map are read and merged into [`Array::Map`].
pub fn read_logical_column<R: Read + Seek>(
    reader: &mut R,
    row_group: &RowGroupMetaData,
    column: &LogicalDescriptor,
) -> Result<Array> {
    match column {
        LogicalDescriptor::Primitive(leaf) | LogicalDescriptor::List(leaf) => {
            read_column_chunk(reader, chunk_of(row_group, leaf)?)
        }
        LogicalDescriptor::Map { key, value } => {
            let key_decoded = read_decoded_chunk(reader, chunk_of(row_group, key)?)?;
            let value_decoded = read_decoded_chunk(reader, chunk_of(row_group, value)?)?;
            match (key_decoded, value_decoded) {
                (Some(key), Some(value)) => compose_map(key, value),
                _ => Ok(Array::Map(vec![])),
            }
        }
    }
}

/// Reads the logical columns of one row group, lazily invoking the page
/// reader over each requested column chunk's byte range.
pub struct RowGroupReader<'a, R: Read + Seek> {
    reader: &'a mut R,
    metadata: &'a FileMetaData,
    row_group: usize,
}

impl<'a, R: Read + Seek> RowGroupReader<'a, R> {
    pub fn new(reader: &'a mut R, metadata: &'a FileMetaData, row_group: usize) -> Self {
        Self {
            reader,
            metadata,
            row_group,
        }
    }

    /// The number of rows in this row group.
    pub fn num_rows(&self) -> i64 {
        self.metadata.row_groups[self.row_group].num_rows()
    }

    /// The logical columns of this row group.
    pub fn columns(&self) -> Vec<LogicalDescriptor> {
        logical_columns(self.metadata.schema())
    }

    /// Reads a single logical column into an [`Array`].
    pub fn read_column(&mut self, column: &LogicalDescriptor) -> Result<Array> {
        read_logical_column(
            self.reader,
            &self.metadata.row_groups[self.row_group],
            column,
        )
    }

    /// Reads every logical column into `(name, Array)` pairs, in schema
    /// order.
    pub fn read_all(&mut self) -> Result<Vec<(String, Array)>> {
        self.columns()
            .iter()
            .map(|column| {
                let array = self.read_column(column)?;
                Ok((column.name().to_string(), array))
            })
            .collect()
    }

    /// Materializes the rows of this row group: row `i` takes slot `i` of
    /// each column's decoded array.
    pub fn rows(&mut self) -> Result<Vec<Vec<Value>>> {
        let columns = self.read_all()?;
        let num_rows = columns.first().map(|(_, array)| array.len()).unwrap_or(0);
        if columns.iter().any(|(_, array)| array.len() != num_rows) {
            return Err(Error::oos(
                "the column chunks of a row group must have the same number of rows",
            ));
        }
        Ok((0..num_rows)
            .map(|i| columns.iter().map(|(_, array)| array.get(i)).collect())
            .collect())
    }
}
