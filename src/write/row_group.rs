use std::io::Write;

use parquet_format_safe::RowGroup;

use crate::compression::Compression;
use crate::error::{Error, Result};
use crate::metadata::ColumnDescriptor;

use super::column_chunk::write_column_chunk;
use super::RowGroupIter;

/// Writes the column chunks of one row group, returning the thrift
/// [`RowGroup`] metadata and the number of bytes written.
pub fn write_row_group<'a, W: Write>(
    writer: &mut W,
    mut offset: u64,
    descriptors: &[ColumnDescriptor],
    compression: Compression,
    columns: RowGroupIter<'a>,
    num_rows: usize,
) -> Result<(RowGroup, u64)> {
    let initial = offset;

    let mut column_iter = descriptors.iter().zip(columns);
    let mut columns = vec![];
    for (descriptor, page_iter) in &mut column_iter {
        let (column, size) =
            write_column_chunk(writer, offset, descriptor, compression, page_iter?)?;
        offset += size;
        columns.push(column);
    }
    if columns.len() != descriptors.len() {
        return Err(Error::oos(
            "a row group must contain one column chunk per leaf column",
        ));
    }
    let bytes_written = offset - initial;

    // the row group's byte size is the uncompressed size of its data
    let total_byte_size = columns
        .iter()
        .map(|c| {
            c.meta_data
                .as_ref()
                .map(|x| x.total_uncompressed_size)
                .unwrap_or_default()
        })
        .sum();

    Ok((
        RowGroup {
            columns,
            total_byte_size,
            num_rows: num_rows as i64,
            sorting_columns: None,
            file_offset: None,
            total_compressed_size: None,
            ordinal: None,
        },
        bytes_written,
    ))
}
