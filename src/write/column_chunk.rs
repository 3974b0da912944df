use std::collections::HashSet;
use std::io::Write;

use parquet_format_safe::thrift::protocol::TCompactOutputProtocol;
use parquet_format_safe::{ColumnChunk, ColumnMetaData, Encoding, PageType};

use crate::compression::Compression;
use crate::error::{Error, Result};
use crate::metadata::ColumnDescriptor;
use crate::page::CompressedPage;
use crate::schema::types::{physical_type_to_type, ParquetType};
use crate::statistics::serialize_statistics;

use super::page::{write_page, PageWriteSpec};
use super::statistics::reduce;
use super::DynIter;

/// Writes all `compressed_pages` of one column chunk, returning the thrift
/// [`ColumnChunk`] metadata and the number of bytes written.
pub fn write_column_chunk<'a, W: Write>(
    writer: &mut W,
    mut offset: u64,
    descriptor: &ColumnDescriptor,
    compression: Compression,
    compressed_pages: DynIter<'a, Result<CompressedPage>>,
) -> Result<(ColumnChunk, u64)> {
    // write every page
    let initial = offset;

    let mut specs = vec![];
    for compressed_page in compressed_pages {
        let spec = write_page(writer, offset, &compressed_page?)?;
        offset += spec.bytes_written;
        specs.push(spec);
    }
    let mut bytes_written = offset - initial;

    let column_chunk = build_column_chunk(&specs, descriptor, compression)?;

    // write the chunk metadata
    let mut protocol = TCompactOutputProtocol::new(&mut *writer);
    bytes_written += column_chunk.write_to_out_protocol(&mut protocol)? as u64;

    Ok((column_chunk, bytes_written))
}

fn build_column_chunk(
    specs: &[PageWriteSpec],
    descriptor: &ColumnDescriptor,
    compression: Compression,
) -> Result<ColumnChunk> {
    // the chunk metadata accounts the page-data bodies, never page headers
    let total_compressed_size = specs
        .iter()
        .map(|spec| spec.header.compressed_page_size as i64)
        .sum();
    let total_uncompressed_size = specs
        .iter()
        .map(|spec| spec.header.uncompressed_page_size as i64)
        .sum();
    let data_page_offset = specs.first().map(|spec| spec.offset).unwrap_or(0) as i64;
    let num_values = specs
        .iter()
        .map(|spec| {
            let type_ = spec.header.type_;
            match type_ {
                PageType::DATA_PAGE => spec
                    .header
                    .data_page_header
                    .as_ref()
                    .map(|header| header.num_values as i64)
                    .unwrap_or_default(),
                PageType::DATA_PAGE_V2 => spec
                    .header
                    .data_page_header_v2
                    .as_ref()
                    .map(|header| header.num_values as i64)
                    .unwrap_or_default(),
                _ => 0, // only data pages contribute
            }
        })
        .sum();

    // the supported write path: PLAIN values and RLE levels
    let encodings = specs
        .iter()
        .flat_map(|spec| match spec.header.type_ {
            PageType::DATA_PAGE => vec![
                spec.header
                    .data_page_header
                    .as_ref()
                    .map(|header| header.encoding)
                    .unwrap_or(Encoding::PLAIN),
                Encoding::RLE,
            ],
            _ => vec![],
        })
        .collect::<HashSet<_>>() // unique
        .into_iter() // to vec
        .collect();

    let statistics = specs.iter().map(|x| &x.statistics).collect::<Vec<_>>();
    let statistics = reduce(&statistics)?;
    let statistics = statistics.map(|x| serialize_statistics(x.as_ref()));

    let type_ = match descriptor.type_() {
        ParquetType::PrimitiveType { physical_type, .. } => physical_type_to_type(physical_type).0,
        _ => return Err(Error::oos("Trying to write a chunk of a non-physical type")),
    };

    let metadata = ColumnMetaData {
        type_,
        encodings,
        path_in_schema: descriptor.path_in_schema().to_vec(),
        codec: compression.into(),
        num_values,
        total_uncompressed_size,
        total_compressed_size,
        key_value_metadata: None,
        data_page_offset,
        index_page_offset: None,
        dictionary_page_offset: None,
        statistics,
        encoding_stats: None,
        bloom_filter_offset: None,
    };

    Ok(ColumnChunk {
        file_path: None, // same file for now.
        file_offset: data_page_offset + total_compressed_size,
        meta_data: Some(metadata),
        offset_index_offset: None,
        offset_index_length: None,
        column_index_offset: None,
        column_index_length: None,
        crypto_metadata: None,
        encrypted_column_metadata: None,
    })
}
