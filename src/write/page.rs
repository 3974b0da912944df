use std::io::Write;
use std::sync::Arc;

use parquet_format_safe::thrift::protocol::TCompactOutputProtocol;
use parquet_format_safe::PageType;

use crate::error::{Error, Result};
use crate::page::{CompressedDataPage, CompressedPage, DataPageHeader, ParquetPageHeader};
use crate::statistics::Statistics;

fn maybe_bytes(uncompressed: usize, compressed: usize) -> Result<(i32, i32)> {
    let uncompressed_page_size: i32 = uncompressed.try_into().map_err(|_| {
        Error::oos(format!(
            "A page can only contain i32::MAX uncompressed bytes. This one contains {}",
            uncompressed
        ))
    })?;

    let compressed_page_size: i32 = compressed.try_into().map_err(|_| {
        Error::oos(format!(
            "A page can only contain i32::MAX compressed bytes. This one contains {}",
            compressed
        ))
    })?;

    Ok((uncompressed_page_size, compressed_page_size))
}

/// Contains page write metrics.
pub struct PageWriteSpec {
    pub header: ParquetPageHeader,
    pub header_size: u64,
    pub offset: u64,
    pub bytes_written: u64,
    pub statistics: Option<Arc<dyn Statistics>>,
}

/// Writes `compressed_page` at `offset`, returning the metrics of the write.
pub fn write_page<W: Write>(
    writer: &mut W,
    offset: u64,
    compressed_page: &CompressedPage,
) -> Result<PageWriteSpec> {
    let header = match compressed_page {
        CompressedPage::Data(page) => assemble_data_page_header(page)?,
        CompressedPage::Dict(_) => {
            return Err(Error::UnsupportedFeature(
                "writing dictionary pages".to_string(),
            ))
        }
    };

    let header_size = write_page_header(writer, &header)?;
    let mut bytes_written = header_size;

    let buffer = compressed_page.buffer();
    writer.write_all(buffer)?;
    bytes_written += buffer.len() as u64;

    let statistics = match compressed_page {
        CompressedPage::Data(page) => page.statistics().transpose()?,
        CompressedPage::Dict(_) => None,
    };

    Ok(PageWriteSpec {
        header,
        header_size,
        offset,
        bytes_written,
        statistics,
    })
}

fn assemble_data_page_header(page: &CompressedDataPage) -> Result<ParquetPageHeader> {
    let (uncompressed_page_size, compressed_page_size) =
        maybe_bytes(page.uncompressed_size(), page.compressed_size())?;

    let mut page_header = ParquetPageHeader {
        type_: match page.header() {
            DataPageHeader::V1(_) => PageType::DATA_PAGE,
            DataPageHeader::V2(_) => PageType::DATA_PAGE_V2,
        },
        uncompressed_page_size,
        compressed_page_size,
        crc: None,
        data_page_header: None,
        index_page_header: None,
        dictionary_page_header: None,
        data_page_header_v2: None,
    };

    match page.header() {
        DataPageHeader::V1(header) => {
            page_header.data_page_header = Some(header.clone());
        }
        DataPageHeader::V2(header) => {
            page_header.data_page_header_v2 = Some(header.clone());
        }
    }
    Ok(page_header)
}

/// Writes the thrift-encoded page header, returning its size in bytes.
fn write_page_header<W: Write>(writer: &mut W, header: &ParquetPageHeader) -> Result<u64> {
    let mut protocol = TCompactOutputProtocol::new(writer);
    Ok(header.write_to_out_protocol(&mut protocol)? as u64)
}
