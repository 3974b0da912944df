use parquet_format_safe::DataPageHeaderV2;

use crate::compression::{self, Compression};
use crate::error::{Error, Result};
use crate::page::{CompressedDataPage, DataPage, DataPageHeader};

fn decompress_v1(compressed: &[u8], compression: Compression, buffer: &mut [u8]) -> Result<()> {
    compression::decompress(&compression, compressed, buffer)
}

fn decompress_v2(
    compressed: &[u8],
    page_header: &DataPageHeaderV2,
    compression: Compression,
    buffer: &mut [u8],
) -> Result<()> {
    // When processing data page v2, depending on enabled compression for the
    // page, we should account for uncompressed data ('offset') of
    // repetition and definition levels.
    //
    // We always use 0 offset for other pages other than v2, `true` flag means
    // that compression will be applied if decompressor is defined
    let offset = (page_header.definition_levels_byte_length
        + page_header.repetition_levels_byte_length) as usize;
    // When the is_compressed flag is missing the page is considered compressed
    let can_decompress = page_header.is_compressed.unwrap_or(true);

    if can_decompress {
        if offset > buffer.len() || offset > compressed.len() {
            return Err(Error::decode("the level streams are longer than the page"));
        }
        // the levels are not compressed
        buffer[..offset].copy_from_slice(&compressed[..offset]);

        compression::decompress(&compression, &compressed[offset..], &mut buffer[offset..])?;
    } else {
        if buffer.len() != compressed.len() {
            return Err(Error::decode(
                "the uncompressed page size does not match the page's bytes",
            ));
        }
        buffer.copy_from_slice(compressed);
    }
    Ok(())
}

/// Decompresses the page, using `buffer` for decompression.
/// If `page.buffer.len() == 0`, there was no decompression and the buffer was moved.
/// Else, decompression took place.
pub fn decompress(mut page: CompressedDataPage, buffer: &mut Vec<u8>) -> Result<DataPage> {
    let uncompressed_page_size = page.uncompressed_size();
    let is_compressed = match page.header() {
        DataPageHeader::V1(_) => page.compression() != Compression::Uncompressed,
        DataPageHeader::V2(header) => {
            page.compression() != Compression::Uncompressed
                && header.is_compressed.unwrap_or(true)
        }
    };

    if is_compressed {
        // prepare the compression buffer
        buffer.clear();
        buffer.resize(uncompressed_page_size, 0);

        match page.header() {
            DataPageHeader::V1(_) => {
                decompress_v1(&page.buffer, page.compression(), buffer)?
            }
            DataPageHeader::V2(header) => {
                decompress_v2(&page.buffer, header, page.compression(), buffer)?
            }
        }
        Ok(DataPage::new(
            page.header,
            std::mem::take(buffer),
            page.dictionary_page,
            page.descriptor,
        ))
    } else {
        // the page is already uncompressed: move its buffer
        Ok(DataPage::new(
            page.header,
            std::mem::take(&mut page.buffer),
            page.dictionary_page,
            page.descriptor,
        ))
    }
}

impl streaming_decompression::Compressed for CompressedDataPage {
    #[inline]
    fn is_compressed(&self) -> bool {
        self.compression() != Compression::Uncompressed
    }
}

impl streaming_decompression::Decompressed for DataPage {
    #[inline]
    fn buffer_mut(&mut self) -> &mut Vec<u8> {
        self.buffer_mut()
    }
}

/// A [`crate::FallibleStreamingIterator`] that decompresses [`CompressedDataPage`]
/// into [`DataPage`], re-using an internal buffer.
pub type Decompressor<I> = streaming_decompression::Decompressor<
    CompressedDataPage,
    DataPage,
    fn(CompressedDataPage, &mut Vec<u8>) -> Result<DataPage>,
    Error,
    I,
>;

/// A [`crate::FallibleStreamingIterator`] of [`DataPage`] obtained by
/// decompressing an iterator of [`CompressedDataPage`].
pub struct BasicDecompressor<I: Iterator<Item = Result<CompressedDataPage>>> {
    iter: Decompressor<I>,
}

impl<I: Iterator<Item = Result<CompressedDataPage>>> BasicDecompressor<I> {
    /// Returns a new [`BasicDecompressor`].
    pub fn new(iter: I, buffer: Vec<u8>) -> Self {
        Self {
            iter: Decompressor::new(iter, buffer, decompress),
        }
    }

    /// Returns its internal buffer, consuming itself.
    pub fn into_inner(self) -> Vec<u8> {
        self.iter.into_inner()
    }
}

impl<I: Iterator<Item = Result<CompressedDataPage>>> streaming_decompression::FallibleStreamingIterator
    for BasicDecompressor<I>
{
    type Item = DataPage;
    type Error = Error;

    fn advance(&mut self) -> Result<()> {
        self.iter.advance()
    }

    fn get(&self) -> Option<&DataPage> {
        self.iter.get()
    }
}
