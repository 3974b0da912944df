use crate::compression::{self, Compression};
use crate::error::{Error, Result};
use crate::page::{CompressedDataPage, CompressedPage, DataPage, DataPageHeader};

/// Compresses an (uncompressed) [`DataPage`] into a [`CompressedPage`].
/// Only v1 data pages are written; their whole buffer is compressed.
pub fn compress(page: DataPage, codec: Compression) -> Result<CompressedPage> {
    if matches!(page.header(), DataPageHeader::V2(_)) {
        return Err(Error::UnsupportedFeature(
            "writing v2 data pages".to_string(),
        ));
    }

    let uncompressed_page_size = page.buffer().len();
    let (header, buffer, descriptor) = page.into_parts();

    let buffer = if codec != Compression::Uncompressed {
        let mut compressed = Vec::with_capacity(buffer.len());
        compression::compress(&codec, &buffer, &mut compressed)?;
        compressed
    } else {
        buffer
    };

    Ok(CompressedPage::Data(CompressedDataPage::new(
        header,
        buffer,
        codec,
        uncompressed_page_size,
        None,
        descriptor,
    )))
}
