mod page_dict;
pub use page_dict::*;

use std::sync::Arc;

pub use parquet_format_safe::{
    DataPageHeader as DataPageHeaderV1, DataPageHeaderV2, PageHeader as ParquetPageHeader,
};

pub use crate::parquet_bridge::{DataPageHeaderExt, PageType};

use crate::compression::Compression;
use crate::encoding::{get_length, Encoding};
use crate::error::{Error, Result};
use crate::metadata::ColumnDescriptor;
use crate::statistics::{deserialize_statistics, Statistics};

/// A [`CompressedDataPage`] is a compressed, encoded representation of a Parquet data page.
/// It holds actual data and thus cloning it is expensive.
#[derive(Debug)]
pub struct CompressedDataPage {
    pub(crate) header: DataPageHeader,
    pub(crate) buffer: Vec<u8>,
    pub(crate) compression: Compression,
    pub(crate) uncompressed_page_size: usize,
    pub(crate) dictionary_page: Option<Arc<dyn DictPage>>,
    pub(crate) descriptor: ColumnDescriptor,
}

impl CompressedDataPage {
    pub fn new(
        header: DataPageHeader,
        buffer: Vec<u8>,
        compression: Compression,
        uncompressed_page_size: usize,
        dictionary_page: Option<Arc<dyn DictPage>>,
        descriptor: ColumnDescriptor,
    ) -> Self {
        Self {
            header,
            buffer,
            compression,
            uncompressed_page_size,
            dictionary_page,
            descriptor,
        }
    }

    pub fn header(&self) -> &DataPageHeader {
        &self.header
    }

    pub fn uncompressed_size(&self) -> usize {
        self.uncompressed_page_size
    }

    pub fn compressed_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    pub fn num_values(&self) -> usize {
        self.header.num_values()
    }

    /// Decodes the raw statistics of the page's header into [`Statistics`].
    pub fn statistics(&self) -> Option<Result<Arc<dyn Statistics>>> {
        let statistics = match &self.header {
            DataPageHeader::V1(d) => &d.statistics,
            DataPageHeader::V2(d) => &d.statistics,
        };
        statistics
            .as_ref()
            .map(|x| deserialize_statistics(x, self.descriptor.physical_type()))
    }

    pub fn descriptor(&self) -> &ColumnDescriptor {
        &self.descriptor
    }
}

#[derive(Debug, Clone)]
pub enum DataPageHeader {
    V1(DataPageHeaderV1),
    V2(DataPageHeaderV2),
}

impl DataPageHeader {
    pub fn num_values(&self) -> usize {
        match &self {
            DataPageHeader::V1(d) => d.num_values as usize,
            DataPageHeader::V2(d) => d.num_values as usize,
        }
    }
}

/// A [`DataPage`] is an uncompressed, encoded representation of a Parquet data page.
/// It holds actual data and thus cloning it is expensive.
#[derive(Debug, Clone)]
pub struct DataPage {
    header: DataPageHeader,
    pub(crate) buffer: Vec<u8>,
    dictionary_page: Option<Arc<dyn DictPage>>,
    descriptor: ColumnDescriptor,
}

impl DataPage {
    pub fn new(
        header: DataPageHeader,
        buffer: Vec<u8>,
        dictionary_page: Option<Arc<dyn DictPage>>,
        descriptor: ColumnDescriptor,
    ) -> Self {
        Self {
            header,
            buffer,
            dictionary_page,
            descriptor,
        }
    }

    pub fn header(&self) -> &DataPageHeader {
        &self.header
    }

    pub fn dictionary_page(&self) -> Option<&Arc<dyn DictPage>> {
        self.dictionary_page.as_ref()
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buffer
    }

    pub fn num_values(&self) -> usize {
        self.header.num_values()
    }

    pub fn encoding(&self) -> Encoding {
        match &self.header {
            DataPageHeader::V1(d) => d.encoding(),
            DataPageHeader::V2(d) => d.encoding(),
        }
    }

    pub fn definition_level_encoding(&self) -> Encoding {
        match &self.header {
            DataPageHeader::V1(d) => d.definition_level_encoding(),
            DataPageHeader::V2(d) => d.definition_level_encoding(),
        }
    }

    pub fn repetition_level_encoding(&self) -> Encoding {
        match &self.header {
            DataPageHeader::V1(d) => d.repetition_level_encoding(),
            DataPageHeader::V2(d) => d.repetition_level_encoding(),
        }
    }

    /// Decodes the raw statistics into [`Statistics`].
    pub fn statistics(&self) -> Option<Result<Arc<dyn Statistics>>> {
        let statistics = match &self.header {
            DataPageHeader::V1(d) => &d.statistics,
            DataPageHeader::V2(d) => &d.statistics,
        };
        statistics
            .as_ref()
            .map(|x| deserialize_statistics(x, self.descriptor.physical_type()))
    }

    pub fn descriptor(&self) -> &ColumnDescriptor {
        &self.descriptor
    }

    /// Consumes the page, returning its header, buffer and descriptor.
    pub fn into_parts(self) -> (DataPageHeader, Vec<u8>, ColumnDescriptor) {
        (self.header, self.buffer, self.descriptor)
    }
}

/// Splits the page's buffer into `(repetition levels, definition levels, values)`.
///
/// For v1 pages each present level stream carries its own 4-byte little-endian
/// length prefix; for v2 pages the lengths come from the page header and the
/// streams have no prefix.
pub fn split_buffer(page: &DataPage) -> Result<(&[u8], &[u8], &[u8])> {
    match page.header() {
        DataPageHeader::V1(_) => split_buffer_v1(
            page.buffer(),
            page.descriptor().max_rep_level() > 0,
            page.descriptor().max_def_level() > 0,
        ),
        DataPageHeader::V2(header) => {
            let rep_length = header.repetition_levels_byte_length as usize;
            let def_length = header.definition_levels_byte_length as usize;
            split_buffer_v2(page.buffer(), rep_length, def_length)
        }
    }
}

/// Returns the slices corresponding to (rep levels, def levels, values) of a
/// v1 page buffer.
pub fn split_buffer_v1(buffer: &[u8], has_rep: bool, has_def: bool) -> Result<(&[u8], &[u8], &[u8])> {
    let (rep, buffer) = if has_rep {
        let level_buffer_length = get_length(buffer)
            .ok_or_else(|| Error::decode("the repetition level length prefix is missing"))?;
        if buffer.len() < 4 + level_buffer_length {
            return Err(Error::decode(
                "the repetition levels are longer than the page",
            ));
        }
        (
            &buffer[4..4 + level_buffer_length],
            &buffer[4 + level_buffer_length..],
        )
    } else {
        (&[] as &[u8], buffer)
    };

    let (def, buffer) = if has_def {
        let level_buffer_length = get_length(buffer)
            .ok_or_else(|| Error::decode("the definition level length prefix is missing"))?;
        if buffer.len() < 4 + level_buffer_length {
            return Err(Error::decode(
                "the definition levels are longer than the page",
            ));
        }
        (
            &buffer[4..4 + level_buffer_length],
            &buffer[4 + level_buffer_length..],
        )
    } else {
        (&[] as &[u8], buffer)
    };

    Ok((rep, def, buffer))
}

/// Returns the slices corresponding to (rep levels, def levels, values) of a
/// v2 page buffer. The levels are never compressed and carry no prefix.
pub fn split_buffer_v2(
    buffer: &[u8],
    rep_level_buffer_length: usize,
    def_level_buffer_length: usize,
) -> Result<(&[u8], &[u8], &[u8])> {
    if buffer.len() < rep_level_buffer_length + def_level_buffer_length {
        return Err(Error::decode("the level streams are longer than the page"));
    }
    Ok((
        &buffer[..rep_level_buffer_length],
        &buffer[rep_level_buffer_length..rep_level_buffer_length + def_level_buffer_length],
        &buffer[rep_level_buffer_length + def_level_buffer_length..],
    ))
}

/// A [`Page`] is an uncompressed, encoded representation of a Parquet page. It may hold actual data
/// and thus cloning it may be expensive.
#[derive(Debug)]
pub enum Page {
    Data(DataPage),
    Dict(Arc<dyn DictPage>),
}

/// A [`CompressedPage`] is a compressed, encoded representation of a Parquet page. It holds actual
/// data and thus cloning it is expensive.
#[derive(Debug)]
pub enum CompressedPage {
    Data(CompressedDataPage),
    Dict(CompressedDictPage),
}

impl CompressedPage {
    pub(crate) fn buffer(&self) -> &[u8] {
        match self {
            CompressedPage::Data(page) => &page.buffer,
            CompressedPage::Dict(page) => &page.buffer,
        }
    }
}

// read: CompressedPage -> Page
// write: Page -> CompressedPage
