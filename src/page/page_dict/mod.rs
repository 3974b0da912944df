mod binary;
mod fixed_len_binary;
mod primitive;

pub use binary::BinaryPageDict;
pub use fixed_len_binary::FixedLenByteArrayPageDict;
pub use primitive::PrimitivePageDict;

use std::{any::Any, sync::Arc};

use crate::compression::{decompress, Compression};
use crate::error::{Error, Result};
use crate::schema::types::PhysicalType;

/// A dynamic trait describing a decompressed and decoded Dictionary Page.
pub trait DictPage: std::fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn physical_type(&self) -> &PhysicalType;

    /// The number of values of the dictionary.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An encoded and uncompressed dictionary page.
#[derive(Debug)]
pub struct EncodedDictPage {
    pub(crate) buffer: Vec<u8>,
    pub(crate) num_values: usize,
}

impl EncodedDictPage {
    pub fn new(buffer: Vec<u8>, num_values: usize) -> Self {
        Self { buffer, num_values }
    }
}

/// An encoded and compressed dictionary page.
#[derive(Debug)]
pub struct CompressedDictPage {
    pub(crate) buffer: Vec<u8>,
    pub(crate) uncompressed_page_size: usize,
    pub(crate) num_values: usize,
}

impl CompressedDictPage {
    pub fn new(buffer: Vec<u8>, uncompressed_page_size: usize, num_values: usize) -> Self {
        Self {
            buffer,
            uncompressed_page_size,
            num_values,
        }
    }
}

/// Decompresses and deserializes an [`EncodedDictPage`] into a typed
/// [`DictPage`]. Dictionary values are always PLAIN-encoded.
pub fn read_dict_page(
    page: &EncodedDictPage,
    compression: (Compression, usize),
    physical_type: &PhysicalType,
) -> Result<Arc<dyn DictPage>> {
    if compression.0 != Compression::Uncompressed {
        let mut decompressed = vec![0; compression.1];
        decompress(&compression.0, &page.buffer, &mut decompressed)?;
        deserialize(&decompressed, page.num_values, physical_type)
    } else {
        deserialize(&page.buffer, page.num_values, physical_type)
    }
}

fn deserialize(
    buf: &[u8],
    num_values: usize,
    physical_type: &PhysicalType,
) -> Result<Arc<dyn DictPage>> {
    match physical_type {
        PhysicalType::Boolean => Err(Error::oos(
            "Boolean physical type cannot be dictionary-encoded",
        )),
        PhysicalType::Int32 => primitive::read::<i32>(buf, num_values),
        PhysicalType::Int64 => primitive::read::<i64>(buf, num_values),
        PhysicalType::Int96 => primitive::read::<[u32; 3]>(buf, num_values),
        PhysicalType::Float => primitive::read::<f32>(buf, num_values),
        PhysicalType::Double => primitive::read::<f64>(buf, num_values),
        PhysicalType::ByteArray => binary::read(buf, num_values),
        PhysicalType::FixedLenByteArray(size) => fixed_len_binary::read(buf, *size, num_values),
    }
}
