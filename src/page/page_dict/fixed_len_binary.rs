use std::{any::Any, sync::Arc};

use crate::error::{Error, Result};
use crate::schema::types::PhysicalType;

use super::DictPage;

#[derive(Debug)]
pub struct FixedLenByteArrayPageDict {
    values: Vec<u8>,
    size: usize,
    physical_type: PhysicalType,
}

impl FixedLenByteArrayPageDict {
    pub fn new(values: Vec<u8>, size: usize) -> Self {
        Self {
            values,
            size,
            physical_type: PhysicalType::FixedLenByteArray(size as i32),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The dictionary value at `index`; an out-of-range index is a fatal
    /// decode error.
    #[inline]
    pub fn value(&self, index: usize) -> Result<&[u8]> {
        self.values
            .get(index * self.size..(index + 1) * self.size)
            .ok_or_else(|| {
                Error::decode(
                    "The data page has an index larger than the dictionary page values",
                )
            })
    }
}

impl DictPage for FixedLenByteArrayPageDict {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn physical_type(&self) -> &PhysicalType {
        &self.physical_type
    }

    fn len(&self) -> usize {
        self.values.len() / self.size
    }
}

pub fn read(buf: &[u8], size: i32, num_values: usize) -> Result<Arc<dyn DictPage>> {
    let size = size as usize;
    let length = size.saturating_mul(num_values);
    let values = buf
        .get(..length)
        .ok_or_else(|| {
            Error::decode("The dictionary page is shorter than the number of values it declares")
        })?
        .to_vec();
    Ok(Arc::new(FixedLenByteArrayPageDict::new(values, size)))
}
