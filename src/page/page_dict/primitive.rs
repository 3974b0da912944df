use std::{any::Any, sync::Arc};

use crate::error::{Error, Result};
use crate::schema::types::PhysicalType;
use crate::types::{decode, NativeType};

use super::DictPage;

#[derive(Debug)]
pub struct PrimitivePageDict<T: NativeType> {
    values: Vec<T>,
}

impl<T: NativeType> PrimitivePageDict<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The dictionary value at `index`; an out-of-range index is a fatal
    /// decode error.
    #[inline]
    pub fn value(&self, index: usize) -> Result<&T> {
        self.values.get(index).ok_or_else(|| {
            Error::decode("The data page has an index larger than the dictionary page values")
        })
    }
}

impl<T: NativeType> DictPage for PrimitivePageDict<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn physical_type(&self) -> &PhysicalType {
        &T::TYPE
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

fn read_plain<T: NativeType>(values: &[u8]) -> Vec<T> {
    let chunks = values.chunks_exact(std::mem::size_of::<T>());
    chunks.map(decode::<T>).collect()
}

pub fn read<T: NativeType>(buf: &[u8], num_values: usize) -> Result<Arc<dyn DictPage>> {
    let typed_size = num_values * std::mem::size_of::<T>();
    let buf = buf.get(..typed_size).ok_or_else(|| {
        Error::decode("The dictionary page is shorter than the number of values it declares")
    })?;
    let values = read_plain::<T>(buf);
    Ok(Arc::new(PrimitivePageDict::new(values)))
}
