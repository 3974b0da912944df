use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::types::NativeType;

/// Decodes according to [Byte Stream Split](https://github.com/apache/parquet-format/blob/master/Encodings.md#byte-stream-split-byte_stream_split--9):
/// `size_of::<T>()` byte planes of `num_elements` bytes each; byte `j` of
/// value `i` is at `values[j * num_elements + i]`.
#[derive(Debug)]
pub struct Decoder<'a, T: NativeType> {
    values: &'a [u8],
    buffer: Vec<u8>,
    num_elements: usize,
    current: usize,
    element_size: usize,
    element_type: PhantomData<T>,
}

impl<'a, T: NativeType> Decoder<'a, T> {
    pub fn try_new(values: &'a [u8]) -> Result<Self> {
        let element_size = std::mem::size_of::<T>();
        if values.len() % element_size != 0 {
            return Err(Error::decode(
                "the byte stream is not a multiple of the element size",
            ));
        }
        let num_elements = values.len() / element_size;
        Ok(Self {
            values,
            buffer: vec![0u8; element_size],
            num_elements,
            current: 0,
            element_size,
            element_type: PhantomData,
        })
    }
}

impl<'a, T: NativeType> Iterator for Decoder<'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.num_elements {
            return None;
        }

        for n in 0..self.element_size {
            self.buffer[n] = self.values[(self.num_elements * n) + self.current];
        }

        // infalible: the buffer has exactly `size_of::<T>()` bytes
        let chunk: T::Bytes = match self.buffer.as_slice().try_into() {
            Ok(v) => v,
            Err(_) => panic!("invalid chunk length"),
        };
        let value = T::from_le_bytes(chunk);

        self.current += 1;

        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_elements - self.current;
        (remaining, Some(remaining))
    }
}
