use super::super::delta_bitpacked;
use crate::error::{Error, Result};

/// Decodes [Delta-length byte array](https://github.com/apache/parquet-format/blob/master/Encodings.md#delta-length-byte-array-delta_length_byte_array--6)
/// lengths and values.
/// # Implementation
/// This struct does not allocate on the heap.
#[derive(Debug)]
pub struct Decoder<'a> {
    values: &'a [u8],
    lengths: delta_bitpacked::Decoder<'a>,
    total_length: usize,
}

impl<'a> Decoder<'a> {
    pub fn try_new(values: &'a [u8]) -> Result<Self> {
        let lengths = delta_bitpacked::Decoder::try_new(values)?;
        Ok(Self {
            values,
            lengths,
            total_length: 0,
        })
    }

    /// Consumes this decoder and returns the slice of concatenated values.
    /// # Panics
    /// This function panics if this iterator has not been fully consumed.
    pub fn into_values(self) -> Result<&'a [u8]> {
        assert_eq!(self.lengths.size_hint().0, 0);
        let start = self.lengths.consumed_bytes();
        self.values
            .get(start..start + self.total_length)
            .ok_or_else(|| Error::decode("the byte array values end before the declared lengths"))
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Result<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.lengths.next()?;
        Some(result.and_then(|length| {
            if length < 0 {
                return Err(Error::decode("a byte array length is negative"));
            }
            self.total_length += length as usize;
            i32::try_from(length).map_err(|_| Error::decode("a byte array length overflows"))
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lengths.size_hint()
    }
}
