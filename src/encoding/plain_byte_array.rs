use crate::error::{Error, Result};

/// Decodes according to [Plain strings](https://github.com/apache/parquet-format/blob/master/Encodings.md#plain-plain--0):
/// each value is a 4-byte little-endian length followed by that many bytes.
#[derive(Debug)]
pub struct BinaryIter<'a> {
    values: &'a [u8],
    length: Option<usize>,
}

impl<'a> BinaryIter<'a> {
    pub fn new(values: &'a [u8], length: Option<usize>) -> Self {
        Self { values, length }
    }
}

impl<'a> Iterator for BinaryIter<'a> {
    type Item = Result<&'a [u8]>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.values.len() < 4 {
            return None;
        }
        if let Some(x) = self.length.as_mut() {
            *x = x.saturating_sub(1)
        }
        let length = u32::from_le_bytes(self.values[0..4].try_into().unwrap()) as usize;
        self.values = &self.values[4..];
        if length > self.values.len() {
            self.values = &[];
            return Some(Err(Error::decode(
                "a plain byte array length is beyond the values",
            )));
        }
        let (result, remaining) = self.values.split_at(length);
        self.values = remaining;
        Some(Ok(result))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.length.unwrap_or_default(), self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basics() {
        let data = vec![3, 0, 0, 0, b'a', b'b', b'c', 0, 0, 0, 0, 1, 0, 0, 0, b'z'];

        let result = BinaryIter::new(&data, Some(3))
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(result, vec![b"abc".as_ref(), b"".as_ref(), b"z".as_ref()]);
    }

    #[test]
    fn overflowing_length_errors() {
        let data = vec![5, 0, 0, 0, b'a'];

        let result = BinaryIter::new(&data, Some(1)).collect::<Result<Vec<_>>>();
        assert!(result.is_err());
    }
}
