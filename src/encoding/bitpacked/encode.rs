use crate::encoding::ceil8;

use super::{Packed, Unpackable, Unpacked};

/// Encodes `unpacked` into `packed` with `num_bits` per value, zero-padding
/// the trailing partial block. Returns the number of bytes written,
/// `ceil8(unpacked.len() * num_bits)`.
pub fn encode<T: Unpackable>(unpacked: &[T], num_bits: usize, packed: &mut [u8]) -> usize {
    let chunk_size = T::Unpacked::LENGTH * num_bits / 8;

    let chunks = unpacked.chunks_exact(T::Unpacked::LENGTH);
    let remainder = chunks.remainder();

    let mut offset = 0;
    for chunk in chunks {
        let mut buf = T::Unpacked::zero();
        buf.as_mut().copy_from_slice(chunk);
        T::pack(&buf, num_bits, &mut packed[offset..offset + chunk_size]);
        offset += chunk_size;
    }
    if !remainder.is_empty() {
        let mut buf = T::Unpacked::zero();
        buf.as_mut()[..remainder.len()].copy_from_slice(remainder);
        let mut last = T::Packed::zero();
        T::pack(&buf, num_bits, last.as_mut());

        let bytes = ceil8(remainder.len() * num_bits);
        packed[offset..offset + bytes].copy_from_slice(&last.as_ref()[..bytes]);
        offset += bytes;
    }
    offset
}

/// Encodes a single full pack of `T::Unpacked::LENGTH` values.
#[inline]
pub fn encode_pack<T: Unpackable>(unpacked: &T::Unpacked, num_bits: usize, packed: &mut [u8]) {
    T::pack(unpacked, num_bits, packed)
}
