use crate::encoding::hybrid_rle::encode_u32;
use crate::error::Result;
use crate::read::levels::get_bit_width;

/// RLE-encodes `levels` into `buffer` with the v1 framing:
/// `[4-byte LE length][encoded bytes]`.
pub fn write_levels_v1(buffer: &mut Vec<u8>, levels: &[u32], max_level: i16) -> Result<()> {
    let num_bits = get_bit_width(max_level) as u8;

    let start = buffer.len();
    buffer.extend_from_slice(&[0; 4]);
    encode_u32(buffer, levels.iter().copied(), num_bits)?;
    let length = buffer.len() - start - 4;
    buffer[start..start + 4].copy_from_slice(&(length as u32).to_le_bytes());
    Ok(())
}
