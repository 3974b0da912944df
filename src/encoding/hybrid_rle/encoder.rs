use std::io::Write;

use crate::encoding::bitpacked;
use crate::encoding::{ceil8, uleb128};

/// Repeats of this length or longer become RLE runs; anything shorter is
/// accumulated into bit-packed runs.
const MIN_RLE_RUN_LENGTH: usize = 3;

fn bitpacked_run<W: Write>(writer: &mut W, values: &[u32], num_bits: u8) -> std::io::Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    let num_groups = ceil8(values.len());

    let header = ((num_groups as u64) << 1) | 1;
    let mut container = [0; 10];
    let used = uleb128::encode(header, &mut container);
    writer.write_all(&container[..used])?;

    // groups are 8 values of `num_bits` each; the space between the packed
    // values and the group boundary is zero.
    let mut packed = vec![0u8; num_groups * num_bits as usize];
    bitpacked::encode::<u32>(values, num_bits as usize, &mut packed);
    writer.write_all(&packed)
}

fn rle_run<W: Write>(
    writer: &mut W,
    value: u32,
    run_length: usize,
    num_bits: u8,
) -> std::io::Result<()> {
    let header = (run_length as u64) << 1;
    let mut container = [0; 10];
    let used = uleb128::encode(header, &mut container);
    writer.write_all(&container[..used])?;

    let bytes = value.to_le_bytes();
    writer.write_all(&bytes[..ceil8(num_bits as usize)])
}

/// Encodes `u32` values (levels, dictionary indices or booleans at
/// `num_bits == 1`) with the RLE/bit-packed hybrid encoding: repeated runs
/// of length >= 3 become RLE runs, everything else is bit-packed. Only the
/// final bit-packed run is padded to the 8-value boundary; runs in the
/// middle of the stream hold a multiple of 8 real values.
pub fn encode_u32<W: Write, I: Iterator<Item = u32>>(
    writer: &mut W,
    iterator: I,
    num_bits: u8,
) -> std::io::Result<()> {
    let values = iterator.collect::<Vec<_>>();

    let mut literals_start = 0;
    let mut i = 0;
    while i < values.len() {
        let value = values[i];
        let mut run = 1;
        while i + run < values.len() && values[i + run] == value {
            run += 1;
        }

        // borrow from the front of the repeat so that the pending bit-packed
        // values end at a multiple of 8
        let pending = i - literals_start;
        let borrow = std::cmp::min((8 - pending % 8) % 8, run);
        let aligned_run = run - borrow;

        if aligned_run >= MIN_RLE_RUN_LENGTH {
            bitpacked_run(writer, &values[literals_start..i + borrow], num_bits)?;
            rle_run(writer, value, aligned_run, num_bits)?;
            literals_start = i + run;
        }
        i += run;
    }
    bitpacked_run(writer, &values[literals_start..], num_bits)
}
