use crate::encoding::{bitpacked, ceil8, uleb128, zigzag_leb128};

/// Encodes an iterator of `i64` according to parquet's `DELTA_BINARY_PACKED`.
/// The iterator must report an exact upper size hint.
/// # Implementation
/// * The block size is 128 and the number of miniblocks is 1.
pub fn encode<I: Iterator<Item = i64>>(mut iterator: I, buffer: &mut Vec<u8>) {
    let block_size = 128;
    let mini_blocks = 1;

    let mut container = [0u8; 10];
    let encoded_len = uleb128::encode(block_size, &mut container);
    buffer.extend_from_slice(&container[..encoded_len]);

    let encoded_len = uleb128::encode(mini_blocks, &mut container);
    buffer.extend_from_slice(&container[..encoded_len]);

    let length = iterator.size_hint().1.expect("an exact upper size hint");
    let encoded_len = uleb128::encode(length as u64, &mut container);
    buffer.extend_from_slice(&container[..encoded_len]);

    let first_value = iterator.next().unwrap_or(0);
    let (container, encoded_len) = zigzag_leb128::encode(first_value);
    buffer.extend_from_slice(&container[..encoded_len]);

    let mut deltas = [0i64; 128];
    let mut relative = [0u64; 128];

    let mut prev = first_value;
    loop {
        let mut count = 0;
        for v in iterator.by_ref().take(128) {
            deltas[count] = v.wrapping_sub(prev);
            prev = v;
            count += 1;
        }
        if count == 0 {
            break;
        }

        let min_delta = deltas[..count].iter().copied().min().unwrap_or(0);
        deltas[..count]
            .iter()
            .zip(relative.iter_mut())
            .for_each(|(delta, relative)| {
                *relative = delta.wrapping_sub(min_delta) as u64;
            });
        let max = relative[..count].iter().copied().max().unwrap_or(0);

        // <min delta> <bitwidth of the miniblock> <miniblock>
        let (container, encoded_len) = zigzag_leb128::encode(min_delta);
        buffer.extend_from_slice(&container[..encoded_len]);

        let num_bits = (64 - max.leading_zeros()) as u8;
        buffer.push(num_bits);

        if num_bits > 0 {
            let start = buffer.len();

            // the miniblock is padded to its full 128-value size
            let bytes_needed = start + ceil8(128 * num_bits as usize);
            buffer.resize(bytes_needed, 0);
            bitpacked::encode::<u64>(&relative[..count], num_bits as usize, &mut buffer[start..]);
        }

        if count < 128 {
            break;
        }
    }
}
