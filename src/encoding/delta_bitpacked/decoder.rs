use crate::encoding::{bitpacked, ceil8, uleb128, zigzag_leb128};
use crate::error::{Error, Result};

#[derive(Debug)]
struct Block<'a> {
    // this is the minimum delta that must be added to every value.
    min_delta: i64,
    bitwidths: &'a [u8],
    values: &'a [u8],
    values_per_mini_block: usize,
    remaining: usize,     // number of deltas
    current_index: usize, // invariant: < values_per_mini_block
    // None represents a relative delta of zero, in which case there is no miniblock.
    current_miniblock: Option<bitpacked::Decoder<'a, u64>>,
    // number of bytes consumed.
    consumed_bytes: usize,
}

impl<'a> Block<'a> {
    fn try_new(
        mut values: &'a [u8],
        num_mini_blocks: usize,
        values_per_mini_block: usize,
        length: usize,
    ) -> Result<Self> {
        let length = std::cmp::min(length, num_mini_blocks * values_per_mini_block);

        let mut consumed_bytes = 0;
        let (min_delta, consumed) = zigzag_leb128::decode(values);
        consumed_bytes += consumed;
        values = &values[consumed..];

        if values.len() < num_mini_blocks {
            return Err(Error::decode(
                "a delta block must contain one bit width per miniblock",
            ));
        }
        let bitwidths = &values[..num_mini_blocks];
        consumed_bytes += num_mini_blocks;
        values = &values[num_mini_blocks..];

        let mut block = Block {
            min_delta,
            bitwidths,
            values,
            values_per_mini_block,
            remaining: length,
            current_index: 0,
            current_miniblock: None,
            consumed_bytes,
        };

        block.advance_miniblock()?;

        Ok(block)
    }

    fn advance_miniblock(&mut self) -> Result<()> {
        let num_bits = self
            .bitwidths
            .first()
            .copied()
            .ok_or_else(|| Error::decode("not enough miniblocks in a delta block"))?
            as usize;
        self.bitwidths = &self.bitwidths[1..];
        if num_bits > 64 {
            return Err(Error::decode(
                "the bit width of a delta miniblock must be at most 64",
            ));
        }

        self.current_miniblock = if num_bits > 0 {
            let length = std::cmp::min(self.remaining, self.values_per_mini_block);

            let miniblock_length = ceil8(self.values_per_mini_block * num_bits);
            if miniblock_length > self.values.len() {
                return Err(Error::decode(
                    "a delta miniblock is longer than the remaining bytes",
                ));
            }
            let (miniblock, remainder) = self.values.split_at(miniblock_length);

            self.values = remainder;
            self.consumed_bytes += miniblock_length;

            Some(bitpacked::Decoder::new(miniblock, num_bits, length))
        } else {
            None
        };
        self.current_index = 0;

        Ok(())
    }
}

impl<'a> Iterator for Block<'a> {
    type Item = Result<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let unpacked = self
            .current_miniblock
            .as_mut()
            .and_then(|x| x.next())
            .unwrap_or(0);
        let result = self.min_delta.wrapping_add(unpacked as i64);
        self.current_index += 1;
        self.remaining -= 1;

        if self.remaining > 0 && self.current_index == self.values_per_mini_block {
            if let Err(e) = self.advance_miniblock() {
                self.remaining = 0;
                return Some(Err(e));
            }
        }

        Some(Ok(result))
    }
}

/// Decoder of parquet's `DELTA_BINARY_PACKED`. Implements `Iterator<Item = Result<i64>>`.
/// INT32 columns use the same stream narrowed to 32 bits.
/// # Implementation
/// This struct does not allocate on the heap.
#[derive(Debug)]
pub struct Decoder<'a> {
    num_mini_blocks: usize,
    values_per_mini_block: usize,
    remaining_values: usize,
    current_value: i64,
    is_first: bool,
    values: &'a [u8],
    current_block: Option<Block<'a>>,
    // the total number of bytes consumed up to a given point, excluding the bytes on the current_block
    consumed_bytes: usize,
}

impl<'a> Decoder<'a> {
    pub fn try_new(mut values: &'a [u8]) -> Result<Self> {
        let mut consumed_bytes = 0;
        let (block_size, consumed) = uleb128::decode(values);
        consumed_bytes += consumed;
        values = &values[consumed..];
        let (num_mini_blocks, consumed) = uleb128::decode(values);
        let num_mini_blocks = num_mini_blocks as usize;
        consumed_bytes += consumed;
        values = &values[consumed..];
        let (total_count, consumed) = uleb128::decode(values);
        let total_count = total_count as usize;
        consumed_bytes += consumed;
        values = &values[consumed..];
        let (first_value, consumed) = zigzag_leb128::decode(values);
        consumed_bytes += consumed;
        values = &values[consumed..];

        if num_mini_blocks == 0 || block_size == 0 || block_size % 128 != 0 {
            return Err(Error::decode(
                "the delta header must declare a positive block size multiple of 128",
            ));
        }
        let values_per_mini_block = block_size as usize / num_mini_blocks;
        if values_per_mini_block % 8 != 0 {
            return Err(Error::decode(
                "the number of values per delta miniblock must be a multiple of 8",
            ));
        }

        // deltas exist for every value except the first
        let current_block = if total_count > 1 {
            Some(Block::try_new(
                values,
                num_mini_blocks,
                values_per_mini_block,
                total_count - 1,
            )?)
        } else {
            None
        };

        Ok(Self {
            num_mini_blocks,
            values_per_mini_block,
            remaining_values: total_count,
            current_value: first_value,
            is_first: true,
            values,
            current_block,
            consumed_bytes,
        })
    }

    /// Returns the total number of bytes consumed up to this point by [`Decoder`].
    pub fn consumed_bytes(&self) -> usize {
        self.consumed_bytes
            + self
                .current_block
                .as_ref()
                .map(|x| x.consumed_bytes)
                .unwrap_or(0)
    }

    fn next_delta(&mut self) -> Result<i64> {
        loop {
            let block = match self.current_block.as_mut() {
                Some(block) => block,
                None => {
                    return Err(Error::decode(
                        "the delta stream ended before the declared number of values",
                    ))
                }
            };
            match block.next() {
                Some(delta) => return delta,
                None => {
                    let consumed = block.consumed_bytes;
                    self.consumed_bytes += consumed;
                    self.values = &self.values[consumed..];
                    self.current_block = Some(Block::try_new(
                        self.values,
                        self.num_mini_blocks,
                        self.values_per_mini_block,
                        self.remaining_values,
                    )?);
                }
            }
        }
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Result<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining_values == 0 {
            return None;
        }
        if self.is_first {
            self.is_first = false;
            self.remaining_values -= 1;
            return Some(Ok(self.current_value));
        }

        let delta = match self.next_delta() {
            Ok(delta) => delta,
            Err(e) => {
                self.remaining_values = 0;
                return Some(Err(e));
            }
        };
        self.current_value = self.current_value.wrapping_add(delta);
        self.remaining_values -= 1;
        Some(Ok(self.current_value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining_values, Some(self.remaining_values))
    }
}
