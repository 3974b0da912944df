use seq_macro::seq;

// Each lane width gets its own unpack kernel. `num_bits` is dispatched into
// a const generic so that the inner loop has a compile-time bound.
macro_rules! unpack_impl {
    ($t:ty, $length:literal, $name:ident) => {
        /// Unpacks `$length` values of `num_bits` bits each from `input`,
        /// LSB first: bit `j` of value `i` lives at absolute bit position
        /// `i * num_bits + j`, read as `byte = pos / 8`, `bit = pos % 8`.
        pub fn $name(input: &[u8], output: &mut [$t; $length], num_bits: usize) {
            assert!(
                input.len() * 8 >= $length * num_bits,
                "input is too short for the requested number of bits"
            );

            fn unpack_bits<const NUM_BITS: usize>(input: &[u8], output: &mut [$t; $length]) {
                for (i, out) in output.iter_mut().enumerate() {
                    let offset = i * NUM_BITS;
                    let mut value: $t = 0;
                    let mut bit = 0;
                    while bit < NUM_BITS {
                        let pos = offset + bit;
                        // right shifts here are logical: the lanes are unsigned
                        value |= (((input[pos / 8] >> (pos % 8)) & 1) as $t) << bit;
                        bit += 1;
                    }
                    *out = value;
                }
            }

            seq!(NUM_BITS in 0..=$length {
                match num_bits {
                    #(NUM_BITS => unpack_bits::<NUM_BITS>(input, output),)*
                    _ => unreachable!("num_bits must be <= the lane width"),
                }
            });
        }
    };
}

unpack_impl!(u8, 8, unpack8);
unpack_impl!(u16, 16, unpack16);
unpack_impl!(u32, 32, unpack32);
unpack_impl!(u64, 64, unpack64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_3bits() {
        let input = [0b10001000u8, 0b11000110, 0b11111010];
        let mut output = [0u32; 32];
        unpack32(&[input.as_ref(), &[0; 9]].concat(), &mut output, 3);
        assert_eq!(&output[..8], &[0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn unpack_zero_bits() {
        let mut output = [1u32; 32];
        unpack32(&[], &mut output, 0);
        assert_eq!(output, [0u32; 32]);
    }
}
