use seq_macro::seq;

// The inverse of `unpack`: writes the lowest `num_bits` bits of each value,
// LSB first, into `output`.
macro_rules! pack_impl {
    ($t:ty, $length:literal, $name:ident) => {
        /// Packs `$length` values into `output` using `num_bits` bits each,
        /// LSB first. `output` must hold at least `$length * num_bits / 8`
        /// bytes; those bytes are overwritten.
        pub fn $name(input: &[$t; $length], output: &mut [u8], num_bits: usize) {
            let bytes = $length * num_bits / 8;
            assert!(
                output.len() >= bytes,
                "output is too short for the requested number of bits"
            );

            fn pack_bits<const NUM_BITS: usize>(input: &[$t; $length], output: &mut [u8]) {
                output[..$length * NUM_BITS / 8]
                    .iter_mut()
                    .for_each(|x| *x = 0);
                for (i, value) in input.iter().enumerate() {
                    let offset = i * NUM_BITS;
                    let mut bit = 0;
                    while bit < NUM_BITS {
                        let pos = offset + bit;
                        output[pos / 8] |= (((value >> bit) & 1) as u8) << (pos % 8);
                        bit += 1;
                    }
                }
            }

            seq!(NUM_BITS in 0..=$length {
                match num_bits {
                    #(NUM_BITS => pack_bits::<NUM_BITS>(input, output),)*
                    _ => unreachable!("num_bits must be <= the lane width"),
                }
            });
        }
    };
}

pack_impl!(u8, 8, pack8);
pack_impl!(u16, 16, pack16);
pack_impl!(u32, 32, pack32);
pack_impl!(u64, 64, pack64);
