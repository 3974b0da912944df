mod decoder;
mod encoder;

pub use decoder::Decoder;
pub use encoder::encode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_f32() {
        let data = vec![1.5f32, -2.25, 0.0, f32::MAX, f32::MIN_POSITIVE];

        let mut buffer = vec![];
        encode(&data, &mut buffer);
        assert_eq!(buffer.len(), data.len() * 4);

        let result = Decoder::<f32>::try_new(&buffer)
            .unwrap()
            .collect::<Vec<_>>();
        assert_eq!(result, data);
    }

    #[test]
    fn round_trip_f64() {
        let data = vec![0.5f64, -1.75, 1e300, -0.0, f64::EPSILON];

        let mut buffer = vec![];
        encode(&data, &mut buffer);
        assert_eq!(buffer.len(), data.len() * 8);

        let result = Decoder::<f64>::try_new(&buffer)
            .unwrap()
            .collect::<Vec<_>>();
        assert_eq!(result, data);
    }

    #[test]
    fn planes_are_transposed() {
        let data = vec![f32::from_le_bytes([0, 1, 2, 3]), f32::from_le_bytes([4, 5, 6, 7])];

        let mut buffer = vec![];
        encode(&data, &mut buffer);

        // one plane per byte position
        assert_eq!(buffer, vec![0, 4, 1, 5, 2, 6, 3, 7]);
    }

    #[test]
    fn misaligned_length_errors() {
        assert!(Decoder::<f32>::try_new(&[0u8, 1, 2]).is_err());
    }

    #[test]
    fn empty() {
        let result = Decoder::<f64>::try_new(&[]).unwrap().collect::<Vec<_>>();
        assert!(result.is_empty());
    }
}
