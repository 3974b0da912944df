use super::uleb128;

/// Decodes a zigzag-encoded signed integer, returning it and the number of
/// bytes consumed.
pub fn decode(values: &[u8]) -> (i64, usize) {
    let (u, consumed) = uleb128::decode(values);
    ((u >> 1) as i64 ^ -((u & 1) as i64), consumed)
}

/// Encodes `value` in zigzag + uleb128, returning the container and the
/// number of its bytes used.
pub fn encode(value: i64) -> ([u8; 10], usize) {
    let value = ((value << 1) ^ (value >> 63)) as u64;
    let mut container = [0u8; 10];
    let consumed = uleb128::encode(value, &mut container);
    (container, consumed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        // see e.g. https://stackoverflow.com/a/2211086/931303
        let cases = vec![
            (0u8, 0i64),
            (1, -1),
            (2, 1),
            (3, -2),
            (4, 2),
            (5, -3),
            (6, 3),
            (7, -4),
            (8, 4),
            (9, -5),
        ];
        for (data, expected) in cases {
            let (result, _) = decode(&[data]);
            assert_eq!(result, expected)
        }
    }

    #[test]
    fn round_trip() {
        for value in [0i64, -1, 1, i64::MIN, i64::MAX, 124312, -23123] {
            let (container, length) = encode(value);
            let (result, consumed) = decode(&container);
            assert_eq!(value, result);
            assert_eq!(length, consumed);
        }
    }
}
