use crate::types::NativeType;

/// Encodes `data` according to BYTE_STREAM_SPLIT. The resulting buffer has
/// length exactly `data.len() * size_of::<T>()`.
pub fn encode<T: NativeType>(data: &[T], buffer: &mut Vec<u8>) {
    let element_size = std::mem::size_of::<T>();
    let num_elements = data.len();
    let total_length = element_size * num_elements;
    buffer.clear();
    buffer.resize(total_length, 0);

    for (i, v) in data.iter().enumerate() {
        let value_bytes = v.to_le_bytes();
        let value_bytes_ref = value_bytes.as_ref();
        for (n, byte) in value_bytes_ref.iter().enumerate() {
            buffer[(num_elements * n) + i] = *byte;
        }
    }
}
