use std::sync::Arc;

use crate::encoding::{
    byte_stream_split, delta_bitpacked, delta_byte_array, delta_length_byte_array, get_length,
    hybrid_rle::{BitmapIter, HybridRleDecoder},
    plain_byte_array::BinaryIter,
    Encoding,
};
use crate::error::{Error, Result};
use crate::page::{
    BinaryPageDict, DictPage, FixedLenByteArrayPageDict, PrimitivePageDict,
};
use crate::schema::types::PhysicalType;
use crate::types::{decode, NativeType};

use super::Value;

/// Densely decoded non-null values of a data page: nulls are reconstituted
/// from the definition levels, never stored here.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    Boolean(Vec<bool>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Int96(Vec<[u32; 3]>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Binary(Vec<Vec<u8>>),
    FixedLenBinary(Vec<Vec<u8>>),
}

impl Values {
    pub fn len(&self) -> usize {
        match self {
            Values::Boolean(v) => v.len(),
            Values::Int32(v) => v.len(),
            Values::Int64(v) => v.len(),
            Values::Int96(v) => v.len(),
            Values::Float32(v) => v.len(),
            Values::Float64(v) => v.len(),
            Values::Binary(v) => v.len(),
            Values::FixedLenBinary(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `other` to `self`; both must hold the same physical type.
    pub fn extend(&mut self, other: Values) -> Result<()> {
        match (self, other) {
            (Values::Boolean(lhs), Values::Boolean(rhs)) => lhs.extend(rhs),
            (Values::Int32(lhs), Values::Int32(rhs)) => lhs.extend(rhs),
            (Values::Int64(lhs), Values::Int64(rhs)) => lhs.extend(rhs),
            (Values::Int96(lhs), Values::Int96(rhs)) => lhs.extend(rhs),
            (Values::Float32(lhs), Values::Float32(rhs)) => lhs.extend(rhs),
            (Values::Float64(lhs), Values::Float64(rhs)) => lhs.extend(rhs),
            (Values::Binary(lhs), Values::Binary(rhs)) => lhs.extend(rhs),
            (Values::FixedLenBinary(lhs), Values::FixedLenBinary(rhs)) => lhs.extend(rhs),
            _ => {
                return Err(Error::decode(
                    "the pages of a column chunk have different types",
                ))
            }
        }
        Ok(())
    }

    /// A null [`Value`] of this type.
    pub(crate) fn null_value(&self) -> Value {
        match self {
            Values::Boolean(_) => Value::Boolean(None),
            Values::Int32(_) => Value::Int32(None),
            Values::Int64(_) => Value::Int64(None),
            Values::Int96(_) => Value::Int96(None),
            Values::Float32(_) => Value::Float32(None),
            Values::Float64(_) => Value::Float64(None),
            Values::Binary(_) => Value::Binary(None),
            Values::FixedLenBinary(_) => Value::FixedLenBinary(None),
        }
    }

    pub(crate) fn into_values_iter(self) -> ValuesIter {
        match self {
            Values::Boolean(v) => ValuesIter::Boolean(v.into_iter()),
            Values::Int32(v) => ValuesIter::Int32(v.into_iter()),
            Values::Int64(v) => ValuesIter::Int64(v.into_iter()),
            Values::Int96(v) => ValuesIter::Int96(v.into_iter()),
            Values::Float32(v) => ValuesIter::Float32(v.into_iter()),
            Values::Float64(v) => ValuesIter::Float64(v.into_iter()),
            Values::Binary(v) => ValuesIter::Binary(v.into_iter()),
            Values::FixedLenBinary(v) => ValuesIter::FixedLenBinary(v.into_iter()),
        }
    }
}

/// An iterator of non-null [`Value`] consumed in source order.
pub(crate) enum ValuesIter {
    Boolean(std::vec::IntoIter<bool>),
    Int32(std::vec::IntoIter<i32>),
    Int64(std::vec::IntoIter<i64>),
    Int96(std::vec::IntoIter<[u32; 3]>),
    Float32(std::vec::IntoIter<f32>),
    Float64(std::vec::IntoIter<f64>),
    Binary(std::vec::IntoIter<Vec<u8>>),
    FixedLenBinary(std::vec::IntoIter<Vec<u8>>),
}

impl Iterator for ValuesIter {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ValuesIter::Boolean(i) => i.next().map(|x| Value::Boolean(Some(x))),
            ValuesIter::Int32(i) => i.next().map(|x| Value::Int32(Some(x))),
            ValuesIter::Int64(i) => i.next().map(|x| Value::Int64(Some(x))),
            ValuesIter::Int96(i) => i.next().map(|x| Value::Int96(Some(x))),
            ValuesIter::Float32(i) => i.next().map(|x| Value::Float32(Some(x))),
            ValuesIter::Float64(i) => i.next().map(|x| Value::Float64(Some(x))),
            ValuesIter::Binary(i) => i.next().map(|x| Value::Binary(Some(x))),
            ValuesIter::FixedLenBinary(i) => i.next().map(|x| Value::FixedLenBinary(Some(x))),
        }
    }
}

fn read_plain<T: NativeType>(values: &[u8], non_null: usize) -> Result<Vec<T>> {
    let size = std::mem::size_of::<T>();
    let values = values.get(..non_null * size).ok_or_else(|| {
        Error::decode("the page is shorter than the number of plain values it declares")
    })?;
    Ok(values.chunks_exact(size).map(decode::<T>).collect())
}

fn read_plain_booleans(values: &[u8], non_null: usize) -> Result<Vec<bool>> {
    let result = BitmapIter::new(values, 0, non_null).collect::<Vec<_>>();
    if result.len() != non_null {
        return Err(Error::decode(
            "the page ended while reading bit-packed booleans",
        ));
    }
    Ok(result)
}

fn read_rle_booleans(values: &[u8], is_v1: bool, non_null: usize) -> Result<Vec<bool>> {
    // in v1 pages the boolean stream carries no length prefix; v2 pages
    // prefix it with a 4-byte little-endian length
    let values = if is_v1 {
        values
    } else {
        let length = get_length(values)
            .ok_or_else(|| Error::decode("the boolean stream length prefix is missing"))?;
        values
            .get(4..4 + length)
            .ok_or_else(|| Error::decode("the boolean stream is longer than the page"))?
    };
    Ok(HybridRleDecoder::new(values, 1, non_null)
        .map(|x| x != 0)
        .collect())
}

fn read_plain_binary(values: &[u8], non_null: usize) -> Result<Vec<Vec<u8>>> {
    let result = BinaryIter::new(values, Some(non_null))
        .take(non_null)
        .map(|x| x.map(|x| x.to_vec()))
        .collect::<Result<Vec<_>>>()?;
    if result.len() != non_null {
        return Err(Error::decode(
            "the page is shorter than the number of byte arrays it declares",
        ));
    }
    Ok(result)
}

fn read_plain_fixed_len(values: &[u8], size: usize, non_null: usize) -> Result<Vec<Vec<u8>>> {
    let values = values.get(..non_null * size).ok_or_else(|| {
        Error::decode("the page is shorter than the number of fixed-length values it declares")
    })?;
    Ok(values.chunks_exact(size).map(|x| x.to_vec()).collect())
}

fn empty_of(physical_type: &PhysicalType) -> Values {
    match physical_type {
        PhysicalType::Boolean => Values::Boolean(vec![]),
        PhysicalType::Int32 => Values::Int32(vec![]),
        PhysicalType::Int64 => Values::Int64(vec![]),
        PhysicalType::Int96 => Values::Int96(vec![]),
        PhysicalType::Float => Values::Float32(vec![]),
        PhysicalType::Double => Values::Float64(vec![]),
        PhysicalType::ByteArray => Values::Binary(vec![]),
        PhysicalType::FixedLenByteArray(_) => Values::FixedLenBinary(vec![]),
    }
}

fn read_dict_indexed(
    values: &[u8],
    dict: &Arc<dyn DictPage>,
    physical_type: &PhysicalType,
    non_null: usize,
) -> Result<Values> {
    if non_null == 0 {
        // no indices are stored when every slot is null
        return Ok(empty_of(physical_type));
    }
    let bit_width = *values.first().ok_or_else(|| {
        Error::decode("a dictionary-indexed page must start with its bit width")
    })?;
    if bit_width > 32 {
        return Err(Error::decode(
            "the bit width of dictionary indices must be at most 32",
        ));
    }
    let indices = HybridRleDecoder::new(&values[1..], bit_width as u32, non_null);

    fn downcast<'a, T: 'static>(dict: &'a Arc<dyn DictPage>) -> Result<&'a T> {
        dict.as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| Error::decode("the dictionary page does not match the column type"))
    }

    Ok(match physical_type {
        PhysicalType::Boolean => {
            return Err(Error::oos("Boolean physical type cannot be dictionary-encoded"))
        }
        PhysicalType::Int32 => {
            let dict = downcast::<PrimitivePageDict<i32>>(dict)?;
            Values::Int32(
                indices
                    .map(|x| dict.value(x as usize).copied())
                    .collect::<Result<Vec<_>>>()?,
            )
        }
        PhysicalType::Int64 => {
            let dict = downcast::<PrimitivePageDict<i64>>(dict)?;
            Values::Int64(
                indices
                    .map(|x| dict.value(x as usize).copied())
                    .collect::<Result<Vec<_>>>()?,
            )
        }
        PhysicalType::Int96 => {
            let dict = downcast::<PrimitivePageDict<[u32; 3]>>(dict)?;
            Values::Int96(
                indices
                    .map(|x| dict.value(x as usize).copied())
                    .collect::<Result<Vec<_>>>()?,
            )
        }
        PhysicalType::Float => {
            let dict = downcast::<PrimitivePageDict<f32>>(dict)?;
            Values::Float32(
                indices
                    .map(|x| dict.value(x as usize).copied())
                    .collect::<Result<Vec<_>>>()?,
            )
        }
        PhysicalType::Double => {
            let dict = downcast::<PrimitivePageDict<f64>>(dict)?;
            Values::Float64(
                indices
                    .map(|x| dict.value(x as usize).copied())
                    .collect::<Result<Vec<_>>>()?,
            )
        }
        PhysicalType::ByteArray => {
            let dict = downcast::<BinaryPageDict>(dict)?;
            Values::Binary(
                indices
                    .map(|x| dict.value(x as usize).map(|x| x.to_vec()))
                    .collect::<Result<Vec<_>>>()?,
            )
        }
        PhysicalType::FixedLenByteArray(_) => {
            let dict = downcast::<FixedLenByteArrayPageDict>(dict)?;
            Values::FixedLenBinary(
                indices
                    .map(|x| dict.value(x as usize).map(|x| x.to_vec()))
                    .collect::<Result<Vec<_>>>()?,
            )
        }
    })
}

fn read_delta_integers(values: &[u8], non_null: usize) -> Result<Vec<i64>> {
    let decoder = delta_bitpacked::Decoder::try_new(values)?;
    if decoder.size_hint().0 != non_null {
        return Err(Error::decode(
            "the delta header declares a different number of values than the page",
        ));
    }
    decoder.collect::<Result<Vec<_>>>()
}

fn read_delta_length_binary(values: &[u8], non_null: usize) -> Result<Vec<Vec<u8>>> {
    let mut decoder = delta_length_byte_array::Decoder::try_new(values)?;
    if decoder.size_hint().0 != non_null {
        return Err(Error::decode(
            "the delta-length header declares a different number of values than the page",
        ));
    }
    let lengths = decoder.by_ref().collect::<Result<Vec<_>>>()?;
    let mut data = decoder.into_values()?;

    let mut result = Vec::with_capacity(lengths.len());
    for length in lengths {
        let (value, remaining) = data.split_at(length as usize);
        data = remaining;
        result.push(value.to_vec());
    }
    Ok(result)
}

fn read_delta_binary(values: &[u8], non_null: usize) -> Result<Vec<Vec<u8>>> {
    let mut decoder = delta_byte_array::Decoder::try_new(values)?;
    if decoder.size_hint().0 != non_null {
        return Err(Error::decode(
            "the delta-strings header declares a different number of values than the page",
        ));
    }
    let prefix_lengths = decoder.by_ref().collect::<Result<Vec<_>>>()?;
    let mut lengths = decoder.into_lengths()?;
    let suffix_lengths = lengths.by_ref().collect::<Result<Vec<_>>>()?;
    let mut data = lengths.into_values()?;

    // each value is the prefix of the logical previous value plus its suffix
    let mut previous: Vec<u8> = vec![];
    let mut result = Vec::with_capacity(prefix_lengths.len());
    for (prefix_length, suffix_length) in prefix_lengths.into_iter().zip(suffix_lengths) {
        let prefix_length = prefix_length as usize;
        if prefix_length > previous.len() {
            return Err(Error::decode(
                "a prefix length is larger than the previous value",
            ));
        }
        let (suffix, remaining) = data.split_at(suffix_length as usize);
        data = remaining;

        let mut value = Vec::with_capacity(prefix_length + suffix.len());
        value.extend_from_slice(&previous[..prefix_length]);
        value.extend_from_slice(suffix);
        previous.clear();
        previous.extend_from_slice(&value);
        result.push(value);
    }
    Ok(result)
}

fn read_byte_stream_split<T: NativeType>(values: &[u8], non_null: usize) -> Result<Vec<T>> {
    let decoder = byte_stream_split::Decoder::<T>::try_new(values)?;
    if decoder.size_hint().0 != non_null {
        return Err(Error::decode(
            "the byte-stream-split page length does not match the non-null count",
        ));
    }
    Ok(decoder.collect())
}

/// Decodes the values region of a data page into [`Values`], driven by the
/// page's encoding and the column's physical type. `non_null` is the number
/// of definition-level slots at the maximum definition level.
pub(super) fn decode_values(
    values: &[u8],
    encoding: Encoding,
    dict: Option<&Arc<dyn DictPage>>,
    physical_type: &PhysicalType,
    is_v1: bool,
    non_null: usize,
) -> Result<Values> {
    match (encoding, physical_type) {
        (Encoding::Plain, PhysicalType::Boolean) => {
            Ok(Values::Boolean(read_plain_booleans(values, non_null)?))
        }
        (Encoding::Rle, PhysicalType::Boolean) => {
            Ok(Values::Boolean(read_rle_booleans(values, is_v1, non_null)?))
        }
        (Encoding::Plain, PhysicalType::Int32) => {
            Ok(Values::Int32(read_plain::<i32>(values, non_null)?))
        }
        (Encoding::Plain, PhysicalType::Int64) => {
            Ok(Values::Int64(read_plain::<i64>(values, non_null)?))
        }
        (Encoding::Plain, PhysicalType::Int96) => {
            Ok(Values::Int96(read_plain::<[u32; 3]>(values, non_null)?))
        }
        (Encoding::Plain, PhysicalType::Float) => {
            Ok(Values::Float32(read_plain::<f32>(values, non_null)?))
        }
        (Encoding::Plain, PhysicalType::Double) => {
            Ok(Values::Float64(read_plain::<f64>(values, non_null)?))
        }
        (Encoding::Plain, PhysicalType::ByteArray) => {
            Ok(Values::Binary(read_plain_binary(values, non_null)?))
        }
        (Encoding::Plain, PhysicalType::FixedLenByteArray(size)) => Ok(Values::FixedLenBinary(
            read_plain_fixed_len(values, *size as usize, non_null)?,
        )),
        (Encoding::PlainDictionary | Encoding::RleDictionary, _) => {
            let dict = dict.ok_or_else(|| {
                Error::decode("A dictionary-encoded page MUST be preceded by a dictionary page")
            })?;
            read_dict_indexed(values, dict, physical_type, non_null)
        }
        (Encoding::DeltaBinaryPacked, PhysicalType::Int32) => Ok(Values::Int32(
            read_delta_integers(values, non_null)?
                .into_iter()
                .map(|x| x as i32)
                .collect(),
        )),
        (Encoding::DeltaBinaryPacked, PhysicalType::Int64) => {
            Ok(Values::Int64(read_delta_integers(values, non_null)?))
        }
        (Encoding::DeltaLengthByteArray, PhysicalType::ByteArray) => {
            Ok(Values::Binary(read_delta_length_binary(values, non_null)?))
        }
        (Encoding::DeltaByteArray, PhysicalType::ByteArray) => {
            Ok(Values::Binary(read_delta_binary(values, non_null)?))
        }
        (Encoding::ByteStreamSplit, PhysicalType::Float) => Ok(Values::Float32(
            read_byte_stream_split::<f32>(values, non_null)?,
        )),
        (Encoding::ByteStreamSplit, PhysicalType::Double) => Ok(Values::Float64(
            read_byte_stream_split::<f64>(values, non_null)?,
        )),
        (encoding, physical_type) => Err(Error::UnsupportedFeature(format!(
            "decoding {:?}-encoded {:?} columns",
            encoding, physical_type
        ))),
    }
}
