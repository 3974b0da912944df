//! Serialization of arrays of values into (compressed) v1 data pages: PLAIN
//! values and RLE levels.
mod levels;
mod map;

pub use map::map_to_pages;

use std::collections::HashSet;

use parquet_format_safe::DataPageHeader as DataPageHeaderV1;

use crate::deserialize::{Array, Value};
use crate::encoding::hybrid_rle::bitpacked_encode;
use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::metadata::ColumnDescriptor;
use crate::page::{CompressedPage, DataPage, DataPageHeader};
use crate::schema::types::PhysicalType;
use crate::statistics::{
    serialize_statistics, BinaryStatistics, BooleanStatistics, ParquetStatistics,
    PrimitiveStatistics,
};
use crate::types::NativeType;

use super::compression::compress;
use super::WriteOptions;

pub(crate) fn is_null(value: &Value) -> bool {
    match value {
        Value::Boolean(v) => v.is_none(),
        Value::Int32(v) => v.is_none(),
        Value::Int64(v) => v.is_none(),
        Value::Int96(v) => v.is_none(),
        Value::Float32(v) => v.is_none(),
        Value::Float64(v) => v.is_none(),
        Value::Binary(v) => v.is_none(),
        Value::FixedLenBinary(v) => v.is_none(),
        Value::List(v) => v.is_none(),
        Value::Map(v) => v.is_none(),
    }
}

fn type_mismatch(value: &Value, physical_type: &PhysicalType) -> Error {
    Error::UnsupportedFeature(format!(
        "writing a {:?} value into a {:?} column",
        value, physical_type
    ))
}

/// PLAIN-encodes one non-null `value` into `buffer`. Booleans are not
/// encodable one at a time and are rejected here.
fn encode_plain_value(
    value: &Value,
    physical_type: &PhysicalType,
    buffer: &mut Vec<u8>,
) -> Result<()> {
    match (value, physical_type) {
        (Value::Int32(Some(v)), PhysicalType::Int32) => buffer.extend_from_slice(&v.to_le_bytes()),
        (Value::Int64(Some(v)), PhysicalType::Int64) => buffer.extend_from_slice(&v.to_le_bytes()),
        (Value::Int96(Some(v)), PhysicalType::Int96) => {
            buffer.extend_from_slice(NativeType::to_le_bytes(v).as_ref())
        }
        (Value::Float32(Some(v)), PhysicalType::Float) => {
            buffer.extend_from_slice(&v.to_le_bytes())
        }
        (Value::Float64(Some(v)), PhysicalType::Double) => {
            buffer.extend_from_slice(&v.to_le_bytes())
        }
        (Value::Binary(Some(v)), PhysicalType::ByteArray) => {
            buffer.extend_from_slice(&(v.len() as u32).to_le_bytes());
            buffer.extend_from_slice(v);
        }
        (Value::FixedLenBinary(Some(v)), PhysicalType::FixedLenByteArray(size)) => {
            if v.len() != *size as usize {
                return Err(Error::UnsupportedFeature(format!(
                    "writing a fixed-length value of {} bytes into a FIXED_LEN_BYTE_ARRAY({})",
                    v.len(),
                    size
                )));
            }
            buffer.extend_from_slice(v);
        }
        (value, physical_type) => return Err(type_mismatch(value, physical_type)),
    }
    Ok(())
}

/// PLAIN-encodes the non-null `values` into `buffer`. Booleans are
/// bit-packed LSB first, one bit per value.
fn encode_plain(values: &[Value], physical_type: &PhysicalType, buffer: &mut Vec<u8>) -> Result<()> {
    if *physical_type == PhysicalType::Boolean {
        let bools = values
            .iter()
            .map(|value| match value {
                Value::Boolean(Some(v)) => Ok(*v),
                value => Err(type_mismatch(value, physical_type)),
            })
            .collect::<Result<Vec<_>>>()?;
        bitpacked_encode(buffer, bools.into_iter())?;
        return Ok(());
    }
    for value in values {
        encode_plain_value(value, physical_type, buffer)?;
    }
    Ok(())
}

fn primitive_statistics<T: NativeType>(
    values: impl Iterator<Item = T>,
    null_count: i64,
    distinct_count: i64,
) -> ParquetStatistics {
    let mut min_value: Option<T> = None;
    let mut max_value: Option<T> = None;
    for v in values {
        min_value = Some(match min_value {
            Some(min) if min.ord(&v) == std::cmp::Ordering::Less => min,
            _ => v,
        });
        max_value = Some(match max_value {
            Some(max) if max.ord(&v) == std::cmp::Ordering::Greater => max,
            _ => v,
        });
    }
    serialize_statistics(&PrimitiveStatistics::<T> {
        null_count: Some(null_count),
        distinct_count: Some(distinct_count),
        min_value,
        max_value,
    })
}

/// Computes the page statistics of the non-null `values`: min and max by
/// type-appropriate ordering (numeric `<`, unsigned-lexicographic for byte
/// arrays), the null count, and the distinct count via a value-equality set.
fn build_statistics(
    values: &[Value],
    physical_type: &PhysicalType,
    null_count: i64,
) -> Result<ParquetStatistics> {
    let mut seen = HashSet::new();
    for value in values {
        let mut key = vec![];
        match value {
            Value::Boolean(Some(v)) => key.push(*v as u8),
            value => encode_plain_value(value, physical_type, &mut key)?,
        }
        seen.insert(key);
    }
    let distinct_count = seen.len() as i64;

    Ok(match physical_type {
        PhysicalType::Boolean => {
            let mut min_value: Option<bool> = None;
            let mut max_value: Option<bool> = None;
            for value in values {
                if let Value::Boolean(Some(v)) = value {
                    min_value = Some(min_value.unwrap_or(true) & *v);
                    max_value = Some(max_value.unwrap_or(false) | *v);
                }
            }
            serialize_statistics(&BooleanStatistics {
                null_count: Some(null_count),
                distinct_count: Some(distinct_count),
                min_value,
                max_value,
            })
        }
        PhysicalType::Int32 => primitive_statistics::<i32>(
            values.iter().filter_map(|x| match x {
                Value::Int32(Some(v)) => Some(*v),
                _ => None,
            }),
            null_count,
            distinct_count,
        ),
        PhysicalType::Int64 => primitive_statistics::<i64>(
            values.iter().filter_map(|x| match x {
                Value::Int64(Some(v)) => Some(*v),
                _ => None,
            }),
            null_count,
            distinct_count,
        ),
        PhysicalType::Int96 => primitive_statistics::<[u32; 3]>(
            values.iter().filter_map(|x| match x {
                Value::Int96(Some(v)) => Some(*v),
                _ => None,
            }),
            null_count,
            distinct_count,
        ),
        PhysicalType::Float => primitive_statistics::<f32>(
            values.iter().filter_map(|x| match x {
                Value::Float32(Some(v)) => Some(*v),
                _ => None,
            }),
            null_count,
            distinct_count,
        ),
        PhysicalType::Double => primitive_statistics::<f64>(
            values.iter().filter_map(|x| match x {
                Value::Float64(Some(v)) => Some(*v),
                _ => None,
            }),
            null_count,
            distinct_count,
        ),
        PhysicalType::ByteArray | PhysicalType::FixedLenByteArray(_) => {
            let mut min_value: Option<Vec<u8>> = None;
            let mut max_value: Option<Vec<u8>> = None;
            for value in values {
                let v = match value {
                    Value::Binary(Some(v)) | Value::FixedLenBinary(Some(v)) => v,
                    _ => continue,
                };
                // unsigned-lexicographic ordering over the raw bytes
                if min_value.as_ref().map(|min| v < min).unwrap_or(true) {
                    min_value = Some(v.clone());
                }
                if max_value.as_ref().map(|max| v > max).unwrap_or(true) {
                    max_value = Some(v.clone());
                }
            }
            serialize_statistics(&BinaryStatistics {
                null_count: Some(null_count),
                distinct_count: Some(distinct_count),
                min_value,
                max_value,
            })
        }
    })
}

/// Assembles a page out of the computed levels and dense non-null values,
/// then compresses it.
pub(crate) fn build_page(
    non_null: Vec<Value>,
    num_values: usize,
    rep_levels: Option<&[u32]>,
    def_levels: Option<&[u32]>,
    descriptor: &ColumnDescriptor,
    options: &WriteOptions,
) -> Result<CompressedPage> {
    let mut buffer = vec![];
    if let Some(rep_levels) = rep_levels {
        levels::write_levels_v1(&mut buffer, rep_levels, descriptor.max_rep_level())?;
    }
    if let Some(def_levels) = def_levels {
        levels::write_levels_v1(&mut buffer, def_levels, descriptor.max_def_level())?;
    }
    encode_plain(&non_null, descriptor.physical_type(), &mut buffer)?;

    let null_count = num_values as i64 - non_null.len() as i64;
    let statistics = if options.write_statistics {
        Some(build_statistics(
            &non_null,
            descriptor.physical_type(),
            null_count,
        )?)
    } else {
        None
    };

    let header = DataPageHeaderV1 {
        num_values: num_values as i32,
        encoding: Encoding::Plain.into(),
        definition_level_encoding: Encoding::Rle.into(),
        repetition_level_encoding: Encoding::Rle.into(),
        statistics,
    };

    let page = DataPage::new(
        DataPageHeader::V1(header),
        buffer,
        None,
        descriptor.clone(),
    );
    compress(page, options.compression)
}

/// Encodes the cells of a flat column into a single v1 data page: RLE
/// definition levels (0 for null, the maximum level for non-null) and PLAIN
/// values skipping nulls.
pub fn values_to_page(
    values: Vec<Value>,
    descriptor: &ColumnDescriptor,
    options: &WriteOptions,
) -> Result<CompressedPage> {
    let num_values = values.len();
    let max_def = descriptor.max_def_level();

    let mut def_levels = Vec::with_capacity(num_values);
    let mut non_null = Vec::with_capacity(num_values);
    for value in values {
        if is_null(&value) {
            if max_def == 0 {
                return Err(Error::UnsupportedFeature(
                    "writing a null value into a required column".to_string(),
                ));
            }
            def_levels.push(0);
        } else {
            def_levels.push(max_def as u32);
            non_null.push(value);
        }
    }

    let def_levels = (max_def > 0).then_some(def_levels);
    build_page(
        non_null,
        num_values,
        None,
        def_levels.as_deref(),
        descriptor,
        options,
    )
}

/// Encodes a flat [`Array`] into a single v1 data page.
pub fn array_to_page(
    array: &Array,
    descriptor: &ColumnDescriptor,
    options: &WriteOptions,
) -> Result<CompressedPage> {
    if matches!(array, Array::List(_) | Array::Map(_)) {
        return Err(Error::UnsupportedFeature(
            "writing lists or maps through the flat path".to_string(),
        ));
    }
    let values = (0..array.len()).map(|i| array.get(i)).collect();
    values_to_page(values, descriptor, options)
}

/// Encodes [`Array::List`] slots into a single v1 data page: shared RLE
/// repetition/definition levels and PLAIN element values.
pub fn lists_to_page(
    lists: &[Option<Array>],
    descriptor: &ColumnDescriptor,
    options: &WriteOptions,
) -> Result<CompressedPage> {
    let max_def = descriptor.max_def_level() as u32;

    let mut rep_levels = vec![];
    let mut def_levels = vec![];
    let mut non_null = vec![];
    for list in lists {
        match list {
            None => {
                if max_def < 2 {
                    return Err(Error::UnsupportedFeature(
                        "writing a null list into a required column".to_string(),
                    ));
                }
                rep_levels.push(0);
                def_levels.push(0);
            }
            Some(elements) if elements.is_empty() => {
                rep_levels.push(0);
                def_levels.push(if max_def >= 2 { 1 } else { 0 });
            }
            Some(elements) => {
                for i in 0..elements.len() {
                    rep_levels.push(u32::from(i != 0));
                    let element = elements.get(i);
                    if is_null(&element) {
                        if max_def < 3 {
                            return Err(Error::UnsupportedFeature(
                                "writing a null element into a required list element".to_string(),
                            ));
                        }
                        def_levels.push(max_def - 1);
                    } else {
                        def_levels.push(max_def);
                        non_null.push(element);
                    }
                }
            }
        }
    }

    let num_values = rep_levels.len();
    build_page(
        non_null,
        num_values,
        Some(&rep_levels),
        Some(&def_levels),
        descriptor,
        options,
    )
}
