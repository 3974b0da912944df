//! Materialization of data pages into typed arrays of native Rust values.
//!
//! In comparison to Arrow, this in-memory format does not leverage logical
//! types nor SIMD operations, but it has no external dependencies and is
//! very familiar to Rust developers.
mod map;
mod nested;
mod values;

pub use map::compose_map;
pub use values::Values;

use crate::encoding::hybrid_rle::HybridRleDecoder;
use crate::encoding::{bitpacked, Encoding};
use crate::error::{Error, Result};
use crate::page::{split_buffer, DataPage, DataPageHeader};
use crate::read::levels::get_bit_width;

/// The dynamic representation of a decoded column chunk. This is not exaustive.
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    Boolean(Vec<Option<bool>>),
    Int32(Vec<Option<i32>>),
    Int64(Vec<Option<i64>>),
    Int96(Vec<Option<[u32; 3]>>),
    Float32(Vec<Option<f32>>),
    Float64(Vec<Option<f64>>),
    Binary(Vec<Option<Vec<u8>>>),
    FixedLenBinary(Vec<Option<Vec<u8>>>),
    List(Vec<Option<Array>>),
    /// Entries of each map preserve their insertion order; keys are always
    /// non-null.
    Map(Vec<Option<Vec<(Value, Value)>>>),
}

/// The dynamic representation of a single value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(Option<bool>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Int96(Option<[u32; 3]>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Binary(Option<Vec<u8>>),
    FixedLenBinary(Option<Vec<u8>>),
    List(Option<Array>),
    Map(Option<Vec<(Value, Value)>>),
}

impl Array {
    /// The number of slots (rows) of this array.
    pub fn len(&self) -> usize {
        match self {
            Array::Boolean(v) => v.len(),
            Array::Int32(v) => v.len(),
            Array::Int64(v) => v.len(),
            Array::Int96(v) => v.len(),
            Array::Float32(v) => v.len(),
            Array::Float64(v) => v.len(),
            Array::Binary(v) => v.len(),
            Array::FixedLenBinary(v) => v.len(),
            Array::List(v) => v.len(),
            Array::Map(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The [`Value`] at slot `i`.
    /// # Panics
    /// Panics iff `i >= self.len()`.
    pub fn get(&self, i: usize) -> Value {
        match self {
            Array::Boolean(v) => Value::Boolean(v[i]),
            Array::Int32(v) => Value::Int32(v[i]),
            Array::Int64(v) => Value::Int64(v[i]),
            Array::Int96(v) => Value::Int96(v[i]),
            Array::Float32(v) => Value::Float32(v[i]),
            Array::Float64(v) => Value::Float64(v[i]),
            Array::Binary(v) => Value::Binary(v[i].clone()),
            Array::FixedLenBinary(v) => Value::FixedLenBinary(v[i].clone()),
            Array::List(v) => Value::List(v[i].clone()),
            Array::Map(v) => Value::Map(v[i].clone()),
        }
    }

    /// Interprets a binary array as UTF-8 strings.
    pub fn into_utf8(self) -> Result<Vec<Option<String>>> {
        match self {
            Array::Binary(values) => values
                .into_iter()
                .map(|value| {
                    value
                        .map(|value| {
                            String::from_utf8(value)
                                .map_err(|_| Error::decode("the byte array is not valid utf8"))
                        })
                        .transpose()
                })
                .collect(),
            _ => Err(Error::decode("only binary arrays can contain utf8 strings")),
        }
    }

    /// Appends `other` to `self`; both must be of the same variant.
    /// Used to concatenate the pages of a column chunk in file order.
    pub fn extend(&mut self, other: Array) -> Result<()> {
        match (self, other) {
            (Array::Boolean(lhs), Array::Boolean(rhs)) => lhs.extend(rhs),
            (Array::Int32(lhs), Array::Int32(rhs)) => lhs.extend(rhs),
            (Array::Int64(lhs), Array::Int64(rhs)) => lhs.extend(rhs),
            (Array::Int96(lhs), Array::Int96(rhs)) => lhs.extend(rhs),
            (Array::Float32(lhs), Array::Float32(rhs)) => lhs.extend(rhs),
            (Array::Float64(lhs), Array::Float64(rhs)) => lhs.extend(rhs),
            (Array::Binary(lhs), Array::Binary(rhs)) => lhs.extend(rhs),
            (Array::FixedLenBinary(lhs), Array::FixedLenBinary(rhs)) => lhs.extend(rhs),
            (Array::List(lhs), Array::List(rhs)) => lhs.extend(rhs),
            (Array::Map(lhs), Array::Map(rhs)) => lhs.extend(rhs),
            _ => {
                return Err(Error::decode(
                    "the pages of a column chunk have different types",
                ))
            }
        }
        Ok(())
    }
}

/// The decoded levels and dense non-null values of one data page.
#[derive(Debug)]
pub struct DecodedPage {
    pub rep_levels: Vec<u32>,
    pub def_levels: Vec<u32>,
    pub values: Values,
    pub max_rep_level: i16,
    pub max_def_level: i16,
}

impl DecodedPage {
    /// Appends `other` to `self`, concatenating levels and values in file
    /// order.
    pub fn extend(&mut self, other: DecodedPage) -> Result<()> {
        if self.max_rep_level != other.max_rep_level || self.max_def_level != other.max_def_level {
            return Err(Error::decode(
                "the pages of a column chunk have different levels",
            ));
        }
        self.rep_levels.extend(other.rep_levels);
        self.def_levels.extend(other.def_levels);
        self.values.extend(other.values)
    }
}

fn read_levels(
    levels: &[u8],
    encoding: Encoding,
    max_level: i16,
    num_values: usize,
) -> Result<Vec<u32>> {
    if max_level == 0 {
        // absent level streams decode to "all at the maximum level", which
        // here is zero
        return Ok(vec![0; num_values]);
    }
    let num_bits = get_bit_width(max_level);
    let result: Vec<u32> = match encoding {
        Encoding::Rle => HybridRleDecoder::new(levels, num_bits, num_values).collect(),
        // deprecated: levels are bit-packed without the hybrid framing
        Encoding::BitPacked => {
            bitpacked::Decoder::<u32>::new(levels, num_bits as usize, num_values).collect()
        }
        other => {
            return Err(Error::UnsupportedFeature(format!(
                "level streams encoded as {:?}",
                other
            )))
        }
    };
    if result.iter().any(|&level| level > max_level as u32) {
        return Err(Error::LevelShape(format!(
            "a level is larger than the maximum level {}",
            max_level
        )));
    }
    Ok(result)
}

/// Decodes the levels and values of a [`DataPage`] without assembling its
/// shape: nulls are not yet interleaved and lists/maps are not yet composed.
pub fn decode_page(page: &DataPage) -> Result<DecodedPage> {
    let descriptor = page.descriptor();
    let max_rep_level = descriptor.max_rep_level();
    let max_def_level = descriptor.max_def_level();
    let num_values = page.num_values();

    let (rep_levels, def_levels, values_buffer) = split_buffer(page)?;

    let rep_levels = read_levels(
        rep_levels,
        page.repetition_level_encoding(),
        max_rep_level,
        num_values,
    )?;
    let def_levels = read_levels(
        def_levels,
        page.definition_level_encoding(),
        max_def_level,
        num_values,
    )?;

    let non_null = def_levels
        .iter()
        .filter(|&&def| def == max_def_level as u32)
        .count();

    let is_v1 = matches!(page.header(), DataPageHeader::V1(_));
    let values = values::decode_values(
        values_buffer,
        page.encoding(),
        page.dictionary_page(),
        descriptor.physical_type(),
        is_v1,
        non_null,
    )?;

    Ok(DecodedPage {
        rep_levels,
        def_levels,
        values,
        max_rep_level,
        max_def_level,
    })
}

fn interleave<T>(values: Vec<T>, def_levels: &[u32], max_def: u32) -> Vec<Option<T>> {
    debug_assert_eq!(
        values.len(),
        def_levels.iter().filter(|&&def| def == max_def).count()
    );
    let mut values = values.into_iter();
    def_levels
        .iter()
        .map(|&def| if def == max_def { values.next() } else { None })
        .collect()
}

fn into_flat_array(decoded: DecodedPage) -> Array {
    let max_def = decoded.max_def_level as u32;
    let def_levels = &decoded.def_levels;
    match decoded.values {
        Values::Boolean(v) => Array::Boolean(interleave(v, def_levels, max_def)),
        Values::Int32(v) => Array::Int32(interleave(v, def_levels, max_def)),
        Values::Int64(v) => Array::Int64(interleave(v, def_levels, max_def)),
        Values::Int96(v) => Array::Int96(interleave(v, def_levels, max_def)),
        Values::Float32(v) => Array::Float32(interleave(v, def_levels, max_def)),
        Values::Float64(v) => Array::Float64(interleave(v, def_levels, max_def)),
        Values::Binary(v) => Array::Binary(interleave(v, def_levels, max_def)),
        Values::FixedLenBinary(v) => Array::FixedLenBinary(interleave(v, def_levels, max_def)),
    }
}

/// Decodes and assembles a [`DataPage`] into an [`Array`]: flat columns
/// interleave nulls from the definition levels; columns inside a repeated
/// ancestor are composed into lists.
/// This is CPU-intensive: decode, decompress and de-serialize.
pub fn page_to_array(page: &DataPage) -> Result<Array> {
    let decoded = decode_page(page)?;

    if decoded.max_rep_level == 0 {
        Ok(into_flat_array(decoded))
    } else {
        nested::compose_list(decoded)
    }
}
