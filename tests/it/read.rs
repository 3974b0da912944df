use std::io::Cursor;
use std::sync::Arc;

use parquet_format_safe::Statistics as ParquetStatistics;

use parquetry::deserialize::{page_to_array, Array};
use parquetry::encoding::hybrid_rle::encode_u32;
use parquetry::encoding::{byte_stream_split, delta_bitpacked, Encoding};
use parquetry::error::{Error, Result};
use parquetry::metadata::ColumnDescriptor;
use parquetry::page::{
    DataPage, DataPageHeader, DataPageHeaderV1, DataPageHeaderV2, DictPage, PrimitivePageDict,
};
use parquetry::read::read_metadata;
use parquetry::schema::types::{ParquetType, PhysicalType};
use parquetry::schema::Repetition;

use super::*;

fn flat_descriptor(physical_type: PhysicalType, repetition: Repetition) -> ColumnDescriptor {
    let schema = schema_of(vec![primitive("col", physical_type, repetition).unwrap()]);
    schema.column(0).clone()
}

fn list_descriptor() -> ColumnDescriptor {
    let number = primitive("number", PhysicalType::Int64, Repetition::Required).unwrap();
    let phone = ParquetType::try_from_group(
        "phone".to_string(),
        Repetition::Repeated,
        None,
        None,
        vec![number],
        None,
    )
    .unwrap();
    let phones = ParquetType::try_from_group(
        "phones".to_string(),
        Repetition::Optional,
        None,
        None,
        vec![phone],
        None,
    )
    .unwrap();
    schema_of(vec![phones]).column(0).clone()
}

fn v1_header(num_values: usize, encoding: Encoding) -> DataPageHeader {
    DataPageHeader::V1(DataPageHeaderV1 {
        num_values: num_values as i32,
        encoding: encoding.into(),
        definition_level_encoding: Encoding::Rle.into(),
        repetition_level_encoding: Encoding::Rle.into(),
        statistics: None::<ParquetStatistics>,
    })
}

fn v2_header(
    num_values: usize,
    num_nulls: usize,
    encoding: Encoding,
    def_bytes: usize,
    rep_bytes: usize,
) -> DataPageHeader {
    DataPageHeader::V2(DataPageHeaderV2 {
        num_values: num_values as i32,
        num_nulls: num_nulls as i32,
        num_rows: num_values as i32,
        encoding: encoding.into(),
        definition_levels_byte_length: def_bytes as i32,
        repetition_levels_byte_length: rep_bytes as i32,
        is_compressed: Some(false),
        statistics: None,
    })
}

fn levels_v1(levels: &[u32], num_bits: u8, buffer: &mut Vec<u8>) {
    let start = buffer.len();
    buffer.extend_from_slice(&[0; 4]);
    encode_u32(buffer, levels.iter().copied(), num_bits).unwrap();
    let length = buffer.len() - start - 4;
    buffer[start..start + 4].copy_from_slice(&(length as u32).to_le_bytes());
}

#[test]
fn v1_plain_with_nulls() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::Int32, Repetition::Optional);

    let mut buffer = vec![];
    levels_v1(&[1, 0, 1, 1, 0], 1, &mut buffer);
    for value in [10i32, 20, 30] {
        buffer.extend_from_slice(&value.to_le_bytes());
    }

    let page = DataPage::new(v1_header(5, Encoding::Plain), buffer, None, descriptor);
    let array = page_to_array(&page)?;

    assert_eq!(
        array,
        Array::Int32(vec![Some(10), None, Some(20), Some(30), None])
    );
    Ok(())
}

#[test]
fn v2_plain_with_nulls() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::Int32, Repetition::Optional);

    // v2 level streams carry no length prefix
    let mut def_levels = vec![];
    encode_u32(&mut def_levels, [1u32, 0, 1, 1, 0].iter().copied(), 1).unwrap();
    let def_bytes = def_levels.len();

    let mut buffer = def_levels;
    for value in [10i32, 20, 30] {
        buffer.extend_from_slice(&value.to_le_bytes());
    }

    let page = DataPage::new(
        v2_header(5, 2, Encoding::Plain, def_bytes, 0),
        buffer,
        None,
        descriptor,
    );
    let array = page_to_array(&page)?;

    assert_eq!(
        array,
        Array::Int32(vec![Some(10), None, Some(20), Some(30), None])
    );
    Ok(())
}

#[test]
fn v1_boolean_rle() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::Boolean, Repetition::Required);

    // in v1, the boolean stream has no length prefix
    let mut buffer = vec![];
    encode_u32(&mut buffer, [1u32, 1, 1, 0, 1].iter().copied(), 1).unwrap();

    let page = DataPage::new(v1_header(5, Encoding::Rle), buffer, None, descriptor);
    let array = page_to_array(&page)?;

    assert_eq!(
        array,
        Array::Boolean(vec![
            Some(true),
            Some(true),
            Some(true),
            Some(false),
            Some(true)
        ])
    );
    Ok(())
}

#[test]
fn v2_boolean_rle() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::Boolean, Repetition::Required);

    // in v2, the boolean stream is prefixed by its length
    let mut encoded = vec![];
    encode_u32(&mut encoded, [1u32, 1, 1, 0, 1].iter().copied(), 1).unwrap();
    let mut buffer = (encoded.len() as u32).to_le_bytes().to_vec();
    buffer.extend_from_slice(&encoded);

    let page = DataPage::new(
        v2_header(5, 0, Encoding::Rle, 0, 0),
        buffer,
        None,
        descriptor,
    );
    let array = page_to_array(&page)?;

    assert_eq!(
        array,
        Array::Boolean(vec![
            Some(true),
            Some(true),
            Some(true),
            Some(false),
            Some(true)
        ])
    );
    Ok(())
}

#[test]
fn v1_plain_booleans_are_bitpacked() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::Boolean, Repetition::Required);

    // one bit per value, LSB first
    let buffer = vec![0b00010111];

    let page = DataPage::new(v1_header(5, Encoding::Plain), buffer, None, descriptor);
    let array = page_to_array(&page)?;

    assert_eq!(
        array,
        Array::Boolean(vec![
            Some(true),
            Some(true),
            Some(true),
            Some(false),
            Some(true)
        ])
    );
    Ok(())
}

#[test]
fn v1_delta_binary_packed() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::Int32, Repetition::Required);

    let mut buffer = vec![];
    delta_bitpacked::encode([1i64, 2, 3, 4, 5].into_iter(), &mut buffer);

    let page = DataPage::new(
        v1_header(5, Encoding::DeltaBinaryPacked),
        buffer,
        None,
        descriptor,
    );
    let array = page_to_array(&page)?;

    assert_eq!(
        array,
        Array::Int32(vec![Some(1), Some(2), Some(3), Some(4), Some(5)])
    );
    Ok(())
}

#[test]
fn v1_delta_binary_packed_int64() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::Int64, Repetition::Required);

    let values = vec![105i64, 104, 103, 102, 101, 1];
    let mut buffer = vec![];
    delta_bitpacked::encode(values.clone().into_iter(), &mut buffer);

    let page = DataPage::new(
        v1_header(values.len(), Encoding::DeltaBinaryPacked),
        buffer,
        None,
        descriptor,
    );
    let array = page_to_array(&page)?;

    assert_eq!(array, Array::Int64(values.into_iter().map(Some).collect()));
    Ok(())
}

#[test]
fn delta_count_mismatch_errors() {
    let descriptor = flat_descriptor(PhysicalType::Int32, Repetition::Required);

    let mut buffer = vec![];
    delta_bitpacked::encode([1i64, 2, 3].into_iter(), &mut buffer);

    // the page declares 5 values but the delta header declares 3
    let page = DataPage::new(
        v1_header(5, Encoding::DeltaBinaryPacked),
        buffer,
        None,
        descriptor,
    );
    assert!(matches!(
        page_to_array(&page),
        Err(Error::DecodeError(_))
    ));
}

#[test]
fn v1_delta_length_byte_array() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::ByteArray, Repetition::Required);

    // VALIDATED from spark==3.1.1
    let buffer = vec![
        128, 1, 4, 2, 10, 0, 0, 0, 0, 0, 72, 101, 108, 108, 111, 87, 111, 114, 108, 100,
    ];

    let page = DataPage::new(
        v1_header(2, Encoding::DeltaLengthByteArray),
        buffer,
        None,
        descriptor,
    );
    let array = page_to_array(&page)?;

    assert_eq!(
        array,
        Array::Binary(vec![
            Some(b"Hello".to_vec()),
            Some(b"World".to_vec())
        ])
    );
    Ok(())
}

#[test]
fn v1_delta_byte_array() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::ByteArray, Repetition::Required);

    // VALIDATED from spark==3.1.1
    let buffer = vec![
        128, 1, 4, 2, 0, 0, 0, 0, 0, 0, 128, 1, 4, 2, 10, 0, 0, 0, 0, 0, 72, 101, 108, 108, 111,
        87, 111, 114, 108, 100,
    ];

    let page = DataPage::new(
        v1_header(2, Encoding::DeltaByteArray),
        buffer,
        None,
        descriptor,
    );
    let array = page_to_array(&page)?;

    assert_eq!(
        array,
        Array::Binary(vec![
            Some(b"Hello".to_vec()),
            Some(b"World".to_vec())
        ])
    );
    Ok(())
}

#[test]
fn v1_byte_stream_split() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::Double, Repetition::Required);

    let values = vec![2.0f64, 3.0, 4.0, 5.0, 2.0];
    let mut buffer = vec![];
    byte_stream_split::encode(&values, &mut buffer);

    let page = DataPage::new(
        v1_header(values.len(), Encoding::ByteStreamSplit),
        buffer,
        None,
        descriptor,
    );
    let array = page_to_array(&page)?;

    assert_eq!(array, Array::Float64(values.into_iter().map(Some).collect()));
    Ok(())
}

#[test]
fn v2_byte_stream_split_counts_non_nulls() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::Double, Repetition::Optional);

    // only the two non-null values are encoded
    let mut def_levels = vec![];
    encode_u32(&mut def_levels, [1u32, 0, 1].iter().copied(), 1).unwrap();
    let def_bytes = def_levels.len();

    let mut buffer = def_levels;
    let mut encoded = vec![];
    byte_stream_split::encode(&[1.5f64, -2.5], &mut encoded);
    buffer.extend_from_slice(&encoded);

    let page = DataPage::new(
        v2_header(3, 1, Encoding::ByteStreamSplit, def_bytes, 0),
        buffer,
        None,
        descriptor,
    );
    let array = page_to_array(&page)?;

    assert_eq!(
        array,
        Array::Float64(vec![Some(1.5), None, Some(-2.5)])
    );
    Ok(())
}

#[test]
fn dictionary_indices() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::Int32, Repetition::Required);
    let dict: Arc<dyn DictPage> = Arc::new(PrimitivePageDict::new(vec![7i32, 8, 9]));

    // 1-byte bit width, then the hybrid-encoded indices
    let mut buffer = vec![2u8];
    encode_u32(&mut buffer, [0u32, 2, 1, 2].iter().copied(), 2).unwrap();

    let page = DataPage::new(
        v1_header(4, Encoding::PlainDictionary),
        buffer,
        Some(dict),
        descriptor,
    );
    let array = page_to_array(&page)?;

    assert_eq!(
        array,
        Array::Int32(vec![Some(7), Some(9), Some(8), Some(9)])
    );
    Ok(())
}

#[test]
fn dictionary_index_out_of_range_errors() {
    let descriptor = flat_descriptor(PhysicalType::Int32, Repetition::Required);
    let dict: Arc<dyn DictPage> = Arc::new(PrimitivePageDict::new(vec![7i32, 8, 9]));

    let mut buffer = vec![3u8];
    encode_u32(&mut buffer, [5u32].iter().copied(), 3).unwrap();

    let page = DataPage::new(
        v1_header(1, Encoding::PlainDictionary),
        buffer,
        Some(dict),
        descriptor,
    );
    assert!(matches!(
        page_to_array(&page),
        Err(Error::DecodeError(_))
    ));
}

#[test]
fn dictionary_page_is_mandatory() {
    let descriptor = flat_descriptor(PhysicalType::Int32, Repetition::Required);

    let page = DataPage::new(
        v1_header(1, Encoding::RleDictionary),
        vec![1, 2],
        None,
        descriptor,
    );
    assert!(page_to_array(&page).is_err());
}

#[test]
fn all_null_dictionary_page_reads_nothing() -> Result<()> {
    let descriptor = flat_descriptor(PhysicalType::Int32, Repetition::Optional);
    let dict: Arc<dyn DictPage> = Arc::new(PrimitivePageDict::new(vec![7i32]));

    let mut buffer = vec![];
    levels_v1(&[0, 0, 0], 1, &mut buffer);
    // no indices follow: every slot is null

    let page = DataPage::new(
        v1_header(3, Encoding::PlainDictionary),
        buffer,
        Some(dict),
        descriptor,
    );
    let array = page_to_array(&page)?;

    assert_eq!(array, Array::Int32(vec![None, None, None]));
    Ok(())
}

#[test]
fn v1_nested_list() -> Result<()> {
    let descriptor = list_descriptor();

    let mut buffer = vec![];
    levels_v1(&[0, 0, 0, 0, 0, 0, 1, 1], 1, &mut buffer);
    levels_v1(&[0, 0, 1, 2, 2, 2, 2, 2], 2, &mut buffer);
    for value in [
        5555555555i64,
        1111111111,
        1111111111,
        2222222222,
        3333333333,
    ] {
        buffer.extend_from_slice(&value.to_le_bytes());
    }

    let page = DataPage::new(v1_header(8, Encoding::Plain), buffer, None, descriptor);
    let array = page_to_array(&page)?;

    assert_eq!(
        array,
        Array::List(vec![
            None,
            None,
            Some(Array::Int64(vec![])),
            Some(Array::Int64(vec![Some(5555555555)])),
            Some(Array::Int64(vec![Some(1111111111)])),
            Some(Array::Int64(vec![
                Some(1111111111),
                Some(2222222222),
                Some(3333333333)
            ])),
        ])
    );
    Ok(())
}

#[test]
fn v2_nested_list() -> Result<()> {
    let descriptor = list_descriptor();

    // v2 furnishes the same level streams without prefixes
    let mut rep_levels = vec![];
    encode_u32(
        &mut rep_levels,
        [0u32, 0, 0, 0, 0, 0, 1, 1].iter().copied(),
        1,
    )
    .unwrap();
    let rep_bytes = rep_levels.len();

    let mut def_levels = vec![];
    encode_u32(
        &mut def_levels,
        [0u32, 0, 1, 2, 2, 2, 2, 2].iter().copied(),
        2,
    )
    .unwrap();
    let def_bytes = def_levels.len();

    let mut buffer = rep_levels;
    buffer.extend_from_slice(&def_levels);
    for value in [
        5555555555i64,
        1111111111,
        1111111111,
        2222222222,
        3333333333,
    ] {
        buffer.extend_from_slice(&value.to_le_bytes());
    }

    let page = DataPage::new(
        v2_header(8, 3, Encoding::Plain, def_bytes, rep_bytes),
        buffer,
        None,
        descriptor,
    );
    let array = page_to_array(&page)?;

    assert_eq!(
        array,
        Array::List(vec![
            None,
            None,
            Some(Array::Int64(vec![])),
            Some(Array::Int64(vec![Some(5555555555)])),
            Some(Array::Int64(vec![Some(1111111111)])),
            Some(Array::Int64(vec![
                Some(1111111111),
                Some(2222222222),
                Some(3333333333)
            ])),
        ])
    );
    Ok(())
}

#[test]
fn unsupported_encoding_type_pair_errors() {
    let descriptor = flat_descriptor(PhysicalType::Float, Repetition::Required);

    let page = DataPage::new(
        v1_header(1, Encoding::DeltaBinaryPacked),
        vec![128, 1, 1, 1, 2],
        None,
        descriptor,
    );
    assert!(matches!(
        page_to_array(&page),
        Err(Error::UnsupportedFeature(_))
    ));
}

#[test]
fn levels_above_the_maximum_error() {
    // the list leaf has a maximum definition level of 2; its two-bit stream
    // can carry a 3
    let descriptor = list_descriptor();

    let mut buffer = vec![];
    levels_v1(&[0], 1, &mut buffer);
    levels_v1(&[3], 2, &mut buffer);

    let page = DataPage::new(v1_header(1, Encoding::Plain), buffer, None, descriptor);
    assert!(matches!(page_to_array(&page), Err(Error::LevelShape(_))));
}

#[test]
fn corrupt_magic_errors() {
    let mut data = b"PAR1".to_vec();
    data.extend_from_slice(&[0, 0, 0, 0]);
    data.extend_from_slice(b"PAR2");

    let result = read_metadata(&mut Cursor::new(data));
    assert!(matches!(result, Err(Error::InvalidFile(_))));
}

#[test]
fn too_short_file_errors() {
    let result = read_metadata(&mut Cursor::new(b"PAR1".to_vec()));
    assert!(matches!(result, Err(Error::InvalidFile(_))));
}

#[test]
fn negative_metadata_length_errors() {
    let mut data = b"PAR1".to_vec();
    data.extend_from_slice(&(-1i32).to_le_bytes());
    data.extend_from_slice(b"PAR1");

    let result = read_metadata(&mut Cursor::new(data));
    assert!(matches!(result, Err(Error::InvalidFile(_))));
}

#[test]
fn oversize_metadata_length_errors() {
    let mut data = b"PAR1".to_vec();
    data.extend_from_slice(&i32::MAX.to_le_bytes());
    data.extend_from_slice(b"PAR1");

    let result = read_metadata(&mut Cursor::new(data));
    assert!(matches!(result, Err(Error::InvalidFile(_))));
}
