use std::io::Cursor;

use parquetry::compression::Compression;
use parquetry::deserialize::{Array, Value};
use parquetry::error::Result;
use parquetry::metadata::{FileMetaData, SchemaDescriptor};
use parquetry::read::{read_metadata, RowGroupReader};
use parquetry::schema::types::PhysicalType;
use parquetry::schema::Repetition;
use parquetry::statistics::{BinaryStatistics, PrimitiveStatistics, Statistics};
use parquetry::write::{RowWriter, WriteOptions};

use super::*;

fn write_then_read(
    schema: SchemaDescriptor,
    rows: Vec<Vec<Value>>,
    options: WriteOptions,
    max_row_group_size: usize,
) -> Result<(FileMetaData, Vec<Vec<Value>>)> {
    let mut writer = RowWriter::try_new(
        Cursor::new(vec![]),
        schema,
        options,
        max_row_group_size,
        Some("parquetry".to_string()),
    )?;
    for row in rows {
        writer.write_row(row)?;
    }
    let (_size, cursor) = writer.end(None)?;

    let mut reader = Cursor::new(cursor.into_inner());
    let metadata = read_metadata(&mut reader)?;

    let mut all_rows = vec![];
    for row_group in 0..metadata.row_groups.len() {
        let mut group_reader = RowGroupReader::new(&mut reader, &metadata, row_group);
        all_rows.extend(group_reader.rows()?);
    }
    Ok((metadata, all_rows))
}

fn id_name_rows() -> Vec<Vec<Value>> {
    vec![
        vec![
            Value::Int32(Some(1)),
            Value::Binary(Some(b"Alice".to_vec())),
        ],
        vec![Value::Int32(Some(2)), Value::Binary(Some(b"Bob".to_vec()))],
        vec![
            Value::Int32(Some(3)),
            Value::Binary(Some(b"Charlie".to_vec())),
        ],
    ]
}

#[test]
fn write_then_read_rows() -> Result<()> {
    let schema = schema_of(vec![
        primitive("id", PhysicalType::Int32, Repetition::Required)?,
        utf8("name", Repetition::Required)?,
    ]);

    let rows = id_name_rows();
    let (metadata, result) = write_then_read(schema, rows.clone(), options(Compression::Uncompressed), 1024)?;

    assert_eq!(metadata.num_rows, 3);
    assert_eq!(result, rows);
    Ok(())
}

#[test]
fn utf8_column() -> Result<()> {
    let schema = schema_of(vec![
        primitive("id", PhysicalType::Int32, Repetition::Required)?,
        utf8("name", Repetition::Required)?,
    ]);

    let mut writer = RowWriter::try_new(
        Cursor::new(vec![]),
        schema,
        options(Compression::Uncompressed),
        1024,
        None,
    )?;
    for row in id_name_rows() {
        writer.write_row(row)?;
    }
    let (_, cursor) = writer.end(None)?;

    let mut reader = Cursor::new(cursor.into_inner());
    let metadata = read_metadata(&mut reader)?;
    let columns = RowGroupReader::new(&mut reader, &metadata, 0).read_all()?;

    let names = columns
        .into_iter()
        .find(|(name, _)| name == "name")
        .unwrap()
        .1;
    assert_eq!(
        names.into_utf8()?,
        vec![
            Some("Alice".to_string()),
            Some("Bob".to_string()),
            Some("Charlie".to_string())
        ]
    );
    Ok(())
}

#[test]
fn optional_column_with_nulls() -> Result<()> {
    let schema = schema_of(vec![primitive(
        "values",
        PhysicalType::Int64,
        Repetition::Optional,
    )?]);

    let cells = vec![
        Some(8817i64),
        None,
        Some(1895444),
        Some(8817),
        None,
        Some(12),
    ];
    let rows = cells
        .iter()
        .map(|x| vec![Value::Int64(*x)])
        .collect::<Vec<_>>();

    let (metadata, result) = write_then_read(
        schema,
        rows.clone(),
        options(Compression::Uncompressed),
        1024,
    )?;
    assert_eq!(result, rows);

    // null positions correspond exactly to the written nulls
    let statistics = metadata.row_groups[0].column(0).statistics().unwrap()?;
    let statistics = statistics
        .as_any()
        .downcast_ref::<PrimitiveStatistics<i64>>()
        .unwrap();
    assert_eq!(statistics.null_count, Some(2));
    assert_eq!(statistics.min_value, Some(12));
    assert_eq!(statistics.max_value, Some(1895444));
    assert_eq!(statistics.distinct_count, Some(3));
    Ok(())
}

#[test]
fn binary_statistics_are_unsigned_lexicographic() -> Result<()> {
    let schema = schema_of(vec![utf8("name", Repetition::Required)?]);

    let rows = vec![
        vec![Value::Binary(Some(vec![0xffu8]))],
        vec![Value::Binary(Some(b"abc".to_vec()))],
        vec![Value::Binary(Some(b"abd".to_vec()))],
    ];
    let (metadata, _) = write_then_read(schema, rows, options(Compression::Uncompressed), 1024)?;

    let statistics = metadata.row_groups[0].column(0).statistics().unwrap()?;
    let statistics = statistics
        .as_any()
        .downcast_ref::<BinaryStatistics>()
        .unwrap();
    assert_eq!(statistics.min_value, Some(b"abc".to_vec()));
    assert_eq!(statistics.max_value, Some(vec![0xffu8]));
    Ok(())
}

#[test]
fn booleans_and_floats() -> Result<()> {
    let schema = schema_of(vec![
        primitive("flag", PhysicalType::Boolean, Repetition::Optional)?,
        primitive("x", PhysicalType::Float, Repetition::Required)?,
        primitive("y", PhysicalType::Double, Repetition::Optional)?,
    ]);

    let rows = vec![
        vec![
            Value::Boolean(Some(true)),
            Value::Float32(Some(1.5)),
            Value::Float64(Some(2.0)),
        ],
        vec![
            Value::Boolean(None),
            Value::Float32(Some(-0.5)),
            Value::Float64(None),
        ],
        vec![
            Value::Boolean(Some(false)),
            Value::Float32(Some(3.25)),
            Value::Float64(Some(5.0)),
        ],
    ];
    let (_, result) = write_then_read(schema, rows.clone(), options(Compression::Uncompressed), 1024)?;
    assert_eq!(result, rows);
    Ok(())
}

#[test]
fn int96_and_fixed_len() -> Result<()> {
    let schema = schema_of(vec![
        primitive("ts", PhysicalType::Int96, Repetition::Required)?,
        primitive(
            "id",
            PhysicalType::FixedLenByteArray(4),
            Repetition::Optional,
        )?,
    ]);

    let rows = vec![
        vec![
            Value::Int96(Some([1, 2, 3])),
            Value::FixedLenBinary(Some(vec![1, 2, 3, 4])),
        ],
        vec![Value::Int96(Some([4, 5, 6])), Value::FixedLenBinary(None)],
    ];
    let (_, result) = write_then_read(schema, rows.clone(), options(Compression::Uncompressed), 1024)?;
    assert_eq!(result, rows);
    Ok(())
}

#[test]
fn multiple_row_groups() -> Result<()> {
    let schema = schema_of(vec![primitive(
        "id",
        PhysicalType::Int32,
        Repetition::Required,
    )?]);

    let rows = (0..5)
        .map(|i| vec![Value::Int32(Some(i))])
        .collect::<Vec<_>>();

    let (metadata, result) = write_then_read(
        schema,
        rows.clone(),
        options(Compression::Uncompressed),
        2,
    )?;
    assert_eq!(metadata.row_groups.len(), 3);
    assert_eq!(metadata.num_rows, 5);
    assert_eq!(
        metadata
            .row_groups
            .iter()
            .map(|group| group.num_rows())
            .collect::<Vec<_>>(),
        vec![2, 2, 1]
    );
    assert_eq!(result, rows);
    Ok(())
}

#[test]
fn empty_file() -> Result<()> {
    let schema = schema_of(vec![primitive(
        "id",
        PhysicalType::Int32,
        Repetition::Required,
    )?]);

    let (metadata, rows) = write_then_read(schema, vec![], options(Compression::Uncompressed), 8)?;
    assert_eq!(metadata.num_rows, 0);
    assert!(metadata.row_groups.is_empty());
    assert!(rows.is_empty());
    Ok(())
}

#[test]
fn maps_round_trip() -> Result<()> {
    let schema = schema_of(vec![map_of_int64("properties", Repetition::Optional)?]);

    let entries = |pairs: Vec<(&str, Option<i64>)>| {
        Value::Map(Some(
            pairs
                .into_iter()
                .map(|(k, v)| {
                    (
                        Value::Binary(Some(k.as_bytes().to_vec())),
                        Value::Int64(v),
                    )
                })
                .collect(),
        ))
    };

    let rows = vec![
        vec![Value::Map(None)],
        vec![Value::Map(Some(vec![]))],
        vec![entries(vec![("z", Some(26)), ("a", None), ("m", Some(13))])],
        vec![entries(vec![("only", Some(1))])],
    ];

    let (_, result) = write_then_read(schema, rows.clone(), options(Compression::Uncompressed), 1024)?;
    // entry order within each map equals insertion order
    assert_eq!(result, rows);
    Ok(())
}

#[test]
fn maps_with_required_values() -> Result<()> {
    let schema = schema_of(vec![map_of_int64("properties", Repetition::Required)?]);

    let rows = vec![vec![Value::Map(Some(vec![
        (Value::Binary(Some(b"a".to_vec())), Value::Int64(Some(1))),
        (Value::Binary(Some(b"b".to_vec())), Value::Int64(Some(2))),
    ]))]];

    let (_, result) = write_then_read(schema, rows.clone(), options(Compression::Uncompressed), 1024)?;
    assert_eq!(result, rows);
    Ok(())
}

#[test]
fn lists_round_trip() -> Result<()> {
    // optional group phones { repeated group phone { required int64 number } }
    let number = primitive("number", PhysicalType::Int64, Repetition::Required)?;
    let phone = parquetry::schema::types::ParquetType::try_from_group(
        "phone".to_string(),
        Repetition::Repeated,
        None,
        None,
        vec![number],
        None,
    )?;
    let phones = parquetry::schema::types::ParquetType::try_from_group(
        "phones".to_string(),
        Repetition::Optional,
        None,
        None,
        vec![phone],
        None,
    )?;
    let schema = schema_of(vec![phones]);

    let list = |numbers: Vec<i64>| {
        Value::List(Some(Array::Int64(
            numbers.into_iter().map(Some).collect(),
        )))
    };
    let rows = vec![
        vec![Value::List(None)],
        vec![Value::List(None)],
        vec![list(vec![])],
        vec![list(vec![5555555555])],
        vec![list(vec![1111111111])],
        vec![list(vec![1111111111, 2222222222, 3333333333])],
    ];

    let (metadata, result) = write_then_read(
        schema,
        rows.clone(),
        options(Compression::Uncompressed),
        1024,
    )?;
    assert_eq!(metadata.num_rows, 6);
    assert_eq!(result, rows);
    Ok(())
}

fn compression_round_trip(compression: Compression) -> Result<()> {
    let schema = schema_of(vec![
        primitive("id", PhysicalType::Int32, Repetition::Required)?,
        utf8("name", Repetition::Optional)?,
    ]);

    let rows = (0..100)
        .map(|i| {
            vec![
                Value::Int32(Some(i)),
                if i % 7 == 0 {
                    Value::Binary(None)
                } else {
                    Value::Binary(Some(format!("name-{}", i).into_bytes()))
                },
            ]
        })
        .collect::<Vec<_>>();

    let (_, result) = write_then_read(schema, rows.clone(), options(compression), 1024)?;
    assert_eq!(result, rows);
    Ok(())
}

#[test]
fn snappy_round_trip() -> Result<()> {
    compression_round_trip(Compression::Snappy)
}

#[test]
fn gzip_round_trip() -> Result<()> {
    compression_round_trip(Compression::Gzip)
}

#[test]
fn zstd_round_trip() -> Result<()> {
    compression_round_trip(Compression::Zstd)
}

#[test]
fn lz4_round_trip() -> Result<()> {
    compression_round_trip(Compression::Lz4)
}

#[test]
fn brotli_round_trip() -> Result<()> {
    compression_round_trip(Compression::Brotli)
}

#[test]
fn sizes_account_page_data_only() -> Result<()> {
    let schema = schema_of(vec![primitive(
        "id",
        PhysicalType::Int32,
        Repetition::Required,
    )?]);

    let rows = (0..10)
        .map(|i| vec![Value::Int32(Some(i))])
        .collect::<Vec<_>>();
    let (metadata, _) = write_then_read(schema, rows, options(Compression::Uncompressed), 1024)?;

    let column = metadata.row_groups[0].column(0);
    // 10 plain int32 values, no level stream for a required flat column
    assert_eq!(column.uncompressed_size(), 40);
    assert_eq!(column.compressed_size(), 40);
    Ok(())
}

#[test]
fn writing_nulls_to_required_column_errors() -> Result<()> {
    let schema = schema_of(vec![primitive(
        "id",
        PhysicalType::Int32,
        Repetition::Required,
    )?]);

    let mut writer = RowWriter::try_new(
        Cursor::new(vec![]),
        schema,
        options(Compression::Uncompressed),
        1024,
        None,
    )?;
    writer.write_row(vec![Value::Int32(None)])?;
    assert!(writer.end(None).is_err());
    Ok(())
}

#[test]
fn mismatched_row_width_errors() -> Result<()> {
    let schema = schema_of(vec![primitive(
        "id",
        PhysicalType::Int32,
        Repetition::Required,
    )?]);

    let mut writer = RowWriter::try_new(
        Cursor::new(vec![]),
        schema,
        options(Compression::Uncompressed),
        1024,
        None,
    )?;
    assert!(writer
        .write_row(vec![Value::Int32(Some(1)), Value::Int32(Some(2))])
        .is_err());
    Ok(())
}
