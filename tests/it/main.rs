mod read;
mod write;

use parquetry::compression::Compression;
use parquetry::error::Result;
use parquetry::metadata::SchemaDescriptor;
use parquetry::schema::types::{ParquetType, PhysicalType, PrimitiveConvertedType};
use parquetry::schema::Repetition;
use parquetry::write::{Version, WriteOptions};

pub fn options(compression: Compression) -> WriteOptions {
    WriteOptions {
        write_statistics: true,
        compression,
        version: Version::V1,
    }
}

pub fn primitive(
    name: &str,
    physical_type: PhysicalType,
    repetition: Repetition,
) -> Result<ParquetType> {
    ParquetType::try_from_primitive(name.to_string(), physical_type, repetition, None, None, None)
}

pub fn utf8(name: &str, repetition: Repetition) -> Result<ParquetType> {
    ParquetType::try_from_primitive(
        name.to_string(),
        PhysicalType::ByteArray,
        repetition,
        Some(PrimitiveConvertedType::Utf8),
        None,
        None,
    )
}

/// `optional group <name> (MAP) { repeated group key_value { required byte_array key; <value_repetition> int64 value; } }`
pub fn map_of_int64(name: &str, value_repetition: Repetition) -> Result<ParquetType> {
    let key = primitive("key", PhysicalType::ByteArray, Repetition::Required)?;
    let value = primitive("value", PhysicalType::Int64, value_repetition)?;
    let key_value = ParquetType::try_from_group(
        "key_value".to_string(),
        Repetition::Repeated,
        None,
        None,
        vec![key, value],
        None,
    )?;
    ParquetType::try_from_group(
        name.to_string(),
        Repetition::Optional,
        None,
        None,
        vec![key_value],
        None,
    )
}

pub fn schema_of(fields: Vec<ParquetType>) -> SchemaDescriptor {
    SchemaDescriptor::new(ParquetType::new_root("schema".to_string(), fields))
}
