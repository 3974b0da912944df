//! Reading and writing of the thrift-encoded column chunk statistics.

mod binary;
mod boolean;
mod fixed_len_binary;
mod primitive;

pub use binary::BinaryStatistics;
pub use boolean::BooleanStatistics;
pub use fixed_len_binary::FixedLenStatistics;
pub use primitive::PrimitiveStatistics;

use std::any::Any;
use std::sync::Arc;

pub use parquet_format_safe::Statistics as ParquetStatistics;

use crate::error::Result;
use crate::schema::types::PhysicalType;

/// A trait used to describe specific statistics.
/// Each physical type has its own instance.
pub trait Statistics: Send + Sync + std::fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    fn physical_type(&self) -> &PhysicalType;

    fn null_count(&self) -> Option<i64>;
}

/// Deserializes [`ParquetStatistics`] into [`Statistics`] of `physical_type`.
/// The non-deprecated `min_value`/`max_value` fields are preferred when both
/// variants are present.
pub fn deserialize_statistics(
    statistics: &ParquetStatistics,
    physical_type: &PhysicalType,
) -> Result<Arc<dyn Statistics>> {
    match physical_type {
        PhysicalType::Boolean => boolean::read(statistics),
        PhysicalType::Int32 => primitive::read::<i32>(statistics),
        PhysicalType::Int64 => primitive::read::<i64>(statistics),
        PhysicalType::Int96 => primitive::read::<[u32; 3]>(statistics),
        PhysicalType::Float => primitive::read::<f32>(statistics),
        PhysicalType::Double => primitive::read::<f64>(statistics),
        PhysicalType::ByteArray => binary::read(statistics),
        PhysicalType::FixedLenByteArray(size) => fixed_len_binary::read(statistics, *size),
    }
}

/// Serializes [`Statistics`] into [`ParquetStatistics`], filling both the
/// deprecated `min`/`max` fields and `min_value`/`max_value` for
/// compatibility.
pub fn serialize_statistics(statistics: &dyn Statistics) -> ParquetStatistics {
    match statistics.physical_type() {
        PhysicalType::Boolean => boolean::write(statistics.as_any().downcast_ref().unwrap()),
        PhysicalType::Int32 => primitive::write::<i32>(statistics.as_any().downcast_ref().unwrap()),
        PhysicalType::Int64 => primitive::write::<i64>(statistics.as_any().downcast_ref().unwrap()),
        PhysicalType::Int96 => {
            primitive::write::<[u32; 3]>(statistics.as_any().downcast_ref().unwrap())
        }
        PhysicalType::Float => primitive::write::<f32>(statistics.as_any().downcast_ref().unwrap()),
        PhysicalType::Double => {
            primitive::write::<f64>(statistics.as_any().downcast_ref().unwrap())
        }
        PhysicalType::ByteArray => binary::write(statistics.as_any().downcast_ref().unwrap()),
        PhysicalType::FixedLenByteArray(_) => {
            fixed_len_binary::write(statistics.as_any().downcast_ref().unwrap())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_int32() -> Result<()> {
        let statistics = PrimitiveStatistics::<i32> {
            null_count: Some(2),
            distinct_count: None,
            min_value: Some(-10),
            max_value: Some(43),
        };

        let thrift = serialize_statistics(&statistics);
        assert_eq!(thrift.min, thrift.min_value);
        assert_eq!(thrift.max, thrift.max_value);

        let result = deserialize_statistics(&thrift, &PhysicalType::Int32)?;
        let result = result
            .as_any()
            .downcast_ref::<PrimitiveStatistics<i32>>()
            .unwrap();
        assert_eq!(result, &statistics);
        Ok(())
    }

    #[test]
    fn round_trip_binary() -> Result<()> {
        let statistics = BinaryStatistics {
            null_count: Some(0),
            distinct_count: Some(10),
            min_value: Some(b"aa".to_vec()),
            max_value: Some(b"z".to_vec()),
        };

        let thrift = serialize_statistics(&statistics);
        let result = deserialize_statistics(&thrift, &PhysicalType::ByteArray)?;
        let result = result.as_any().downcast_ref::<BinaryStatistics>().unwrap();
        assert_eq!(result, &statistics);
        Ok(())
    }

    #[test]
    fn deprecated_fields_are_read() -> Result<()> {
        let thrift = ParquetStatistics {
            max: Some(100i32.to_le_bytes().to_vec()),
            min: Some(1i32.to_le_bytes().to_vec()),
            null_count: None,
            distinct_count: None,
            max_value: None,
            min_value: None,
        };

        let result = deserialize_statistics(&thrift, &PhysicalType::Int32)?;
        let result = result
            .as_any()
            .downcast_ref::<PrimitiveStatistics<i32>>()
            .unwrap();
        assert_eq!(result.min_value, Some(1));
        assert_eq!(result.max_value, Some(100));
        Ok(())
    }
}
