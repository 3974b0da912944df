use std::sync::Arc;

use super::{ParquetStatistics, Statistics};
use crate::error::Result;
use crate::schema::types::PhysicalType;

/// Statistics of `BYTE_ARRAY` columns. Values are the raw bytes; ordering is
/// unsigned-lexicographic.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryStatistics {
    pub null_count: Option<i64>,
    pub distinct_count: Option<i64>,
    pub min_value: Option<Vec<u8>>,
    pub max_value: Option<Vec<u8>>,
}

impl Statistics for BinaryStatistics {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn physical_type(&self) -> &PhysicalType {
        &PhysicalType::ByteArray
    }

    fn null_count(&self) -> Option<i64> {
        self.null_count
    }
}

pub fn read(v: &ParquetStatistics) -> Result<Arc<dyn Statistics>> {
    Ok(Arc::new(BinaryStatistics {
        null_count: v.null_count,
        distinct_count: v.distinct_count,
        max_value: v.max_value.as_ref().or(v.max.as_ref()).cloned(),
        min_value: v.min_value.as_ref().or(v.min.as_ref()).cloned(),
    }))
}

pub fn write(v: &BinaryStatistics) -> ParquetStatistics {
    ParquetStatistics {
        null_count: v.null_count,
        distinct_count: v.distinct_count,
        max: v.max_value.clone(),
        min: v.min_value.clone(),
        max_value: v.max_value.clone(),
        min_value: v.min_value.clone(),
    }
}
