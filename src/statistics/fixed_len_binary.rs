use std::sync::Arc;

use super::{ParquetStatistics, Statistics};
use crate::error::{Error, Result};
use crate::schema::types::PhysicalType;

#[derive(Debug, Clone, PartialEq)]
pub struct FixedLenStatistics {
    pub null_count: Option<i64>,
    pub distinct_count: Option<i64>,
    pub min_value: Option<Vec<u8>>,
    pub max_value: Option<Vec<u8>>,
    pub physical_type: PhysicalType,
}

impl Statistics for FixedLenStatistics {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn physical_type(&self) -> &PhysicalType {
        &self.physical_type
    }

    fn null_count(&self) -> Option<i64> {
        self.null_count
    }
}

fn decoded(v: Option<&Vec<u8>>, size: i32) -> Result<Option<Vec<u8>>> {
    v.map(|bytes| {
        if bytes.len() != size as usize {
            return Err(Error::oos(
                "The min/max value of fixed-length statistics MUST have the type's length",
            ));
        }
        Ok(bytes.clone())
    })
    .transpose()
}

pub fn read(v: &ParquetStatistics, size: i32) -> Result<Arc<dyn Statistics>> {
    Ok(Arc::new(FixedLenStatistics {
        null_count: v.null_count,
        distinct_count: v.distinct_count,
        max_value: decoded(v.max_value.as_ref().or(v.max.as_ref()), size)?,
        min_value: decoded(v.min_value.as_ref().or(v.min.as_ref()), size)?,
        physical_type: PhysicalType::FixedLenByteArray(size),
    }))
}

pub fn write(v: &FixedLenStatistics) -> ParquetStatistics {
    ParquetStatistics {
        null_count: v.null_count,
        distinct_count: v.distinct_count,
        max: v.max_value.clone(),
        min: v.min_value.clone(),
        max_value: v.max_value.clone(),
        min_value: v.min_value.clone(),
    }
}
