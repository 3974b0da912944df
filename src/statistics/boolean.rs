use std::sync::Arc;

use super::{ParquetStatistics, Statistics};
use crate::error::{Error, Result};
use crate::schema::types::PhysicalType;

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanStatistics {
    pub null_count: Option<i64>,
    pub distinct_count: Option<i64>,
    pub min_value: Option<bool>,
    pub max_value: Option<bool>,
}

impl Statistics for BooleanStatistics {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn physical_type(&self) -> &PhysicalType {
        &PhysicalType::Boolean
    }

    fn null_count(&self) -> Option<i64> {
        self.null_count
    }
}

fn decoded(v: Option<&Vec<u8>>) -> Result<Option<bool>> {
    v.map(|bytes| {
        if bytes.len() != std::mem::size_of::<bool>() {
            return Err(Error::oos(
                "The min/max value of boolean statistics MUST be a single byte",
            ));
        }
        Ok(bytes[0] != 0)
    })
    .transpose()
}

pub fn read(v: &ParquetStatistics) -> Result<Arc<dyn Statistics>> {
    let max_value = decoded(v.max_value.as_ref().or(v.max.as_ref()))?;
    let min_value = decoded(v.min_value.as_ref().or(v.min.as_ref()))?;

    Ok(Arc::new(BooleanStatistics {
        null_count: v.null_count,
        distinct_count: v.distinct_count,
        max_value,
        min_value,
    }))
}

pub fn write(v: &BooleanStatistics) -> ParquetStatistics {
    let max = v.max_value.map(|x| vec![x as u8]);
    let min = v.min_value.map(|x| vec![x as u8]);
    ParquetStatistics {
        null_count: v.null_count,
        distinct_count: v.distinct_count,
        max: max.clone(),
        min: min.clone(),
        max_value: max,
        min_value: min,
    }
}
