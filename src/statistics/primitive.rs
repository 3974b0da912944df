use std::sync::Arc;

use super::{ParquetStatistics, Statistics};
use crate::error::{Error, Result};
use crate::schema::types::PhysicalType;
use crate::types;

#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveStatistics<T: types::NativeType> {
    pub null_count: Option<i64>,
    pub distinct_count: Option<i64>,
    pub min_value: Option<T>,
    pub max_value: Option<T>,
}

impl<T: types::NativeType> Statistics for PrimitiveStatistics<T> {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn physical_type(&self) -> &PhysicalType {
        &T::TYPE
    }

    fn null_count(&self) -> Option<i64> {
        self.null_count
    }
}

fn decoded<T: types::NativeType>(v: Option<&Vec<u8>>) -> Result<Option<T>> {
    v.map(|bytes| {
        if bytes.len() != std::mem::size_of::<T>() {
            return Err(Error::oos(
                "The min/max value of statistics MUST be plain encoded",
            ));
        }
        Ok(types::decode(bytes))
    })
    .transpose()
}

pub fn read<T: types::NativeType>(v: &ParquetStatistics) -> Result<Arc<dyn Statistics>> {
    // the non-deprecated fields win when both are present
    let max_value = decoded::<T>(v.max_value.as_ref().or(v.max.as_ref()))?;
    let min_value = decoded::<T>(v.min_value.as_ref().or(v.min.as_ref()))?;

    Ok(Arc::new(PrimitiveStatistics::<T> {
        null_count: v.null_count,
        distinct_count: v.distinct_count,
        max_value,
        min_value,
    }))
}

pub fn write<T: types::NativeType>(v: &PrimitiveStatistics<T>) -> ParquetStatistics {
    let max = v.max_value.map(|x| x.to_le_bytes().as_ref().to_vec());
    let min = v.min_value.map(|x| x.to_le_bytes().as_ref().to_vec());
    ParquetStatistics {
        null_count: v.null_count,
        distinct_count: v.distinct_count,
        max: max.clone(),
        min: min.clone(),
        max_value: max,
        min_value: min,
    }
}
