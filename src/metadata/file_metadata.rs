use parquet_format_safe::FileMetaData as TFileMetaData;

use super::{
    row_metadata::RowGroupMetaData, schema_descriptor::SchemaDescriptor, KeyValue,
};
use crate::error::{Error, Result};
use crate::schema::types::ParquetType;

/// Metadata for a Parquet file.
#[derive(Debug, Clone)]
pub struct FileMetaData {
    /// version of this file.
    pub version: i32,
    /// number of rows in the file.
    pub num_rows: i64,
    /// String message for application that wrote this file.
    ///
    /// This should have the following format:
    /// `<application> version <application version> (build <application build hash>)`.
    ///
    /// ```shell
    /// parquet-mr version 1.8.0 (build 0fda28af84b9746396014ad6a415b90592a98b3b)
    /// ```
    pub created_by: Option<String>,
    /// The row groups of this file.
    pub row_groups: Vec<RowGroupMetaData>,
    /// key_value_metadata of this file.
    pub key_value_metadata: Option<Vec<KeyValue>>,
    /// schema descriptor.
    pub schema_descr: SchemaDescriptor,
}

impl FileMetaData {
    /// Returns the [`SchemaDescriptor`] that describes schema of this file.
    pub fn schema(&self) -> &SchemaDescriptor {
        &self.schema_descr
    }

    /// Returns key_value_metadata of this file.
    pub fn key_value_metadata(&self) -> &Option<Vec<KeyValue>> {
        &self.key_value_metadata
    }

    /// Returns Parquet [`ParquetType`] that describes schema in this file.
    pub fn root_schema(&self) -> &ParquetType {
        self.schema_descr.root_schema()
    }

    /// Method to convert from Thrift.
    pub fn try_from_thrift(metadata: TFileMetaData) -> Result<Self> {
        let schema = metadata.schema.iter().collect::<Vec<_>>();
        let schema_descr = SchemaDescriptor::try_from_thrift(&schema)?;

        let row_groups = metadata
            .row_groups
            .into_iter()
            .map(|rg| RowGroupMetaData::try_from_thrift(&schema_descr, rg))
            .collect::<Result<Vec<_>>>()?;

        if metadata.encryption_algorithm.is_some() {
            return Err(Error::UnsupportedFeature(
                "encrypted parquet files".to_string(),
            ));
        }

        Ok(FileMetaData {
            version: metadata.version,
            num_rows: metadata.num_rows,
            created_by: metadata.created_by,
            row_groups,
            key_value_metadata: metadata.key_value_metadata,
            schema_descr,
        })
    }
}
