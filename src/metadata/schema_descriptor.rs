use parquet_format_safe::SchemaElement;

use crate::error::{Error, Result};
use crate::schema::types::ParquetType;
use crate::schema::Repetition;

use super::column_descriptor::ColumnDescriptor;

/// A schema descriptor. This encapsulates the top-level schema for all the
/// columns, as well as the descriptors of all the primitive leaf columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescriptor {
    // The top-level schema (the "message" type).
    // This must be a `GroupType` where each field is a root column type in the schema.
    schema: ParquetType,

    // All the descriptors for primitive columns in this schema, constructed from
    // `schema` in DFS order.
    leaves: Vec<ColumnDescriptor>,
}

impl SchemaDescriptor {
    /// Creates a new schema descriptor from a parquet schema.
    /// # Panics
    /// Panics iff `schema` is not a root group type.
    pub fn new(schema: ParquetType) -> Self {
        assert!(schema.is_root());
        let fields = match schema {
            ParquetType::GroupType { ref fields, .. } => fields,
            ParquetType::PrimitiveType { .. } => unreachable!(),
        };

        let mut leaves = vec![];
        for f in fields {
            let mut path = vec![];
            build_tree(f, 0, 0, &mut leaves, &mut path);
        }

        Self { schema, leaves }
    }

    /// Returns [`ColumnDescriptor`] for a leaf position.
    pub fn column(&self, i: usize) -> &ColumnDescriptor {
        &self.leaves[i]
    }

    /// Returns slice of [`ColumnDescriptor`].
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.leaves
    }

    /// Returns number of leaf-level columns.
    pub fn num_columns(&self) -> usize {
        self.leaves.len()
    }

    /// The fields of the root of the schema.
    pub fn fields(&self) -> &[ParquetType] {
        match self.schema {
            ParquetType::GroupType { ref fields, .. } => fields,
            ParquetType::PrimitiveType { .. } => unreachable!(),
        }
    }

    /// Returns the schema as [`ParquetType`].
    pub fn root_schema(&self) -> &ParquetType {
        &self.schema
    }

    /// Returns the schema name.
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// Method to convert from the thrift flat [`SchemaElement`] sequence.
    pub fn try_from_thrift(elements: &[&SchemaElement]) -> Result<Self> {
        if elements.is_empty() {
            return Err(Error::oos("the schema must contain at least the root element"));
        }
        let schema = ParquetType::try_from_thrift(elements)?;
        Ok(Self::new(schema))
    }

    /// Method to convert to the thrift flat [`SchemaElement`] sequence.
    pub fn into_thrift(self) -> Vec<SchemaElement> {
        self.schema.to_thrift()
    }
}

fn build_tree<'a>(
    tp: &'a ParquetType,
    mut max_rep_level: i16,
    mut max_def_level: i16,
    leaves: &mut Vec<ColumnDescriptor>,
    path_so_far: &mut Vec<&'a str>,
) {
    path_so_far.push(tp.name());
    match tp.get_basic_info().repetition() {
        Repetition::Optional => {
            max_def_level += 1;
        }
        Repetition::Repeated => {
            max_def_level += 1;
            max_rep_level += 1;
        }
        Repetition::Required => {}
    }

    match tp {
        ParquetType::PrimitiveType { .. } => {
            let path_in_schema = path_so_far.iter().copied().map(String::from).collect();
            leaves.push(ColumnDescriptor::new(
                tp.clone(),
                max_def_level,
                max_rep_level,
                path_in_schema,
            ));
        }
        ParquetType::GroupType { ref fields, .. } => {
            for f in fields {
                build_tree(f, max_rep_level, max_def_level, leaves, path_so_far);
                path_so_far.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::PhysicalType;

    #[test]
    fn levels_of_flat_columns() -> Result<()> {
        let schema = ParquetType::new_root(
            "schema".to_string(),
            vec![
                ParquetType::try_from_primitive(
                    "required".to_string(),
                    PhysicalType::Int32,
                    Repetition::Required,
                    None,
                    None,
                    None,
                )?,
                ParquetType::try_from_primitive(
                    "optional".to_string(),
                    PhysicalType::Int32,
                    Repetition::Optional,
                    None,
                    None,
                    None,
                )?,
            ],
        );
        let descriptor = SchemaDescriptor::new(schema);

        assert_eq!(descriptor.num_columns(), 2);
        assert_eq!(descriptor.column(0).max_def_level(), 0);
        assert_eq!(descriptor.column(0).max_rep_level(), 0);
        assert_eq!(descriptor.column(1).max_def_level(), 1);
        assert_eq!(descriptor.column(1).max_rep_level(), 0);
        assert_eq!(descriptor.column(0).path_in_schema(), &["required".to_string()]);
        Ok(())
    }

    #[test]
    fn levels_of_nested_columns() -> Result<()> {
        // optional group phones (LIST-shaped): repeated group phone { required int64 number }
        let number = ParquetType::try_from_primitive(
            "number".to_string(),
            PhysicalType::Int64,
            Repetition::Required,
            None,
            None,
            None,
        )?;
        let phone = ParquetType::try_from_group(
            "phone".to_string(),
            Repetition::Repeated,
            None,
            None,
            vec![number],
            None,
        )?;
        let phones = ParquetType::try_from_group(
            "phones".to_string(),
            Repetition::Optional,
            None,
            None,
            vec![phone],
            None,
        )?;
        let schema = ParquetType::new_root("schema".to_string(), vec![phones]);
        let descriptor = SchemaDescriptor::new(schema);

        assert_eq!(descriptor.num_columns(), 1);
        let leaf = descriptor.column(0);
        assert_eq!(leaf.max_def_level(), 2);
        assert_eq!(leaf.max_rep_level(), 1);
        assert_eq!(
            leaf.path_in_schema(),
            &[
                "phones".to_string(),
                "phone".to_string(),
                "number".to_string()
            ]
        );
        Ok(())
    }
}
