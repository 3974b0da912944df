use super::column_descriptor::ColumnDescriptor;
use super::schema_descriptor::SchemaDescriptor;

/// A logical column built on top of the physical leaf columns: a flat
/// primitive, a list over one leaf, or a map over a key leaf and a value
/// leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalDescriptor {
    Primitive(ColumnDescriptor),
    List(ColumnDescriptor),
    Map {
        key: ColumnDescriptor,
        value: ColumnDescriptor,
    },
}

impl LogicalDescriptor {
    /// The name of the outermost field of this logical column.
    pub fn name(&self) -> &str {
        match self {
            LogicalDescriptor::Primitive(leaf) | LogicalDescriptor::List(leaf) => {
                &leaf.path_in_schema()[0]
            }
            LogicalDescriptor::Map { key, .. } => &key.path_in_schema()[0],
        }
    }

    /// The number of physical leaf columns backing this logical column.
    pub fn num_leaves(&self) -> usize {
        match self {
            LogicalDescriptor::Map { .. } => 2,
            _ => 1,
        }
    }
}

fn is_map_leaf(leaf: &ColumnDescriptor, last: &str) -> bool {
    let path = leaf.path_in_schema();
    path.len() == 3 && path[1] == "key_value" && path[2] == last
}

/// Groups the physical leaf columns of `schema` into logical columns.
///
/// Maps are auto-detected from consecutive leaf pairs with paths
/// `[name, "key_value", "key"]` and `[name, "key_value", "value"]`; leaves
/// inside a repeated ancestor become lists; everything else is primitive.
pub fn logical_columns(schema: &SchemaDescriptor) -> Vec<LogicalDescriptor> {
    let mut columns = Vec::with_capacity(schema.num_columns());

    let leaves = schema.columns();
    let mut i = 0;
    while i < leaves.len() {
        let leaf = &leaves[i];
        if is_map_leaf(leaf, "key") && i + 1 < leaves.len() {
            let next = &leaves[i + 1];
            if is_map_leaf(next, "value") && next.path_in_schema()[0] == leaf.path_in_schema()[0] {
                columns.push(LogicalDescriptor::Map {
                    key: leaf.clone(),
                    value: next.clone(),
                });
                i += 2;
                continue;
            }
        }
        if leaf.max_rep_level() > 0 {
            columns.push(LogicalDescriptor::List(leaf.clone()));
        } else {
            columns.push(LogicalDescriptor::Primitive(leaf.clone()));
        }
        i += 1;
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::schema::types::{ParquetType, PhysicalType};
    use crate::schema::Repetition;

    fn map_type(name: &str, value_repetition: Repetition) -> Result<ParquetType> {
        let key = ParquetType::try_from_primitive(
            "key".to_string(),
            PhysicalType::ByteArray,
            Repetition::Required,
            None,
            None,
            None,
        )?;
        let value = ParquetType::try_from_primitive(
            "value".to_string(),
            PhysicalType::Int64,
            value_repetition,
            None,
            None,
            None,
        )?;
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

    #[test]
    fn detects_maps_and_primitives() -> Result<()> {
        let id = ParquetType::try_from_primitive(
            "id".to_string(),
            PhysicalType::Int32,
            Repetition::Required,
            None,
            None,
            None,
        )?;
        let schema = ParquetType::new_root(
            "schema".to_string(),
            vec![id, map_type("tags", Repetition::Optional)?],
        );
        let descriptor = SchemaDescriptor::new(schema);

        let columns = logical_columns(&descriptor);
        assert_eq!(columns.len(), 2);
        assert!(matches!(columns[0], LogicalDescriptor::Primitive(_)));
        match &columns[1] {
            LogicalDescriptor::Map { key, value } => {
                assert_eq!(key.max_def_level(), 2);
                assert_eq!(key.max_rep_level(), 1);
                assert_eq!(value.max_def_level(), 3);
                assert_eq!(value.max_rep_level(), 1);
            }
            other => panic!("expected a map, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn detects_lists() -> Result<()> {
        let element = ParquetType::try_from_primitive(
            "element".to_string(),
            PhysicalType::Int64,
            Repetition::Repeated,
            None,
            None,
            None,
        )?;
        let schema = ParquetType::new_root("schema".to_string(), vec![element]);
        let descriptor = SchemaDescriptor::new(schema);

        let columns = logical_columns(&descriptor);
        assert_eq!(columns.len(), 1);
        assert!(matches!(columns[0], LogicalDescriptor::List(_)));
        Ok(())
    }
}
