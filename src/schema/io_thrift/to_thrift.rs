use parquet_format_safe::SchemaElement;

use super::super::types::{physical_type_to_type, ParquetType, PrimitiveConvertedType};

impl ParquetType {
    /// Method to convert to the thrift flat [`SchemaElement`] sequence.
    pub fn to_thrift(&self) -> Vec<SchemaElement> {
        let mut elements: Vec<SchemaElement> = Vec::new();
        to_thrift_helper(self, &mut elements, true);
        elements
    }
}

/// Constructs list of [`SchemaElement`] from the schema using depth-first traversal.
/// Here we assume that the schema is always valid and starts with the root type.
fn to_thrift_helper(schema: &ParquetType, elements: &mut Vec<SchemaElement>, is_root: bool) {
    match schema {
        ParquetType::PrimitiveType {
            basic_info,
            logical_type,
            converted_type,
            physical_type,
        } => {
            let (type_, type_length) = physical_type_to_type(physical_type);
            let (precision, scale) = match converted_type {
                Some(PrimitiveConvertedType::Decimal(precision, scale)) => {
                    (Some(*precision as i32), Some(*scale as i32))
                }
                _ => (None, None),
            };

            let element = SchemaElement {
                type_: Some(type_),
                type_length,
                repetition_type: Some((*basic_info.repetition()).into()),
                name: basic_info.name().to_string(),
                num_children: None,
                converted_type: converted_type.map(|x| x.into()),
                scale,
                precision,
                field_id: basic_info.id(),
                logical_type: logical_type.map(|x| x.into()),
            };

            elements.push(element);
        }
        ParquetType::GroupType {
            basic_info,
            fields,
            logical_type,
            converted_type,
        } => {
            let element = SchemaElement {
                type_: None,
                type_length: None,
                // the root of the schema has no repetition
                repetition_type: if is_root {
                    None
                } else {
                    Some((*basic_info.repetition()).into())
                },
                name: basic_info.name().to_string(),
                num_children: Some(fields.len() as i32),
                converted_type: converted_type.map(|x| x.into()),
                scale: None,
                precision: None,
                field_id: basic_info.id(),
                logical_type: logical_type.map(|x| x.into()),
            };

            elements.push(element);

            // Add child elements for a group
            for field in fields {
                to_thrift_helper(field, elements, false);
            }
        }
    }
}
