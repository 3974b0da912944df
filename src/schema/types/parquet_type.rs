// see https://github.com/apache/parquet-format/blob/master/LogicalTypes.md
use crate::error::Result;
use crate::parquet_bridge::{GroupLogicalType, PrimitiveLogicalType, Repetition};

use super::{
    spec, BasicTypeInfo, GroupConvertedType, PhysicalType, PrimitiveConvertedType,
};

/// Representation of a Parquet type.
/// Used to describe primitive leaf fields and groups, including the
/// top-level schema. The top-level schema is represented as a `GroupType`
/// whose `is_root` is set.
#[derive(Clone, Debug, PartialEq)]
pub enum ParquetType {
    PrimitiveType {
        basic_info: BasicTypeInfo,
        logical_type: Option<PrimitiveLogicalType>,
        converted_type: Option<PrimitiveConvertedType>,
        physical_type: PhysicalType,
    },
    GroupType {
        basic_info: BasicTypeInfo,
        logical_type: Option<GroupLogicalType>,
        converted_type: Option<GroupConvertedType>,
        fields: Vec<ParquetType>,
    },
}

/// Accessors
impl ParquetType {
    /// Returns [`BasicTypeInfo`] information about the type.
    pub fn get_basic_info(&self) -> &BasicTypeInfo {
        match *self {
            Self::PrimitiveType { ref basic_info, .. } => basic_info,
            Self::GroupType { ref basic_info, .. } => basic_info,
        }
    }

    /// Returns this type's field name.
    pub fn name(&self) -> &str {
        self.get_basic_info().name()
    }

    pub fn is_root(&self) -> bool {
        self.get_basic_info().is_root()
    }

    /// Returns the physical type of this leaf.
    /// # Panics
    /// Panics iff `self` is not a primitive type.
    pub fn physical_type(&self) -> &PhysicalType {
        match self {
            Self::PrimitiveType { physical_type, .. } => physical_type,
            _ => panic!("Not a primitive type"),
        }
    }
}

/// Constructors
impl ParquetType {
    pub fn new_root(name: String, fields: Vec<ParquetType>) -> Self {
        let basic_info = BasicTypeInfo::new(name, Repetition::Optional, None, true);
        ParquetType::GroupType {
            basic_info,
            fields,
            logical_type: None,
            converted_type: None,
        }
    }

    pub fn from_converted(
        name: String,
        fields: Vec<ParquetType>,
        repetition: Option<Repetition>,
        converted_type: Option<GroupConvertedType>,
        id: Option<i32>,
    ) -> Self {
        let basic_info =
            BasicTypeInfo::new(name, repetition.unwrap_or(Repetition::Optional), id, false);
        ParquetType::GroupType {
            basic_info,
            fields,
            converted_type,
            logical_type: None,
        }
    }

    pub fn try_from_primitive(
        name: String,
        physical_type: PhysicalType,
        repetition: Repetition,
        converted_type: Option<PrimitiveConvertedType>,
        logical_type: Option<PrimitiveLogicalType>,
        id: Option<i32>,
    ) -> Result<Self> {
        spec::check_converted_invariants(&physical_type, &converted_type)?;
        spec::check_logical_invariants(&physical_type, &logical_type)?;

        let basic_info = BasicTypeInfo::new(name, repetition, id, false);

        Ok(ParquetType::PrimitiveType {
            basic_info,
            converted_type,
            logical_type,
            physical_type,
        })
    }

    pub fn try_from_group(
        name: String,
        repetition: Repetition,
        converted_type: Option<GroupConvertedType>,
        logical_type: Option<GroupLogicalType>,
        fields: Vec<ParquetType>,
        id: Option<i32>,
    ) -> Result<Self> {
        let basic_info = BasicTypeInfo::new(name, repetition, id, false);

        Ok(ParquetType::GroupType {
            basic_info,
            logical_type,
            converted_type,
            fields,
        })
    }

    pub fn from_physical(name: String, physical_type: PhysicalType) -> Self {
        let basic_info = BasicTypeInfo::new(name, Repetition::Optional, None, false);
        ParquetType::PrimitiveType {
            basic_info,
            converted_type: None,
            logical_type: None,
            physical_type,
        }
    }
}
