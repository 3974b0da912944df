use super::super::Repetition;

/// Common type information: the field's name, repetition and optional id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BasicTypeInfo {
    name: String,
    repetition: Repetition,
    id: Option<i32>,
    is_root: bool,
}

// Accessors
impl BasicTypeInfo {
    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the [`Repetition`] of the type.
    pub fn repetition(&self) -> &Repetition {
        &self.repetition
    }

    /// Returns the id of the type, if set.
    pub fn id(&self) -> Option<i32> {
        self.id
    }

    /// Whether this is the root of the schema; the root contributes no path
    /// segment and no repetition.
    pub fn is_root(&self) -> bool {
        self.is_root
    }
}

// Constructors
impl BasicTypeInfo {
    pub fn new(name: String, repetition: Repetition, id: Option<i32>, is_root: bool) -> Self {
        Self {
            name,
            repetition,
            id,
            is_root,
        }
    }
}
