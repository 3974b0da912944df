use crate::deserialize::Value;
use crate::error::{Error, Result};
use crate::metadata::ColumnDescriptor;
use crate::page::CompressedPage;

use super::super::WriteOptions;
use super::{build_page, is_null};

/// Encodes MAP slots into the key and value leaf pages.
///
/// Both pages share their repetition levels. A null map contributes one slot
/// with definition levels 0; an empty map one slot with definition levels 1;
/// entries contribute one slot each, the first at repetition level 0 and the
/// rest at 1. Keys always carry their maximum definition level; values carry
/// theirs when non-null and one less otherwise.
pub fn map_to_pages(
    maps: &[Option<Vec<(Value, Value)>>],
    key_descriptor: &ColumnDescriptor,
    value_descriptor: &ColumnDescriptor,
    options: &WriteOptions,
) -> Result<(CompressedPage, CompressedPage)> {
    let key_max_def = key_descriptor.max_def_level() as u32;
    let value_max_def = value_descriptor.max_def_level() as u32;

    let mut rep_levels = vec![];
    let mut key_def_levels = vec![];
    let mut value_def_levels = vec![];
    let mut keys = vec![];
    let mut values = vec![];

    for map in maps {
        match map {
            None => {
                rep_levels.push(0);
                key_def_levels.push(0);
                value_def_levels.push(0);
            }
            Some(entries) if entries.is_empty() => {
                rep_levels.push(0);
                key_def_levels.push(1);
                value_def_levels.push(1);
            }
            Some(entries) => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    rep_levels.push(u32::from(i != 0));

                    if is_null(key) {
                        return Err(Error::UnsupportedFeature(
                            "writing a map entry with a null key".to_string(),
                        ));
                    }
                    key_def_levels.push(key_max_def);
                    keys.push(key.clone());

                    if is_null(value) {
                        if value_max_def < 3 {
                            return Err(Error::UnsupportedFeature(
                                "writing a null value into a map with required values".to_string(),
                            ));
                        }
                        value_def_levels.push(value_max_def - 1);
                    } else {
                        value_def_levels.push(value_max_def);
                        values.push(value.clone());
                    }
                }
            }
        }
    }

    let num_values = rep_levels.len();
    let key_page = build_page(
        keys,
        num_values,
        Some(&rep_levels),
        Some(&key_def_levels),
        key_descriptor,
        options,
    )?;
    let value_page = build_page(
        values,
        num_values,
        Some(&rep_levels),
        Some(&value_def_levels),
        value_descriptor,
        options,
    )?;
    Ok((key_page, value_page))
}
