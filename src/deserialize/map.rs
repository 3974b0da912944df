use crate::error::{Error, Result};

use super::{Array, DecodedPage};

/// Composes the key and value leaf columns of a MAP logical column into
/// [`Array::Map`].
///
/// Both columns share their repetition levels. For every zero repetition
/// level, the key's definition level decides the slot: 0 is a null map, 1 an
/// empty map, 2 or more a map whose first entry is contributed by this slot.
/// Repetition level 1 appends an entry to the open map. Every entry consumes
/// one key (keys are required by the map contract); it consumes a value iff
/// the value's definition level is its maximum, otherwise the entry's value
/// is null.
///
/// Entry order within a map equals encounter order.
pub fn compose_map(key: DecodedPage, value: DecodedPage) -> Result<Array> {
    if key.rep_levels != value.rep_levels {
        return Err(Error::LevelShape(
            "the key and value columns of a map must share their repetition levels".to_string(),
        ));
    }
    if key.def_levels.len() != value.def_levels.len() {
        return Err(Error::LevelShape(
            "the key and value columns of a map must have the same number of levels".to_string(),
        ));
    }

    let key_max_def = key.max_def_level as u32;
    let value_max_def = value.max_def_level as u32;

    let null_value = value.values.null_value();
    let mut keys = key.values.into_values_iter();
    let mut values = value.values.into_values_iter();

    let mut outer: Vec<Option<Vec<_>>> = Vec::new();
    let mut entries = Vec::new();
    let mut has_open = false;

    for ((&rep, &key_def), &value_def) in key
        .rep_levels
        .iter()
        .zip(key.def_levels.iter())
        .zip(value.def_levels.iter())
    {
        if rep == 0 {
            if has_open {
                outer.push(Some(std::mem::take(&mut entries)));
                has_open = false;
            }
            if key_def == 0 {
                outer.push(None);
                continue;
            }
            if key_def == 1 {
                outer.push(Some(vec![]));
                continue;
            }
            has_open = true;
        } else if !has_open {
            return Err(Error::LevelShape(
                "a repetition level continues a map that was never started".to_string(),
            ));
        }

        // the parquet MAP contract makes "key" required
        if key_def != key_max_def {
            return Err(Error::LevelShape(
                "a map entry has a null key".to_string(),
            ));
        }
        let entry_key = keys.next().ok_or_else(|| {
            Error::LevelShape("the keys ended before the definition levels".to_string())
        })?;
        let entry_value = if value_def == value_max_def {
            values.next().ok_or_else(|| {
                Error::LevelShape("the values ended before the definition levels".to_string())
            })?
        } else {
            null_value.clone()
        };
        entries.push((entry_key, entry_value));
    }
    if has_open {
        outer.push(Some(entries));
    }
    Ok(Array::Map(outer))
}

#[cfg(test)]
mod tests {
    use super::super::{Value, Values};
    use super::*;

    fn key_page(rep: Vec<u32>, def: Vec<u32>, keys: Vec<&str>) -> DecodedPage {
        DecodedPage {
            rep_levels: rep,
            def_levels: def,
            values: Values::Binary(keys.into_iter().map(|x| x.as_bytes().to_vec()).collect()),
            max_rep_level: 1,
            max_def_level: 2,
        }
    }

    fn value_page(rep: Vec<u32>, def: Vec<u32>, values: Vec<i64>, max_def: i16) -> DecodedPage {
        DecodedPage {
            rep_levels: rep,
            def_levels: def,
            values: Values::Int64(values),
            max_rep_level: 1,
            max_def_level: max_def,
        }
    }

    fn key(k: &str) -> Value {
        Value::Binary(Some(k.as_bytes().to_vec()))
    }

    #[test]
    fn maps_with_nulls_and_empties() {
        // [null, {}, {"a": 1, "b": null, "c": 3}]
        let keys = key_page(
            vec![0, 0, 0, 1, 1],
            vec![0, 1, 2, 2, 2],
            vec!["a", "b", "c"],
        );
        let values = value_page(vec![0, 0, 0, 1, 1], vec![0, 1, 3, 2, 3], vec![1, 3], 3);

        let result = compose_map(keys, values).unwrap();
        assert_eq!(
            result,
            Array::Map(vec![
                None,
                Some(vec![]),
                Some(vec![
                    (key("a"), Value::Int64(Some(1))),
                    (key("b"), Value::Int64(None)),
                    (key("c"), Value::Int64(Some(3))),
                ]),
            ])
        );
    }

    #[test]
    fn entry_order_is_preserved() {
        let keys = key_page(vec![0, 1, 1], vec![2, 2, 2], vec!["z", "a", "m"]);
        let values = value_page(vec![0, 1, 1], vec![2, 2, 2], vec![26, 1, 13], 2);

        let result = compose_map(keys, values).unwrap();
        assert_eq!(
            result,
            Array::Map(vec![Some(vec![
                (key("z"), Value::Int64(Some(26))),
                (key("a"), Value::Int64(Some(1))),
                (key("m"), Value::Int64(Some(13))),
            ])])
        );
    }

    #[test]
    fn mismatched_repetition_levels_error() {
        let keys = key_page(vec![0, 1], vec![2, 2], vec!["a", "b"]);
        let values = value_page(vec![0, 0], vec![2, 2], vec![1, 2], 2);

        assert!(compose_map(keys, values).is_err());
    }

    #[test]
    fn null_keys_error() {
        // the second entry carries a key below the maximum definition level
        let keys = key_page(vec![0, 1], vec![2, 1], vec!["a"]);
        let values = value_page(vec![0, 1], vec![2, 2], vec![1, 2], 2);

        assert!(compose_map(keys, values).is_err());
    }
}
