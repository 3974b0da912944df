use crate::error::{Error, Result};

use super::values::Values;
use super::{Array, DecodedPage};

// Walks (rep, def) pairs: `rep == 0` opens a new outer slot, `rep == 1`
// appends to the open one. A slot that contributes an element consumes a
// value iff its def level is the maximum.
fn compose_typed<T>(
    rep_levels: &[u32],
    def_levels: &[u32],
    max_def: u32,
    values: Vec<T>,
    make: fn(Vec<Option<T>>) -> Array,
) -> Result<Array> {
    let mut values = values.into_iter();
    let mut outer: Vec<Option<Array>> = Vec::new();
    let mut inner: Vec<Option<T>> = Vec::new();
    let mut has_open = false;

    for (&rep, &def) in rep_levels.iter().zip(def_levels.iter()) {
        if rep == 0 {
            if has_open {
                outer.push(Some(make(std::mem::take(&mut inner))));
                has_open = false;
            }
            if max_def >= 2 {
                if def == 0 {
                    // the list itself is null
                    outer.push(None);
                    continue;
                }
                if def == 1 {
                    outer.push(Some(make(vec![])));
                    continue;
                }
            } else if def == 0 {
                // a required list with zero occurrences
                outer.push(Some(make(vec![])));
                continue;
            }
            has_open = true;
        } else if !has_open {
            return Err(Error::LevelShape(
                "a repetition level continues a list that was never started".to_string(),
            ));
        }

        if def == max_def {
            let value = values.next().ok_or_else(|| {
                Error::LevelShape(
                    "the non-null values ended before the definition levels".to_string(),
                )
            })?;
            inner.push(Some(value));
        } else {
            inner.push(None);
        }
    }
    if has_open {
        outer.push(Some(make(inner)));
    }
    Ok(Array::List(outer))
}

/// Composes a [`DecodedPage`] of a column inside a repeated ancestor into
/// [`Array::List`]. The output length equals the number of zero repetition
/// levels.
pub(super) fn compose_list(decoded: DecodedPage) -> Result<Array> {
    if decoded.max_rep_level != 1 {
        return Err(Error::UnsupportedFeature(
            "lists nested into more than one repetition level".to_string(),
        ));
    }
    let max_def = decoded.max_def_level as u32;
    let rep = &decoded.rep_levels;
    let def = &decoded.def_levels;

    match decoded.values {
        Values::Boolean(v) => compose_typed(rep, def, max_def, v, Array::Boolean),
        Values::Int32(v) => compose_typed(rep, def, max_def, v, Array::Int32),
        Values::Int64(v) => compose_typed(rep, def, max_def, v, Array::Int64),
        Values::Int96(v) => compose_typed(rep, def, max_def, v, Array::Int96),
        Values::Float32(v) => compose_typed(rep, def, max_def, v, Array::Float32),
        Values::Float64(v) => compose_typed(rep, def, max_def, v, Array::Float64),
        Values::Binary(v) => compose_typed(rep, def, max_def, v, Array::Binary),
        Values::FixedLenBinary(v) => compose_typed(rep, def, max_def, v, Array::FixedLenBinary),
    }
}
