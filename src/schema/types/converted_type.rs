use parquet_format_safe::ConvertedType;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveConvertedType {
    Utf8,
    /// an enum is converted into a binary field
    Enum,
    /// A decimal value. (precision, scale)
    ///
    /// Value `precision * 10^(-scale)`
    Decimal(usize, usize),
    /// A Date
    ///
    /// Stored as days since Unix epoch, encoded as the INT32 physical type.
    Date,
    /// A time
    ///
    /// The total number of milliseconds since midnight.  The value is stored
    /// as an INT32 physical type.
    TimeMillis,
    /// A time.
    ///
    /// The total number of microseconds since midnight.  The value is stored as
    /// an INT64 physical type.
    TimeMicros,
    /// A date/time combination
    ///
    /// Date and time recorded as milliseconds since the Unix epoch.  Recorded as
    /// a physical type of INT64.
    TimestampMillis,
    /// A date/time combination
    ///
    /// Date and time recorded as microseconds since the Unix epoch.  The value is
    /// stored as an INT64 physical type.
    TimestampMicros,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    /// A JSON document embedded within a single UTF8 column.
    Json,
    /// A BSON document embedded within a single BINARY column.
    Bson,
    /// An interval of time
    ///
    /// This type annotates data stored as a FIXED_LEN_BYTE_ARRAY of length 12.
    Interval,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupConvertedType {
    /// a map is converted as an optional field containing a repeated key/value pair
    Map,
    /// a key/value pair is converted into a group of two fields
    MapKeyValue,
    /// a list is converted into an optional field containing a repeated field for its
    /// values
    List,
}

pub fn converted_to_primitive_converted(
    ty: &ConvertedType,
    maybe_decimal: Option<(i32, i32)>,
) -> Result<PrimitiveConvertedType> {
    use PrimitiveConvertedType::*;
    Ok(match *ty {
        ConvertedType::UTF8 => Utf8,
        ConvertedType::ENUM => Enum,
        ConvertedType::DECIMAL => {
            if let Some((precision, scale)) = maybe_decimal {
                Decimal(precision.try_into()?, scale.try_into()?)
            } else {
                return Err(Error::oos("Decimal requires a precision and scale"));
            }
        }
        ConvertedType::DATE => Date,
        ConvertedType::TIME_MILLIS => TimeMillis,
        ConvertedType::TIME_MICROS => TimeMicros,
        ConvertedType::TIMESTAMP_MILLIS => TimestampMillis,
        ConvertedType::TIMESTAMP_MICROS => TimestampMicros,
        ConvertedType::UINT_8 => Uint8,
        ConvertedType::UINT_16 => Uint16,
        ConvertedType::UINT_32 => Uint32,
        ConvertedType::UINT_64 => Uint64,
        ConvertedType::INT_8 => Int8,
        ConvertedType::INT_16 => Int16,
        ConvertedType::INT_32 => Int32,
        ConvertedType::INT_64 => Int64,
        ConvertedType::JSON => Json,
        ConvertedType::BSON => Bson,
        ConvertedType::INTERVAL => Interval,
        _ => {
            return Err(Error::oos(
                "The converted type is not valid for a primitive type",
            ))
        }
    })
}

pub fn converted_to_group_converted(ty: &ConvertedType) -> Result<GroupConvertedType> {
    use GroupConvertedType::*;
    Ok(match *ty {
        ConvertedType::MAP => Map,
        ConvertedType::MAP_KEY_VALUE => MapKeyValue,
        ConvertedType::LIST => List,
        _ => {
            return Err(Error::oos(
                "The converted type is not valid for a group type",
            ))
        }
    })
}

impl From<PrimitiveConvertedType> for ConvertedType {
    fn from(ty: PrimitiveConvertedType) -> Self {
        use PrimitiveConvertedType::*;
        match ty {
            Utf8 => ConvertedType::UTF8,
            Enum => ConvertedType::ENUM,
            Decimal(_, _) => ConvertedType::DECIMAL,
            Date => ConvertedType::DATE,
            TimeMillis => ConvertedType::TIME_MILLIS,
            TimeMicros => ConvertedType::TIME_MICROS,
            TimestampMillis => ConvertedType::TIMESTAMP_MILLIS,
            TimestampMicros => ConvertedType::TIMESTAMP_MICROS,
            Uint8 => ConvertedType::UINT_8,
            Uint16 => ConvertedType::UINT_16,
            Uint32 => ConvertedType::UINT_32,
            Uint64 => ConvertedType::UINT_64,
            Int8 => ConvertedType::INT_8,
            Int16 => ConvertedType::INT_16,
            Int32 => ConvertedType::INT_32,
            Int64 => ConvertedType::INT_64,
            Json => ConvertedType::JSON,
            Bson => ConvertedType::BSON,
            Interval => ConvertedType::INTERVAL,
        }
    }
}

impl From<GroupConvertedType> for ConvertedType {
    fn from(ty: GroupConvertedType) -> Self {
        use GroupConvertedType::*;
        match ty {
            Map => ConvertedType::MAP,
            MapKeyValue => ConvertedType::MAP_KEY_VALUE,
            List => ConvertedType::LIST,
        }
    }
}
