//! Runtime value representation for decoded/encoded message fields.
//!
//! [`FieldValue`] stands in for a single scalar of a given [`MavType`](crate::protocol::MavType).
//! [`Value`] is the shape a whole field's data takes once decoded: a lone scalar, a numeric
//! array, a trimmed string (for `char[N]` fields), or a named enum symbol substituted in place
//! of its raw integer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single scalar value of some [`MavType`](crate::protocol::MavType).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldValue {
    /// `int8_t`.
    Int8(i8),
    /// `int16_t`.
    Int16(i16),
    /// `int32_t`.
    Int32(i32),
    /// `int64_t`.
    Int64(i64),
    /// `uint8_t` (and `uint8_t_mavlink_version`).
    UInt8(u8),
    /// `uint16_t`.
    UInt16(u16),
    /// `uint32_t`.
    UInt32(u32),
    /// `uint64_t`.
    UInt64(u64),
    /// `float`.
    Float(f32),
    /// `double`.
    Double(f64),
    /// A single `char` byte.
    Char(u8),
}

impl FieldValue {
    /// This value's signed integer reading, if it holds an integer type. Used to compare a
    /// decoded scalar against an [`EnumEntry`](crate::protocol::EnumEntry) value.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            FieldValue::Int8(v) => Some(v as i64),
            FieldValue::Int16(v) => Some(v as i64),
            FieldValue::Int32(v) => Some(v as i64),
            FieldValue::Int64(v) => Some(v),
            FieldValue::UInt8(v) => Some(v as i64),
            FieldValue::UInt16(v) => Some(v as i64),
            FieldValue::UInt32(v) => Some(v as i64),
            FieldValue::UInt64(v) => Some(v as i64),
            FieldValue::Char(v) => Some(v as i64),
            FieldValue::Float(_) | FieldValue::Double(_) => None,
        }
    }
}

/// The decoded value of one message field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// A non-array field's single value.
    Scalar(FieldValue),
    /// An array field's values, in declaration order.
    Array(Vec<FieldValue>),
    /// A `char[N]` field, decoded as text and trimmed of trailing NUL bytes.
    Text(String),
    /// A scalar field whose value was matched against an
    /// [`EnumGroup`](crate::protocol::EnumGroup) and substituted with the matching entry's
    /// normalized name. The original integer is kept alongside for callers that need it.
    Symbol {
        /// The entry's normalized key.
        name: String,
        /// The raw decoded integer.
        value: FieldValue,
    },
}
