//! The primitive type registry: the fixed mapping from MAVLink base-type name to byte
//! size, wire-ordering priority, and little-endian read/write behavior.
//!
//! Array-ness is not part of [`MavType`] — see [`MessageField`](crate::protocol::MessageField)
//! for how a field's declared `[N]` suffix is modeled. `MavType` only ever names a scalar base
//! type, matched verbatim against the XML `type=` text with any array suffix already stripped.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::protocol::FieldValue;

/// A MAVLink primitive base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MavType {
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    #[default]
    UInt8,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Unsigned 64-bit integer.
    UInt64,
    /// Single precision IEEE754 float.
    Float,
    /// Double precision IEEE754 float.
    Double,
    /// A single byte, used for character arrays.
    Char,
    /// The special `uint8_t_mavlink_version` pseudo-type: decodes like [`MavType::UInt8`] but
    /// keeps its own identity so the message compiler can special-case it to `uint8_t` when
    /// deriving the CRC seed.
    UInt8MavlinkVersion,
}

impl MavType {
    /// Parses a base-type name (with any `[N]` suffix already stripped) into a [`MavType`].
    ///
    /// Returns `None` if `s` is not a recognized MAVLink base type; the caller is responsible
    /// for turning that into a [`CompileError::UnknownType`](crate::errors::CompileError::UnknownType)
    /// with field-name context.
    pub fn parse(s: &str) -> Option<MavType> {
        Some(match s {
            "int8_t" => MavType::Int8,
            "int16_t" => MavType::Int16,
            "int32_t" => MavType::Int32,
            "int64_t" => MavType::Int64,
            "uint8_t" => MavType::UInt8,
            "uint16_t" => MavType::UInt16,
            "uint32_t" => MavType::UInt32,
            "uint64_t" => MavType::UInt64,
            "float" => MavType::Float,
            "double" => MavType::Double,
            "char" => MavType::Char,
            "uint8_t_mavlink_version" => MavType::UInt8MavlinkVersion,
            _ => return None,
        })
    }

    /// Type name as it appears in the XML definition.
    pub fn definition_name(&self) -> &'static str {
        match self {
            MavType::Int8 => "int8_t",
            MavType::Int16 => "int16_t",
            MavType::Int32 => "int32_t",
            MavType::Int64 => "int64_t",
            MavType::UInt8 => "uint8_t",
            MavType::UInt16 => "uint16_t",
            MavType::UInt32 => "uint32_t",
            MavType::UInt64 => "uint64_t",
            MavType::Float => "float",
            MavType::Double => "double",
            MavType::Char => "char",
            MavType::UInt8MavlinkVersion => "uint8_t_mavlink_version",
        }
    }

    /// Type name as it must appear in the CRC seed string: identical to
    /// [`MavType::definition_name`] except `uint8_t_mavlink_version`, which is folded into
    /// `uint8_t`.
    pub fn crc_name(&self) -> &'static str {
        match self {
            MavType::UInt8MavlinkVersion => "uint8_t",
            other => other.definition_name(),
        }
    }

    /// Byte size of a single scalar value of this type.
    pub fn size(&self) -> usize {
        match self {
            MavType::Int8 | MavType::UInt8 | MavType::Char | MavType::UInt8MavlinkVersion => 1,
            MavType::Int16 | MavType::UInt16 => 2,
            MavType::Int32 | MavType::UInt32 | MavType::Float => 4,
            MavType::Int64 | MavType::UInt64 | MavType::Double => 8,
        }
    }

    /// Wire-ordering priority used by the stable field sort: 8-byte types first, then
    /// 4-byte, 2-byte, 1-byte. Higher priority sorts first.
    pub fn priority(&self) -> u8 {
        match self.size() {
            8 => 3,
            4 => 2,
            2 => 1,
            _ => 0,
        }
    }

    /// The zero value of this type, used to build default payload templates.
    pub fn zero(&self) -> FieldValue {
        match self {
            MavType::Int8 => FieldValue::Int8(0),
            MavType::Int16 => FieldValue::Int16(0),
            MavType::Int32 => FieldValue::Int32(0),
            MavType::Int64 => FieldValue::Int64(0),
            MavType::UInt8 => FieldValue::UInt8(0),
            MavType::UInt16 => FieldValue::UInt16(0),
            MavType::UInt32 => FieldValue::UInt32(0),
            MavType::UInt64 => FieldValue::UInt64(0),
            MavType::Float => FieldValue::Float(0.0),
            MavType::Double => FieldValue::Double(0.0),
            MavType::Char => FieldValue::Char(0),
            MavType::UInt8MavlinkVersion => FieldValue::UInt8(0),
        }
    }

    /// Writes `value` to `payload` in little-endian order, appending the bytes.
    ///
    /// If `value`'s variant doesn't match `self`, the type's zero value is written instead —
    /// callers always build `value` from this same [`MavType`] (via [`MavType::zero`] or a
    /// decoded [`FieldValue`]), so a mismatch only happens if a caller bypasses the field
    /// contract.
    pub fn write(&self, payload: &mut Vec<u8>, value: &FieldValue) {
        match (self, value) {
            (MavType::Int8, FieldValue::Int8(v)) => payload.push(*v as u8),
            (MavType::UInt8, FieldValue::UInt8(v)) => payload.push(*v),
            (MavType::Char, FieldValue::Char(v)) => payload.push(*v),
            (MavType::UInt8MavlinkVersion, FieldValue::UInt8(v)) => payload.push(*v),
            (MavType::Int16, FieldValue::Int16(v)) => payload.extend_from_slice(&v.to_le_bytes()),
            (MavType::UInt16, FieldValue::UInt16(v)) => payload.extend_from_slice(&v.to_le_bytes()),
            (MavType::Int32, FieldValue::Int32(v)) => payload.extend_from_slice(&v.to_le_bytes()),
            (MavType::UInt32, FieldValue::UInt32(v)) => payload.extend_from_slice(&v.to_le_bytes()),
            (MavType::Float, FieldValue::Float(v)) => payload.extend_from_slice(&v.to_le_bytes()),
            (MavType::Int64, FieldValue::Int64(v)) => payload.extend_from_slice(&v.to_le_bytes()),
            (MavType::UInt64, FieldValue::UInt64(v)) => payload.extend_from_slice(&v.to_le_bytes()),
            (MavType::Double, FieldValue::Double(v)) => payload.extend_from_slice(&v.to_le_bytes()),
            (other, _) => other.write(payload, &other.zero()),
        }
    }

    /// Reads one scalar value of this type from `payload` at `offset`, advancing `offset` past
    /// it. Missing trailing bytes (a payload shorter than its declared size, as MAVLink 2's
    /// trailing-zero truncation allows) are treated as zero.
    pub fn read(&self, payload: &[u8], offset: &mut usize) -> FieldValue {
        let size = self.size();
        let mut buf = [0u8; 8];
        let available = payload.len().saturating_sub(*offset).min(size);
        buf[..available].copy_from_slice(&payload[*offset..*offset + available]);
        *offset += size;

        match self {
            MavType::Int8 => FieldValue::Int8(buf[0] as i8),
            MavType::UInt8 => FieldValue::UInt8(buf[0]),
            MavType::Char => FieldValue::Char(buf[0]),
            MavType::UInt8MavlinkVersion => FieldValue::UInt8(buf[0]),
            MavType::Int16 => FieldValue::Int16(i16::from_le_bytes(buf[..2].try_into().unwrap())),
            MavType::UInt16 => FieldValue::UInt16(u16::from_le_bytes(buf[..2].try_into().unwrap())),
            MavType::Int32 => FieldValue::Int32(i32::from_le_bytes(buf[..4].try_into().unwrap())),
            MavType::UInt32 => FieldValue::UInt32(u32::from_le_bytes(buf[..4].try_into().unwrap())),
            MavType::Float => FieldValue::Float(f32::from_le_bytes(buf[..4].try_into().unwrap())),
            MavType::Int64 => FieldValue::Int64(i64::from_le_bytes(buf)),
            MavType::UInt64 => FieldValue::UInt64(u64::from_le_bytes(buf)),
            MavType::Double => FieldValue::Double(f64::from_le_bytes(buf)),
        }
    }
}
