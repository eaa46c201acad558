#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::normalize::normalize_key;
use crate::protocol::traits::{Buildable, Builder};
use crate::protocol::{MavType, Value};

/// A single `<field>` of a `<message>`.
///
/// Array-ness lives here rather than on [`MavType`]: `array_len` is `Some(n)` for a field
/// declared `type[n]` in the XML, `None` for a plain scalar field.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MessageField {
    name: String,
    key: String,
    description: Option<String>,
    base_type: MavType,
    array_len: Option<usize>,
    r#enum: Option<String>,
    bitmask: bool,
    instance: bool,
    extension: bool,
}

impl Buildable for MessageField {
    type Builder = MessageFieldBuilder;

    fn to_builder(&self) -> MessageFieldBuilder {
        MessageFieldBuilder {
            field: self.clone(),
        }
    }
}

impl MessageField {
    /// Initiates a builder, starting from default values.
    pub fn builder() -> MessageFieldBuilder {
        MessageFieldBuilder::new()
    }

    /// Field name, as declared in the XML.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized lookup key, derived from [`MessageField::name`].
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Free-text description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The field's scalar base type.
    pub fn base_type(&self) -> MavType {
        self.base_type
    }

    /// Declared array length, if this field is an array.
    pub fn array_len(&self) -> Option<usize> {
        self.array_len
    }

    /// Byte size of this field on the wire: `base_type.size()`, times `array_len` if an array.
    pub fn byte_size(&self) -> usize {
        self.base_type.size() * self.array_len.unwrap_or(1)
    }

    /// Normalized key of the enum this field's values are drawn from, if any.
    pub fn r#enum(&self) -> Option<&str> {
        self.r#enum.as_deref()
    }

    /// Whether this field is a bitmask (each bit a separate flag from its enum).
    pub fn bitmask(&self) -> bool {
        self.bitmask
    }

    /// Whether this field selects among multiple instances of the same kind of sensor.
    pub fn instance(&self) -> bool {
        self.instance
    }

    /// Whether this field was declared after the `<extensions/>` marker.
    pub fn extension(&self) -> bool {
        self.extension
    }

    /// This field's default value: a zero scalar, or a zero-filled array of its declared length.
    pub fn default_value(&self) -> Value {
        match self.array_len {
            None => Value::Scalar(self.base_type.zero()),
            Some(len) => Value::Array(vec![self.base_type.zero(); len]),
        }
    }
}

/// Builder for [`MessageField`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MessageFieldBuilder {
    field: MessageField,
}

impl Builder for MessageFieldBuilder {
    type Buildable = MessageField;

    fn build(&self) -> MessageField {
        self.field.clone()
    }
}

impl MessageFieldBuilder {
    /// Creates a builder with default (empty) values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field name, also deriving its normalized [`MessageField::key`].
    pub fn set_name(&mut self, name: String) -> &mut Self {
        self.field.key = normalize_key(&name);
        self.field.name = name;
        self
    }

    /// Sets the field description.
    pub fn set_description(&mut self, description: String) -> &mut Self {
        self.field.description = Some(description);
        self
    }

    /// Sets the field's scalar base type.
    pub fn set_base_type(&mut self, base_type: MavType) -> &mut Self {
        self.field.base_type = base_type;
        self
    }

    /// Sets the field's declared array length.
    pub fn set_array_len(&mut self, array_len: Option<usize>) -> &mut Self {
        self.field.array_len = array_len;
        self
    }

    /// Sets the normalized key of the enum this field's values are drawn from.
    pub fn set_enum(&mut self, r#enum: Option<String>) -> &mut Self {
        self.field.r#enum = r#enum;
        self
    }

    /// Sets whether this field is a bitmask.
    pub fn set_bitmask(&mut self, bitmask: bool) -> &mut Self {
        self.field.bitmask = bitmask;
        self
    }

    /// Sets whether this field selects among multiple sensor instances.
    pub fn set_instance(&mut self, instance: bool) -> &mut Self {
        self.field.instance = instance;
        self
    }

    /// Sets whether this field is an extension field.
    pub fn set_extension(&mut self, extension: bool) -> &mut Self {
        self.field.extension = extension;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_value_is_zero_scalar_or_zero_filled_array() {
        let scalar = MessageField::builder().set_name("a".to_string()).set_base_type(MavType::UInt8).build();
        assert_eq!(scalar.default_value(), Value::Scalar(crate::protocol::FieldValue::UInt8(0)));

        let array = MessageField::builder()
            .set_name("wp".to_string())
            .set_base_type(MavType::Float)
            .set_array_len(Some(4))
            .build();
        assert_eq!(
            array.default_value(),
            Value::Array(vec![crate::protocol::FieldValue::Float(0.0); 4])
        );
    }

    #[test]
    fn byte_size_accounts_for_array_length() {
        let scalar = MessageField::builder()
            .set_name("custom_mode".to_string())
            .set_base_type(MavType::UInt32)
            .build();
        assert_eq!(scalar.byte_size(), 4);

        let array = MessageField::builder()
            .set_name("param".to_string())
            .set_base_type(MavType::Float)
            .set_array_len(Some(7))
            .build();
        assert_eq!(array.byte_size(), 28);
    }
}
