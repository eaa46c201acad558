use std::cmp::Ordering;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::normalize::normalize_key;
use crate::protocol::traits::{Buildable, Builder};
use crate::protocol::{Deprecated, EnumGroup, FieldValue, MessageField, Value};

/// Unique message identifier within a dialect.
pub type MessageId = u32;

/// A MAVLink `<message>`: an ordered set of fields, a stable id, and the CRC seed byte derived
/// from its non-extension field schema.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Message {
    id: MessageId,
    name: String,
    key: String,
    description: Option<String>,
    fields: Vec<MessageField>,
    default_msg: HashMap<String, Value>,
    crc_seed: u8,
    wip: bool,
    deprecated: Option<Deprecated>,
}

impl Buildable for Message {
    type Builder = MessageBuilder;

    fn to_builder(&self) -> MessageBuilder {
        MessageBuilder {
            message: self.clone(),
        }
    }
}

impl Message {
    /// Initiates a builder, starting from default values.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// Unique message id.
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Message name, as declared in the XML.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized lookup key, derived from [`Message::name`].
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Free-text description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Fields in declaration order (not reordered for the wire). See [`Message::fields_v2`] for
    /// the wire order.
    pub fn fields(&self) -> &[MessageField] {
        &self.fields
    }

    /// Default payload template: every field's normalized name key mapped to its zero value
    /// (a zero-filled array for array fields).
    pub fn default_msg(&self) -> &HashMap<String, Value> {
        &self.default_msg
    }

    /// The CRC seed byte (`CRC_EXTRA`) used to validate this message's schema across senders
    /// and receivers.
    pub fn crc_seed(&self) -> u8 {
        self.crc_seed
    }

    /// Work-in-progress status.
    pub fn wip(&self) -> bool {
        self.wip
    }

    /// Deprecation status.
    pub fn deprecated(&self) -> Option<&Deprecated> {
        self.deprecated.as_ref()
    }

    /// Index of the first extension field, if this message has any.
    pub fn extension_fields_idx(&self) -> Option<usize> {
        self.fields.iter().position(MessageField::extension)
    }

    /// Whether this message declares any extension fields.
    pub fn has_extension_fields(&self) -> bool {
        self.extension_fields_idx().is_some()
    }

    /// Fields reordered for the wire: a stable sort by descending base-type size,
    /// applied only to the span before the first extension field. Extension fields keep their
    /// declared order and position.
    pub fn fields_v2(&self) -> Vec<MessageField> {
        fn by_descending_size(left: &MessageField, right: &MessageField) -> Ordering {
            right.base_type().size().cmp(&left.base_type().size())
        }

        match self.extension_fields_idx() {
            None => {
                let mut reordered = self.fields.clone();
                reordered.sort_by(by_descending_size);
                reordered
            }
            Some(idx) => {
                let mut reorderable = self.fields[..idx].to_vec();
                reorderable.sort_by(by_descending_size);

                let mut fields = self.fields.clone();
                fields[..idx].clone_from_slice(&reorderable);
                fields
            }
        }
    }

    /// Fields applicable to MAVLink 1: the reordered non-extension fields, with all extension
    /// fields dropped.
    pub fn fields_v1(&self) -> Vec<MessageField> {
        self.fields_v2().into_iter().filter(|f| !f.extension()).collect()
    }

    /// Total payload size in bytes under MAVLink 2 (all fields, wire order).
    pub fn payload_size_v2(&self) -> usize {
        self.fields.iter().map(MessageField::byte_size).sum()
    }

    /// Total payload size in bytes under MAVLink 1 (extension fields excluded).
    pub fn payload_size_v1(&self) -> usize {
        self.fields.iter().filter(|f| !f.extension()).map(MessageField::byte_size).sum()
    }

    /// Whether this message's id fits in MAVLink 1's single payload byte.
    pub fn is_v1_compatible(&self) -> bool {
        self.id <= 255
    }

    /// Encodes a field-keyed record into a MAVLink 2 wire payload, in reordered field order.
    ///
    /// Arrays longer than their declared length are truncated silently; missing fields encode
    /// as that field's zero value.
    pub fn encode(&self, record: &HashMap<String, Value>) -> Vec<u8> {
        let mut payload = Vec::with_capacity(self.payload_size_v2());
        for field in self.fields_v2() {
            encode_field(&mut payload, &field, record.get(field.key()));
        }
        payload
    }

    /// Decodes a MAVLink 2 wire payload into a field-keyed record, substituting enum values with
    /// their symbolic name where a field names an enum.
    ///
    /// `char[N]` fields decode as trimmed text ([`Value::Text`]) rather than a raw byte array.
    /// A payload shorter than this message's full size is zero-padded (MAVLink 2 trailing-zero
    /// truncation).
    pub fn decode(&self, payload: &[u8], enums: &HashMap<String, EnumGroup>) -> HashMap<String, Value> {
        let mut record = HashMap::with_capacity(self.fields.len());
        let mut offset = 0;
        for field in self.fields_v2() {
            let value = decode_field(payload, &mut offset, &field, enums);
            record.insert(field.key().to_string(), value);
        }
        record
    }
}

fn encode_field(payload: &mut Vec<u8>, field: &MessageField, value: Option<&Value>) {
    match field.array_len() {
        None => {
            let scalar = match value {
                Some(Value::Scalar(v)) => *v,
                Some(Value::Symbol { value, .. }) => *value,
                _ => field.base_type().zero(),
            };
            field.base_type().write(payload, &scalar);
        }
        Some(len) => match value {
            Some(Value::Text(text)) if field.base_type() == crate::protocol::MavType::Char => {
                let mut bytes = text.as_bytes().to_vec();
                bytes.resize(len, 0);
                bytes.truncate(len);
                payload.extend_from_slice(&bytes);
            }
            Some(Value::Array(values)) => {
                for i in 0..len {
                    let v = values.get(i).copied().unwrap_or_else(|| field.base_type().zero());
                    field.base_type().write(payload, &v);
                }
            }
            _ => {
                for _ in 0..len {
                    field.base_type().write(payload, &field.base_type().zero());
                }
            }
        },
    }
}

fn decode_field(
    payload: &[u8],
    offset: &mut usize,
    field: &MessageField,
    enums: &HashMap<String, EnumGroup>,
) -> Value {
    match field.array_len() {
        None => {
            let raw = field.base_type().read(payload, offset);
            substitute_enum(raw, field, enums)
        }
        Some(len) if field.base_type() == crate::protocol::MavType::Char => {
            let mut bytes = Vec::with_capacity(len);
            for _ in 0..len {
                if let FieldValue::Char(b) = field.base_type().read(payload, offset) {
                    bytes.push(b);
                }
            }
            while bytes.last() == Some(&0) {
                bytes.pop();
            }
            Value::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        Some(len) => {
            let values = (0..len).map(|_| field.base_type().read(payload, offset)).collect();
            Value::Array(values)
        }
    }
}

fn substitute_enum(raw: FieldValue, field: &MessageField, enums: &HashMap<String, EnumGroup>) -> Value {
    if field.bitmask() {
        return Value::Scalar(raw);
    }
    let group = field.r#enum().and_then(|key| enums.get(key));
    match (group, raw.as_i64()) {
        (Some(group), Some(value)) => match group.entry_for_value(value) {
            Some(entry) => Value::Symbol {
                name: entry.key().to_string(),
                value: raw,
            },
            None => Value::Scalar(raw),
        },
        _ => Value::Scalar(raw),
    }
}

/// Builder for [`Message`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MessageBuilder {
    message: Message,
}

impl Builder for MessageBuilder {
    type Buildable = Message;

    fn build(&self) -> Message {
        self.message.clone()
    }
}

impl MessageBuilder {
    /// Creates a builder with default (empty) values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message id.
    pub fn set_id(&mut self, id: MessageId) -> &mut Self {
        self.message.id = id;
        self
    }

    /// Sets the message name, also deriving its normalized [`Message::key`].
    pub fn set_name(&mut self, name: String) -> &mut Self {
        self.message.key = normalize_key(&name);
        self.message.name = name;
        self
    }

    /// Sets the message description.
    pub fn set_description(&mut self, description: String) -> &mut Self {
        self.message.description = Some(description);
        self
    }

    /// Sets the message's fields, in declaration order.
    pub fn set_fields(&mut self, fields: Vec<MessageField>) -> &mut Self {
        self.message.fields = fields;
        self
    }

    /// Sets the message's default-payload template.
    pub fn set_default_msg(&mut self, default_msg: HashMap<String, Value>) -> &mut Self {
        self.message.default_msg = default_msg;
        self
    }

    /// Sets the message's CRC seed byte.
    pub fn set_crc_seed(&mut self, crc_seed: u8) -> &mut Self {
        self.message.crc_seed = crc_seed;
        self
    }

    /// Marks the message work-in-progress.
    pub fn set_wip(&mut self, wip: bool) -> &mut Self {
        self.message.wip = wip;
        self
    }

    /// Sets the message's deprecation status.
    pub fn set_deprecated(&mut self, deprecated: Option<Deprecated>) -> &mut Self {
        self.message.deprecated = deprecated;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::MavType;

    fn make_fields(types: &[MavType]) -> Vec<MessageField> {
        types
            .iter()
            .enumerate()
            .map(|(i, t)| MessageField::builder().set_name(i.to_string()).set_base_type(*t).build())
            .collect()
    }

    #[test]
    fn basic_fields_reordering() {
        let message = Message::builder()
            .set_fields(make_fields(&[
                MavType::Int16,
                MavType::UInt16,
                MavType::UInt32,
                MavType::UInt8,
                MavType::Float,
            ]))
            .build();

        let reordered = message.fields_v2();
        assert_eq!(reordered[0].name(), "2");
        assert_eq!(reordered[1].name(), "4");
        assert_eq!(reordered[2].name(), "0");
        assert_eq!(reordered[3].name(), "1");
        assert_eq!(reordered[4].name(), "3");
    }

    #[test]
    fn extension_fields_are_not_reordered() {
        let mut fields = make_fields(&[MavType::Int16, MavType::UInt16, MavType::UInt32, MavType::UInt8, MavType::Float]);
        fields[3] = fields[3].to_builder().set_extension(true).build();
        fields[4] = fields[4].to_builder().set_extension(true).build();

        let message = Message::builder().set_fields(fields).build();
        let reordered = message.fields_v2();

        assert_eq!(reordered[0].name(), "2");
        assert_eq!(reordered[1].name(), "0");
        assert_eq!(reordered[2].name(), "1");
        assert_eq!(reordered[3].name(), "3");
        assert_eq!(reordered[4].name(), "4");
    }

    #[test]
    fn fields_v1_drops_extensions() {
        let mut fields = make_fields(&[MavType::UInt8, MavType::UInt8]);
        fields[1] = fields[1].to_builder().set_extension(true).build();
        let message = Message::builder().set_fields(fields).build();

        assert_eq!(message.fields_v2().len(), 2);
        assert_eq!(message.fields_v1().len(), 1);
    }

    #[test]
    fn encode_decode_round_trip_with_enum_substitution() {
        let mut entries = HashMap::new();
        let entry = crate::protocol::EnumEntry::builder().set_name("MAV_STATE_ACTIVE".to_string()).set_value(4).build();
        entries.insert(entry.key().to_string(), entry);
        let mut enums = HashMap::new();
        let group = EnumGroup::builder().set_name("MAV_STATE".to_string()).set_entries(entries).build();
        enums.insert(group.key().to_string(), group);

        let field = MessageField::builder()
            .set_name("system_status".to_string())
            .set_base_type(MavType::UInt8)
            .set_enum(Some("mav-state".to_string()))
            .build();
        let message = Message::builder().set_fields(vec![field]).build();

        let mut record = HashMap::new();
        record.insert("system-status".to_string(), Value::Scalar(FieldValue::UInt8(4)));
        let payload = message.encode(&record);
        assert_eq!(payload, vec![4]);

        let decoded = message.decode(&payload, &enums);
        match decoded.get("system-status").unwrap() {
            Value::Symbol { name, .. } => assert_eq!(name, "mav-state-active"),
            other => panic!("expected symbol, got {other:?}"),
        }
    }

    #[test]
    fn char_array_decodes_as_trimmed_text() {
        let field = MessageField::builder()
            .set_name("text".to_string())
            .set_base_type(MavType::Char)
            .set_array_len(Some(5))
            .build();
        let message = Message::builder().set_fields(vec![field]).build();

        let decoded = message.decode(b"hi\0\0\0", &HashMap::new());
        assert_eq!(decoded.get("text").unwrap(), &Value::Text("hi".to_string()));
    }

    #[test]
    fn array_values_beyond_declared_length_are_truncated() {
        let field = MessageField::builder()
            .set_name("values".to_string())
            .set_base_type(MavType::UInt8)
            .set_array_len(Some(2))
            .build();
        let message = Message::builder().set_fields(vec![field]).build();

        let mut record = HashMap::new();
        record.insert(
            "values".to_string(),
            Value::Array(vec![FieldValue::UInt8(1), FieldValue::UInt8(2), FieldValue::UInt8(3)]),
        );
        assert_eq!(message.encode(&record), vec![1, 2]);
    }
}
