//! The message compiler: the bulk of the codec table, where wire-format invariants are
//! established — field reordering, payload sizing, and CRC seed derivation.

use std::collections::HashMap;
use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;

use crate::crc;
use crate::errors::{self, CompileError};
use crate::protocol::traits::Builder;
use crate::protocol::{Deprecated, Message, MessageField, MessageId};
use crate::xml::Element;

/// Messages above this payload size (bytes) are flagged with a warning; enforcement is the
/// framer's job, not the compiler's.
const MAX_MESSAGE_SIZE: usize = 300;

fn field_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([A-Za-z0-9_]+)(?:\[(\d+)\])?$").unwrap())
}

/// Compiled message table plus, when descriptions were requested, their normalized-key partition.
type CompiledMessages = (HashMap<MessageId, Message>, HashMap<String, String>);

/// Compiles every `<message>` under `messages_el` into an id-keyed table.
///
/// Returns the message table plus, when `collect_descriptions` is set, the per-message
/// description partition keyed by normalized name.
pub fn compile_messages(
    messages_el: Option<&Element>,
    collect_descriptions: bool,
) -> Result<CompiledMessages, CompileError> {
    let mut messages = HashMap::new();
    let mut descriptions = HashMap::new();

    let Some(messages_el) = messages_el else {
        return Ok((messages, descriptions));
    };

    for message_el in messages_el.children_named("message") {
        let message = compile_message(message_el)?;

        if collect_descriptions {
            if let Some(description) = message_el.child_named("description") {
                descriptions.insert(message.key().to_string(), description.text.clone());
            }
        }

        if message.payload_size_v2() > MAX_MESSAGE_SIZE {
            warn!(
                "message `{}` payload size {} exceeds MAX_MESSAGE_SIZE ({MAX_MESSAGE_SIZE})",
                message.name(),
                message.payload_size_v2()
            );
        }

        debug!("compiled message `{}` (id {})", message.name(), message.id());
        messages.insert(message.id(), message);
    }

    Ok((messages, descriptions))
}

fn compile_message(message_el: &Element) -> Result<Message, CompileError> {
    let name = message_el.attr("name").ok_or_else(|| CompileError::NullIdentifier {
        context: "message/name".to_string(),
    })?;

    let id_text = message_el.attr("id").unwrap_or_default();
    let id: MessageId = id_text.parse().map_err(|_| CompileError::BadMessageId {
        message_name: name.to_string(),
        text: id_text.to_string(),
    })?;

    let mut fields = Vec::new();
    let mut in_extensions = false;
    for child in &message_el.children {
        match child.tag.as_str() {
            "extensions" => in_extensions = true,
            "field" => fields.push(compile_field(child, name, in_extensions)?),
            _ => {}
        }
    }

    let default_msg = fields.iter().map(|f| (f.key().to_string(), f.default_value())).collect();

    let mut builder = Message::builder();
    builder.set_id(id);
    builder.set_name(name.to_string());
    builder.set_fields(fields);
    builder.set_default_msg(default_msg);
    builder.set_wip(message_el.child_named("wip").is_some());
    if let Some(description) = message_el.child_named("description") {
        builder.set_description(description.text.clone());
    }
    if let Some(deprecated_el) = message_el.child_named("deprecated") {
        builder.set_deprecated(Some(Deprecated {
            since: deprecated_el.attr("since").unwrap_or_default().to_string(),
            replaced_by: deprecated_el.attr("replaced_by").map(crate::normalize::normalize_key),
            description: (!deprecated_el.text.is_empty()).then(|| deprecated_el.text.clone()),
        }));
    }

    let without_seed = builder.build();
    let crc_seed = compute_crc_seed(&without_seed);
    builder.set_crc_seed(crc_seed);
    Ok(builder.build())
}

fn compile_field(field_el: &Element, message_name: &str, extension: bool) -> Result<MessageField, CompileError> {
    let name = field_el.attr("name").ok_or_else(|| CompileError::NullIdentifier {
        context: format!("{message_name}/field/name"),
    })?;
    let type_text = field_el.attr("type").ok_or_else(|| CompileError::NullIdentifier {
        context: format!("{message_name}/{name}/type"),
    })?;

    let captures = field_type_pattern()
        .captures(type_text)
        .ok_or_else(|| CompileError::unknown_type(type_text, name))?;
    let base_type_text = &captures[1];
    let array_len = captures.get(2).map(|m| m.as_str().parse::<usize>().unwrap());

    let base_type = errors::require_type(base_type_text, name)?;

    let mut builder = MessageField::builder();
    builder.set_name(name.to_string());
    builder.set_base_type(base_type);
    builder.set_array_len(array_len);
    builder.set_enum(field_el.attr("enum").map(crate::normalize::normalize_key));
    builder.set_bitmask(field_el.attr("bitmask") == Some("true"));
    builder.set_instance(field_el.attr("instance") == Some("true"));
    builder.set_extension(extension);
    if !field_el.text.is_empty() {
        builder.set_description(field_el.text.clone());
    }

    Ok(builder.build())
}

/// Builds the CRC seed byte for `message` from its sorted regular-field schema.
///
/// Only the message name and the reordered non-extension fields participate; extension fields,
/// descriptions, and enum bindings never affect the result.
fn compute_crc_seed(message: &Message) -> u8 {
    let mut seed = Vec::new();
    seed.extend_from_slice(message.name().as_bytes());
    seed.push(b' ');

    for field in message.fields_v1() {
        seed.extend_from_slice(field.base_type().crc_name().as_bytes());
        seed.push(b' ');
        seed.extend_from_slice(field.name().as_bytes());
        seed.push(b' ');
        if let Some(len) = field.array_len() {
            seed.push(len as u8);
        }
    }

    crc::seed_byte(&seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(xml: &str) -> Element {
        Element::parse("test.xml", xml).unwrap()
    }

    #[test]
    fn empty_message_has_expected_crc_seed() {
        let root = messages(r#"<messages><message id="1" name="PING"/></messages>"#);
        let (msgs, _) = compile_messages(Some(&root), false).unwrap();
        let ping = msgs.get(&1).unwrap();
        assert_eq!(ping.payload_size_v2(), 0);
        assert_eq!(ping.crc_seed(), crc::seed_byte(b"PING "));
        assert!(ping.default_msg().is_empty());
    }

    #[test]
    fn default_msg_zero_fills_array_fields() {
        let root = messages(
            r#"<messages><message id="2" name="M"><field type="float[4]" name="wp"></field></message></messages>"#,
        );
        let (msgs, _) = compile_messages(Some(&root), false).unwrap();
        let m = msgs.get(&2).unwrap();
        assert_eq!(
            m.default_msg().get("wp").unwrap(),
            &crate::protocol::Value::Array(vec![crate::protocol::FieldValue::Float(0.0); 4])
        );
    }

    #[test]
    fn single_field_has_expected_crc_seed() {
        let root = messages(
            r#"<messages><message id="0" name="HEARTBEAT"><field type="uint8_t" name="type"></field></message></messages>"#,
        );
        let (msgs, _) = compile_messages(Some(&root), false).unwrap();
        let heartbeat = msgs.get(&0).unwrap();
        assert_eq!(heartbeat.payload_size_v2(), 1);
        assert_eq!(heartbeat.crc_seed(), crc::seed_byte(b"HEARTBEAT uint8_t type "));
    }

    #[test]
    fn array_field_seed_includes_raw_length_byte() {
        let root = messages(
            r#"<messages><message id="2" name="M"><field type="float[4]" name="wp"></field></message></messages>"#,
        );
        let (msgs, _) = compile_messages(Some(&root), false).unwrap();
        let m = msgs.get(&2).unwrap();
        assert_eq!(m.payload_size_v2(), 16);

        let mut expected = b"M float wp ".to_vec();
        expected.push(4);
        assert_eq!(m.crc_seed(), crc::seed_byte(&expected));
    }

    #[test]
    fn extension_fields_excluded_from_seed_and_v1_size() {
        let root = messages(
            r#"<messages><message id="3" name="M">
                <field type="uint8_t" name="a"></field>
                <extensions/>
                <field type="uint16_t" name="b"></field>
            </message></messages>"#,
        );
        let (msgs, _) = compile_messages(Some(&root), false).unwrap();
        let m = msgs.get(&3).unwrap();

        assert_eq!(m.payload_size_v1(), 1);
        assert_eq!(m.payload_size_v2(), 3);
        assert_eq!(m.crc_seed(), crc::seed_byte(b"M uint8_t a "));
    }

    #[test]
    fn missing_id_is_an_error() {
        let root = messages(r#"<messages><message name="M"/></messages>"#);
        let err = compile_messages(Some(&root), false);
        assert!(matches!(err, Err(CompileError::BadMessageId { .. })));
    }

    #[test]
    fn unknown_type_is_an_error() {
        let root = messages(
            r#"<messages><message id="4" name="M"><field type="not_a_type" name="a"></field></message></messages>"#,
        );
        let err = compile_messages(Some(&root), false);
        assert!(matches!(err, Err(CompileError::UnknownType { .. })));
    }
}
