//! Per-source compilation: turns one parsed `<mavlink>` tree into a [`Dialect`].

mod enums;
mod messages;

use crate::errors::CompileError;
use crate::protocol::{Descriptions, Dialect};
use crate::xml::Element;

/// Compiles a single parsed `<mavlink>` document into a [`Dialect`].
///
/// `name` identifies the resulting dialect (see [`crate::loader::XmlSource::name`]).
pub fn compile_dialect(name: &str, root: &Element, collect_descriptions: bool) -> Result<Dialect, CompileError> {
    let (enums, (enum_group_descr, enum_entry_descr)) =
        enums::compile_enums(root.child_named("enums"), collect_descriptions)?;
    let (messages, message_descr) = messages::compile_messages(root.child_named("messages"), collect_descriptions)?;

    let descriptions = collect_descriptions
        .then(|| Descriptions::new(enum_group_descr, enum_entry_descr, message_descr));

    let version = root.child_named("version").map(|el| el.text.clone());
    let dialect_version = root
        .child_named("dialect")
        .map(|el| el.text.parse::<u8>())
        .transpose()
        .map_err(|_| CompileError::NotAnInteger {
            identifier: "dialect".to_string(),
            text: root.child_named("dialect").map(|el| el.text.clone()).unwrap_or_default(),
        })?;

    Ok(Dialect::new(
        name.to_string(),
        version,
        dialect_version,
        enums,
        messages,
        descriptions,
    ))
}
