//! Compile-time error taxonomy.
//!
//! Every error here is fatal to the overall compile: no partial descriptor is ever returned
//! (see the propagation policy in the top-level [`compile`](crate::compile) docs). Variants
//! carry enough context — source file name, entity name, offending text — to render a
//! human-readable message without a debugger.

use thiserror::Error;

use crate::protocol::MavType;

/// Errors raised while building a navigable tree from raw dialect XML text.
#[derive(Debug, Clone, Error)]
pub enum XmlTreeError {
    /// The underlying XML was not well-formed.
    #[error("malformed XML in `{source_name}`: {reason}")]
    Malformed {
        /// Name of the source that failed to parse.
        source_name: String,
        /// Reason reported by the XML reader.
        reason: String,
    },
}

/// Errors surfaced by the compiler, covering XML-source loading, enum compilation, message
/// compilation, and dialect merging.
#[derive(Debug, Clone, Error)]
pub enum CompileError {
    /// A required string identifier (a name) was missing where one was expected.
    #[error("`{context}` is missing a required identifier")]
    NullIdentifier {
        /// Where the missing identifier was expected (e.g. `"message/name"`).
        context: String,
    },

    /// A string value that should parse as a signed integer did not.
    #[error("`{identifier}` is not an integer: {text:?}")]
    NotAnInteger {
        /// Name of the attribute/element that failed to parse.
        identifier: String,
        /// The text that failed to parse.
        text: String,
    },

    /// An [`XmlSource`](crate::loader::XmlSource) has neither a `file=` attribute on its root
    /// nor a caller-supplied name.
    #[error("XML source has no file identity: neither `file=` nor a caller-supplied name was given")]
    MissingFileIdentity,

    /// An `<include>` references a file that was not provided among the loaded sources.
    #[error("`{file}` is included but was not provided as a source")]
    MissingInclude {
        /// The filename that was referenced but never supplied.
        file: String,
    },

    /// A field references a base type absent from the primitive registry.
    #[error("field `{field_name}` has unknown base type `{base_type}`")]
    UnknownType {
        /// The unrecognized type text.
        base_type: String,
        /// The field that referenced it.
        field_name: String,
    },

    /// An enum entry's `value=` attribute failed to parse as a signed integer.
    #[error("enum entry `{entry_name}` has a non-integer value: {text:?}")]
    BadEnumValue {
        /// The offending entry.
        entry_name: String,
        /// The text that failed to parse.
        text: String,
    },

    /// A message's `id=` attribute is missing or failed to parse as an integer.
    #[error("message `{message_name}` has an invalid id: {text:?}")]
    BadMessageId {
        /// The offending message.
        message_name: String,
        /// The text that failed to parse, if any was present.
        text: String,
    },

    /// Two dialects being merged conflict on enum names, message ids, or message names.
    #[error("merge conflict ({kind}) from `{source_name}`: {items:?}")]
    MergeConflict {
        /// Which namespace the conflict occurred in.
        kind: MergeConflictKind,
        /// The colliding keys (normalized).
        items: Vec<String>,
        /// Name of the dialect being folded in when the conflict was detected.
        source_name: String,
    },

    /// XML well-formedness error surfaced while building the navigable tree.
    #[error(transparent)]
    Xml(#[from] XmlTreeError),
}

/// Which namespace a [`CompileError::MergeConflict`] occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeConflictKind {
    /// Colliding normalized enum-entry keys.
    Enum,
    /// Colliding message ids.
    MessageId,
    /// Colliding normalized message-name keys.
    MessageName,
}

impl std::fmt::Display for MergeConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MergeConflictKind::Enum => "enum",
            MergeConflictKind::MessageId => "message-id",
            MergeConflictKind::MessageName => "message-name",
        };
        f.write_str(s)
    }
}

impl CompileError {
    /// Builds a [`CompileError::UnknownType`] for a field referencing `base_type`.
    pub(crate) fn unknown_type(base_type: &str, field_name: &str) -> Self {
        CompileError::UnknownType {
            base_type: base_type.to_string(),
            field_name: field_name.to_string(),
        }
    }
}

/// Convenience conversion so primitive-type parsing can bubble up `field_name` context.
pub(crate) fn require_type(text: &str, field_name: &str) -> Result<MavType, CompileError> {
    MavType::parse(text).ok_or_else(|| CompileError::unknown_type(text, field_name))
}
