use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::protocol::{Descriptions, EnumGroup, Message, MessageId};

/// A single compiled `<mavlink>` XML source: its own enums and messages, before any
/// `<include>`d dialects have been folded in.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dialect {
    name: String,
    version: Option<String>,
    dialect_version: Option<u8>,
    enums: HashMap<String, EnumGroup>,
    messages: HashMap<MessageId, Message>,
    descriptions: Option<Descriptions>,
}

impl Dialect {
    /// Builds a dialect from its already-compiled enums and messages.
    pub fn new(
        name: String,
        version: Option<String>,
        dialect_version: Option<u8>,
        enums: HashMap<String, EnumGroup>,
        messages: HashMap<MessageId, Message>,
        descriptions: Option<Descriptions>,
    ) -> Self {
        Self {
            name,
            version,
            dialect_version,
            enums,
            messages,
            descriptions,
        }
    }

    /// Dialect name: the file base name its `<mavlink file="...">` attribute named, or the
    /// caller-supplied source name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The advisory `version` root attribute, if present.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The advisory `dialect` root attribute, if present.
    pub fn dialect_version(&self) -> Option<u8> {
        self.dialect_version
    }

    /// Enums defined directly in this source, keyed by normalized name.
    pub fn enums(&self) -> &HashMap<String, EnumGroup> {
        &self.enums
    }

    /// Messages defined directly in this source, keyed by id.
    pub fn messages(&self) -> &HashMap<MessageId, Message> {
        &self.messages
    }

    /// Description table collected from this source, if descriptions were requested.
    pub fn descriptions(&self) -> Option<&Descriptions> {
        self.descriptions.as_ref()
    }
}

/// The result of merging a dialect with all of its transitive `<include>`s: a single flat
/// codec table with every enum and message reachable from the root source.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MergedDialect {
    name: String,
    enums: HashMap<String, EnumGroup>,
    enum_values: HashMap<String, i64>,
    messages: HashMap<MessageId, Message>,
    descriptions: Option<Descriptions>,
}

impl MergedDialect {
    /// Builds a merged dialect from its final, conflict-free enum and message tables.
    pub fn new(
        name: String,
        enums: HashMap<String, EnumGroup>,
        enum_values: HashMap<String, i64>,
        messages: HashMap<MessageId, Message>,
        descriptions: Option<Descriptions>,
    ) -> Self {
        Self {
            name,
            enums,
            enum_values,
            messages,
            descriptions,
        }
    }

    /// Name of the root dialect this was merged from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All enums reachable from the root dialect, keyed by normalized name.
    pub fn enums(&self) -> &HashMap<String, EnumGroup> {
        &self.enums
    }

    /// Flat enum-entry key to integer value table, across every enum group reachable from the
    /// root dialect. This is the table merge-conflict detection is checked against.
    pub fn enum_values(&self) -> &HashMap<String, i64> {
        &self.enum_values
    }

    /// All messages reachable from the root dialect, keyed by id.
    pub fn messages(&self) -> &HashMap<MessageId, Message> {
        &self.messages
    }

    /// Looks up a message by its normalized name.
    pub fn message_by_name(&self, key: &str) -> Option<&Message> {
        self.messages.values().find(|message| message.key() == key)
    }

    /// Description table collected across the merged dialects, if descriptions were requested.
    pub fn descriptions(&self) -> Option<&Descriptions> {
        self.descriptions.as_ref()
    }
}
