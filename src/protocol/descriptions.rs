use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Free-text `<description>` content collected from a dialect, partitioned by the kind of entity
/// it was found on.
///
/// Partitioning avoids a collision between, say, an enum entry and a message that normalize to
/// the same key — each kind gets its own namespace instead of being folded into one flat map.
/// Only built when the caller opts in via [`CompileOptions::descriptions`](crate::CompileOptions);
/// collecting it never changes codec correctness (payload layout, CRC seeds, enum substitution).
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Descriptions {
    enum_groups: HashMap<String, String>,
    enum_entries: HashMap<String, String>,
    messages: HashMap<String, String>,
}

impl Descriptions {
    /// Builds a description table from its three partitions.
    pub fn new(
        enum_groups: HashMap<String, String>,
        enum_entries: HashMap<String, String>,
        messages: HashMap<String, String>,
    ) -> Self {
        Self {
            enum_groups,
            enum_entries,
            messages,
        }
    }

    /// Descriptions keyed by normalized enum-group name.
    pub fn enum_groups(&self) -> &HashMap<String, String> {
        &self.enum_groups
    }

    /// Descriptions keyed by normalized enum-entry name.
    pub fn enum_entries(&self) -> &HashMap<String, String> {
        &self.enum_entries
    }

    /// Descriptions keyed by normalized message name.
    pub fn messages(&self) -> &HashMap<String, String> {
        &self.messages
    }

    /// Merges `other` into `self`, with `other`'s entries preferred on key collisions.
    pub(crate) fn merge(mut self, other: Descriptions) -> Self {
        self.enum_groups.extend(other.enum_groups);
        self.enum_entries.extend(other.enum_entries);
        self.messages.extend(other.messages);
        self
    }
}
