use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::normalize::normalize_key;
use crate::protocol::traits::{Buildable, Builder};
use crate::protocol::{Deprecated, EnumEntry};

/// A MAVLink `<enum>`: either a regular enumeration (the value selects one entry) or a bitmask
/// (each entry names one bit).
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumGroup {
    name: String,
    key: String,
    description: Option<String>,
    entries: HashMap<String, EnumEntry>,
    bitmask: bool,
    wip: bool,
    deprecated: Option<Deprecated>,
}

impl Buildable for EnumGroup {
    type Builder = EnumGroupBuilder;

    fn to_builder(&self) -> EnumGroupBuilder {
        EnumGroupBuilder {
            group: self.clone(),
        }
    }
}

impl EnumGroup {
    /// Initiates a builder, starting from default values.
    pub fn builder() -> EnumGroupBuilder {
        EnumGroupBuilder::new()
    }

    /// Enum name, as declared in the XML.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized lookup key, derived from [`EnumGroup::name`].
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Free-text description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Entries keyed by their normalized name.
    pub fn entries(&self) -> &HashMap<String, EnumEntry> {
        &self.entries
    }

    /// Whether this enum is a bitmask (each entry a bit flag) rather than a regular enumeration.
    pub fn bitmask(&self) -> bool {
        self.bitmask
    }

    /// Work-in-progress status.
    pub fn wip(&self) -> bool {
        self.wip
    }

    /// Deprecation status.
    pub fn deprecated(&self) -> Option<&Deprecated> {
        self.deprecated.as_ref()
    }

    /// Looks up the entry whose value matches `value`, if any.
    ///
    /// Used to substitute a decoded scalar with its symbolic name; only ever consulted
    /// for non-bitmask enums, since a bitmask's raw integer is a combination of flags rather
    /// than a single named entry.
    pub fn entry_for_value(&self, value: i64) -> Option<&EnumEntry> {
        self.entries.values().find(|entry| entry.value() == value)
    }
}

/// Builder for [`EnumGroup`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumGroupBuilder {
    group: EnumGroup,
}

impl Builder for EnumGroupBuilder {
    type Buildable = EnumGroup;

    fn build(&self) -> EnumGroup {
        self.group.clone()
    }
}

impl EnumGroupBuilder {
    /// Creates a builder with default (empty) values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enum name, also deriving its normalized [`EnumGroup::key`].
    pub fn set_name(&mut self, name: String) -> &mut Self {
        self.group.key = normalize_key(&name);
        self.group.name = name;
        self
    }

    /// Sets the enum description.
    pub fn set_description(&mut self, description: String) -> &mut Self {
        self.group.description = Some(description);
        self
    }

    /// Sets the enum's entries, keyed by their normalized name.
    pub fn set_entries(&mut self, entries: HashMap<String, EnumEntry>) -> &mut Self {
        self.group.entries = entries;
        self
    }

    /// Sets whether this enum is a bitmask.
    pub fn set_bitmask(&mut self, bitmask: bool) -> &mut Self {
        self.group.bitmask = bitmask;
        self
    }

    /// Marks the enum work-in-progress.
    pub fn set_wip(&mut self, wip: bool) -> &mut Self {
        self.group.wip = wip;
        self
    }

    /// Sets the enum's deprecation status.
    pub fn set_deprecated(&mut self, deprecated: Option<Deprecated>) -> &mut Self {
        self.group.deprecated = deprecated;
        self
    }
}
