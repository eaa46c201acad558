#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::normalize::normalize_key;
use crate::protocol::traits::{Buildable, Builder};
use crate::protocol::Deprecated;

/// A single `<entry>` of an `<enum>` group.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumEntry {
    value: i64,
    name: String,
    key: String,
    description: Option<String>,
    wip: bool,
    deprecated: Option<Deprecated>,
}

impl Buildable for EnumEntry {
    type Builder = EnumEntryBuilder;

    /// Creates [`EnumEntryBuilder`] initialised with current values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mavcodec::protocol::EnumEntry;
    /// use mavcodec::protocol::traits::{Buildable, Builder};
    ///
    /// let original = EnumEntry::builder().set_name("ORIGINAL".to_string()).set_value(1).build();
    /// let updated = original.to_builder().set_value(2).build();
    ///
    /// assert_eq!(updated.name(), "ORIGINAL");
    /// assert_eq!(updated.value(), 2);
    /// ```
    fn to_builder(&self) -> EnumEntryBuilder {
        EnumEntryBuilder {
            entry: self.clone(),
        }
    }
}

impl EnumEntry {
    /// Initiates a builder, starting from default values.
    pub fn builder() -> EnumEntryBuilder {
        EnumEntryBuilder::new()
    }

    /// The entry's integer value, as declared or auto-incremented.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Entry name, as declared in the XML.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized lookup key, derived from [`EnumEntry::name`].
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Free-text description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Work-in-progress status.
    pub fn wip(&self) -> bool {
        self.wip
    }

    /// Deprecation status.
    pub fn deprecated(&self) -> Option<&Deprecated> {
        self.deprecated.as_ref()
    }
}

/// Builder for [`EnumEntry`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumEntryBuilder {
    entry: EnumEntry,
}

impl Builder for EnumEntryBuilder {
    type Buildable = EnumEntry;

    fn build(&self) -> EnumEntry {
        self.entry.clone()
    }
}

impl EnumEntryBuilder {
    /// Creates a builder with default (empty) values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entry's integer value.
    ///
    /// See: [`EnumEntry::value`].
    pub fn set_value(&mut self, value: i64) -> &mut Self {
        self.entry.value = value;
        self
    }

    /// Sets the entry name, also deriving its normalized [`EnumEntry::key`].
    pub fn set_name(&mut self, name: String) -> &mut Self {
        self.entry.key = normalize_key(&name);
        self.entry.name = name;
        self
    }

    /// Sets the entry description.
    ///
    /// See: [`EnumEntry::description`].
    pub fn set_description(&mut self, description: String) -> &mut Self {
        self.entry.description = Some(description);
        self
    }

    /// Marks the entry work-in-progress.
    ///
    /// See: [`EnumEntry::wip`].
    pub fn set_wip(&mut self, wip: bool) -> &mut Self {
        self.entry.wip = wip;
        self
    }

    /// Sets the entry's deprecation status.
    ///
    /// See: [`EnumEntry::deprecated`].
    pub fn set_deprecated(&mut self, deprecated: Option<Deprecated>) -> &mut Self {
        self.entry.deprecated = deprecated;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_key_from_name() {
        let entry = EnumEntry::builder()
            .set_name("MAV_SEVERITY_EMERGENCY".to_string())
            .set_value(0)
            .build();
        assert_eq!(entry.key(), "mav-severity-emergency");
        assert_eq!(entry.name(), "MAV_SEVERITY_EMERGENCY");
    }
}
