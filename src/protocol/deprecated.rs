//! Deprecation metadata carried on enums, enum entries, and messages.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Marks an entity as deprecated, per the XML `<deprecated since="..." replaced_by="...">` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Deprecated {
    /// Date (or version) the entity was deprecated, as written in the XML.
    pub since: String,
    /// Normalized key of the entity that replaces this one, if any.
    pub replaced_by: Option<String>,
    /// Free-text explanation, if the XML included one.
    pub description: Option<String>,
}
