//! The dialect merger: folds compiled dialects into one namespace, failing closed on any
//! overlap between their enum, message-id, or message-name keys.

use std::collections::HashMap;

use log::debug;

use crate::errors::{CompileError, MergeConflictKind};
use crate::protocol::traits::{Buildable, Builder};
use crate::protocol::{Dialect, MergedDialect};

/// Folds `dialects` (in order) into a single [`MergedDialect`] rooted at `root_name`.
///
/// Each dialect's enum and message keys must be disjoint from everything already accumulated;
/// the first conflict encountered aborts the whole merge.
pub fn merge_dialects(root_name: &str, dialects: Vec<Dialect>) -> Result<MergedDialect, CompileError> {
    let mut enums = HashMap::new();
    let mut enum_values: HashMap<String, i64> = HashMap::new();
    let mut messages = HashMap::new();
    let mut descriptions: Option<crate::protocol::Descriptions> = None;

    for dialect in dialects {
        let dialect_entries: HashMap<String, i64> = dialect
            .enums()
            .values()
            .flat_map(|group| group.entries().values())
            .map(|entry| (entry.key().to_string(), entry.value()))
            .collect();

        let enum_conflicts: Vec<String> = dialect_entries
            .keys()
            .filter(|key| enum_values.contains_key(*key))
            .cloned()
            .collect();
        if !enum_conflicts.is_empty() {
            return Err(CompileError::MergeConflict {
                kind: MergeConflictKind::Enum,
                items: enum_conflicts,
                source_name: dialect.name().to_string(),
            });
        }

        let id_conflicts: Vec<String> = dialect
            .messages()
            .keys()
            .filter(|id| messages.contains_key(*id))
            .map(|id| id.to_string())
            .collect();
        if !id_conflicts.is_empty() {
            return Err(CompileError::MergeConflict {
                kind: MergeConflictKind::MessageId,
                items: id_conflicts,
                source_name: dialect.name().to_string(),
            });
        }

        let existing_names: Vec<&str> = messages.values().map(|m: &crate::protocol::Message| m.key()).collect();
        let name_conflicts: Vec<String> = dialect
            .messages()
            .values()
            .filter(|m| existing_names.contains(&m.key()))
            .map(|m| m.key().to_string())
            .collect();
        if !name_conflicts.is_empty() {
            return Err(CompileError::MergeConflict {
                kind: MergeConflictKind::MessageName,
                items: name_conflicts,
                source_name: dialect.name().to_string(),
            });
        }

        debug!(
            "merging dialect `{}` ({} enums, {} messages)",
            dialect.name(),
            dialect.enums().len(),
            dialect.messages().len()
        );

        for (group_key, group) in dialect.enums().clone() {
            match enums.entry(group_key) {
                std::collections::hash_map::Entry::Vacant(slot) => {
                    slot.insert(group);
                }
                std::collections::hash_map::Entry::Occupied(mut slot) => {
                    let mut merged_entries = slot.get().entries().clone();
                    merged_entries.extend(group.entries().clone());
                    let merged_group = group.to_builder().set_entries(merged_entries).build();
                    slot.insert(merged_group);
                }
            }
        }
        enum_values.extend(dialect_entries);
        messages.extend(dialect.messages().clone());
        descriptions = match (descriptions, dialect.descriptions().cloned()) {
            (Some(acc), Some(new)) => Some(acc.merge(new)),
            (Some(acc), None) => Some(acc),
            (None, Some(new)) => Some(new),
            (None, None) => None,
        };
    }

    Ok(MergedDialect::new(root_name.to_string(), enums, enum_values, messages, descriptions))
}
