//! The enum compiler: assigns numeric values to `<entry>` elements and groups them by
//! their enclosing `<enum>`.
//!
//! `last_value` resets to zero at the start of every `<enum>` rather than running as one counter
//! across the whole dialect, so an implicit entry in a second or later enum group still starts
//! from that group's own values.

use std::collections::HashMap;

use log::debug;

use crate::errors::CompileError;
use crate::protocol::traits::Builder;
use crate::protocol::{Deprecated, EnumEntry, EnumGroup};
use crate::xml::Element;

/// Description text partitioned by normalized key: groups, then entries.
type EnumDescriptions = (HashMap<String, String>, HashMap<String, String>);

/// Compiles every `<enum>` under `enums_el` into a normalized-key → [`EnumGroup`] table.
///
/// Returns the enum table plus, when `collect_descriptions` is set, the group and entry
/// description partitions keyed by normalized name.
pub fn compile_enums(
    enums_el: Option<&Element>,
    collect_descriptions: bool,
) -> Result<(HashMap<String, EnumGroup>, EnumDescriptions), CompileError> {
    let mut groups = HashMap::new();
    let mut group_descriptions = HashMap::new();
    let mut entry_descriptions = HashMap::new();

    let Some(enums_el) = enums_el else {
        return Ok((groups, (group_descriptions, entry_descriptions)));
    };

    for enum_el in enums_el.children_named("enum") {
        let name = enum_el.attr("name").ok_or_else(|| CompileError::NullIdentifier {
            context: "enum/name".to_string(),
        })?;

        let mut builder = EnumGroup::builder();
        builder.set_name(name.to_string());
        builder.set_bitmask(enum_el.attr("bitmask") == Some("true"));
        builder.set_wip(enum_el.child_named("wip").is_some());

        if let Some(description) = enum_el.child_named("description") {
            if collect_descriptions {
                group_descriptions.insert(normalize_enum_key(name), description.text.clone());
            }
            builder.set_description(description.text.clone());
        }

        if let Some(deprecated_el) = enum_el.child_named("deprecated") {
            builder.set_deprecated(Some(parse_deprecated(deprecated_el)));
        }

        let mut entries = HashMap::new();
        let mut last_value: i64 = 0;
        for entry_el in enum_el.children_named("entry") {
            let entry_name = entry_el.attr("name").ok_or_else(|| CompileError::NullIdentifier {
                context: "enum/entry/name".to_string(),
            })?;

            let value = match entry_el.attr("value") {
                Some(text) => {
                    let parsed = parse_signed(text).map_err(|_| CompileError::BadEnumValue {
                        entry_name: entry_name.to_string(),
                        text: text.to_string(),
                    })?;
                    last_value = parsed;
                    parsed
                }
                None => {
                    last_value += 1;
                    last_value
                }
            };

            let mut entry_builder = EnumEntry::builder();
            entry_builder.set_name(entry_name.to_string());
            entry_builder.set_value(value);
            entry_builder.set_wip(entry_el.child_named("wip").is_some());

            if let Some(description) = entry_el.child_named("description") {
                if collect_descriptions {
                    entry_descriptions.insert(normalize_enum_key(entry_name), description.text.clone());
                }
                entry_builder.set_description(description.text.clone());
            }
            if let Some(deprecated_el) = entry_el.child_named("deprecated") {
                entry_builder.set_deprecated(Some(parse_deprecated(deprecated_el)));
            }

            let entry = entry_builder.build();
            entries.insert(entry.key().to_string(), entry);
        }

        builder.set_entries(entries);
        let group = builder.build();
        debug!("compiled enum `{}` with {} entries", group.name(), group.entries().len());
        groups.insert(group.key().to_string(), group);
    }

    Ok((groups, (group_descriptions, entry_descriptions)))
}

fn parse_deprecated(el: &Element) -> Deprecated {
    Deprecated {
        since: el.attr("since").unwrap_or_default().to_string(),
        replaced_by: el.attr("replaced_by").map(crate::normalize::normalize_key),
        description: (!el.text.is_empty()).then(|| el.text.clone()),
    }
}

fn normalize_enum_key(name: &str) -> String {
    crate::normalize::normalize_key(name)
}

fn parse_signed(text: &str) -> Result<i64, std::num::ParseIntError> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => text.parse(),
    }
}
