//! The XML source loader: turns raw dialect XML text into a named, navigable
//! [`XmlSource`], and resolves the `<include>` graph between a set of sources.
//!
//! This loader never touches a filesystem — it's handed XML text (by a caller that may have
//! read it from disk, a network fetch, or a test fixture) and a name, and it does the one thing
//! that's actually part of compiling a dialect: deriving a stable identity for the source and
//! validating that everything it `<include>`s was actually supplied.

use std::collections::HashSet;

use log::debug;

use crate::errors::CompileError;
use crate::xml::Element;

/// A single parsed `<mavlink>` XML document, identified by name, not yet merged with anything it
/// `<include>`s.
#[derive(Debug, Clone)]
pub struct XmlSource {
    name: String,
    root: Element,
}

impl XmlSource {
    /// Parses `xml_text` into a navigable tree and derives this source's name.
    ///
    /// The name is the root element's `file=` attribute with its extension stripped, if present;
    /// otherwise `caller_name` (with its extension stripped) is used. If neither is available,
    /// returns [`CompileError::MissingFileIdentity`].
    pub fn parse(xml_text: &str, caller_name: Option<&str>) -> Result<Self, CompileError> {
        let root = Element::parse(caller_name.unwrap_or("<source>"), xml_text)?;

        let name = root
            .attr("file")
            .map(strip_extension)
            .or_else(|| caller_name.map(strip_extension))
            .ok_or(CompileError::MissingFileIdentity)?;

        debug!("loaded xml source `{name}`");
        Ok(Self { name, root })
    }

    /// This source's stable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed document root (the `<mavlink>` element).
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The dialects this source directly `<include>`s, in declaration order, as written in the
    /// XML (extension included) — not yet normalized for matching against a source's name.
    pub fn includes(&self) -> Vec<String> {
        self.root.children_named("include").map(|el| el.text.clone()).collect()
    }
}

fn strip_extension(file_name: &str) -> String {
    file_name.rsplit_once('.').map(|(base, _ext)| base).unwrap_or(file_name).to_string()
}

/// Resolves the full `<include>` closure reachable from `root_name`, given every source that was
/// supplied.
///
/// Returns sources in dependency order: an included dialect always appears before the dialect
/// that includes it, so the [merger](crate::merge) can fold them in one at a time. Each name is
/// visited at most once even if included by more than one dialect (a diamond dependency).
pub fn resolve_includes<'a>(
    root_name: &str,
    sources: &'a [XmlSource],
) -> Result<Vec<&'a XmlSource>, CompileError> {
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    visit(root_name, sources, &mut visited, &mut order)?;
    Ok(order)
}

fn visit<'a>(
    name: &str,
    sources: &'a [XmlSource],
    visited: &mut HashSet<String>,
    order: &mut Vec<&'a XmlSource>,
) -> Result<(), CompileError> {
    let key = strip_extension(name);
    if visited.contains(&key) {
        return Ok(());
    }
    visited.insert(key.clone());

    let source = sources
        .iter()
        .find(|s| s.name() == key)
        .ok_or_else(|| CompileError::MissingInclude { file: name.to_string() })?;

    for include in source.includes() {
        visit(&include, sources, visited, order)?;
    }
    order.push(source);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_name_from_file_attribute() {
        let source = XmlSource::parse(r#"<mavlink file="common.xml"><messages/></mavlink>"#, None).unwrap();
        assert_eq!(source.name(), "common");
    }

    #[test]
    fn falls_back_to_caller_name() {
        let source = XmlSource::parse("<mavlink><messages/></mavlink>", Some("custom.xml")).unwrap();
        assert_eq!(source.name(), "custom");
    }

    #[test]
    fn missing_identity_is_an_error() {
        let err = XmlSource::parse("<mavlink><messages/></mavlink>", None);
        assert!(matches!(err, Err(CompileError::MissingFileIdentity)));
    }

    #[test]
    fn resolves_include_order_and_dedupes_diamonds() {
        let common = XmlSource::parse(r#"<mavlink file="common.xml"><messages/></mavlink>"#, None).unwrap();
        let minimal = XmlSource::parse(
            r#"<mavlink file="minimal.xml"><include>common.xml</include><messages/></mavlink>"#,
            None,
        )
        .unwrap();
        let custom = XmlSource::parse(
            r#"<mavlink file="custom.xml"><include>common.xml</include><include>minimal.xml</include><messages/></mavlink>"#,
            None,
        )
        .unwrap();

        let sources = vec![common, minimal, custom];
        let order = resolve_includes("custom", &sources).unwrap();

        let names: Vec<&str> = order.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["common", "minimal", "custom"]);
    }

    #[test]
    fn missing_include_is_an_error() {
        let custom = XmlSource::parse(
            r#"<mavlink file="custom.xml"><include>common.xml</include><messages/></mavlink>"#,
            None,
        )
        .unwrap();
        let sources = vec![custom];
        let err = resolve_includes("custom", &sources);
        assert!(matches!(
            err,
            Err(CompileError::MissingInclude { file }) if file == "common.xml"
        ));
    }
}
