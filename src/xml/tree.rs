use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::errors::XmlTreeError;

/// A single element of a navigable XML tree.
///
/// Built once by [`Element::parse`] and never mutated afterwards; every compiler stage reads it
/// through shared references.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Tag name, e.g. `"mavlink"`, `"enum"`, `"field"`.
    pub tag: String,
    /// Attributes in document order.
    pub attrs: Vec<(String, String)>,
    /// Concatenated text content directly inside this element (not inside children).
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Parses a block of XML text into a navigable tree rooted at the document's single root
    /// element.
    pub fn parse(source_name: &str, xml_text: &str) -> Result<Element, XmlTreeError> {
        let mut reader = Reader::from_str(xml_text);
        reader.trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut buf = Vec::new();

        loop {
            let event = reader.read_event_into(&mut buf).map_err(|err| XmlTreeError::Malformed {
                source_name: source_name.to_string(),
                reason: err.to_string(),
            })?;

            match event {
                Event::Eof => break,
                Event::Start(start) => {
                    let tag = decode(&reader, start.name().as_ref());
                    let attrs = read_attrs(&reader, &start);
                    stack.push(Element {
                        tag,
                        attrs,
                        text: String::new(),
                        children: Vec::new(),
                    });
                }
                Event::Empty(start) => {
                    let tag = decode(&reader, start.name().as_ref());
                    let attrs = read_attrs(&reader, &start);
                    let elem = Element {
                        tag,
                        attrs,
                        text: String::new(),
                        children: Vec::new(),
                    };
                    push_finished(&mut stack, &mut root, elem);
                }
                Event::End(_) => {
                    let finished = stack.pop().ok_or_else(|| XmlTreeError::Malformed {
                        source_name: source_name.to_string(),
                        reason: "unexpected closing tag".to_string(),
                    })?;
                    push_finished(&mut stack, &mut root, finished);
                }
                Event::Text(text) => {
                    let decoded = text.unescape().map_err(|err| XmlTreeError::Malformed {
                        source_name: source_name.to_string(),
                        reason: err.to_string(),
                    })?;
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(decoded.trim());
                    }
                }
                Event::CData(cdata) => {
                    let decoded = decode(&reader, cdata.into_inner().as_ref());
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(decoded.trim());
                    }
                }
                _ => {}
            }
            buf.clear();
        }

        root.ok_or_else(|| XmlTreeError::Malformed {
            source_name: source_name.to_string(),
            reason: "document has no root element".to_string(),
        })
    }

    /// First attribute value matching `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All direct children with tag `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == name)
    }

    /// First direct child with tag `name`, if present.
    pub fn child_named<'a>(&'a self, name: &'a str) -> Option<&'a Element> {
        self.children_named(name).next()
    }
}

fn push_finished(stack: &mut [Element], root: &mut Option<Element>, elem: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(elem),
        None => *root = Some(elem),
    }
}

fn read_attrs(reader: &Reader<&[u8]>, start: &quick_xml::events::BytesStart) -> Vec<(String, String)> {
    start
        .attributes()
        .filter_map(|attr| attr.ok())
        .map(|attr| {
            let key = decode(reader, attr.key.as_ref());
            let value = attr
                .decode_and_unescape_value(reader)
                .map(|cow| cow.into_owned())
                .unwrap_or_default();
            (key, value)
        })
        .collect()
}

fn decode(reader: &Reader<&[u8]>, bytes: &[u8]) -> String {
    reader.decoder().decode(bytes).map(|cow| cow.into_owned()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attrs() {
        let xml = r#"<mavlink file="common.xml"><messages><message id="0" name="HEARTBEAT"><field type="uint8_t" name="type">a comment</field></message></messages></mavlink>"#;
        let root = Element::parse("common.xml", xml).unwrap();

        assert_eq!(root.tag, "mavlink");
        assert_eq!(root.attr("file"), Some("common.xml"));

        let messages = root.child_named("messages").unwrap();
        let message = messages.child_named("message").unwrap();
        assert_eq!(message.attr("id"), Some("0"));
        assert_eq!(message.attr("name"), Some("HEARTBEAT"));

        let field = message.child_named("field").unwrap();
        assert_eq!(field.attr("type"), Some("uint8_t"));
        assert_eq!(field.text, "a comment");
    }

    #[test]
    fn repeated_children_are_all_kept() {
        let xml = r#"<enums><enum name="A"><entry name="X"/><entry name="Y"/></enum></enums>"#;
        let root = Element::parse("x.xml", xml).unwrap();
        let enum_el = root.child_named("enum").unwrap();
        assert_eq!(enum_el.children_named("entry").count(), 2);
    }

    #[test]
    fn malformed_xml_is_rejected() {
        let err = Element::parse("bad.xml", "<mavlink><messages></mavlink>");
        assert!(err.is_err());
    }
}
