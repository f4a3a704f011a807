//! Reading and writing [`Document`] trees with quick-xml.
//!
//! Whitespace is never trimmed on input nor generated on output: indentation
//! lives in the `text`/`tail` fields and is written back exactly as stored.

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{BufRead, Write};

use crate::{
    document::{Attribute, Comment, Document, Element, Node},
    error::Error,
    traits::Parser,
};

impl Parser for Document {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut prologue = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Eof => break,
                // Anything after the root element is dropped.
                _ if root.is_some() => {}
                Event::Start(ref e) => stack.push(element_from_start(e)?),
                Event::Empty(ref e) => {
                    let element = element_from_start(e)?;
                    close_element(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::invalid_resource("unexpected end tag"))?;
                    close_element(&mut stack, &mut root, element);
                }
                Event::Text(ref e) => append_character_data(&mut stack, decode(e)?),
                Event::CData(ref e) => {
                    let raw = decode(e)?;
                    append_character_data(&mut stack, &format!("<![CDATA[{raw}]]>"));
                }
                Event::Comment(ref e) => {
                    let comment = Comment::new(decode(e)?);
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Comment(comment)),
                        None => prologue.push(comment),
                    }
                }
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }

        let root = root.ok_or_else(|| Error::invalid_resource("document has no root element"))?;
        Ok(Document { prologue, root })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;

        for comment in &self.prologue {
            xml_writer.write_event(Event::Comment(BytesText::from_escaped(comment.text.as_str())))?;
            xml_writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
        }

        write_element(&mut xml_writer, &self.root)?;
        xml_writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
        Ok(())
    }
}

impl Element {
    /// Serializes this element and its content, without its tail.
    pub fn to_xml_string(&self) -> Result<String, Error> {
        let mut out = Vec::new();
        let mut xml_writer = Writer::new(&mut out);
        write_element(&mut xml_writer, self)?;
        Ok(String::from_utf8(out).map_err(|e| e.utf8_error())?)
    }
}

fn decode(raw: &[u8]) -> Result<&str, Error> {
    Ok(std::str::from_utf8(raw)?)
}

fn element_from_start(e: &BytesStart) -> Result<Element, Error> {
    let mut element = Element::new(decode(e.name().as_ref())?);
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::invalid_resource(e.to_string()))?;
        element.attributes.push(Attribute {
            key: decode(attr.key.as_ref())?.to_string(),
            value: decode(&attr.value)?.to_string(),
        });
    }
    Ok(element)
}

fn close_element(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

/// Character data belongs to the open element's text until it has a child,
/// after which it is the tail of that last child.
fn append_character_data(stack: &mut [Element], data: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    match parent.children.last_mut() {
        Some(Node::Element(child)) => child.tail.push_str(data),
        Some(Node::Comment(comment)) => comment.tail.push_str(data),
        None => parent.text.push_str(data),
    }
}

fn write_element<W: Write>(xml_writer: &mut Writer<W>, element: &Element) -> Result<(), Error> {
    let mut start = BytesStart::new(element.name.as_str());
    for attr in &element.attributes {
        start.push_attribute((attr.key.as_bytes(), attr.value.as_bytes()));
    }

    if element.text.is_empty() && element.children.is_empty() {
        xml_writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    xml_writer.write_event(Event::Start(start))?;
    write_character_data(xml_writer, &element.text)?;
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(xml_writer, child)?,
            Node::Comment(comment) => xml_writer
                .write_event(Event::Comment(BytesText::from_escaped(comment.text.as_str())))?,
        }
        write_character_data(xml_writer, child.tail())?;
    }
    xml_writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

fn write_character_data<W: Write>(xml_writer: &mut Writer<W>, data: &str) -> Result<(), Error> {
    if !data.is_empty() {
        xml_writer.write_event(Event::Text(BytesText::from_escaped(data)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ResourceNode;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {r#"
        <?xml version="1.0" encoding="utf-8"?>
        <!-- Copyright header -->
        <resources xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2">
            <!-- Greetings -->
            <string name="hello">Hello &amp; welcome</string>
            <string name="size">Shrunk from <xliff:g id="old">%1$s</xliff:g> to <xliff:g id="new">%2$s</xliff:g></string>
            <string name="empty"/>
            <plurals name="messages">
                <item quantity="one">One message</item>
                <item quantity="other"><xliff:g id="count">%d</xliff:g> messages</item>
            </plurals>
        </resources>
    "#};

    #[test]
    fn test_parse_structure() {
        let document = Document::from_str(SAMPLE).unwrap();
        assert_eq!(document.prologue.len(), 1);
        assert_eq!(document.prologue[0].text, " Copyright header ");
        assert_eq!(document.root.name, "resources");
        assert_eq!(
            document.root.attribute("xmlns:xliff"),
            Some("urn:oasis:names:tc:xliff:document:1.2")
        );
        assert_eq!(document.root.text, "\n    ");

        let kinds: Vec<_> = document.resources().collect();
        assert_eq!(kinds.len(), 5);
        assert!(matches!(kinds[0], ResourceNode::Comment(_)));
        assert!(matches!(kinds[1], ResourceNode::String(_)));
        assert!(matches!(kinds[4], ResourceNode::Plurals(_)));
    }

    #[test]
    fn test_text_and_tail_are_raw() {
        let document = Document::from_str(SAMPLE).unwrap();
        let hello = &document.root.child_elements().next().unwrap();
        assert_eq!(hello.text, "Hello &amp; welcome");
        assert_eq!(hello.tail, "\n    ");

        let size = document.root.child_elements().nth(1).unwrap();
        assert_eq!(size.text, "Shrunk from ");
        let placeholders: Vec<_> = size.child_elements().collect();
        assert_eq!(placeholders.len(), 2);
        assert_eq!(placeholders[0].name, "xliff:g");
        assert_eq!(placeholders[0].text, "%1$s");
        assert_eq!(placeholders[0].tail, " to ");
        assert_eq!(placeholders[1].tail, "");
    }

    #[test]
    fn test_write_reproduces_input() {
        let document = Document::from_str(SAMPLE).unwrap();
        let written = document.to_xml_string().unwrap();
        assert_eq!(written, SAMPLE);
    }

    #[test]
    fn test_cdata_and_escapes_survive() {
        let xml = indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
                <string name="html"><![CDATA[<b>bold</b>]]> and it\'s &lt;fine&gt;</string>
            </resources>
        "#};
        let document = Document::from_str(xml).unwrap();
        let html = document.root.child_elements().next().unwrap();
        assert_eq!(html.text, r"<![CDATA[<b>bold</b>]]> and it\'s &lt;fine&gt;");
        assert_eq!(document.to_xml_string().unwrap(), xml);
    }

    #[test]
    fn test_element_to_xml_string_excludes_tail() {
        let document = Document::from_str(SAMPLE).unwrap();
        let size = document.root.child_elements().nth(1).unwrap();
        assert_eq!(
            size.to_xml_string().unwrap(),
            r#"<string name="size">Shrunk from <xliff:g id="old">%1$s</xliff:g> to <xliff:g id="new">%2$s</xliff:g></string>"#
        );
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let result = Document::from_str("<resources><string name=\"a\">x</resources>");
        assert!(matches!(result, Err(Error::XmlParse(_))));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let result = Document::from_str("<?xml version=\"1.0\"?>\n<!-- nothing -->\n");
        assert!(matches!(result, Err(Error::InvalidResource(_))));
    }
}
