//! Serializes an [`XmlElement`] tree to text with quick-xml.

use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::tree::{XmlElement, XmlNode};
use super::utils::is_xml_name;
use crate::error::{FormatError, Result};

/// Indentation used for pretty output.
const INDENT_SIZE: usize = 2;

/// Writes `root` as a complete document: XML declaration, the element tree
/// and a trailing newline.
///
/// With `pretty`, elements are indented by two spaces. Text content is never
/// altered, so both forms decode to the same document.
///
/// Fails with [`FormatError::Serialization`] when an element or attribute
/// name is not a valid XML name; nothing is returned in that case.
pub fn write_document(root: &XmlElement, pretty: bool) -> Result<Vec<u8>> {
    let mut writer = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE)
    } else {
        Writer::new(Vec::new())
    };

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
        .map_err(write_error)?;

    // The indenting writer breaks the line before the root by itself.
    if !pretty {
        writer.get_mut().push(b'\n');
    }

    write_element(&mut writer, root)?;

    let mut output = writer.into_inner();
    output.push(b'\n');
    Ok(output)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<()> {
    check_name(element.name(), "element")?;

    let mut start = BytesStart::new(element.name());
    for (name, value) in element.attributes() {
        check_name(name, "attribute")?;
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(write_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;

    for node in element.children() {
        match node {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => {
                // Quotes are escaped too, not only markup characters.
                let text = BytesText::from_escaped(escape(text.as_str()));
                writer.write_event(Event::Text(text)).map_err(write_error)?;
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name())))
        .map_err(write_error)?;

    Ok(())
}

fn check_name(name: &str, kind: &str) -> Result<()> {
    if is_xml_name(name) {
        Ok(())
    } else {
        Err(FormatError::Serialization(format!(
            "invalid XML {} name '{}'",
            kind, name
        )))
    }
}

fn write_error(err: impl std::fmt::Display) -> FormatError {
    FormatError::Serialization(format!("XML write error: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> XmlElement {
        let mut root = XmlElement::new("resource");
        root.add_attribute("href", "/a");
        root.add_child("link").add_attribute("rel", "next");
        root.add_text_child("title", "Tom & \"Jerry\" <3");
        root
    }

    #[test]
    fn test_compact_output() {
        let xml = String::from_utf8(write_document(&sample(), false).unwrap()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\"?>\n<resource href=\"/a\">"));
        assert!(xml.contains("<link rel=\"next\"/>"));
        assert!(xml.contains("<title>Tom &amp; &quot;Jerry&quot; &lt;3</title>"));
        assert!(xml.ends_with("</resource>\n"));
        assert_eq!(xml.lines().count(), 2);
    }

    #[test]
    fn test_pretty_output_indents_elements() {
        let xml = String::from_utf8(write_document(&sample(), true).unwrap()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\"?>\n<resource href=\"/a\">\n"));
        assert!(xml.contains("\n  <link rel=\"next\"/>"));
        assert!(xml.contains("\n  <title>Tom &amp; &quot;Jerry&quot; &lt;3</title>"));
        assert!(xml.ends_with("\n</resource>\n"));
    }

    #[test]
    fn test_empty_root_is_self_closing() {
        let xml = write_document(&XmlElement::new("resource"), false).unwrap();
        assert_eq!(xml, b"<?xml version=\"1.0\"?>\n<resource/>\n");
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let mut root = XmlElement::new("resource");
        root.add_attribute("title", "a<b & \"c\"");
        let xml = String::from_utf8(write_document(&root, false).unwrap()).unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        assert_eq!(doc.root_element().attribute("title"), Some("a<b & \"c\""));
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        let mut root = XmlElement::new("resource");
        root.add_text_child("first name", "x");
        let err = write_document(&root, false).unwrap_err();
        assert!(matches!(&err, FormatError::Serialization(msg) if msg.contains("'first name'")));

        let mut root = XmlElement::new("resource");
        root.add_child("ok").add_attribute("1st", "x");
        let err = write_document(&root, true).unwrap_err();
        assert!(matches!(&err, FormatError::Serialization(msg) if msg.contains("attribute")));
    }
}
