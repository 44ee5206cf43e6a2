use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{XmlElement, XmlError};

/// Serialize a tree to text with an XML declaration.
///
/// `indent` is the number of spaces per nesting level; 0 writes everything
/// on one line.
pub fn to_xml_string(root: &XmlElement, indent: usize) -> Result<String, XmlError> {
    let mut writer = if indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', indent)
    } else {
        Writer::new(Vec::new())
    };

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(XmlError::write)?;
    write_element(&mut writer, root)?;

    let bytes = writer.into_inner();
    String::from_utf8(bytes).map_err(XmlError::write)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), XmlError> {
    let name = element.qualified_name();
    let mut start = BytesStart::new(name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(XmlError::write);
    }

    writer.write_event(Event::Start(start)).map_err(XmlError::write)?;
    if let Some(text) = element.text.as_deref().filter(|t| !t.is_empty()) {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(XmlError::write)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(name.as_str())))
        .map_err(XmlError::write)
}
