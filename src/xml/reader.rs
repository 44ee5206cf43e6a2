use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{XmlElement, XmlError};

/// Parse a complete document into its root element.
///
/// Comments, processing instructions and the XML declaration are dropped.
/// Character content is trimmed; CDATA sections are kept verbatim.
pub fn parse_document(text: &str) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                ensure_single_root(&root, &stack)?;
                stack.push(element_from_start(e, reader.decoder())?);
            }
            Event::Empty(ref e) => {
                ensure_single_root(&root, &stack)?;
                let element = element_from_start(e, reader.decoder())?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::End(ref e) => {
                let qname = e.name();
                let name = std::str::from_utf8(qname.as_ref())?.to_string();
                let element = stack.pop().ok_or_else(|| {
                    XmlError::InvalidStructure(format!("unexpected end tag </{}>", name))
                })?;
                if element.qualified_name() != name {
                    return Err(XmlError::InvalidStructure(format!(
                        "end tag </{}> does not match <{}>",
                        name,
                        element.qualified_name()
                    )));
                }
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Text(e) => {
                let content = e.unescape()?;
                append_text(&mut stack, &content)?;
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                let content = std::str::from_utf8(&bytes)?;
                append_text(&mut stack, content)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::InvalidStructure(format!(
            "unclosed element <{}>",
            open.qualified_name()
        )));
    }
    root.ok_or_else(|| XmlError::InvalidStructure("document has no root element".to_string()))
}

fn ensure_single_root(root: &Option<XmlElement>, stack: &[XmlElement]) -> Result<(), XmlError> {
    if root.is_some() && stack.is_empty() {
        return Err(XmlError::InvalidStructure(
            "document has more than one root element".to_string(),
        ));
    }
    Ok(())
}

fn element_from_start(e: &BytesStart, decoder: Decoder) -> Result<XmlElement, XmlError> {
    let qname = e.name();
    let mut element = XmlElement::from_qualified(std::str::from_utf8(qname.as_ref())?);
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn append_text(stack: &mut [XmlElement], content: &str) -> Result<(), XmlError> {
    if content.is_empty() {
        return Ok(());
    }
    let current = stack.last_mut().ok_or_else(|| {
        XmlError::InvalidStructure("character content outside the root element".to_string())
    })?;
    match current.text.as_mut() {
        Some(text) => text.push_str(content),
        None => current.text = Some(content.to_string()),
    }
    Ok(())
}
