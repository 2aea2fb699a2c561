use std::collections::HashMap;
use std::io::Write as _;

use anyhow::Context as _;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

use crate::document::tree::{Document, Element, Node, NodeId};
use crate::foundation::error::{ExportError, ExportResult};

/// Parse XML text into a [`Document`].
///
/// Everything needed to reproduce the source is kept: attribute order, comments, processing
/// instructions, the XML declaration and whitespace-only text.
pub fn parse(text: &str) -> ExportResult<Document> {
    let mut reader = Reader::from_str(text);
    let mut doc = Document::new();
    let mut open: Vec<NodeId> = Vec::new();
    let mut entities: HashMap<String, String> = HashMap::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            ExportError::parse(format!("at byte {}: {e}", reader.error_position()))
        })?;
        let parent = open.last().copied();
        match event {
            Event::Start(e) => {
                let id = doc.push(Node::Element(read_element(&e, &entities)?));
                doc.attach(parent, id);
                open.push(id);
            }
            Event::Empty(e) => {
                let id = doc.push(Node::Element(read_element(&e, &entities)?));
                doc.attach(parent, id);
            }
            Event::End(e) => {
                if open.pop().is_none() {
                    return Err(ExportError::parse(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
            }
            Event::Text(e) => {
                let id = doc.push(Node::Text(String::from_utf8_lossy(e.as_ref()).into_owned()));
                doc.attach(parent, id);
            }
            Event::GeneralRef(e) => {
                let raw = format!("&{};", String::from_utf8_lossy(e.as_ref()));
                let id = doc.push(Node::Text(raw));
                doc.attach(parent, id);
            }
            Event::CData(e) => {
                let id = doc.push(Node::CData(String::from_utf8_lossy(e.as_ref()).into_owned()));
                doc.attach(parent, id);
            }
            Event::Comment(e) => {
                let id =
                    doc.push(Node::Comment(String::from_utf8_lossy(e.as_ref()).into_owned()));
                doc.attach(parent, id);
            }
            Event::Decl(e) => {
                let id = doc.push(Node::Declaration(
                    String::from_utf8_lossy(e.as_ref()).into_owned(),
                ));
                doc.attach(parent, id);
            }
            Event::PI(e) => {
                let id = doc.push(Node::ProcessingInstruction(
                    String::from_utf8_lossy(e.as_ref()).into_owned(),
                ));
                doc.attach(parent, id);
            }
            Event::DocType(e) => {
                let raw = String::from_utf8_lossy(e.as_ref());
                entities.extend(internal_entities(&raw));
                let id = doc.push(Node::DocType(raw.trim_start().to_owned()));
                doc.attach(parent, id);
            }
            Event::Eof => break,
        }
    }

    if let Some(&unclosed) = open.last() {
        let name = doc
            .element(unclosed)
            .map(|el| el.name.clone())
            .unwrap_or_default();
        return Err(ExportError::parse(format!(
            "unexpected end of input: <{name}> is not closed"
        )));
    }
    if doc.root_element().is_none() {
        return Err(ExportError::parse("document has no root element"));
    }

    Ok(doc)
}

fn read_element(
    start: &BytesStart<'_>,
    entities: &HashMap<String, String>,
) -> ExportResult<Element> {
    let mut el = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ExportError::parse(format!("bad attribute: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape_with(&raw, |name| {
            resolve_predefined_entity(name).or_else(|| entities.get(name).map(String::as_str))
        })
        .map_err(|e| ExportError::parse(format!("bad value for attribute '{key}': {e}")))?;
        el.attrs.insert(key, value.into_owned());
    }
    Ok(el)
}

/// General entities declared in a DOCTYPE internal subset (`<!ENTITY name "value">`).
///
/// Parameter entities and external (`SYSTEM`/`PUBLIC`) entities are skipped.
fn internal_entities(doctype: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut rest = doctype;
    while let Some(at) = rest.find("<!ENTITY") {
        rest = rest[at + "<!ENTITY".len()..].trim_start();
        if rest.starts_with('%') {
            continue;
        }
        let name_end = rest
            .find(|c: char| c.is_whitespace())
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();
        let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            continue;
        };
        let body = &rest[1..];
        let Some(close) = body.find(quote) else {
            break;
        };
        if !name.is_empty() {
            out.push((name.to_owned(), body[..close].to_owned()));
        }
        rest = &body[close + 1..];
    }
    out
}

/// Serialize a [`Document`] back to XML text.
///
/// Elements without children are written self-closing; everything else is reproduced from the
/// stored source form.
pub fn serialize(doc: &Document) -> ExportResult<String> {
    let mut writer = Writer::new(Vec::new());
    for &root in doc.roots() {
        write_node(doc, root, &mut writer)?;
    }
    let bytes = writer.into_inner();
    Ok(String::from_utf8(bytes).context("serialized document is not valid UTF-8")?)
}

fn write_node(doc: &Document, id: NodeId, w: &mut Writer<Vec<u8>>) -> anyhow::Result<()> {
    match doc.node(id) {
        Node::Element(el) => {
            let mut start = BytesStart::new(el.name.as_str());
            for (k, v) in &el.attrs {
                start.push_attribute((k.as_str(), v.as_str()));
            }
            if el.children.is_empty() {
                w.write_event(Event::Empty(start))
                    .with_context(|| format!("write <{}/>", el.name))?;
            } else {
                w.write_event(Event::Start(start))
                    .with_context(|| format!("write <{}>", el.name))?;
                for &child in &el.children {
                    write_node(doc, child, w)?;
                }
                w.write_event(Event::End(BytesEnd::new(el.name.as_str())))
                    .with_context(|| format!("write </{}>", el.name))?;
            }
        }
        Node::Text(raw) => w
            .write_event(Event::Text(BytesText::from_escaped(raw.as_str())))
            .context("write text")?,
        Node::CData(text) => w
            .write_event(Event::CData(BytesCData::new(text.as_str())))
            .context("write cdata")?,
        Node::Comment(raw) => w
            .write_event(Event::Comment(BytesText::from_escaped(raw.as_str())))
            .context("write comment")?,
        Node::Declaration(raw) | Node::ProcessingInstruction(raw) => {
            write!(w.get_mut(), "<?{raw}?>").context("write processing instruction")?
        }
        Node::DocType(raw) => write!(w.get_mut(), "<!DOCTYPE {raw}>").context("write doctype")?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/document/xml.rs"]
mod tests;
