//! XML document parsing and rendering
//!
//! Parsing resolves the escaping scheme, so element text in the resulting
//! [`Element`] tree is already unescaped. Rendering escapes text again.

use crate::error::{Result, WireError};
use cpbench_core::Element;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Parse one XML document into an element tree.
///
/// Declarations, comments and processing instructions are skipped. Text
/// outside the root element must be whitespace.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(WireError::MalformedDocument(
                        "multiple root elements".to_string(),
                    ));
                }
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                stack.push(Element::new(name));
            }
            Event::Empty(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                attach(&mut stack, &mut root, Element::new(name))?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                match stack.last_mut() {
                    Some(top) => top.push_text(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(WireError::MalformedDocument(
                            "text outside of root element".to_string(),
                        ))
                    }
                }
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                match stack.last_mut() {
                    Some(top) => top.push_text(&String::from_utf8_lossy(&bytes)),
                    None => {
                        return Err(WireError::MalformedDocument(
                            "CDATA outside of root element".to_string(),
                        ))
                    }
                }
            }
            Event::End(_) => {
                let done = stack.pop().ok_or_else(|| {
                    WireError::MalformedDocument("unbalanced end tag".to_string())
                })?;
                attach(&mut stack, &mut root, done)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(WireError::MalformedDocument(
            "unexpected end of input".to_string(),
        ));
    }
    root.ok_or_else(|| WireError::MalformedDocument("empty document".to_string()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, el: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(el),
        None if root.is_none() => *root = Some(el),
        None => {
            return Err(WireError::MalformedDocument(
                "multiple root elements".to_string(),
            ))
        }
    }
    Ok(())
}

/// Render an element tree back to XML.
///
/// An element's own text is written before its children.
pub fn render(el: &Element) -> String {
    let mut out = String::new();
    render_into(el, &mut out);
    out
}

fn render_into(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.name());
    out.push('>');
    out.push_str(&escape(el.text()));
    for child in el.children() {
        render_into(child, out);
    }
    out.push_str("</");
    out.push_str(el.name());
    out.push('>');
}
