//! Typed document tree
//!
//! The store speaks XML documents. Responses are parsed into [`Element`]
//! trees so the decoder can enumerate named leaves without depending on a
//! particular parser's traversal API.

use serde::{Deserialize, Serialize};

/// Root tag wrapping every stored document.
pub const DOCUMENT_TAG: &str = "document";

/// Reserved element holding the record key.
pub const ID_TAG: &str = "id";

/// A named element with its own text and ordered child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Create a leaf element holding `text`.
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Element tag name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text directly inside this element (not including descendants).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append to this element's own text.
    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Replace this element's own text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Ordered child elements
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// First child element, if any.
    pub fn first_child(&self) -> Option<&Element> {
        self.children.first()
    }

    /// First direct child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Mutable lookup of the first direct child with the given tag name.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Keep only the children for which `keep` returns true.
    pub fn retain_children<F>(&mut self, keep: F)
    where
        F: FnMut(&Element) -> bool,
    {
        self.children.retain(keep);
    }

    /// Returns true when the element has no child elements.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Concatenated text of this element and all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Every leaf below this element, depth-first in document order.
    ///
    /// The element itself is never yielded, even when it has no children.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Iterator returned by [`Element::leaves`].
pub struct Leaves<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(el) = self.stack.pop() {
            if el.is_leaf() {
                return Some(el);
            }
            self.stack.extend(el.children.iter().rev());
        }
        None
    }
}
