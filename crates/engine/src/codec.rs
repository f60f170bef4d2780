//! Field encoding and document decoding
//!
//! Translates between the harness's flat field maps and the store's XML
//! documents:
//!
//! ```text
//! <document><id>KEY</id><field0>VALUE</field0>...</document>
//! ```
//!
//! Keys and values are escaped (`& < > " '`). Field names become literal
//! tags and are NOT escaped or validated; callers must pass names that are
//! well-formed XML identifiers or the document will be corrupt.

use cpbench_core::{Element, Error, FieldMap, FieldSet, Result, DOCUMENT_TAG, ID_TAG};
use cpbench_wire::PathFilter;
use quick_xml::escape::escape;

/// Encode a record as a store document.
///
/// Fields are written in the map's iteration order. Non-UTF-8 bytes in a
/// value are replaced with U+FFFD.
pub fn encode_document(key: &str, values: &FieldMap) -> String {
    let mut doc = String::with_capacity(64 + values.len() * 32);
    doc.push('<');
    doc.push_str(DOCUMENT_TAG);
    doc.push_str("><");
    doc.push_str(ID_TAG);
    doc.push('>');
    doc.push_str(&escape(key));
    doc.push_str("</");
    doc.push_str(ID_TAG);
    doc.push('>');
    for (name, value) in values {
        let text = String::from_utf8_lossy(value);
        doc.push('<');
        doc.push_str(name);
        doc.push('>');
        doc.push_str(&escape(&text));
        doc.push_str("</");
        doc.push_str(name);
        doc.push('>');
    }
    doc.push_str("</");
    doc.push_str(DOCUMENT_TAG);
    doc.push('>');
    doc
}

/// Flatten a returned document into a field map.
///
/// `root` is either a bare `document` element or an envelope whose first
/// child is the document; exactly one envelope level is unwrapped. Every
/// leaf below the document except the reserved `id` element is recorded
/// as name -> text. Duplicate names keep the last value seen.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] when an envelope has no child element.
pub fn decode_document(root: &Element) -> Result<FieldMap> {
    let content = if root.name() == DOCUMENT_TAG {
        root
    } else {
        root.first_child().ok_or_else(|| {
            Error::malformed(format!("envelope <{}> has no document", root.name()))
        })?
    };

    let mut fields = FieldMap::new();
    for leaf in content.leaves() {
        if leaf.name() == ID_TAG {
            continue;
        }
        fields.insert(leaf.name().to_string(), leaf.text().as_bytes().to_vec());
    }
    Ok(fields)
}

/// Decode every document of a response, in order.
///
/// Either all documents decode or none of them is returned.
pub fn decode_documents(docs: &[Element]) -> Result<Vec<FieldMap>> {
    docs.iter().map(decode_document).collect()
}

/// Selection list for a lookup or search.
///
/// `None` selects the whole document; otherwise each field becomes a
/// `document/<field>` path. Paths are sorted so requests are deterministic.
pub fn selection_list(fields: Option<&FieldSet>) -> Vec<PathFilter> {
    match fields {
        None => vec![PathFilter::include(DOCUMENT_TAG)],
        Some(fields) => {
            let mut names: Vec<&String> = fields.iter().collect();
            names.sort();
            names
                .into_iter()
                .map(|f| PathFilter::include(format!("{}/{}", DOCUMENT_TAG, f)))
                .collect()
        }
    }
}
