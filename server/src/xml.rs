//! Minimal sequential XML writer.
//!
//! The partner's parser is order-sensitive, so documents are written as a
//! flat sequence of open/leaf/close calls that reproduce the schema's fixed
//! element order. Text content is entity-escaped at this boundary.

use std::borrow::Cow;

/// Append-only XML document writer.
#[derive(Debug, Default)]
pub struct XmlWriter {
    buf: String,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an opening tag.
    pub fn open(&mut self, tag: &str) {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    /// Write a closing tag.
    pub fn close(&mut self, tag: &str) {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    /// Write a leaf element with escaped text content.
    pub fn leaf(&mut self, tag: &str, text: &str) {
        self.open(tag);
        self.buf.push_str(&escape_text(text));
        self.close(tag);
    }

    /// Consume the writer, returning the document.
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Escape `&`, `<` and `>` in text content.
///
/// Free-text order fields (names, addresses) come straight from the shopper,
/// so ampersands in particular are common.
fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
