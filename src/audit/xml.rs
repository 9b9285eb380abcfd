//! XML rendering for the log document
//!
//! Deterministic pretty printer: stable 2-space indentation, UTF-8, one
//! layout for a given document. The stacktrace is emitted as CDATA so the
//! trace text survives verbatim.

use crate::audit::document::{ErrorLogDocument, ErrorRecord, ENTRY_ELEMENT, ROOT_ELEMENT};

/// XML renderer for `ErrorLogDocument`
pub(crate) struct XmlRenderer {
    indent_size: usize,
}

impl XmlRenderer {
    pub(crate) fn new() -> Self {
        Self { indent_size: 2 }
    }

    /// Escape XML special characters
    fn escape_xml(text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '<' => "&lt;".to_string(),
                '>' => "&gt;".to_string(),
                '&' => "&amp;".to_string(),
                '"' => "&quot;".to_string(),
                '\'' => "&apos;".to_string(),
                _ => c.to_string(),
            })
            .collect()
    }

    /// Wrap trace text in a CDATA block.
    ///
    /// An embedded `]]>` would terminate the block early, so it is split
    /// across two CDATA sections; parsers concatenate adjacent sections back
    /// into the original text.
    fn cdata(text: &str) -> String {
        format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
    }

    fn text_element(&self, name: &str, value: &str, indent_level: usize) -> String {
        let indent = " ".repeat(indent_level * self.indent_size);
        if value.is_empty() {
            format!("{}<{} />", indent, name)
        } else {
            format!("{}<{}>{}</{}>", indent, name, Self::escape_xml(value), name)
        }
    }

    fn entry_to_xml(&self, record: &ErrorRecord, indent_level: usize) -> String {
        let indent = " ".repeat(indent_level * self.indent_size);
        let mut xml = format!(
            "{}<{} timestamp=\"{}\">\n",
            indent,
            ENTRY_ELEMENT,
            Self::escape_xml(&record.timestamp_text())
        );

        xml.push_str(&self.text_element("source", &record.source, indent_level + 1));
        xml.push('\n');
        xml.push_str(&self.text_element("type", &record.kind, indent_level + 1));
        xml.push('\n');
        xml.push_str(&self.text_element("message", &record.message, indent_level + 1));
        xml.push('\n');

        let trace_indent = " ".repeat((indent_level + 1) * self.indent_size);
        xml.push_str(&format!(
            "{}<stacktrace>{}</stacktrace>\n",
            trace_indent,
            Self::cdata(&record.trace)
        ));

        xml.push_str(&format!("{}</{}>\n", indent, ENTRY_ELEMENT));
        xml
    }

    /// Render the whole document, entries in order.
    pub(crate) fn render(&self, document: &ErrorLogDocument) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

        if document.is_empty() {
            xml.push_str(&format!("<{} />\n", ROOT_ELEMENT));
            return xml;
        }

        xml.push_str(&format!("<{}>\n", ROOT_ELEMENT));
        for record in document.records() {
            xml.push_str(&self.entry_to_xml(record, 1));
        }
        xml.push_str(&format!("</{}>\n", ROOT_ELEMENT));
        xml
    }
}
