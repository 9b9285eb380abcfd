//! Durable log document and its entries
//!
//! `ErrorLogDocument` is the on-disk model: one root container holding an
//! ordered, append-only sequence of `ErrorRecord` entries. The in-memory
//! value is transient per append cycle; the file is the source of truth.
//!
//! Parsing uses quick-xml, which performs no DTD or external-entity
//! resolution, so a tampered file can at worst fail to parse.

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::audit::cause::Cause;
use crate::audit::error::{LogError, LogResult};
use crate::audit::xml::XmlRenderer;

/// Root container element name
pub const ROOT_ELEMENT: &str = "errors";
/// Log entry element name
pub const ENTRY_ELEMENT: &str = "error";

/// One durable log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Instant of capture, assigned at append time
    pub timestamp: DateTime<Utc>,
    /// Free-text identifier of the call site that caught the error
    pub source: String,
    /// Fully-qualified kind of the error
    pub kind: String,
    /// Human-readable description, empty when the error carried none
    pub message: String,
    /// Full trace text including chained causes, opaque and verbatim
    pub trace: String,
}

impl ErrorRecord {
    /// Snapshot a cause into a record stamped with the current time.
    pub fn capture(source: &str, cause: &Cause) -> Self {
        Self {
            timestamp: Utc::now(),
            source: source.to_string(),
            kind: cause.kind().to_string(),
            message: cause.message().to_string(),
            trace: cause.render_trace(),
        }
    }

    /// ISO-8601 rendering of the capture instant, as written to the file.
    pub fn timestamp_text(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Ordered, append-only sequence of records behind a single root container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLogDocument {
    records: Vec<ErrorRecord>,
}

impl ErrorLogDocument {
    /// A document with the root container and no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record as the last entry; record order is append order.
    pub fn push(&mut self, record: ErrorRecord) {
        self.records.push(record);
    }

    /// Render the whole document as pretty-printed UTF-8 XML.
    pub fn to_xml(&self) -> String {
        XmlRenderer::new().render(self)
    }

    /// Parse a document from raw file bytes.
    ///
    /// Rejects input with no root element, a root other than `errors`, or
    /// structurally broken entries. Unknown child elements are skipped, as
    /// the document may have been extended by a newer writer.
    pub fn parse(bytes: &[u8]) -> LogResult<Self> {
        // No trim_text: leaf content must keep its bytes verbatim, and the
        // structural whitespace between elements is ignored arm by arm.
        let mut reader = Reader::from_reader(bytes);

        let mut records = Vec::new();
        let mut saw_root = false;

        loop {
            match reader.read_event().map_err(parse_err)? {
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Start(start) | Event::Empty(start) if !saw_root => {
                    if start.name().as_ref() != ROOT_ELEMENT.as_bytes() {
                        return Err(LogError::Parse {
                            message: format!(
                                "unexpected root element <{}>, expected <{}>",
                                String::from_utf8_lossy(start.name().as_ref()),
                                ROOT_ELEMENT
                            ),
                        });
                    }
                    saw_root = true;
                }
                Event::Start(start) if start.name().as_ref() == ENTRY_ELEMENT.as_bytes() => {
                    records.push(Self::parse_entry(&mut reader, &start)?);
                }
                // A self-closed entry is a record with all-empty fields; it
                // must survive the next rewrite rather than vanish.
                Event::Empty(start) if start.name().as_ref() == ENTRY_ELEMENT.as_bytes() => {
                    records.push(ErrorRecord {
                        timestamp: Self::timestamp_attr(&start)?,
                        source: String::new(),
                        kind: String::new(),
                        message: String::new(),
                        trace: String::new(),
                    });
                }
                Event::Start(other) => {
                    // Unknown child of the root: skip the whole subtree.
                    reader.read_to_end(other.name()).map_err(parse_err)?;
                }
                Event::Empty(_) | Event::End(_) => {}
                Event::Text(text) => {
                    if !text.unescape().map_err(parse_err)?.trim().is_empty() && !saw_root {
                        return Err(LogError::Parse {
                            message: "text content before root element".to_string(),
                        });
                    }
                }
                Event::CData(_) => {}
                Event::Eof => {
                    if !saw_root {
                        return Err(LogError::Parse {
                            message: format!("document has no <{}> root element", ROOT_ELEMENT),
                        });
                    }
                    break;
                }
                _ => {}
            }
        }

        Ok(Self { records })
    }

    fn parse_entry(reader: &mut Reader<&[u8]>, start: &BytesStart) -> LogResult<ErrorRecord> {
        let timestamp = Self::timestamp_attr(start)?;
        let mut source = String::new();
        let mut kind = String::new();
        let mut message = String::new();
        let mut trace = String::new();

        loop {
            match reader.read_event().map_err(parse_err)? {
                Event::Start(child) => {
                    let name = child.name().as_ref().to_vec();
                    let text = Self::read_text(reader)?;
                    match name.as_slice() {
                        b"source" => source = text,
                        b"type" => kind = text,
                        b"message" => message = text,
                        b"stacktrace" => trace = text,
                        _ => {}
                    }
                }
                // A self-closed child is an empty value.
                Event::Empty(_) => {}
                Event::End(end) if end.name().as_ref() == ENTRY_ELEMENT.as_bytes() => break,
                Event::End(_) | Event::Text(_) | Event::CData(_) | Event::Comment(_) => {}
                Event::Eof => {
                    return Err(LogError::Parse {
                        message: format!("truncated <{}> entry", ENTRY_ELEMENT),
                    })
                }
                _ => {}
            }
        }

        Ok(ErrorRecord {
            timestamp,
            source,
            kind,
            message,
            trace,
        })
    }

    /// Collect the text and CDATA content of the current element up to its
    /// end tag; adjacent CDATA sections concatenate back into one value.
    fn read_text(reader: &mut Reader<&[u8]>) -> LogResult<String> {
        let mut out = String::new();
        let mut depth = 0usize;

        loop {
            match reader.read_event().map_err(parse_err)? {
                Event::Text(text) => out.push_str(&text.unescape().map_err(parse_err)?),
                Event::CData(cdata) => {
                    let bytes = cdata.into_inner();
                    out.push_str(std::str::from_utf8(&bytes).map_err(parse_err)?);
                }
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => break,
                Event::End(_) => depth -= 1,
                Event::Eof => {
                    return Err(LogError::Parse {
                        message: "truncated element content".to_string(),
                    })
                }
                _ => {}
            }
        }

        Ok(out)
    }

    fn timestamp_attr(start: &BytesStart) -> LogResult<DateTime<Utc>> {
        let attr = start
            .try_get_attribute("timestamp")
            .map_err(parse_err)?
            .ok_or_else(|| LogError::Parse {
                message: format!("<{}> entry missing timestamp attribute", ENTRY_ELEMENT),
            })?;
        let value = attr.unescape_value().map_err(parse_err)?;
        let timestamp = DateTime::parse_from_rfc3339(&value).map_err(parse_err)?;
        Ok(timestamp.with_timezone(&Utc))
    }
}

fn parse_err(err: impl std::fmt::Display) -> LogError {
    LogError::Parse {
        message: err.to_string(),
    }
}
