//! Audit streaming reader.
//!
//! This module provides a memory-efficient streaming parser for Redline
//! file-audit exports. It uses `quick-xml` for XML parsing and yields
//! decoded [`FileItem`]s as they are parsed, so large exports never need
//! to reside in memory at once.
//!
//! # Example
//!
//! ```rust,no_run
//! use redline_bodyfile::reader::{AuditReader, Event};
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = File::open("redline_audit.xml").unwrap();
//! let reader = AuditReader::from_reader(BufReader::new(file));
//!
//! for result in reader {
//!     match result {
//!         Ok(Event::FileItem(item)) => {
//!             println!("File: {}", item.full_path);
//!         }
//!         Ok(_) => {}
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # End-of-stream behavior
//!
//! The reader deliberately does not distinguish a clean end of input from
//! a tokenization failure between audit entries: both end the event
//! sequence. A failure *inside* a `<FileItem>` element is different - the
//! entry cannot be decoded, and the reader yields an error. This mirrors
//! the tool this format comes from, where a malformed trailing document
//! truncates output silently but a malformed entry aborts the run.

use crate::error::{Error, Result};
use crate::objects::{AuditInfo, FileItem, FILE_ITEM_TAG};
use quick_xml::events::BytesStart;
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::BufRead;
use std::str;

/// Events emitted by the audit reader.
///
/// The reader emits a start event when the document root is opened and an
/// end event when it closes. FileItems are emitted as complete objects
/// when their closing tag is encountered.
#[derive(Debug)]
pub enum Event {
    /// Start of the audit document (metadata from the root element)
    DocumentStart(AuditInfo),
    /// A complete audit entry
    FileItem(FileItem),
    /// End of the audit document
    DocumentEnd,
}

/// Parser state tracking where in the document we are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    /// Initial state, before the root element
    Initial,
    /// Inside the root element, between entries
    InDocument,
    /// Inside a <FileItem> element
    InFileItem,
    /// Finished parsing
    Done,
}

/// Context for tracking nested element parsing.
#[derive(Debug, Default)]
struct ElementContext {
    /// Current element path (e.g., ["itemList", "FileItem", "FullPath"])
    path: Vec<String>,
    /// Accumulated text content
    text: String,
}

impl ElementContext {
    fn push(&mut self, name: String) {
        self.path.push(name);
        self.text.clear();
    }

    fn pop(&mut self) -> Option<String> {
        self.text.clear();
        self.path.pop()
    }
}

/// Intermediate parsed event data (owned, to avoid borrow conflicts).
enum ParsedEvent {
    Start { name: String, attrs: Vec<(String, String)> },
    End { name: String },
    Empty { name: String, attrs: Vec<(String, String)> },
    Text { text: String },
    Eof,
}

/// A streaming audit parser.
///
/// Reads a Redline file-audit export from any `BufRead` source and yields
/// [`Event`]s as entries are parsed. The source is consumed forward-only;
/// restarting requires reopening it.
pub struct AuditReader<R: BufRead> {
    reader: Reader<R>,
    state: ParserState,
    buf: Vec<u8>,
    context: ElementContext,

    // Entry being built
    item: Option<FileItem>,

    // Pending events to yield
    pending_events: Vec<Event>,
}

impl<R: BufRead> AuditReader<R> {
    /// Creates a new audit reader from a buffered reader.
    pub fn from_reader(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        Self {
            reader: xml_reader,
            state: ParserState::Initial,
            buf: Vec::with_capacity(4096),
            context: ElementContext::default(),
            item: None,
            pending_events: Vec::new(),
        }
    }

    /// Parses the next event from the audit stream.
    fn parse_next(&mut self) -> Result<Option<Event>> {
        // Return any pending events first
        if let Some(event) = self.pending_events.pop() {
            return Ok(Some(event));
        }

        loop {
            let event_data = match self.read_parsed() {
                Ok(ev) => ev,
                Err(e) => {
                    // A broken stream inside an entry means the entry
                    // cannot be decoded. Anywhere else it is conflated
                    // with end of input and the sequence just ends.
                    if self.state == ParserState::InFileItem {
                        return Err(e);
                    }
                    self.state = ParserState::Done;
                    return Ok(None);
                }
            };

            match event_data {
                Some(ParsedEvent::Start { name, attrs }) => {
                    if let Some(ev) = self.handle_start(&name, &attrs) {
                        return Ok(Some(ev));
                    }
                }
                Some(ParsedEvent::End { name }) => {
                    if let Some(ev) = self.handle_end(&name)? {
                        return Ok(Some(ev));
                    }
                }
                Some(ParsedEvent::Empty { name, attrs }) => {
                    // Handle self-closing tags like <Permissions/>
                    if let Some(ev) = self.handle_start(&name, &attrs) {
                        self.pending_events.push(ev);
                    }
                    if let Some(ev) = self.handle_end(&name)? {
                        return Ok(Some(ev));
                    }
                    if let Some(ev) = self.pending_events.pop() {
                        return Ok(Some(ev));
                    }
                }
                Some(ParsedEvent::Text { text }) => {
                    self.context.text.push_str(&text);
                }
                Some(ParsedEvent::Eof) => {
                    if self.state == ParserState::InFileItem {
                        return Err(Error::UnexpectedEof(FILE_ITEM_TAG.to_string()));
                    }
                    self.state = ParserState::Done;
                    return Ok(None);
                }
                None => {}
            }
        }
    }

    /// Reads one raw XML event and extracts it as owned data.
    fn read_parsed(&mut self) -> Result<Option<ParsedEvent>> {
        self.buf.clear();
        let event = self.reader.read_event_into(&mut self.buf)?;
        let parsed = match event {
            XmlEvent::Start(ref e) => {
                let local_name = e.local_name();
                let name = str::from_utf8(local_name.as_ref())?.to_string();
                let attrs = Self::extract_attrs(e)?;
                Some(ParsedEvent::Start { name, attrs })
            }
            XmlEvent::End(ref e) => {
                let local_name = e.local_name();
                let name = str::from_utf8(local_name.as_ref())?.to_string();
                Some(ParsedEvent::End { name })
            }
            XmlEvent::Empty(ref e) => {
                let local_name = e.local_name();
                let name = str::from_utf8(local_name.as_ref())?.to_string();
                let attrs = Self::extract_attrs(e)?;
                Some(ParsedEvent::Empty { name, attrs })
            }
            XmlEvent::Text(ref e) => {
                let text = e.unescape()?.to_string();
                Some(ParsedEvent::Text { text })
            }
            XmlEvent::CData(ref e) => {
                let text = str::from_utf8(e.as_ref())?.to_string();
                Some(ParsedEvent::Text { text })
            }
            XmlEvent::Eof => Some(ParsedEvent::Eof),
            _ => None,
        };
        Ok(parsed)
    }

    /// Extracts attributes from a BytesStart element as owned data.
    fn extract_attrs(e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
        let mut attrs = Vec::new();
        for attr in e.attributes().flatten() {
            let key = str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.to_string();
            attrs.push((key, value));
        }
        Ok(attrs)
    }

    /// Handles a start element event.
    fn handle_start(&mut self, local_name: &str, attrs: &[(String, String)]) -> Option<Event> {
        self.context.push(local_name.to_string());

        match self.state {
            ParserState::Initial => {
                // Whatever the root element is called, its attributes
                // describe the collector that produced the export.
                let mut info = AuditInfo::new();
                for (key, value) in attrs {
                    match key.as_str() {
                        "generator" => info.generator = Some(value.clone()),
                        "generatorVersion" => info.generator_version = Some(value.clone()),
                        _ => {}
                    }
                }
                self.state = ParserState::InDocument;
                Some(Event::DocumentStart(info))
            }
            ParserState::InDocument if local_name == FILE_ITEM_TAG => {
                self.state = ParserState::InFileItem;
                self.item = Some(FileItem::new());
                None
            }
            _ => None,
        }
    }

    /// Handles an end element event.
    fn handle_end(&mut self, local_name: &str) -> Result<Option<Event>> {
        let text = self.context.text.trim().to_string();
        self.context.pop();

        match self.state {
            ParserState::InFileItem => {
                if local_name == FILE_ITEM_TAG {
                    self.state = ParserState::InDocument;
                    if let Some(item) = self.item.take() {
                        return Ok(Some(Event::FileItem(item)));
                    }
                } else if let Some(ref mut item) = self.item {
                    Self::set_field(item, local_name, text)?;
                }
            }
            ParserState::InDocument => {
                if self.context.path.is_empty() {
                    self.state = ParserState::Done;
                    return Ok(Some(Event::DocumentEnd));
                }
            }
            _ => {}
        }

        Ok(None)
    }

    /// Assigns one child element's text to the entry being built.
    ///
    /// Unknown children are ignored. A `<SizeInBytes>` that does not
    /// parse as an integer (including an empty element) is a decode
    /// error for the whole entry.
    fn set_field(item: &mut FileItem, local_name: &str, text: String) -> Result<()> {
        match local_name {
            "FullPath" => item.full_path = text,
            "FileName" => item.file_name = text,
            "SizeInBytes" => item.size_in_bytes = text.parse()?,
            "Modified" => item.modified = text,
            "Accessed" => item.accessed = text,
            "Changed" => item.changed = text,
            "Username" => item.username = text,
            "SecurityID" => item.security_id = text,
            "Group" => item.group = text,
            "GroupID" => item.group_id = text,
            "Permissions" => item.permissions = text,
            "FileAttributes" => item.attributes = text,
            _ => {}
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for AuditReader<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == ParserState::Done {
            return None;
        }

        match self.parse_next() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Convenience function to parse an audit document and collect all entries.
///
/// This loads all FileItems into memory, so it's not suitable for very
/// large exports. For those, use [`AuditReader`] directly.
pub fn parse_file_items<R: BufRead>(reader: R) -> Result<Vec<FileItem>> {
    let mut items = Vec::new();
    for event in AuditReader::from_reader(reader) {
        if let Event::FileItem(item) = event? {
            items.push(item);
        }
    }
    Ok(items)
}
