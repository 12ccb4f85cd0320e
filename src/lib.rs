//! Redline audit to body file conversion library.
//!
//! This crate reads the file-activity audit exports produced by the
//! Redline incident-response tool (`w32files` / files-api XML documents)
//! and converts them into body file timelines, filtered to a path prefix.
//!
//! # Features
//!
//! - **Core Types**: [`FileItem`] entries and document metadata decoded
//!   from an audit export.
//! - **Streaming Reader**: Memory-efficient parsing of large audit files.
//! - **Body File Output**: Fixed eleven-field pipe-delimited timeline
//!   lines with epoch-second timestamps.
//! - **Serde Support**: Optional serialization with the `serde` feature.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use redline_bodyfile::bodyfile::write_bodyfile;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! // Emit body file lines for everything under /home/user
//! let file = File::open("redline_audit.xml").unwrap();
//! let stdout = std::io::stdout();
//! write_bodyfile(BufReader::new(file), "/home/user", stdout.lock()).unwrap();
//! ```
//!
//! # Streaming API
//!
//! To work with the decoded entries directly, use the streaming reader:
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
//!             println!("{} ({} bytes)", item.full_path, item.size_in_bytes);
//!         }
//!         Ok(_) => {}
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Module Structure
//!
//! - [`objects`] - Core audit data structures and timestamp helpers
//! - [`reader`] - Streaming XML parser
//! - [`bodyfile`] - Body file line formatting and the pipeline driver
//! - [`error`] - Error types
//!
//! # Optional Features
//!
//! - `serde` - Enable serde serialization/deserialization support
//! - `cli` - Build the `redline_to_bodyfile` command-line tool

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bodyfile;
pub mod error;
pub mod objects;
pub mod reader;

// Re-export commonly used types at the crate root
pub use bodyfile::{format_item, write_bodyfile};
pub use error::{Error, Result};
pub use objects::{epoch_seconds, parse_timestamp, AuditInfo, FileItem};
pub use reader::{parse_file_items, AuditReader, Event};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
