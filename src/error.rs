//! Error types for the redline-bodyfile library.

use thiserror::Error;

/// Errors that can occur when working with Redline audit data.
#[derive(Error, Debug)]
pub enum Error {
    /// XML parsing error
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// XML attribute parsing error
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// Invalid timestamp format
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    /// Document ended inside a FileItem element
    #[error("Unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Integer parsing error
    #[error("Integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

/// Result type alias for Redline audit operations.
pub type Result<T> = std::result::Result<T, Error>;
