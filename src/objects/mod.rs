//! Audit object types.
//!
//! This module contains the data structures decoded from a Redline
//! file-activity audit export:
//!
//! - [`FileItem`] - A single filesystem entry with its metadata
//! - [`AuditInfo`] - Document-level metadata from the root element
//!
//! Also provides the timestamp helpers shared by the conversion pipeline:
//! - [`parse_timestamp`] - RFC 3339 text to an offset-aware `DateTime`
//! - [`epoch_seconds`] - RFC 3339 text to Unix epoch seconds

mod audit;
mod common;
mod fileitem;

// Re-export common helpers
pub use common::{epoch_seconds, parse_timestamp, FILE_ITEM_TAG};

// Re-export main object types
pub use audit::AuditInfo;
pub use fileitem::FileItem;
