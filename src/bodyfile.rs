//! Body file output for audit entries.
//!
//! This module renders [`FileItem`]s as body file lines, the pipe-delimited
//! timeline format consumed by tools like `mactime`. Each line carries
//! eleven fields: hash, path, inode, permissions, owner, group, size, and
//! the access/modify/change/birth times as Unix epoch seconds.
//!
//! The audit data has no hash or inode for an entry, so those columns hold
//! a literal `0`, and the format's two trailing timestamp slots both carry
//! the change time.
//!
//! # Example
//!
//! ```rust
//! use redline_bodyfile::bodyfile::write_bodyfile;
//! use std::io::Cursor;
//!
//! let xml = r#"<itemList>
//!   <FileItem>
//!     <FullPath>/home/user/doc.txt</FullPath>
//!     <SizeInBytes>100</SizeInBytes>
//!     <Modified>2023-01-01T00:00:00Z</Modified>
//!     <Accessed>2023-01-01T00:00:00Z</Accessed>
//!     <Changed>2023-01-01T00:00:00Z</Changed>
//!     <SecurityID>S-1-1</SecurityID>
//!     <GroupID>G1</GroupID>
//!     <Permissions>rw-</Permissions>
//!   </FileItem>
//! </itemList>"#;
//!
//! let mut out = Vec::new();
//! write_bodyfile(Cursor::new(xml), "/home/user", &mut out).unwrap();
//! assert!(out.starts_with(b"0|/home/user/doc.txt|0|0rw-|"));
//! ```

use crate::error::Result;
use crate::objects::{epoch_seconds, FileItem};
use crate::reader::{AuditReader, Event};
use std::io::{BufRead, Write};

/// Formats one audit entry as a body file line.
///
/// The entry's three timestamps are converted to epoch seconds here; an
/// unparsable timestamp is an error, there is no per-entry fallback.
/// The returned line has no trailing delimiter and no newline.
pub fn format_item(item: &FileItem) -> Result<String> {
    let modified = epoch_seconds(&item.modified)?;
    let accessed = epoch_seconds(&item.accessed)?;
    let changed = epoch_seconds(&item.changed)?;

    let mut line = format!(
        "0|{}|0|0{}|{}|{}|{}|{}|{}|{}|{}|",
        item.full_path,
        item.permissions,
        item.security_id,
        item.group_id,
        item.size_in_bytes,
        accessed,
        modified,
        changed,
        changed,
    );
    if line.ends_with('|') {
        line.pop();
    }
    Ok(line)
}

/// Streams an audit document to body file output.
///
/// Reads audit entries from `input`, keeps the ones whose full path starts
/// with `prefix`, and writes one body file line per kept entry to `out`,
/// in input order. Entries are filtered before their timestamps are
/// converted, so a bad timestamp on a non-matching entry is never seen.
///
/// Decode and conversion failures abort the whole run; lines already
/// written stay written.
pub fn write_bodyfile<R: BufRead, W: Write>(input: R, prefix: &str, mut out: W) -> Result<()> {
    for event in AuditReader::from_reader(input) {
        if let Event::FileItem(item) = event? {
            if !item.matches_prefix(prefix) {
                continue;
            }
            writeln!(out, "{}", format_item(&item)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    fn sample_item() -> FileItem {
        FileItem {
            full_path: "/home/user/doc.txt".to_string(),
            file_name: "doc.txt".to_string(),
            size_in_bytes: 100,
            modified: "2023-01-01T00:00:00Z".to_string(),
            accessed: "2023-01-01T00:00:00Z".to_string(),
            changed: "2023-01-01T00:00:00Z".to_string(),
            username: "user".to_string(),
            security_id: "S-1-1".to_string(),
            group: "staff".to_string(),
            group_id: "G1".to_string(),
            permissions: "rw-".to_string(),
            attributes: "Archive".to_string(),
        }
    }

    #[test]
    fn test_format_item() {
        let line = format_item(&sample_item()).unwrap();
        assert_eq!(
            line,
            "0|/home/user/doc.txt|0|0rw-|S-1-1|G1|100|1672531200|1672531200|1672531200|1672531200"
        );
    }

    #[test]
    fn test_format_item_field_count() {
        let line = format_item(&sample_item()).unwrap();
        assert_eq!(line.split('|').count(), 11);
        assert!(!line.ends_with('|'));
    }

    #[test]
    fn test_empty_permissions_render_as_zero() {
        let mut item = sample_item();
        item.permissions = String::new();
        let line = format_item(&item).unwrap();
        let fields: Vec<&str> = line.split('|').collect();
        assert_eq!(fields[3], "0");
    }

    #[test]
    fn test_offset_timestamps_convert_in_their_zone() {
        let mut item = sample_item();
        item.accessed = "2023-08-29T10:15:00-04:00".to_string();
        let line = format_item(&item).unwrap();
        let fields: Vec<&str> = line.split('|').collect();
        assert_eq!(fields[7], "1693318500");
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let mut item = sample_item();
        item.modified = "yesterday".to_string();
        let err = format_item(&item).unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp(_)));
    }

    const TWO_ITEM_AUDIT: &str = r#"<itemList generator="w32files">
  <FileItem>
    <FullPath>/home/user/doc.txt</FullPath>
    <FileName>doc.txt</FileName>
    <SizeInBytes>100</SizeInBytes>
    <Modified>2023-01-01T00:00:00Z</Modified>
    <Accessed>2023-01-01T00:00:00Z</Accessed>
    <Changed>2023-01-01T00:00:00Z</Changed>
    <SecurityID>S-1-1</SecurityID>
    <GroupID>G1</GroupID>
    <Permissions>rw-</Permissions>
  </FileItem>
  <FileItem>
    <FullPath>/var/log/syslog</FullPath>
    <FileName>syslog</FileName>
    <SizeInBytes>2048</SizeInBytes>
    <Modified>2023-06-15T08:30:00Z</Modified>
    <Accessed>2023-06-15T08:30:00Z</Accessed>
    <Changed>2023-06-15T08:30:00Z</Changed>
    <SecurityID>S-1-2</SecurityID>
    <GroupID>G2</GroupID>
    <Permissions>rw-r--r--</Permissions>
  </FileItem>
</itemList>"#;

    #[test]
    fn test_write_bodyfile_matching_prefix() {
        let mut out = Vec::new();
        write_bodyfile(Cursor::new(TWO_ITEM_AUDIT), "/home/user", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "0|/home/user/doc.txt|0|0rw-|S-1-1|G1|100|1672531200|1672531200|1672531200|1672531200\n"
        );
    }

    #[test]
    fn test_write_bodyfile_no_matches_is_empty() {
        let mut out = Vec::new();
        write_bodyfile(Cursor::new(TWO_ITEM_AUDIT), "/opt", &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_bodyfile_keeps_input_order() {
        let mut out = Vec::new();
        write_bodyfile(Cursor::new(TWO_ITEM_AUDIT), "/", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0|/home/user/doc.txt|"));
        assert!(lines[1].starts_with("0|/var/log/syslog|"));
    }

    #[test]
    fn test_bad_timestamp_on_matched_item_aborts() {
        let xml = r#"<itemList>
  <FileItem>
    <FullPath>/home/user/broken</FullPath>
    <SizeInBytes>1</SizeInBytes>
    <Modified>not-a-time</Modified>
    <Accessed>2023-01-01T00:00:00Z</Accessed>
    <Changed>2023-01-01T00:00:00Z</Changed>
  </FileItem>
  <FileItem>
    <FullPath>/home/user/later</FullPath>
    <SizeInBytes>2</SizeInBytes>
    <Modified>2023-01-01T00:00:00Z</Modified>
    <Accessed>2023-01-01T00:00:00Z</Accessed>
    <Changed>2023-01-01T00:00:00Z</Changed>
  </FileItem>
</itemList>"#;
        let mut out = Vec::new();
        let err = write_bodyfile(Cursor::new(xml), "/home/user", &mut out).unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp(_)));
        // Nothing reached the output, including the later valid entry
        assert!(out.is_empty());
    }

    #[test]
    fn test_bad_timestamp_on_filtered_item_is_never_seen() {
        // Conversion happens after the prefix filter, so a bad timestamp
        // on a non-matching entry does not abort the run.
        let xml = r#"<itemList>
  <FileItem>
    <FullPath>/var/broken</FullPath>
    <SizeInBytes>1</SizeInBytes>
    <Modified>not-a-time</Modified>
    <Accessed>not-a-time</Accessed>
    <Changed>not-a-time</Changed>
  </FileItem>
  <FileItem>
    <FullPath>/home/user/ok</FullPath>
    <SizeInBytes>2</SizeInBytes>
    <Modified>2023-01-01T00:00:00Z</Modified>
    <Accessed>2023-01-01T00:00:00Z</Accessed>
    <Changed>2023-01-01T00:00:00Z</Changed>
  </FileItem>
</itemList>"#;
        let mut out = Vec::new();
        write_bodyfile(Cursor::new(xml), "/home/user", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("0|/home/user/ok|"));
    }

    #[test]
    fn test_write_bodyfile_from_file() {
        use std::fs::File;
        use std::io::{BufReader, Write as _};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.xml");
        File::create(&path)
            .unwrap()
            .write_all(TWO_ITEM_AUDIT.as_bytes())
            .unwrap();

        let input = BufReader::new(File::open(&path).unwrap());
        let mut out = Vec::new();
        write_bodyfile(input, "/var", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("0|/var/log/syslog|0|0rw-r--r--|S-1-2|G2|2048|"));
    }
}
