//! FileItem - one filesystem entry in a Redline audit export.
//!
//! This is the core type of the crate, representing a single file as
//! recorded by the file-activity audit. A FileItem is decoded once from
//! its XML element, read once by the filter/convert stage, and discarded.

/// A single `<FileItem>` entry from a Redline file-activity audit.
///
/// Fields mirror the flat child elements of the audit format. Missing
/// children are left at their default values, matching the source tool's
/// decoder. The three timestamps are kept as raw text: they are only
/// parsed for entries that survive the path-prefix filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileItem {
    // === Identification ===
    /// Absolute path of the file (`<FullPath>`)
    pub full_path: String,
    /// Base name of the file (`<FileName>`)
    pub file_name: String,

    // === Size ===
    /// File size in bytes (`<SizeInBytes>`)
    pub size_in_bytes: i64,

    // === Timestamps (raw RFC 3339 text) ===
    /// Last modification time (`<Modified>`)
    pub modified: String,
    /// Last access time (`<Accessed>`)
    pub accessed: String,
    /// Last metadata change time (`<Changed>`)
    pub changed: String,

    // === Ownership ===
    /// Owning user name (`<Username>`)
    pub username: String,
    /// Owner security identifier (`<SecurityID>`)
    pub security_id: String,
    /// Owning group name (`<Group>`)
    pub group: String,
    /// Owning group identifier (`<GroupID>`)
    pub group_id: String,

    // === Mode ===
    /// Permission string, e.g. `rwxr-xr-x` (`<Permissions>`)
    pub permissions: String,
    /// Filesystem attribute flags (`<FileAttributes>`)
    pub attributes: String,
}

impl FileItem {
    /// Creates a new empty FileItem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a FileItem with the given full path.
    pub fn with_full_path(full_path: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
            ..Default::default()
        }
    }

    /// Tests whether this entry's full path starts with `prefix`.
    ///
    /// The comparison is a literal, case-sensitive prefix match with no
    /// normalization of separators or trailing slashes.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.full_path.starts_with(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_prefix() {
        let item = FileItem::with_full_path("/home/user/doc.txt");
        assert!(item.matches_prefix("/home/user"));
        assert!(item.matches_prefix("/home/user/doc.txt"));
        assert!(!item.matches_prefix("/var"));
    }

    #[test]
    fn test_matches_prefix_is_case_sensitive() {
        let item = FileItem::with_full_path("C:\\Windows\\notepad.exe");
        assert!(item.matches_prefix("C:\\Windows"));
        assert!(!item.matches_prefix("c:\\windows"));
    }

    #[test]
    fn test_matches_prefix_no_separator_normalization() {
        // A prefix with a trailing slash only matches if the path has one
        let item = FileItem::with_full_path("/home/user/doc.txt");
        assert!(item.matches_prefix("/home/user/"));
        let bare = FileItem::with_full_path("/home/user");
        assert!(!bare.matches_prefix("/home/user/"));
    }

    #[test]
    fn test_new_is_empty() {
        let item = FileItem::new();
        assert_eq!(item.full_path, "");
        assert_eq!(item.size_in_bytes, 0);
        assert_eq!(item.permissions, "");
    }
}
