//! AuditInfo - document-level metadata for an audit export.

/// Metadata taken from the root element of an audit document.
///
/// Redline writes its file-audit results under an `<itemList>` root whose
/// attributes identify the collector that produced the export. Nothing in
/// the conversion pipeline depends on these values; they are surfaced for
/// diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuditInfo {
    /// Name of the collector module (the `generator` attribute)
    pub generator: Option<String>,
    /// Version of the collector module (the `generatorVersion` attribute)
    pub generator_version: Option<String>,
}

impl AuditInfo {
    /// Creates a new empty AuditInfo.
    pub fn new() -> Self {
        Self::default()
    }
}
