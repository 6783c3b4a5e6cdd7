use super::types::*;

/// Encodes information about the file header.
///
/// Available through [`reader::Document::header()`](crate::reader::Document::header).
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// The byte offset of the `%PDF` header from start of file data. All offsets found in the file
    /// are relative to this position.
    pub start: Offset,
    /// The version token following `%PDF-`, e.g. `"1.7"`.
    pub version: String,
    /// Whether a comment with at least four bytes above 0x7F follows the header line.
    pub binary: bool,
}

impl Header {
    /// Version as (major, minor), if the token has the `d.d` form.
    pub fn version_numbers(&self) -> Option<(u8, u8)> {
        match self.version.as_bytes() {
            &[maj @ b'0'..=b'9', b'.', min @ b'0'..=b'9'] => Some((maj - b'0', min - b'0')),
            _ => None
        }
    }
}
