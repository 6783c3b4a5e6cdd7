/// Limits on how far the parser scans and recurses.
///
/// The defaults follow common reader practice: the header must appear within the first 1024
/// bytes, `%%EOF` within the last 20 and `startxref` within the last 1024.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of leading bytes searched for `%PDF-`.
    pub header_window: usize,
    /// Number of trailing bytes searched for `%%EOF`.
    pub eof_window: usize,
    /// Number of trailing bytes searched for `startxref`.
    pub startxref_window: usize,
    /// Number of bytes after the version inspected for the binary marker comment.
    pub binary_probe: usize,
    /// Maximum nesting of arrays and dictionaries.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            header_window: 1024,
            eof_window: 20,
            startxref_window: 1024,
            binary_probe: 50,
            max_depth: 256,
        }
    }
}
