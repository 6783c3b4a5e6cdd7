use super::*;

/// A stream object: its dictionary and the location of its raw (still encoded) data.
///
/// The data itself is not copied out of the file. Use
/// [`Document::stream_data()`](crate::reader::Document::stream_data) or
/// [`Document::decoded_stream_data()`](crate::reader::Document::decoded_stream_data).
#[derive(Debug, PartialEq, Clone)]
pub struct Stream {
    pub dict: Dict,
    /// The data bytes between the EOL after `stream` and the `endstream` keyword (relative to
    /// `%PDF`).
    pub data: Span,
}
