/// The category of a parsing failure. The `Display` text is the human message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("could not load file")]
    LoadFailed,
    #[error("input is empty")]
    EmptyInput,
    #[error("byte range out of bounds")]
    OutOfRange,
    #[error("attempt to read past end of data")]
    EndOfBuffer,
    #[error("invalid PDF format: header not found")]
    HeaderNotFound,
    #[error("can't read file: %%EOF marker missing")]
    MissingEOFMarker,
    #[error("can't read file: startxref missing")]
    MissingStartXRef,
    #[error("can't read file: malformed startxref offset")]
    MalformedXRefOffset,
    #[error("can't read file: xref not found at parsed offset")]
    XRefSignatureMismatch,
    #[error("xref subsection object count does not match")]
    SubsectionCountMismatch,
    #[error("xref subsections have overlapping object numbers")]
    OverlappingXRefRanges,
    #[error("xref entry before subsection header")]
    EntryBeforeSubsection,
    #[error("malformed xref entry")]
    MalformedXRefEntry,
    #[error("malformed trailer")]
    MalformedTrailer,
    #[error("unrecognized start of object")]
    UnrecognizedObjectStart,
    #[error("malformed number")]
    MalformedNumber,
    #[error("invalid escape in name")]
    InvalidNameEscape,
    #[error("invalid character in name")]
    InvalidNameCharacter,
    #[error("malformed hex string")]
    InvalidHexString,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated array, dictionary or stream")]
    UnterminatedComposite,
    #[error("dictionary key is not a name")]
    InvalidDictionaryKey,
    #[error("objects nested too deeply")]
    NestingTooDeep,
    #[error("malformed indirect object")]
    MalformedIndirectObject,
    #[error("object number mismatch")]
    ObjectNumberMismatch,
    #[error("document not processed")]
    NotReady,
    #[error("unsupported filter")]
    UnsupportedFilter,
    #[error("stream data could not be decoded")]
    DecodeFailed,
}

/// A parsing failure: an [`ErrorKind`] and an optional diagnostic detail.
///
/// The kind's message is what a shell displays; the detail (if any) says where and why, e.g.
/// `"File missing %%EOF"` or the byte position of an offending character.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}{}", .detail.as_ref().map(|d| format!(" ({d})")).unwrap_or_default())]
pub struct Error {
    kind: ErrorKind,
    detail: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self { kind, detail: Some(detail.into()) }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The human-readable message, without the diagnostic detail.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Whether this is a violation of buffer bounds rather than a problem with the file format.
    pub fn is_bounds_violation(&self) -> bool {
        matches!(self.kind, ErrorKind::OutOfRange | ErrorKind::EndOfBuffer)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { kind, detail: None }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::new(ErrorKind::LoadFailed, err.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::new(ErrorKind::MissingEOFMarker, "File missing %%EOF");
        assert_eq!(err.to_string(), "can't read file: %%EOF marker missing (File missing %%EOF)");
        assert_eq!(err.message(), "can't read file: %%EOF marker missing");
        assert_eq!(err.detail(), Some("File missing %%EOF"));
        assert_eq!(Error::from(ErrorKind::EmptyInput).to_string(), "input is empty");
    }

    #[test]
    fn test_io() {
        let err = Error::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(err.kind(), ErrorKind::LoadFailed);
        assert!(err.detail().is_some());
        assert!(!err.is_bounds_violation());
        assert!(Error::from(ErrorKind::OutOfRange).is_bounds_violation());
    }
}
