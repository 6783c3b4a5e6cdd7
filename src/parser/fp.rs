use crate::base::*;
use crate::base::types::*;
use crate::config::Config;
use crate::utils;

use super::op::ObjParser;
use super::source::{ByteSource, ByteCursor};
use super::xref::XRefParser;

/// Locates the structural markers of a PDF file and reads objects at given offsets.
///
/// All methods take `&self` and create their own cursors, so a `FileParser` can be shared freely.
pub struct FileParser<'a> {
    src: &'a ByteSource,
    config: Config,
}

impl<'a> FileParser<'a> {
    pub fn new(src: &'a ByteSource) -> Self {
        Self::with_config(src, Config::default())
    }

    pub fn with_config(src: &'a ByteSource, config: Config) -> Self {
        Self { src, config }
    }

    /// Finds the `%PDF-` marker in the leading window of the data, and reads the version and the
    /// binary marker comment after it.
    ///
    /// The caller is responsible for passing `Header::start` to
    /// [`ByteSource::set_start_offset()`].
    pub fn find_header(&self) -> Result<Header, Error> {
        const HEADER: &[u8] = b"%PDF-";
        let data = self.src.as_bytes();
        let window = &data[..std::cmp::min(data.len(), self.config.header_window)];
        let start = utils::find(window, HEADER)
            .ok_or_else(|| Error::new(ErrorKind::HeaderNotFound,
                format!("no %PDF- in first {} bytes", window.len())))?;

        let ver_start = start + HEADER.len();
        let version = data.get(ver_start..ver_start + 3)
            .ok_or_else(|| Error::new(ErrorKind::HeaderNotFound, "version missing"))?;
        let version = String::from_utf8_lossy(version).into_owned();

        let probe_start = ver_start + 3;
        let probe_end = std::cmp::min(data.len(), probe_start + self.config.binary_probe);
        let binary = Self::binary_marker(&data[probe_start..probe_end]);

        Ok(Header { start: start as Offset, version, binary })
    }

    /// Checks for a comment with at least four bytes above 0x7F at the beginning of `probe`,
    /// after any end-of-line and spaces.
    fn binary_marker(probe: &[u8]) -> bool {
        let mut cur = ByteCursor::new(probe);
        cur.skip_whitespace();
        if !cur.eat(b"%") {
            return false;
        }
        let high = cur.remaining().iter()
            .take_while(|c| **c != b'\r' && **c != b'\n')
            .filter(|c| **c >= 0x80)
            .count();
        high >= 4
    }

    /// Requires `%%EOF` within the trailing window of the data.
    pub fn validate_eof(&self) -> Result<(), Error> {
        let tail = self.tail(self.config.eof_window);
        match utils::find(tail, b"%%EOF") {
            Some(_) => Ok(()),
            None => Err(Error::new(ErrorKind::MissingEOFMarker, format!("not within last {} bytes", tail.len())))
        }
    }

    /// Finds the last `startxref` keyword within the trailing window and returns the offset of the
    /// cross-reference table written after it.
    pub fn entrypoint(&self) -> Result<Offset, Error> {
        const SXREF: &[u8] = b"startxref";
        let tail = self.tail(self.config.startxref_window);
        let index = utils::rfind(tail, SXREF)
            .ok_or_else(|| Error::new(ErrorKind::MissingStartXRef, format!("not within last {} bytes", tail.len())))?;
        let mut cur = ByteCursor::new(&tail[(index + SXREF.len())..]);
        if !cur.read_eol() {
            return Err(Error::new(ErrorKind::MissingStartXRef, "startxref not followed by end of line"));
        }
        cur.skip_whitespace();
        let digits = cur.remaining().iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        let digits = &cur.remaining()[..digits];
        utils::parse_digits::<Offset>(digits)
            .ok_or_else(|| Error::new(ErrorKind::MalformedXRefOffset,
                format!("'{}'", String::from_utf8_lossy(digits))))
    }

    fn tail(&self, window: usize) -> &'a [u8] {
        let data = self.src.as_bytes();
        &data[data.len().saturating_sub(window)..]
    }

    /// Reads the classic cross-reference table at `offset` (relative to `%PDF`).
    pub fn read_xref_at(&self, offset: Offset) -> Result<XRefTable, Error> {
        let cur = self.src.cursor_at(offset)
            .map_err(|_| Error::new(ErrorKind::XRefSignatureMismatch,
                format!("offset {offset} beyond end of data")))?;
        XRefParser::new(cur, self.config.max_depth).read_table()
    }

    /// An object parser positioned at `offset` (relative to `%PDF`).
    pub fn parser_at(&self, offset: Offset, resolver: &'a dyn Resolver) -> Result<ObjParser<'a>, Error> {
        Ok(ObjParser::new(self.src.cursor_at(offset)?)
            .with_resolver(resolver)
            .with_max_depth(self.config.max_depth))
    }

    /// Reads a bare object at `offset`.
    pub fn read_obj_at(&self, offset: Offset, resolver: &'a dyn Resolver) -> Result<Object, Error> {
        self.parser_at(offset, resolver)?.read_obj()
    }

    /// Reads an indirect object definition (`num gen obj ... endobj`) at `offset`.
    pub fn read_indirect_at(&self, offset: Offset, resolver: &'a dyn Resolver) -> Result<(ObjRef, Object), Error> {
        self.parser_at(offset, resolver)?.read_indirect()
    }
}
