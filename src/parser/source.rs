use crate::base::*;
use crate::base::types::*;

/// The complete content of a PDF file, loaded into memory.
///
/// PDF files may carry arbitrary bytes before the `%PDF-` header. Offsets written in the file
/// (`startxref`, cross-reference entries, `/Length` of streams) are relative to the `%` of
/// `%PDF-`, while indices into the loaded data start at its first byte. The difference, the
/// *start offset*, is set once after the header has been found, and all `*_offset` methods apply
/// it.
///
/// A `ByteSource` is never modified after the start offset is set. Reading happens through
/// [`ByteCursor`]s, each of which carries its own position, so several can be used at once.
#[derive(Debug)]
pub struct ByteSource {
    data: Vec<u8>,
    start: Option<usize>,
}

impl ByteSource {
    /// Wraps a complete byte sequence. Fails with [`ErrorKind::EmptyInput`] if there is no data.
    pub fn load(data: Vec<u8>) -> Result<Self, Error> {
        if data.is_empty() {
            return Err(ErrorKind::EmptyInput.into());
        }
        Ok(Self { data, start: None })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The start offset, or 0 if not set yet.
    pub fn start(&self) -> usize {
        self.start.unwrap_or(0)
    }

    /// Records the position of the `%PDF-` header. Meant to be called exactly once, before any
    /// offset-relative reads; later calls are ignored.
    pub fn set_start_offset(&mut self, start: usize) {
        match self.start {
            None => self.start = Some(start),
            Some(old) => log::warn!("Start offset already set to {old}, ignoring {start}."),
        }
    }

    /// Returns the bytes at `start..=end` (both ends inclusive).
    ///
    /// Fails with [`ErrorKind::OutOfRange`] if either index is past the data or `start > end`.
    pub fn read_range(&self, start: usize, end: usize) -> Result<&[u8], Error> {
        let len = self.data.len();
        if start >= len || end >= len || start > end {
            return Err(Error::new(ErrorKind::OutOfRange,
                format!("range {start}..={end} in {len} bytes")));
        }
        Ok(&self.data[start..=end])
    }

    /// Like [`Self::read_range()`], but both indices are relative to the start offset. If `end` is
    /// `None`, reads to the end of the data.
    pub fn read_offset_range(&self, start: Offset, end: Option<Offset>) -> Result<&[u8], Error> {
        let start_pos = self.to_physical(start)?;
        let end_pos = match end {
            Some(end) => self.to_physical(end)?,
            None => self.data.len().saturating_sub(1),
        };
        self.read_range(start_pos, end_pos)
    }

    /// Converts an offset relative to `%PDF` into an index into the data.
    pub fn to_physical(&self, offset: Offset) -> Result<usize, Error> {
        usize::try_from(offset).ok()
            .and_then(|offset| offset.checked_add(self.start()))
            .ok_or_else(|| Error::new(ErrorKind::OutOfRange, format!("offset {offset}")))
    }

    /// Converts an index into the data into an offset relative to `%PDF`.
    pub fn to_offset(&self, pos: usize) -> Offset {
        pos.saturating_sub(self.start()) as Offset
    }

    /// A cursor at the first byte of the data.
    pub fn cursor(&self) -> ByteCursor<'_> {
        ByteCursor { data: &self.data, start: self.start(), pos: 0 }
    }

    /// A cursor positioned at `offset` (relative to `%PDF`).
    pub fn cursor_at(&self, offset: Offset) -> Result<ByteCursor<'_>, Error> {
        let mut cur = self.cursor();
        cur.seek_offset(offset)?;
        Ok(cur)
    }
}


/// A read position within a [`ByteSource`].
///
/// All reads are bounds-checked. The position may equal the data length ("at end"), but never
/// exceed it.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    start: usize,
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// A cursor over a plain byte slice, with start offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, start: 0, pos: 0 }
    }

    /// Current index into the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Current position relative to `%PDF`.
    pub fn offset_position(&self) -> Offset {
        self.pos.saturating_sub(self.start) as Offset
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Moves to an index into the data. Fails with [`ErrorKind::OutOfRange`] if `pos` is past the
    /// end.
    pub fn seek(&mut self, pos: usize) -> Result<(), Error> {
        if pos > self.data.len() {
            return Err(Error::new(ErrorKind::OutOfRange,
                format!("position {pos} in {} bytes", self.data.len())));
        }
        self.pos = pos;
        Ok(())
    }

    /// Returns to a position previously obtained from [`Self::position()`] on this cursor.
    pub fn restore(&mut self, pos: usize) {
        debug_assert!(pos <= self.data.len());
        self.pos = std::cmp::min(pos, self.data.len());
    }

    /// Moves to an offset relative to `%PDF`.
    pub fn seek_offset(&mut self, offset: Offset) -> Result<(), Error> {
        let pos = usize::try_from(offset).ok()
            .and_then(|offset| offset.checked_add(self.start))
            .ok_or_else(|| Error::new(ErrorKind::OutOfRange, format!("offset {offset}")))?;
        self.seek(pos)
    }

    pub fn at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// The data from the current position to the end.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn starts_with(&self, tag: &[u8]) -> bool {
        self.remaining().starts_with(tag)
    }

    /// Reads one byte and advances. Fails with [`ErrorKind::EndOfBuffer`] at end.
    pub fn read_byte(&mut self) -> Result<u8, Error> {
        let c = self.peek()
            .ok_or_else(|| Error::new(ErrorKind::EndOfBuffer, format!("at byte {}", self.pos)))?;
        self.pos += 1;
        Ok(c)
    }

    /// Reads one byte if it satisfies `cond`.
    pub fn next_if(&mut self, cond: impl FnOnce(u8) -> bool) -> Option<u8> {
        let c = self.peek()?;
        if cond(c) {
            self.pos += 1;
            Some(c)
        } else {
            None
        }
    }

    /// Consumes `tag` if the data continues with it.
    pub fn eat(&mut self, tag: &[u8]) -> bool {
        if self.starts_with(tag) {
            self.pos += tag.len();
            true
        } else {
            false
        }
    }

    /// Advances by up to `n` bytes.
    pub fn forward(&mut self, n: usize) {
        self.pos = std::cmp::min(self.pos.saturating_add(n), self.data.len());
    }

    /// Moves back one byte, staying at 0 if already there.
    pub fn step_back(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Advances over spaces, LFs and CRs, stopping on the first other byte or at end.
    pub fn skip_whitespace(&mut self) {
        while self.next_if(|c| matches!(c, b' ' | b'\n' | b'\r')).is_some() { }
    }

    /// Reads bytes up to the next CR or LF, and consumes that end-of-line marker (CR LF counts as
    /// one). Fails with [`ErrorKind::EndOfBuffer`] if the data ends before an end-of-line,
    /// leaving the position unchanged.
    pub fn read_line_excl(&mut self) -> Result<&'a [u8], Error> {
        let rest = self.remaining();
        let Some(len) = rest.iter().position(|c| *c == b'\n' || *c == b'\r') else {
            return Err(Error::new(ErrorKind::EndOfBuffer, format!("no end of line after byte {}", self.pos)));
        };
        let line = &rest[..len];
        self.pos += len;
        self.read_eol();
        Ok(line)
    }

    /// Consumes one end-of-line marker (LF, CR or CR LF), if present.
    pub fn read_eol(&mut self) -> bool {
        match self.peek() {
            Some(b'\n') => { self.pos += 1; true },
            Some(b'\r') => {
                self.pos += 1;
                self.next_if(|c| c == b'\n');
                true
            },
            _ => false
        }
    }
}
