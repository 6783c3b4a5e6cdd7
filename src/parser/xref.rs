use crate::base::*;
use crate::base::types::*;
use crate::utils;

use super::op::ObjParser;
use super::source::ByteCursor;

/// Reads a classic cross-reference table, starting at the `xref` keyword.
///
/// The table is processed line by line. Lines are split on single spaces, with one trailing empty
/// token (from the customary trailing space of 20-byte entries) dropped. A line of two integers
/// opens a subsection, a line of `nnnnnnnnnn ggggg f|n` adds an entry to it. Any other line ends
/// the table. If that line is the `trailer` keyword, the following dictionary is read too.
pub(crate) struct XRefParser<'a> {
    cur: ByteCursor<'a>,
    max_depth: usize,
}

enum Line<'a> {
    Header(ObjNum, u64),
    Entry(u64, ObjGen, EntryType),
    Other(&'a [u8]),
}

impl<'a> XRefParser<'a> {
    pub fn new(cur: ByteCursor<'a>, max_depth: usize) -> Self {
        Self { cur, max_depth }
    }

    pub fn read_table(mut self) -> Result<XRefTable, Error> {
        let offset = self.cur.offset_position();
        if !self.cur.eat(b"xref") {
            let found = &self.cur.remaining()[..std::cmp::min(self.cur.remaining().len(), 8)];
            return Err(Error::new(ErrorKind::XRefSignatureMismatch,
                format!("found '{}' at offset {offset}", String::from_utf8_lossy(found))));
        }
        if !self.cur.read_line_excl()?.iter().all(|c| *c == b' ') {
            return Err(Error::new(ErrorKind::XRefSignatureMismatch, format!("'xref' at offset {offset} not on its own line")));
        }

        let mut table = XRefTable { offset, ..Default::default() };
        let mut open: Option<XRefSubsection> = None;
        loop {
            self.cur.skip_whitespace();
            if self.cur.eat(b"trailer") {
                Self::finalize(&mut table, open.take())?;
                table.trailer = Some(self.read_trailer()?);
                break;
            }
            let pos = self.cur.offset_position();
            let line = self.cur.read_line_excl()?;
            match Self::classify(line, pos)? {
                Line::Header(start, count) => {
                    Self::finalize(&mut table, open.take())?;
                    if start.checked_add(count).is_none() {
                        return Err(Error::new(ErrorKind::MalformedXRefEntry,
                            format!("subsection {start} + {count} exceeds object numbers at offset {pos}")));
                    }
                    let sub = XRefSubsection::new(start, count);
                    table.check_overlap(&sub)?;
                    open = Some(sub);
                },
                Line::Entry(value, gen, tpe) => {
                    let Some(sub) = open.as_mut() else {
                        return Err(Error::new(ErrorKind::EntryBeforeSubsection, format!("at offset {pos}")));
                    };
                    sub.push(value, gen, tpe)?;
                },
                Line::Other(line) => {
                    log::debug!("xref table ended by '{}'", String::from_utf8_lossy(line));
                    Self::finalize(&mut table, open.take())?;
                    break;
                }
            }
        }
        Ok(table)
    }

    fn finalize(table: &mut XRefTable, sub: Option<XRefSubsection>) -> Result<(), Error> {
        match sub {
            Some(sub) => table.push_subsection(sub),
            None => Ok(())
        }
    }

    fn classify(line: &[u8], pos: Offset) -> Result<Line<'_>, Error> {
        let mut tokens = line.split(|c| *c == b' ').collect::<Vec<_>>();
        if tokens.len() > 1 && tokens.last().is_some_and(|tk| tk.is_empty()) {
            tokens.pop();
        }
        match tokens[..] {
            [start, count] => match (utils::parse_digits(start), utils::parse_digits(count)) {
                (Some(start), Some(count)) => Ok(Line::Header(start, count)),
                _ => Ok(Line::Other(line))
            },
            [value, gen, tpe @ (b"f" | b"n")] => {
                let tpe = if tpe == b"n" { EntryType::InUse } else { EntryType::Free };
                let fields = match (value.len(), gen.len()) {
                    (10, 5) => utils::parse_digits::<u64>(value).zip(utils::parse_digits::<ObjGen>(gen)),
                    _ => None
                };
                match fields {
                    Some((value, gen)) => Ok(Line::Entry(value, gen, tpe)),
                    None => Err(Error::new(ErrorKind::MalformedXRefEntry,
                        format!("'{}' at offset {pos}", String::from_utf8_lossy(line))))
                }
            },
            _ => Ok(Line::Other(line))
        }
    }

    fn read_trailer(&mut self) -> Result<Dict, Error> {
        let pos = self.cur.offset_position();
        let mut parser = ObjParser::new(self.cur.clone()).with_max_depth(self.max_depth);
        let obj = parser.read_obj()
            .map_err(|err| Error::new(ErrorKind::MalformedTrailer, format!("at offset {pos}: {err}")))?;
        match obj.value {
            Value::Dict(dict) => Ok(dict),
            val => Err(Error::new(ErrorKind::MalformedTrailer, format!("found {} at offset {pos}", val.type_name())))
        }
    }
}
