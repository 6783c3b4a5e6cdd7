use std::io::{BufRead, BufReader, Error, ErrorKind, Read};

use crate::parser::cc::CharClass;
use crate::utils;

pub fn decode<R: BufRead>(input: R) -> BufReader<AsciiHexDecoder<R>> {
    BufReader::new(AsciiHexDecoder::new(input))
}

/// Decodes pairs of hex digits, ignoring whitespace, until `>` or end of input. A final odd digit
/// is completed with 0.
pub struct AsciiHexDecoder<R: BufRead> {
    reader: R,
    done: bool
}

impl<R: BufRead> AsciiHexDecoder<R> {
    fn new(input: R) -> Self {
        AsciiHexDecoder { reader: input, done: false }
    }

    fn next_in(&mut self) -> std::io::Result<Option<u8>> {
        while !self.done {
            let c = match self.reader.fill_buf()? {
                [] => { self.done = true; break; },
                [c, ..] => *c
            };
            self.reader.consume(1);
            match c {
                b'>' => self.done = true,
                c if CharClass::of(c) == CharClass::Space => (),
                c => return Ok(Some(c))
            }
        }
        Ok(None)
    }

    fn next_out(&mut self) -> std::io::Result<Option<u8>> {
        let invalid = |c: u8| Error::new(ErrorKind::InvalidData, format!("invalid hex digit {c:#04x}"));
        let msd = match self.next_in()? {
            Some(c) => utils::hex_value(c).ok_or_else(|| invalid(c))?,
            None => return Ok(None),
        };
        let lsd = match self.next_in()? {
            Some(c) => utils::hex_value(c).ok_or_else(|| invalid(c))?,
            None => 0
        };
        Ok(Some((msd << 4) | lsd))
    }
}

impl<R: BufRead> Read for AsciiHexDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut bytes = 0;
        for b in buf {
            if let Some(c) = self.next_out()? {
                *b = c;
                bytes += 1;
            } else {
                break;
            }
        }
        Ok(bytes)
    }
}
