use std::io::{Read, BufRead, BufReader};
use flate2::bufread::ZlibDecoder;

use crate::base::*;

/// Upper limit on the bytes in one predictor row.
const MAX_ROW_LEN: usize = 1 << 24;

pub fn decode<'a, R: BufRead + 'a>(input: R, params: Option<&Dict>) -> Result<Box<dyn BufRead + 'a>, Error> {
    let param = |key: &[u8], default: usize| params
        .and_then(|dict| dict.lookup(key).num_value())
        .unwrap_or(default);
    match param(b"Predictor", 1) {
        1 => Ok(Box::new(BufReader::new(ZlibDecoder::new(input)))),
        10..=15 => {
            let colors = param(b"Colors", 1);
            let bpc = param(b"BitsPerComponent", 8);
            let cols = param(b"Columns", 1);
            if !matches!(bpc, 1 | 2 | 4 | 8 | 16) {
                return Err(Error::new(ErrorKind::DecodeFailed, format!("/BitsPerComponent {bpc}")));
            }
            let bits_per_pixel = colors.checked_mul(bpc)
                .filter(|bits| *bits > 0)
                .ok_or_else(|| Error::new(ErrorKind::DecodeFailed, format!("/Colors {colors}")))?;
            let row_len = bits_per_pixel.checked_mul(cols)
                .filter(|bits| *bits > 0)
                .map(|bits| bits.div_ceil(8))
                .filter(|len| *len <= MAX_ROW_LEN)
                .ok_or_else(|| Error::new(ErrorKind::DecodeFailed,
                    format!("/Columns {cols} with /Colors {colors} /BitsPerComponent {bpc}")))?;
            Ok(Box::new(PNGDecode::new(ZlibDecoder::new(input), row_len, bits_per_pixel.div_ceil(8))))
        },
        pred => Err(Error::new(ErrorKind::UnsupportedFilter, format!("/FlateDecode with /Predictor {pred}")))
    }
}

/// Reverses the PNG row filters: each row is prefixed by its filter type byte.
struct PNGDecode<R: Read> {
    input: R,
    row_len: usize,
    bpp: usize,
    prev_row: Vec<u8>,
    index: usize
}

impl<R: Read> PNGDecode<R> {
    fn new(input: R, row_len: usize, bpp: usize) -> Self {
        PNGDecode { input, row_len, bpp, prev_row: Vec::new(), index: 0 }
    }

    fn read_row(&mut self) -> std::io::Result<&[u8]> {
        // grows with the data actually present
        let mut enc_row = Vec::new();
        (&mut self.input).take(1 + self.row_len as u64).read_to_end(&mut enc_row)?;
        if enc_row.len() < 1 + self.row_len {
            return Ok(&[]);
        }
        let enc = enc_row[0];
        let in_row = &enc_row[1..];
        let prev_row = std::mem::take(&mut self.prev_row);
        let above = |ix: usize| prev_row.get(ix).copied().unwrap_or(0);
        let bpp = self.bpp;
        let mut new_row: Vec<u8> = Vec::with_capacity(in_row.len());
        for (ix, in_val) in in_row.iter().enumerate() {
            let left = if ix >= bpp { new_row[ix - bpp] } else { 0 };
            let up = above(ix);
            let up_left = if ix >= bpp { above(ix - bpp) } else { 0 };
            let pred = match enc {
                0 => 0,
                1 => left,
                2 => up,
                3 => ((left as u16 + up as u16) / 2) as u8,
                4 => paeth(left, up, up_left),
                _ => return Err(std::io::Error::new(std::io::ErrorKind::InvalidData,
                    format!("PNG filter type {enc}")))
            };
            new_row.push(in_val.wrapping_add(pred));
        }
        self.prev_row = new_row;
        self.index = 0;
        Ok(&self.prev_row)
    }
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

impl<R: Read> BufRead for PNGDecode<R> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        if self.index < self.prev_row.len() {
            Ok(&self.prev_row[self.index..])
        } else {
            self.read_row()
        }
    }

    fn consume(&mut self, amt: usize) {
        self.index += amt;
    }
}

impl<R: Read> Read for PNGDecode<R> {
    fn read(&mut self, out_buf: &mut [u8]) -> std::io::Result<usize> {
        let mut out_index = 0;
        let out_len = out_buf.len();
        while out_index < out_len {
            let in_buf = match self.fill_buf() {
                Ok([]) => return Ok(out_index),
                Ok(buf) => buf,
                Err(err) => match out_index {
                    0 => return Err(err),
                    read => return Ok(read)
                }
            };
            let len = std::cmp::min(in_buf.len(), out_len - out_index);
            out_buf[out_index..(out_index + len)].copy_from_slice(&in_buf[0..len]);
            out_index += len;
            self.consume(len);
        }
        Ok(out_len)
    }
}
