use crate::base::*;
use crate::base::types::*;
use crate::utils;

use super::cc::CharClass;
use super::source::ByteCursor;

const DEFAULT_MAX_DEPTH: usize = 256;

/// Reads PDF objects from a [`ByteCursor`].
///
/// Each call to [`ObjParser::read_obj()`] skips whitespace and comments, then parses exactly one
/// object (recursively for arrays and dictionaries) and leaves the cursor right after it. The
/// returned [`Object`] carries the half-open byte range it was parsed from.
///
/// Indirect `/Length` entries of stream dictionaries are resolved through the [`Resolver`] given
/// by [`ObjParser::with_resolver()`]. Without one, or if resolution fails, the stream data is
/// delimited by scanning for `endstream`.
pub struct ObjParser<'a> {
    cur: ByteCursor<'a>,
    resolver: &'a dyn Resolver,
    max_depth: usize,
}

impl<'a> ObjParser<'a> {
    pub fn new(cur: ByteCursor<'a>) -> Self {
        Self { cur, resolver: &(), max_depth: DEFAULT_MAX_DEPTH }
    }

    pub fn with_resolver(self, resolver: &'a dyn Resolver) -> Self {
        Self { resolver, ..self }
    }

    /// Limits the nesting of arrays and dictionaries. Deeper input fails with
    /// [`ErrorKind::NestingTooDeep`].
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    pub fn cursor(&self) -> &ByteCursor<'a> {
        &self.cur
    }

    pub fn into_cursor(self) -> ByteCursor<'a> {
        self.cur
    }

    /// Reads the next object.
    pub fn read_obj(&mut self) -> Result<Object, Error> {
        self.skip_ws_comments();
        self.read_obj_depth(0)
    }

    /// Reads an indirect object definition, `num gen obj <object> endobj`.
    pub fn read_indirect(&mut self) -> Result<(ObjRef, Object), Error> {
        let malformed = |what: &str, pos: Offset|
            Error::new(ErrorKind::MalformedIndirectObject, format!("{what} at offset {pos}"));
        self.skip_ws_comments();
        let num = utils::parse_digits::<ObjNum>(self.read_token())
            .ok_or_else(|| malformed("expected object number", self.cur.offset_position()))?;
        self.skip_ws_comments();
        let gen = utils::parse_digits::<ObjGen>(self.read_token())
            .ok_or_else(|| malformed("expected generation number", self.cur.offset_position()))?;
        self.skip_ws_comments();
        if self.read_token() != b"obj" {
            return Err(malformed("expected 'obj'", self.cur.offset_position()));
        }
        let obj = self.read_obj()?;
        self.skip_ws_comments();
        if self.read_token() != b"endobj" {
            return Err(malformed("expected 'endobj'", self.cur.offset_position()));
        }
        Ok((ObjRef { num, gen }, obj))
    }

    /// Advances over whitespace (all six PDF whitespace characters) and comments.
    pub fn skip_ws_comments(&mut self) {
        while let Some(c) = self.cur.peek() {
            match CharClass::of(c) {
                CharClass::Space => self.cur.forward(1),
                _ if c == b'%' => {
                    while self.cur.next_if(|c| c != b'\n' && c != b'\r').is_some() { }
                },
                _ => break
            }
        }
    }

    /// Reads a maximal run of regular characters. May be empty.
    fn read_token(&mut self) -> &'a [u8] {
        let rest = self.cur.remaining();
        let len = rest.iter()
            .position(|c| CharClass::of(*c) != CharClass::Reg)
            .unwrap_or(rest.len());
        self.cur.forward(len);
        &rest[..len]
    }

    fn read_obj_depth(&mut self, depth: usize) -> Result<Object, Error> {
        let start = self.cur.offset_position();
        let value = match self.cur.peek() {
            None => return Err(Error::new(ErrorKind::EndOfBuffer, format!("expected object at offset {start}"))),
            Some(b'(') => {
                self.cur.forward(1);
                Value::String(self.read_lit_string(start)?)
            },
            Some(b'<') if self.cur.starts_with(b"<<") => {
                self.enter(depth, start)?;
                self.cur.forward(2);
                let dict = self.read_dict(depth + 1, start)?;
                match self.read_stream(&dict)? {
                    Some(data) => Value::Stream(Stream { dict, data }),
                    None => Value::Dict(dict)
                }
            },
            Some(b'<') => {
                self.cur.forward(1);
                Value::HexString(self.read_hex_string(start)?)
            },
            Some(b'/') => {
                self.cur.forward(1);
                Value::Name(self.read_name()?)
            },
            Some(b'[') => {
                self.enter(depth, start)?;
                self.cur.forward(1);
                Value::Array(self.read_array(depth + 1, start)?)
            },
            Some(b'0'..=b'9' | b'+' | b'-' | b'.') => self.read_number_or_indirect()?,
            Some(_) => match self.read_token() {
                b"true" => Value::Bool(true),
                b"false" => Value::Bool(false),
                b"null" => Value::Null,
                tk => {
                    let shown = if tk.is_empty() { &self.cur.remaining()[..1] } else { tk };
                    return Err(Error::new(ErrorKind::UnrecognizedObjectStart,
                        format!("'{}' at offset {start}", String::from_utf8_lossy(shown))));
                }
            }
        };
        Ok(Object::new(value, Span::new(start, self.cur.offset_position())))
    }

    fn enter(&self, depth: usize, start: Offset) -> Result<(), Error> {
        if depth >= self.max_depth {
            Err(Error::new(ErrorKind::NestingTooDeep, format!("more than {} levels at offset {start}", self.max_depth)))
        } else {
            Ok(())
        }
    }

    fn read_number_or_indirect(&mut self) -> Result<Value, Error> {
        let pos = self.cur.position();
        let tk = self.read_token();
        let num = parse_number(tk).ok_or_else(|| Error::new(ErrorKind::MalformedNumber,
            format!("'{}' at byte {pos}", String::from_utf8_lossy(tk))))?;
        if let Number::Int(int) = num {
            if int > 0 && tk.iter().all(u8::is_ascii_digit) {
                if let Some(gen) = self.try_ref_tail() {
                    return Ok(Value::Ref(ObjRef { num: int as ObjNum, gen }));
                }
            }
        }
        Ok(Value::Number(num))
    }

    /// After an object number, tries to read `gen R`. On failure, the position is restored.
    fn try_ref_tail(&mut self) -> Option<ObjGen> {
        let save = self.cur.position();
        self.skip_ws_comments();
        let gen = utils::parse_digits::<ObjGen>(self.read_token());
        self.skip_ws_comments();
        match (gen, self.read_token()) {
            (Some(gen), b"R") => Some(gen),
            _ => {
                self.cur.restore(save);
                None
            }
        }
    }

    fn read_lit_string(&mut self, start: Offset) -> Result<Vec<u8>, Error> {
        let unterminated = || Error::new(ErrorKind::UnterminatedString, format!("string at offset {start}"));
        let mut ret = Vec::new();
        let mut parens = 0usize;
        loop {
            match self.cur.read_byte().map_err(|_| unterminated())? {
                b'\\' => {
                    let c = match self.cur.read_byte().map_err(|_| unterminated())? {
                        b'n' => b'\x0a',
                        b'r' => b'\x0d',
                        b't' => b'\x09',
                        b'b' => b'\x08',
                        b'f' => b'\x0c',
                        b'\r' => {
                            self.cur.next_if(|c| c == b'\n');
                            continue;
                        },
                        b'\n' => continue,
                        c @ b'0'..=b'7' => {
                            let mut val = (c - b'0') as u32;
                            for _ in 0..2 {
                                match self.cur.next_if(|c| (b'0'..=b'7').contains(&c)) {
                                    Some(d) => val = (val << 3) + (d - b'0') as u32,
                                    None => break
                                }
                            }
                            // high-order overflow is ignored
                            val as u8
                        },
                        c => c
                    };
                    ret.push(c);
                },
                b'\r' => {
                    self.cur.next_if(|c| c == b'\n');
                    ret.push(b'\n');
                },
                b'(' => {
                    parens += 1;
                    ret.push(b'(');
                },
                b')' => {
                    if parens == 0 { break; }
                    parens -= 1;
                    ret.push(b')');
                },
                c => ret.push(c)
            }
        }
        Ok(ret)
    }

    fn read_hex_string(&mut self, start: Offset) -> Result<Vec<u8>, Error> {
        let mut msd = None;
        let mut ret = Vec::new();
        loop {
            let pos = self.cur.position();
            let c = self.cur.read_byte()
                .map_err(|_| Error::new(ErrorKind::UnterminatedString, format!("hex string at offset {start}")))?;
            if c == b'>' {
                break;
            }
            if CharClass::of(c) == CharClass::Space {
                continue;
            }
            let dig = utils::hex_value(c).ok_or_else(|| Error::new(ErrorKind::InvalidHexString,
                format!("byte {c:#04x} at byte {pos}")))?;
            match msd {
                None => msd = Some(dig),
                Some(d) => { ret.push((d << 4) | dig); msd = None; }
            }
        }
        if let Some(d) = msd { ret.push(d << 4); }
        Ok(ret)
    }

    fn read_name(&mut self) -> Result<Name, Error> {
        let mut ret = Vec::new();
        while let Some(c) = self.cur.peek() {
            let pos = self.cur.position();
            match CharClass::of(c) {
                CharClass::Space | CharClass::Delim => break,
                CharClass::Reg if !(0x21..=0x7E).contains(&c) =>
                    return Err(Error::new(ErrorKind::InvalidNameCharacter, format!("byte {c:#04x} at byte {pos}"))),
                CharClass::Reg if c == b'#' => {
                    let rest = self.cur.remaining();
                    let byte = match (rest.get(1).copied().and_then(utils::hex_value), rest.get(2).copied().and_then(utils::hex_value)) {
                        (Some(d1), Some(d2)) if (d1, d2) != (0, 0) => (d1 << 4) | d2,
                        _ => return Err(Error::new(ErrorKind::InvalidNameEscape, format!("at byte {pos}")))
                    };
                    ret.push(byte);
                    self.cur.forward(3);
                },
                CharClass::Reg => {
                    ret.push(c);
                    self.cur.forward(1);
                }
            }
        }
        Ok(Name(ret))
    }

    fn read_array(&mut self, depth: usize, start: Offset) -> Result<Vec<Object>, Error> {
        let mut vec = Vec::new();
        loop {
            self.skip_ws_comments();
            match self.cur.peek() {
                None => return Err(Error::new(ErrorKind::UnterminatedComposite, format!("array at offset {start}"))),
                Some(b']') => {
                    self.cur.forward(1);
                    break;
                },
                Some(_) => vec.push(self.read_obj_depth(depth)?)
            }
        }
        Ok(vec)
    }

    fn read_dict(&mut self, depth: usize, start: Offset) -> Result<Dict, Error> {
        let unterminated = || Error::new(ErrorKind::UnterminatedComposite, format!("dictionary at offset {start}"));
        let mut dict = Vec::new();
        loop {
            self.skip_ws_comments();
            let key = match self.cur.peek() {
                None => return Err(unterminated()),
                Some(b'>') if self.cur.eat(b">>") => break,
                Some(b'/') => {
                    self.cur.forward(1);
                    self.read_name()?
                },
                Some(_) => {
                    let pos = self.cur.offset_position();
                    let found = self.read_obj_depth(depth).map(|obj| obj.value.type_name()).unwrap_or("garbage");
                    return Err(Error::new(ErrorKind::InvalidDictionaryKey, format!("{found} at offset {pos}")));
                }
            };
            self.skip_ws_comments();
            if self.cur.at_end() {
                return Err(unterminated());
            }
            let value = self.read_obj_depth(depth)?;
            dict.push((key, value));
        }
        Ok(Dict(dict))
    }

    /// If the `stream` keyword follows, reads the stream data extent and moves past `endstream`.
    /// Otherwise leaves the position unchanged and returns `None`.
    fn read_stream(&mut self, dict: &Dict) -> Result<Option<Span>, Error> {
        let save = self.cur.position();
        self.skip_ws_comments();
        if !(self.read_token() == b"stream" && self.cur.read_eol()) {
            self.cur.restore(save);
            return Ok(None);
        }
        let data_pos = self.cur.position();
        let data_start = self.cur.offset_position();

        if let Some(len) = self.stream_length(dict) {
            let end = usize::try_from(len).ok().and_then(|len| data_pos.checked_add(len));
            if let Some(end) = end {
                if self.cur.seek(end).is_ok() {
                    let data_end = self.cur.offset_position();
                    self.cur.skip_whitespace();
                    if self.cur.eat(b"endstream") {
                        return Ok(Some(Span::new(data_start, data_end)));
                    }
                }
            }
            log::warn!("Stream at offset {data_start}: /Length {len} does not lead to endstream, scanning.");
            self.cur.seek(data_pos)?;
        } else {
            log::warn!("Stream at offset {data_start}: /Length missing or invalid, scanning for endstream.");
        }

        let data = self.cur.remaining();
        let Some(len) = utils::find(data, b"endstream") else {
            return Err(Error::new(ErrorKind::UnterminatedComposite, format!("stream at offset {data_start}")));
        };
        let trimmed = match &data[..len] {
            [.., b'\r', b'\n'] => len - 2,
            [.., b'\n' | b'\r'] => len - 1,
            _ => len
        };
        self.cur.forward(len + b"endstream".len());
        Ok(Some(Span::new(data_start, data_start + trimmed as Offset)))
    }

    fn stream_length(&self, dict: &Dict) -> Option<u64> {
        let obj = dict.lookup(b"Length");
        match &obj.value {
            Value::Ref(objref) => match self.resolver.resolve_ref(objref) {
                Ok(obj) => obj.num_value(),
                Err(err) => {
                    log::warn!("Could not resolve /Length {objref} R: {err}");
                    None
                }
            },
            _ => obj.num_value()
        }
    }
}

/// Parses a numeric token: an optional sign, then digits with at most one `.`.
fn parse_number(tk: &[u8]) -> Option<Number> {
    let body = match tk {
        [b'+' | b'-', rest @ ..] => rest,
        _ => tk
    };
    let dots = body.iter().filter(|c| **c == b'.').count();
    let digits = body.iter().filter(|c| c.is_ascii_digit()).count();
    if digits == 0 || dots + digits != body.len() {
        return None;
    }
    match dots {
        0 => utils::parse_num(tk).map(Number::Int),
        1 => utils::parse_num(tk).map(Number::Real),
        _ => None
    }
}

impl<'a> From<&'a str> for ObjParser<'a> {
    fn from(input: &'a str) -> Self {
        ObjParser::new(ByteCursor::new(input.as_bytes()))
    }
}

impl<'a> From<&'a [u8]> for ObjParser<'a> {
    fn from(input: &'a [u8]) -> Self {
        ObjParser::new(ByteCursor::new(input))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn int(x: i64) -> Value { Value::Number(Number::Int(x)) }
    fn real(x: f64) -> Value { Value::Number(Number::Real(x)) }
    fn string(s: &str) -> Value { Value::String(s.as_bytes().to_vec()) }
    fn name(s: &str) -> Value { Value::Name(Name::from(s.as_bytes())) }

    fn next(parser: &mut ObjParser) -> Value {
        parser.read_obj().unwrap().value
    }

    fn err(input: &str) -> ErrorKind {
        ObjParser::from(input).read_obj().unwrap_err().kind()
    }

    fn strip(obj: &Object) -> Value {
        match &obj.value {
            Value::Array(arr) => Value::Array(arr.iter().map(|o| Object::new(strip(o), Span::default())).collect()),
            Value::Dict(dict) => Value::Dict(Dict(dict.iter()
                .map(|(k, v)| (k.clone(), Object::new(strip(v), Span::default())))
                .collect())),
            val => val.clone()
        }
    }

    fn items(values: Vec<Value>) -> Vec<Object> {
        values.into_iter().map(|v| Object::new(v, Span::default())).collect()
    }

    #[test]
    fn test_read_obj() {
        let mut parser = ObjParser::from("true false null 123 +17 -98 0 00987 34.5 -3.62 +123.6 4. -.002 0.0 009.87");
        assert_eq!(next(&mut parser), Value::Bool(true));
        assert_eq!(next(&mut parser), Value::Bool(false));
        assert_eq!(next(&mut parser), Value::Null);
        assert_eq!(next(&mut parser), int(123));
        assert_eq!(next(&mut parser), int(17));
        assert_eq!(next(&mut parser), int(-98));
        assert_eq!(next(&mut parser), int(0));
        assert_eq!(next(&mut parser), int(987));
        assert_eq!(next(&mut parser), real(34.5));
        assert_eq!(next(&mut parser), real(-3.62));
        assert_eq!(next(&mut parser), real(123.6));
        assert_eq!(next(&mut parser), real(4.));
        assert_eq!(next(&mut parser), real(-0.002));
        assert_eq!(next(&mut parser), real(0.));
        assert_eq!(next(&mut parser), real(9.87));
        assert_eq!(parser.read_obj().unwrap_err().kind(), ErrorKind::EndOfBuffer);

        let mut parser = ObjParser::from("9223372036854775807 9223372036854775808");
        assert_eq!(next(&mut parser), int(9223372036854775807));
        assert_eq!(parser.read_obj().unwrap_err().kind(), ErrorKind::MalformedNumber);

        for input in ["++1", "1..0", ".1.", "1_", "1a", "16#FFFE", ".", "6.023E23", "-"] {
            assert_eq!(err(input), ErrorKind::MalformedNumber, "{input}");
        }
        assert_eq!(err("truex"), ErrorKind::UnrecognizedObjectStart);
        assert_eq!(err(")"), ErrorKind::UnrecognizedObjectStart);
        assert_eq!(err("{"), ErrorKind::UnrecognizedObjectStart);
        assert_eq!(err(" % only a comment"), ErrorKind::EndOfBuffer);
    }

    #[test]
    fn test_spans() {
        let mut parser = ObjParser::from("  (abc) % c\n/Name<</A [1 2]>>3 0 R");
        assert_eq!(parser.read_obj().unwrap().span, Span::new(2, 7));
        assert_eq!(parser.read_obj().unwrap().span, Span::new(12, 17));
        let dict = parser.read_obj().unwrap();
        assert_eq!(dict.span, Span::new(17, 29));
        assert_eq!(dict.as_dict().unwrap().lookup(b"A").span, Span::new(22, 27));
        assert_eq!(parser.read_obj().unwrap().span, Span::new(29, 34));
    }

    #[test]
    fn test_read_lit_string() {
        let mut parser = ObjParser::from("(string) (new
line) (parens() (*!&}^%etc).) () ((0))");
        assert_eq!(next(&mut parser), string("string"));
        assert_eq!(next(&mut parser), string("new\nline"));
        assert_eq!(next(&mut parser), string("parens() (*!&}^%etc)."));
        assert_eq!(next(&mut parser), string(""));
        assert_eq!(next(&mut parser), string("(0)"));
        assert_eq!(err("(()"), ErrorKind::UnterminatedString);
        assert_eq!(err("(abc\\"), ErrorKind::UnterminatedString);

        let mut parser = ObjParser::from("(These \\
two strings \\
are the same.) (These two strings are the same.)");
        assert_eq!(next(&mut parser), next(&mut parser));

        let mut parser = ObjParser::from("(1
) (2\\n) (3\\r) (4\\r\\n)");
        assert_eq!(next(&mut parser), string("1\n"));
        assert_eq!(next(&mut parser), string("2\n"));
        assert_eq!(next(&mut parser), string("3\r"));
        assert_eq!(next(&mut parser), string("4\r\n"));

        let mut parser = ObjParser::from("(1
) (2\n) (3\r) (4\r\n) (5\\\r\n)");
        assert_eq!(next(&mut parser), string("1\n"));
        assert_eq!(next(&mut parser), string("2\n"));
        assert_eq!(next(&mut parser), string("3\n"));
        assert_eq!(next(&mut parser), string("4\n"));
        assert_eq!(next(&mut parser), string("5"));

        let mut parser = ObjParser::from("(\\157cta\\154) (\\500) (\\0053\\053\\53) (\\53x) (\\q\\(\\)\\\\)");
        assert_eq!(next(&mut parser), string("octal"));
        assert_eq!(next(&mut parser), string("@"));
        assert_eq!(next(&mut parser), string("\x053++"));
        assert_eq!(next(&mut parser), string("+x"));
        assert_eq!(next(&mut parser), string("q()\\"));
    }

    #[test]
    fn test_read_hex_string() {
        let mut parser = ObjParser::from("<4E6F762073686D6F7A206B6120706F702E> <901FA3> <901fa> <61\r\n6 2> <>");
        assert_eq!(next(&mut parser), Value::HexString(b"Nov shmoz ka pop.".to_vec()));
        assert_eq!(next(&mut parser), Value::HexString(vec![0x90, 0x1F, 0xA3]));
        assert_eq!(next(&mut parser), Value::HexString(vec![0x90, 0x1F, 0xA0]));
        assert_eq!(next(&mut parser), Value::HexString(b"ab".to_vec()));
        assert_eq!(next(&mut parser), Value::HexString(Vec::new()));
        assert_eq!(err("<61%comment\n>"), ErrorKind::InvalidHexString);
        assert_eq!(err("<6G>"), ErrorKind::InvalidHexString);
        assert_eq!(err("<616"), ErrorKind::UnterminatedString);
    }

    #[test]
    fn test_read_name() {
        let mut parser = ObjParser::from("/Name1 /A;Name_With-Various***Characters? /1.2 /$$ /@pattern
            /.notdef /Lime#20Green /paired#28#29parentheses /The_Key_of_F#23_Minor /A#42C");
        assert_eq!(next(&mut parser), name("Name1"));
        assert_eq!(next(&mut parser), name("A;Name_With-Various***Characters?"));
        assert_eq!(next(&mut parser), name("1.2"));
        assert_eq!(next(&mut parser), name("$$"));
        assert_eq!(next(&mut parser), name("@pattern"));
        assert_eq!(next(&mut parser), name(".notdef"));
        assert_eq!(next(&mut parser), name("Lime Green"));
        assert_eq!(next(&mut parser), name("paired()parentheses"));
        assert_eq!(next(&mut parser), name("The_Key_of_F#_Minor"));
        assert_eq!(next(&mut parser), name("ABC"));

        let mut parser = ObjParser::from("//%\n1 /ok/next");
        assert_eq!(next(&mut parser), name(""));
        assert_eq!(next(&mut parser), name(""));
        assert_eq!(next(&mut parser), int(1));
        assert_eq!(next(&mut parser), name("ok"));
        assert_eq!(next(&mut parser), name("next"));

        assert_eq!(err("/invalid#00byte"), ErrorKind::InvalidNameEscape);
        assert_eq!(err("/#0x"), ErrorKind::InvalidNameEscape);
        assert_eq!(err("/#0"), ErrorKind::InvalidNameEscape);
        assert_eq!(err("/A#G1"), ErrorKind::InvalidNameEscape);
        assert_eq!(err("/A\x7F"), ErrorKind::InvalidNameCharacter);
        assert_eq!(err("/caf\u{e9}"), ErrorKind::InvalidNameCharacter);
    }

    #[test]
    fn test_read_array() {
        let mut parser = ObjParser::from("[549 3.14 false (Ralph) /SomeName] [ %\n ] [[1][]]");
        assert_eq!(strip(&parser.read_obj().unwrap()), Value::Array(items(vec![
            int(549),
            #[allow(clippy::approx_constant)]
            real(3.14),
            Value::Bool(false),
            string("Ralph"),
            name("SomeName")
        ])));
        assert_eq!(next(&mut parser), Value::Array(Vec::new()));
        assert_eq!(strip(&parser.read_obj().unwrap()), Value::Array(items(vec![
            Value::Array(items(vec![int(1)])),
            Value::Array(Vec::new())
        ])));
        assert_eq!(err("[false%]"), ErrorKind::UnterminatedComposite);
        assert_eq!(err("[1 2"), ErrorKind::UnterminatedComposite);
        assert_eq!(err("[1 (2]"), ErrorKind::UnterminatedString);
    }

    #[test]
    fn test_read_dict() {
        let mut parser = ObjParser::from("<</Type /Example
    /Subtype /DictionaryExample
    /Version 0.01
    /IntegerItem 12
    /StringItem (a string)
    /Subdictionary <<
        /Item1 0.4
        /Item2 true
        /LastItem (not !)
        /VeryLastItem (OK)
        >>
    >>");
        assert_eq!(strip(&parser.read_obj().unwrap()), Value::Dict(Dict(vec![
            (Name::from(b"Type"), Object::new(name("Example"), Span::default())),
            (Name::from(b"Subtype"), Object::new(name("DictionaryExample"), Span::default())),
            (Name::from(b"Version"), Object::new(real(0.01), Span::default())),
            (Name::from(b"IntegerItem"), Object::new(int(12), Span::default())),
            (Name::from(b"StringItem"), Object::new(string("a string"), Span::default())),
            (Name::from(b"Subdictionary"), Object::new(Value::Dict(Dict(vec![
                (Name::from(b"Item1"), Object::new(real(0.4), Span::default())),
                (Name::from(b"Item2"), Object::new(Value::Bool(true), Span::default())),
                (Name::from(b"LastItem"), Object::new(string("not !"), Span::default())),
                (Name::from(b"VeryLastItem"), Object::new(string("OK"), Span::default()))
            ])), Span::default()))
        ])));

        assert_eq!(next(&mut ObjParser::from("<<>>")), Value::Dict(Dict::default()));
        assert_eq!(err("<</A 1 2 3>>"), ErrorKind::InvalidDictionaryKey);
        assert_eq!(err("<</A 1 /B"), ErrorKind::UnterminatedComposite);
        assert_eq!(err("<</A 1"), ErrorKind::UnterminatedComposite);
        assert_eq!(err("<</A>>"), ErrorKind::UnrecognizedObjectStart);
    }

    #[test]
    fn test_read_indirect_ref() {
        let mut parser = ObjParser::from("<</Length 8 0 R>>");
        let obj = parser.read_obj().unwrap();
        assert_eq!(obj.as_dict().unwrap().lookup(b"Length").value, Value::Ref(ObjRef { num: 8, gen: 0 }));

        let mut parser = ObjParser::from("1 2 3 R 4 R");
        assert_eq!(next(&mut parser), int(1));
        assert_eq!(next(&mut parser), Value::Ref(ObjRef { num: 2, gen: 3 }));
        assert_eq!(next(&mut parser), int(4));
        assert_eq!(parser.read_obj().unwrap_err().kind(), ErrorKind::UnrecognizedObjectStart);

        let mut parser = ObjParser::from("0 0 R");
        assert_eq!(next(&mut parser), int(0));
        assert_eq!(next(&mut parser), int(0));

        let mut parser = ObjParser::from("1 +1 R");
        assert_eq!(next(&mut parser), int(1));
        assert_eq!(next(&mut parser), int(1));

        let mut parser = ObjParser::from("1 65536 R");
        assert_eq!(next(&mut parser), int(1));
        assert_eq!(next(&mut parser), int(65536));

        let mut parser = ObjParser::from("[1 0 R 2 0 /Rx]");
        let arr = parser.read_obj().unwrap();
        assert_eq!(arr.as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_nesting() {
        let deep = "[".repeat(300);
        assert_eq!(err(&deep), ErrorKind::NestingTooDeep);
        let mut parser = ObjParser::from("[[[1]]]").with_max_depth(2);
        assert_eq!(parser.read_obj().unwrap_err().kind(), ErrorKind::NestingTooDeep);
        let mut parser = ObjParser::from("[[1]] <</A<</B 1>>>>").with_max_depth(2);
        assert!(parser.read_obj().is_ok());
        assert!(parser.read_obj().is_ok());
    }

    #[test]
    fn test_read_stream() {
        let input = "<</Length 5>>stream\nHello\nendstream";
        let obj = ObjParser::from(input).read_obj().unwrap();
        let stm = obj.as_stream().unwrap();
        assert_eq!(stm.data, Span::new(20, 25));
        assert_eq!(obj.span, Span::new(0, input.len() as Offset));

        // wrong length, recovered by scanning
        let obj = ObjParser::from("<</Length 3>> stream\r\nHello\r\nendstream").read_obj().unwrap();
        assert_eq!(obj.as_stream().unwrap().data, Span::new(22, 27));

        // no length
        let obj = ObjParser::from("<<>>\nstream\nHello endstream").read_obj().unwrap();
        assert_eq!(obj.as_stream().unwrap().data, Span::new(12, 18));

        let obj = ObjParser::from("<</Length 5>> streamline").read_obj().unwrap();
        assert!(obj.as_stream().is_none());
        assert_eq!(obj.span, Span::new(0, 13));

        assert_eq!(err("<</Length 5>>stream\nHello"), ErrorKind::UnterminatedComposite);
    }

    struct FixedLength(i64);

    impl Resolver for FixedLength {
        fn resolve_ref(&self, _: &ObjRef) -> Result<Object, Error> {
            Ok(Object::new(Value::Number(Number::Int(self.0)), Span::default()))
        }
    }

    #[test]
    fn test_stream_indirect_length() {
        let input = "<</Length 2 0 R>>stream\nendstream\nendstream";
        let resolver = FixedLength(10);
        let obj = ObjParser::from(input).with_resolver(&resolver).read_obj().unwrap();
        assert_eq!(obj.as_stream().unwrap().data, Span::new(24, 34));
        assert_eq!(obj.span.end, input.len() as Offset);

        // without a resolver, the first endstream wins
        let obj = ObjParser::from(input).read_obj().unwrap();
        assert_eq!(obj.as_stream().unwrap().data, Span::new(24, 24));
    }

    #[test]
    fn test_read_indirect() {
        let mut parser = ObjParser::from("12 0 obj\n<</Type/Catalog>>\nendobj\n3 1 obj 5 endobj");
        let (objref, obj) = parser.read_indirect().unwrap();
        assert_eq!(objref, ObjRef { num: 12, gen: 0 });
        assert_eq!(obj.as_dict().unwrap().lookup(b"Type").as_name(), Some(&Name::from(b"Catalog")));
        let (objref, obj) = parser.read_indirect().unwrap();
        assert_eq!(objref, ObjRef { num: 3, gen: 1 });
        assert_eq!(obj.value, int(5));

        for input in ["1 0 5 endobj", "1 0 obj 5", "1 obj 5 endobj", "x 0 obj 5 endobj"] {
            assert_eq!(ObjParser::from(input).read_indirect().unwrap_err().kind(),
                ErrorKind::MalformedIndirectObject, "{input}");
        }
    }
}
