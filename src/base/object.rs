use std::fmt::{Display, Formatter};

use super::name::Name;
use super::dict::Dict;
use super::number::Number;
use super::string::{Literal, Hex};
use super::stream::Stream;
use super::types::*;

/// The byte range occupied by a parsed object, relative to the `%PDF` marker.
///
/// The range is half-open: `end` is the position immediately after the last byte consumed.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Span {
    pub start: Offset,
    pub end: Offset,
}

impl Span {
    pub fn new(start: Offset, end: Offset) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Number of bytes covered; 0 for an inverted span.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A parsed PDF object: its value and the bytes it was parsed from.
#[derive(Debug, PartialEq, Clone)]
pub struct Object {
    pub value: Value,
    pub span: Span,
}

/// The value of a PDF object.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    /// Bool (`true` or `false`)
    Bool(bool),
    /// Numbers (integer or real)
    Number(Number),
    /// Literal string (`(text)`), escapes decoded.
    String(Vec<u8>),
    /// Hexadecimal string (`<4E6F>`), decoded to bytes.
    HexString(Vec<u8>),
    /// Name (like `/Length`)
    Name(Name),
    /// Array (`[1 2 3]`)
    Array(Vec<Object>),
    /// Dictionary (`<< /Root 1 0 R >>`)
    Dict(Dict),
    /// Stream (`<< ... >> stream ... endstream`)
    Stream(Stream),
    /// Indirect object reference (`3 0 R`)
    Ref(ObjRef),
    /// Null object (`null`). Also returned for missing dictionary keys and unresolvable references.
    Null
}

pub(crate) static NULL_OBJECT: Object = Object { value: Value::Null, span: Span { start: 0, end: 0 } };

impl Object {
    pub fn new(value: Value, span: Span) -> Self {
        Self { value, span }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Null)
    }

    /// For `Value::Number(Number::Int(number))`, extracts the `number` and casts it into the
    /// required type. Returns `None` both for other types of objects and for value too large for the
    /// type `T`.
    pub fn num_value<T: TryFrom<i64>>(&self) -> Option<T> {
        match self.value {
            Value::Number(Number::Int(num)) => num.try_into().ok(),
            _ => None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Value::Bool(val) => Some(val),
            _ => None
        }
    }

    /// String contents, regardless whether written as literal or hexadecimal.
    pub fn as_string(&self) -> Option<&[u8]> {
        match &self.value {
            Value::String(val) | Value::HexString(val) => Some(val),
            _ => None
        }
    }

    pub fn as_name(&self) -> Option<&Name> {
        match &self.value {
            Value::Name(val) => Some(val),
            _ => None
        }
    }

    pub fn as_array(&self) -> Option<&[Object]> {
        match &self.value {
            Value::Array(val) => Some(val),
            _ => None
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match &self.value {
            Value::Dict(val) => Some(val),
            Value::Stream(stm) => Some(&stm.dict),
            _ => None
        }
    }

    pub fn as_stream(&self) -> Option<&Stream> {
        match &self.value {
            Value::Stream(val) => Some(val),
            _ => None
        }
    }

    pub fn as_objref(&self) -> Option<&ObjRef> {
        match &self.value {
            Value::Ref(val) => Some(val),
            _ => None
        }
    }

    pub fn into_dict(self) -> Option<Dict> {
        match self.value {
            Value::Dict(val) => Some(val),
            _ => None
        }
    }

    pub fn into_stream(self) -> Option<Stream> {
        match self.value {
            Value::Stream(val) => Some(val),
            _ => None
        }
    }
}

impl Value {
    /// A short name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Number(Number::Int(_)) => "integer",
            Value::Number(Number::Real(_)) => "real",
            Value::String(_) => "literal string",
            Value::HexString(_) => "hex string",
            Value::Name(_) => "name",
            Value::Array(_) => "array",
            Value::Dict(_) => "dictionary",
            Value::Stream(_) => "stream",
            Value::Ref(_) => "indirect reference",
            Value::Null => "null",
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("true"),
            Value::Bool(false) => f.write_str("false"),
            Value::Number(num) => write!(f, "{num}"),
            Value::String(s) => write!(f, "{}", Literal(s)),
            Value::HexString(s) => write!(f, "{}", Hex(s)),
            Value::Name(name) => write!(f, "{}", name),
            Value::Array(arr) => {
                f.write_str("[ ")?;
                for obj in arr {
                    write!(f, "{obj} ")?;
                }
                f.write_str("]")
            },
            Value::Dict(dict) => write!(f, "{}", dict),
            Value::Stream(stm) => write!(f, "{} [stream]", stm.dict),
            Value::Ref(ObjRef{num, gen}) => write!(f, "{num} {gen} R"),
            Value::Null => f.write_str("null")
        }
    }
}

/// An indirect object reference.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub struct ObjRef {
    pub num: ObjNum,
    pub gen: ObjGen
}

impl Display for ObjRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.num, self.gen)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn obj(value: Value) -> Object {
        Object::new(value, Span::default())
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Value::Number(Number::Real(-1.))), "-1");
        assert_eq!(format!("{}", Value::Number(Number::Real(0.0000000000000001))), "0.0000000000000001");
        assert_eq!(format!("{}", Value::String(b"".to_vec())), "()");
        assert_eq!(format!("{}", Value::String(b"\0\r\n\\".to_vec())), "(\\000\\r\\n\\\\)");
        assert_eq!(format!("{}", Value::String(b"()".to_vec())), "(\\(\\))");
        assert_eq!(format!("{}", Value::HexString(vec![0x90, 0x1F, 0xA3])), "<901FA3>");
        assert_eq!(format!("{}", Value::Name(Name::from(b" A#/$*(%\n"))), "/#20A#23#2F$*#28#25#0A");
        assert_eq!(format!("{}", Value::Array(vec![
                obj(Value::Number(Number::Int(549))),
                #[allow(clippy::approx_constant)]
                obj(Value::Number(Number::Real(3.14))),
                obj(Value::Bool(false)),
                obj(Value::String(b"Ralph".to_vec())),
                obj(Value::Name(Name::from(b"SomeName")))
        ])), "[ 549 3.14 false (Ralph) /SomeName ]");
        assert_eq!(format!("{}", Value::Dict(Dict::from(vec![
            (Name::from(b"Length"), obj(Value::Ref(ObjRef{num: 8, gen: 0})))]))), "<< /Length 8 0 R >>");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(obj(Value::Number(Number::Int(42))).num_value::<u8>(), Some(42));
        assert_eq!(obj(Value::Number(Number::Int(-1))).num_value::<u64>(), None);
        assert_eq!(obj(Value::Number(Number::Real(1.0))).num_value::<i64>(), None);
        assert_eq!(obj(Value::HexString(b"ab".to_vec())).as_string(), Some(&b"ab"[..]));
        assert!(NULL_OBJECT.is_null());
        assert_eq!(Value::Ref(ObjRef { num: 1, gen: 0 }).type_name(), "indirect reference");
        assert_eq!(Span::new(3, 8).len(), 5);
        assert_eq!(Span { start: 8, end: 3 }.len(), 0);
    }
}
