use std::fmt::{Display, Formatter};

/// Writes bytes as a literal string, `(...)`, escaping what would not survive reparsing.
pub(crate) struct Literal<'a>(pub &'a [u8]);

/// Writes bytes as an uppercase hexadecimal string, `<...>`.
pub(crate) struct Hex<'a>(pub &'a [u8]);

fn escape(c: u8) -> Option<&'static str> {
    Some(match c {
        b'\n' => "\\n",
        b'\r' => "\\r",
        b'\t' => "\\t",
        b'\x08' => "\\b",
        b'\x0c' => "\\f",
        b'(' => "\\(",
        b')' => "\\)",
        b'\\' => "\\\\",
        _ => return None
    })
}

impl Display for Literal<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        for &c in self.0 {
            match escape(c) {
                Some(esc) => f.write_str(esc)?,
                None if (0x20..=0x7E).contains(&c) => write!(f, "{}", c as char)?,
                None => write!(f, "\\{c:03o}")?
            }
        }
        f.write_str(")")
    }
}

impl Display for Hex<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("<")?;
        self.0.iter().try_for_each(|c| write!(f, "{c:02X}"))?;
        f.write_str(">")
    }
}
