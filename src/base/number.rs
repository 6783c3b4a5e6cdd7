use std::fmt::{Display, Formatter};

/// A numeric object: integer if written without a decimal point, real otherwise.
///
/// `1.0` and `1.` parse as [`Number::Real`] even though they have no fractional part.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Number {
    Int(i64),
    Real(f64)
}

impl Number {
    /// The value as a float, converting integers.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(x) => x as f64,
            Number::Real(x) => x,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(x) => write!(f, "{x}"),
            Number::Real(x) => write!(f, "{x}"),
        }
    }
}
