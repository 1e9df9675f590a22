use core::fmt;

/// A numeric result: an exact integer or a floating-point value.
///
/// Arithmetic promotes to `Float` whenever either operand is a float, and
/// true division always produces a `Float` even for integer operands.
/// `FloorDiv` and `Rem` keep `Int` when both operands are integers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// The value as a float, promoting integers.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(v) => *v as f64,
            Number::Float(v) => *v,
        }
    }

    /// The exact integer value, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Number::Int(v) => Some(*v),
            Number::Float(_) => None,
        }
    }

    /// True when the value is exactly zero (of either representation).
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Int(v) => *v == 0,
            Number::Float(v) => *v == 0.0,
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Int(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            // Keep a trailing `.0` on integral floats so `6 / 2` (-> 3.0)
            // stays distinguishable from `6 // 2` (-> 3).
            Number::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}
