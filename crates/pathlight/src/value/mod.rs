//! Runtime values for condition evaluation
//!
//! Only the evaluator produces these. They follow JavaScript's value model
//! closely enough to decide whether a branch condition holds.

mod display;
pub mod ops;

pub use display::format_number;

use crate::syntax::{Literal, LiteralValue};

/// A JavaScript value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// IEEE-754 double
    Number(f64),
    /// String
    Str(String),
    /// Array of values
    Array(Vec<Value>),
}

impl Value {
    /// JavaScript truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) => true,
        }
    }

    /// Name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
        }
    }

    /// Numeric conversion. `None` for arrays, which have no defined
    /// arithmetic here.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Undefined => Some(f64::NAN),
            Value::Null => Some(0.0),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => Some(*n),
            Value::Str(s) => {
                let s = s.trim();
                if s.is_empty() {
                    Some(0.0)
                } else {
                    Some(parse_number(s).unwrap_or(f64::NAN))
                }
            }
            Value::Array(_) => None,
        }
    }
}

/// Read a JavaScript numeric string: decimal with optional sign and
/// exponent, `Infinity`, or a `0x`/`0o`/`0b` integer. Surrounding
/// whitespace is not accepted.
pub fn parse_number(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    let negative = text.starts_with('-');
    if unsigned == "Infinity" {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let radix = match unsigned.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        // Signs are not allowed on prefixed integers
        if unsigned.len() != text.len() {
            return None;
        }
        let digits = &unsigned[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return u128::from_str_radix(digits, radix).ok().map(|n| n as f64);
    }

    let decimal = unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal || !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    text.parse::<f64>().ok()
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        match &lit.value {
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::Str(s) => Value::Str(s.clone()),
            LiteralValue::Bool(b) => Value::Bool(*b),
            LiteralValue::Null => Value::Null,
        }
    }
}
