//! Operators over values

use super::Value;
use crate::syntax::{BinaryOp, UnaryOp};

type OpResult = Result<Value, String>;

/// Apply a binary operator.
pub fn binary(op: BinaryOp, left: &Value, right: &Value) -> OpResult {
    match op {
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub => arithmetic(op, left, right, |a, b| a - b),
        BinaryOp::Mul => arithmetic(op, left, right, |a, b| a * b),
        BinaryOp::Div => arithmetic(op, left, right, |a, b| a / b),
        BinaryOp::Rem => arithmetic(op, left, right, |a, b| a % b),
        BinaryOp::Pow => arithmetic(op, left, right, f64::powf),

        BinaryOp::Eq => Ok(Value::Bool(loose_eq(left, right))),
        BinaryOp::Ne => Ok(Value::Bool(!loose_eq(left, right))),
        BinaryOp::StrictEq => Ok(Value::Bool(strict_eq(left, right))),
        BinaryOp::StrictNe => Ok(Value::Bool(!strict_eq(left, right))),

        BinaryOp::Lt => compare(op, left, right, |o| o.is_lt()),
        BinaryOp::Le => compare(op, left, right, |o| o.is_le()),
        BinaryOp::Gt => compare(op, left, right, |o| o.is_gt()),
        BinaryOp::Ge => compare(op, left, right, |o| o.is_ge()),
    }
}

/// Apply a prefix unary operator.
pub fn unary(op: UnaryOp, operand: &Value) -> OpResult {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => number_of(operand, op.as_str()).map(|n| Value::Number(-n)),
        UnaryOp::Plus => number_of(operand, op.as_str()).map(Value::Number),
    }
}

fn number_of(value: &Value, op: &str) -> Result<f64, String> {
    value
        .to_number()
        .ok_or_else(|| format!("cannot apply `{}` to {}", op, value.type_name()))
}

fn eval_add(left: &Value, right: &Value) -> OpResult {
    match (left, right) {
        (Value::Array(_), _) | (_, Value::Array(_)) => Err(format!(
            "cannot apply `+` to {} and {}",
            left.type_name(),
            right.type_name()
        )),
        (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::Str(format!("{}{}", left, right))),
        _ => arithmetic(BinaryOp::Add, left, right, |a, b| a + b),
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value, f: impl Fn(f64, f64) -> f64) -> OpResult {
    match (left.to_number(), right.to_number()) {
        (Some(a), Some(b)) => Ok(Value::Number(f(a, b))),
        _ => Err(format!(
            "cannot apply `{}` to {} and {}",
            op,
            left.type_name(),
            right.type_name()
        )),
    }
}

// Relational comparison: strings compare lexically, everything else
// numerically, and any NaN makes the result false.
fn compare(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    accept: impl Fn(std::cmp::Ordering) -> bool,
) -> OpResult {
    if let (Value::Str(a), Value::Str(b)) = (left, right) {
        return Ok(Value::Bool(accept(a.cmp(b))));
    }
    match (left.to_number(), right.to_number()) {
        (Some(a), Some(b)) => Ok(Value::Bool(a.partial_cmp(&b).is_some_and(accept))),
        _ => Err(format!(
            "cannot compare {} and {} with `{}`",
            left.type_name(),
            right.type_name(),
            op
        )),
    }
}

/// `===`. Arrays compare element-wise.
pub fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| strict_eq(x, y))
        }
        _ => false,
    }
}

/// `==` with JavaScript's coercions.
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
        (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
        (Value::Array(_), Value::Array(_)) => strict_eq(left, right),
        (Value::Array(_), other) | (other, Value::Array(_)) => {
            let text = if matches!(left, Value::Array(_)) { left } else { right };
            loose_eq(&Value::Str(text.to_string()), other)
        }
        (Value::Str(a), Value::Str(b)) => a == b,
        _ => match (left.to_number(), right.to_number()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}
