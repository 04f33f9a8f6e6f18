//! Evaluation of substituted terms
//!
//! Conditions are colored by evaluating their substituted [`Term`] directly.
//! Input symbols are looked up in the symbol table as it stood when the
//! term was written: each lookup carries a *horizon* stamp, and a record's
//! own value is evaluated against the records stamped before it. Horizons
//! only ever decrease, so evaluation always terminates.

use tracing::trace;

use crate::error::{Error, Result};
use crate::symbols::{Scope, SymbolTable};
use crate::term::Term;
use crate::value::{ops, parse_number, Value};

/// The point a term is evaluated from.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'s> {
    /// Query line for nearest-record lookups
    pub line: u32,
    /// Open conditions
    pub scope: &'s Scope,
    /// Only records stamped before this are visible
    pub horizon: usize,
}

impl<'s> Frame<'s> {
    /// Create a frame.
    pub fn new(line: u32, scope: &'s Scope, horizon: usize) -> Self {
        Self {
            line,
            scope,
            horizon,
        }
    }
}

/// Term evaluator over a symbol table.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'t> {
    symbols: &'t SymbolTable,
}

impl<'t> Evaluator<'t> {
    /// Create an evaluator reading from `symbols`.
    pub fn new(symbols: &'t SymbolTable) -> Self {
        Self { symbols }
    }

    /// Evaluate a term from a frame.
    pub fn eval(&self, term: &Term, frame: Frame<'_>) -> Result<Value> {
        match term {
            Term::Literal(lit) => Ok(Value::from(lit)),
            Term::Undefined => Ok(Value::Undefined),
            Term::Symbol(name) => self.lookup(name, frame),
            Term::Group(inner) => self.eval(inner, frame),
            Term::Sequence(items) => items
                .iter()
                .map(|item| self.eval(item, frame))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Term::Unary { op, operand } => {
                let value = self.eval(operand, frame)?;
                ops::unary(*op, &value).map_err(|m| Error::evaluation(m, frame.line))
            }
            Term::Update {
                op,
                prefix,
                operand,
            } => {
                let value = self.eval(operand, frame)?;
                let n = value.to_number().ok_or_else(|| {
                    Error::evaluation(
                        format!("cannot apply `{}` to {}", op.as_str(), value.type_name()),
                        frame.line,
                    )
                })?;
                if *prefix {
                    let one = Value::Number(1.0);
                    ops::binary(op.as_binary(), &Value::Number(n), &one)
                        .map_err(|m| Error::evaluation(m, frame.line))
                } else {
                    Ok(Value::Number(n))
                }
            }
            Term::Binary { op, left, right } => {
                let left = self.eval(left, frame)?;
                let right = self.eval(right, frame)?;
                ops::binary(*op, &left, &right).map_err(|m| Error::evaluation(m, frame.line))
            }
            Term::Index { base, index } => {
                let base = self.lookup(base, frame)?;
                let index = self.eval(index, frame)?;
                element(&base, &index, frame.line)
            }
            Term::Length(base) => match self.lookup(base, frame)? {
                Value::Array(items) => Ok(Value::Number(items.len() as f64)),
                Value::Str(s) => Ok(Value::Number(s.chars().count() as f64)),
                other => Err(Error::evaluation(
                    format!("cannot read `length` of {}", other.type_name()),
                    frame.line,
                )),
            },
        }
    }

    /// Current value of a name. Names with no visible record are `undefined`.
    pub fn lookup(&self, name: &str, frame: Frame<'_>) -> Result<Value> {
        match self
            .symbols
            .resolve_within(name, frame.line, frame.scope, frame.horizon)
        {
            Some(record) => {
                trace!(name, line = record.decl_line, seq = record.seq, "resolved");
                let inner = Frame::new(record.decl_line, &record.scope, record.seq);
                self.eval(&record.value, inner)
            }
            None => Ok(Value::Undefined),
        }
    }
}

/// Convert a value to an array index.
pub fn to_index(index: &Value, line: u32) -> Result<usize> {
    let n = match index {
        Value::Number(n) => Some(*n),
        Value::Str(s) => parse_number(s.trim()),
        _ => None,
    };
    match n {
        Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => Ok(n as usize),
        _ => Err(Error::evaluation(
            format!("index must be a non-negative integer, found {}", index),
            line,
        )),
    }
}

/// `base[index]`. Reading past the end gives `undefined`.
pub fn element(base: &Value, index: &Value, line: u32) -> Result<Value> {
    let Value::Array(items) = base else {
        return Err(Error::evaluation(
            format!("cannot index into {}", base.type_name()),
            line,
        ));
    };
    let i = to_index(index, line)?;
    Ok(items.get(i).cloned().unwrap_or(Value::Undefined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::BinaryOp;

    #[test]
    fn test_unseeded_input_is_undefined() {
        let table = SymbolTable::new();
        let cond = Term::binary(BinaryOp::Lt, Term::symbol("y"), Term::number(9.0));
        let scope = Scope::root();
        let value = Evaluator::new(&table)
            .eval(&cond, Frame::new(3, &scope, table.stamp()))
            .unwrap();
        assert_eq!(value, Value::Bool(false));
    }

    #[test]
    fn test_record_value_sees_only_earlier_records() {
        // x = 1; x = x + 1; reading x gives 2, not a loop
        let mut table = SymbolTable::new();
        let root = Scope::root();
        table.push("x", 1, &root, Term::number(1.0));
        table.push(
            "x",
            2,
            &root,
            Term::binary(BinaryOp::Add, Term::symbol("x"), Term::number(1.0)),
        );
        let value = Evaluator::new(&table)
            .lookup("x", Frame::new(3, &root, table.stamp()))
            .unwrap();
        assert_eq!(value, Value::Number(2.0));
    }

    #[test]
    fn test_indexing_rules() {
        let arr = Value::Array(vec![Value::Number(5.0)]);
        assert_eq!(element(&arr, &Value::Number(0.0), 1).unwrap(), Value::Number(5.0));
        assert_eq!(element(&arr, &Value::Number(4.0), 1).unwrap(), Value::Undefined);
        assert!(element(&arr, &Value::Number(0.5), 1).is_err());
        assert!(element(&Value::Number(3.0), &Value::Number(0.0), 1).is_err());
    }
}
