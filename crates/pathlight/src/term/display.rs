//! Source-text rendering of terms

use std::fmt;

use super::Term;
use crate::syntax::{BinaryOp, UnaryOp};

const UNARY: u8 = 6;
const UPDATE: u8 = 7;
const ATOM: u8 = 8;

impl Term {
    fn precedence(&self) -> u8 {
        match self {
            Term::Binary { op, .. } => op.precedence(),
            Term::Unary { .. } => UNARY,
            Term::Update { .. } => UPDATE,
            _ => ATOM,
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, term: &Term, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", term)
    } else {
        write!(f, "{}", term)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Literal(lit) => f.write_str(&lit.raw),
            Term::Symbol(name) => f.write_str(name),
            Term::Undefined => f.write_str("undefined"),
            Term::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Term::Group(inner) => write!(f, "({})", inner),
            Term::Index { base, index } => write!(f, "{}[{}]", base, index),
            Term::Length(base) => write!(f, "{}.length", base),
            Term::Unary { op, operand } => {
                // `- -x` must not print as `--x`
                let clash = matches!(op, UnaryOp::Neg | UnaryOp::Plus)
                    && matches!(
                        operand.as_ref(),
                        Term::Unary {
                            op: UnaryOp::Neg | UnaryOp::Plus,
                            ..
                        } | Term::Update { prefix: true, .. }
                    );
                f.write_str(op.as_str())?;
                write_operand(f, operand, clash || operand.precedence() < UNARY)
            }
            Term::Update {
                op,
                prefix,
                operand,
            } => {
                let parens = operand.precedence() < ATOM;
                if *prefix {
                    f.write_str(op.as_str())?;
                    write_operand(f, operand, parens)
                } else {
                    write_operand(f, operand, parens)?;
                    f.write_str(op.as_str())
                }
            }
            Term::Binary { op, left, right } => {
                let prec = op.precedence();
                let right_assoc = op.is_right_associative();
                let left_parens = left.precedence() < prec
                    || (right_assoc && left.precedence() == prec)
                    || (*op == BinaryOp::Pow && matches!(left.as_ref(), Term::Unary { .. }));
                let right_parens =
                    right.precedence() < prec || (!right_assoc && right.precedence() == prec);
                write_operand(f, left, left_parens)?;
                write!(f, " {} ", op)?;
                write_operand(f, right, right_parens)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Literal, UpdateOp};

    fn sym(name: &str) -> Term {
        Term::symbol(name)
    }

    #[test]
    fn test_group_prints_parentheses() {
        let temp = Term::binary(BinaryOp::Mul, sym("x"), sym("z")).grouped();
        assert_eq!(temp.to_string(), "(x * z)");
        let cond = Term::binary(BinaryOp::Gt, temp, Term::number(1.0));
        assert_eq!(cond.to_string(), "(x * z) > 1");
    }

    #[test]
    fn test_source_precedence_is_preserved() {
        let sum = Term::binary(BinaryOp::Add, sym("a"), sym("b"));
        assert_eq!(
            Term::binary(BinaryOp::Mul, sum.clone(), sym("c")).to_string(),
            "(a + b) * c"
        );
        assert_eq!(
            Term::binary(BinaryOp::Sub, sym("c"), sum).to_string(),
            "c - (a + b)"
        );
    }

    #[test]
    fn test_sequence_has_no_spaces() {
        let arr = Term::Sequence(vec![
            Term::number(5.0),
            Term::Literal(Literal::string("a", "'a'")),
        ]);
        assert_eq!(arr.to_string(), "[5,'a']");
    }

    #[test]
    fn test_unary_forms() {
        let not = Term::Unary {
            op: UnaryOp::Not,
            operand: Box::new(sym("y")),
        };
        assert_eq!(not.to_string(), "!y");
        let neg_neg = Term::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(Term::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(sym("x")),
            }),
        };
        assert_eq!(neg_neg.to_string(), "-(-x)");
        let post = Term::Update {
            op: UpdateOp::Increment,
            prefix: false,
            operand: Box::new(sym("i")),
        };
        assert_eq!(post.to_string(), "i++");
    }
}
