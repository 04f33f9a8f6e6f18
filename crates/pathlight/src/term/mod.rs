//! Substituted expression trees
//!
//! A [`Term`] is what remains of an expression after every non-input name
//! has been replaced by its recorded value. Its leaves are literals and
//! input symbols. Terms are what the symbol table stores, what the line
//! buffer prints, and what the evaluator colors conditions with.

mod display;

use crate::syntax::{BinaryOp, Literal, UnaryOp, UpdateOp};

/// A substituted expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Literal value, printed as written
    Literal(Literal),

    /// An input name, left symbolic
    Symbol(String),

    /// Array value, printed `[a,b,c]`
    Sequence(Vec<Term>),

    /// A compound value substituted for a name, printed in parentheses
    Group(Box<Term>),

    /// `op operand`
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Term>,
    },

    /// `++x` / `x--`
    Update {
        /// Operator
        op: UpdateOp,
        /// Whether the operator is written first
        prefix: bool,
        /// Operand
        operand: Box<Term>,
    },

    /// `left op right`
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Term>,
        /// Right operand
        right: Box<Term>,
    },

    /// Element of an input array, `base[index]`
    Index {
        /// Input name being indexed
        base: String,
        /// Substituted index
        index: Box<Term>,
    },

    /// `base.length` of an input array
    Length(String),

    /// The value of an uninitialized declaration
    Undefined,
}

impl Term {
    /// Symbolic input name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Term::Symbol(name.into())
    }

    /// Numeric literal, written the way JavaScript prints the number.
    pub fn number(n: f64) -> Self {
        Term::Literal(Literal::number(n, crate::value::format_number(n)))
    }

    /// `left op right`.
    pub fn binary(op: BinaryOp, left: Term, right: Term) -> Self {
        Term::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Form of this value when it replaces a name inside a larger expression.
    ///
    /// Binary and update expressions are parenthesized; everything else is
    /// inlined as is.
    pub fn grouped(self) -> Self {
        match self {
            Term::Binary { .. } | Term::Update { .. } => Term::Group(Box::new(self)),
            other => other,
        }
    }

    /// Elements, if this is an array value.
    pub fn as_sequence(&self) -> Option<&[Term]> {
        match self {
            Term::Sequence(items) => Some(items),
            Term::Group(inner) => inner.as_sequence(),
            _ => None,
        }
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}
