//! Literals

use crate::syntax::Literal;
use crate::term::Term;

/// Literals pass through with their source text.
pub fn literal(lit: &Literal) -> Term {
    Term::Literal(lit.clone())
}
