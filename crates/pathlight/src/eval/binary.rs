//! Binary expressions

use super::Substitution;
use crate::error::Result;
use crate::symbols::Scope;
use crate::syntax::{BinaryOp, Node};
use crate::term::Term;

/// `left op right` with both sides substituted.
pub fn binary(
    sub: &mut Substitution<'_>,
    op: BinaryOp,
    left: &Node,
    right: &Node,
    scope: &Scope,
) -> Result<Term> {
    let left = sub.expression(left, scope)?;
    let right = sub.expression(right, scope)?;
    Ok(Term::binary(op, left, right))
}
