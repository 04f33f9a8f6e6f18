//! Unary and update expressions

use super::Substitution;
use crate::error::Result;
use crate::symbols::Scope;
use crate::syntax::{Node, UnaryOp, UpdateOp};
use crate::term::Term;

/// `!x`, `-x`, `+x`.
pub fn unary(sub: &mut Substitution<'_>, op: UnaryOp, argument: &Node, scope: &Scope) -> Result<Term> {
    let operand = sub.expression(argument, scope)?;
    Ok(Term::Unary {
        op,
        operand: Box::new(operand),
    })
}

/// `x++` inside a larger expression: rendered, but nothing is recorded.
pub fn update(
    sub: &mut Substitution<'_>,
    op: UpdateOp,
    prefix: bool,
    argument: &Node,
    scope: &Scope,
) -> Result<Term> {
    let operand = sub.expression(argument, scope)?;
    Ok(Term::Update {
        op,
        prefix,
        operand: Box::new(operand),
    })
}
