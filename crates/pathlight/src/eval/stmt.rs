//! Blocks and expression statements

use tracing::debug;

use super::{assign, Substitution};
use crate::error::Result;
use crate::lines::FragmentKind;
use crate::symbols::Scope;
use crate::syntax::{Node, NodeKind};

/// `{ ... }`: braces at the block's start and (exclusive) end columns.
pub fn block(sub: &mut Substitution<'_>, node: &Node, body: &[Node], scope: &Scope) -> Result<()> {
    sub.lines.write(node.span.start, "{", FragmentKind::Punctuation);
    for stmt in body {
        sub.statement(stmt, scope)?;
    }
    sub.lines.write(node.span.end, "}", FragmentKind::Punctuation);
    Ok(())
}

/// An expression in statement position.
///
/// Assignments and update statements record values; any other expression
/// is substituted for its errors and then discarded.
pub fn expression_statement(
    sub: &mut Substitution<'_>,
    node: &Node,
    expr: &Node,
    scope: &Scope,
) -> Result<()> {
    sub.line = node.line();
    match &expr.kind {
        NodeKind::UpdateExpression {
            operator,
            prefix,
            argument,
        } => assign::update_statement(sub, expr, *operator, *prefix, argument, scope),
        _ => {
            let term = sub.expression(expr, scope)?;
            debug!(line = sub.line, %term, "expression statement");
            Ok(())
        }
    }
}
