//! While loops

use tracing::debug;

use super::Substitution;
use crate::error::Result;
use crate::lines::FragmentKind;
use crate::symbols::Scope;
use crate::syntax::Node;

/// `while(cond)`, then the body once, scoped to the loop line.
///
/// The body is a single static pass: assignments inside it record one
/// value each, not one per iteration.
pub fn while_statement(
    sub: &mut Substitution<'_>,
    node: &Node,
    test: &Node,
    body: &Node,
    scope: &Scope,
) -> Result<()> {
    let line = node.line();
    sub.line = line;
    let condition = sub.expression(test, scope)?;
    debug!(line, %condition, "while");
    sub.lines
        .write(node.span.start, format!("while({})", condition), FragmentKind::Loop);
    sub.statement(body, &scope.enter(line))
}
