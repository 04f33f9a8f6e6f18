//! Return statements

use super::Substitution;
use crate::error::Result;
use crate::lines::FragmentKind;
use crate::symbols::Scope;
use crate::syntax::Node;

/// `return expr;` with the argument substituted.
pub fn return_statement(
    sub: &mut Substitution<'_>,
    node: &Node,
    argument: Option<&Node>,
    scope: &Scope,
) -> Result<()> {
    sub.line = node.line();
    let text = match argument {
        Some(arg) => format!("return {};", sub.expression(arg, scope)?),
        None => "return;".to_string(),
    };
    sub.lines.write(node.span.start, text, FragmentKind::Return);
    Ok(())
}
