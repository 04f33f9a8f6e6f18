//! Function declarations

use tracing::debug;

use super::Substitution;
use crate::error::{Error, Result};
use crate::lines::FragmentKind;
use crate::symbols::Scope;
use crate::syntax::Node;

/// The analysed function: print its signature, make its parameters
/// inputs, and walk its body in function mode.
///
/// Only one function is analysed per request.
pub fn function_declaration(
    sub: &mut Substitution<'_>,
    node: &Node,
    name: &str,
    params: &[String],
    body: &Node,
    scope: &Scope,
) -> Result<()> {
    if sub.seen_function || sub.in_function {
        return Err(Error::unsupported(node.kind_name(), node.line()));
    }
    sub.seen_function = true;
    sub.line = node.line();

    let signature = format!("function {} ({})", name, params.join(","));
    debug!(%signature, line = sub.line, "function");
    sub.lines.write(node.span.start, signature, FragmentKind::Signature);
    for param in params {
        sub.inputs.insert(param.clone());
    }

    let was_in_function = std::mem::replace(&mut sub.in_function, true);
    let result = sub.statement(body, scope);
    sub.in_function = was_in_function;
    result
}
