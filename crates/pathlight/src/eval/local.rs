//! `let` / `const` / `var` declarations

use tracing::debug;

use super::Substitution;
use crate::error::Result;
use crate::lines::FragmentKind;
use crate::symbols::Scope;
use crate::syntax::{DeclKind, Declarator, Node};
use crate::term::Term;

/// Record each declarator's value.
///
/// Outside the function the names become inputs and the declaration is
/// printed with its values inlined; inside it nothing is printed.
pub fn variable_declaration(
    sub: &mut Substitution<'_>,
    node: &Node,
    kind: DeclKind,
    declarations: &[Declarator],
    scope: &Scope,
) -> Result<()> {
    let line = node.line();
    sub.line = line;

    let mut parts = Vec::with_capacity(declarations.len());
    for decl in declarations {
        let value = match &decl.init {
            Some(init) => sub.expression(init, scope)?,
            None => Term::Undefined,
        };
        debug!(name = %decl.name, line, %value, "declare");
        if !sub.in_function {
            parts.push(match &decl.init {
                Some(_) => format!("{} = {}", decl.name, value),
                None => decl.name.clone(),
            });
            sub.inputs.insert(decl.name.clone());
        }
        sub.symbols.push(&decl.name, line, scope, value);
    }

    if !sub.in_function {
        let text = format!("{} {};", kind.as_str(), parts.join(", "));
        sub.lines.write(node.span.start, text, FragmentKind::Declaration);
    }
    Ok(())
}
