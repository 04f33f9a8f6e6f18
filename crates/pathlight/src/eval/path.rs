//! Identifier substitution

use super::Substitution;
use crate::error::Result;
use crate::symbols::Scope;
use crate::term::Term;

/// Inputs stay symbolic; any other name is replaced by its nearest visible
/// value, parenthesized when compound.
pub fn identifier(sub: &mut Substitution<'_>, name: &str, scope: &Scope) -> Result<Term> {
    if sub.is_input(name) {
        return Ok(Term::symbol(name));
    }
    if name == "undefined" && !sub.symbols.contains(name) {
        return Ok(Term::Undefined);
    }
    let record = sub.symbols.resolve(name, sub.line, scope)?;
    Ok(record.value.clone().grouped())
}
