//! Array literals

use super::Substitution;
use crate::error::Result;
use crate::symbols::Scope;
use crate::syntax::Node;
use crate::term::Term;

/// `[a, b, c]` with every element substituted.
pub fn array(sub: &mut Substitution<'_>, elements: &[Node], scope: &Scope) -> Result<Term> {
    elements
        .iter()
        .map(|element| sub.expression(element, scope))
        .collect::<Result<Vec<_>>>()
        .map(Term::Sequence)
}
