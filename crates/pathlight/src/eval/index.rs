//! Member access: `arr[i]` and `arr.length`

use super::Substitution;
use crate::error::{Error, Result};
use crate::evaluator::{to_index, Evaluator, Frame};
use crate::symbols::Scope;
use crate::syntax::{Node, NodeKind};
use crate::term::Term;

/// Read an element or the length of an array.
///
/// Input arrays stay symbolic. For any other array the recorded value is
/// looked up and the element (or length) is taken from it.
pub fn member(
    sub: &mut Substitution<'_>,
    node: &Node,
    object: &Node,
    property: &Node,
    computed: bool,
    scope: &Scope,
) -> Result<Term> {
    let base = base_name(node, object)?;

    if !computed {
        return match &property.kind {
            NodeKind::Identifier(prop) if prop == "length" => {
                if sub.is_input(base) {
                    Ok(Term::Length(base.to_string()))
                } else {
                    let len = elements_of(sub, base, scope)?.len();
                    Ok(Term::number(len as f64))
                }
            }
            _ => Err(Error::unsupported(node.kind_name(), node.line())),
        };
    }

    let index = sub.expression(property, scope)?;
    if sub.is_input(base) {
        return Ok(Term::Index {
            base: base.to_string(),
            index: Box::new(index),
        });
    }
    let i = index_of(sub, &index, scope)?;
    let elements = elements_of(sub, base, scope)?;
    Ok(elements.get(i).cloned().unwrap_or(Term::Undefined))
}

/// Name of the indexed variable. Only plain names can be indexed.
pub(crate) fn base_name<'n>(node: &Node, object: &'n Node) -> Result<&'n str> {
    match &object.kind {
        NodeKind::Identifier(name) => Ok(name),
        _ => Err(Error::unsupported(node.kind_name(), node.line())),
    }
}

/// Evaluate a substituted index against the table as it is now.
pub(crate) fn index_of(sub: &Substitution<'_>, index: &Term, scope: &Scope) -> Result<usize> {
    let frame = Frame::new(sub.line, scope, sub.symbols.stamp());
    let value = Evaluator::new(&sub.symbols).eval(index, frame)?;
    to_index(&value, sub.line)
}

/// Elements of the nearest recorded value of a non-input array.
fn elements_of(sub: &Substitution<'_>, base: &str, scope: &Scope) -> Result<Vec<Term>> {
    let record = sub.symbols.resolve(base, sub.line, scope)?;
    match record.value.as_sequence() {
        Some(items) => Ok(items.to_vec()),
        None => Err(Error::evaluation(
            format!("cannot index into `{}` = {}", base, record.value),
            sub.line,
        )),
    }
}
