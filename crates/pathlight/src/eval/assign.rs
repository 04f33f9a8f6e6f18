//! Assignments and update statements

use tracing::debug;

use super::index::{base_name, index_of};
use super::{path, Substitution};
use crate::error::{Error, Result};
use crate::lines::FragmentKind;
use crate::symbols::Scope;
use crate::syntax::{AssignOp, Node, NodeKind, UpdateOp};
use crate::term::Term;

/// What an assignment writes to.
enum Target<'n> {
    Name(&'n str),
    Element { base: &'n str, index: Term },
}

impl Target<'_> {
    fn base(&self) -> &str {
        match self {
            Target::Name(name) => *name,
            Target::Element { base, .. } => *base,
        }
    }

    fn text(&self) -> String {
        match self {
            Target::Name(name) => name.to_string(),
            Target::Element { base, index } => format!("{}[{}]", base, index),
        }
    }
}

/// `x = rhs`, `x op= rhs`, `arr[i] = rhs`. Evaluates to the right-hand side.
pub fn assignment(
    sub: &mut Substitution<'_>,
    node: &Node,
    operator: AssignOp,
    left: &Node,
    right: &Node,
    scope: &Scope,
) -> Result<Term> {
    sub.line = node.line();
    let rhs = sub.expression(right, scope)?;
    let target = target(sub, left, scope)?;
    store(sub, &target, operator, rhs.clone(), scope)?;

    if sub.is_input(target.base()) {
        let text = format!("{} {} {};", target.text(), operator.as_str(), rhs);
        sub.lines.write(node.span.start, text, FragmentKind::Assignment);
    }
    Ok(rhs)
}

/// `x++;` / `--x;` used as a statement: records `x + 1` / `x - 1`.
pub fn update_statement(
    sub: &mut Substitution<'_>,
    node: &Node,
    op: UpdateOp,
    prefix: bool,
    argument: &Node,
    scope: &Scope,
) -> Result<()> {
    sub.line = node.line();
    let target = target(sub, argument, scope)?;
    store(sub, &target, AssignOp::Compound(op.as_binary()), Term::number(1.0), scope)?;

    if sub.is_input(target.base()) {
        let text = if prefix {
            format!("{}{};", op.as_str(), target.text())
        } else {
            format!("{}{};", target.text(), op.as_str())
        };
        sub.lines.write(node.span.start, text, FragmentKind::Assignment);
    }
    Ok(())
}

fn target<'n>(sub: &mut Substitution<'_>, left: &'n Node, scope: &Scope) -> Result<Target<'n>> {
    match &left.kind {
        NodeKind::Identifier(name) => Ok(Target::Name(name)),
        NodeKind::MemberExpression {
            object,
            property,
            computed: true,
        } => {
            let base = base_name(left, object)?;
            let index = sub.expression(property, scope)?;
            Ok(Target::Element { base, index })
        }
        _ => Err(Error::unsupported(left.kind_name(), left.line())),
    }
}

fn store(
    sub: &mut Substitution<'_>,
    target: &Target<'_>,
    operator: AssignOp,
    rhs: Term,
    scope: &Scope,
) -> Result<()> {
    let line = sub.line;
    match target {
        Target::Name(name) => {
            let value = match operator {
                AssignOp::Assign => rhs,
                AssignOp::Compound(op) => Term::binary(op, path::identifier(sub, name, scope)?, rhs),
            };
            debug!(%name, line, %value, "assign");
            sub.symbols.push(name, line, scope, value);
        }
        Target::Element { base, index } => {
            let current = match sub.symbols.resolve(base, line, scope) {
                Ok(record) => record.value.clone(),
                // An unseeded input array still gets its line, but no record
                Err(_) if sub.is_input(base) => return Ok(()),
                Err(e) => return Err(e),
            };
            let Some(items) = current.as_sequence() else {
                return Err(Error::evaluation(
                    format!("cannot index into `{}` = {}", base, current),
                    line,
                ));
            };
            let i = index_of(sub, index, scope)?;

            // Mutate a copy; earlier records keep the old array
            let mut items = items.to_vec();
            if items.len() <= i {
                items.resize(i + 1, Term::Undefined);
            }
            items[i] = match operator {
                AssignOp::Assign => rhs,
                AssignOp::Compound(op) => Term::binary(op, items[i].clone().grouped(), rhs),
            };
            let value = Term::Sequence(items);
            debug!(%base, line, %value, "assign element");
            sub.symbols.push(base, line, scope, value);
        }
    }
    Ok(())
}
