//! If / else-if / else chains

use tracing::debug;

use super::Substitution;
use crate::error::{Error, Result};
use crate::lines::{FragmentKind, Probe};
use crate::symbols::Scope;
use crate::syntax::{Node, NodeKind, Position};

/// Where in a chain a conditional sits.
#[derive(Debug, Clone, Copy)]
enum Link {
    Head,
    ElseIf { previous: u32 },
}

/// Walk an `if` statement and the rest of its chain.
pub fn if_statement(sub: &mut Substitution<'_>, node: &Node, scope: &Scope) -> Result<()> {
    conditional(sub, node, Link::Head, scope)
}

fn conditional(sub: &mut Substitution<'_>, node: &Node, link: Link, scope: &Scope) -> Result<()> {
    let NodeKind::IfStatement {
        test,
        consequent,
        alternate,
    } = &node.kind
    else {
        return Err(Error::unsupported(node.kind_name(), node.line()));
    };

    let line = node.line();
    sub.line = line;
    let condition = sub.expression(test, scope)?;

    let (text, at, lineage) = match link {
        Link::Head => {
            sub.chain.start(line);
            (format!("if ({}) ", condition), node.span.start, Vec::new())
        }
        Link::ElseIf { previous } => {
            let lineage = sub.chain.extend(line, previous);
            // `node` starts at the `if`; the text starts at its `else`
            let at = Position::new(line, node.span.start.column.saturating_sub(4));
            (format!("else if ({}) ", condition), at, lineage)
        }
    };
    debug!(line, %condition, "conditional");
    sub.lines.write(at, text, FragmentKind::Condition);
    sub.lines.probe(
        line,
        Probe {
            condition,
            line,
            scope: scope.clone(),
            horizon: sub.symbols.stamp(),
        },
    );

    sub.statement(consequent, &scope.enter_chain(&lineage, line))?;

    match alternate.as_deref() {
        None => Ok(()),
        Some(alt) if matches!(alt.kind, NodeKind::IfStatement { .. }) => {
            sub.descend(|sub| conditional(sub, alt, Link::ElseIf { previous: line }, scope))
        }
        Some(alt) => else_branch(sub, consequent, alt, line, scope),
    }
}

/// A plain `else`, introduced on the line its consequent ends on.
fn else_branch(
    sub: &mut Substitution<'_>,
    consequent: &Node,
    alternate: &Node,
    previous: u32,
    scope: &Scope,
) -> Result<()> {
    let end = consequent.span.end;
    let line = end.line;
    sub.line = line;
    let lineage = sub.chain.extend(line, previous);
    debug!(line, ?lineage, "else");
    sub.lines.write(
        Position::new(line, end.column + 2),
        "else",
        FragmentKind::Punctuation,
    );
    sub.statement(alternate, &scope.enter_chain(&lineage, line))
}
