//! Substitution walk
//!
//! A [`Substitution`] owns all per-request state: the symbol table, the
//! line buffer, the else/else-if lineage and the set of symbolic inputs.
//! The walk dispatches on node kind to one handler per supported construct.
//! Statement handlers write lines; expression handlers return the
//! substituted [`Term`].

pub mod array;
pub mod assign;
pub mod binary;
pub mod function;
pub mod if_expr;
pub mod index;
pub mod literal;
pub mod local;
pub mod loops;
pub mod path;
pub mod return_expr;
pub mod stmt;
pub mod unary;

use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::context::Options;
use crate::error::{Error, Result};
use crate::lines::LineBuffer;
use crate::symbols::{ElifChain, Scope, Seeds, SymbolTable};
use crate::syntax::{Node, NodeKind, Program};
use crate::term::Term;

/// Result of a completed walk: the buffered lines and the final table.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Output lines with their condition probes
    pub lines: LineBuffer,
    /// Every record written during the walk, seeds first
    pub symbols: SymbolTable,
}

/// Per-request substitution state.
#[derive(Debug)]
pub struct Substitution<'o> {
    pub(crate) options: &'o Options,
    pub(crate) symbols: SymbolTable,
    pub(crate) lines: LineBuffer,
    pub(crate) chain: ElifChain,
    pub(crate) inputs: IndexSet<String>,
    /// Line of the statement being walked; the query line for lookups
    pub(crate) line: u32,
    pub(crate) in_function: bool,
    pub(crate) seen_function: bool,
    depth: usize,
}

impl<'o> Substitution<'o> {
    /// Start a request over the caller's seeds.
    pub fn new(seeds: &Seeds, options: &'o Options) -> Self {
        Self {
            options,
            symbols: SymbolTable::from_seeds(seeds),
            lines: LineBuffer::new(),
            chain: ElifChain::new(),
            inputs: IndexSet::new(),
            line: 0,
            in_function: false,
            seen_function: false,
            depth: 0,
        }
    }

    /// Walk a program: top-level statements first, then the function.
    pub fn run(mut self, program: &Program) -> Result<Transcript> {
        let mut function = None;
        for node in &program.body {
            if let NodeKind::FunctionDeclaration { .. } = node.kind {
                if function.is_some() {
                    return Err(Error::unsupported(node.kind_name(), node.line()));
                }
                function = Some(node);
            }
        }

        let root = Scope::root();
        for node in program.body.iter().filter(|n| !is_function(n)) {
            self.statement(node, &root)?;
        }
        match function {
            Some(node) => self.statement(node, &root)?,
            None => debug!("no function declaration; rendering top-level statements only"),
        }

        Ok(Transcript {
            lines: self.lines,
            symbols: self.symbols,
        })
    }

    /// Whether `name` stays symbolic.
    pub fn is_input(&self, name: &str) -> bool {
        self.inputs.contains(name)
    }

    fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::NestingTooDeep {
                depth: self.depth,
                max: self.options.max_depth,
            });
        }
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ═══════════════════════════════════════════════════════════════════
    // Dispatchers
    // ═══════════════════════════════════════════════════════════════════

    /// Walk a statement, writing its lines.
    pub fn statement(&mut self, node: &Node, scope: &Scope) -> Result<()> {
        if self.options.trace {
            trace!(kind = node.kind_name(), line = node.line(), "statement");
        }
        self.descend(|sub| match &node.kind {
            NodeKind::FunctionDeclaration { name, params, body } => {
                function::function_declaration(sub, node, name, params, body, scope)
            }
            NodeKind::WhileStatement { test, body } => {
                loops::while_statement(sub, node, test, body, scope)
            }
            NodeKind::IfStatement { .. } => if_expr::if_statement(sub, node, scope),
            NodeKind::ReturnStatement { argument } => {
                return_expr::return_statement(sub, node, argument.as_deref(), scope)
            }
            NodeKind::VariableDeclaration { kind, declarations } => {
                local::variable_declaration(sub, node, *kind, declarations, scope)
            }
            NodeKind::ExpressionStatement(expr) => stmt::expression_statement(sub, node, expr, scope),
            NodeKind::BlockStatement(body) => stmt::block(sub, node, body, scope),
            _ => Err(Error::unsupported(node.kind_name(), node.line())),
        })
    }

    /// Substitute an expression.
    pub fn expression(&mut self, node: &Node, scope: &Scope) -> Result<Term> {
        if self.options.trace {
            trace!(kind = node.kind_name(), line = node.line(), "expression");
        }
        self.descend(|sub| match &node.kind {
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            } => assign::assignment(sub, node, *operator, left, right, scope),
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            } => binary::binary(sub, *operator, left, right, scope),
            NodeKind::UnaryExpression { operator, argument } => {
                unary::unary(sub, *operator, argument, scope)
            }
            NodeKind::UpdateExpression {
                operator,
                prefix,
                argument,
            } => unary::update(sub, *operator, *prefix, argument, scope),
            NodeKind::MemberExpression {
                object,
                property,
                computed,
            } => index::member(sub, node, object, property, *computed, scope),
            NodeKind::Identifier(name) => path::identifier(sub, name, scope),
            NodeKind::Literal(lit) => Ok(literal::literal(lit)),
            NodeKind::ArrayExpression(elements) => array::array(sub, elements, scope),
            _ => Err(Error::unsupported(node.kind_name(), node.line())),
        })
    }
}

fn is_function(node: &Node) -> bool {
    matches!(node.kind, NodeKind::FunctionDeclaration { .. })
}
