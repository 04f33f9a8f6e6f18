//! Syntax tree, lexer and parser for the supported JavaScript subset

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{
    AssignOp, BinaryOp, DeclKind, Declarator, Literal, LiteralValue, LogicalOp, Node, NodeKind,
    Position, Program, Span, UnaryOp, UpdateOp,
};
pub use parser::parse;
