//! Frontend trait for pathlight
//!
//! A frontend turns some external representation of a program into the
//! [`Program`] tree the substitution engine walks.
//!
//! ```text
//! Source text / ESTree JSON → [Frontend] → Program → [eval] → annotated lines
//! ```
//!
//! A frontend must emit [`NodeKind`](crate::syntax::NodeKind)s with a
//! line/column [`Span`](crate::syntax::Span) on every node and keep the raw
//! text of literals. Anything it cannot model becomes a foreign node and is
//! rejected by the walk.

use std::fmt;

use crate::syntax::Program;

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

/// A frontend could not produce a program tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What was wrong with the input
    pub message: String,
    /// Where it went wrong, when known
    pub location: Option<SourceLocation>,
}

impl ParseError {
    /// Error without a location.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message,
            location: None,
        }
    }

    /// Attach the position the error was found at.
    pub fn with_location(self, location: SourceLocation) -> Self {
        Self {
            location: Some(location),
            ..self
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(SourceLocation { line, column }) => {
                write!(f, "Parse error: {} at {}:{}", self.message, line, column)
            }
            None => write!(f, "Parse error: {}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Line and column of an error, both counted from 1 as an editor shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line, from 1
    pub line: u32,
    /// Column, from 1
    pub column: u32,
}

impl SourceLocation {
    /// Location at `line`:`column`.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl From<crate::syntax::Position> for SourceLocation {
    fn from(pos: crate::syntax::Position) -> Self {
        Self::new(pos.line, pos.column + 1)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FRONTEND TRAIT
// ═══════════════════════════════════════════════════════════════════════

/// Boundary between input formats and the substitution core.
pub trait Frontend {
    /// Produce a program tree from the given input.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the input cannot be understood.
    fn parse(&self, input: &str) -> Result<Program, ParseError>;

    /// Human-readable frontend name.
    fn name(&self) -> &str;
}
