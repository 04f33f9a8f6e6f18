//! Error types for substitution and coloring

use thiserror::Error;

use crate::frontend::ParseError;

/// Main error type for pathlight operations.
///
/// Every variant is fatal for the request that raised it: no partial
/// rendering is ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The frontend rejected the input
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Node kind outside the supported subset
    #[error("Unsupported construct: {kind} (line {line})")]
    UnsupportedConstruct {
        /// Syntactic kind of the offending node
        kind: String,
        /// Source line of the node
        line: u32,
    },

    /// No visible record for a name at a line and scope
    #[error("Unresolved variable `{name}` at line {line}")]
    UnresolvedVariable {
        /// Variable name
        name: String,
        /// Line the lookup was made from
        line: u32,
    },

    /// A conditional line's condition could not be re-derived for coloring
    #[error("Cannot reconstruct condition on line {line}: {reason}")]
    MalformedConditionReconstruction {
        /// Buffered line number
        line: u32,
        /// What went wrong
        reason: String,
    },

    /// A substituted expression could not be evaluated
    #[error("Evaluation error at line {line}: {message}")]
    EvaluationError {
        /// Description of the failure
        message: String,
        /// Line of the expression being evaluated
        line: u32,
    },

    /// Nesting exceeded [`Options::max_depth`](crate::Options::max_depth)
    #[error("Nesting too deep: {depth} exceeds limit of {max}")]
    NestingTooDeep {
        /// Depth reached
        depth: usize,
        /// Configured limit
        max: usize,
    },

    /// Seed text or JSON could not be understood
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),
}

impl Error {
    pub(crate) fn unsupported(kind: impl Into<String>, line: u32) -> Self {
        Error::UnsupportedConstruct {
            kind: kind.into(),
            line,
        }
    }

    pub(crate) fn evaluation(message: impl Into<String>, line: u32) -> Self {
        Error::EvaluationError {
            message: message.into(),
            line,
        }
    }
}

/// Result type alias for pathlight operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_names_kind_and_line() {
        let err = Error::unsupported("ForStatement", 3);
        assert_eq!(err.to_string(), "Unsupported construct: ForStatement (line 3)");
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let err: Error = ParseError::new("unexpected `)`").into();
        assert_eq!(err.to_string(), "Parse error: unexpected `)`");
    }
}
