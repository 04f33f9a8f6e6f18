//! Script frontend: JavaScript source text

use crate::frontend::{Frontend, ParseError};
use crate::syntax::{self, Program};

/// Frontend over JavaScript source text.
///
/// # Example
///
/// ```
/// use pathlight::frontends::ScriptFrontend;
/// use pathlight::Frontend;
///
/// let frontend = ScriptFrontend::new();
/// let program = frontend.parse("let x = 5;").unwrap();
/// assert_eq!(program.body.len(), 1);
/// assert_eq!(frontend.name(), "script");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptFrontend;

impl ScriptFrontend {
    /// Create a new script frontend.
    pub fn new() -> Self {
        Self
    }
}

impl Frontend for ScriptFrontend {
    fn parse(&self, input: &str) -> Result<Program, ParseError> {
        syntax::parse(input)
    }

    fn name(&self) -> &str {
        "script"
    }
}
