//! Substitution options

/// Configuration for one substitution request.
///
/// Passed through every handler; it controls the nesting limit and
/// per-node tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Maximum nesting depth of the walk (stack overflow protection)
    pub max_depth: usize,

    /// Whether to emit a `trace!` event for every dispatched node
    pub trace: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: 256,
            trace: false,
        }
    }
}

impl Options {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options with a custom nesting limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Enable or disable per-node tracing.
    pub fn traced(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
