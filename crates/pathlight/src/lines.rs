//! Sparse, column-addressed output lines
//!
//! Handlers write each piece of output at the source position it came from.
//! Rebuilding a line pads with spaces up to each fragment's column, so the
//! original indentation survives substitution. A fragment longer than the
//! gap to the next one simply pushes it right.

use std::collections::BTreeMap;

use crate::symbols::Scope;
use crate::syntax::Position;
use crate::term::Term;

/// What produced a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Top-level `let`/`const`/`var` line
    Declaration,
    /// `function name (params)`
    Signature,
    /// `while(cond)`
    Loop,
    /// `return expr;`
    Return,
    /// `if (cond) ` or `else if (cond) `
    Condition,
    /// Assignment to an input
    Assignment,
    /// Braces and `else`
    Punctuation,
}

/// A piece of text placed at a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Output text
    pub text: String,
    /// Producer
    pub kind: FragmentKind,
}

/// Everything needed to re-evaluate a conditional line's condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    /// The substituted condition
    pub condition: Term,
    /// Line the condition was written on
    pub line: u32,
    /// Scope the condition was read in
    pub scope: Scope,
    /// Symbol table stamp at the time the condition was read
    pub horizon: usize,
}

/// Output lines under construction.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    lines: BTreeMap<u32, BTreeMap<u32, Fragment>>,
    probes: BTreeMap<u32, Vec<Probe>>,
}

impl LineBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place text at a position. A later write to the same column wins.
    pub fn write(&mut self, at: Position, text: impl Into<String>, kind: FragmentKind) {
        self.lines.entry(at.line).or_default().insert(
            at.column,
            Fragment {
                text: text.into(),
                kind,
            },
        );
    }

    /// Attach a condition probe to a line.
    pub fn probe(&mut self, line: u32, probe: Probe) {
        self.probes.entry(line).or_default().push(probe);
    }

    /// Probes attached to a line.
    pub fn probes(&self, line: u32) -> &[Probe] {
        self.probes.get(&line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Line numbers that hold fragments, ascending.
    pub fn line_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.lines.keys().copied()
    }

    /// Whether a line holds a condition fragment.
    pub fn is_conditional(&self, line: u32) -> bool {
        self.lines
            .get(&line)
            .is_some_and(|cols| cols.values().any(|f| f.kind == FragmentKind::Condition))
    }

    /// Rebuilt text of a line. Empty if nothing was written to it.
    pub fn text(&self, line: u32) -> String {
        let mut out = String::new();
        let Some(cols) = self.lines.get(&line) else {
            return out;
        };
        let mut width = 0usize;
        for (&column, fragment) in cols {
            while width < column as usize {
                out.push(' ');
                width += 1;
            }
            out.push_str(&fragment.text);
            width += fragment.text.chars().count();
        }
        out
    }
}
