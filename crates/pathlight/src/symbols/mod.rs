//! Symbol table with line- and condition-scoped value histories
//!
//! Every assignment appends a [`SymbolRecord`]; nothing is ever overwritten.
//! A lookup picks, among the records whose condition scope is still open at
//! the query point, the one declared nearest to the query line.
//!
//! # Example
//!
//! ```
//! use pathlight::symbols::{Scope, SymbolTable};
//! use pathlight::term::Term;
//!
//! let mut table = SymbolTable::new();
//! table.push("x", 1, &Scope::root(), Term::number(1.0));
//! table.push("x", 9, &Scope::root(), Term::number(9.0));
//!
//! let near_top = table.resolve("x", 3, &Scope::root()).unwrap();
//! assert_eq!(near_top.value, Term::number(1.0));
//! ```

mod scope;
mod seed;

pub use scope::{ElifChain, Scope};
pub use seed::{SeedRecord, SeedValue, Seeds};

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::term::Term;

/// One recorded value of a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolRecord {
    /// Line of the declaration or assignment
    pub decl_line: u32,
    /// Conditions open when the value was written
    pub scope: Scope,
    /// Substituted value
    pub value: Term,
    /// Table-wide insertion stamp
    pub seq: usize,
}

/// Value histories by name, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    records: IndexMap<String, Vec<SymbolRecord>>,
    next_seq: usize,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the caller's seed records.
    pub fn from_seeds(seeds: &Seeds) -> Self {
        let mut table = Self::new();
        for (name, records) in seeds.iter() {
            for record in records {
                let scope = Scope::from(record.conditions.clone());
                table.push(name, record.line, &scope, record.value.to_term());
            }
        }
        table
    }

    /// Append a record, returning its stamp.
    pub fn push(&mut self, name: &str, line: u32, scope: &Scope, value: Term) -> usize {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.records
            .entry(name.to_string())
            .or_default()
            .push(SymbolRecord {
                decl_line: line,
                scope: scope.clone(),
                value,
                seq,
            });
        seq
    }

    /// Stamp the next record will get.
    pub fn stamp(&self) -> usize {
        self.next_seq
    }

    /// Whether any record exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Every record of `name`, oldest first.
    pub fn history(&self, name: &str) -> &[SymbolRecord] {
        self.records.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nearest visible record of `name` from `line` inside `scope`.
    ///
    /// # Errors
    ///
    /// `UnresolvedVariable` when no record of `name` is visible.
    pub fn resolve(&self, name: &str, line: u32, scope: &Scope) -> Result<&SymbolRecord> {
        self.resolve_within(name, line, scope, usize::MAX)
            .ok_or_else(|| Error::UnresolvedVariable {
                name: name.to_string(),
                line,
            })
    }

    /// Like [`resolve`](Self::resolve), over the records stamped before
    /// `horizon` only.
    pub fn resolve_within(
        &self,
        name: &str,
        line: u32,
        scope: &Scope,
        horizon: usize,
    ) -> Option<&SymbolRecord> {
        let mut best: Option<(&SymbolRecord, u32)> = None;
        for record in self.history(name) {
            if record.seq >= horizon || !scope.covers(&record.scope) {
                continue;
            }
            let distance = line.abs_diff(record.decl_line);
            // Strictly closer only: the first record found wins a tie
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((record, distance));
            }
        }
        best.map(|(record, _)| record)
    }
}
