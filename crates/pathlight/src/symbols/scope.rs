//! Condition scopes and else/else-if lineage

use indexmap::IndexMap;

/// Line numbers of the conditions and loops enclosing a point of the walk,
/// outermost first.
///
/// Scopes are values: entering a body derives a new scope and leaves the
/// enclosing one untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Scope(Vec<u32>);

impl Scope {
    /// The empty scope of top-level code.
    pub fn root() -> Self {
        Self::default()
    }

    /// Scope of a body whose condition is on `line`.
    pub fn enter(&self, line: u32) -> Scope {
        let mut lines = self.0.clone();
        lines.push(line);
        Scope(lines)
    }

    /// Scope of an else/else-if body: inherited lineage, then its own line.
    pub fn enter_chain(&self, lineage: &[u32], line: u32) -> Scope {
        let mut lines = self.0.clone();
        lines.extend_from_slice(lineage);
        lines.push(line);
        Scope(lines)
    }

    /// Whether every condition in `other` is also open here.
    pub fn covers(&self, other: &Scope) -> bool {
        other.0.iter().all(|line| self.0.contains(line))
    }

    /// The condition lines, outermost first.
    pub fn lines(&self) -> &[u32] {
        &self.0
    }
}

impl From<Vec<u32>> for Scope {
    fn from(lines: Vec<u32>) -> Self {
        Scope(lines)
    }
}

/// Lineage of each branch of an if/else-if/else chain.
///
/// Keyed by the line that introduces the branch; the value lists the
/// condition lines of the branches before it, outermost first.
#[derive(Debug, Clone, Default)]
pub struct ElifChain {
    links: IndexMap<u32, Vec<u32>>,
}

impl ElifChain {
    /// Create an empty chain table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the head `if` of a chain.
    pub fn start(&mut self, line: u32) {
        self.links.insert(line, Vec::new());
    }

    /// Register a branch introduced on `line` that follows the branch on
    /// `previous`, returning its lineage.
    pub fn extend(&mut self, line: u32, previous: u32) -> Vec<u32> {
        let mut lineage = self.lineage(previous).to_vec();
        lineage.push(previous);
        self.links.insert(line, lineage.clone());
        lineage
    }

    /// Lineage recorded for a branch line. Empty for a chain head or an
    /// unknown line.
    pub fn lineage(&self, line: u32) -> &[u32] {
        self.links.get(&line).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_leaves_parent_untouched() {
        let outer = Scope::root().enter(3);
        let inner = outer.enter(5);
        assert_eq!(outer.lines(), &[3]);
        assert_eq!(inner.lines(), &[3, 5]);
    }

    #[test]
    fn test_covers_subset() {
        let scope = Scope::from(vec![2, 4, 6]);
        assert!(scope.covers(&Scope::root()));
        assert!(scope.covers(&Scope::from(vec![6, 2])));
        assert!(!scope.covers(&Scope::from(vec![3])));
        assert!(!Scope::root().covers(&Scope::from(vec![2])));
    }

    #[test]
    fn test_chain_accumulates_lineage() {
        let mut chain = ElifChain::new();
        chain.start(3);
        assert_eq!(chain.extend(6, 3), vec![3]);
        assert_eq!(chain.extend(9, 6), vec![3, 6]);
        assert_eq!(chain.lineage(9), &[3, 6]);
        assert_eq!(chain.lineage(42), &[] as &[u32]);
    }
}
