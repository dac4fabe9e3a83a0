//! Variable collection visitor.

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use smol_str::SmolStr;

use crate::ast::visit::{AstNode, VisitResult, Visitable, Visitor};

/// Collects the symbolic names referenced anywhere in a subtree.
///
/// Node names, relationship names, path names, iteration variables and
/// plain name expressions all surface as symbolic name events, so one
/// visitor covers them all.
#[derive(Debug, Clone, Default)]
pub struct VariableCollector {
    names: BTreeSet<SmolStr>,
}

impl VariableCollector {
    /// Creates a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects all symbolic names from a single subtree.
    pub fn names_of(visitable: &impl Visitable) -> BTreeSet<SmolStr> {
        let mut collector = Self::new();
        let _ = visitable.accept(&mut collector);
        collector.names
    }

    /// Returns the collected names.
    pub fn names(&self) -> &BTreeSet<SmolStr> {
        &self.names
    }

    /// Returns the collected names and consumes this collector.
    pub fn into_names(self) -> BTreeSet<SmolStr> {
        self.names
    }
}

impl Visitor for VariableCollector {
    type Break = ();

    fn enter(&mut self, node: AstNode<'_>) -> VisitResult<()> {
        if let AstNode::SymbolicName(name) = node {
            self.names.insert(SmolStr::new(name.value()));
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::pattern::Node;

    #[test]
    fn collects_names_across_a_pattern() {
        let actor = Node::new("Person", &[]).unwrap().named("a").unwrap();
        let movie = Node::new("Movie", &[]).unwrap().named("m").unwrap();
        let acted_in = actor
            .relationship_to(&movie, &["ACTED_IN"])
            .unwrap()
            .named("r")
            .unwrap();

        let names = VariableCollector::names_of(&acted_in);
        let collected: Vec<&str> = names.iter().map(SmolStr::as_str).collect();
        assert_eq!(collected, ["a", "m", "r"]);
    }
}
