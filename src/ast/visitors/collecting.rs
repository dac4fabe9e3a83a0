//! Generic node collection visitor.

use std::ops::ControlFlow;

use crate::ast::visit::{AstNode, VisitResult, Visitor};

/// Visitor that collects values produced by a node-matching closure.
///
/// The closure is applied on every `enter` event; returning `Some` pushes
/// the produced value, so collected values arrive in traversal order.
#[derive(Debug)]
pub struct CollectingVisitor<T, F> {
    matcher: F,
    items: Vec<T>,
}

impl<T, F> CollectingVisitor<T, F>
where
    F: for<'a> FnMut(AstNode<'a>) -> Option<T>,
{
    /// Creates a collecting visitor.
    pub fn new(matcher: F) -> Self {
        Self {
            matcher,
            items: Vec::new(),
        }
    }

    /// Returns collected values.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns collected values, consuming the visitor.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T, F> Visitor for CollectingVisitor<T, F>
where
    F: for<'a> FnMut(AstNode<'a>) -> Option<T>,
{
    type Break = ();

    fn enter(&mut self, node: AstNode<'_>) -> VisitResult<()> {
        if let Some(item) = (self.matcher)(node) {
            self.items.push(item);
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::Literal;
    use crate::ast::visit::Visitable;
    use crate::cypher;

    #[test]
    fn collects_literals_in_traversal_order() {
        let list = cypher::list_of(vec![
            Literal::from(1).into(),
            Literal::from("two").into(),
            Literal::from(3).into(),
        ]);

        let mut collector = CollectingVisitor::new(|node| match node {
            AstNode::Literal(literal) => Some(literal.as_string()),
            _ => None,
        });
        let _ = list.accept(&mut collector);

        assert_eq!(collector.items(), ["1", "'two'", "3"]);
    }
}
