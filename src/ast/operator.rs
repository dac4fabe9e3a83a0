//! The closed operator set and structured operations.
//!
//! Operators carry their textual representation and a fixity so that a
//! traversal consumer knows where the operator sits relative to its
//! operands. [`Operation`] is the generic "operand(s) plus operator" node
//! used for arithmetic, string concatenation and the SET/REMOVE update
//! forms.

use crate::ast::expression::Expression;
use crate::ast::pattern::{Named, Node, NodeLabel};
use crate::error::{Error, Result};

// ============================================================================
// Operators
// ============================================================================

/// Where an operator sits relative to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorFixity {
    /// Two operands, operator between them.
    Binary,
    /// One operand, operator before it.
    Prefix,
    /// One operand, operator after it.
    Postfix,
    /// Property assignment and mutation (`=`, `+=`).
    Property,
    /// Label manipulation; has no textual operator of its own.
    Label,
}

/// All operators the query language knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    // Arithmetic.
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    Exponent,
    // Comparison.
    Equality,
    Inequality,
    LessThan,
    GreaterThan,
    LessThanOrEqualTo,
    GreaterThanOrEqualTo,
    StartsWith,
    EndsWith,
    Contains,
    In,
    Matches,
    // Unary null checks.
    IsNull,
    IsNotNull,
    // Boolean connectives.
    And,
    Or,
    Xor,
    Not,
    // String concatenation.
    Concat,
    // Property updates.
    Set,
    Mutate,
    // Label updates.
    SetLabel,
    RemoveLabel,
}

impl Operator {
    /// The textual form of this operator.
    pub fn representation(&self) -> &'static str {
        match self {
            Operator::Addition => "+",
            Operator::Subtraction => "-",
            Operator::Multiplication => "*",
            Operator::Division => "/",
            Operator::Modulo => "%",
            Operator::Exponent => "^",
            Operator::Equality => "=",
            Operator::Inequality => "<>",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessThanOrEqualTo => "<=",
            Operator::GreaterThanOrEqualTo => ">=",
            Operator::StartsWith => "STARTS WITH",
            Operator::EndsWith => "ENDS WITH",
            Operator::Contains => "CONTAINS",
            Operator::In => "IN",
            Operator::Matches => "=~",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::Not => "NOT",
            Operator::Concat => "+",
            Operator::Set => "=",
            Operator::Mutate => "+=",
            Operator::SetLabel | Operator::RemoveLabel => "",
        }
    }

    /// The fixity of this operator.
    pub fn fixity(&self) -> OperatorFixity {
        match self {
            Operator::IsNull | Operator::IsNotNull => OperatorFixity::Postfix,
            Operator::Not => OperatorFixity::Prefix,
            Operator::Set | Operator::Mutate => OperatorFixity::Property,
            Operator::SetLabel | Operator::RemoveLabel => OperatorFixity::Label,
            _ => OperatorFixity::Binary,
        }
    }

    /// Whether the operator takes exactly one operand.
    pub fn is_unary(&self) -> bool {
        matches!(
            self.fixity(),
            OperatorFixity::Prefix | OperatorFixity::Postfix
        )
    }
}

// ============================================================================
// Operations
// ============================================================================

/// The right-hand side of an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOperand {
    /// An ordinary expression operand.
    Expression(Box<Expression>),
    /// A label list, used by the label-manipulating SET and REMOVE forms.
    Labels(Vec<NodeLabel>),
}

/// A binary operation over expressions, or an update operation.
///
/// ```text
/// n.age + 1          infix arithmetic
/// n.name = 'Thomas'  property assignment (SET)
/// n:Label1:Label2    label assignment (SET/REMOVE)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Left operand.
    pub left: Box<Expression>,
    /// The operator joining the operands.
    pub operator: Operator,
    /// Right operand.
    pub right: OperationOperand,
}

impl Operation {
    pub(crate) fn infix(
        left: impl Into<Expression>,
        operator: Operator,
        right: impl Into<Expression>,
    ) -> Self {
        Self {
            left: Box::new(left.into()),
            operator,
            right: OperationOperand::Expression(Box::new(right.into())),
        }
    }

    /// Creates a property assignment, as used inside a SET clause.
    pub fn set(target: impl Into<Expression>, value: impl Into<Expression>) -> Self {
        Self::infix(target, Operator::Set, value)
    }

    /// Creates a property mutation (`+=`), merging a map into an entity.
    pub fn mutate(target: impl Into<Expression>, value: impl Into<Expression>) -> Self {
        Self::infix(target, Operator::Mutate, value)
    }

    /// Creates a label assignment for a named node.
    ///
    /// Fails when the node has no symbolic name or a label is blank.
    pub fn set_labels(node: &Node, labels: &[&str]) -> Result<Self> {
        Self::label_operation(node, Operator::SetLabel, labels)
    }

    /// Creates a label removal for a named node.
    pub fn remove_labels(node: &Node, labels: &[&str]) -> Result<Self> {
        Self::label_operation(node, Operator::RemoveLabel, labels)
    }

    fn label_operation(node: &Node, operator: Operator, labels: &[&str]) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::MissingInput { what: "label list" });
        }
        let name = node.required_symbolic_name()?;
        let labels = labels
            .iter()
            .map(|label| NodeLabel::new(label))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            left: Box::new(Expression::SymbolicName(name)),
            operator,
            right: OperationOperand::Labels(labels),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixities() {
        assert_eq!(Operator::IsNull.fixity(), OperatorFixity::Postfix);
        assert_eq!(Operator::Not.fixity(), OperatorFixity::Prefix);
        assert_eq!(Operator::Equality.fixity(), OperatorFixity::Binary);
        assert_eq!(Operator::Mutate.fixity(), OperatorFixity::Property);
        assert_eq!(Operator::SetLabel.fixity(), OperatorFixity::Label);
        assert!(Operator::IsNotNull.is_unary());
        assert!(!Operator::And.is_unary());
    }

    #[test]
    fn representations() {
        assert_eq!(Operator::StartsWith.representation(), "STARTS WITH");
        assert_eq!(Operator::Inequality.representation(), "<>");
        assert_eq!(Operator::Mutate.representation(), "+=");
    }
}
