//! Boolean conditions: comparisons, compound conditions, label checks and
//! list predicates.
//!
//! Conditions compose through [`Condition::and`], [`Condition::or`] and
//! [`Condition::xor`]. Chaining the same connective flattens into a single
//! n-ary compound; a different connective nests the existing compound as one
//! operand. [`Condition::Empty`] is the identity: it disappears from any
//! combination, which lets builders accumulate optional filters without
//! special-casing "no condition yet".

use crate::ast::expression::{Expression, FunctionInvocation, SymbolicName};
use crate::ast::operator::{Operator, OperatorFixity};
use crate::ast::pattern::NodeLabel;
use crate::error::{Error, Result};

// ============================================================================
// Comparisons
// ============================================================================

/// A unary or binary comparison.
///
/// Binary comparisons carry both operands; unary ones (IS NULL, NOT) carry
/// only the operand their fixity dictates.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Left operand; absent for prefix comparisons.
    pub left: Option<Box<Expression>>,
    /// The comparison operator.
    pub operator: Operator,
    /// Right operand; absent for postfix comparisons.
    pub right: Option<Box<Expression>>,
}

impl Comparison {
    /// Creates a binary comparison.
    ///
    /// Operands that are themselves conditions are parenthesized so that a
    /// comparison over a compound condition keeps its grouping.
    pub fn binary(
        left: impl Into<Expression>,
        operator: Operator,
        right: impl Into<Expression>,
    ) -> Self {
        Self {
            left: Some(Box::new(nest_conditions(left.into()))),
            operator,
            right: Some(Box::new(nest_conditions(right.into()))),
        }
    }

    /// Creates a unary comparison; the operator must be prefix or postfix.
    pub fn unary(operator: Operator, operand: impl Into<Expression>) -> Result<Self> {
        match operator.fixity() {
            OperatorFixity::Prefix => Ok(Self::prefix(operator, operand)),
            OperatorFixity::Postfix => Ok(Self::postfix(operand, operator)),
            _ => Err(Error::UnaryOperatorRequired {
                operator: operator.representation(),
            }),
        }
    }

    pub(crate) fn prefix(operator: Operator, operand: impl Into<Expression>) -> Self {
        Self {
            left: None,
            operator,
            right: Some(Box::new(nest_conditions(operand.into()))),
        }
    }

    pub(crate) fn postfix(operand: impl Into<Expression>, operator: Operator) -> Self {
        Self {
            left: Some(Box::new(nest_conditions(operand.into()))),
            operator,
            right: None,
        }
    }
}

fn nest_conditions(expression: Expression) -> Expression {
    match expression {
        Expression::Condition(_) => expression.nested(),
        other => other,
    }
}

// ============================================================================
// Compound conditions
// ============================================================================

/// An n-ary combination of conditions under one connective.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundCondition {
    /// The connective, AND, OR or XOR.
    pub operator: Operator,
    /// The combined conditions; at least two after construction.
    pub conditions: Vec<Condition>,
}

// ============================================================================
// Label conditions and list predicates
// ============================================================================

/// A label check on a named node, `n:Label1:Label2`.
#[derive(Debug, Clone, PartialEq)]
pub struct HasLabelCondition {
    /// The checked node's name.
    pub name: SymbolicName,
    /// The labels that must all be present.
    pub labels: Vec<NodeLabel>,
}

impl HasLabelCondition {
    /// Creates a label check; at least one non-blank label is required.
    pub fn create(name: SymbolicName, labels: &[&str]) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::MissingInput { what: "label list" });
        }
        let labels = labels
            .iter()
            .map(|label| NodeLabel::new(label))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { name, labels })
    }
}

/// The quantifier of a list predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPredicateKind {
    /// All elements must satisfy the predicate.
    All,
    /// At least one element must satisfy it.
    Any,
    /// No element may satisfy it.
    None,
    /// Exactly one element must satisfy it.
    Single,
}

impl ListPredicateKind {
    /// The surface function name of this quantifier.
    pub fn function_name(&self) -> &'static str {
        match self {
            ListPredicateKind::All => "all",
            ListPredicateKind::Any => "any",
            ListPredicateKind::None => "none",
            ListPredicateKind::Single => "single",
        }
    }
}

/// A quantified predicate over a list, `all(x IN list WHERE predicate)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPredicate {
    /// The quantifier.
    pub kind: ListPredicateKind,
    /// The iteration variable.
    pub variable: SymbolicName,
    /// The list iterated over.
    pub list: Box<Expression>,
    /// The per-element predicate.
    pub predicate: Box<Condition>,
}

// ============================================================================
// The condition sum type
// ============================================================================

/// Any boolean condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The neutral condition; dropped from any combination.
    Empty,
    /// A unary or binary comparison.
    Comparison(Box<Comparison>),
    /// An n-ary AND/OR/XOR combination.
    Compound(Box<CompoundCondition>),
    /// A label check on a named node.
    HasLabel(HasLabelCondition),
    /// A quantified list predicate.
    ListPredicate(Box<ListPredicate>),
    /// A boolean-valued function invocation, e.g. `exists(...)`.
    BooleanFunction(Box<FunctionInvocation>),
}

impl Condition {
    /// `self AND other`
    pub fn and(self, other: Condition) -> Condition {
        self.chain(Operator::And, other)
    }

    /// `self OR other`
    pub fn or(self, other: Condition) -> Condition {
        self.chain(Operator::Or, other)
    }

    /// `self XOR other`
    pub fn xor(self, other: Condition) -> Condition {
        self.chain(Operator::Xor, other)
    }

    /// `NOT (self)`
    pub fn not(self) -> Condition {
        Condition::Comparison(Box::new(Comparison::prefix(
            Operator::Not,
            Expression::from(self),
        )))
    }

    /// Whether this is the neutral [`Condition::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Condition::Empty)
    }

    fn chain(self, operator: Operator, other: Condition) -> Condition {
        match (self, other) {
            (Condition::Empty, other) => other,
            (this, Condition::Empty) => this,
            (Condition::Compound(mut compound), other) if compound.operator == operator => {
                match other {
                    Condition::Compound(nested) if nested.operator == operator => {
                        compound.conditions.extend(nested.conditions);
                    }
                    other => compound.conditions.push(other),
                }
                Condition::Compound(compound)
            }
            (this, Condition::Compound(nested)) if nested.operator == operator => {
                let mut conditions = Vec::with_capacity(1 + nested.conditions.len());
                conditions.push(this);
                conditions.extend(nested.conditions);
                Condition::Compound(Box::new(CompoundCondition {
                    operator,
                    conditions,
                }))
            }
            (this, other) => Condition::Compound(Box::new(CompoundCondition {
                operator,
                conditions: vec![this, other],
            })),
        }
    }
}

impl From<Comparison> for Condition {
    fn from(value: Comparison) -> Self {
        Condition::Comparison(Box::new(value))
    }
}
