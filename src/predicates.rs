//! Predicate functions: `exists` and the quantified list predicates.

use crate::ast::condition::{Condition, ListPredicate, ListPredicateKind};
use crate::ast::expression::{Expression, FunctionInvocation, SymbolicName};
use crate::error::Result;

/// `exists(expression)` as a condition.
///
/// Accepts anything expressible, notably properties and relationship
/// patterns.
pub fn exists(expression: impl Into<Expression>) -> Condition {
    FunctionInvocation::new("exists", vec![expression.into()]).as_condition()
}

/// Starts `all(variable IN list WHERE ...)`.
pub fn all(variable: &str) -> Result<OngoingListPredicate> {
    OngoingListPredicate::start(ListPredicateKind::All, variable)
}

/// Starts `any(variable IN list WHERE ...)`.
pub fn any(variable: &str) -> Result<OngoingListPredicate> {
    OngoingListPredicate::start(ListPredicateKind::Any, variable)
}

/// Starts `none(variable IN list WHERE ...)`.
pub fn none(variable: &str) -> Result<OngoingListPredicate> {
    OngoingListPredicate::start(ListPredicateKind::None, variable)
}

/// Starts `single(variable IN list WHERE ...)`.
pub fn single(variable: &str) -> Result<OngoingListPredicate> {
    OngoingListPredicate::start(ListPredicateKind::Single, variable)
}

/// A list predicate waiting for its list.
#[derive(Debug, Clone)]
pub struct OngoingListPredicate {
    kind: ListPredicateKind,
    variable: SymbolicName,
}

impl OngoingListPredicate {
    fn start(kind: ListPredicateKind, variable: &str) -> Result<Self> {
        Ok(Self {
            kind,
            variable: SymbolicName::new(variable)?,
        })
    }

    /// Supplies the list iterated over.
    pub fn in_list(self, list: impl Into<Expression>) -> OngoingListPredicateWithList {
        OngoingListPredicateWithList {
            kind: self.kind,
            variable: self.variable,
            list: list.into(),
        }
    }
}

/// A list predicate waiting for its per-element condition.
#[derive(Debug, Clone)]
pub struct OngoingListPredicateWithList {
    kind: ListPredicateKind,
    variable: SymbolicName,
    list: Expression,
}

impl OngoingListPredicateWithList {
    /// Supplies the per-element condition, completing the predicate.
    pub fn where_(self, predicate: Condition) -> Condition {
        Condition::ListPredicate(Box::new(ListPredicate {
            kind: self.kind,
            variable: self.variable,
            list: Box::new(self.list),
            predicate: Box::new(predicate),
        }))
    }
}
