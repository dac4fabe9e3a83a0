//! Clause nodes: the reading and updating clauses plus projection
//! sub-clauses (ORDER BY, SKIP, LIMIT).

use crate::ast::condition::Condition;
use crate::ast::expression::{Expression, ExpressionList, Literal, SymbolicName};
use crate::ast::pattern::PatternElement;
use crate::error::{Error, Result};

// ============================================================================
// Patterns and WHERE
// ============================================================================

/// The comma-separated pattern list of a MATCH, CREATE or MERGE.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    /// The pattern elements in order; never empty.
    pub elements: Vec<PatternElement>,
}

impl Pattern {
    /// Creates a pattern; at least one element is required.
    pub fn new(elements: Vec<PatternElement>) -> Result<Self> {
        if elements.is_empty() {
            return Err(Error::MissingInput { what: "pattern" });
        }
        Ok(Self { elements })
    }
}

/// A WHERE sub-clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    /// The filter condition.
    pub condition: Condition,
}

// ============================================================================
// Reading clauses
// ============================================================================

/// A MATCH clause, optionally OPTIONAL MATCH, with an optional WHERE.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Whether this is an OPTIONAL MATCH.
    pub optional: bool,
    /// The matched pattern.
    pub pattern: Pattern,
    /// The attached filter, if any.
    pub where_: Option<Where>,
}

/// An UNWIND clause, `UNWIND expression AS variable`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unwind {
    /// The unwound list expression.
    pub expression: Expression,
    /// The element variable.
    pub variable: SymbolicName,
}

// ============================================================================
// Updating clauses
// ============================================================================

/// A CREATE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Create {
    /// The created pattern.
    pub pattern: Pattern,
}

/// A MERGE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    /// The merged pattern.
    pub pattern: Pattern,
}

/// A DELETE clause, optionally DETACH DELETE.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Whether relationships are deleted along with the nodes.
    pub detach: bool,
    /// The deleted expressions.
    pub expressions: ExpressionList,
}

/// A SET clause. Its expressions are always structured operations after
/// the builder's normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    /// The assignment operations.
    pub operations: ExpressionList,
}

/// A REMOVE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Remove {
    /// The removed properties or labels.
    pub expressions: ExpressionList,
}

// ============================================================================
// Projections: WITH, RETURN and their sub-clauses
// ============================================================================

/// The direction of a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order.
    Ascending,
    /// Descending order.
    Descending,
}

impl SortDirection {
    /// The keyword for this direction.
    pub fn symbol(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// One sort key of an ORDER BY.
#[derive(Debug, Clone, PartialEq)]
pub struct SortItem {
    /// The sorted expression.
    pub expression: Expression,
    /// The direction; absent means the engine default.
    pub direction: Option<SortDirection>,
}

impl SortItem {
    /// A sort key without an explicit direction.
    pub fn of(expression: impl Into<Expression>) -> Self {
        Self {
            expression: expression.into(),
            direction: None,
        }
    }

    /// Returns this key with ascending direction.
    pub fn ascending(mut self) -> Self {
        self.direction = Some(SortDirection::Ascending);
        self
    }

    /// Returns this key with descending direction.
    pub fn descending(mut self) -> Self {
        self.direction = Some(SortDirection::Descending);
        self
    }
}

/// An ORDER BY sub-clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// The sort keys in order.
    pub items: Vec<SortItem>,
}

/// A SKIP sub-clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Skip {
    /// The number of skipped rows.
    pub value: Literal,
}

impl Skip {
    /// Skips the given number of rows.
    pub fn of(count: i64) -> Self {
        Self {
            value: Literal::Integer(count),
        }
    }
}

/// A LIMIT sub-clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    /// The maximum number of rows.
    pub value: Literal,
}

impl Limit {
    /// Limits the result to the given number of rows.
    pub fn of(count: i64) -> Self {
        Self {
            value: Literal::Integer(count),
        }
    }
}

/// A WITH clause: a projection that also delimits query parts.
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    /// Whether the projection is DISTINCT.
    pub distinct: bool,
    /// The projected items.
    pub items: ExpressionList,
    /// Optional ordering.
    pub order: Option<Order>,
    /// Optional row skip.
    pub skip: Option<Skip>,
    /// Optional row limit.
    pub limit: Option<Limit>,
    /// Optional filter applied after the projection.
    pub where_: Option<Where>,
}

/// A RETURN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    /// Whether the projection is DISTINCT.
    pub distinct: bool,
    /// The projected items.
    pub items: ExpressionList,
    /// Optional ordering.
    pub order: Option<Order>,
    /// Optional row skip.
    pub skip: Option<Skip>,
    /// Optional row limit.
    pub limit: Option<Limit>,
}

// ============================================================================
// The clause sum type
// ============================================================================

/// Any clause that can appear in the body of a query part.
///
/// WITH and RETURN are not part of this enum: WITH delimits query parts and
/// RETURN terminates a single part, so the statement containers carry them
/// in dedicated positions.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// A (OPTIONAL) MATCH.
    Match(Match),
    /// An UNWIND.
    Unwind(Unwind),
    /// A CREATE.
    Create(Create),
    /// A MERGE.
    Merge(Merge),
    /// A (DETACH) DELETE.
    Delete(Delete),
    /// A SET.
    Set(Set),
    /// A REMOVE.
    Remove(Remove),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pattern_is_rejected() {
        assert!(matches!(
            Pattern::new(Vec::new()),
            Err(Error::MissingInput { what: "pattern" })
        ));
    }

    #[test]
    fn sort_item_directions() {
        let item = SortItem::of(Expression::Literal(Literal::from(1)));
        assert!(item.direction.is_none());
        assert_eq!(
            item.clone().ascending().direction,
            Some(SortDirection::Ascending)
        );
        assert_eq!(item.descending().direction, Some(SortDirection::Descending));
        assert_eq!(SortDirection::Descending.symbol(), "DESC");
    }
}
