//! The grammar-constrained fluent statement builder.
//!
//! Each builder state exposes exactly the continuations the query grammar
//! allows at that point, so an illegal clause order does not compile. The
//! states consume `self` by value and thread a [`StatementAccumulator`]
//! through the chain; open clauses (a MATCH collecting its WHERE, a WITH
//! collecting its ordering) live inside the state itself and are sealed
//! into the accumulator on the next transition.
//!
//! Validation that cannot be expressed in types (a query ending in a bare
//! MATCH, an odd SET expression list) surfaces as [`Error`] from the
//! transition that detects it.

use crate::ast::clause::{
    Clause, Create, Delete, Limit, Match, Merge, Order, Pattern, Remove, Return, Set, Skip,
    SortDirection, SortItem, Unwind, Where, With,
};
use crate::ast::condition::Condition;
use crate::ast::expression::{Expression, ExpressionList, SymbolicName};
use crate::ast::operator::Operation;
use crate::ast::pattern::{Node, PatternElement};
use crate::ast::statement::{MultiPartElement, MultiPartQuery, SinglePartQuery, Statement};
use crate::error::{Error, Result};

// ============================================================================
// The accumulator and open-clause builders
// ============================================================================

/// The clauses gathered so far, split at every WITH.
#[derive(Debug, Clone, Default)]
pub(crate) struct StatementAccumulator {
    clauses: Vec<Clause>,
    elements: Vec<MultiPartElement>,
}

impl StatementAccumulator {
    fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    fn seal_part(&mut self, with: With) {
        self.elements.push(MultiPartElement {
            clauses: std::mem::take(&mut self.clauses),
            with,
        });
    }

    fn build(self, return_: Option<Return>) -> Result<Statement> {
        let remainder = SinglePartQuery::create(self.clauses, return_)?;
        if self.elements.is_empty() {
            Ok(Statement::SinglePart(remainder))
        } else {
            Ok(Statement::MultiPart(MultiPartQuery {
                elements: self.elements,
                remainder,
            }))
        }
    }
}

/// An open MATCH gathering pattern elements and its WHERE condition.
#[derive(Debug, Clone)]
struct MatchBuilder {
    optional: bool,
    elements: Vec<PatternElement>,
    condition: Condition,
}

impl MatchBuilder {
    fn new(optional: bool, elements: Vec<PatternElement>) -> Self {
        Self {
            optional,
            elements,
            condition: Condition::Empty,
        }
    }

    fn into_clause(self) -> Result<Clause> {
        let where_ = if self.condition.is_empty() {
            None
        } else {
            Some(Where {
                condition: self.condition,
            })
        };
        Ok(Clause::Match(Match {
            optional: self.optional,
            pattern: Pattern::new(self.elements)?,
            where_,
        }))
    }
}

/// Pending ORDER BY / SKIP / LIMIT state shared by WITH and RETURN.
///
/// `stage` holds a sort expression whose direction is still open; the next
/// `ascending`/`descending` resolves it, anything else flushes it with the
/// engine-default direction.
#[derive(Debug, Clone, Default)]
struct OrderAccumulator {
    items: Vec<SortItem>,
    pending: Option<SortItem>,
    skip: Option<Skip>,
    limit: Option<Limit>,
}

impl OrderAccumulator {
    fn extend(&mut self, items: Vec<SortItem>) {
        self.flush();
        self.items.extend(items);
    }

    fn stage(&mut self, expression: Expression) {
        self.flush();
        self.pending = Some(SortItem::of(expression));
    }

    // Only a staged key takes a direction; already-resolved items keep
    // whatever was chosen for them.
    fn direct(&mut self, direction: SortDirection) {
        if let Some(pending) = self.pending.take() {
            self.items.push(SortItem {
                direction: Some(direction),
                ..pending
            });
        }
    }

    fn set_skip(&mut self, count: Option<i64>) {
        self.flush();
        self.skip = count.map(Skip::of);
    }

    fn set_limit(&mut self, count: Option<i64>) {
        self.flush();
        self.limit = count.map(Limit::of);
    }

    fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.items.push(pending);
        }
    }

    fn finish(mut self) -> (Option<Order>, Option<Skip>, Option<Limit>) {
        self.flush();
        let order = if self.items.is_empty() {
            None
        } else {
            Some(Order { items: self.items })
        };
        (order, self.skip, self.limit)
    }
}

/// An open WITH gathering its ordering and filter.
#[derive(Debug, Clone)]
struct WithBuilder {
    distinct: bool,
    items: Vec<Expression>,
    order: OrderAccumulator,
    condition: Condition,
}

impl WithBuilder {
    fn finish(self) -> With {
        let (order, skip, limit) = self.order.finish();
        let where_ = if self.condition.is_empty() {
            None
        } else {
            Some(Where {
                condition: self.condition,
            })
        };
        With {
            distinct: self.distinct,
            items: ExpressionList::new(self.items),
            order,
            skip,
            limit,
            where_,
        }
    }
}

/// An open RETURN gathering its ordering.
#[derive(Debug, Clone)]
struct ReturnBuilder {
    distinct: bool,
    items: Vec<Expression>,
    order: OrderAccumulator,
}

impl ReturnBuilder {
    fn finish(self) -> Return {
        let (order, skip, limit) = self.order.finish();
        Return {
            distinct: self.distinct,
            items: ExpressionList::new(self.items),
            order,
            skip,
            limit,
        }
    }
}

// ============================================================================
// SET normalization
// ============================================================================

/// Normalizes the expressions given to a SET clause.
///
/// Ready-made operations (assignments, mutations, label updates) pass
/// through untouched. All remaining expressions must come in consecutive
/// target/value pairs and are folded into assignments; a leftover target
/// without a value is rejected.
fn prepare_set_operations(expressions: Vec<Expression>) -> Result<ExpressionList> {
    let mut prepared = Vec::with_capacity(expressions.len());
    let mut pending: Option<Expression> = None;
    let mut loose = 0usize;
    for expression in expressions {
        if matches!(expression, Expression::Operation(_)) {
            prepared.push(expression);
            continue;
        }
        loose += 1;
        match pending.take() {
            None => pending = Some(expression),
            Some(target) => prepared.push(Operation::set(target, expression).into()),
        }
    }
    if pending.is_some() {
        return Err(Error::OddSetExpressionCount { count: loose });
    }
    Ok(ExpressionList::new(prepared))
}

// ============================================================================
// Builder states
// ============================================================================

/// The empty entry state; nothing has been accumulated yet.
#[derive(Debug, Clone, Default)]
pub struct StatementBuilder {
    acc: StatementAccumulator,
}

/// A reading query whose current MATCH has no WHERE yet.
#[derive(Debug, Clone)]
pub struct OngoingReadingWithoutWhere {
    acc: StatementAccumulator,
    match_: MatchBuilder,
}

/// A reading query whose current MATCH already has a WHERE.
#[derive(Debug, Clone)]
pub struct OngoingReadingWithWhere {
    acc: StatementAccumulator,
    match_: MatchBuilder,
}

/// An UNWIND waiting for its `AS variable`.
#[derive(Debug, Clone)]
pub struct OngoingUnwind {
    acc: StatementAccumulator,
    expression: Expression,
}

/// A query part ready for its next clause, with no clause currently open.
#[derive(Debug, Clone)]
pub struct OngoingReading {
    acc: StatementAccumulator,
}

/// A query whose latest clause updates the graph; may end without RETURN.
#[derive(Debug, Clone)]
pub struct OngoingUpdate {
    acc: StatementAccumulator,
}

/// An open WITH without a WHERE yet.
#[derive(Debug, Clone)]
pub struct OngoingWithWithoutWhere {
    acc: StatementAccumulator,
    with: WithBuilder,
}

/// An open WITH that already has a WHERE.
#[derive(Debug, Clone)]
pub struct OngoingWithWithWhere {
    acc: StatementAccumulator,
    with: WithBuilder,
}

/// A query terminated by RETURN; only ordering and `build` remain.
#[derive(Debug, Clone)]
pub struct OngoingReadingAndReturn {
    acc: StatementAccumulator,
    return_: ReturnBuilder,
}

/// A sort expression whose direction is still undecided.
#[derive(Debug, Clone)]
pub struct OngoingOrderDefinition {
    acc: StatementAccumulator,
    return_: ReturnBuilder,
}

/// An ordered RETURN; more sort keys or row bounds may follow.
#[derive(Debug, Clone)]
pub struct OngoingReadingAndReturnWithOrder {
    acc: StatementAccumulator,
    return_: ReturnBuilder,
}

// ============================================================================
// Shared transition bodies
// ============================================================================

fn open_match(
    acc: StatementAccumulator,
    optional: bool,
    elements: Vec<PatternElement>,
) -> OngoingReadingWithoutWhere {
    OngoingReadingWithoutWhere {
        acc,
        match_: MatchBuilder::new(optional, elements),
    }
}

fn push_update(mut acc: StatementAccumulator, clause: Clause) -> OngoingUpdate {
    acc.push(clause);
    OngoingUpdate { acc }
}

fn pattern_clause(elements: Vec<PatternElement>) -> Result<Pattern> {
    Pattern::new(elements)
}

fn open_with(
    acc: StatementAccumulator,
    distinct: bool,
    items: Vec<Expression>,
) -> Result<OngoingWithWithoutWhere> {
    if items.is_empty() {
        return Err(Error::MissingInput { what: "WITH items" });
    }
    Ok(OngoingWithWithoutWhere {
        acc,
        with: WithBuilder {
            distinct,
            items,
            order: OrderAccumulator::default(),
            condition: Condition::Empty,
        },
    })
}

fn open_return(
    acc: StatementAccumulator,
    distinct: bool,
    items: Vec<Expression>,
) -> Result<OngoingReadingAndReturn> {
    if items.is_empty() {
        return Err(Error::MissingInput {
            what: "RETURN items",
        });
    }
    Ok(OngoingReadingAndReturn {
        acc,
        return_: ReturnBuilder {
            distinct,
            items,
            order: OrderAccumulator::default(),
        },
    })
}

/// Generates the clause transitions shared by every state that can start a
/// new clause. Each state seals whatever it holds open via
/// `into_accumulator` first.
macro_rules! impl_clause_transitions {
    ($($state:ty),+ $(,)?) => {$(
        impl $state {
            /// Starts a MATCH with a single pattern element.
            pub fn match_(
                self,
                element: impl Into<PatternElement>,
            ) -> Result<OngoingReadingWithoutWhere> {
                Ok(open_match(self.into_accumulator()?, false, vec![element.into()]))
            }

            /// Starts a MATCH over several pattern elements.
            pub fn match_all(
                self,
                elements: Vec<PatternElement>,
            ) -> Result<OngoingReadingWithoutWhere> {
                Ok(open_match(self.into_accumulator()?, false, elements))
            }

            /// Starts an OPTIONAL MATCH.
            pub fn optional_match(
                self,
                element: impl Into<PatternElement>,
            ) -> Result<OngoingReadingWithoutWhere> {
                Ok(open_match(self.into_accumulator()?, true, vec![element.into()]))
            }

            /// Starts an UNWIND; the chain continues with [`OngoingUnwind::as_`].
            pub fn unwind(self, expression: impl Into<Expression>) -> Result<OngoingUnwind> {
                Ok(OngoingUnwind {
                    acc: self.into_accumulator()?,
                    expression: expression.into(),
                })
            }

            /// Adds a CREATE clause.
            pub fn create(self, element: impl Into<PatternElement>) -> Result<OngoingUpdate> {
                let acc = self.into_accumulator()?;
                let pattern = pattern_clause(vec![element.into()])?;
                Ok(push_update(acc, Clause::Create(Create { pattern })))
            }

            /// Adds a MERGE clause.
            pub fn merge(self, element: impl Into<PatternElement>) -> Result<OngoingUpdate> {
                let acc = self.into_accumulator()?;
                let pattern = pattern_clause(vec![element.into()])?;
                Ok(push_update(acc, Clause::Merge(Merge { pattern })))
            }

            /// Adds a DELETE clause.
            pub fn delete(self, expressions: Vec<Expression>) -> Result<OngoingUpdate> {
                let acc = self.into_accumulator()?;
                Ok(push_update(acc, Clause::Delete(Delete {
                    detach: false,
                    expressions: ExpressionList::new(expressions),
                })))
            }

            /// Adds a DETACH DELETE clause.
            pub fn detach_delete(self, expressions: Vec<Expression>) -> Result<OngoingUpdate> {
                let acc = self.into_accumulator()?;
                Ok(push_update(acc, Clause::Delete(Delete {
                    detach: true,
                    expressions: ExpressionList::new(expressions),
                })))
            }

            /// Adds a SET clause.
            ///
            /// Expressions that are already operations pass through; the rest
            /// must come in target/value pairs.
            pub fn set(self, expressions: Vec<Expression>) -> Result<OngoingUpdate> {
                let acc = self.into_accumulator()?;
                let operations = prepare_set_operations(expressions)?;
                Ok(push_update(acc, Clause::Set(Set { operations })))
            }

            /// Adds a SET clause assigning labels to a named node.
            pub fn set_labels(self, node: &Node, labels: &[&str]) -> Result<OngoingUpdate> {
                let acc = self.into_accumulator()?;
                let operation = Operation::set_labels(node, labels)?;
                Ok(push_update(acc, Clause::Set(Set {
                    operations: ExpressionList::new(vec![operation.into()]),
                })))
            }

            /// Adds a REMOVE clause dropping labels from a named node.
            pub fn remove_labels(self, node: &Node, labels: &[&str]) -> Result<OngoingUpdate> {
                let acc = self.into_accumulator()?;
                let operation = Operation::remove_labels(node, labels)?;
                Ok(push_update(acc, Clause::Remove(Remove {
                    expressions: ExpressionList::new(vec![operation.into()]),
                })))
            }

            /// Adds a REMOVE clause dropping properties.
            pub fn remove(self, expressions: Vec<Expression>) -> Result<OngoingUpdate> {
                let acc = self.into_accumulator()?;
                Ok(push_update(acc, Clause::Remove(Remove {
                    expressions: ExpressionList::new(expressions),
                })))
            }

            /// Opens a WITH projection, delimiting the current query part.
            pub fn with(self, items: Vec<Expression>) -> Result<OngoingWithWithoutWhere> {
                open_with(self.into_accumulator()?, false, items)
            }

            /// Opens a WITH DISTINCT projection.
            pub fn with_distinct(self, items: Vec<Expression>) -> Result<OngoingWithWithoutWhere> {
                open_with(self.into_accumulator()?, true, items)
            }

            /// Terminates the query with a RETURN.
            pub fn returning(self, items: Vec<Expression>) -> Result<OngoingReadingAndReturn> {
                open_return(self.into_accumulator()?, false, items)
            }

            /// Terminates the query with a RETURN DISTINCT.
            pub fn returning_distinct(
                self,
                items: Vec<Expression>,
            ) -> Result<OngoingReadingAndReturn> {
                open_return(self.into_accumulator()?, true, items)
            }
        }
    )+};
}

impl_clause_transitions!(
    StatementBuilder,
    OngoingReadingWithoutWhere,
    OngoingReadingWithWhere,
    OngoingReading,
    OngoingUpdate,
    OngoingWithWithoutWhere,
    OngoingWithWithWhere,
);

// ============================================================================
// State-specific continuations
// ============================================================================

impl StatementBuilder {
    fn into_accumulator(self) -> Result<StatementAccumulator> {
        Ok(self.acc)
    }
}

impl OngoingReadingWithoutWhere {
    /// Attaches a WHERE to the current MATCH.
    pub fn where_(mut self, condition: Condition) -> OngoingReadingWithWhere {
        self.match_.condition = condition;
        OngoingReadingWithWhere {
            acc: self.acc,
            match_: self.match_,
        }
    }

    /// Adds another element to the current MATCH pattern.
    pub fn and(mut self, element: impl Into<PatternElement>) -> Self {
        self.match_.elements.push(element.into());
        self
    }

    fn into_accumulator(self) -> Result<StatementAccumulator> {
        let mut acc = self.acc;
        acc.push(self.match_.into_clause()?);
        Ok(acc)
    }
}

impl OngoingReadingWithWhere {
    /// ANDs another condition onto the current WHERE.
    pub fn and(mut self, condition: Condition) -> Self {
        self.match_.condition = self.match_.condition.and(condition);
        self
    }

    /// ORs another condition onto the current WHERE.
    pub fn or(mut self, condition: Condition) -> Self {
        self.match_.condition = self.match_.condition.or(condition);
        self
    }

    /// XORs another condition onto the current WHERE.
    pub fn xor(mut self, condition: Condition) -> Self {
        self.match_.condition = self.match_.condition.xor(condition);
        self
    }

    fn into_accumulator(self) -> Result<StatementAccumulator> {
        let mut acc = self.acc;
        acc.push(self.match_.into_clause()?);
        Ok(acc)
    }
}

impl OngoingUnwind {
    /// Binds the unwound elements to a variable, completing the UNWIND.
    pub fn as_(self, variable: &str) -> Result<OngoingReading> {
        let variable = SymbolicName::new(variable)?;
        let mut acc = self.acc;
        acc.push(Clause::Unwind(Unwind {
            expression: self.expression,
            variable,
        }));
        Ok(OngoingReading { acc })
    }
}

impl OngoingReading {
    fn into_accumulator(self) -> Result<StatementAccumulator> {
        Ok(self.acc)
    }
}

impl OngoingUpdate {
    /// Finishes the statement without a RETURN.
    pub fn build(self) -> Result<Statement> {
        self.acc.build(None)
    }

    fn into_accumulator(self) -> Result<StatementAccumulator> {
        Ok(self.acc)
    }
}

impl OngoingWithWithoutWhere {
    /// Appends explicit sort keys to the WITH's ORDER BY.
    pub fn order_by(mut self, items: Vec<SortItem>) -> Self {
        self.with.order.extend(items);
        self
    }

    /// Stages a sort expression; `ascending`/`descending` resolve it.
    pub fn order_by_expr(mut self, expression: impl Into<Expression>) -> Self {
        self.with.order.stage(expression.into());
        self
    }

    /// Resolves the staged sort key to ascending; without one, a no-op.
    pub fn ascending(mut self) -> Self {
        self.with.order.direct(SortDirection::Ascending);
        self
    }

    /// Resolves the staged sort key to descending; without one, a no-op.
    pub fn descending(mut self) -> Self {
        self.with.order.direct(SortDirection::Descending);
        self
    }

    /// Sets the WITH's SKIP.
    pub fn skip(mut self, count: impl Into<Option<i64>>) -> Self {
        self.with.order.set_skip(count.into());
        self
    }

    /// Sets the WITH's LIMIT.
    pub fn limit(mut self, count: impl Into<Option<i64>>) -> Self {
        self.with.order.set_limit(count.into());
        self
    }

    /// Attaches a WHERE to the WITH.
    pub fn where_(mut self, condition: Condition) -> OngoingWithWithWhere {
        self.with.condition = condition;
        OngoingWithWithWhere {
            acc: self.acc,
            with: self.with,
        }
    }

    fn into_accumulator(self) -> Result<StatementAccumulator> {
        let mut acc = self.acc;
        acc.seal_part(self.with.finish());
        Ok(acc)
    }
}

impl OngoingWithWithWhere {
    /// ANDs another condition onto the WITH's WHERE.
    pub fn and(mut self, condition: Condition) -> Self {
        self.with.condition = self.with.condition.and(condition);
        self
    }

    /// ORs another condition onto the WITH's WHERE.
    pub fn or(mut self, condition: Condition) -> Self {
        self.with.condition = self.with.condition.or(condition);
        self
    }

    /// XORs another condition onto the WITH's WHERE.
    pub fn xor(mut self, condition: Condition) -> Self {
        self.with.condition = self.with.condition.xor(condition);
        self
    }

    fn into_accumulator(self) -> Result<StatementAccumulator> {
        let mut acc = self.acc;
        acc.seal_part(self.with.finish());
        Ok(acc)
    }
}

impl OngoingReadingAndReturn {
    /// Appends explicit sort keys to the ORDER BY.
    pub fn order_by(mut self, items: Vec<SortItem>) -> Self {
        self.return_.order.extend(items);
        self
    }

    /// Stages a sort expression whose direction is decided next.
    pub fn order_by_expr(mut self, expression: impl Into<Expression>) -> OngoingOrderDefinition {
        self.return_.order.stage(expression.into());
        OngoingOrderDefinition {
            acc: self.acc,
            return_: self.return_,
        }
    }

    /// Sets the RETURN's SKIP.
    pub fn skip(mut self, count: impl Into<Option<i64>>) -> Self {
        self.return_.order.set_skip(count.into());
        self
    }

    /// Sets the RETURN's LIMIT.
    pub fn limit(mut self, count: impl Into<Option<i64>>) -> Self {
        self.return_.order.set_limit(count.into());
        self
    }

    /// Finishes the statement.
    pub fn build(self) -> Result<Statement> {
        self.acc.build(Some(self.return_.finish()))
    }
}

impl OngoingOrderDefinition {
    /// Resolves the staged sort key to ascending.
    pub fn ascending(mut self) -> OngoingReadingAndReturnWithOrder {
        self.return_.order.direct(SortDirection::Ascending);
        OngoingReadingAndReturnWithOrder {
            acc: self.acc,
            return_: self.return_,
        }
    }

    /// Resolves the staged sort key to descending.
    pub fn descending(mut self) -> OngoingReadingAndReturnWithOrder {
        self.return_.order.direct(SortDirection::Descending);
        OngoingReadingAndReturnWithOrder {
            acc: self.acc,
            return_: self.return_,
        }
    }

    /// Stages another sort key; the previous one keeps the default direction.
    pub fn and(mut self, expression: impl Into<Expression>) -> OngoingOrderDefinition {
        self.return_.order.stage(expression.into());
        self
    }

    /// Sets SKIP; the staged key keeps the default direction.
    pub fn skip(mut self, count: impl Into<Option<i64>>) -> OngoingReadingAndReturn {
        self.return_.order.set_skip(count.into());
        OngoingReadingAndReturn {
            acc: self.acc,
            return_: self.return_,
        }
    }

    /// Sets LIMIT; the staged key keeps the default direction.
    pub fn limit(mut self, count: impl Into<Option<i64>>) -> OngoingReadingAndReturn {
        self.return_.order.set_limit(count.into());
        OngoingReadingAndReturn {
            acc: self.acc,
            return_: self.return_,
        }
    }

    /// Finishes the statement; the staged key keeps the default direction.
    pub fn build(self) -> Result<Statement> {
        self.acc.build(Some(self.return_.finish()))
    }
}

impl OngoingReadingAndReturnWithOrder {
    /// Stages another sort key.
    pub fn and(mut self, expression: impl Into<Expression>) -> OngoingOrderDefinition {
        self.return_.order.stage(expression.into());
        OngoingOrderDefinition {
            acc: self.acc,
            return_: self.return_,
        }
    }

    /// Sets the RETURN's SKIP.
    pub fn skip(mut self, count: impl Into<Option<i64>>) -> OngoingReadingAndReturn {
        self.return_.order.set_skip(count.into());
        OngoingReadingAndReturn {
            acc: self.acc,
            return_: self.return_,
        }
    }

    /// Sets the RETURN's LIMIT.
    pub fn limit(mut self, count: impl Into<Option<i64>>) -> OngoingReadingAndReturn {
        self.return_.order.set_limit(count.into());
        OngoingReadingAndReturn {
            acc: self.acc,
            return_: self.return_,
        }
    }

    /// Finishes the statement.
    pub fn build(self) -> Result<Statement> {
        self.acc.build(Some(self.return_.finish()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::Literal;
    use crate::ast::statement::Statement;

    fn person() -> Node {
        Node::new("Person", &[]).unwrap().named("n").unwrap()
    }

    fn build_simple_return(builder: OngoingReadingAndReturn) -> SinglePartQuery {
        match builder.build().unwrap() {
            Statement::SinglePart(query) => query,
            other => panic!("expected single-part statement, got {other:?}"),
        }
    }

    #[test]
    fn match_where_return_produces_a_single_part() {
        let n = person();
        let query = build_simple_return(
            StatementBuilder::default()
                .match_(n.clone())
                .unwrap()
                .where_(n.property("age").unwrap().gt(Literal::from(18)))
                .returning(vec![n.as_expression().unwrap()])
                .unwrap(),
        );

        assert_eq!(query.clauses.len(), 1);
        match &query.clauses[0] {
            Clause::Match(m) => {
                assert!(!m.optional);
                assert!(m.where_.is_some());
            }
            other => panic!("expected MATCH, got {other:?}"),
        }
        assert!(query.return_.is_some());
    }

    #[test]
    fn and_extends_the_where_of_the_open_match() {
        let n = person();
        let query = build_simple_return(
            StatementBuilder::default()
                .match_(n.clone())
                .unwrap()
                .where_(n.property("age").unwrap().gt(Literal::from(18)))
                .and(n.property("name").unwrap().is_not_null())
                .returning(vec![n.as_expression().unwrap()])
                .unwrap(),
        );

        let Clause::Match(m) = &query.clauses[0] else {
            panic!("expected MATCH");
        };
        let where_ = m.where_.as_ref().unwrap();
        assert!(matches!(where_.condition, Condition::Compound(_)));
    }

    #[test]
    fn with_splits_the_query_into_parts() {
        let n = person();
        let statement = StatementBuilder::default()
            .match_(n.clone())
            .unwrap()
            .with(vec![n.as_expression().unwrap()])
            .unwrap()
            .returning(vec![n.as_expression().unwrap()])
            .unwrap()
            .build()
            .unwrap();

        match statement {
            Statement::MultiPart(multi) => {
                assert_eq!(multi.elements.len(), 1);
                assert_eq!(multi.elements[0].clauses.len(), 1);
                assert!(multi.remainder.clauses.is_empty());
                assert!(multi.remainder.return_.is_some());
            }
            other => panic!("expected multi-part statement, got {other:?}"),
        }
    }

    #[test]
    fn update_without_return_builds() {
        let n = person();
        let statement = StatementBuilder::default()
            .create(n)
            .unwrap()
            .build()
            .unwrap();
        assert!(matches!(statement, Statement::SinglePart(_)));
    }

    #[test]
    fn set_pairs_loose_expressions() {
        let n = person();
        let update = StatementBuilder::default()
            .match_(n.clone())
            .unwrap()
            .set(vec![
                n.property("name").unwrap().into(),
                Literal::from("Thomas").into(),
            ])
            .unwrap();
        let statement = update.build().unwrap();
        let Statement::SinglePart(query) = statement else {
            panic!("expected single-part statement");
        };
        let Clause::Set(set) = &query.clauses[1] else {
            panic!("expected SET");
        };
        assert_eq!(set.operations.len(), 1);
        assert!(matches!(
            &set.operations.expressions[0],
            Expression::Operation(op) if op.operator == crate::ast::operator::Operator::Set
        ));
    }

    #[test]
    fn odd_set_expressions_are_rejected() {
        let n = person();
        let result = StatementBuilder::default()
            .match_(n.clone())
            .unwrap()
            .set(vec![n.property("name").unwrap().into()]);
        assert!(matches!(
            result,
            Err(Error::OddSetExpressionCount { count: 1 })
        ));
    }

    #[test]
    fn pending_sort_key_resolves_on_direction() {
        let n = person();
        let query = build_simple_return(
            StatementBuilder::default()
                .match_(n.clone())
                .unwrap()
                .returning(vec![n.as_expression().unwrap()])
                .unwrap()
                .order_by_expr(n.property("name").unwrap())
                .descending()
                .and(n.property("age").unwrap())
                .skip(2)
                .limit(10),
        );

        let return_ = query.return_.unwrap();
        let order = return_.order.unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].direction, Some(SortDirection::Descending));
        assert_eq!(order.items[1].direction, None);
        assert!(return_.skip.is_some());
        assert!(return_.limit.is_some());
    }

    #[test]
    fn direction_without_a_staged_key_is_ignored() {
        let n = person();
        let statement = StatementBuilder::default()
            .match_(n.clone())
            .unwrap()
            .with(vec![n.as_expression().unwrap()])
            .unwrap()
            .order_by(vec![n.property("name").unwrap().descending()])
            .ascending()
            .returning(vec![n.as_expression().unwrap()])
            .unwrap()
            .build()
            .unwrap();

        let Statement::MultiPart(multi) = statement else {
            panic!("expected multi-part statement");
        };
        let order = multi.elements[0].with.order.as_ref().unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].direction, Some(SortDirection::Descending));
    }

    #[test]
    fn leading_return_builds_a_value_statement() {
        let query = build_simple_return(
            StatementBuilder::default()
                .returning(vec![Literal::from(1).into()])
                .unwrap(),
        );
        assert!(query.clauses.is_empty());
        assert_eq!(query.return_.unwrap().items.len(), 1);
    }

    #[test]
    fn empty_return_items_are_rejected() {
        let n = person();
        let result = StatementBuilder::default()
            .match_(n)
            .unwrap()
            .returning(Vec::new());
        assert!(matches!(
            result,
            Err(Error::MissingInput {
                what: "RETURN items"
            })
        ));
    }

    #[test]
    fn unwind_requires_a_variable() {
        let statement = StatementBuilder::default()
            .unwind(Literal::from(vec![
                Literal::from(1),
                Literal::from(2),
            ]))
            .unwrap()
            .as_("x")
            .unwrap()
            .returning(vec![Expression::SymbolicName(
                SymbolicName::new("x").unwrap(),
            )])
            .unwrap()
            .build()
            .unwrap();
        let Statement::SinglePart(query) = statement else {
            panic!("expected single-part statement");
        };
        assert!(matches!(query.clauses[0], Clause::Unwind(_)));
    }
}
