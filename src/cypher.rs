//! The main entry points for building queries.
//!
//! Free functions here create the leaf nodes (nodes, names, parameters,
//! literals) and open the fluent builder. They mirror the surface a query
//! author thinks in, so most programs never import the AST types directly.

use smol_str::SmolStr;

use crate::ast::clause::SortItem;
use crate::ast::condition::Condition;
use crate::ast::expression::{
    Expression, ListExpression, Literal, MapExpression, Parameter, Property, SymbolicName,
};
use crate::ast::pattern::{NamedPath, Node, PatternElement, PatternExpression};
use crate::ast::statement::{SingleQuery, Statement, UnionQuery};
use crate::builder::{
    OngoingReadingWithoutWhere, OngoingUnwind, OngoingUpdate, OngoingWithWithoutWhere,
    StatementBuilder,
};
use crate::error::{Error, Result};

// ============================================================================
// Leaf constructors
// ============================================================================

/// A node pattern with one label, `(:Label)`.
pub fn node(label: &str) -> Result<Node> {
    Node::new(label, &[])
}

/// A named node pattern with labels, `(name:Label1:Label2)`.
///
/// An empty label list yields a bare named node, `(name)`.
pub fn node_with_labels(name: &str, labels: &[&str]) -> Result<Node> {
    let node = match labels.split_first() {
        Some((primary, rest)) => Node::new(primary, rest)?,
        None => Node::any(),
    };
    node.named(name)
}

/// The anonymous node pattern, `()`.
pub fn any_node() -> Node {
    Node::any()
}

/// A named node pattern without labels, `(name)`.
pub fn any_node_named(name: &str) -> Result<Node> {
    Node::any().named(name)
}

/// A variable reference in expression position.
pub fn name(value: &str) -> Result<Expression> {
    Ok(Expression::SymbolicName(SymbolicName::new(value)?))
}

/// A query parameter; a leading `$` is accepted and stripped.
pub fn parameter(name: &str) -> Result<Expression> {
    Ok(Expression::Parameter(Parameter::new(name)?))
}

/// A literal value in expression position.
pub fn literal(value: impl Into<Literal>) -> Expression {
    Expression::Literal(value.into())
}

/// A bracketed list of expressions.
pub fn list_of(expressions: Vec<Expression>) -> ListExpression {
    ListExpression::new(expressions)
}

/// A map of keys to expressions; duplicate keys are rejected.
pub fn map_of<K: Into<SmolStr>>(entries: Vec<(K, Expression)>) -> Result<MapExpression> {
    MapExpression::create(entries)
}

/// A property access on a named container, e.g. `property("n", "name")`.
pub fn property(container: &str, name: &str) -> Result<Property> {
    Property::create(Expression::SymbolicName(SymbolicName::new(container)?), name)
}

/// A property access on an arbitrary expression.
pub fn property_of(container: impl Into<Expression>, name: &str) -> Result<Property> {
    Property::create(container, name)
}

/// A sort key without an explicit direction.
pub fn sort(expression: impl Into<Expression>) -> SortItem {
    SortItem::of(expression)
}

/// The `*` projection.
pub fn asterisk() -> Expression {
    Expression::Asterisk
}

/// The neutral condition, useful as the start of a fold over filters.
pub fn no_condition() -> Condition {
    Condition::Empty
}

/// Binds a relationship pattern to a path variable, `p = (a)-[r]->(b)`.
pub fn path(name: &str, pattern: impl Into<PatternExpression>) -> Result<NamedPath> {
    Ok(NamedPath::create(SymbolicName::new(name)?, pattern))
}

// ============================================================================
// Builder entry points
// ============================================================================

/// Starts a statement with a MATCH clause.
pub fn match_(element: impl Into<PatternElement>) -> Result<OngoingReadingWithoutWhere> {
    StatementBuilder::default().match_(element)
}

/// Starts a statement matching several pattern elements at once.
pub fn match_all(elements: Vec<PatternElement>) -> Result<OngoingReadingWithoutWhere> {
    StatementBuilder::default().match_all(elements)
}

/// Starts a statement with an OPTIONAL MATCH clause.
pub fn optional_match(element: impl Into<PatternElement>) -> Result<OngoingReadingWithoutWhere> {
    StatementBuilder::default().optional_match(element)
}

/// Starts a statement with a CREATE clause.
pub fn create(element: impl Into<PatternElement>) -> Result<OngoingUpdate> {
    StatementBuilder::default().create(element)
}

/// Starts a statement with a MERGE clause.
pub fn merge(element: impl Into<PatternElement>) -> Result<OngoingUpdate> {
    StatementBuilder::default().merge(element)
}

/// Starts a statement with an UNWIND clause.
pub fn unwind(expression: impl Into<Expression>) -> Result<OngoingUnwind> {
    StatementBuilder::default().unwind(expression)
}

/// Starts a statement with a leading WITH.
///
/// A leading WITH introduces variables out of thin air, so every item must
/// carry an alias (or already be a plain variable).
pub fn with(items: Vec<Expression>) -> Result<OngoingWithWithoutWhere> {
    for item in &items {
        if !matches!(
            item,
            Expression::Aliased(_) | Expression::SymbolicName(_)
        ) {
            return Err(Error::MissingInput {
                what: "alias on a leading WITH item",
            });
        }
    }
    StatementBuilder::default().with(items)
}

// ============================================================================
// Unions
// ============================================================================

/// Combines statements with UNION, removing duplicate rows.
///
/// When the first statement is itself a union, the remaining statements are
/// appended to it; mixing UNION and UNION ALL is rejected.
pub fn union(statements: Vec<Statement>) -> Result<Statement> {
    union_impl(false, statements)
}

/// Combines statements with UNION ALL, keeping duplicate rows.
pub fn union_all(statements: Vec<Statement>) -> Result<Statement> {
    union_impl(true, statements)
}

fn union_impl(all: bool, statements: Vec<Statement>) -> Result<Statement> {
    let mut iter = statements.into_iter();
    let Some(first) = iter.next() else {
        return Err(Error::UnionTooFewStatements { count: 0 });
    };
    match first {
        Statement::Union(existing) => {
            let additional = iter
                .map(Statement::into_single_query)
                .collect::<Result<Vec<SingleQuery>>>()?;
            if additional.is_empty() {
                return Err(Error::UnionTooFewStatements { count: 1 });
            }
            Ok(Statement::Union(existing.extended_with(all, additional)?))
        }
        first => {
            let mut queries = vec![first.into_single_query()?];
            for statement in iter {
                queries.push(statement.into_single_query()?);
            }
            Ok(Statement::Union(UnionQuery::create(all, queries)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_statement(label: &str) -> Statement {
        let n = node(label).unwrap().named("n").unwrap();
        match_(n.clone())
            .unwrap()
            .returning(vec![n.as_expression().unwrap()])
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn leading_with_requires_aliases() {
        let aliased = literal(1).alias("one").unwrap();
        assert!(with(vec![aliased.into()]).is_ok());

        let bare = literal(1);
        assert!(matches!(
            with(vec![bare]),
            Err(Error::MissingInput { .. })
        ));
    }

    #[test]
    fn union_of_two_statements() {
        let combined =
            union(vec![simple_statement("A"), simple_statement("B")]).unwrap();
        let Statement::Union(u) = combined else {
            panic!("expected union");
        };
        assert!(!u.all);
        assert_eq!(u.tail.len(), 1);
    }

    #[test]
    fn union_grows_by_passing_the_existing_union_first() {
        let combined =
            union(vec![simple_statement("A"), simple_statement("B")]).unwrap();
        let grown = union(vec![combined, simple_statement("C")]).unwrap();
        let Statement::Union(u) = grown else {
            panic!("expected union");
        };
        assert_eq!(u.tail.len(), 2);
    }

    #[test]
    fn mixing_union_styles_is_rejected() {
        let combined =
            union(vec![simple_statement("A"), simple_statement("B")]).unwrap();
        let result = union_all(vec![combined, simple_statement("C")]);
        assert!(matches!(result, Err(Error::MixedUnionStyle)));
    }

    #[test]
    fn nested_unions_are_rejected() {
        let a = union(vec![simple_statement("A"), simple_statement("B")]).unwrap();
        let result = union(vec![simple_statement("C"), a]);
        assert!(matches!(result, Err(Error::UnionRequiresSingleQuery)));
    }

    #[test]
    fn single_statement_union_is_rejected() {
        let result = union(vec![simple_statement("A")]);
        assert!(matches!(
            result,
            Err(Error::UnionTooFewStatements { count: 1 })
        ));
    }
}
