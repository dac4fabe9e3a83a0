//! The immutable query AST: expressions, conditions, patterns, clauses and
//! statement containers, plus the enter/leave traversal protocol.

pub mod clause;
pub mod condition;
pub mod expression;
pub mod operator;
pub mod pattern;
pub mod statement;
pub mod visit;
pub mod visitors;

// Re-export the node types most callers touch directly.
pub use clause::{
    Clause, Create, Delete, Limit, Match, Merge, Order, Pattern, Remove, Return, Set, Skip,
    SortDirection, SortItem, Unwind, Where, With,
};
pub use condition::{
    Comparison, CompoundCondition, Condition, HasLabelCondition, ListPredicate, ListPredicateKind,
};
pub use expression::{
    AliasedExpression, CaseExpression, Expression, ExpressionList, FunctionInvocation,
    ListComprehension, ListExpression, Literal, MapExpression, MapProjection, Parameter,
    PatternComprehension, Property, PropertyLookup, SymbolicName,
};
pub use operator::{Operation, Operator, OperatorFixity};
pub use pattern::{
    Named, NamedPath, Node, NodeLabel, PatternElement, PatternExpression, Relationship,
    RelationshipChain, RelationshipDetail, RelationshipLength,
};
pub use statement::{SingleQuery, SinglePartQuery, Statement, UnionQuery};
pub use visit::{AstNode, VisitResult, Visitable, Visitor};
