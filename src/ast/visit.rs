//! The enter/leave traversal protocol.
//!
//! Every node implements [`Visitable`]: it announces itself with `enter`,
//! visits its children in fixed grammar order, and closes with `leave`.
//! Absent optional children emit nothing. The visitor receives each node as
//! an [`AstNode`] borrowed view, so a renderer can match exhaustively and
//! the compiler flags every new node kind.
//!
//! Two rules keep the event stream renderable without lookahead:
//!
//! - A compound condition with a single child forwards to the child without
//!   its own enter/leave; with no children it emits nothing at all.
//! - Operators are visited at the position their fixity dictates: prefix
//!   before the operand, postfix after it, infix between the operands, and
//!   between every pair of children of a compound condition.

use std::ops::ControlFlow;

use crate::ast::clause::{
    Clause, Create, Delete, Limit, Match, Merge, Order, Pattern, Remove, Return, Set, Skip,
    SortDirection, SortItem, Unwind, Where, With,
};
use crate::ast::condition::{
    Comparison, CompoundCondition, Condition, HasLabelCondition, ListPredicate,
};
use crate::ast::expression::{
    AliasedExpression, CaseExpression, CaseWhenThen, Expression, ExpressionList,
    FunctionInvocation, KeyValueMapEntry, ListComprehension, ListExpression, Literal, MapEntry,
    MapExpression, MapProjection, Parameter, PatternComprehension, Property, PropertyLookup,
    SymbolicName,
};
use crate::ast::operator::{Operation, OperationOperand, Operator, OperatorFixity};
use crate::ast::pattern::{
    NamedPath, Node, NodeLabel, PatternElement, PatternExpression, Relationship,
    RelationshipChain, RelationshipDetail, RelationshipLength, RelationshipTypes,
};
use crate::ast::statement::{
    MultiPartElement, MultiPartQuery, SinglePartQuery, SingleQuery, Statement, UnionPart,
    UnionQuery,
};

macro_rules! try_visit {
    ($expr:expr) => {
        match $expr {
            ControlFlow::Continue(()) => {}
            ControlFlow::Break(b) => return ControlFlow::Break(b),
        }
    };
}

/// Shared type alias for visitor traversal methods.
pub type VisitResult<B> = ControlFlow<B>;

/// A borrowed view of any node the traversal can announce.
#[derive(Debug, Clone, Copy)]
pub enum AstNode<'a> {
    // Statements.
    SinglePartQuery(&'a SinglePartQuery),
    MultiPartQuery(&'a MultiPartQuery),
    MultiPartElement(&'a MultiPartElement),
    UnionQuery(&'a UnionQuery),
    UnionPart(&'a UnionPart),
    // Clauses.
    Match(&'a Match),
    Where(&'a Where),
    Create(&'a Create),
    Merge(&'a Merge),
    Delete(&'a Delete),
    Set(&'a Set),
    Remove(&'a Remove),
    Unwind(&'a Unwind),
    With(&'a With),
    Return(&'a Return),
    Order(&'a Order),
    SortItem(&'a SortItem),
    SortDirection(SortDirection),
    Skip(&'a Skip),
    Limit(&'a Limit),
    // Patterns.
    Pattern(&'a Pattern),
    Node(&'a Node),
    NodeLabel(&'a NodeLabel),
    Relationship(&'a Relationship),
    RelationshipDetail(&'a RelationshipDetail),
    RelationshipTypes(&'a RelationshipTypes),
    RelationshipLength(&'a RelationshipLength),
    NamedPath(&'a NamedPath),
    // Expressions.
    SymbolicName(&'a SymbolicName),
    Literal(&'a Literal),
    Parameter(&'a Parameter),
    Property(&'a Property),
    PropertyLookup(&'a PropertyLookup),
    Operation(&'a Operation),
    Operator(Operator),
    FunctionInvocation(&'a FunctionInvocation),
    ExpressionList(&'a ExpressionList),
    ListExpression(&'a ListExpression),
    MapExpression(&'a MapExpression),
    KeyValueMapEntry(&'a KeyValueMapEntry),
    MapProjection(&'a MapProjection),
    ListComprehension(&'a ListComprehension),
    PatternComprehension(&'a PatternComprehension),
    CaseExpression(&'a CaseExpression),
    CaseWhenThen(&'a CaseWhenThen),
    AliasedExpression(&'a AliasedExpression),
    /// A parenthesized expression; the payload is the inner expression.
    Nested(&'a Expression),
    Asterisk,
    // Conditions.
    Comparison(&'a Comparison),
    CompoundCondition(&'a CompoundCondition),
    HasLabelCondition(&'a HasLabelCondition),
    ListPredicate(&'a ListPredicate),
}

/// An enter/leave consumer of the traversal.
///
/// Both hooks default to continuing, so a visitor only overrides what it
/// cares about. Returning `ControlFlow::Break` stops the traversal and
/// surfaces the break value to the caller of [`Visitable::accept`].
pub trait Visitor {
    /// Early-exit payload produced when traversal stops.
    type Break;

    /// Called before a node's children.
    fn enter(&mut self, node: AstNode<'_>) -> VisitResult<Self::Break> {
        let _ = node;
        ControlFlow::Continue(())
    }

    /// Called after a node's children.
    fn leave(&mut self, node: AstNode<'_>) -> VisitResult<Self::Break> {
        let _ = node;
        ControlFlow::Continue(())
    }
}

/// A node that can drive a [`Visitor`] over itself and its children.
pub trait Visitable {
    /// Visits this node: enter, children in grammar order, leave.
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break>;
}

fn leaf<V: Visitor + ?Sized>(visitor: &mut V, node: AstNode<'_>) -> VisitResult<V::Break> {
    try_visit!(visitor.enter(node));
    visitor.leave(node)
}

fn visit_operator<V: Visitor + ?Sized>(
    visitor: &mut V,
    operator: Operator,
) -> VisitResult<V::Break> {
    leaf(visitor, AstNode::Operator(operator))
}

// ============================================================================
// Statements
// ============================================================================

impl Visitable for Statement {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        match self {
            Statement::SinglePart(query) => query.accept(visitor),
            Statement::MultiPart(query) => query.accept(visitor),
            Statement::Union(query) => query.accept(visitor),
        }
    }
}

impl Visitable for SingleQuery {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        match self {
            SingleQuery::SinglePart(query) => query.accept(visitor),
            SingleQuery::MultiPart(query) => query.accept(visitor),
        }
    }
}

impl Visitable for SinglePartQuery {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::SinglePartQuery(self)));
        for clause in &self.clauses {
            try_visit!(clause.accept(visitor));
        }
        if let Some(return_) = &self.return_ {
            try_visit!(return_.accept(visitor));
        }
        visitor.leave(AstNode::SinglePartQuery(self))
    }
}

impl Visitable for MultiPartQuery {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::MultiPartQuery(self)));
        for element in &self.elements {
            try_visit!(element.accept(visitor));
        }
        try_visit!(self.remainder.accept(visitor));
        visitor.leave(AstNode::MultiPartQuery(self))
    }
}

impl Visitable for MultiPartElement {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::MultiPartElement(self)));
        for clause in &self.clauses {
            try_visit!(clause.accept(visitor));
        }
        try_visit!(self.with.accept(visitor));
        visitor.leave(AstNode::MultiPartElement(self))
    }
}

impl Visitable for UnionQuery {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::UnionQuery(self)));
        try_visit!(self.head.accept(visitor));
        for part in &self.tail {
            try_visit!(visitor.enter(AstNode::UnionPart(part)));
            try_visit!(part.query.accept(visitor));
            try_visit!(visitor.leave(AstNode::UnionPart(part)));
        }
        visitor.leave(AstNode::UnionQuery(self))
    }
}

// ============================================================================
// Clauses
// ============================================================================

impl Visitable for Clause {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        match self {
            Clause::Match(clause) => clause.accept(visitor),
            Clause::Unwind(clause) => clause.accept(visitor),
            Clause::Create(clause) => clause.accept(visitor),
            Clause::Merge(clause) => clause.accept(visitor),
            Clause::Delete(clause) => clause.accept(visitor),
            Clause::Set(clause) => clause.accept(visitor),
            Clause::Remove(clause) => clause.accept(visitor),
        }
    }
}

impl Visitable for Match {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Match(self)));
        try_visit!(self.pattern.accept(visitor));
        if let Some(where_) = &self.where_ {
            try_visit!(where_.accept(visitor));
        }
        visitor.leave(AstNode::Match(self))
    }
}

impl Visitable for Where {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Where(self)));
        try_visit!(self.condition.accept(visitor));
        visitor.leave(AstNode::Where(self))
    }
}

impl Visitable for Create {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Create(self)));
        try_visit!(self.pattern.accept(visitor));
        visitor.leave(AstNode::Create(self))
    }
}

impl Visitable for Merge {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Merge(self)));
        try_visit!(self.pattern.accept(visitor));
        visitor.leave(AstNode::Merge(self))
    }
}

impl Visitable for Delete {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Delete(self)));
        try_visit!(self.expressions.accept(visitor));
        visitor.leave(AstNode::Delete(self))
    }
}

impl Visitable for Set {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Set(self)));
        try_visit!(self.operations.accept(visitor));
        visitor.leave(AstNode::Set(self))
    }
}

impl Visitable for Remove {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Remove(self)));
        try_visit!(self.expressions.accept(visitor));
        visitor.leave(AstNode::Remove(self))
    }
}

impl Visitable for Unwind {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Unwind(self)));
        try_visit!(self.expression.accept(visitor));
        visitor.leave(AstNode::Unwind(self))
    }
}

impl Visitable for With {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::With(self)));
        try_visit!(self.items.accept(visitor));
        if let Some(order) = &self.order {
            try_visit!(order.accept(visitor));
        }
        if let Some(skip) = &self.skip {
            try_visit!(skip.accept(visitor));
        }
        if let Some(limit) = &self.limit {
            try_visit!(limit.accept(visitor));
        }
        if let Some(where_) = &self.where_ {
            try_visit!(where_.accept(visitor));
        }
        visitor.leave(AstNode::With(self))
    }
}

impl Visitable for Return {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Return(self)));
        try_visit!(self.items.accept(visitor));
        if let Some(order) = &self.order {
            try_visit!(order.accept(visitor));
        }
        if let Some(skip) = &self.skip {
            try_visit!(skip.accept(visitor));
        }
        if let Some(limit) = &self.limit {
            try_visit!(limit.accept(visitor));
        }
        visitor.leave(AstNode::Return(self))
    }
}

impl Visitable for Order {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Order(self)));
        for item in &self.items {
            try_visit!(item.accept(visitor));
        }
        visitor.leave(AstNode::Order(self))
    }
}

impl Visitable for SortItem {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::SortItem(self)));
        try_visit!(self.expression.accept(visitor));
        if let Some(direction) = self.direction {
            try_visit!(leaf(visitor, AstNode::SortDirection(direction)));
        }
        visitor.leave(AstNode::SortItem(self))
    }
}

impl Visitable for Skip {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Skip(self)));
        try_visit!(leaf(visitor, AstNode::Literal(&self.value)));
        visitor.leave(AstNode::Skip(self))
    }
}

impl Visitable for Limit {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Limit(self)));
        try_visit!(leaf(visitor, AstNode::Literal(&self.value)));
        visitor.leave(AstNode::Limit(self))
    }
}

// ============================================================================
// Patterns
// ============================================================================

impl Visitable for Pattern {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Pattern(self)));
        for element in &self.elements {
            try_visit!(element.accept(visitor));
        }
        visitor.leave(AstNode::Pattern(self))
    }
}

impl Visitable for PatternElement {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        match self {
            PatternElement::Node(node) => node.accept(visitor),
            PatternElement::Relationship(relationship) => relationship.accept(visitor),
            PatternElement::Chain(chain) => chain.accept(visitor),
            PatternElement::Path(path) => path.accept(visitor),
        }
    }
}

impl Visitable for PatternExpression {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        match self {
            PatternExpression::Relationship(relationship) => relationship.accept(visitor),
            PatternExpression::Chain(chain) => chain.accept(visitor),
        }
    }
}

impl Visitable for Node {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Node(self)));
        if let Some(name) = &self.symbolic_name {
            try_visit!(leaf(visitor, AstNode::SymbolicName(name)));
        }
        for label in &self.labels {
            try_visit!(leaf(visitor, AstNode::NodeLabel(label)));
        }
        if let Some(properties) = &self.properties {
            try_visit!(properties.accept(visitor));
        }
        visitor.leave(AstNode::Node(self))
    }
}

impl Visitable for Relationship {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Relationship(self)));
        try_visit!(self.left.accept(visitor));
        try_visit!(self.detail.accept(visitor));
        try_visit!(self.right.accept(visitor));
        visitor.leave(AstNode::Relationship(self))
    }
}

impl Visitable for RelationshipDetail {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::RelationshipDetail(self)));
        if let Some(name) = &self.symbolic_name {
            try_visit!(leaf(visitor, AstNode::SymbolicName(name)));
        }
        if let Some(types) = &self.types {
            try_visit!(leaf(visitor, AstNode::RelationshipTypes(types)));
        }
        if let Some(length) = &self.length {
            try_visit!(leaf(visitor, AstNode::RelationshipLength(length)));
        }
        if let Some(properties) = &self.properties {
            try_visit!(properties.accept(visitor));
        }
        visitor.leave(AstNode::RelationshipDetail(self))
    }
}

impl Visitable for RelationshipChain {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        // Segments share their intermediate nodes; consumers that must not
        // repeat node content track visited names themselves.
        for relationship in &self.relationships {
            try_visit!(relationship.accept(visitor));
        }
        ControlFlow::Continue(())
    }
}

impl Visitable for NamedPath {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::NamedPath(self)));
        try_visit!(leaf(visitor, AstNode::SymbolicName(&self.name)));
        try_visit!(self.pattern.accept(visitor));
        visitor.leave(AstNode::NamedPath(self))
    }
}

// ============================================================================
// Expressions
// ============================================================================

impl Visitable for Expression {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        match self {
            Expression::SymbolicName(name) => leaf(visitor, AstNode::SymbolicName(name)),
            Expression::Literal(literal) => leaf(visitor, AstNode::Literal(literal)),
            Expression::Parameter(parameter) => leaf(visitor, AstNode::Parameter(parameter)),
            Expression::Property(property) => property.accept(visitor),
            Expression::PropertyLookup(lookup) => leaf(visitor, AstNode::PropertyLookup(lookup)),
            Expression::Operation(operation) => operation.accept(visitor),
            Expression::Function(function) => function.accept(visitor),
            Expression::Condition(condition) => condition.accept(visitor),
            Expression::Map(map) => map.accept(visitor),
            Expression::MapProjection(projection) => projection.accept(visitor),
            Expression::List(list) => list.accept(visitor),
            Expression::ListComprehension(comprehension) => comprehension.accept(visitor),
            Expression::PatternComprehension(comprehension) => comprehension.accept(visitor),
            Expression::Case(case) => case.accept(visitor),
            Expression::Aliased(aliased) => aliased.accept(visitor),
            Expression::Nested(inner) => {
                try_visit!(visitor.enter(AstNode::Nested(inner)));
                try_visit!(inner.accept(visitor));
                visitor.leave(AstNode::Nested(inner))
            }
            Expression::Pattern(pattern) => pattern.accept(visitor),
            Expression::Asterisk => leaf(visitor, AstNode::Asterisk),
        }
    }
}

impl Visitable for Property {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Property(self)));
        try_visit!(self.container.accept(visitor));
        try_visit!(leaf(visitor, AstNode::PropertyLookup(&self.name)));
        visitor.leave(AstNode::Property(self))
    }
}

impl Visitable for AliasedExpression {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::AliasedExpression(self)));
        try_visit!(self.expression.accept(visitor));
        visitor.leave(AstNode::AliasedExpression(self))
    }
}

impl Visitable for ExpressionList {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::ExpressionList(self)));
        for expression in &self.expressions {
            try_visit!(expression.accept(visitor));
        }
        visitor.leave(AstNode::ExpressionList(self))
    }
}

impl Visitable for ListExpression {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::ListExpression(self)));
        for expression in &self.content.expressions {
            try_visit!(expression.accept(visitor));
        }
        visitor.leave(AstNode::ListExpression(self))
    }
}

impl Visitable for MapExpression {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::MapExpression(self)));
        for entry in &self.entries {
            try_visit!(entry.accept(visitor));
        }
        visitor.leave(AstNode::MapExpression(self))
    }
}

impl Visitable for KeyValueMapEntry {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::KeyValueMapEntry(self)));
        try_visit!(self.value.accept(visitor));
        visitor.leave(AstNode::KeyValueMapEntry(self))
    }
}

impl Visitable for MapProjection {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::MapProjection(self)));
        try_visit!(leaf(visitor, AstNode::SymbolicName(&self.name)));
        for entry in &self.entries {
            match entry {
                MapEntry::KeyValue(kv) => try_visit!(kv.accept(visitor)),
                MapEntry::Property(lookup) => {
                    try_visit!(leaf(visitor, AstNode::PropertyLookup(lookup)))
                }
                MapEntry::All => try_visit!(leaf(visitor, AstNode::Asterisk)),
            }
        }
        visitor.leave(AstNode::MapProjection(self))
    }
}

impl Visitable for FunctionInvocation {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::FunctionInvocation(self)));
        try_visit!(self.arguments.accept(visitor));
        visitor.leave(AstNode::FunctionInvocation(self))
    }
}

impl Visitable for Operation {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Operation(self)));
        try_visit!(self.left.accept(visitor));
        if self.operator.fixity() != OperatorFixity::Label {
            try_visit!(visit_operator(visitor, self.operator));
        }
        match &self.right {
            OperationOperand::Expression(expression) => try_visit!(expression.accept(visitor)),
            OperationOperand::Labels(labels) => {
                for label in labels {
                    try_visit!(leaf(visitor, AstNode::NodeLabel(label)));
                }
            }
        }
        visitor.leave(AstNode::Operation(self))
    }
}

impl Visitable for ListComprehension {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::ListComprehension(self)));
        try_visit!(leaf(visitor, AstNode::SymbolicName(&self.variable)));
        try_visit!(self.list.accept(visitor));
        if let Some(filter) = &self.filter {
            try_visit!(filter.accept(visitor));
        }
        if let Some(projection) = &self.projection {
            try_visit!(projection.accept(visitor));
        }
        visitor.leave(AstNode::ListComprehension(self))
    }
}

impl Visitable for PatternComprehension {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::PatternComprehension(self)));
        try_visit!(self.pattern.accept(visitor));
        if let Some(filter) = &self.filter {
            try_visit!(filter.accept(visitor));
        }
        try_visit!(self.projection.accept(visitor));
        visitor.leave(AstNode::PatternComprehension(self))
    }
}

impl Visitable for CaseExpression {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::CaseExpression(self)));
        if let Some(operand) = &self.operand {
            try_visit!(operand.accept(visitor));
        }
        for branch in &self.branches {
            try_visit!(visitor.enter(AstNode::CaseWhenThen(branch)));
            try_visit!(branch.when.accept(visitor));
            try_visit!(branch.then.accept(visitor));
            try_visit!(visitor.leave(AstNode::CaseWhenThen(branch)));
        }
        if let Some(default) = &self.default {
            try_visit!(default.accept(visitor));
        }
        visitor.leave(AstNode::CaseExpression(self))
    }
}

// ============================================================================
// Conditions
// ============================================================================

impl Visitable for Condition {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        match self {
            Condition::Empty => ControlFlow::Continue(()),
            Condition::Comparison(comparison) => comparison.accept(visitor),
            Condition::Compound(compound) => compound.accept(visitor),
            Condition::HasLabel(has_label) => has_label.accept(visitor),
            Condition::ListPredicate(predicate) => predicate.accept(visitor),
            Condition::BooleanFunction(function) => function.accept(visitor),
        }
    }
}

impl Visitable for Comparison {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::Comparison(self)));
        match self.operator.fixity() {
            OperatorFixity::Prefix => {
                try_visit!(visit_operator(visitor, self.operator));
                if let Some(right) = &self.right {
                    try_visit!(right.accept(visitor));
                }
            }
            OperatorFixity::Postfix => {
                if let Some(left) = &self.left {
                    try_visit!(left.accept(visitor));
                }
                try_visit!(visit_operator(visitor, self.operator));
            }
            _ => {
                if let Some(left) = &self.left {
                    try_visit!(left.accept(visitor));
                }
                try_visit!(visit_operator(visitor, self.operator));
                if let Some(right) = &self.right {
                    try_visit!(right.accept(visitor));
                }
            }
        }
        visitor.leave(AstNode::Comparison(self))
    }
}

impl Visitable for CompoundCondition {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        match self.conditions.len() {
            0 => ControlFlow::Continue(()),
            // A single child speaks for itself, without the compound's own
            // enter/leave.
            1 => self.conditions[0].accept(visitor),
            _ => {
                try_visit!(visitor.enter(AstNode::CompoundCondition(self)));
                let mut first = true;
                for condition in &self.conditions {
                    if !first {
                        try_visit!(visit_operator(visitor, self.operator));
                    }
                    try_visit!(condition.accept(visitor));
                    first = false;
                }
                visitor.leave(AstNode::CompoundCondition(self))
            }
        }
    }
}

impl Visitable for HasLabelCondition {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::HasLabelCondition(self)));
        try_visit!(leaf(visitor, AstNode::SymbolicName(&self.name)));
        for label in &self.labels {
            try_visit!(leaf(visitor, AstNode::NodeLabel(label)));
        }
        visitor.leave(AstNode::HasLabelCondition(self))
    }
}

impl Visitable for ListPredicate {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Break> {
        try_visit!(visitor.enter(AstNode::ListPredicate(self)));
        try_visit!(leaf(visitor, AstNode::SymbolicName(&self.variable)));
        try_visit!(self.list.accept(visitor));
        try_visit!(self.predicate.accept(visitor));
        visitor.leave(AstNode::ListPredicate(self))
    }
}
