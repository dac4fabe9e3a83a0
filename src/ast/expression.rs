//! Expression nodes: names, literals, parameters, properties, maps, lists,
//! comprehensions, case expressions and function invocations.
//!
//! All nodes are immutable values. The "mutating" helpers return fresh
//! instances and leave the receiver untouched, so expressions can be shared
//! freely between statements.

use smol_str::SmolStr;

use crate::ast::clause::{SortDirection, SortItem};
use crate::ast::condition::{Comparison, Condition};
use crate::ast::operator::{Operation, Operator};
use crate::ast::pattern::PatternExpression;
use crate::error::{Error, Result};

// ============================================================================
// Symbolic names and parameters
// ============================================================================

/// A validated variable name.
///
/// The rules are deliberately conservative: the first character must be a
/// letter or `_`, every following character a letter, digit or `_`.
/// Equality is value equality, so two independently created names with the
/// same text refer to the same variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolicName {
    value: SmolStr,
}

impl SymbolicName {
    /// Creates a symbolic name, validating the identifier rules.
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref();
        if !is_identifier(value) {
            return Err(Error::InvalidIdentifier {
                value: value.to_string(),
            });
        }
        Ok(Self {
            value: SmolStr::new(value),
        })
    }

    /// The name as text.
    pub fn value(&self) -> &str {
        &self.value
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// A named query parameter.
///
/// Leading `$` signs are stripped on construction, so `$param` and `param`
/// produce the same parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    name: SmolStr,
}

impl Parameter {
    /// Creates a parameter; the name must be non-empty after stripping `$`.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim_start_matches('$');
        if name.trim().is_empty() {
            return Err(Error::MissingInput {
                what: "parameter name",
            });
        }
        Ok(Self {
            name: SmolStr::new(name),
        })
    }

    /// The parameter name without the `$` prefix.
    pub fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Literals
// ============================================================================

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A string literal; rendered single-quoted with escaping.
    String(SmolStr),
    /// A 64-bit integer literal.
    Integer(i64),
    /// A floating point literal.
    Float(f64),
    /// A boolean literal.
    Boolean(bool),
    /// The null literal.
    Null,
    /// A list of literals.
    List(Vec<Literal>),
}

impl Literal {
    /// The `true` literal.
    pub const TRUE: Literal = Literal::Boolean(true);
    /// The `false` literal.
    pub const FALSE: Literal = Literal::Boolean(false);
    /// The `NULL` literal.
    pub const NULL: Literal = Literal::Null;

    /// The self-contained textual form of this literal.
    ///
    /// ```text
    /// it's    -> 'it\'s'
    /// [1, 2]  -> [1, 2]
    /// null    -> NULL
    /// ```
    pub fn as_string(&self) -> String {
        match self {
            Literal::String(s) => format!("'{}'", escape_string(s)),
            Literal::Integer(i) => i.to_string(),
            Literal::Float(f) => f.to_string(),
            Literal::Boolean(b) => b.to_string(),
            Literal::Null => "NULL".to_string(),
            Literal::List(items) => {
                let rendered: Vec<String> = items.iter().map(Literal::as_string).collect();
                format!("[{}]", rendered.join(", "))
            }
        }
    }
}

fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '\'' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(SmolStr::new(value))
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(SmolStr::new(value))
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Integer(i64::from(value))
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<Vec<Literal>> for Literal {
    fn from(value: Vec<Literal>) -> Self {
        Literal::List(value)
    }
}

// ============================================================================
// Properties
// ============================================================================

/// A lookup of one property key, the `.name` part of `n.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyLookup {
    name: SmolStr,
}

impl PropertyLookup {
    /// Creates a property lookup for a non-blank key.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref();
        if name.trim().is_empty() {
            return Err(Error::MissingInput {
                what: "property name",
            });
        }
        Ok(Self {
            name: SmolStr::new(name),
        })
    }

    /// The property key.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A property access on a container expression, e.g. `n.name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// The expression owning the property, usually a symbolic name.
    pub container: Box<Expression>,
    /// The key being looked up.
    pub name: PropertyLookup,
}

impl Property {
    /// Creates a property access on an arbitrary container expression.
    pub fn create(container: impl Into<Expression>, name: &str) -> Result<Self> {
        Ok(Self {
            container: Box::new(container.into()),
            name: PropertyLookup::new(name)?,
        })
    }

    /// `self = rhs`
    pub fn is_equal_to(self, rhs: impl Into<Expression>) -> Condition {
        Expression::from(self).is_equal_to(rhs)
    }

    /// `self <> rhs`
    pub fn is_not_equal_to(self, rhs: impl Into<Expression>) -> Condition {
        Expression::from(self).is_not_equal_to(rhs)
    }

    /// `self < rhs`
    pub fn lt(self, rhs: impl Into<Expression>) -> Condition {
        Expression::from(self).lt(rhs)
    }

    /// `self <= rhs`
    pub fn lte(self, rhs: impl Into<Expression>) -> Condition {
        Expression::from(self).lte(rhs)
    }

    /// `self > rhs`
    pub fn gt(self, rhs: impl Into<Expression>) -> Condition {
        Expression::from(self).gt(rhs)
    }

    /// `self >= rhs`
    pub fn gte(self, rhs: impl Into<Expression>) -> Condition {
        Expression::from(self).gte(rhs)
    }

    /// `self =~ rhs`
    pub fn matches(self, rhs: impl Into<Expression>) -> Condition {
        Expression::from(self).matches(rhs)
    }

    /// `self STARTS WITH rhs`
    pub fn starts_with(self, rhs: impl Into<Expression>) -> Condition {
        Expression::from(self).starts_with(rhs)
    }

    /// `self ENDS WITH rhs`
    pub fn ends_with(self, rhs: impl Into<Expression>) -> Condition {
        Expression::from(self).ends_with(rhs)
    }

    /// `self CONTAINS rhs`
    pub fn contains(self, rhs: impl Into<Expression>) -> Condition {
        Expression::from(self).contains(rhs)
    }

    /// `self IS NULL`
    pub fn is_null(self) -> Condition {
        Expression::from(self).is_null()
    }

    /// `self IS NOT NULL`
    pub fn is_not_null(self) -> Condition {
        Expression::from(self).is_not_null()
    }

    /// `self IN list`
    pub fn in_list(self, list: impl Into<Expression>) -> Condition {
        Expression::from(self).in_list(list)
    }

    /// Aliases this property for a projection.
    pub fn alias(self, alias: &str) -> Result<AliasedExpression> {
        Expression::from(self).alias(alias)
    }

    /// Uses this property as an ascending sort key.
    pub fn ascending(self) -> SortItem {
        Expression::from(self).ascending()
    }

    /// Uses this property as a descending sort key.
    pub fn descending(self) -> SortItem {
        Expression::from(self).descending()
    }
}

// ============================================================================
// Aliases, lists and maps
// ============================================================================

/// An expression with an `AS alias` attached.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedExpression {
    /// The aliased expression.
    pub expression: Box<Expression>,
    /// The alias.
    pub alias: SmolStr,
}

impl AliasedExpression {
    /// Creates an aliased expression; the alias must be non-blank.
    pub fn create(expression: impl Into<Expression>, alias: &str) -> Result<Self> {
        if alias.trim().is_empty() {
            return Err(Error::MissingInput { what: "alias" });
        }
        Ok(Self {
            expression: Box::new(expression.into()),
            alias: SmolStr::new(alias),
        })
    }

    /// Replaces the alias, keeping the wrapped expression.
    pub fn aliased_as(&self, alias: &str) -> Result<Self> {
        if alias.trim().is_empty() {
            return Err(Error::MissingInput { what: "alias" });
        }
        Ok(Self {
            expression: self.expression.clone(),
            alias: SmolStr::new(alias),
        })
    }
}

/// An ordered, comma-separated group of expressions.
///
/// This is the container node behind projection lists, delete targets and
/// function arguments. It is visited as a node of its own so a renderer can
/// insert separators between its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpressionList {
    /// The expressions in order.
    pub expressions: Vec<Expression>,
}

impl ExpressionList {
    /// Creates an expression list.
    pub fn new(expressions: Vec<Expression>) -> Self {
        Self { expressions }
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.expressions.len()
    }
}

/// A literal list of expressions, rendered in brackets.
#[derive(Debug, Clone, PartialEq)]
pub struct ListExpression {
    /// The bracketed content.
    pub content: ExpressionList,
}

impl ListExpression {
    /// Creates a list expression.
    pub fn new(expressions: Vec<Expression>) -> Self {
        Self {
            content: ExpressionList::new(expressions),
        }
    }
}

/// One `key: value` entry of a map.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueMapEntry {
    /// The entry key.
    pub key: SmolStr,
    /// The entry value.
    pub value: Expression,
}

/// A map of keys to expressions with stable entry order.
#[derive(Debug, Clone, PartialEq)]
pub struct MapExpression {
    /// The entries in construction order.
    pub entries: Vec<KeyValueMapEntry>,
}

impl MapExpression {
    /// Creates a map expression. A key repeated within this call is rejected.
    pub fn create<K: Into<SmolStr>>(entries: Vec<(K, Expression)>) -> Result<Self> {
        let mut map_entries: Vec<KeyValueMapEntry> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let key = key.into();
            if map_entries.iter().any(|e| e.key == key) {
                return Err(Error::DuplicateKey {
                    key: key.to_string(),
                });
            }
            map_entries.push(KeyValueMapEntry { key, value });
        }
        Ok(Self {
            entries: map_entries,
        })
    }

    /// Returns a new map with additional entries appended.
    ///
    /// Keys must be unique across the existing and the added entries.
    pub fn add_entries<K: Into<SmolStr>>(&self, entries: Vec<(K, Expression)>) -> Result<Self> {
        let mut combined = self.entries.clone();
        for (key, value) in entries {
            let key = key.into();
            if combined.iter().any(|e| e.key == key) {
                return Err(Error::DuplicateKey {
                    key: key.to_string(),
                });
            }
            combined.push(KeyValueMapEntry { key, value });
        }
        Ok(Self { entries: combined })
    }
}

/// One entry of a map projection.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEntry {
    /// An explicit `key: value` entry.
    KeyValue(KeyValueMapEntry),
    /// A property shorthand, `.name`.
    Property(PropertyLookup),
    /// The `.*` wildcard.
    All,
}

/// A map projection, `name {.prop, key: value, .*}`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapProjection {
    /// The projected entity.
    pub name: SymbolicName,
    /// The projected entries in order.
    pub entries: Vec<MapEntry>,
}

impl MapProjection {
    /// Starts an empty projection based on a named entity.
    pub fn based_on(name: SymbolicName) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Returns a new projection with an explicit `key: value` entry added.
    pub fn and_entry(&self, key: &str, value: impl Into<Expression>) -> Result<Self> {
        if key.trim().is_empty() {
            return Err(Error::MissingInput { what: "map key" });
        }
        let mut entries = self.entries.clone();
        entries.push(MapEntry::KeyValue(KeyValueMapEntry {
            key: SmolStr::new(key),
            value: value.into(),
        }));
        Ok(Self {
            name: self.name.clone(),
            entries,
        })
    }

    /// Returns a new projection with a `.name` property shorthand added.
    pub fn and_property(&self, name: &str) -> Result<Self> {
        let mut entries = self.entries.clone();
        entries.push(MapEntry::Property(PropertyLookup::new(name)?));
        Ok(Self {
            name: self.name.clone(),
            entries,
        })
    }

    /// Returns a new projection with the `.*` wildcard added.
    pub fn and_all(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.push(MapEntry::All);
        Self {
            name: self.name.clone(),
            entries,
        }
    }
}

// ============================================================================
// Comprehensions
// ============================================================================

/// A list comprehension, `[x IN list WHERE cond | projection]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListComprehension {
    /// The iteration variable.
    pub variable: SymbolicName,
    /// The list iterated over.
    pub list: Box<Expression>,
    /// Optional filter on the variable.
    pub filter: Option<Condition>,
    /// Optional projection of each element.
    pub projection: Option<Box<Expression>>,
}

impl ListComprehension {
    /// Creates a comprehension iterating a variable over a list.
    pub fn new(variable: SymbolicName, list: impl Into<Expression>) -> Self {
        Self {
            variable,
            list: Box::new(list.into()),
            filter: None,
            projection: None,
        }
    }

    /// Returns a new comprehension with a filter condition.
    pub fn where_(&self, condition: Condition) -> Self {
        Self {
            filter: Some(condition),
            ..self.clone()
        }
    }

    /// Returns a new comprehension projecting each element.
    pub fn returning(&self, projection: impl Into<Expression>) -> Self {
        Self {
            projection: Some(Box::new(projection.into())),
            ..self.clone()
        }
    }
}

/// A pattern comprehension, `[(a)-[r]->(b) WHERE cond | projection]`.
///
/// Built through [`PatternComprehension::based_on`]; the projection is
/// mandatory, the filter optional.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternComprehension {
    /// The matched pattern.
    pub pattern: PatternExpression,
    /// Optional filter.
    pub filter: Option<Condition>,
    /// The projected expression.
    pub projection: Box<Expression>,
}

impl PatternComprehension {
    /// Starts a comprehension over a relationship pattern.
    pub fn based_on(pattern: impl Into<PatternExpression>) -> OngoingPatternComprehension {
        OngoingPatternComprehension {
            pattern: pattern.into(),
            filter: None,
        }
    }
}

/// A pattern comprehension waiting for its projection.
#[derive(Debug, Clone)]
pub struct OngoingPatternComprehension {
    pattern: PatternExpression,
    filter: Option<Condition>,
}

impl OngoingPatternComprehension {
    /// Adds a filter to the comprehension.
    pub fn where_(mut self, condition: Condition) -> Self {
        self.filter = Some(condition);
        self
    }

    /// Finishes the comprehension with its projection.
    pub fn returning(self, projection: impl Into<Expression>) -> PatternComprehension {
        PatternComprehension {
            pattern: self.pattern,
            filter: self.filter,
            projection: Box::new(projection.into()),
        }
    }
}

// ============================================================================
// Case expressions
// ============================================================================

/// One `WHEN ... THEN ...` branch.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseWhenThen {
    /// The branch guard: a value to compare against (simple form) or a
    /// boolean expression (generic form).
    pub when: Expression,
    /// The branch result.
    pub then: Expression,
}

/// A CASE expression, in its simple (with operand) or generic form.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpression {
    /// The compared operand; absent for the generic form.
    pub operand: Option<Box<Expression>>,
    /// The branches in order; always at least one.
    pub branches: Vec<CaseWhenThen>,
    /// The optional ELSE result.
    pub default: Option<Box<Expression>>,
}

impl CaseExpression {
    /// Starts a simple CASE comparing against an operand.
    pub fn simple(operand: impl Into<Expression>) -> CaseBuilder {
        CaseBuilder {
            operand: Some(Box::new(operand.into())),
        }
    }

    /// Starts a generic CASE without an operand.
    pub fn generic() -> CaseBuilder {
        CaseBuilder { operand: None }
    }
}

/// A CASE with no branch yet; only `when` is possible.
#[derive(Debug, Clone)]
pub struct CaseBuilder {
    operand: Option<Box<Expression>>,
}

impl CaseBuilder {
    /// Opens the first branch.
    pub fn when(self, when: impl Into<Expression>) -> OngoingCaseWhen {
        OngoingCaseWhen {
            operand: self.operand,
            branches: Vec::new(),
            when: when.into(),
        }
    }
}

/// A CASE with an open WHEN waiting for its THEN.
#[derive(Debug, Clone)]
pub struct OngoingCaseWhen {
    operand: Option<Box<Expression>>,
    branches: Vec<CaseWhenThen>,
    when: Expression,
}

impl OngoingCaseWhen {
    /// Closes the open branch; more branches or the terminal ELSE may follow.
    pub fn then(mut self, then: impl Into<Expression>) -> OngoingCase {
        self.branches.push(CaseWhenThen {
            when: self.when,
            then: then.into(),
        });
        OngoingCase {
            operand: self.operand,
            branches: self.branches,
        }
    }
}

/// A CASE with at least one closed branch.
///
/// `else_default` is the terminal step: it yields the finished
/// [`CaseExpression`], on which no further branch can be opened.
#[derive(Debug, Clone)]
pub struct OngoingCase {
    operand: Option<Box<Expression>>,
    branches: Vec<CaseWhenThen>,
}

impl OngoingCase {
    /// Opens another branch.
    pub fn when(self, when: impl Into<Expression>) -> OngoingCaseWhen {
        OngoingCaseWhen {
            operand: self.operand,
            branches: self.branches,
            when: when.into(),
        }
    }

    /// Sets the ELSE result, finishing the CASE.
    pub fn else_default(self, default: impl Into<Expression>) -> CaseExpression {
        CaseExpression {
            operand: self.operand,
            branches: self.branches,
            default: Some(Box::new(default.into())),
        }
    }

    /// Finishes the CASE without an ELSE.
    pub fn finish(self) -> CaseExpression {
        CaseExpression {
            operand: self.operand,
            branches: self.branches,
            default: None,
        }
    }
}

impl From<OngoingCase> for Expression {
    fn from(value: OngoingCase) -> Self {
        value.finish().into()
    }
}

// ============================================================================
// Function invocations
// ============================================================================

/// A call of a built-in function, e.g. `count(DISTINCT n)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInvocation {
    name: SmolStr,
    distinct: bool,
    /// The argument list in call order.
    pub arguments: ExpressionList,
}

impl FunctionInvocation {
    pub(crate) fn new(name: &str, arguments: Vec<Expression>) -> Self {
        Self {
            name: SmolStr::new(name),
            distinct: false,
            arguments: ExpressionList::new(arguments),
        }
    }

    pub(crate) fn new_distinct(name: &str, arguments: Vec<Expression>) -> Self {
        Self {
            name: SmolStr::new(name),
            distinct: true,
            arguments: ExpressionList::new(arguments),
        }
    }

    /// The function name.
    pub fn function_name(&self) -> &str {
        &self.name
    }

    /// Whether the invocation carries the DISTINCT modifier.
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Uses a boolean-valued invocation as a condition.
    pub fn as_condition(self) -> Condition {
        Condition::BooleanFunction(Box::new(self))
    }
}

// ============================================================================
// The expression sum type
// ============================================================================

/// Any expression the query language knows about.
///
/// The enum is closed on purpose: a renderer matching on the traversal
/// events can be exhaustive and the compiler flags every new node kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A variable reference.
    SymbolicName(SymbolicName),
    /// A literal value.
    Literal(Literal),
    /// A query parameter.
    Parameter(Parameter),
    /// A property access.
    Property(Property),
    /// A bare property lookup (only valid inside projections).
    PropertyLookup(PropertyLookup),
    /// An operation, e.g. arithmetic or an update assignment.
    Operation(Box<Operation>),
    /// A function invocation.
    Function(Box<FunctionInvocation>),
    /// A boolean condition used in expression position.
    Condition(Box<Condition>),
    /// A map literal.
    Map(MapExpression),
    /// A map projection.
    MapProjection(MapProjection),
    /// A bracketed list.
    List(ListExpression),
    /// A list comprehension.
    ListComprehension(Box<ListComprehension>),
    /// A pattern comprehension.
    PatternComprehension(Box<PatternComprehension>),
    /// A CASE expression.
    Case(Box<CaseExpression>),
    /// An expression with an alias.
    Aliased(Box<AliasedExpression>),
    /// A parenthesized expression.
    Nested(Box<Expression>),
    /// A pattern used in expression position, e.g. inside `exists(...)`.
    Pattern(Box<PatternExpression>),
    /// The `*` projection.
    Asterisk,
}

impl Expression {
    /// Wraps this expression in parentheses.
    pub fn nested(self) -> Expression {
        Expression::Nested(Box::new(self))
    }

    /// Returns the condition behind this expression, if it is one.
    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            Expression::Condition(condition) => Some(condition),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Comparisons
    // ------------------------------------------------------------------

    /// `self = rhs`
    pub fn is_equal_to(self, rhs: impl Into<Expression>) -> Condition {
        self.binary_condition(Operator::Equality, rhs)
    }

    /// `self <> rhs`
    pub fn is_not_equal_to(self, rhs: impl Into<Expression>) -> Condition {
        self.binary_condition(Operator::Inequality, rhs)
    }

    /// `self < rhs`
    pub fn lt(self, rhs: impl Into<Expression>) -> Condition {
        self.binary_condition(Operator::LessThan, rhs)
    }

    /// `self <= rhs`
    pub fn lte(self, rhs: impl Into<Expression>) -> Condition {
        self.binary_condition(Operator::LessThanOrEqualTo, rhs)
    }

    /// `self > rhs`
    pub fn gt(self, rhs: impl Into<Expression>) -> Condition {
        self.binary_condition(Operator::GreaterThan, rhs)
    }

    /// `self >= rhs`
    pub fn gte(self, rhs: impl Into<Expression>) -> Condition {
        self.binary_condition(Operator::GreaterThanOrEqualTo, rhs)
    }

    /// `self = true`
    pub fn is_true(self) -> Condition {
        self.is_equal_to(Literal::TRUE)
    }

    /// `self = false`
    pub fn is_false(self) -> Condition {
        self.is_equal_to(Literal::FALSE)
    }

    /// `self =~ rhs`
    pub fn matches(self, rhs: impl Into<Expression>) -> Condition {
        self.binary_condition(Operator::Matches, rhs)
    }

    /// `self STARTS WITH rhs`
    pub fn starts_with(self, rhs: impl Into<Expression>) -> Condition {
        self.binary_condition(Operator::StartsWith, rhs)
    }

    /// `self ENDS WITH rhs`
    pub fn ends_with(self, rhs: impl Into<Expression>) -> Condition {
        self.binary_condition(Operator::EndsWith, rhs)
    }

    /// `self CONTAINS rhs`
    pub fn contains(self, rhs: impl Into<Expression>) -> Condition {
        self.binary_condition(Operator::Contains, rhs)
    }

    /// `self IS NULL`
    pub fn is_null(self) -> Condition {
        Condition::Comparison(Box::new(Comparison::postfix(self, Operator::IsNull)))
    }

    /// `self IS NOT NULL`
    pub fn is_not_null(self) -> Condition {
        Condition::Comparison(Box::new(Comparison::postfix(self, Operator::IsNotNull)))
    }

    /// `self IN list`
    pub fn in_list(self, list: impl Into<Expression>) -> Condition {
        self.binary_condition(Operator::In, list)
    }

    /// `size(self) = 0`
    pub fn is_empty(self) -> Condition {
        Expression::Function(Box::new(FunctionInvocation::new("size", vec![self])))
            .is_equal_to(Literal::Integer(0))
    }

    fn binary_condition(self, operator: Operator, rhs: impl Into<Expression>) -> Condition {
        Condition::Comparison(Box::new(Comparison::binary(self, operator, rhs.into())))
    }

    // ------------------------------------------------------------------
    // Arithmetic and string operations
    // ------------------------------------------------------------------

    /// `self + rhs` as string concatenation.
    pub fn concat(self, rhs: impl Into<Expression>) -> Operation {
        Operation::infix(self, Operator::Concat, rhs)
    }

    /// `self + rhs`
    pub fn add(self, rhs: impl Into<Expression>) -> Operation {
        Operation::infix(self, Operator::Addition, rhs)
    }

    /// `self - rhs`
    pub fn subtract(self, rhs: impl Into<Expression>) -> Operation {
        Operation::infix(self, Operator::Subtraction, rhs)
    }

    /// `self * rhs`
    pub fn multiply(self, rhs: impl Into<Expression>) -> Operation {
        Operation::infix(self, Operator::Multiplication, rhs)
    }

    /// `self / rhs`
    pub fn divide(self, rhs: impl Into<Expression>) -> Operation {
        Operation::infix(self, Operator::Division, rhs)
    }

    /// `self % rhs`
    pub fn remainder(self, rhs: impl Into<Expression>) -> Operation {
        Operation::infix(self, Operator::Modulo, rhs)
    }

    /// `self ^ rhs`
    pub fn pow(self, rhs: impl Into<Expression>) -> Operation {
        Operation::infix(self, Operator::Exponent, rhs)
    }

    // ------------------------------------------------------------------
    // Projections and ordering
    // ------------------------------------------------------------------

    /// Aliases this expression, `self AS alias`.
    pub fn alias(self, alias: &str) -> Result<AliasedExpression> {
        AliasedExpression::create(self, alias)
    }

    /// Uses this expression as an ascending sort key.
    pub fn ascending(self) -> SortItem {
        SortItem {
            expression: self,
            direction: Some(SortDirection::Ascending),
        }
    }

    /// Uses this expression as a descending sort key.
    pub fn descending(self) -> SortItem {
        SortItem {
            expression: self,
            direction: Some(SortDirection::Descending),
        }
    }
}

impl From<SymbolicName> for Expression {
    fn from(value: SymbolicName) -> Self {
        Expression::SymbolicName(value)
    }
}

impl From<Literal> for Expression {
    fn from(value: Literal) -> Self {
        Expression::Literal(value)
    }
}

impl From<Parameter> for Expression {
    fn from(value: Parameter) -> Self {
        Expression::Parameter(value)
    }
}

impl From<Property> for Expression {
    fn from(value: Property) -> Self {
        Expression::Property(value)
    }
}

impl From<Operation> for Expression {
    fn from(value: Operation) -> Self {
        Expression::Operation(Box::new(value))
    }
}

impl From<FunctionInvocation> for Expression {
    fn from(value: FunctionInvocation) -> Self {
        Expression::Function(Box::new(value))
    }
}

impl From<Condition> for Expression {
    fn from(value: Condition) -> Self {
        Expression::Condition(Box::new(value))
    }
}

impl From<MapExpression> for Expression {
    fn from(value: MapExpression) -> Self {
        Expression::Map(value)
    }
}

impl From<MapProjection> for Expression {
    fn from(value: MapProjection) -> Self {
        Expression::MapProjection(value)
    }
}

impl From<ListExpression> for Expression {
    fn from(value: ListExpression) -> Self {
        Expression::List(value)
    }
}

impl From<ListComprehension> for Expression {
    fn from(value: ListComprehension) -> Self {
        Expression::ListComprehension(Box::new(value))
    }
}

impl From<PatternComprehension> for Expression {
    fn from(value: PatternComprehension) -> Self {
        Expression::PatternComprehension(Box::new(value))
    }
}

impl From<CaseExpression> for Expression {
    fn from(value: CaseExpression) -> Self {
        Expression::Case(Box::new(value))
    }
}

impl From<AliasedExpression> for Expression {
    fn from(value: AliasedExpression) -> Self {
        Expression::Aliased(Box::new(value))
    }
}

impl From<PatternExpression> for Expression {
    fn from(value: PatternExpression) -> Self {
        Expression::Pattern(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_name_rules() {
        assert!(SymbolicName::new("n").is_ok());
        assert!(SymbolicName::new("_private").is_ok());
        assert!(SymbolicName::new("café").is_ok());
        assert!(SymbolicName::new("n2").is_ok());

        assert!(SymbolicName::new("").is_err());
        assert!(SymbolicName::new("1abc").is_err());
        assert!(SymbolicName::new("a b").is_err());
        assert!(SymbolicName::new("a-b").is_err());
    }

    #[test]
    fn symbolic_name_value_equality() {
        let a = SymbolicName::new("n").unwrap();
        let b = SymbolicName::new("n").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parameter_strips_dollar_signs() {
        let p = Parameter::new("$param").unwrap();
        assert_eq!(p.name(), "param");
        let q = Parameter::new("param").unwrap();
        assert_eq!(p, q);

        assert!(Parameter::new("$").is_err());
        assert!(Parameter::new("").is_err());
    }

    #[test]
    fn literal_as_string() {
        assert_eq!(Literal::from("hello").as_string(), "'hello'");
        assert_eq!(Literal::from(42).as_string(), "42");
        assert_eq!(Literal::TRUE.as_string(), "true");
        assert_eq!(Literal::NULL.as_string(), "NULL");
        assert_eq!(
            Literal::List(vec![Literal::from(1), Literal::from(2)]).as_string(),
            "[1, 2]"
        );
    }

    #[test]
    fn literal_string_escaping() {
        assert_eq!(Literal::from("it's").as_string(), "'it\\'s'");
        assert_eq!(Literal::from("a\\b").as_string(), "'a\\\\b'");
        assert_eq!(Literal::from("say \"hi\"").as_string(), "'say \\\"hi\\\"'");
    }

    #[test]
    fn map_rejects_duplicate_keys() {
        let result = MapExpression::create(vec![
            ("name", Expression::Literal(Literal::from("a"))),
            ("name", Expression::Literal(Literal::from("b"))),
        ]);
        assert!(matches!(result, Err(Error::DuplicateKey { .. })));
    }

    #[test]
    fn map_add_entries_returns_new_instance() {
        let base =
            MapExpression::create(vec![("a", Expression::Literal(Literal::from(1)))]).unwrap();
        let extended = base
            .add_entries(vec![("b", Expression::Literal(Literal::from(2)))])
            .unwrap();
        assert_eq!(base.entries.len(), 1);
        assert_eq!(extended.entries.len(), 2);

        let clash = base.add_entries(vec![("a", Expression::Literal(Literal::from(3)))]);
        assert!(matches!(clash, Err(Error::DuplicateKey { .. })));
    }

    #[test]
    fn case_builder_steps_through_when_then() {
        let case = CaseExpression::simple(Expression::Literal(Literal::from(1)))
            .when(Literal::from(1))
            .then(Literal::from("one"))
            .when(Literal::from(2))
            .then(Literal::from("two"))
            .else_default(Literal::from("many"));

        assert!(case.operand.is_some());
        assert_eq!(case.branches.len(), 2);
        assert!(case.default.is_some());
    }

    #[test]
    fn else_keeps_every_branch_and_closes_the_case() {
        let case = CaseExpression::generic()
            .when(Literal::from(true))
            .then(Literal::from("yes"))
            .when(Literal::from(false))
            .then(Literal::from("no"))
            .else_default(Literal::from("fallback"));

        assert_eq!(case.branches.len(), 2);
        assert!(matches!(
            case.default.as_deref(),
            Some(Expression::Literal(Literal::String(s))) if s == "fallback"
        ));
    }

    #[test]
    fn case_without_else_finishes_open() {
        let case = CaseExpression::simple(Expression::Literal(Literal::from(1)))
            .when(Literal::from(1))
            .then(Literal::from("one"))
            .finish();
        assert_eq!(case.branches.len(), 1);
        assert!(case.default.is_none());
    }

    #[test]
    fn aliased_expression_requires_alias() {
        let expr = Expression::Literal(Literal::from(1));
        assert!(expr.clone().alias("x").is_ok());
        assert!(expr.alias("  ").is_err());
    }
}
