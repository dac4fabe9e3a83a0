//! Graph patterns: nodes, relationships, relationship chains and named
//! paths.
//!
//! Patterns are immutable like every other node; `named`, `with_properties`
//! and the length modifiers hand back fresh copies. A relationship extended
//! with another hop becomes a [`RelationshipChain`], whose modifiers apply
//! to the most recently added segment.

use smol_str::SmolStr;

use crate::ast::condition::{Condition, HasLabelCondition};
use crate::ast::expression::{
    Expression, MapExpression, MapProjection, Property, SymbolicName,
};
use crate::error::{Error, Result};

// ============================================================================
// Labels and the Named trait
// ============================================================================

/// A single node label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeLabel {
    value: SmolStr,
}

impl NodeLabel {
    /// Creates a label; it must be non-empty.
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref();
        if value.trim().is_empty() {
            return Err(Error::EmptyLabel);
        }
        Ok(Self {
            value: SmolStr::new(value),
        })
    }

    /// The label text.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A pattern element that may carry a symbolic name.
///
/// This is the only door through which a node, relationship or path enters
/// expression position: the element's name stands in for the element, and
/// an unnamed element is rejected with [`Error::Unnamed`].
pub trait Named {
    /// The element's name, if it has one.
    fn symbolic_name(&self) -> Option<&SymbolicName>;

    /// What to call this element in error messages.
    fn element_kind(&self) -> &'static str;

    /// The element's name, or an error when it has none.
    fn required_symbolic_name(&self) -> Result<SymbolicName> {
        self.symbolic_name().cloned().ok_or(Error::Unnamed {
            what: self.element_kind(),
        })
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// A node pattern, `(n:Label {prop: value})`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// The node's variable, if bound.
    pub symbolic_name: Option<SymbolicName>,
    /// The node's labels in order.
    pub labels: Vec<NodeLabel>,
    /// The node's property map, if any.
    pub properties: Option<MapExpression>,
}

impl Node {
    /// Creates a node with a primary label and optional additional labels.
    pub fn new(primary_label: &str, additional_labels: &[&str]) -> Result<Self> {
        let mut labels = vec![NodeLabel::new(primary_label)?];
        for label in additional_labels {
            labels.push(NodeLabel::new(label)?);
        }
        Ok(Self {
            symbolic_name: None,
            labels,
            properties: None,
        })
    }

    /// Creates an unlabeled, unnamed node, `()`.
    pub fn any() -> Self {
        Self {
            symbolic_name: None,
            labels: Vec::new(),
            properties: None,
        }
    }

    /// Returns a copy of this node bound to a variable.
    pub fn named(&self, name: &str) -> Result<Self> {
        Ok(Self {
            symbolic_name: Some(SymbolicName::new(name)?),
            ..self.clone()
        })
    }

    /// Returns a copy of this node with a property map.
    pub fn with_properties(&self, properties: MapExpression) -> Self {
        Self {
            properties: Some(properties),
            ..self.clone()
        }
    }

    /// A property of this node; requires the node to be named.
    pub fn property(&self, name: &str) -> Result<Property> {
        let symbolic_name = self.required_symbolic_name()?;
        Property::create(Expression::SymbolicName(symbolic_name), name)
    }

    /// Starts a map projection based on this node's name.
    pub fn project(&self) -> Result<MapProjection> {
        Ok(MapProjection::based_on(self.required_symbolic_name()?))
    }

    /// A condition checking that this node carries all given labels.
    pub fn has_labels(&self, labels: &[&str]) -> Result<Condition> {
        let check = HasLabelCondition::create(self.required_symbolic_name()?, labels)?;
        Ok(Condition::HasLabel(check))
    }

    /// This node in expression position; requires a name.
    pub fn as_expression(&self) -> Result<Expression> {
        Ok(Expression::SymbolicName(self.required_symbolic_name()?))
    }

    /// An outgoing relationship to another node.
    pub fn relationship_to(&self, other: &Node, types: &[&str]) -> Result<Relationship> {
        Relationship::create(self.clone(), Direction::LeftToRight, other.clone(), types)
    }

    /// An incoming relationship from another node.
    pub fn relationship_from(&self, other: &Node, types: &[&str]) -> Result<Relationship> {
        Relationship::create(self.clone(), Direction::RightToLeft, other.clone(), types)
    }

    /// An undirected relationship between this node and another.
    pub fn relationship_between(&self, other: &Node, types: &[&str]) -> Result<Relationship> {
        Relationship::create(self.clone(), Direction::Unidirectional, other.clone(), types)
    }
}

impl Named for Node {
    fn symbolic_name(&self) -> Option<&SymbolicName> {
        self.symbolic_name.as_ref()
    }

    fn element_kind(&self) -> &'static str {
        "node"
    }
}

// ============================================================================
// Relationships
// ============================================================================

/// The direction of a relationship pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `(a)-[r]->(b)`
    LeftToRight,
    /// `(a)<-[r]-(b)`
    RightToLeft,
    /// `(a)-[r]-(b)`
    Unidirectional,
}

impl Direction {
    /// The arrow fragment before the bracketed detail.
    pub fn symbol_left(&self) -> &'static str {
        match self {
            Direction::RightToLeft => "<-",
            _ => "-",
        }
    }

    /// The arrow fragment after the bracketed detail.
    pub fn symbol_right(&self) -> &'static str {
        match self {
            Direction::LeftToRight => "->",
            _ => "-",
        }
    }
}

/// Hop bounds of a variable-length relationship.
///
/// The three shapes are distinguishable through traversal: an absent length
/// means exactly one hop, `unbounded` means `*` without bounds, and any set
/// bound produces `*minimum..maximum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipLength {
    /// Lower hop bound, if any.
    pub minimum: Option<u32>,
    /// Upper hop bound, if any.
    pub maximum: Option<u32>,
    /// `*` without bounds.
    pub unbounded: bool,
}

impl RelationshipLength {
    /// The fully unbounded length, `*`.
    pub fn unbounded() -> Self {
        Self {
            minimum: None,
            maximum: None,
            unbounded: true,
        }
    }
}

/// The OR-ed relationship types, `:TYPE1|TYPE2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipTypes {
    /// The type names in order.
    pub values: Vec<SmolStr>,
}

/// Everything between the brackets of a relationship pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipDetail {
    /// The pattern direction.
    pub direction: Direction,
    /// The relationship's variable, if bound.
    pub symbolic_name: Option<SymbolicName>,
    /// The relationship types; absent for an untyped pattern.
    pub types: Option<RelationshipTypes>,
    /// Variable-length bounds; absent for exactly one hop.
    pub length: Option<RelationshipLength>,
    /// The relationship's property map, if any.
    pub properties: Option<MapExpression>,
}

/// A single relationship pattern between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// The left node.
    pub left: Node,
    /// The bracketed detail.
    pub detail: RelationshipDetail,
    /// The right node.
    pub right: Node,
}

impl Relationship {
    pub(crate) fn create(
        left: Node,
        direction: Direction,
        right: Node,
        types: &[&str],
    ) -> Result<Self> {
        let types = if types.is_empty() {
            None
        } else {
            let mut values = Vec::with_capacity(types.len());
            for t in types {
                if t.trim().is_empty() {
                    return Err(Error::EmptyLabel);
                }
                values.push(SmolStr::new(t));
            }
            Some(RelationshipTypes { values })
        };
        Ok(Self {
            left,
            detail: RelationshipDetail {
                direction,
                symbolic_name: None,
                types,
                length: None,
                properties: None,
            },
            right,
        })
    }

    /// Returns a copy bound to a variable.
    pub fn named(&self, name: &str) -> Result<Self> {
        let mut copy = self.clone();
        copy.detail.symbolic_name = Some(SymbolicName::new(name)?);
        Ok(copy)
    }

    /// Returns a copy with a property map.
    pub fn with_properties(&self, properties: MapExpression) -> Self {
        let mut copy = self.clone();
        copy.detail.properties = Some(properties);
        copy
    }

    /// Returns a copy with the fully unbounded length, `*`.
    pub fn unbounded(&self) -> Self {
        let mut copy = self.clone();
        copy.detail.length = Some(RelationshipLength::unbounded());
        copy
    }

    /// Returns a copy with explicit hop bounds.
    ///
    /// Passing `None` for both bounds is the open unbounded form, the same
    /// as [`Relationship::unbounded`].
    pub fn length(&self, minimum: Option<u32>, maximum: Option<u32>) -> Self {
        let mut copy = self.clone();
        copy.detail.length = Some(RelationshipLength {
            minimum,
            maximum,
            unbounded: minimum.is_none() && maximum.is_none(),
        });
        copy
    }

    /// Returns a copy with a minimum hop count, keeping any maximum.
    pub fn min(&self, minimum: u32) -> Self {
        let mut copy = self.clone();
        let maximum = copy.detail.length.and_then(|l| l.maximum);
        copy.detail.length = Some(RelationshipLength {
            minimum: Some(minimum),
            maximum,
            unbounded: false,
        });
        copy
    }

    /// Returns a copy with a maximum hop count, keeping any minimum.
    pub fn max(&self, maximum: u32) -> Self {
        let mut copy = self.clone();
        let minimum = copy.detail.length.and_then(|l| l.minimum);
        copy.detail.length = Some(RelationshipLength {
            minimum,
            maximum: Some(maximum),
            unbounded: false,
        });
        copy
    }

    /// A property of this relationship; requires it to be named.
    pub fn property(&self, name: &str) -> Result<Property> {
        let symbolic_name = self.required_symbolic_name()?;
        Property::create(Expression::SymbolicName(symbolic_name), name)
    }

    /// This relationship in expression position; requires a name.
    pub fn as_expression(&self) -> Result<Expression> {
        Ok(Expression::SymbolicName(self.required_symbolic_name()?))
    }

    /// Extends the pattern with another outgoing hop, forming a chain.
    pub fn relationship_to(&self, other: &Node, types: &[&str]) -> Result<RelationshipChain> {
        let next = Relationship::create(
            self.right.clone(),
            Direction::LeftToRight,
            other.clone(),
            types,
        )?;
        Ok(RelationshipChain {
            relationships: vec![self.clone(), next],
        })
    }

    /// Extends the pattern with another incoming hop, forming a chain.
    pub fn relationship_from(&self, other: &Node, types: &[&str]) -> Result<RelationshipChain> {
        let next = Relationship::create(
            self.right.clone(),
            Direction::RightToLeft,
            other.clone(),
            types,
        )?;
        Ok(RelationshipChain {
            relationships: vec![self.clone(), next],
        })
    }
}

impl Named for Relationship {
    fn symbolic_name(&self) -> Option<&SymbolicName> {
        self.detail.symbolic_name.as_ref()
    }

    fn element_kind(&self) -> &'static str {
        "relationship"
    }
}

// ============================================================================
// Relationship chains
// ============================================================================

/// Two or more relationships sharing intermediate nodes,
/// `(a)-[r1]->(b)-[r2]->(c)`.
///
/// The `named`, length and property modifiers apply to the last segment,
/// matching the fluent reading order of the pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipChain {
    /// The segments in pattern order; never empty.
    pub relationships: Vec<Relationship>,
}

impl RelationshipChain {
    /// Extends the chain with another outgoing hop.
    pub fn relationship_to(&self, other: &Node, types: &[&str]) -> Result<Self> {
        self.extend(Direction::LeftToRight, other, types)
    }

    /// Extends the chain with another incoming hop.
    pub fn relationship_from(&self, other: &Node, types: &[&str]) -> Result<Self> {
        self.extend(Direction::RightToLeft, other, types)
    }

    fn extend(&self, direction: Direction, other: &Node, types: &[&str]) -> Result<Self> {
        let mut copy = self.clone();
        let start = match copy.relationships.last() {
            Some(last) => last.right.clone(),
            None => Node::any(),
        };
        copy.relationships
            .push(Relationship::create(start, direction, other.clone(), types)?);
        Ok(copy)
    }

    /// Names the last segment of the chain.
    pub fn named(&self, name: &str) -> Result<Self> {
        let name = SymbolicName::new(name)?;
        Ok(self.map_last(|detail| detail.symbolic_name = Some(name.clone())))
    }

    /// Sets a property map on the last segment.
    pub fn with_properties(&self, properties: MapExpression) -> Self {
        self.map_last(|detail| detail.properties = Some(properties.clone()))
    }

    /// Makes the last segment fully unbounded.
    pub fn unbounded(&self) -> Self {
        self.map_last(|detail| detail.length = Some(RelationshipLength::unbounded()))
    }

    /// Sets explicit hop bounds on the last segment.
    pub fn length(&self, minimum: Option<u32>, maximum: Option<u32>) -> Self {
        self.map_last(|detail| {
            detail.length = Some(RelationshipLength {
                minimum,
                maximum,
                unbounded: minimum.is_none() && maximum.is_none(),
            })
        })
    }

    /// Sets a minimum hop count on the last segment.
    pub fn min(&self, minimum: u32) -> Self {
        self.map_last(|detail| {
            let maximum = detail.length.and_then(|l| l.maximum);
            detail.length = Some(RelationshipLength {
                minimum: Some(minimum),
                maximum,
                unbounded: false,
            })
        })
    }

    /// Sets a maximum hop count on the last segment.
    pub fn max(&self, maximum: u32) -> Self {
        self.map_last(|detail| {
            let minimum = detail.length.and_then(|l| l.minimum);
            detail.length = Some(RelationshipLength {
                minimum,
                maximum: Some(maximum),
                unbounded: false,
            })
        })
    }

    fn map_last(&self, f: impl FnOnce(&mut RelationshipDetail)) -> Self {
        let mut copy = self.clone();
        if let Some(last) = copy.relationships.last_mut() {
            f(&mut last.detail);
        }
        copy
    }
}

impl Named for RelationshipChain {
    fn symbolic_name(&self) -> Option<&SymbolicName> {
        self.relationships
            .last()
            .and_then(|r| r.detail.symbolic_name.as_ref())
    }

    fn element_kind(&self) -> &'static str {
        "relationship chain"
    }
}

// ============================================================================
// Named paths and pattern containers
// ============================================================================

/// A relationship pattern usable in expression position.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternExpression {
    /// A single relationship.
    Relationship(Box<Relationship>),
    /// A relationship chain.
    Chain(Box<RelationshipChain>),
}

impl From<Relationship> for PatternExpression {
    fn from(value: Relationship) -> Self {
        PatternExpression::Relationship(Box::new(value))
    }
}

impl From<RelationshipChain> for PatternExpression {
    fn from(value: RelationshipChain) -> Self {
        PatternExpression::Chain(Box::new(value))
    }
}

/// A path variable bound to a relationship pattern, `p = (a)-[r]->(b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedPath {
    /// The path variable.
    pub name: SymbolicName,
    /// The bound pattern.
    pub pattern: PatternExpression,
}

impl NamedPath {
    /// Binds a pattern to a path variable.
    pub fn create(name: SymbolicName, pattern: impl Into<PatternExpression>) -> Self {
        Self {
            name,
            pattern: pattern.into(),
        }
    }
}

impl Named for NamedPath {
    fn symbolic_name(&self) -> Option<&SymbolicName> {
        Some(&self.name)
    }

    fn element_kind(&self) -> &'static str {
        "path"
    }
}

/// One element of a MATCH/CREATE/MERGE pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternElement {
    /// A lone node.
    Node(Node),
    /// A single relationship.
    Relationship(Relationship),
    /// A relationship chain.
    Chain(RelationshipChain),
    /// A named path.
    Path(NamedPath),
}

impl From<Node> for PatternElement {
    fn from(value: Node) -> Self {
        PatternElement::Node(value)
    }
}

impl From<Relationship> for PatternElement {
    fn from(value: Relationship) -> Self {
        PatternElement::Relationship(value)
    }
}

impl From<RelationshipChain> for PatternElement {
    fn from(value: RelationshipChain) -> Self {
        PatternElement::Chain(value)
    }
}

impl From<NamedPath> for PatternElement {
    fn from(value: NamedPath) -> Self {
        PatternElement::Path(value)
    }
}

impl From<PatternExpression> for PatternElement {
    fn from(value: PatternExpression) -> Self {
        match value {
            PatternExpression::Relationship(r) => PatternElement::Relationship(*r),
            PatternExpression::Chain(c) => PatternElement::Chain(*c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_modifiers_leave_the_original_untouched() {
        let bare = Node::new("Person", &[]).unwrap();
        let named = bare.named("p").unwrap();

        assert!(bare.symbolic_name.is_none());
        assert_eq!(named.symbolic_name.as_ref().map(SymbolicName::value), Some("p"));
        assert_eq!(bare.labels, named.labels);
    }

    #[test]
    fn unnamed_node_cannot_produce_a_property() {
        let bare = Node::new("Person", &[]).unwrap();
        assert!(matches!(
            bare.property("name"),
            Err(Error::Unnamed { what: "node" })
        ));
    }

    #[test]
    fn relationship_length_forms_are_distinct() {
        let a = Node::new("A", &[]).unwrap();
        let b = Node::new("B", &[]).unwrap();
        let rel = a.relationship_to(&b, &["REL"]).unwrap();

        assert!(rel.detail.length.is_none());

        let open = rel.length(None, None);
        assert_eq!(open.detail.length, Some(RelationshipLength::unbounded()));

        let bounded = rel.length(Some(2), Some(5));
        let length = bounded.detail.length.unwrap();
        assert_eq!(length.minimum, Some(2));
        assert_eq!(length.maximum, Some(5));
        assert!(!length.unbounded);
    }

    #[test]
    fn min_and_max_compose() {
        let a = Node::new("A", &[]).unwrap();
        let b = Node::new("B", &[]).unwrap();
        let rel = a.relationship_to(&b, &[]).unwrap().min(1).max(3);

        let length = rel.detail.length.unwrap();
        assert_eq!(length.minimum, Some(1));
        assert_eq!(length.maximum, Some(3));
    }

    #[test]
    fn chain_modifiers_touch_the_last_segment() {
        let a = Node::new("A", &[]).unwrap().named("a").unwrap();
        let b = Node::new("B", &[]).unwrap().named("b").unwrap();
        let c = Node::new("C", &[]).unwrap().named("c").unwrap();

        let chain = a
            .relationship_to(&b, &["R1"])
            .unwrap()
            .named("r1")
            .unwrap()
            .relationship_to(&c, &["R2"])
            .unwrap()
            .named("r2")
            .unwrap();

        assert_eq!(chain.relationships.len(), 2);
        assert_eq!(
            chain.relationships[0]
                .detail
                .symbolic_name
                .as_ref()
                .map(SymbolicName::value),
            Some("r1")
        );
        assert_eq!(
            chain.relationships[1]
                .detail
                .symbolic_name
                .as_ref()
                .map(SymbolicName::value),
            Some("r2")
        );
        // Intermediate node is shared between the segments.
        assert_eq!(chain.relationships[0].right, chain.relationships[1].left);
    }

    #[test]
    fn blank_relationship_type_is_rejected() {
        let a = Node::any();
        let b = Node::any();
        assert!(matches!(
            a.relationship_to(&b, &[" "]),
            Err(Error::EmptyLabel)
        ));
    }
}
