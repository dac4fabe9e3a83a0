//! Traversal tests: event order, optional-child skipping and the
//! distinguishability guarantees renderers rely on.

use std::ops::ControlFlow;

use cypher_dsl::ast::visitors::{CollectingVisitor, VariableCollector};
use cypher_dsl::ast::{AstNode, Statement, VisitResult, Visitable, Visitor};
use cypher_dsl::cypher;

#[derive(Default)]
struct Tags {
    tags: Vec<&'static str>,
}

impl Visitor for Tags {
    type Break = ();

    fn enter(&mut self, node: AstNode<'_>) -> VisitResult<()> {
        self.tags.push(tag(node));
        ControlFlow::Continue(())
    }
}

fn tag(node: AstNode<'_>) -> &'static str {
    match node {
        AstNode::Match(_) => "match",
        AstNode::Where(_) => "where",
        AstNode::Return(_) => "return",
        AstNode::Order(_) => "order",
        AstNode::Skip(_) => "skip",
        AstNode::Limit(_) => "limit",
        AstNode::With(_) => "with",
        AstNode::Node(_) => "node",
        AstNode::RelationshipDetail(_) => "detail",
        AstNode::RelationshipTypes(_) => "types",
        AstNode::RelationshipLength(_) => "length",
        AstNode::SymbolicName(_) => "name",
        AstNode::Operator(_) => "operator",
        _ => "other",
    }
}

fn tags_of(visitable: &impl Visitable) -> Vec<&'static str> {
    let mut visitor = Tags::default();
    let _ = visitable.accept(&mut visitor);
    visitor.tags
}

#[test]
fn absent_optional_children_emit_nothing() {
    let p = cypher::node("Person").unwrap().named("p").unwrap();
    let statement = cypher::match_(p.clone())
        .unwrap()
        .returning(vec![p.as_expression().unwrap()])
        .unwrap()
        .build()
        .unwrap();

    let tags = tags_of(&statement);
    assert!(tags.contains(&"match"));
    assert!(tags.contains(&"return"));
    assert!(!tags.contains(&"where"));
    assert!(!tags.contains(&"order"));
    assert!(!tags.contains(&"skip"));
    assert!(!tags.contains(&"limit"));
}

#[test]
fn where_follows_its_match_pattern() {
    let p = cypher::node("Person").unwrap().named("p").unwrap();
    let statement = cypher::match_(p.clone())
        .unwrap()
        .where_(p.property("age").unwrap().gt(cypher::literal(30)))
        .returning(vec![p.as_expression().unwrap()])
        .unwrap()
        .build()
        .unwrap();

    let tags = tags_of(&statement);
    let match_at = tags.iter().position(|t| *t == "match").unwrap();
    let node_at = tags.iter().position(|t| *t == "node").unwrap();
    let where_at = tags.iter().position(|t| *t == "where").unwrap();
    let return_at = tags.iter().position(|t| *t == "return").unwrap();
    assert!(match_at < node_at && node_at < where_at && where_at < return_at);
}

#[test]
fn relationship_length_forms_are_distinguishable_in_traversal() {
    let a = cypher::node("A").unwrap().named("a").unwrap();
    let b = cypher::node("B").unwrap().named("b").unwrap();

    let single_hop = a.relationship_to(&b, &["REL"]).unwrap();
    assert!(!tags_of(&single_hop).contains(&"length"));

    let unbounded = single_hop.unbounded();
    assert!(tags_of(&unbounded).contains(&"length"));

    let mut bounds = None;
    let mut collector = CollectingVisitor::new(|node| match node {
        AstNode::RelationshipLength(length) => Some(*length),
        _ => None,
    });
    let bounded = single_hop.length(Some(2), Some(5));
    let _ = bounded.accept(&mut collector);
    if let [length] = collector.items() {
        bounds = Some((length.minimum, length.maximum, length.unbounded));
    }
    assert_eq!(bounds, Some((Some(2), Some(5), false)));
}

#[test]
fn named_bounded_chain_segment_scenario() {
    let a = cypher::node("A").unwrap().named("a").unwrap();
    let b = cypher::node("B").unwrap().named("b").unwrap();
    let rel = a
        .relationship_to(&b, &["REL"])
        .unwrap()
        .named("r")
        .unwrap()
        .min(1)
        .max(3);

    let tags = tags_of(&rel);
    // left node, then the detail with name, types and length, then right.
    let detail_at = tags.iter().position(|t| *t == "detail").unwrap();
    assert!(tags[..detail_at].contains(&"node"));
    assert!(tags[detail_at..].contains(&"types"));
    assert!(tags[detail_at..].contains(&"length"));

    let mut collector = CollectingVisitor::new(|node| match node {
        AstNode::RelationshipLength(length) => Some((length.minimum, length.maximum)),
        _ => None,
    });
    let _ = rel.accept(&mut collector);
    assert_eq!(collector.items(), [(Some(1), Some(3))]);
}

#[test]
fn union_visits_head_then_parts() {
    let build = |label: &str| {
        let n = cypher::node(label).unwrap().named("n").unwrap();
        cypher::match_(n.clone())
            .unwrap()
            .returning(vec![n.as_expression().unwrap()])
            .unwrap()
            .build()
            .unwrap()
    };
    let combined = cypher::union(vec![build("A"), build("B")]).unwrap();
    assert!(matches!(combined, Statement::Union(_)));

    let tags = tags_of(&combined);
    assert_eq!(tags.iter().filter(|t| **t == "match").count(), 2);
    assert_eq!(tags.iter().filter(|t| **t == "return").count(), 2);
}

#[test]
fn variable_collector_sees_every_name() {
    let p = cypher::node("Person").unwrap().named("p").unwrap();
    let m = cypher::node("Movie").unwrap().named("m").unwrap();
    let statement = cypher::match_(
        p.relationship_to(&m, &["ACTED_IN"]).unwrap().named("r").unwrap(),
    )
    .unwrap()
    .returning(vec![p.as_expression().unwrap(), m.as_expression().unwrap()])
    .unwrap()
    .build()
    .unwrap();

    let names = VariableCollector::names_of(&statement);
    let collected: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
    assert_eq!(collected, ["m", "p", "r"]);
}

#[test]
fn with_projection_is_visited_inside_its_part() {
    let p = cypher::node("Person").unwrap().named("p").unwrap();
    let statement = cypher::match_(p.clone())
        .unwrap()
        .with(vec![p.as_expression().unwrap()])
        .unwrap()
        .returning(vec![p.as_expression().unwrap()])
        .unwrap()
        .build()
        .unwrap();

    let tags = tags_of(&statement);
    let with_at = tags.iter().position(|t| *t == "with").unwrap();
    let match_at = tags.iter().position(|t| *t == "match").unwrap();
    let return_at = tags.iter().position(|t| *t == "return").unwrap();
    assert!(match_at < with_at && with_at < return_at);
}
