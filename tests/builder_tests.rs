//! End-to-end builder tests: legal clause sequences, validation failures
//! and the structure of the produced statements.

use cypher_dsl::ast::{Clause, Condition, Expression, SortDirection, Statement};
use cypher_dsl::ast::pattern::Node;
use cypher_dsl::{Error, cypher, functions};

fn person() -> Node {
    cypher::node("Person").unwrap().named("p").unwrap()
}

#[test]
fn match_where_return_scenario() {
    let p = person();
    let statement = cypher::match_(p.clone())
        .unwrap()
        .where_(p.property("age").unwrap().gt(cypher::literal(30)))
        .returning(vec![p.as_expression().unwrap()])
        .unwrap()
        .build()
        .unwrap();

    let Statement::SinglePart(query) = statement else {
        panic!("expected a single-part query");
    };
    assert_eq!(query.clauses.len(), 1);
    let Clause::Match(match_) = &query.clauses[0] else {
        panic!("expected a MATCH clause");
    };
    assert!(!match_.optional);
    assert_eq!(match_.pattern.elements.len(), 1);
    let where_ = match_.where_.as_ref().expect("WHERE should be present");
    assert!(matches!(where_.condition, Condition::Comparison(_)));

    let return_ = query.return_.expect("RETURN should be present");
    assert_eq!(return_.items.len(), 1);
    assert!(matches!(
        return_.items.expressions[0],
        Expression::SymbolicName(_)
    ));
}

#[test]
fn identical_call_sequences_build_equal_statements() {
    let build = || {
        let p = person();
        cypher::match_(p.clone())
            .unwrap()
            .where_(p.property("age").unwrap().gt(cypher::literal(30)))
            .returning(vec![p.as_expression().unwrap()])
            .unwrap()
            .build()
            .unwrap()
    };
    assert_eq!(build(), build());
}

#[test]
fn shared_node_is_untouched_by_later_statements() {
    let p = person();
    let first = cypher::match_(p.clone())
        .unwrap()
        .returning(vec![p.as_expression().unwrap()])
        .unwrap()
        .build()
        .unwrap();

    // Reusing p with extra properties must not affect the first statement.
    let enriched = p.with_properties(
        cypher::map_of(vec![("age", cypher::literal(30))]).unwrap(),
    );
    let second = cypher::match_(enriched)
        .unwrap()
        .returning(vec![p.as_expression().unwrap()])
        .unwrap()
        .build()
        .unwrap();

    assert_ne!(first, second);
    let rebuilt = cypher::match_(p.clone())
        .unwrap()
        .returning(vec![p.as_expression().unwrap()])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(first, rebuilt);
}

#[test]
fn optional_match_sets_the_flag() {
    let p = person();
    let statement = cypher::optional_match(p.clone())
        .unwrap()
        .returning(vec![p.as_expression().unwrap()])
        .unwrap()
        .build()
        .unwrap();
    let Statement::SinglePart(query) = statement else {
        panic!("expected a single-part query");
    };
    let Clause::Match(match_) = &query.clauses[0] else {
        panic!("expected a MATCH clause");
    };
    assert!(match_.optional);
}

#[test]
fn multi_part_query_with_aggregation() {
    let p = person();
    let statement = cypher::match_(p.clone())
        .unwrap()
        .with(vec![
            p.as_expression().unwrap(),
            functions::count(cypher::asterisk()).alias("total").unwrap().into(),
        ])
        .unwrap()
        .where_(cypher::name("total").unwrap().gt(cypher::literal(1)))
        .returning(vec![p.as_expression().unwrap()])
        .unwrap()
        .build()
        .unwrap();

    let Statement::MultiPart(multi) = statement else {
        panic!("expected a multi-part query");
    };
    assert_eq!(multi.elements.len(), 1);
    let element = &multi.elements[0];
    assert_eq!(element.clauses.len(), 1);
    assert_eq!(element.with.items.len(), 2);
    assert!(element.with.where_.is_some());
    assert!(multi.remainder.return_.is_some());
}

#[test]
fn create_set_delete_round() {
    let p = person();
    let statement = cypher::create(p.clone())
        .unwrap()
        .set(vec![
            p.property("name").unwrap().into(),
            cypher::literal("Thomas"),
        ])
        .unwrap()
        .build()
        .unwrap();

    let Statement::SinglePart(query) = statement else {
        panic!("expected a single-part query");
    };
    assert_eq!(query.clauses.len(), 2);
    assert!(matches!(query.clauses[0], Clause::Create(_)));
    assert!(matches!(query.clauses[1], Clause::Set(_)));
    assert!(query.return_.is_none());
}

#[test]
fn detach_delete_carries_the_flag() {
    let p = person();
    let statement = cypher::match_(p.clone())
        .unwrap()
        .detach_delete(vec![p.as_expression().unwrap()])
        .unwrap()
        .build()
        .unwrap();
    let Statement::SinglePart(query) = statement else {
        panic!("expected a single-part query");
    };
    let Clause::Delete(delete) = &query.clauses[1] else {
        panic!("expected a DELETE clause");
    };
    assert!(delete.detach);
}

#[test]
fn label_updates_produce_set_and_remove_clauses() {
    let p = person();
    let statement = cypher::match_(p.clone())
        .unwrap()
        .set_labels(&p, &["Actor"])
        .unwrap()
        .remove_labels(&p, &["Retired"])
        .unwrap()
        .build()
        .unwrap();
    let Statement::SinglePart(query) = statement else {
        panic!("expected a single-part query");
    };
    assert!(matches!(query.clauses[1], Clause::Set(_)));
    assert!(matches!(query.clauses[2], Clause::Remove(_)));
}

#[test]
fn set_labels_requires_a_named_node() {
    let anonymous = cypher::any_node();
    let result = cypher::match_(anonymous.clone())
        .unwrap()
        .set_labels(&anonymous, &["Actor"]);
    assert!(matches!(result, Err(Error::Unnamed { what: "node" })));
}

#[test]
fn odd_set_pairs_fail_at_the_offending_call() {
    let p = person();
    let result = cypher::match_(p.clone())
        .unwrap()
        .set(vec![p.property("name").unwrap().into()]);
    assert!(matches!(result, Err(Error::OddSetExpressionCount { count: 1 })));
}

#[test]
fn ordering_skip_and_limit_on_return() {
    let p = person();
    let statement = cypher::match_(p.clone())
        .unwrap()
        .returning(vec![p.as_expression().unwrap()])
        .unwrap()
        .order_by_expr(p.property("name").unwrap())
        .ascending()
        .and(p.property("age").unwrap())
        .descending()
        .skip(5)
        .limit(10)
        .build()
        .unwrap();

    let Statement::SinglePart(query) = statement else {
        panic!("expected a single-part query");
    };
    let return_ = query.return_.unwrap();
    let order = return_.order.unwrap();
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].direction, Some(SortDirection::Ascending));
    assert_eq!(order.items[1].direction, Some(SortDirection::Descending));
    assert!(return_.skip.is_some());
    assert!(return_.limit.is_some());
}

#[test]
fn none_clears_skip_and_limit() {
    let p = person();
    let statement = cypher::match_(p.clone())
        .unwrap()
        .returning(vec![p.as_expression().unwrap()])
        .unwrap()
        .skip(None)
        .limit(None)
        .build()
        .unwrap();
    let Statement::SinglePart(query) = statement else {
        panic!("expected a single-part query");
    };
    let return_ = query.return_.unwrap();
    assert!(return_.skip.is_none());
    assert!(return_.limit.is_none());
}

#[test]
fn unwind_feeds_subsequent_clauses() {
    let statement = cypher::unwind(cypher::literal(vec![1.into(), 2.into(), 3.into()]))
        .unwrap()
        .as_("x")
        .unwrap()
        .returning(vec![cypher::name("x").unwrap()])
        .unwrap()
        .build()
        .unwrap();
    let Statement::SinglePart(query) = statement else {
        panic!("expected a single-part query");
    };
    assert!(matches!(query.clauses[0], Clause::Unwind(_)));
}

#[test]
fn merge_then_return() {
    let p = person();
    let statement = cypher::merge(p.clone())
        .unwrap()
        .returning(vec![p.as_expression().unwrap()])
        .unwrap()
        .build()
        .unwrap();
    let Statement::SinglePart(query) = statement else {
        panic!("expected a single-part query");
    };
    assert!(matches!(query.clauses[0], Clause::Merge(_)));
    assert!(query.return_.is_some());
}

#[test]
fn distinct_projections() {
    let p = person();
    let statement = cypher::match_(p.clone())
        .unwrap()
        .returning_distinct(vec![p.as_expression().unwrap()])
        .unwrap()
        .build()
        .unwrap();
    let Statement::SinglePart(query) = statement else {
        panic!("expected a single-part query");
    };
    assert!(query.return_.unwrap().distinct);
}
