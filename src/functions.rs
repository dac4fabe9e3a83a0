//! Built-in function invocations.
//!
//! Functions over graph elements (`id`, `labels`, `type`, `nodes`) take the
//! element itself and substitute its symbolic name, so an unnamed element is
//! rejected before it can produce an unreferencable invocation.

use crate::ast::expression::{Expression, FunctionInvocation, Literal};
use crate::ast::pattern::{Named, NamedPath, Node, Relationship};
use crate::error::{Error, Result};

fn invoke(name: &str, arguments: Vec<Expression>) -> Expression {
    FunctionInvocation::new(name, arguments).into()
}

fn invoke_on(name: &str, element: &impl Named) -> Result<Expression> {
    let symbolic_name = element.required_symbolic_name()?;
    Ok(invoke(name, vec![Expression::SymbolicName(symbolic_name)]))
}

/// `id(element)`
pub fn id(element: &impl Named) -> Result<Expression> {
    invoke_on("id", element)
}

/// `labels(node)`
pub fn labels(node: &Node) -> Result<Expression> {
    invoke_on("labels", node)
}

/// `type(relationship)`
pub fn type_of(relationship: &Relationship) -> Result<Expression> {
    invoke_on("type", relationship)
}

/// `nodes(path)`
pub fn nodes(path: &NamedPath) -> Result<Expression> {
    invoke_on("nodes", path)
}

/// `count(expression)`
pub fn count(expression: impl Into<Expression>) -> Expression {
    invoke("count", vec![expression.into()])
}

/// `count(DISTINCT expression)`
pub fn count_distinct(expression: impl Into<Expression>) -> Expression {
    FunctionInvocation::new_distinct("count", vec![expression.into()]).into()
}

/// `coalesce(e1, e2, ...)`
pub fn coalesce(expressions: Vec<Expression>) -> Expression {
    invoke("coalesce", expressions)
}

/// `toLower(expression)`
pub fn to_lower(expression: impl Into<Expression>) -> Expression {
    invoke("toLower", vec![expression.into()])
}

/// `toUpper(expression)`
pub fn to_upper(expression: impl Into<Expression>) -> Expression {
    invoke("toUpper", vec![expression.into()])
}

/// `size(expression)`
pub fn size(expression: impl Into<Expression>) -> Expression {
    invoke("size", vec![expression.into()])
}

/// `length(path)`
pub fn length(expression: impl Into<Expression>) -> Expression {
    invoke("length", vec![expression.into()])
}

/// `exists(expression)`
pub fn exists(expression: impl Into<Expression>) -> Expression {
    invoke("exists", vec![expression.into()])
}

/// `distance(point1, point2)`
pub fn distance(point1: impl Into<Expression>, point2: impl Into<Expression>) -> Expression {
    invoke("distance", vec![point1.into(), point2.into()])
}

/// `point(map)`
pub fn point(parameters: impl Into<Expression>) -> Expression {
    invoke("point", vec![parameters.into()])
}

/// `avg(expression)`
pub fn avg(expression: impl Into<Expression>) -> Expression {
    invoke("avg", vec![expression.into()])
}

/// `collect(expression)`
pub fn collect(expression: impl Into<Expression>) -> Expression {
    invoke("collect", vec![expression.into()])
}

/// `max(expression)`
pub fn max(expression: impl Into<Expression>) -> Expression {
    invoke("max", vec![expression.into()])
}

/// `min(expression)`
pub fn min(expression: impl Into<Expression>) -> Expression {
    invoke("min", vec![expression.into()])
}

/// `sum(expression)`
pub fn sum(expression: impl Into<Expression>) -> Expression {
    invoke("sum", vec![expression.into()])
}

/// `stDev(expression)`
pub fn st_dev(expression: impl Into<Expression>) -> Expression {
    invoke("stDev", vec![expression.into()])
}

/// `stDevP(expression)`
pub fn st_dev_p(expression: impl Into<Expression>) -> Expression {
    invoke("stDevP", vec![expression.into()])
}

/// `percentileCont(expression, percentile)`; the percentile must be in `[0, 1]`.
pub fn percentile_cont(expression: impl Into<Expression>, percentile: f64) -> Result<Expression> {
    percentile_invocation("percentileCont", expression.into(), percentile)
}

/// `percentileDisc(expression, percentile)`; the percentile must be in `[0, 1]`.
pub fn percentile_disc(expression: impl Into<Expression>, percentile: f64) -> Result<Expression> {
    percentile_invocation("percentileDisc", expression.into(), percentile)
}

fn percentile_invocation(name: &str, expression: Expression, value: f64) -> Result<Expression> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::PercentileOutOfRange { value });
    }
    Ok(invoke(
        name,
        vec![expression, Expression::Literal(Literal::Float(value))],
    ))
}

/// `range(start, end)`
pub fn range(start: impl Into<Expression>, end: impl Into<Expression>) -> Expression {
    invoke("range", vec![start.into(), end.into()])
}

/// `range(start, end, step)`
pub fn range_stepped(
    start: impl Into<Expression>,
    end: impl Into<Expression>,
    step: impl Into<Expression>,
) -> Expression {
    invoke("range", vec![start.into(), end.into(), step.into()])
}

/// `head(list)`
pub fn head(expression: impl Into<Expression>) -> Expression {
    invoke("head", vec![expression.into()])
}

/// `last(list)`
pub fn last(expression: impl Into<Expression>) -> Expression {
    invoke("last", vec![expression.into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::pattern::Node;

    #[test]
    fn element_functions_substitute_the_name() {
        let n = Node::new("Person", &[]).unwrap().named("n").unwrap();
        let id_call = id(&n).unwrap();
        let Expression::Function(function) = id_call else {
            panic!("expected function invocation");
        };
        assert_eq!(function.function_name(), "id");
        assert!(matches!(
            function.arguments.expressions[0],
            Expression::SymbolicName(_)
        ));
    }

    #[test]
    fn unnamed_element_is_rejected() {
        let anonymous = Node::any();
        assert!(matches!(
            labels(&anonymous),
            Err(Error::Unnamed { what: "node" })
        ));
    }

    #[test]
    fn count_distinct_carries_the_modifier() {
        let n = Node::new("Person", &[]).unwrap().named("n").unwrap();
        let call = count_distinct(n.as_expression().unwrap());
        let Expression::Function(function) = call else {
            panic!("expected function invocation");
        };
        assert!(function.is_distinct());
    }

    #[test]
    fn percentile_bounds() {
        let n = Node::new("Person", &[]).unwrap().named("n").unwrap();
        let age = n.property("age").unwrap();

        let call = percentile_cont(age.clone(), 0.5).unwrap();
        let Expression::Function(function) = call else {
            panic!("expected function invocation");
        };
        assert_eq!(function.function_name(), "percentileCont");
        assert_eq!(function.arguments.len(), 2);

        assert!(matches!(
            percentile_disc(age, 1.5),
            Err(Error::PercentileOutOfRange { .. })
        ));
    }
}
