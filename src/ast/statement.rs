//! Statement containers: single-part queries, WITH-delimited multi-part
//! queries and unions.

use crate::ast::clause::{Clause, Return, With};
use crate::error::{Error, Result};

// ============================================================================
// Single and multi part queries
// ============================================================================

/// A linear run of clauses with an optional terminal RETURN.
#[derive(Debug, Clone, PartialEq)]
pub struct SinglePartQuery {
    /// The body clauses in order.
    pub clauses: Vec<Clause>,
    /// The terminal RETURN, if any.
    pub return_: Option<Return>,
}

impl SinglePartQuery {
    /// Creates a single-part query.
    ///
    /// Without a RETURN, the query must not be empty and must not end in a
    /// bare MATCH. The fluent builder cannot produce such a query, but
    /// statements assembled for a union pass through here as well.
    pub fn create(clauses: Vec<Clause>, return_: Option<Return>) -> Result<Self> {
        if return_.is_none() {
            if clauses.is_empty() {
                return Err(Error::MissingInput {
                    what: "clause list",
                });
            }
            if matches!(clauses.last(), Some(Clause::Match(_))) {
                return Err(Error::MatchWithoutReturn);
            }
        }
        Ok(Self { clauses, return_ })
    }
}

/// One WITH-terminated part of a multi-part query.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPartElement {
    /// The part's body clauses.
    pub clauses: Vec<Clause>,
    /// The WITH closing the part.
    pub with: With,
}

/// A query of several WITH-delimited parts and a trailing single part.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPartQuery {
    /// The WITH-terminated parts in order; never empty.
    pub elements: Vec<MultiPartElement>,
    /// The trailing part after the last WITH.
    pub remainder: SinglePartQuery,
}

/// A query that can stand alone or participate in a union.
#[derive(Debug, Clone, PartialEq)]
pub enum SingleQuery {
    /// A linear query.
    SinglePart(SinglePartQuery),
    /// A WITH-delimited query.
    MultiPart(MultiPartQuery),
}

// ============================================================================
// Unions
// ============================================================================

/// One `UNION [ALL] query` continuation.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionPart {
    /// Whether this continuation keeps duplicates.
    pub all: bool,
    /// The appended query.
    pub query: SingleQuery,
}

/// A union of two or more single queries under one shared ALL flag.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionQuery {
    /// Whether the whole union keeps duplicates.
    pub all: bool,
    /// The first query.
    pub head: Box<SingleQuery>,
    /// The remaining queries; never empty.
    pub tail: Vec<UnionPart>,
}

impl UnionQuery {
    pub(crate) fn create(all: bool, queries: Vec<SingleQuery>) -> Result<Self> {
        if queries.len() < 2 {
            return Err(Error::UnionTooFewStatements {
                count: queries.len(),
            });
        }
        let mut iter = queries.into_iter();
        let head = match iter.next() {
            Some(head) => head,
            None => {
                return Err(Error::UnionTooFewStatements { count: 0 });
            }
        };
        let tail = iter.map(|query| UnionPart { all, query }).collect();
        Ok(Self {
            all,
            head: Box::new(head),
            tail,
        })
    }

    pub(crate) fn extended_with(&self, all: bool, additional: Vec<SingleQuery>) -> Result<Self> {
        if self.all != all {
            return Err(Error::MixedUnionStyle);
        }
        let mut extended = self.clone();
        extended
            .tail
            .extend(additional.into_iter().map(|query| UnionPart { all, query }));
        Ok(extended)
    }
}

// ============================================================================
// The statement sum type
// ============================================================================

/// A complete, buildable statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A linear query.
    SinglePart(SinglePartQuery),
    /// A WITH-delimited query.
    MultiPart(MultiPartQuery),
    /// A union of single queries.
    Union(UnionQuery),
}

impl Statement {
    /// Converts this statement into a union operand.
    ///
    /// Unions cannot be nested, so a union statement is rejected here; the
    /// way to grow a union is to pass it as the first statement of another
    /// `union` call.
    pub(crate) fn into_single_query(self) -> Result<SingleQuery> {
        match self {
            Statement::SinglePart(query) => Ok(SingleQuery::SinglePart(query)),
            Statement::MultiPart(query) => Ok(SingleQuery::MultiPart(query)),
            Statement::Union(_) => Err(Error::UnionRequiresSingleQuery),
        }
    }
}

impl From<SingleQuery> for Statement {
    fn from(value: SingleQuery) -> Self {
        match value {
            SingleQuery::SinglePart(query) => Statement::SinglePart(query),
            SingleQuery::MultiPart(query) => Statement::MultiPart(query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::clause::{Match, Pattern};
    use crate::ast::pattern::Node;

    fn match_clause() -> Clause {
        let node = Node::new("A", &[]).unwrap();
        Clause::Match(Match {
            optional: false,
            pattern: Pattern::new(vec![node.into()]).unwrap(),
            where_: None,
        })
    }

    #[test]
    fn bare_match_without_return_is_rejected() {
        let result = SinglePartQuery::create(vec![match_clause()], None);
        assert!(matches!(result, Err(Error::MatchWithoutReturn)));
    }

    #[test]
    fn empty_query_is_rejected() {
        let result = SinglePartQuery::create(Vec::new(), None);
        assert!(matches!(result, Err(Error::MissingInput { .. })));
    }

    #[test]
    fn union_requires_two_queries() {
        let result = UnionQuery::create(false, Vec::new());
        assert!(matches!(
            result,
            Err(Error::UnionTooFewStatements { count: 0 })
        ));
    }
}
