//! Construction-error model for the statement and expression factories.
//!
//! Every fallible factory in the crate returns [`Result`] with this error
//! type. The variants form a closed taxonomy over the preconditions the
//! builders enforce: identifier validity, non-empty inputs, map key
//! uniqueness, SET pairing, and the composition rules for UNION.

use miette::{Diagnostic, Severity};
use std::fmt;

/// Shared result alias for all fallible constructors.
pub type Result<T> = std::result::Result<T, Error>;

/// The reason a statement or expression could not be constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A symbolic name did not satisfy the identifier rules.
    InvalidIdentifier {
        /// The rejected input.
        value: String,
    },
    /// A required argument was empty or blank.
    MissingInput {
        /// What was expected (for example "pattern", "parameter name").
        what: &'static str,
    },
    /// A node label or relationship type was empty.
    EmptyLabel,
    /// A map literal or projection repeated a key within one construction call.
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
    /// A unary comparison was requested with a binary operator.
    UnaryOperatorRequired {
        /// The textual representation of the offending operator.
        operator: &'static str,
    },
    /// SET received a flat list of expressions that does not pair up evenly.
    OddSetExpressionCount {
        /// Number of expressions left after extracting structured operations.
        count: usize,
    },
    /// A named element was required but the pattern carries no symbolic name.
    Unnamed {
        /// The kind of element that was unnamed (for example "node").
        what: &'static str,
    },
    /// A percentile argument fell outside the closed interval [0, 1].
    PercentileOutOfRange {
        /// The rejected percentile.
        value: f64,
    },
    /// UNION was requested with fewer than two statements.
    UnionTooFewStatements {
        /// The number of statements supplied.
        count: usize,
    },
    /// UNION can only combine single queries, not other unions or mixed forms.
    UnionRequiresSingleQuery,
    /// UNION and UNION ALL were mixed in one combined statement.
    MixedUnionStyle,
    /// A statement ended in a bare MATCH without a RETURN.
    MatchWithoutReturn,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidIdentifier { value } => {
                write!(f, "`{value}` is not a valid symbolic name")
            }
            Error::MissingInput { what } => write!(f, "a non-empty {what} is required"),
            Error::EmptyLabel => write!(f, "labels and types must not be empty"),
            Error::DuplicateKey { key } => {
                write!(f, "duplicate key `{key}` in map construction")
            }
            Error::UnaryOperatorRequired { operator } => {
                write!(f, "operator `{operator}` cannot be used in a unary comparison")
            }
            Error::OddSetExpressionCount { count } => {
                write!(f, "SET requires an even number of expressions, got {count}")
            }
            Error::Unnamed { what } => {
                write!(f, "the {what} has no symbolic name in this context")
            }
            Error::PercentileOutOfRange { value } => {
                write!(f, "percentile must be between 0.0 and 1.0, got {value}")
            }
            Error::UnionTooFewStatements { count } => {
                write!(f, "at least two statements are required for a union, got {count}")
            }
            Error::UnionRequiresSingleQuery => {
                write!(f, "only single queries can be combined into a union")
            }
            Error::MixedUnionStyle => {
                write!(f, "cannot mix UNION and UNION ALL in one statement")
            }
            Error::MatchWithoutReturn => {
                write!(f, "a statement ending in MATCH must have a RETURN")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Diagnostic for Error {
    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }

    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self {
            Error::InvalidIdentifier { .. } => "cypher::invalid_identifier",
            Error::MissingInput { .. } => "cypher::missing_input",
            Error::EmptyLabel => "cypher::empty_label",
            Error::DuplicateKey { .. } => "cypher::duplicate_key",
            Error::UnaryOperatorRequired { .. } => "cypher::unary_operator_required",
            Error::OddSetExpressionCount { .. } => "cypher::odd_set_expression_count",
            Error::Unnamed { .. } => "cypher::unnamed_element",
            Error::PercentileOutOfRange { .. } => "cypher::percentile_out_of_range",
            Error::UnionTooFewStatements { .. } => "cypher::union_too_few_statements",
            Error::UnionRequiresSingleQuery => "cypher::union_requires_single_query",
            Error::MixedUnionStyle => "cypher::mixed_union_style",
            Error::MatchWithoutReturn => "cypher::match_without_return",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self {
            Error::InvalidIdentifier { .. } => {
                "symbolic names start with a letter or `_` and continue with letters, digits or `_`"
            }
            Error::MissingInput { .. } => "pass at least one non-blank element",
            Error::EmptyLabel => "use a non-empty string for every label and relationship type",
            Error::DuplicateKey { .. } => "each key may appear at most once per call",
            Error::UnaryOperatorRequired { .. } => {
                "only prefix or postfix operators such as NOT or IS NULL are unary"
            }
            Error::OddSetExpressionCount { .. } => {
                "pass target/value pairs, or pre-built operations from `Operation::set`"
            }
            Error::Unnamed { .. } => "give the element a name with `named(...)` first",
            Error::PercentileOutOfRange { .. } => "use a fraction, e.g. 0.95 for the 95th percentile",
            Error::UnionTooFewStatements { .. } => "combine two or more built statements",
            Error::UnionRequiresSingleQuery => {
                "build the parts as plain queries and combine them once"
            }
            Error::MixedUnionStyle => "use either `union` or `union_all` for all parts",
            Error::MatchWithoutReturn => "add `returning(...)` or an update clause before `build`",
        };
        Some(Box::new(help))
    }
}
