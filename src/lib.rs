//! A fluent builder for openCypher-style query ASTs.
//!
//! Queries are assembled through the [`cypher`] facade and the builder's
//! grammar-constrained fluent API, producing an immutable, fully-typed
//! [`ast::Statement`]. Rendering is out of scope; consumers walk the tree
//! through the [`ast::Visitor`] protocol.
//!
//! # Example
//!
//! ```
//! use cypher_dsl::cypher;
//!
//! # fn main() -> Result<(), cypher_dsl::Error> {
//! let movie = cypher::node_with_labels("m", &["Movie"])?;
//! let statement = cypher::match_(movie.clone())?
//!     .where_(movie.property("title")?.is_equal_to(cypher::parameter("$title")?))
//!     .returning(vec![movie.as_expression()?])?
//!     .build()?;
//! # let _ = statement;
//! # Ok(())
//! # }
//! ```

pub mod ast;
pub mod builder;
pub mod cypher;
pub mod error;
pub mod functions;
pub mod predicates;

pub use ast::{Condition, Expression, Literal, Statement};
pub use ast::{Visitable, Visitor};
pub use error::{Error, Result};
