//! Ready-to-use AST visitors.

pub mod collecting;
pub mod variable;

pub use collecting::CollectingVisitor;
pub use variable::VariableCollector;
