//! Expression trees for navigation lambdas.
//!
//! Provides the closed node type the path parser walks, a fluent builder for
//! constructing trees in code, and a `nom` parser for lambda source text such
//! as `x => x.Orders.Select(o => o.Items)`.

pub mod ast;
pub mod error;
mod parser;

// --- Public API ---
pub use ast::{BinaryOperator, Expression, Literal, UnaryOperator};
pub use error::ExprError;
pub use parser::{MAX_NESTING, parse_expression, parse_expression_with_limit, parse_lambda};
