//! Resolves navigation lambdas into dotted include paths for eager loading.
//!
//! Given `x => x.Orders.Select(o => o.Items)`, [`parse_path`] produces
//! `"Orders.Items"`, the string form an ORM's include-by-path primitive
//! expects. Lambdas are built in code with the [`Expression`] builders or
//! parsed from source text, and [`include_entities`] drives any
//! [`EagerLoad`] query from a list of them.
//!
//! ```
//! use include_path::{Expression, parse_path};
//!
//! let lambda = Expression::lambda(
//!     "x",
//!     Expression::parameter("x").member("Orders").call(
//!         "Select",
//!         [Expression::lambda("o", Expression::parameter("o").member("Items"))],
//!     ),
//! );
//! assert_eq!(parse_path(&lambda).unwrap(), "Orders.Items");
//! ```

pub mod config;
pub mod error;
pub mod include;
pub mod path;

// --- Public API ---
pub use config::PathConfig;
pub use error::PathError;
pub use include::{EagerLoad, IncludeEntitiesExt, QueryPlan, include_entities};
pub use path::{PathParser, parse_path};

pub use include_path_expr::{
    BinaryOperator, ExprError, Expression, Literal, MAX_NESTING, UnaryOperator, parse_expression,
    parse_expression_with_limit, parse_lambda,
};
