//! Attaching resolved include paths to queries.
//!
//! The query layer is abstracted behind [`EagerLoad`], so any query builder
//! that accepts a dotted navigation path can be driven from lambdas.

use crate::error::PathError;
use crate::path::PathParser;
use include_path_expr::Expression;
use std::borrow::Borrow;
use std::collections::BTreeSet;

/// A query that can be told to eager-load related entities by path.
///
/// `include` consumes the query and returns the updated one, so builders
/// that produce a new query value per directive fit without interior
/// mutability.
pub trait EagerLoad: Sized {
    /// Attaches an eager-load directive for the dotted navigation `path`.
    fn include(self, path: &str) -> Self;
}

impl PathParser {
    /// Resolves each lambda and attaches its path to `source`, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first lambda that fails to resolve and returns its error.
    pub fn include_entities<Q, I>(&self, source: Q, lambdas: I) -> Result<Q, PathError>
    where
        Q: EagerLoad,
        I: IntoIterator,
        I::Item: Borrow<Expression>,
    {
        lambdas
            .into_iter()
            .try_fold(source, |query, lambda| -> Result<Q, PathError> {
                let lambda: &Expression = lambda.borrow();
                let path = self.parse(lambda)?;
                Ok(query.include(&path))
            })
    }

    /// Like [`PathParser::include_entities`], taking lambda source text.
    pub fn include_sources<'a, Q, I>(&self, source: Q, sources: I) -> Result<Q, PathError>
    where
        Q: EagerLoad,
        I: IntoIterator<Item = &'a str>,
    {
        sources
            .into_iter()
            .try_fold(source, |query, text| -> Result<Q, PathError> {
                let lambda = self.parse_source(text)?;
                let path = self.parse(&lambda)?;
                Ok(query.include(&path))
            })
    }
}

/// Attaches the include path of every lambda to `source` using the default configuration.
pub fn include_entities<Q, I>(source: Q, lambdas: I) -> Result<Q, PathError>
where
    Q: EagerLoad,
    I: IntoIterator,
    I::Item: Borrow<Expression>,
{
    PathParser::new().include_entities(source, lambdas)
}

/// Method-call sugar for driving any [`EagerLoad`] query from lambdas.
pub trait IncludeEntitiesExt: EagerLoad {
    fn include_entities<I>(self, lambdas: I) -> Result<Self, PathError>
    where
        I: IntoIterator,
        I::Item: Borrow<Expression>,
    {
        PathParser::new().include_entities(self, lambdas)
    }

    fn include_sources<'a, I>(self, sources: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        PathParser::new().include_sources(self, sources)
    }
}

impl<Q: EagerLoad> IncludeEntitiesExt for Q {}

/// An in-memory record of the eager-load directives attached to a query.
///
/// Paths are kept as a set: attaching the same paths in any order yields
/// equal plans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPlan {
    entity: String,
    includes: BTreeSet<String>,
}

impl QueryPlan {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            includes: BTreeSet::new(),
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// The attached paths, in lexical order.
    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.includes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty()
    }

    /// Whether `navigation` is loaded, either directly or as a prefix of a longer path.
    ///
    /// Including `Orders.Items` also loads `Orders`.
    pub fn loads(&self, navigation: &str) -> bool {
        self.includes.iter().any(|path| {
            path == navigation
                || path
                    .strip_prefix(navigation)
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }
}

impl EagerLoad for QueryPlan {
    fn include(mut self, path: &str) -> Self {
        if path.is_empty() {
            log::warn!(
                "Ignoring empty include path on query for '{}'",
                self.entity
            );
            return self;
        }
        self.includes.insert(path.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathConfig;

    fn lambda(members: &[&str]) -> Expression {
        let body = members
            .iter()
            .fold(Expression::parameter("x"), |expr, m| expr.member(*m));
        Expression::lambda("x", body)
    }

    #[test]
    fn test_include_entities_attaches_each_path() {
        let plan = include_entities(
            QueryPlan::new("Customer"),
            [lambda(&["Orders"]), lambda(&["Address", "Country"])],
        )
        .unwrap();

        assert_eq!(plan.entity(), "Customer");
        assert_eq!(plan.includes().collect::<Vec<_>>(), vec!["Address.Country", "Orders"]);
    }

    #[test]
    fn test_include_order_does_not_matter() {
        let a = lambda(&["Orders"]);
        let b = lambda(&["Address", "Country"]);

        let forward = include_entities(QueryPlan::new("Customer"), [&a, &b]).unwrap();
        let backward = include_entities(QueryPlan::new("Customer"), [&b, &a]).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_include_entities_stops_at_first_error() {
        let err = include_entities(
            QueryPlan::new("Customer"),
            vec![lambda(&["Orders"]), Expression::lambda("x", Expression::parameter("x"))],
        )
        .unwrap_err();
        assert!(matches!(err, PathError::UnsupportedExpressionShape { .. }));
    }

    #[test]
    fn test_include_sources_via_extension() {
        let plan = QueryPlan::new("Customer")
            .include_sources(["x => x.Orders.Select(o => o.Items)", "x => x.Address"])
            .unwrap();
        assert_eq!(plan.len(), 2);
        assert!(plan.loads("Orders"));
        assert!(plan.loads("Orders.Items"));
        assert!(!plan.loads("Order"));
        assert!(plan.loads("Address"));
    }

    #[test]
    fn test_include_sources_reports_parse_errors() {
        let err = QueryPlan::new("Customer")
            .include_sources(["x => x.Orders", "x => )"])
            .unwrap_err();
        assert!(matches!(err, PathError::Expression(_)));
    }

    #[test]
    fn test_empty_path_is_ignored() {
        let plan = QueryPlan::new("Customer")
            .include_sources(["x => x.Count()"])
            .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_configured_parser_drives_includes() {
        let parser = PathParser::with_config(PathConfig {
            skip_unrecognized_arguments: false,
            ..PathConfig::default()
        })
        .unwrap();
        let err = parser
            .include_sources(QueryPlan::new("Customer"), ["x => x.Orders.Take(5)"])
            .unwrap_err();
        assert!(matches!(err, PathError::UnsupportedArgument { .. }));
    }

    #[test]
    fn test_include_sources_bounds_nesting() {
        let deep = format!("x => {}x.Orders{}", "(".repeat(1_000), ")".repeat(1_000));
        let err = QueryPlan::new("Customer")
            .include_sources(["x => x.Address", deep.as_str()])
            .unwrap_err();
        assert!(matches!(err, PathError::DepthExceeded { .. }));
    }
}
