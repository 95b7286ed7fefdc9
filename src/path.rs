//! Converts navigation lambdas into dotted include paths.
//!
//! `x => x.Orders.Select(o => o.Items)` resolves to `"Orders.Items"`: lambdas
//! contribute nothing, member chains contribute their names left to right, and
//! method calls contribute the paths of their arguments in order.

use crate::config::PathConfig;
use crate::error::PathError;
use include_path_expr::{ExprError, Expression, parse_expression_with_limit};

/// Resolves expression trees into include paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathParser {
    config: PathConfig,
}

impl PathParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a parser from `config`, rejecting invalid settings.
    ///
    /// # Errors
    ///
    /// Returns `PathError::Config` if `config.max_depth` is zero.
    pub fn with_config(config: PathConfig) -> Result<Self, PathError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Resolves the include path for a lambda, member access or method call.
    ///
    /// # Errors
    ///
    /// Returns `PathError::UnsupportedExpressionShape` if `expr` (or the body of
    /// a lambda it contains) is any other kind of node, and
    /// `PathError::DepthExceeded` if it nests deeper than the configured limit.
    pub fn parse(&self, expr: &Expression) -> Result<String, PathError> {
        let path = self.parse_node(expr, 1)?;
        log::debug!("Resolved include path '{}' from '{}'", path, expr);
        Ok(path)
    }

    /// Parses lambda source text and resolves its include path.
    pub fn parse_str(&self, source: &str) -> Result<String, PathError> {
        let expr = self.parse_source(source)?;
        self.parse(&expr)
    }

    /// Parses lambda source text under the configured depth limit.
    pub(crate) fn parse_source(&self, source: &str) -> Result<Expression, PathError> {
        parse_expression_with_limit(source, self.config.max_depth).map_err(|e| match e {
            ExprError::NestingTooDeep { limit } => PathError::DepthExceeded { limit },
            other => PathError::Expression(other),
        })
    }

    fn descend(&self, depth: usize) -> Result<usize, PathError> {
        if depth > self.config.max_depth {
            return Err(PathError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        Ok(depth + 1)
    }

    fn parse_node(&self, expr: &Expression, depth: usize) -> Result<String, PathError> {
        let next = self.descend(depth)?;
        match expr {
            Expression::Lambda { body, .. } => self.parse_node(body, next),
            Expression::MemberAccess { target, member } => {
                self.parse_member(target.as_deref(), member, next)
            }
            Expression::MethodCall { method, args } => self.parse_method_call(method, args, next),
            Expression::Parameter(_)
            | Expression::Constant(_)
            | Expression::Binary { .. }
            | Expression::Unary { .. } => Err(PathError::UnsupportedExpressionShape {
                type_name: expr.result_type().to_string(),
                expression: expr.to_string(),
            }),
        }
    }

    fn parse_member(
        &self,
        target: Option<&Expression>,
        member: &str,
        depth: usize,
    ) -> Result<String, PathError> {
        // Only a member target yields a prefix; parameters and calls end the chain.
        let prefix = match target {
            Some(Expression::MemberAccess {
                target: inner_target,
                member: inner_member,
            }) => {
                let next = self.descend(depth)?;
                self.parse_member(inner_target.as_deref(), inner_member, next)?
            }
            _ => String::new(),
        };

        if prefix.is_empty() {
            Ok(member.to_string())
        } else {
            Ok(format!("{}.{}", prefix, member))
        }
    }

    fn parse_method_call(
        &self,
        method: &str,
        args: &[Expression],
        depth: usize,
    ) -> Result<String, PathError> {
        log::trace!("Resolving {} argument(s) of '{}'", args.len(), method);

        let mut segments = Vec::with_capacity(args.len());
        for arg in args {
            let segment = match arg {
                Expression::MemberAccess { target, member } => {
                    self.parse_member(target.as_deref(), member, depth)?
                }
                Expression::Lambda { .. } | Expression::MethodCall { .. } => {
                    self.parse_node(arg, depth)?
                }
                Expression::Parameter(_)
                | Expression::Constant(_)
                | Expression::Binary { .. }
                | Expression::Unary { .. } => {
                    if !self.config.skip_unrecognized_arguments {
                        return Err(PathError::UnsupportedArgument {
                            method: method.to_string(),
                            type_name: arg.result_type().to_string(),
                            expression: arg.to_string(),
                        });
                    }
                    log::debug!(
                        "Skipping argument '{}' of type '{}' in call to '{}'",
                        arg,
                        arg.result_type(),
                        method
                    );
                    continue;
                }
            };

            if !segment.is_empty() {
                segments.push(segment);
            }
        }

        Ok(segments.join("."))
    }
}

/// Resolves the include path for `expr` with the default configuration.
pub fn parse_path(expr: &Expression) -> Result<String, PathError> {
    PathParser::new().parse(expr)
}
