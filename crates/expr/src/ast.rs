//! Defines the expression tree for navigation lambdas.
//!
//! Method calls are stored extension-method style: a receiver call such as
//! `x.Orders.Select(o => o.Items)` becomes `Select(x.Orders, o => o.Items)`,
//! with the receiver as the first argument.
use std::fmt;

/// A node of a lambda expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `params => body`.
    Lambda {
        params: Vec<String>,
        body: Box<Expression>,
    },
    /// `target.member`. A `None` target is a static member with no receiver.
    MemberAccess {
        target: Option<Box<Expression>>,
        member: String,
    },
    /// A method call. The receiver, if any, is `args[0]`.
    MethodCall { method: String, args: Vec<Expression> },
    /// A reference to a lambda parameter.
    Parameter(String),
    Constant(Literal),
    Binary {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
    Unary {
        op: UnaryOperator,
        expr: Box<Expression>,
    },
}

/// A constant value appearing in an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Negate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Logical
    Or,
    And,
    // Equality
    Equals,
    NotEquals,
    // Relational
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    // Additive
    Plus,
    Minus,
    // Multiplicative
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }

    /// True for operators producing a boolean (logical, equality, relational).
    pub fn is_predicate(self) -> bool {
        !matches!(
            self,
            BinaryOperator::Plus
                | BinaryOperator::Minus
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
                | BinaryOperator::Modulo
        )
    }
}

impl Expression {
    // --- Builders ---

    pub fn parameter(name: impl Into<String>) -> Self {
        Expression::Parameter(name.into())
    }

    /// Builds a single-parameter lambda, `param => body`.
    pub fn lambda(param: impl Into<String>, body: Expression) -> Self {
        Expression::Lambda {
            params: vec![param.into()],
            body: Box::new(body),
        }
    }

    /// Builds a member access with no receiver.
    pub fn static_member(member: impl Into<String>) -> Self {
        Expression::MemberAccess {
            target: None,
            member: member.into(),
        }
    }

    pub fn constant(value: Literal) -> Self {
        Expression::Constant(value)
    }

    /// Accesses `member` on this expression.
    pub fn member(self, member: impl Into<String>) -> Self {
        Expression::MemberAccess {
            target: Some(Box::new(self)),
            member: member.into(),
        }
    }

    /// Calls `method` with this expression as the receiver.
    pub fn call<I>(self, method: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = Expression>,
    {
        let mut all_args = vec![self];
        all_args.extend(args);
        Expression::MethodCall {
            method: method.into(),
            args: all_args,
        }
    }

    pub fn binary(self, op: BinaryOperator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    // --- Inspection ---

    /// Checks if the expression is a `Lambda` variant.
    pub fn is_lambda(&self) -> bool {
        matches!(self, Expression::Lambda { .. })
    }

    /// Checks if the expression is a `MemberAccess` variant.
    pub fn is_member_access(&self) -> bool {
        matches!(self, Expression::MemberAccess { .. })
    }

    /// The declared type name of the value this node produces.
    ///
    /// Without type information for members and parameters, those report
    /// their node kind instead.
    pub fn result_type(&self) -> &'static str {
        match self {
            Expression::Lambda { .. } => "Lambda",
            Expression::MemberAccess { .. } => "Member",
            Expression::MethodCall { .. } => "MethodCall",
            Expression::Parameter(_) => "Parameter",
            Expression::Constant(Literal::Null) => "Null",
            Expression::Constant(Literal::Bool(_)) => "Boolean",
            Expression::Constant(Literal::Number(_)) => "Number",
            Expression::Constant(Literal::String(_)) => "String",
            Expression::Binary { op, .. } if op.is_predicate() => "Boolean",
            Expression::Binary { .. } => "Number",
            Expression::Unary {
                op: UnaryOperator::Not,
                ..
            } => "Boolean",
            Expression::Unary {
                op: UnaryOperator::Negate,
                ..
            } => "Number",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{}", n),
            // No escapes in lambda source: quote with the delimiter the text lacks.
            Literal::String(s) if s.contains('"') => write!(f, "'{}'", s),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl fmt::Display for Expression {
    /// Renders the expression in lambda source form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Lambda { params, body } => {
                if params.len() == 1 {
                    write!(f, "{} => {}", params[0], body)
                } else {
                    write!(f, "({}) => {}", params.join(", "), body)
                }
            }
            Expression::MemberAccess {
                target: Some(target),
                member,
            } => {
                write_operand(f, target)?;
                write!(f, ".{}", member)
            }
            Expression::MemberAccess {
                target: None,
                member,
            } => write!(f, "{}", member),
            Expression::MethodCall { method, args } => match args.split_first() {
                Some((receiver, rest)) => {
                    write_operand(f, receiver)?;
                    write!(f, ".{}(", method)?;
                    write_args(f, rest)?;
                    write!(f, ")")
                }
                None => write!(f, "{}()", method),
            },
            Expression::Parameter(name) => write!(f, "{}", name),
            Expression::Constant(value) => write!(f, "{}", value),
            Expression::Binary { left, op, right } => {
                write_operand(f, left)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, right)
            }
            Expression::Unary { op, expr } => {
                let symbol = match op {
                    UnaryOperator::Not => "!",
                    UnaryOperator::Negate => "-",
                };
                write!(f, "{}", symbol)?;
                write_operand(f, expr)
            }
        }
    }
}

/// Writes a sub-expression, parenthesising the compound forms.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expression) -> fmt::Result {
    match expr {
        Expression::Binary { .. } | Expression::Lambda { .. } => write!(f, "({})", expr),
        _ => write!(f, "{}", expr),
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Expression]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}
