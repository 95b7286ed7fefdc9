//! A `nom`-based parser for lambda source text such as `x => x.Orders.Select(o => o.Items)`.
use super::ast::{BinaryOperator, Expression, Literal, UnaryOperator};
use crate::error::ExprError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag, take_while},
    character::complete::{char, digit1, multispace0, satisfy},
    combinator::{map, map_res, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, separated_pair},
};

/// The deepest nesting of sub-expressions, parentheses and unary operators the
/// text parser accepts. Deeper input is rejected with `ExprError::NestingTooDeep`
/// before the parser's own recursion can exhaust the stack.
pub const MAX_NESTING: usize = 32;

// --- Main Public Parser ---

pub fn parse_expression(input: &str) -> Result<Expression, ExprError> {
    parse_expression_with_limit(input, MAX_NESTING)
}

/// Parses an expression, allowing at most `limit` levels of nesting.
///
/// `limit` is capped at [`MAX_NESTING`].
pub fn parse_expression_with_limit(input: &str, limit: usize) -> Result<Expression, ExprError> {
    let nesting = Nesting {
        level: 0,
        limit: limit.min(MAX_NESTING),
    };
    match expression(input.trim(), nesting) {
        Ok(("", expr)) => Ok(expr),
        Ok((rem, _)) => Err(ExprError::ExprParse(
            input.to_string(),
            format!("Parser did not consume all input. Remainder: '{}'", rem),
        )),
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => {
            Err(ExprError::NestingTooDeep {
                limit: nesting.limit,
            })
        }
        Err(e) => Err(ExprError::ExprParse(input.to_string(), e.to_string())),
    }
}

/// Parses source text that must be a lambda (`params => body`).
pub fn parse_lambda(input: &str) -> Result<Expression, ExprError> {
    let expr = parse_expression(input)?;
    if expr.is_lambda() {
        Ok(expr)
    } else {
        Err(ExprError::ParseError(format!(
            "Expected a lambda expression, found '{}'",
            expr
        )))
    }
}

/// Tracks how deeply the recursive combinators have descended.
#[derive(Debug, Clone, Copy)]
struct Nesting {
    level: usize,
    limit: usize,
}

impl Nesting {
    /// Descends one level, failing hard (no backtracking) once the limit is passed.
    fn enter(self, input: &str) -> Result<Nesting, nom::Err<Error<&str>>> {
        if self.level >= self.limit {
            return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
        }
        Ok(Nesting {
            level: self.level + 1,
            ..self
        })
    }
}

// --- Combinators ---

fn expression(input: &str, nesting: Nesting) -> IResult<&str, Expression> {
    let inner = nesting.enter(input)?;
    // Lambda must come first so `(a, b) => ...` is not read as a parenthesised operand.
    ws(alt((|i| lambda(i, inner), |i| or_expr(i, inner)))).parse(input)
}

fn lambda(input: &str, nesting: Nesting) -> IResult<&str, Expression> {
    map(
        separated_pair(lambda_params, ws(tag("=>")), |i| expression(i, nesting)),
        |(params, body)| Expression::Lambda {
            params,
            body: Box::new(body),
        },
    )
    .parse(input)
}

fn lambda_params(input: &str) -> IResult<&str, Vec<String>> {
    alt((
        map(identifier, |name| vec![name.to_string()]),
        delimited(
            char('('),
            separated_list0(ws(char(',')), ws(map(identifier, str::to_string))),
            char(')'),
        ),
    ))
    .parse(input)
}

// --- Binary Operators (lowest to highest precedence) ---

type Operand = for<'a> fn(&'a str, Nesting) -> IResult<&'a str, Expression>;

/// Parses `operand (op operand)*` and folds it left-associatively.
fn binary_chain<'a>(
    input: &'a str,
    nesting: Nesting,
    operand: Operand,
    operator: fn(&'a str) -> IResult<&'a str, BinaryOperator>,
) -> IResult<&'a str, Expression> {
    let (input, first) = operand(input, nesting)?;
    let (input, rest) = many0(pair(ws(operator), |i| operand(i, nesting))).parse(input)?;
    let folded = rest
        .into_iter()
        .fold(first, |left, (op, right)| left.binary(op, right));
    Ok((input, folded))
}

fn or_expr(input: &str, nesting: Nesting) -> IResult<&str, Expression> {
    binary_chain(input, nesting, and_expr, or_op)
}

fn or_op(input: &str) -> IResult<&str, BinaryOperator> {
    value(BinaryOperator::Or, tag("||")).parse(input)
}

fn and_expr(input: &str, nesting: Nesting) -> IResult<&str, Expression> {
    binary_chain(input, nesting, equality_expr, and_op)
}

fn and_op(input: &str) -> IResult<&str, BinaryOperator> {
    value(BinaryOperator::And, tag("&&")).parse(input)
}

fn equality_expr(input: &str, nesting: Nesting) -> IResult<&str, Expression> {
    binary_chain(input, nesting, relational_expr, equality_op)
}

fn equality_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        value(BinaryOperator::Equals, tag("==")),
        value(BinaryOperator::NotEquals, tag("!=")),
    ))
    .parse(input)
}

fn relational_expr(input: &str, nesting: Nesting) -> IResult<&str, Expression> {
    binary_chain(input, nesting, additive_expr, relational_op)
}

fn relational_op(input: &str) -> IResult<&str, BinaryOperator> {
    // Two-character operators before their one-character prefixes.
    alt((
        value(BinaryOperator::LessThanOrEqual, tag("<=")),
        value(BinaryOperator::GreaterThanOrEqual, tag(">=")),
        value(BinaryOperator::LessThan, tag("<")),
        value(BinaryOperator::GreaterThan, tag(">")),
    ))
    .parse(input)
}

fn additive_expr(input: &str, nesting: Nesting) -> IResult<&str, Expression> {
    binary_chain(input, nesting, multiplicative_expr, additive_op)
}

fn additive_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        value(BinaryOperator::Plus, tag("+")),
        value(BinaryOperator::Minus, tag("-")),
    ))
    .parse(input)
}

fn multiplicative_expr(input: &str, nesting: Nesting) -> IResult<&str, Expression> {
    binary_chain(input, nesting, unary_expr, multiplicative_op)
}

fn multiplicative_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        value(BinaryOperator::Multiply, tag("*")),
        value(BinaryOperator::Divide, tag("/")),
        value(BinaryOperator::Modulo, tag("%")),
    ))
    .parse(input)
}

fn unary_op(input: &str) -> IResult<&str, UnaryOperator> {
    ws(alt((
        value(UnaryOperator::Not, char('!')),
        value(UnaryOperator::Negate, char('-')),
    )))
    .parse(input)
}

fn unary_expr(input: &str, nesting: Nesting) -> IResult<&str, Expression> {
    let (rest, op) = opt(unary_op).parse(input)?;
    match op {
        // Each stacked operator counts as a level: `!!!!x` recurses once per `!`.
        Some(op) => {
            let inner = nesting.enter(input)?;
            let (rest, expr) = unary_expr(rest, inner)?;
            Ok((
                rest,
                Expression::Unary {
                    op,
                    expr: Box::new(expr),
                },
            ))
        }
        None => postfix_expr(input, nesting),
    }
}

// --- Member Access and Method Calls ---

enum Postfix {
    Member(String),
    Call(String, Vec<Expression>),
}

fn postfix_segment(input: &str, nesting: Nesting) -> IResult<&str, Postfix> {
    let (input, _) = ws(char('.')).parse(input)?;
    let (input, name) = identifier(input)?;
    let (input, args) = opt(|i| call_args(i, nesting)).parse(input)?;
    let segment = match args {
        Some(args) => Postfix::Call(name.to_string(), args),
        None => Postfix::Member(name.to_string()),
    };
    Ok((input, segment))
}

fn postfix_expr(input: &str, nesting: Nesting) -> IResult<&str, Expression> {
    let (input, start) = ws(|i| primary(i, nesting)).parse(input)?;
    let (input, segments) = many0(|i| postfix_segment(i, nesting)).parse(input)?;
    let expr = segments
        .into_iter()
        .fold(start, |target, segment| match segment {
            Postfix::Member(member) => target.member(member),
            Postfix::Call(method, args) => target.call(method, args),
        });
    Ok((input, expr))
}

fn call_args(input: &str, nesting: Nesting) -> IResult<&str, Vec<Expression>> {
    preceded(
        multispace0,
        delimited(
            char('('),
            separated_list0(char(','), |i| expression(i, nesting)),
            preceded(multispace0, char(')')),
        ),
    )
    .parse(input)
}

// --- Primary Expressions ---

fn primary(input: &str, nesting: Nesting) -> IResult<&str, Expression> {
    alt((
        map(number, |n| Expression::Constant(Literal::Number(n))),
        map(string_literal, |s| Expression::Constant(Literal::String(s))),
        delimited(char('('), |i| expression(i, nesting), char(')')),
        |i| name_or_call(i, nesting),
    ))
    .parse(input)
}

/// A bare identifier: keyword literal, static-style call `Method(args)`, or parameter reference.
fn name_or_call(input: &str, nesting: Nesting) -> IResult<&str, Expression> {
    let (input, name) = identifier(input)?;
    let literal = match name {
        "null" => Some(Literal::Null),
        "true" => Some(Literal::Bool(true)),
        "false" => Some(Literal::Bool(false)),
        _ => None,
    };
    if let Some(literal) = literal {
        return Ok((input, Expression::Constant(literal)));
    }

    let (input, args) = opt(|i| call_args(i, nesting)).parse(input)?;
    let expr = match args {
        Some(args) => Expression::MethodCall {
            method: name.to_string(),
            args,
        },
        None => Expression::parameter(name),
    };
    Ok((input, expr))
}

fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        str::parse::<f64>,
    )
    .parse(input)
}

fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        alt((
            delimited(char('"'), opt(is_not("\"")), char('"')),
            delimited(char('\''), opt(is_not("'")), char('\'')),
        )),
        |s: Option<&str>| s.unwrap_or_default().to_string(),
    )
    .parse(input)
}

/// Member and parameter names: a Unicode letter or `_`, then letters, digits or `_`.
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

/// A combinator that takes a parser `inner` and produces a parser that consumes surrounding whitespace.
fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}
