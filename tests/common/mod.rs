pub mod fixtures;

use include_path::{EagerLoad, Expression};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// An `EagerLoad` query that remembers the exact order paths were attached in.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingQuery {
    pub paths: Vec<String>,
}

impl EagerLoad for RecordingQuery {
    fn include(mut self, path: &str) -> Self {
        self.paths.push(path.to_string());
        self
    }
}

/// Builds `param => param.m1.m2...`.
pub fn member_lambda(param: &str, members: &[&str]) -> Expression {
    let body = members
        .iter()
        .fold(Expression::parameter(param), |expr, m| expr.member(*m));
    Expression::lambda(param, body)
}
