use miette::Diagnostic;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::{all_consuming, map, rest, verify};
use nom::sequence::preceded;
use nom::IResult;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum QueryError {
    #[error("failed to parse emit query `{0}`")]
    #[diagnostic(
        code(driver::invalid_query),
        help("queries look like `type.krate::Foo`, `fn.krate::bar` or `global.krate::BAZ`")
    )]
    InvalidQuery(String),
    #[error("no declaration matches the emit query `{0}`")]
    #[diagnostic(code(driver::unknown_declaration))]
    UnknownDeclaration(String),
}

/// A query for a single declaration of the decoded crate.
///
/// Dumping a whole crate quickly produces a lot of output, as the extraction tool also serializes
/// the parts of the standard library a crate uses. Queries restrict the textual output to the
/// declarations they name.
///
/// ```text
/// query    ::= category DOT name
/// category ::= "type" | "fn" | "global"
/// name     ::= any
/// ```
///
/// The name is the fully-qualified name of the declaration, with its segments joined by `::`. For
/// example, the query `fn.core::mem::replace` requests the declaration of `core::mem::replace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitQuery {
    Type(String),
    Function(String),
    Global(String),
}

impl EmitQuery {
    /// Parse a list of queries.
    pub fn from_queries(queries: &[&str]) -> Result<Vec<Self>, QueryError> {
        let mut parsed_queries = Vec::with_capacity(queries.len());
        for &query in queries {
            let (_, parsed) = all_consuming(EmitQuery::parse)(query)
                .map_err(|_| QueryError::InvalidQuery(query.to_string()))?;
            parsed_queries.push(parsed);
        }
        Ok(parsed_queries)
    }

    /// Parse a single query.
    fn parse(input: &str) -> IResult<&str, Self> {
        alt((
            map(preceded(tag("type."), parse_name), EmitQuery::Type),
            map(preceded(tag("fn."), parse_name), EmitQuery::Function),
            map(preceded(tag("global."), parse_name), EmitQuery::Global),
        ))(input)
    }
}

fn parse_name(input: &str) -> IResult<&str, String> {
    map(verify(rest, |name: &str| !name.is_empty()), |name: &str| {
        name.to_owned()
    })(input)
}

impl Display for EmitQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EmitQuery::Type(name) => write!(f, "type.{}", name),
            EmitQuery::Function(name) => write!(f, "fn.{}", name),
            EmitQuery::Global(name) => write!(f, "global.{}", name),
        }
    }
}
