use thiserror::Error;

use crate::ast::{Expr, ResultKind};

/// A complete query: a terminal node naming the result kind, wrapping the
/// upstream expressions it was built from.
///
/// The first argument is conventionally the data stream and the second the
/// column (or field) selection. Remote-native kinds may carry more arguments,
/// such as an output tree or file name.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryExpression {
    kind: ResultKind,
    args: Vec<Expr>,
}

/// Errors turning a parsed expression into a [`QueryExpression`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The outermost node is not a call through a bare name
    #[error("query must end in a call to a result function, found {0}")]
    NotATerminalCall(String),

    /// The outermost call names a function that is not a result kind
    #[error("unknown result function '{0}'")]
    UnknownResultKind(String),
}

impl QueryExpression {
    pub fn new(kind: ResultKind, args: Vec<Expr>) -> Self {
        QueryExpression { kind, args }
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }

    /// The terminal node as a plain call expression.
    pub fn to_expr(&self) -> Expr {
        Expr::call(self.kind.name(), self.args.iter().cloned())
    }
}

impl TryFrom<Expr> for QueryExpression {
    type Error = QueryError;

    fn try_from(expr: Expr) -> Result<Self, Self::Error> {
        match expr {
            Expr::Call { func, args } => match *func {
                Expr::Name(name) => {
                    let kind =
                        ResultKind::from_name(&name).ok_or(QueryError::UnknownResultKind(name))?;
                    Ok(QueryExpression { kind, args })
                }
                _ => Err(QueryError::NotATerminalCall(
                    "a call through a computed function".to_string(),
                )),
            },
            other => Err(QueryError::NotATerminalCall(describe_node(&other).to_string())),
        }
    }
}

fn describe_node(expr: &Expr) -> &'static str {
    match expr {
        Expr::Name(_) => "a name",
        Expr::String(_) => "a string",
        Expr::Integer(_) | Expr::Float(_) => "a number",
        Expr::Boolean(_) => "a boolean",
        Expr::List(_) => "a list",
        Expr::Call { .. } => "a call through a computed function",
        Expr::Attr { .. } => "an attribute access",
        Expr::Subscript { .. } => "a subscript",
        Expr::Lambda { .. } => "a lambda",
        Expr::BinaryOp { .. } | Expr::UnaryOp { .. } => "an operator",
        Expr::IfExpr { .. } => "a conditional",
    }
}
