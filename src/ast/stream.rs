use crate::ast::{Expr, QueryExpression, ResultKind};

/// Builder for the chain of transformations upstream of a terminal node.
///
/// # Example
///
/// ```
/// use sx_dispatch::ast::{BinOp, Expr, ResultKind, Stream};
///
/// let query = Stream::new(Expr::call("EventDataset", [Expr::string("bogus.root")]))
///     .select_many(Expr::lambda(["e"], Expr::name("e").attr("Jets").invoke()))
///     .filter(Expr::lambda(
///         ["j"],
///         Expr::binary(
///             BinOp::GreaterThan,
///             Expr::name("j").attr("pt").invoke(),
///             Expr::Float(30.0),
///         ),
///     ))
///     .result(ResultKind::PandasDf, Expr::list([Expr::string("JetPt")]));
///
/// assert_eq!(query.kind(), ResultKind::PandasDf);
/// assert_eq!(query.args().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    expr: Expr,
}

impl Stream {
    pub fn new(source: Expr) -> Self {
        Stream { expr: source }
    }

    /// `Select(stream, selector)`
    pub fn select(self, selector: Expr) -> Self {
        self.apply("Select", selector)
    }

    /// `SelectMany(stream, selector)`
    pub fn select_many(self, selector: Expr) -> Self {
        self.apply("SelectMany", selector)
    }

    /// `Where(stream, predicate)`
    pub fn filter(self, predicate: Expr) -> Self {
        self.apply("Where", predicate)
    }

    fn apply(self, operator: &str, function: Expr) -> Self {
        Stream {
            expr: Expr::call(operator, [self.expr, function]),
        }
    }

    /// Finish with the usual two-argument terminal: the stream and the column
    /// names.
    pub fn result(self, kind: ResultKind, columns: Expr) -> QueryExpression {
        QueryExpression::new(kind, vec![self.expr, columns])
    }

    /// Finish with a terminal that takes arguments beyond the column names,
    /// e.g. the tree and file name of a `ResultTTree`.
    pub fn result_with(
        self,
        kind: ResultKind,
        columns: Expr,
        extra: impl IntoIterator<Item = Expr>,
    ) -> QueryExpression {
        let mut args = vec![self.expr, columns];
        args.extend(extra);
        QueryExpression::new(kind, args)
    }

    pub fn as_expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }
}
