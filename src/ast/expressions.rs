use crate::ast::{BinOp, UnaryOp};

/// Node of a query expression tree.
///
/// Everything upstream of the terminal node is an `Expr`: the dataset source,
/// the chain of `Select`/`Where` calls, the lambdas passed to them, and the
/// column selection handed to the terminal node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Atoms
    /// Bare name (lambda parameter, function name, ...)
    ///
    /// # Example
    /// ```text
    /// e
    /// ```
    Name(String),

    /// String literal
    ///
    /// # Example
    /// ```text
    /// 'jet_pt'
    /// ```
    String(String),

    /// Integer literal
    Integer(i64),

    /// Floating point literal
    Float(f64),

    /// Boolean literal
    Boolean(bool),

    // Compound nodes
    /// List of expressions
    ///
    /// # Example
    /// ```text
    /// (list 'pt' 'eta')
    /// ```
    List(Vec<Expr>),

    /// Function call
    ///
    /// # Examples
    /// ```text
    /// (call EventDataset 'bogus.root')
    /// (call Select (call EventDataset) (lambda (list e) (attr e 'Jets')))
    /// ```
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },

    /// Attribute access
    ///
    /// # Example
    /// ```text
    /// (attr e 'Jets')
    /// ```
    Attr {
        object: Box<Expr>,
        name: String,
    },

    /// Indexing
    ///
    /// # Example
    /// ```text
    /// (subscript jets 0)
    /// ```
    Subscript {
        object: Box<Expr>,
        index: Box<Expr>,
    },

    /// Anonymous function
    ///
    /// # Example
    /// ```text
    /// (lambda (list j) (> (call (attr j 'pt')) 30.0))
    /// ```
    Lambda {
        params: Vec<String>,
        body: Box<Expr>,
    },

    /// Binary operation (arithmetic, comparison, logical)
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary operation
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// Conditional expression
    ///
    /// # Example
    /// ```text
    /// (if (> x 0) x (- x))
    /// ```
    IfExpr {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Expr {
        Expr::Name(name.into())
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::String(value.into())
    }

    pub fn list(items: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::List(items.into_iter().collect())
    }

    /// Call a function referenced by name.
    pub fn call(func: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Call {
            func: Box::new(Expr::Name(func.into())),
            args: args.into_iter().collect(),
        }
    }

    /// Call this expression with no arguments, e.g. a method reached through
    /// [`Expr::attr`].
    pub fn invoke(self) -> Expr {
        Expr::Call {
            func: Box::new(self),
            args: vec![],
        }
    }

    pub fn attr(self, name: impl Into<String>) -> Expr {
        Expr::Attr {
            object: Box::new(self),
            name: name.into(),
        }
    }

    pub fn subscript(self, index: Expr) -> Expr {
        Expr::Subscript {
            object: Box::new(self),
            index: Box::new(index),
        }
    }

    pub fn lambda<P, S>(params: P, body: Expr) -> Expr
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expr::Lambda {
            params: params.into_iter().map(Into::into).collect(),
            body: Box::new(body),
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Name of the called function when this is a call through a bare name.
    pub fn call_name(&self) -> Option<&str> {
        match self {
            Expr::Call { func, .. } => match func.as_ref() {
                Expr::Name(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}
