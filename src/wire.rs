//! Wire text serialization for query expressions.
//!
//! The wire text is what the backend receives: an s-expression rendering of
//! the query tree. Serialization is a pure function of the tree, so the same
//! query always produces the same text.
//!
//! # Features
//!
//! - **Compact output** via [`to_wire()`] - single line, what gets submitted
//! - **Pretty output** via [`to_wire_pretty()`] - nested forms on their own
//!   lines with 2-space indentation, for people reading a translation
//! - **String escaping** - quotes, backslashes and control characters
//!
//! # Examples
//!
//! ```
//! use sx_dispatch::ast::{Expr, QueryExpression, ResultKind};
//! use sx_dispatch::wire::to_wire;
//!
//! let query = QueryExpression::new(
//!     ResultKind::Parquet,
//!     vec![Expr::call("EventDataset", []), Expr::list([Expr::string("met")])],
//! );
//!
//! assert_eq!(
//!     to_wire(&query),
//!     "(call ResultParquet (call EventDataset) (list 'met'))"
//! );
//! ```

use crate::ast::{Expr, QueryExpression};

pub struct WirePrinter {
    pretty: bool,
}

impl WirePrinter {
    pub fn new(pretty: bool) -> Self {
        WirePrinter { pretty }
    }

    pub fn print_query(&self, query: &QueryExpression) -> String {
        let head = vec!["call".to_string(), query.kind().name().to_string()];
        let args: Vec<&Expr> = query.args().iter().collect();
        self.print_form(head, &args, 0)
    }

    pub fn print(&self, expr: &Expr) -> String {
        self.print_expr(expr, 0)
    }

    fn print_expr(&self, expr: &Expr, indent: usize) -> String {
        match expr {
            Expr::Name(name) => name.clone(),
            Expr::String(s) => format!("'{}'", escape_string(s)),
            Expr::Integer(n) => n.to_string(),
            Expr::Float(n) => format_float(*n),
            Expr::Boolean(true) => "True".to_string(),
            Expr::Boolean(false) => "False".to_string(),
            Expr::List(items) => {
                let items: Vec<&Expr> = items.iter().collect();
                self.print_form(vec!["list".to_string()], &items, indent)
            }
            Expr::Call { func, args } => {
                let head = vec!["call".to_string(), self.print_expr(func, indent + 1)];
                let args: Vec<&Expr> = args.iter().collect();
                self.print_form(head, &args, indent)
            }
            Expr::Attr { object, name } => {
                let name = Expr::String(name.clone());
                self.print_form(vec!["attr".to_string()], &[&**object, &name], indent)
            }
            Expr::Subscript { object, index } => {
                self.print_form(vec!["subscript".to_string()], &[&**object, &**index], indent)
            }
            Expr::Lambda { params, body } => {
                let params = Expr::List(params.iter().cloned().map(Expr::Name).collect());
                self.print_form(vec!["lambda".to_string()], &[&params, &**body], indent)
            }
            Expr::BinaryOp { op, left, right } => {
                self.print_form(vec![op.symbol().to_string()], &[&**left, &**right], indent)
            }
            Expr::UnaryOp { op, operand } => {
                self.print_form(vec![op.symbol().to_string()], &[&**operand], indent)
            }
            Expr::IfExpr {
                condition,
                then,
                otherwise,
            } => self.print_form(
                vec!["if".to_string()],
                &[&**condition, &**then, &**otherwise],
                indent,
            ),
        }
    }

    /// Print `(head... args...)`. In pretty mode any form with a compound
    /// argument puts each argument on its own line.
    fn print_form(&self, head: Vec<String>, args: &[&Expr], indent: usize) -> String {
        let mut parts = head;

        let nested = args.iter().any(|arg| is_compound(arg));
        if !self.pretty || !nested {
            parts.extend(args.iter().map(|arg| self.print_expr(arg, indent)));
            return format!("({})", parts.join(" "));
        }

        let mut result = format!("({}", parts.join(" "));
        for arg in args {
            result.push('\n');
            result.push_str(&self.indent(indent + 1));
            result.push_str(&self.print_expr(arg, indent + 1));
        }
        result.push(')');
        result
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }
}

fn is_compound(expr: &Expr) -> bool {
    !matches!(
        expr,
        Expr::Name(_) | Expr::String(_) | Expr::Integer(_) | Expr::Float(_) | Expr::Boolean(_)
    )
}

/// Shortest text that reads back to the same float. Debug keeps the
/// fractional part on whole floats (`2.0`) and switches to exponents (`1e20`)
/// for very large or small magnitudes.
fn format_float(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        // overflows back to infinity when read
        if n > 0.0 { "1e999" } else { "-1e999" }.to_string()
    } else {
        format!("{:?}", n)
    }
}

fn escape_string(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '\'' => vec!['\\', '\''],
            '\\' => vec!['\\', '\\'],
            '\n' => vec!['\\', 'n'],
            '\r' => vec!['\\', 'r'],
            '\t' => vec!['\\', 't'],
            c => vec![c],
        })
        .collect()
}

/// Serializes a query to the compact wire text submitted to a backend.
pub fn to_wire(query: &QueryExpression) -> String {
    WirePrinter::new(false).print_query(query)
}

/// Serializes a query to indented wire text.
///
/// The tokens are the same as [`to_wire`]; only whitespace differs, so the
/// pretty form parses back to the same query.
pub fn to_wire_pretty(query: &QueryExpression) -> String {
    WirePrinter::new(true).print_query(query)
}

/// Serializes a bare expression, e.g. a dataset source node.
pub fn expr_to_wire(expr: &Expr) -> String {
    WirePrinter::new(false).print(expr)
}
