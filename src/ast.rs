//! # Query expression tree
//!
//! A query is a chain of functional transformations over a dataset, closed off
//! by a single terminal node that names the result the caller wants back:
//!
//! ```text
//! (call ResultPandasDF
//!   (call Select (call EventDataset 'bogus.root') (lambda (list e) (attr e 'met')))
//!   (list 'met'))
//! ```
//!
//! The submodules are:
//!
//! - **[tokens]** - tokens produced by the wire text lexer
//! - **[expressions]** - upstream nodes (names, literals, calls, lambdas, ...)
//! - **[operators]** - binary and unary operators
//! - **[result_kind]** - terminal node names and transfer formats
//! - **[query]** - the complete query, terminal node included
//! - **[stream]** - builder for transformation chains
//!
//! ## Result kinds
//!
//! | terminal             | produced by | transfer format |
//! |----------------------|-------------|-----------------|
//! | `ResultTTree`        | backend     | `root`          |
//! | `ResultParquet`      | backend     | `parquet`       |
//! | `ResultPandasDF`     | client      | negotiated      |
//! | `ResultAwkwardArray` | client      | negotiated      |
//!
//! Client-side kinds never reach the backend: the dispatcher swaps their
//! terminal node for a backend-native one before serializing.
pub mod tokens;
pub mod expressions;
pub mod operators;
pub mod result_kind;
pub mod query;
pub mod stream;

pub use tokens::Token;
pub use expressions::Expr;
pub use operators::{BinOp, UnaryOp};
pub use result_kind::{FORMAT_PREFERENCE, ResultKind, TransferFormat};
pub use query::{QueryError, QueryExpression};
pub use stream::Stream;
