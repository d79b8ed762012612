pub mod ast;
pub mod backend;
pub mod capability;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod rewrite;
pub mod wire;

pub use ast::{Expr, QueryExpression, ResultKind, Stream, Token, TransferFormat};
pub use backend::{OfflineBackend, RemoteOperation, ServiceXBackend};
pub use config::SourceConfig;
pub use dispatch::{DispatchOutput, DispatchTable, Dispatcher};
pub use error::{BoxError, DispatchError};
pub use lexer::{LexError, Lexer, Position};
pub use parser::{ParseError, Parser};
pub use wire::{to_wire, to_wire_pretty};
