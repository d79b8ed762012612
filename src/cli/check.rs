//! Validate wire text

use crate::{Lexer, Parser, to_wire, to_wire_pretty};
use super::CliError;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Wire text of the query
    pub query: String,
    /// Indent the normalized output
    pub pretty: bool,
}

/// Parse a query and return it in normalized form.
pub fn execute_check(options: &CheckOptions) -> Result<String, CliError> {
    let mut parser = Parser::new(Lexer::new(&options.query))?;
    let query = parser.parse_query()?;

    Ok(if options.pretty {
        to_wire_pretty(&query)
    } else {
        to_wire(&query)
    })
}
