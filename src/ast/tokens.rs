/// Lexical tokens of the wire text.
///
/// The wire text is an s-expression language, so the token set is small:
/// atoms and parentheses. Form heads (`call`, `lambda`, ...) and operator
/// symbols (`+`, `==`, ...) are all lexed as [`Token::Identifier`] and given
/// meaning by the parser based on their position.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -7
    /// ```
    Integer(i64),

    /// Floating point literal
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -0.5
    /// 2.0
    /// ```
    Float(f64),

    /// String literal in single or double quotes
    ///
    /// # Examples
    /// ```text
    /// 'jets'
    /// "junk.root"
    /// ```
    String(String),

    /// `True` or `False`
    Boolean(bool),

    /// Bare word: a name, a form head, or an operator symbol
    ///
    /// # Examples
    /// ```text
    /// e
    /// call
    /// ResultParquet
    /// >=
    /// ```
    Identifier(String),

    /// Opening parenthesis of a form
    LParen,

    /// Closing parenthesis of a form
    RParen,

    /// End of input
    Eof,
}
