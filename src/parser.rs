use thiserror::Error;

use crate::{
    ast::{BinOp, Expr, QueryError, QueryExpression, Token, UnaryOp},
    lexer::{LexError, Lexer, Position},
};
use std::mem;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found} at position {position}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: Position,
    },

    #[error("unknown form '({head} ...)' at position {position}")]
    UnknownForm { head: String, position: Position },

    #[error("'{form}' takes {expected} argument(s), found {found} at position {position}")]
    FormArity {
        form: String,
        expected: &'static str,
        found: usize,
        position: Position,
    },

    #[error("invalid lambda parameters at position {0}: expected (list name ...)")]
    LambdaParams(Position),

    #[error("attribute name must be a string at position {0}")]
    AttrName(Position),

    #[error(
        "forms nested deeper than {limit} levels at position {position}",
        limit = MAX_NESTING_DEPTH
    )]
    TooDeep { position: Position },

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Deepest form nesting the reader accepts. Reading recurses once per level.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Reader for wire text.
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    token_start: Position,
    depth: usize,
}

fn describe(token: &Token) -> String {
    match token {
        Token::Integer(n) => format!("integer {}", n),
        Token::Float(n) => format!("float {}", n),
        Token::String(s) => format!("string '{}'", s),
        Token::Boolean(b) => format!("boolean {}", b),
        Token::Identifier(name) => format!("'{}'", name),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
        Token::Eof => "end of input".to_string(),
    }
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let token_start = lexer.token_start();
        Ok(Parser {
            lexer,
            current_token,
            token_start,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.token_start = self.lexer.token_start();
        Ok(())
    }

    fn expect(&mut self, expected: Token, what: &'static str) -> Result<(), ParseError> {
        if mem::discriminant(&self.current_token) != mem::discriminant(&expected) {
            return Err(self.unexpected(what));
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: describe(&self.current_token),
            position: self.token_start,
        }
    }

    /// Parse one expression: an atom or a parenthesized form.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let expr = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Integer(n) => Expr::Integer(n),
            Token::Float(n) => Expr::Float(n),
            Token::String(s) => Expr::String(s),
            Token::Boolean(b) => Expr::Boolean(b),
            Token::Identifier(name) => Expr::Name(name),
            Token::LParen => {
                let start = self.token_start;
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(ParseError::TooDeep { position: start });
                }
                self.depth += 1;
                self.advance()?;
                let form = self.parse_form(start);
                self.depth -= 1;
                return form;
            }
            token => {
                self.current_token = token;
                return Err(self.unexpected("an expression"));
            }
        };

        self.advance()?;
        Ok(expr)
    }

    /// Parse the rest of a form whose `(` has been consumed.
    fn parse_form(&mut self, start: Position) -> Result<Expr, ParseError> {
        let head = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(head) => head,
            token => {
                self.current_token = token;
                return Err(self.unexpected("a form name"));
            }
        };
        self.advance()?;

        let mut args = vec![];
        while !self.check(&Token::RParen) {
            if self.check(&Token::Eof) {
                return Err(self.unexpected("')'"));
            }
            args.push(self.parse_expression()?);
        }
        self.expect(Token::RParen, "')'")?;

        build_form(head, args, start)
    }

    /// Parse a single expression and require the input to end after it.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(Token::Eof, "end of input")?;
        Ok(expr)
    }

    /// Parse a complete query, which must end in a result call.
    pub fn parse_query(&mut self) -> Result<QueryExpression, ParseError> {
        let expr = self.parse()?;
        Ok(QueryExpression::try_from(expr)?)
    }
}

fn take_exact<const N: usize>(
    form: &str,
    expected: &'static str,
    args: Vec<Expr>,
    position: Position,
) -> Result<[Expr; N], ParseError> {
    let found = args.len();
    args.try_into().map_err(|_| ParseError::FormArity {
        form: form.to_string(),
        expected,
        found,
        position,
    })
}

fn build_form(head: String, args: Vec<Expr>, position: Position) -> Result<Expr, ParseError> {
    match head.as_str() {
        "list" => Ok(Expr::List(args)),
        "call" => {
            let mut args = args.into_iter();
            let func = args.next().ok_or(ParseError::FormArity {
                form: head.clone(),
                expected: "at least 1",
                found: 0,
                position,
            })?;
            Ok(Expr::Call {
                func: Box::new(func),
                args: args.collect(),
            })
        }
        "attr" => {
            let [object, name] = take_exact(&head, "2", args, position)?;
            match name {
                Expr::String(name) => Ok(object.attr(name)),
                _ => Err(ParseError::AttrName(position)),
            }
        }
        "subscript" => {
            let [object, index] = take_exact(&head, "2", args, position)?;
            Ok(object.subscript(index))
        }
        "lambda" => {
            let [params, body] = take_exact(&head, "2", args, position)?;
            let params = match params {
                Expr::List(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Expr::Name(name) => Ok(name),
                        _ => Err(ParseError::LambdaParams(position)),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                _ => return Err(ParseError::LambdaParams(position)),
            };
            Ok(Expr::Lambda {
                params,
                body: Box::new(body),
            })
        }
        "if" => {
            let [condition, then, otherwise] = take_exact(&head, "3", args, position)?;
            Ok(Expr::IfExpr {
                condition: Box::new(condition),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            })
        }
        "not" => {
            let [operand] = take_exact(&head, "1", args, position)?;
            Ok(Expr::UnaryOp {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            })
        }
        // `-` is negation with one operand and subtraction with two
        "-" if args.len() == 1 => {
            let [operand] = take_exact(&head, "1 or 2", args, position)?;
            Ok(Expr::UnaryOp {
                op: UnaryOp::Negate,
                operand: Box::new(operand),
            })
        }
        symbol => match BinOp::from_symbol(symbol) {
            Some(op) => {
                let expected = if op == BinOp::Subtract { "1 or 2" } else { "2" };
                let [left, right] = take_exact(&head, expected, args, position)?;
                Ok(Expr::binary(op, left, right))
            }
            None => Err(ParseError::UnknownForm {
                head: symbol.to_string(),
                position,
            }),
        },
    }
}
