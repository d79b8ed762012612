use thiserror::Error;

use crate::ast::Token;

/// Character offset into the lexed input.
pub type Position = usize;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unterminated string starting at position {0}")]
    UnterminatedString(Position),

    #[error("invalid escape sequence '\\{escape}' at position {position}")]
    InvalidEscape { escape: char, position: Position },

    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: Position },

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: Position },
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    token_start: usize,
}

/// Characters that make up operator symbols such as `>=` or `!=`.
fn is_symbol_char(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/' | '%' | '=' | '!' | '<' | '>')
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '.'
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || ch == '(' || ch == ')'
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            token_start: 0,
        }
    }

    /// Where the most recently returned token started.
    pub fn token_start(&self) -> Position {
        self.token_start
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if accept(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('\'') => result.push('\''),
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        Some(escape) => {
                            return Err(LexError::InvalidEscape {
                                escape,
                                position: self.position,
                            });
                        }
                        None => return Err(LexError::UnterminatedString(start)),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString(start))
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut number = String::new();
        let mut is_float = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.' && !is_float && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if self.at_exponent() {
            is_float = true;
            number.push('e');
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.current_char() {
                number.push(sign);
                self.advance();
            }
            number.push_str(&self.read_while(|c| c.is_ascii_digit()));
        }

        // `12abc` is neither a number nor a name
        if let Some(ch) = self.current_char().filter(|c| !is_delimiter(*c)) {
            number.push(ch);
            return Err(LexError::InvalidNumber {
                text: number,
                position: start,
            });
        }

        let parsed = if is_float {
            number.parse::<f64>().ok().map(Token::Float)
        } else {
            number.parse::<i64>().ok().map(Token::Integer)
        };

        parsed.ok_or(LexError::InvalidNumber {
            text: number,
            position: start,
        })
    }

    /// `e7`, `E-7` or `e+7` follows.
    fn at_exponent(&self) -> bool {
        if !matches!(self.current_char(), Some('e' | 'E')) {
            return false;
        }
        match self.peek_char(1) {
            Some('+' | '-') => self.peek_char(2).is_some_and(|c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.position;

        let token = match self.current_char() {
            None => Token::Eof,
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some(quote @ ('\'' | '"')) => Token::String(self.read_string(quote)?),
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()?
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number()?,
            Some(ch) if is_symbol_char(ch) => Token::Identifier(self.read_while(is_symbol_char)),
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let word = self.read_while(is_word_char);
                match word.as_str() {
                    "True" => Token::Boolean(true),
                    "False" => Token::Boolean(false),
                    "NaN" => Token::Float(f64::NAN),
                    _ => Token::Identifier(word),
                }
            }
            Some(ch) => {
                return Err(LexError::UnexpectedChar {
                    ch,
                    position: self.position,
                });
            }
        };

        Ok(token)
    }
}

#[test]
fn test_booleans_and_names() {
    let mut lexer = Lexer::new("True False true e");
    assert_eq!(lexer.next_token(), Ok(Token::Boolean(true)));
    assert_eq!(lexer.next_token(), Ok(Token::Boolean(false)));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("true".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("e".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_terminal_call() {
    let mut lexer = Lexer::new("(call ResultParquet s (list 'pt'))");
    assert_eq!(lexer.next_token(), Ok(Token::LParen));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("call".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("ResultParquet".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("s".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::LParen));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("list".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::String("pt".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::RParen));
    assert_eq!(lexer.next_token(), Ok(Token::RParen));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}
