// tests/lexer_tests.rs

use sx_dispatch::ast::Token;
use sx_dispatch::lexer::{LexError, Lexer};

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token().unwrap();
        if token == Token::Eof {
            return tokens;
        }
        tokens.push(token);
    }
}

fn ident(name: &str) -> Token {
    Token::Identifier(name.to_string())
}

// ============================================================================
// Delimiters and words
// ============================================================================

#[test]
fn test_parens() {
    assert_eq!(tokens("()"), vec![Token::LParen, Token::RParen]);
    assert_eq!(tokens("(\n  )"), vec![Token::LParen, Token::RParen]);
}

#[test]
fn test_identifiers() {
    let test_cases = vec!["e", "_x", "EventDataset", "ResultTTree", "jet_pt2", "a.b"];

    for input in test_cases {
        assert_eq!(tokens(input), vec![ident(input)], "Failed for input: {}", input);
    }
}

#[test]
fn test_operator_symbols() {
    let test_cases = vec!["+", "-", "*", "/", "%", "==", "!=", "<", ">", "<=", ">="];

    for input in test_cases {
        assert_eq!(tokens(input), vec![ident(input)], "Failed for input: {}", input);
    }
}

#[test]
fn test_word_operators_are_identifiers() {
    assert_eq!(tokens("and or not"), vec![ident("and"), ident("or"), ident("not")]);
}

#[test]
fn test_no_space_between_tokens() {
    assert_eq!(
        tokens("(attr e'pt')"),
        vec![
            Token::LParen,
            ident("attr"),
            ident("e"),
            Token::String("pt".to_string()),
            Token::RParen,
        ]
    );
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_integers() {
    assert_eq!(tokens("0 42 -7"), vec![Token::Integer(0), Token::Integer(42), Token::Integer(-7)]);
}

#[test]
fn test_floats() {
    assert_eq!(
        tokens("2.5 -0.5 30.0"),
        vec![Token::Float(2.5), Token::Float(-0.5), Token::Float(30.0)]
    );
}

#[test]
fn test_float_exponents() {
    assert_eq!(
        tokens("1e20 1E-7 -2.5e+3 1.2345678901234568e17"),
        vec![
            Token::Float(1e20),
            Token::Float(1e-7),
            Token::Float(-2500.0),
            Token::Float(1.2345678901234568e17),
        ]
    );
    // overflow reads as infinity
    assert_eq!(tokens("1e999"), vec![Token::Float(f64::INFINITY)]);
}

#[test]
fn test_exponent_without_digits() {
    let mut lexer = Lexer::new("1e+x");
    assert_eq!(
        lexer.next_token(),
        Err(LexError::InvalidNumber {
            text: "1e".to_string(),
            position: 0
        })
    );
}

#[test]
fn test_nan() {
    let mut lexer = Lexer::new("NaN nan");
    assert!(matches!(lexer.next_token(), Ok(Token::Float(n)) if n.is_nan()));
    assert_eq!(lexer.next_token(), Ok(ident("nan")));
}

#[test]
fn test_minus_vs_negative() {
    // Subtraction head followed by operands
    assert_eq!(
        tokens("(- 3 1)"),
        vec![
            Token::LParen,
            ident("-"),
            Token::Integer(3),
            Token::Integer(1),
            Token::RParen,
        ]
    );

    // Negative literal
    assert_eq!(tokens("-3"), vec![Token::Integer(-3)]);
}

#[test]
fn test_booleans() {
    assert_eq!(tokens("True False"), vec![Token::Boolean(true), Token::Boolean(false)]);
    // Only the capitalized spelling is a literal
    assert_eq!(tokens("true"), vec![ident("true")]);
}

#[test]
fn test_strings() {
    assert_eq!(
        tokens(r#"'jets' "junk.root" ''"#),
        vec![
            Token::String("jets".to_string()),
            Token::String("junk.root".to_string()),
            Token::String(String::new()),
        ]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        tokens(r"'it\'s\n\ta\\b'"),
        vec![Token::String("it's\n\ta\\b".to_string())]
    );
    assert_eq!(tokens(r#""say \"hi\"""#), vec![Token::String("say \"hi\"".to_string())]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new("(list 'hello");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();

    assert_eq!(lexer.next_token(), Err(LexError::UnterminatedString(6)));
}

#[test]
fn test_unterminated_string_after_backslash() {
    let mut lexer = Lexer::new(r"'hello\");
    let result = lexer.next_token();
    assert!(result.unwrap_err().to_string().contains("unterminated string"));
}

#[test]
fn test_invalid_escape_sequence() {
    let mut lexer = Lexer::new(r"'hello\x'");
    assert_eq!(
        lexer.next_token(),
        Err(LexError::InvalidEscape {
            escape: 'x',
            position: 7
        })
    );
}

#[test]
fn test_number_glued_to_word() {
    let mut lexer = Lexer::new("12abc");
    let result = lexer.next_token();
    assert!(matches!(result, Err(LexError::InvalidNumber { position: 0, .. })));
}

#[test]
fn test_invalid_character() {
    let mut lexer = Lexer::new("(list #)");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    let result = lexer.next_token();
    assert_eq!(
        result.unwrap_err().to_string(),
        "unexpected character '#' at position 6"
    );
}

#[test]
fn test_token_start_skips_whitespace() {
    let mut lexer = Lexer::new("   (call");
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), 3);
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), 4);
}
