// tests/parser_tests.rs

use sx_dispatch::ast::{BinOp, Expr, QueryError, ResultKind, UnaryOp};
use sx_dispatch::lexer::Lexer;
use sx_dispatch::parser::{MAX_NESTING_DEPTH, ParseError, Parser};

fn parse(input: &str) -> Result<Expr, ParseError> {
    Parser::new(Lexer::new(input))?.parse()
}

// ============================================================================
// Atoms
// ============================================================================

#[test]
fn test_atoms() {
    assert_eq!(parse("e").unwrap(), Expr::name("e"));
    assert_eq!(parse("'pt'").unwrap(), Expr::string("pt"));
    assert_eq!(parse("42").unwrap(), Expr::Integer(42));
    assert_eq!(parse("1.5").unwrap(), Expr::Float(1.5));
    assert_eq!(parse("False").unwrap(), Expr::Boolean(false));
}

// ============================================================================
// Forms
// ============================================================================

#[test]
fn test_list() {
    assert_eq!(
        parse("(list 'a' 'b')").unwrap(),
        Expr::list([Expr::string("a"), Expr::string("b")])
    );
    assert_eq!(parse("(list)").unwrap(), Expr::List(vec![]));
}

#[test]
fn test_call() {
    assert_eq!(
        parse("(call EventDataset 'bogus.root')").unwrap(),
        Expr::call("EventDataset", [Expr::string("bogus.root")])
    );
    // Method call through an attribute
    assert_eq!(
        parse("(call (attr e 'Jets'))").unwrap(),
        Expr::name("e").attr("Jets").invoke()
    );
}

#[test]
fn test_lambda() {
    let expr = parse("(lambda (list j) (> (call (attr j 'pt')) 30.0))").unwrap();

    assert_eq!(
        expr,
        Expr::lambda(
            ["j"],
            Expr::binary(
                BinOp::GreaterThan,
                Expr::name("j").attr("pt").invoke(),
                Expr::Float(30.0),
            )
        )
    );
}

#[test]
fn test_subscript_and_if() {
    let expr = parse("(if (and a b) (subscript jets 0) (- x))").unwrap();

    match expr {
        Expr::IfExpr {
            condition,
            then,
            otherwise,
        } => {
            assert!(matches!(*condition, Expr::BinaryOp { op: BinOp::And, .. }));
            assert_eq!(*then, Expr::name("jets").subscript(Expr::Integer(0)));
            assert!(matches!(
                *otherwise,
                Expr::UnaryOp {
                    op: UnaryOp::Negate,
                    ..
                }
            ));
        }
        other => panic!("Expected if expression, got {:?}", other),
    }
}

#[test]
fn test_minus_arity_picks_operator() {
    assert!(matches!(
        parse("(- a b)").unwrap(),
        Expr::BinaryOp {
            op: BinOp::Subtract,
            ..
        }
    ));
    assert!(matches!(
        parse("(not a)").unwrap(),
        Expr::UnaryOp { op: UnaryOp::Not, .. }
    ));
}

#[test]
fn test_all_binary_operators() {
    let test_cases = vec![
        ("==", BinOp::Equal),
        ("!=", BinOp::NotEqual),
        ("<", BinOp::LessThan),
        (">", BinOp::GreaterThan),
        ("<=", BinOp::LessEqual),
        (">=", BinOp::GreaterEqual),
        ("+", BinOp::Add),
        ("*", BinOp::Multiply),
        ("/", BinOp::Divide),
        ("%", BinOp::Modulo),
        ("or", BinOp::Or),
    ];

    for (symbol, expected) in test_cases {
        let expr = parse(&format!("({} a 1)", symbol)).unwrap();
        assert_eq!(
            expr,
            Expr::binary(expected, Expr::name("a"), Expr::Integer(1)),
            "Failed for operator: {}",
            symbol
        );
    }
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_parse_query() {
    let input = "(call ResultPandasDF (call Select (call EventDataset) (lambda (list e) e)) (list 'met'))";
    let query = Parser::new(Lexer::new(input)).unwrap().parse_query().unwrap();

    assert_eq!(query.kind(), ResultKind::PandasDf);
    assert_eq!(query.args().len(), 2);
    assert_eq!(query.args()[1], Expr::list([Expr::string("met")]));
}

#[test]
fn test_query_needs_result_terminal() {
    let result = Parser::new(Lexer::new("(call Select a b)"))
        .unwrap()
        .parse_query();
    assert_eq!(
        result.unwrap_err(),
        ParseError::Query(QueryError::UnknownResultKind("Select".to_string()))
    );

    let result = Parser::new(Lexer::new("(list 'a')")).unwrap().parse_query();
    assert!(matches!(
        result,
        Err(ParseError::Query(QueryError::NotATerminalCall(_)))
    ));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_form() {
    assert_eq!(
        parse("(frobnicate a)").unwrap_err(),
        ParseError::UnknownForm {
            head: "frobnicate".to_string(),
            position: 0
        }
    );
}

#[test]
fn test_form_arity() {
    let err = parse("(attr e)").unwrap_err();
    assert!(matches!(err, ParseError::FormArity { found: 1, .. }));

    let err = parse("(call)").unwrap_err();
    assert!(matches!(err, ParseError::FormArity { found: 0, .. }));

    let err = parse("(> a b c)").unwrap_err();
    assert_eq!(
        err.to_string(),
        "'>' takes 2 argument(s), found 3 at position 0"
    );
}

#[test]
fn test_unclosed_form() {
    let err = parse("(list a").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            expected: "')'",
            found: "end of input".to_string(),
            position: 7
        }
    );
}

#[test]
fn test_trailing_input() {
    let err = parse("(list a) b").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnexpectedToken {
            expected: "end of input",
            position: 9,
            ..
        }
    ));
}

#[test]
fn test_bad_lambda_and_attr() {
    assert_eq!(parse("(lambda e e)").unwrap_err(), ParseError::LambdaParams(0));
    assert_eq!(
        parse("(lambda (list 'e') e)").unwrap_err(),
        ParseError::LambdaParams(0)
    );
    assert_eq!(parse("(attr e pt)").unwrap_err(), ParseError::AttrName(0));
}

#[test]
fn test_lex_errors_surface() {
    assert!(matches!(parse("'open"), Err(ParseError::Lex(_))));
}

#[test]
fn test_empty_input() {
    let err = parse("").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { expected: "an expression", .. }));
}

fn nested_lists(depth: usize) -> String {
    format!("{}{}", "(list ".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_nesting_limit() {
    assert!(parse(&nested_lists(MAX_NESTING_DEPTH)).is_ok());

    // the first '(' past the limit is reported
    assert_eq!(
        parse(&nested_lists(MAX_NESTING_DEPTH + 1)).unwrap_err(),
        ParseError::TooDeep {
            position: MAX_NESTING_DEPTH * "(list ".len()
        }
    );
}

#[test]
fn test_very_deep_query_is_rejected() {
    let input = format!("(call ResultParquet s {})", nested_lists(200_000));
    let err = Parser::new(Lexer::new(&input))
        .unwrap()
        .parse_query()
        .unwrap_err();
    assert!(matches!(err, ParseError::TooDeep { .. }));
    assert_eq!(
        err.to_string(),
        format!(
            "forms nested deeper than {MAX_NESTING_DEPTH} levels at position {}",
            22 + (MAX_NESTING_DEPTH - 1) * 6
        )
    );
}
