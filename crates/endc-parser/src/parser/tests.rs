use super::*;
use crate::printer::AstPrinter;
use endc_lexer::tokenize;

fn parse_source(src: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(src, "<test>").expect("lexer should succeed");
    let mut parser = Parser::new(tokens);
    parser.parse()
}

fn parse_ok(src: &str) -> Expr {
    parse_source(src).expect("parse should succeed")
}

fn parse_err(src: &str) -> ParseError {
    match parse_source(src) {
        Ok(expr) => panic!("expected parse error for input {src:?}, got {expr:?}"),
        Err(err) => err,
    }
}

/// Prefix form of the parsed expression
fn tree(src: &str) -> String {
    AstPrinter::print(&parse_ok(src))
}

// ── Literals ────────────────────────────────────────────

#[test]
fn number_literal() {
    assert_eq!(parse_ok("42/"), Expr::literal(LiteralValue::Number(42.0)));
}

#[test]
fn decimal_literals() {
    assert_eq!(tree("3,5 - ,5/"), "(- 3,5 0,5)");
}

#[test]
fn string_literal() {
    assert_eq!(parse_ok("*abc*/"), Expr::literal(LiteralValue::String("abc".to_string())));
}

#[test]
fn false_and_nothing() {
    assert_eq!(parse_ok("NO/"), Expr::literal(LiteralValue::False));
    assert_eq!(parse_ok("NOTHING/"), Expr::literal(LiteralValue::Null));
}

// ── Precedence and associativity ────────────────────────

#[test]
fn term_is_binary_add() {
    match parse_ok("1 - 2/") {
        Expr::Binary { left, operator, right } => {
            assert_eq!(*left, Expr::literal(LiteralValue::Number(1.0)));
            assert!(operator.is_operator(UnaryOperator::Add));
            assert_eq!(*right, Expr::literal(LiteralValue::Number(2.0)));
        }
        other => panic!("expected Binary, got {other:?}"),
    }
}

#[test]
fn factor_binds_tighter_than_term() {
    assert_eq!(tree("1 - 2 ; 3/"), "(- 1 (; 2 3))");
    assert_eq!(tree("1 \\ 2 + 3/"), "(+ (\\ 1 2) 3)");
}

#[test]
fn term_is_left_associative() {
    assert_eq!(tree("3 + 4 + 5/"), "(+ (+ 3 4) 5)");
}

#[test]
fn comparison_below_term() {
    assert_eq!(tree("1 - 2 < 3/"), "(< (- 1 2) 3)");
    assert_eq!(tree("1 =< 2/"), "(=< 1 2)");
}

#[test]
fn not_equals_below_comparison() {
    assert_eq!(tree("1 < 2 !IS NO/"), "(!IS (< 1 2) NO)");
}

#[test]
fn grouping_overrides_precedence() {
    assert_eq!(tree("{1 - 2} ; 3/"), "(; (group (- 1 2)) 3)");
    assert_eq!(tree("1 - {2}/"), "(- 1 (group 2))");
}

// ── Unary ───────────────────────────────────────────────

#[test]
fn unary_not_of_group() {
    assert_eq!(tree("! {NOTHING}/"), "(! (group NOTHING))");
}

#[test]
fn unary_negation_uses_plus() {
    match parse_ok("+ 5/") {
        Expr::Unary { operator, operand } => {
            assert_eq!(operator, UnaryOperator::Subtract);
            assert_eq!(*operand, Expr::literal(LiteralValue::Number(5.0)));
        }
        other => panic!("expected Unary, got {other:?}"),
    }
}

#[test]
fn stacked_unary() {
    assert_eq!(tree("! ! NO/"), "(! (! NO))");
    assert_eq!(tree("+ 1 - 2/"), "(- (+ 1) 2)");
}

// ── Terminators ─────────────────────────────────────────

#[test]
fn trailing_terminators_are_accepted() {
    assert_eq!(parse_ok("1/\n"), parse_ok("1/"));
}

#[test]
fn parser_without_end_marker() {
    let mut tokens = tokenize("1 - 2/", "<test>").unwrap();
    tokens.pop();
    let mut parser = Parser::new(tokens);
    assert_eq!(AstPrinter::print(&parser.parse().unwrap()), "(- 1 2)");
    assert!(!parser.had_errors());
}

// ── Errors ──────────────────────────────────────────────

#[test]
fn missing_closing_brace() {
    let err = parse_err("{1 - 2/");
    assert_eq!(err.first.line, 1);
    assert_eq!(err.first.context, "at '/'");
    assert_eq!(err.first.message, "Expect '}' after expression.");
    assert_eq!(err.to_string(), "[line 1] Error at '/': Expect '}' after expression.");
}

#[test]
fn operator_without_left_operand() {
    let err = parse_err("- 1/");
    assert_eq!(err.first.context, "at '-'");
    assert_eq!(err.first.message, "Expect expression.");
}

#[test]
fn empty_input_errors_at_end() {
    let err = parse_err("");
    assert_eq!(err.first.context, "at end");
    assert_eq!(err.first.message, "Expect expression.");
}

#[test]
fn trailing_tokens_are_rejected() {
    let err = parse_err("1 2/");
    assert_eq!(err.first.context, "at '2'");
    assert_eq!(err.first.message, "Expect end of expression.");
}

#[test]
fn string_token_in_error_context() {
    let err = parse_err("{*ab* *cd*/");
    assert_eq!(err.first.context, "at '*cd*'");
}

#[test]
fn error_line_follows_token() {
    let err = parse_err("1/\n{2/");
    assert_eq!(err.first.line, 2);
    assert_eq!(err.first.context, "at '{'");
    assert_eq!(err.first.message, "Expect end of expression.");
}

// ── Nesting cap ─────────────────────────────────────────

#[test]
fn nesting_up_to_the_cap_is_accepted() {
    let src = format!("{}NO/", "! ".repeat(MAX_DEPTH));
    assert!(parse_source(&src).is_ok());
}

#[test]
fn nesting_past_the_cap_is_rejected() {
    let src = format!("{}NO/", "! ".repeat(MAX_DEPTH + 1));
    let err = parse_err(&src);
    assert_eq!(err.first.message, "Expression nested too deeply.");
}

#[test]
fn long_operator_chain_is_rejected() {
    let src = format!("1{}/", " - 1".repeat(10_000));
    let err = parse_err(&src);
    assert_eq!(err.first.message, "Expression nested too deeply.");
    assert_eq!(err.count(), 1);
}

#[test]
fn operator_chain_within_the_cap() {
    let src = format!("1{}/", " - 1".repeat(MAX_DEPTH));
    assert!(parse_source(&src).is_ok());
}

#[test]
fn chain_depth_adds_to_grouping_depth() {
    let src = format!("{}1{}{}/", "{".repeat(200), " - 1".repeat(100), "}".repeat(200));
    let err = parse_err(&src);
    assert_eq!(err.first.message, "Expression nested too deeply.");
}

#[test]
fn separate_chains_do_not_accumulate() {
    let chain = format!("{{1{}}}", " - 1".repeat(200));
    let src = format!("{chain} - {chain} - {chain}/");
    assert!(parse_source(&src).is_ok());
}

#[test]
fn moderate_grouping_depth() {
    let src = format!("{}1{}/", "{".repeat(50), "}".repeat(50));
    let expr = parse_ok(&src);
    assert!(matches!(expr, Expr::Grouping(_)));
}

// ── Programs ────────────────────────────────────────────

fn parse_program(src: &str) -> Result<Vec<Expr>, ParseError> {
    let tokens = tokenize(src, "<test>").expect("lexer should succeed");
    Parser::new(tokens).parse_program()
}

#[test]
fn program_of_several_lines() {
    let exprs = parse_program("1 - 2/\n3/\n\n*x*/\n").unwrap();
    assert_eq!(exprs.len(), 3);
    assert_eq!(exprs[1], Expr::literal(LiteralValue::Number(3.0)));
}

#[test]
fn program_collects_every_error() {
    let err = parse_program("{1/\n2 - 3/\n{4/\n").unwrap_err();
    assert_eq!(err.count(), 2);
    let lines: Vec<usize> = err.errors().map(|e| e.line).collect();
    assert_eq!(lines, vec![1, 3]);
}

#[test]
fn program_requires_terminator_between_expressions() {
    let err = parse_program("1 2/\n3/\n").unwrap_err();
    assert_eq!(err.count(), 1);
    assert_eq!(err.first.message, "Expect '/' after expression.");
}

#[test]
fn recovery_stops_before_statement_keyword() {
    let err = parse_program("{1 2 DCLAR/\n").unwrap_err();
    assert_eq!(err.count(), 2);
    assert_eq!(err.others[0].context, "at 'DCLAR'");
}

// ── Structural equality ─────────────────────────────────

#[test]
fn equality_ignores_token_location() {
    let a = parse_ok("1 - 2/");
    let b = parse_ok("\n\n1   -   2/");
    assert_eq!(a, b);
    assert_ne!(a, parse_ok("1 + 2/"));
}
