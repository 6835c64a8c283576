//! Integration tests for the EndC parser.
//!
//! End-to-end: source text -> tokenize -> Parser -> tree, plus printing
//! trees back to source.

use endc_lexer::{tokenize, Keyword, Location, Token, TokenKind, TokenValue, UnaryOperator};
use endc_parser::*;

// ── Helpers ────────────────────────────────────────────────────────

fn parse(src: &str) -> Expr {
    let tokens = tokenize(src, "program.endc").expect("lexer should succeed");
    Parser::new(tokens).parse().expect("parse should succeed")
}

fn number(n: f64) -> Expr {
    Expr::literal(LiteralValue::Number(n))
}

fn operator_token(value: TokenValue) -> Token {
    let kind = match value {
        TokenValue::Keyword(_) => TokenKind::Keyword,
        _ => TokenKind::UnaryOperator,
    };
    Token::new(kind, value, Location::new("<built>".into(), 1, 1))
}

/// Print, re-lex and re-parse; the tree must survive unchanged.
fn assert_round_trip(src: &str) {
    let original = parse(src);
    let printed = SourcePrinter::print(&original);
    let reparsed = parse(&format!("{printed}/"));
    assert_eq!(original, reparsed, "round trip through {printed:?} changed the tree");
}

// ═══════════════════════════════════════════════════════════════════
//  Printing
// ═══════════════════════════════════════════════════════════════════

#[test]
fn source_printer_output() {
    assert_eq!(SourcePrinter::print(&parse("1 - {2 ; 3}/")), "1 - {2 ; 3}");
    assert_eq!(SourcePrinter::print(&parse("! {NOTHING}/")), "! {NOTHING}");
    assert_eq!(SourcePrinter::print(&parse("*a\\*b*/")), "*a\\*b*");
    assert_eq!(SourcePrinter::print(&parse("2,25 < NO/")), "2,25 < NO");
}

#[test]
fn display_matches_source_printer() {
    let expr = parse("+ 3 \\ 2/");
    assert_eq!(expr.to_string(), SourcePrinter::print(&expr));
}

#[test]
fn ast_printer_output() {
    assert_eq!(AstPrinter::print(&parse("1 - {2}/")), "(- 1 (group 2))");
    assert_eq!(AstPrinter::print(&parse("*ab* - *cd*/")), "(- ab cd)");
}

// ═══════════════════════════════════════════════════════════════════
//  Round trips
// ═══════════════════════════════════════════════════════════════════

#[test]
fn round_trip_arithmetic() {
    assert_round_trip("1 - 2 ; {3 + 4}/");
    assert_round_trip("3 + 4 + 5/");
    assert_round_trip("+ ,5 \\ 2 < 7 !IS NO/");
}

#[test]
fn round_trip_literals() {
    assert_round_trip("*a\\*b* - 3,25/");
    assert_round_trip("NOTHING/");
    assert_round_trip("{{1}} =< 2/");
}

#[test]
fn round_trip_unary_chains() {
    assert_round_trip("! ! {+ 1}/");
    assert_round_trip("! {NOTHING}/");
}

// ═══════════════════════════════════════════════════════════════════
//  Hand-built trees
// ═══════════════════════════════════════════════════════════════════

#[test]
fn equality_keyword_prints_as_is() {
    let expr = Expr::binary(number(1.0), operator_token(TokenValue::Keyword(Keyword::Is)), number(2.0));
    assert_eq!(SourcePrinter::print(&expr), "1 IS 2");
    assert_eq!(AstPrinter::print(&expr), "(IS 1 2)");
}

#[test]
fn built_tree_equals_parsed_tree() {
    let built = Expr::binary(
        number(1.0),
        operator_token(TokenValue::Operator(UnaryOperator::Add)),
        Expr::grouping(Expr::unary(UnaryOperator::Subtract, number(2.0))),
    );
    assert_eq!(built, parse("1 - {+ 2}/"));
}

// ═══════════════════════════════════════════════════════════════════
//  Programs
// ═══════════════════════════════════════════════════════════════════

#[test]
fn program_with_recovery() {
    let src = "1 - 2/\n{3/\n4 ; 2/\n5 6/\n*ok*/\n";
    let tokens = tokenize(src, "program.endc").unwrap();
    let err = Parser::new(tokens).parse_program().unwrap_err();

    let rendered: Vec<String> = err.errors().map(|e| e.to_string()).collect();
    assert_eq!(rendered, vec![
        "[line 2] Error at '/': Expect '}' after expression.".to_string(),
        "[line 4] Error at '6': Expect '/' after expression.".to_string(),
    ]);
}

#[test]
fn clean_program() {
    let src = "1 - 2/\n|* two\nlines *|\n! NO/\n";
    let tokens = tokenize(src, "program.endc").unwrap();
    let exprs = Parser::new(tokens).parse_program().unwrap();
    assert_eq!(exprs.len(), 2);
    assert_eq!(exprs[0], parse("1 - 2/"));
}
