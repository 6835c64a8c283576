//! Integration tests for the EndC lexer.
//!
//! Whole programs in the surface syntax, exercising the context rules that
//! span several tokens and lines.

use endc_lexer::{tokenize, Keyword, LexErrorKind, Symbol, Token, TokenKind, TokenValue};

// ── Helpers ────────────────────────────────────────────────────────

fn lex(input: &str) -> Vec<Token> {
    tokenize(input, "program.endc").expect("lexer should succeed")
}

fn lex_err(input: &str) -> LexErrorKind {
    match tokenize(input, "program.endc") {
        Ok(tokens) => panic!("expected lexer error for input {input:?}, got {tokens:?}"),
        Err(err) => err.kind,
    }
}

/// Drop line terminators and the end marker to look at "meaningful" tokens.
fn meaningful(tokens: &[Token]) -> Vec<&Token> {
    tokens
        .iter()
        .filter(|t| !t.is_symbol(Symbol::Slash) && t.kind != TokenKind::EndOfInput)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════
//  Complete programs
// ═══════════════════════════════════════════════════════════════════

#[test]
fn conditional_program() {
    let input = r#"DCLAR CONSTANT grting = *hello world*/
|* a comment
   spanning two lines *|
CHCK IF {x} DO [
    GIV BACK 1/
] LS DO [
    GIV BACK 2/
]
"#;

    let tokens = lex(input);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::EndOfInput);

    let keywords: Vec<Keyword> = tokens
        .iter()
        .filter_map(|t| match t.value {
            TokenValue::Keyword(kw) => Some(kw),
            _ => None,
        })
        .collect();
    assert_eq!(keywords, vec![
        Keyword::Declare,
        Keyword::Constant,
        Keyword::Check,
        Keyword::If,
        Keyword::Do,
        Keyword::Give,
        Keyword::Back,
        Keyword::Else,
        Keyword::Do,
        Keyword::Give,
        Keyword::Back,
    ]);

    let greeting = tokens.iter().find(|t| t.kind == TokenKind::StringLiteral).unwrap();
    assert_eq!(greeting.value, TokenValue::Text("hello world".to_string()));

    // The comment swallows lines 2 and 3
    let check = tokens.iter().find(|t| t.is_keyword(Keyword::Check)).unwrap();
    assert_eq!(check.location.line, 4);
}

#[test]
fn subroutine_declaration_and_call() {
    let input = "DCLAR SUBROUTIN add{a. b} [\n    GIV BACK a - b/\n]\nCALL add{1. 2}/\n";
    let tokens = lex(input);
    let mt = meaningful(&tokens);

    assert!(mt[0].is_keyword(Keyword::Declare));
    assert!(mt[1].is_keyword(Keyword::Subroutine));
    assert_eq!(mt[2].value, TokenValue::Text("add".to_string()));
    assert!(mt.iter().any(|t| t.is_keyword(Keyword::Call)));
}

#[test]
fn loop_with_until_when() {
    let input = "CHCK UNTIL {i < 3} DO [\n    i = i + 1/\n]\n";
    let tokens = lex(input);
    assert!(tokens.iter().any(|t| t.is_keyword(Keyword::Until)));
    assert!(tokens.iter().any(|t| t.is_symbol(Symbol::Equal)));
}

#[test]
fn expression_lines() {
    let tokens = lex("1 - 2/\n*ab* - *cd*/\n! {NOTHING}/\n");
    let lines: Vec<usize> = meaningful(&tokens).iter().map(|t| t.location.line).collect();
    assert_eq!(lines, vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 3]);
}

// ═══════════════════════════════════════════════════════════════════
//  Rejected programs
// ═══════════════════════════════════════════════════════════════════

#[test]
fn rejected_programs() {
    assert_eq!(lex_err("|* comment test *|"), LexErrorKind::SingleLineComment);
    assert!(matches!(lex_err("SUBROUTIN"), LexErrorKind::MissingBefore { .. }));
    assert!(matches!(lex_err("*/\n"), LexErrorKind::UnterminatedString { .. }));
    assert!(matches!(lex_err("CONSTANT"), LexErrorKind::MissingBefore { .. }));
    assert!(matches!(lex_err("BACK"), LexErrorKind::MissingBefore { .. }));
    assert_eq!(lex_err("GIV BACK 0\n"), LexErrorKind::MissingTerminator);
}

#[test]
fn missing_terminator_on_a_later_line() {
    let err = tokenize("1/\n2/\n3\n", "program.endc").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::MissingTerminator);
    assert_eq!(err.location.line, 3);
    assert!(err.render().contains("^ here"));
}

#[test]
fn forbidden_letter_deep_in_a_line() {
    let input = "DCLAR VARIABL countr = 1/\nDCLAR VARIABL sum = countr + offset/\n";
    let err = tokenize(input, "program.endc").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::ForbiddenLetter { letter: 'e', construct: "name" });
    assert_eq!(err.location.line, 2);
    assert_eq!(err.location.column, "DCLAR VARIABL sum = countr + offs".len() + 1);
}
