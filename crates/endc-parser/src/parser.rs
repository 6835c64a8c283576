use endc_lexer::{Keyword, Location, Symbol, Token, TokenKind, TokenValue, UnaryOperator};
use crate::ast::*;

mod exprs;

/// Deepest nesting of groupings and prefix operators accepted
pub const MAX_DEPTH: usize = 256;

/// Keywords that start a statement; error recovery resumes before them
const STATEMENT_KEYWORDS: [Keyword; 6] = [
    Keyword::Declare,
    Keyword::Export,
    Keyword::Check,
    Keyword::Call,
    Keyword::Give,
    Keyword::Until,
];

type ParseResult<T> = Result<T, SyntaxError>;

/// Recursive-descent parser for EndC expressions
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    errors: Vec<SyntaxError>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::EndOfInput) {
            let location = tokens
                .last()
                .map(|t| t.location.clone())
                .unwrap_or_else(|| Location::new("".into(), 0, 0));
            tokens.push(Token::new(TokenKind::EndOfInput, TokenValue::None, location));
        }
        Self { tokens, pos: 0, depth: 0, errors: Vec::new() }
    }

    /// Parse a single expression, optionally followed by line terminators
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        self.pos = 0;
        self.depth = 0;
        self.errors.clear();

        if let Ok(expr) = self.expression() {
            self.skip_terminators();
            if self.is_at_end() {
                return Ok(expr);
            }
            let tok = self.current().clone();
            self.error(&tok, "Expect end of expression.");
        }

        Err(ParseError::from_records(std::mem::take(&mut self.errors)))
    }

    /// Parse every `/`-terminated expression, collecting all syntax errors
    pub fn parse_program(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.pos = 0;
        self.errors.clear();
        let mut exprs = Vec::new();

        loop {
            self.skip_terminators();
            if self.is_at_end() {
                break;
            }
            self.depth = 0;
            match self.expression() {
                Ok(expr) if self.check_symbol(Symbol::Slash) || self.is_at_end() => exprs.push(expr),
                Ok(_) => {
                    let tok = self.current().clone();
                    self.error(&tok, "Expect '/' after expression.");
                    self.synchronize();
                }
                Err(_) => self.synchronize(),
            }
        }

        if self.errors.is_empty() {
            Ok(exprs)
        } else {
            Err(ParseError::from_records(std::mem::take(&mut self.errors)))
        }
    }

    pub fn had_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    // ── Token navigation ─────────────────────────────────────

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::EndOfInput
    }

    fn check_symbol(&self, symbol: Symbol) -> bool {
        !self.is_at_end() && self.current().is_symbol(symbol)
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        !self.is_at_end() && self.current().is_keyword(keyword)
    }

    /// Consume the current token if it is one of `operators`
    fn match_operator(&mut self, operators: &[UnaryOperator]) -> Option<Token> {
        if operators.iter().any(|op| self.current().is_operator(*op)) {
            return Some(self.advance().clone());
        }
        None
    }

    fn match_keyword(&mut self, keyword: Keyword) -> Option<Token> {
        if self.check_keyword(keyword) {
            return Some(self.advance().clone());
        }
        None
    }

    fn consume_symbol(&mut self, symbol: Symbol, message: &str) -> ParseResult<Token> {
        if self.check_symbol(symbol) {
            return Ok(self.advance().clone());
        }
        let tok = self.current().clone();
        Err(self.error(&tok, message))
    }

    fn skip_terminators(&mut self) {
        while self.check_symbol(Symbol::Slash) {
            self.advance();
        }
    }

    // ── Errors ───────────────────────────────────────────────

    /// Record an error anchored at `token` and hand it back for propagation
    fn error(&mut self, token: &Token, message: &str) -> SyntaxError {
        let context = if token.kind == TokenKind::EndOfInput {
            "at end".to_string()
        } else {
            format!("at '{}'", token.lexeme())
        };
        let err = SyntaxError {
            line: token.location.line,
            context,
            message: message.to_string(),
        };
        self.errors.push(err.clone());
        err
    }

    /// Skip to the next likely statement boundary
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().is_symbol(Symbol::Slash) {
                return;
            }
            if STATEMENT_KEYWORDS.iter().any(|kw| self.current().is_keyword(*kw)) {
                return;
            }
            self.advance();
        }
    }

    fn enter_nested(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_DEPTH {
            let tok = self.current().clone();
            return Err(self.error(&tok, "Expression nested too deeply."));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave_nested(&mut self) {
        self.depth -= 1;
    }
}

/// One syntax error, anchored to a token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[line {line}] Error {context}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    /// `at end` or `at '<token>'`
    pub context: String,
    pub message: String,
}

/// A failed parse, carrying every error recorded during the attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{first}")]
pub struct ParseError {
    pub first: SyntaxError,
    pub others: Vec<SyntaxError>,
}

impl ParseError {
    fn from_records(mut records: Vec<SyntaxError>) -> Self {
        // A failed parse always records at least one error
        let first = records.remove(0);
        Self { first, others: records }
    }

    pub fn errors(&self) -> impl Iterator<Item = &SyntaxError> {
        std::iter::once(&self.first).chain(self.others.iter())
    }

    pub fn count(&self) -> usize {
        1 + self.others.len()
    }
}

// ── Tests ────────────────────────────────────────────────────

#[cfg(test)]
mod tests;
