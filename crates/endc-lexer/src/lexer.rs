use std::sync::Arc;

use crate::token::{Keyword, Location, Symbol, Token, TokenKind, TokenValue, UnaryOperator};

/// Characters that end a name
const NAME_DELIMITERS: [char; 11] = [' ', '\n', '{', '(', '[', ']', ')', '}', '.', '\0', '/'];

/// Tokenize `source_text`, tagging every token with `source_name`
pub fn tokenize(source_text: &str, source_name: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source_text, source_name).tokenize()
}

/// Line-oriented lexer for EndC source code.
///
/// Scanning stops at the first error; there is no recovery.
pub struct Lexer {
    source: Arc<str>,
    lines: Vec<Vec<char>>,
    line: usize,
    pos: usize,
    tokens: Vec<Token>,
    line_first_token: usize,
}

impl Lexer {
    pub fn new(source_text: &str, source_name: &str) -> Self {
        let lines = source_text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).chars().collect())
            .collect();
        Self {
            source: Arc::from(source_name),
            lines,
            line: 0,
            pos: 0,
            tokens: Vec::new(),
            line_first_token: 0,
        }
    }

    /// Tokenize the entire source and return the token list
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        while self.line < self.lines.len() {
            self.pos = 0;
            self.line_first_token = self.tokens.len();
            self.scan_line()?;
            self.line += 1;
        }

        // End of input sits just past the last real character
        let last = self.lines.len() - 1;
        let location = Location::new(self.source.clone(), last + 1, self.lines[last].len() + 1);
        self.tokens.push(Token::new(TokenKind::EndOfInput, TokenValue::None, location));

        Ok(std::mem::take(&mut self.tokens))
    }

    fn scan_line(&mut self) -> Result<(), LexError> {
        while let Some(ch) = self.current() {
            match ch {
                ' ' | '\r' => self.pos += 1,
                '\t' => return Err(self.error_here(LexErrorKind::TabCharacter)),
                '\0' => return Err(self.error_here(LexErrorKind::IllegalCharacter(ch))),
                '|' if self.peek(1) == Some('*') => self.read_block_comment()?,
                '*' => self.read_string()?,
                '0'..='9' => self.read_number()?,
                ',' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => self.read_number()?,
                _ => self.read_symbol_keyword_or_name()?,
            }
        }
        self.check_line_end(self.line_len() + 1)
    }

    // ── Helpers ──────────────────────────────────────────────

    fn current(&self) -> Option<char> {
        self.peek(0)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.lines[self.line].get(self.pos + offset).copied()
    }

    fn line_len(&self) -> usize {
        self.lines[self.line].len()
    }

    fn is_last_line(&self) -> bool {
        self.line + 1 == self.lines.len()
    }

    fn location_at(&self, pos: usize) -> Location {
        Location::new(self.source.clone(), self.line + 1, pos + 1)
    }

    fn push_token(&mut self, kind: TokenKind, value: TokenValue, start: usize) {
        let location = self.location_at(start);
        self.tokens.push(Token::new(kind, value, location));
    }

    fn previous(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Does the rest of the line start with `word`, followed by a word boundary?
    fn matches_word(&self, word: &str) -> bool {
        let rest = &self.lines[self.line][self.pos..];
        let len = word.chars().count();
        rest.len() >= len
            && rest.iter().zip(word.chars()).all(|(a, b)| *a == b)
            && rest.get(len).is_none_or(|c| !c.is_alphanumeric() && *c != '_')
    }

    fn matches_text(&self, text: &str) -> bool {
        let rest = &self.lines[self.line][self.pos..];
        rest.len() >= text.len() && rest.iter().zip(text.chars()).all(|(a, b)| *a == b)
    }

    /// First non-space character after the current position
    fn peek_non_space(&self) -> Option<char> {
        self.lines[self.line][self.pos..].iter().copied().find(|c| *c != ' ')
    }

    /// Next space-separated word after the current position
    fn peek_word(&self) -> String {
        self.lines[self.line][self.pos..]
            .iter()
            .skip_while(|c| **c == ' ')
            .take_while(|c| !NAME_DELIMITERS.contains(c))
            .collect()
    }

    fn error_at(&self, line: usize, column: usize, kind: LexErrorKind) -> LexError {
        LexError {
            location: Location::new(self.source.clone(), line + 1, column),
            kind,
            line_text: self.lines[line].iter().collect(),
        }
    }

    fn error_here(&self, kind: LexErrorKind) -> LexError {
        self.error_at(self.line, self.pos + 1, kind)
    }

    fn error_at_token(&self, token: &Token, kind: LexErrorKind) -> LexError {
        self.error_at(token.location.line - 1, token.location.column, kind)
    }

    // ── Line terminators ─────────────────────────────────────

    /// A line that produced tokens must end on a terminator, or be a lone closing bracket
    fn check_line_end(&self, column: usize) -> Result<(), LexError> {
        let emitted = &self.tokens[self.line_first_token..];
        let Some(last) = emitted.last() else {
            return Ok(());
        };
        let terminated = match last.value {
            TokenValue::Symbol(sym) => {
                sym.terminates_line()
                    || (emitted.len() == 1 && matches!(sym, Symbol::RBrace | Symbol::RParen))
            }
            _ => false,
        };
        if terminated {
            Ok(())
        } else {
            Err(self.error_at(self.line, column, LexErrorKind::MissingTerminator))
        }
    }

    // ── Comment ──────────────────────────────────────────────

    /// `|* ... *|`, which has to close on a later line
    fn read_block_comment(&mut self) -> Result<(), LexError> {
        let open_line = self.line;
        let open_column = self.pos + 1;
        self.check_line_end(open_column)?;

        // `|*|` closes on its own opener
        if self.find_comment_close(self.pos + 1).is_some() {
            return Err(self.error_at(open_line, open_column, LexErrorKind::SingleLineComment));
        }

        loop {
            self.line += 1;
            self.pos = 0;
            if self.line >= self.lines.len() {
                return Err(self.error_at(open_line, open_column, LexErrorKind::UnterminatedComment));
            }
            if let Some(close) = self.find_comment_close(0) {
                self.pos = close + 2;
                self.line_first_token = self.tokens.len();
                return Ok(());
            }
        }
    }

    fn find_comment_close(&self, from: usize) -> Option<usize> {
        let line = &self.lines[self.line];
        (from..line.len().saturating_sub(1)).find(|&i| line[i] == '*' && line[i + 1] == '|')
    }

    // ── String ───────────────────────────────────────────────

    /// `*text*`, with `\*` standing for a literal asterisk
    fn read_string(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        self.pos += 1; // skip opening '*'
        let mut value = String::new();
        let mut columns = Vec::new();

        loop {
            match self.current() {
                None => {
                    let reached = if self.is_last_line() { "input" } else { "line" };
                    return Err(self.error_here(LexErrorKind::UnterminatedString { reached }));
                }
                Some('\\') if self.peek(1) == Some('*') => {
                    columns.push(self.pos + 1);
                    value.push('*');
                    self.pos += 2;
                }
                Some('*') => {
                    self.pos += 1; // skip closing '*'
                    break;
                }
                Some(ch) => {
                    columns.push(self.pos + 1);
                    value.push(ch);
                    self.pos += 1;
                }
            }
        }

        if !self.in_constant_statement() {
            if let Some((i, letter)) = value.chars().enumerate().find(|(_, c)| matches!(c, 'e' | 'E')) {
                return Err(self.error_at(
                    self.line,
                    columns[i],
                    LexErrorKind::ForbiddenLetter { letter, construct: "non-constant string" },
                ));
            }
        }

        self.push_token(TokenKind::StringLiteral, TokenValue::Text(value), start);
        Ok(())
    }

    /// Whether the statement being scanned carries the CONSTANT qualifier
    fn in_constant_statement(&self) -> bool {
        self.tokens
            .iter()
            .rev()
            .take_while(|t| !t.is_symbol(Symbol::Slash))
            .any(|t| t.is_keyword(Keyword::Constant))
    }

    // ── Number ───────────────────────────────────────────────

    /// Digits with a comma as the decimal separator; `,5` is a bare fraction
    fn read_number(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        let mut text = String::new();
        let mut commas = 0;

        while let Some(ch) = self.current() {
            if ch.is_ascii_digit() {
                text.push(ch);
            } else if ch == ',' && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
                commas += 1;
                text.push('.');
            } else {
                break;
            }
            self.pos += 1;
        }

        if commas > 1 {
            let literal = text.replace('.', ",");
            return Err(self.error_at(self.line, start + 1, LexErrorKind::MalformedNumber(literal)));
        }
        if self.current().is_none() && self.is_last_line() {
            return Err(self.error_here(LexErrorKind::UnterminatedNumber));
        }

        let normalized = if text.starts_with('.') { format!("0{text}") } else { text };
        let value: f64 = normalized.parse().map_err(|_| {
            self.error_at(self.line, start + 1, LexErrorKind::MalformedNumber(normalized.replace('.', ",")))
        })?;
        if !value.is_finite() {
            return Err(self.error_at(self.line, start + 1, LexErrorKind::NumberOutOfRange));
        }

        self.push_token(TokenKind::NumberLiteral, TokenValue::Number(value), start);
        Ok(())
    }

    // ── Symbols, keywords, names ─────────────────────────────

    fn read_symbol_keyword_or_name(&mut self) -> Result<(), LexError> {
        let start = self.pos;

        // Multi-character spellings first
        if self.matches_text("<-") {
            if !self.previous().is_some_and(|t| t.is_symbol(Symbol::RBrace)) {
                return Err(self.error_here(LexErrorKind::MissingBefore { required: "\"}\"", found: "<-" }));
            }
            self.pos += 2;
            self.push_token(TokenKind::Symbol, TokenValue::Symbol(Symbol::Arrow), start);
            return Ok(());
        }
        if self.matches_text("=<") {
            self.pos += 2;
            self.push_operator(UnaryOperator::GreaterOrEqual, start);
            return Ok(());
        }
        if self.matches_word("!IS") {
            self.pos += 3;
            self.push_operator(UnaryOperator::NotEquals, start);
            return Ok(());
        }

        if let Some(keyword) = Keyword::ALL.into_iter().find(|kw| self.matches_word(kw.spelling())) {
            self.pos += keyword.spelling().len();
            self.check_keyword_context(keyword, start)?;
            self.push_token(TokenKind::Keyword, TokenValue::Keyword(keyword), start);
            return Ok(());
        }

        let Some(ch) = self.current() else {
            return Ok(());
        };
        let symbol = match ch {
            '(' => Some(Symbol::LParen),
            ')' => Some(Symbol::RParen),
            '[' => Some(Symbol::LBracket),
            ']' => Some(Symbol::RBracket),
            '{' => Some(Symbol::LBrace),
            '}' => Some(Symbol::RBrace),
            '/' => Some(Symbol::Slash),
            ':' => Some(Symbol::Colon),
            ',' => Some(Symbol::Comma),
            '.' => Some(Symbol::Dot),
            '=' => {
                if !self.previous().is_some_and(|t| t.kind == TokenKind::Name) {
                    return Err(self.error_here(LexErrorKind::MissingNameBefore { found: "=" }));
                }
                Some(Symbol::Equal)
            }
            _ => None,
        };
        if let Some(symbol) = symbol {
            self.pos += 1;
            self.push_token(TokenKind::Symbol, TokenValue::Symbol(symbol), start);
            return Ok(());
        }

        let operator = match ch {
            '-' => Some(UnaryOperator::Add),
            '+' => Some(UnaryOperator::Subtract),
            ';' => Some(UnaryOperator::Divide),
            '\\' => Some(UnaryOperator::Modulo),
            '!' => Some(UnaryOperator::LogicalNot),
            '<' => Some(UnaryOperator::GreaterThan),
            _ => None,
        };
        if let Some(operator) = operator {
            self.pos += 1;
            self.push_operator(operator, start);
            return Ok(());
        }

        self.read_name()
    }

    fn push_operator(&mut self, operator: UnaryOperator, start: usize) {
        self.push_token(TokenKind::UnaryOperator, TokenValue::Operator(operator), start);
    }

    fn read_name(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        let mut name = String::new();

        while let Some(ch) = self.current() {
            if NAME_DELIMITERS.contains(&ch) || ch == '\t' || ch == '\r' {
                break;
            }
            name.push(ch);
            self.pos += 1;
        }

        let after_from = self.previous().is_some_and(|t| t.is_keyword(Keyword::From));
        if !after_from {
            if let Some((i, letter)) = name.chars().enumerate().find(|(_, c)| matches!(c, 'e' | 'E')) {
                return Err(self.error_at(
                    self.line,
                    start + i + 1,
                    LexErrorKind::ForbiddenLetter { letter, construct: "name" },
                ));
            }
        }

        self.push_token(TokenKind::Name, TokenValue::Text(name), start);
        Ok(())
    }

    // ── Keyword context ──────────────────────────────────────

    /// Local ordering rules checked as soon as a keyword is read
    fn check_keyword_context(&self, keyword: Keyword, start: usize) -> Result<(), LexError> {
        let found = keyword.spelling();
        let before = |required: &[Keyword]| {
            self.previous()
                .is_some_and(|t| required.iter().any(|kw| t.is_keyword(*kw)))
        };
        let missing_before = |required: &'static str| {
            self.error_at(self.line, start + 1, LexErrorKind::MissingBefore { required, found })
        };
        let missing_after = |required: &'static str| {
            self.error_at(self.line, start + 1, LexErrorKind::MissingAfter { required, found })
        };

        match keyword {
            Keyword::Constant
            | Keyword::Variable
            | Keyword::Template
            | Keyword::Initializer
            | Keyword::Deinitializer => {
                if !before(&[Keyword::Declare]) {
                    return Err(missing_before("DCLAR"));
                }
            }
            Keyword::Back => {
                if !before(&[Keyword::Give]) {
                    return Err(missing_before("GIV"));
                }
            }
            Keyword::Build => {
                if !before(&[Keyword::Call]) {
                    return Err(missing_before("CALL"));
                }
            }
            Keyword::If => {
                if !before(&[Keyword::Check]) {
                    return Err(missing_before("CHCK"));
                }
            }
            Keyword::Subroutine => {
                if !before(&[Keyword::Declare, Keyword::Call]) {
                    return Err(missing_before("DCLAR or CALL"));
                }
            }
            Keyword::Is => {
                if !self.previous().is_some_and(|t| t.kind == TokenKind::Name) {
                    return Err(self.error_at(self.line, start + 1, LexErrorKind::MissingNameBefore { found }));
                }
            }
            Keyword::Else => {
                if !self.previous().is_some_and(|t| t.is_symbol(Symbol::RBracket)) {
                    return Err(missing_before("\"]\""));
                }
                if self.peek_word() != Keyword::Do.spelling() {
                    return Err(missing_after("DO"));
                }
            }
            Keyword::When => {
                if !before(&[Keyword::Until]) {
                    return Err(missing_before("UNTIL"));
                }
                if self.peek_non_space() != Some('{') {
                    return Err(missing_after("\"{\""));
                }
            }
            Keyword::Until => {
                if self.previous().is_some_and(|t| t.is_symbol(Symbol::RBracket)) {
                    if self.peek_word() != Keyword::When.spelling() {
                        return Err(missing_after("WHN"));
                    }
                } else if before(&[Keyword::Check]) {
                    if self.peek_non_space() != Some('{') {
                        return Err(missing_after("\"{\""));
                    }
                } else {
                    return Err(missing_before("\"]\" or CHCK"));
                }
            }
            Keyword::Do => {
                if self.peek_non_space() != Some('[') {
                    return Err(missing_after("\"[\""));
                }
            }
            Keyword::From => self.check_import_clause(start)?,
            _ => {}
        }
        Ok(())
    }

    /// `OWN name(.name)* FROM`, validated by walking back over emitted tokens
    fn check_import_clause(&self, start: usize) -> Result<(), LexError> {
        let mut expect_name = true;

        for token in self.tokens.iter().rev() {
            if token.is_keyword(Keyword::Own) {
                if expect_name {
                    let message = "expected names between OWN and FROM, found nothing".to_string();
                    return Err(self.error_at_token(token, LexErrorKind::InvalidImport(message)));
                }
                return Ok(());
            }
            match token.kind {
                TokenKind::Name if expect_name => expect_name = false,
                TokenKind::Name => {
                    let message = "expected \".\" or OWN before name, found name".to_string();
                    return Err(self.error_at_token(token, LexErrorKind::InvalidImport(message)));
                }
                TokenKind::Symbol if token.is_symbol(Symbol::Dot) && !expect_name => expect_name = true,
                TokenKind::Symbol if token.is_symbol(Symbol::Dot) => {
                    let message = "expected names between OWN and FROM, found nothing".to_string();
                    return Err(self.error_at_token(token, LexErrorKind::InvalidImport(message)));
                }
                _ => {
                    let message = format!("expected name or OWN, found '{}'", token.lexeme());
                    return Err(self.error_at_token(token, LexErrorKind::InvalidImport(message)));
                }
            }
        }

        Err(self.error_at(
            self.line,
            start + 1,
            LexErrorKind::MissingBefore { required: "OWN", found: Keyword::From.spelling() },
        ))
    }
}

/// What went wrong while scanning
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("found invalid character (TAB cannot be used)")]
    TabCharacter,
    #[error("illegal character {0:?}")]
    IllegalCharacter(char),
    #[error("missing \"/\" before newline")]
    MissingTerminator,
    #[error("reached end of {reached} without closing string character \"*\"")]
    UnterminatedString { reached: &'static str },
    #[error("reached end of file, expected \"*|\" after comment")]
    UnterminatedComment,
    #[error("comments must be at least 2 lines long")]
    SingleLineComment,
    #[error("found \"{letter}\" character in {construct}")]
    ForbiddenLetter { letter: char, construct: &'static str },
    #[error("missing {required} before {found}")]
    MissingBefore { required: &'static str, found: &'static str },
    #[error("missing {required} after {found}")]
    MissingAfter { required: &'static str, found: &'static str },
    #[error("missing name before {found}")]
    MissingNameBefore { found: &'static str },
    #[error("malformed number literal {0:?}")]
    MalformedNumber(String),
    #[error("number literal is too large")]
    NumberOutOfRange,
    #[error("reached end of input inside number literal, expected \"/\"")]
    UnterminatedNumber,
    #[error("invalid import statement: {0}")]
    InvalidImport(String),
}

/// A lexical error anchored to one source position
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{location}: {kind}")]
pub struct LexError {
    pub location: Location,
    pub kind: LexErrorKind,
    /// Full text of the offending line
    pub line_text: String,
}

impl LexError {
    /// Message followed by the source line and a caret under the column
    pub fn render(&self) -> String {
        let pad = " ".repeat(self.location.column.saturating_sub(1));
        format!("{self}\n{}\n{pad}^ here", self.line_text)
    }
}
