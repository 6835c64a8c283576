use std::fmt;
use std::sync::Arc;

/// Source location of a token: file name plus 1-based line and column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub source: Arc<str>,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(source: Arc<str>, line: usize, column: usize) -> Self {
        Self { source, line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File \"{}\", line {}, column {}", self.source, self.line, self.column)
    }
}

/// Lexical categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Name,
    NumberLiteral,
    StringLiteral,
    Keyword,
    Symbol,
    UnaryOperator,
    EndOfInput,
}

/// All keywords in EndC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Operator keywords
    Is,           // IS
    Or,           // OTHRWIS
    And,          // FUTHRMOR

    // Control flow
    If,           // IF
    Else,         // LS
    Do,           // DO
    Check,        // CHCK
    Until,        // UNTIL
    When,         // WHN
    Finished,     // FINISHD

    // Declarations
    Declare,      // DCLAR
    Constant,     // CONSTANT
    Variable,     // VARIABL
    Give,         // GIV
    Back,         // BACK
    Subroutine,   // SUBROUTIN
    Call,         // CALL
    Export,       // XPORT
    Template,     // TMPLAT
    Behavior,     // BHAVIOR
    Build,        // BUILD
    Own,          // OWN
    From,         // FROM
    Initializer,  // INITIALIZR
    Deinitializer, // DINITIALIZR

    // Constants
    Me,           // M
    False,        // NO
    Nothing,      // NOTHING
}

impl Keyword {
    /// Every keyword, longest spelling first so that prefix matching is greedy
    pub const ALL: [Keyword; 28] = [
        Keyword::Deinitializer,
        Keyword::Initializer,
        Keyword::Subroutine,
        Keyword::Constant,
        Keyword::And,
        Keyword::Behavior,
        Keyword::Finished,
        Keyword::Or,
        Keyword::Variable,
        Keyword::Nothing,
        Keyword::Template,
        Keyword::Declare,
        Keyword::Export,
        Keyword::Until,
        Keyword::Build,
        Keyword::Check,
        Keyword::Back,
        Keyword::Call,
        Keyword::From,
        Keyword::Give,
        Keyword::When,
        Keyword::Own,
        Keyword::Is,
        Keyword::If,
        Keyword::Else,
        Keyword::Do,
        Keyword::False,
        Keyword::Me,
    ];

    pub fn spelling(self) -> &'static str {
        match self {
            Keyword::Is => "IS",
            Keyword::Or => "OTHRWIS",
            Keyword::And => "FUTHRMOR",
            Keyword::If => "IF",
            Keyword::Else => "LS",
            Keyword::Do => "DO",
            Keyword::Check => "CHCK",
            Keyword::Until => "UNTIL",
            Keyword::When => "WHN",
            Keyword::Finished => "FINISHD",
            Keyword::Declare => "DCLAR",
            Keyword::Constant => "CONSTANT",
            Keyword::Variable => "VARIABL",
            Keyword::Give => "GIV",
            Keyword::Back => "BACK",
            Keyword::Subroutine => "SUBROUTIN",
            Keyword::Call => "CALL",
            Keyword::Export => "XPORT",
            Keyword::Template => "TMPLAT",
            Keyword::Behavior => "BHAVIOR",
            Keyword::Build => "BUILD",
            Keyword::Own => "OWN",
            Keyword::From => "FROM",
            Keyword::Initializer => "INITIALIZR",
            Keyword::Deinitializer => "DINITIALIZR",
            Keyword::Me => "M",
            Keyword::False => "NO",
            Keyword::Nothing => "NOTHING",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Punctuation symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    LParen,       // (
    RParen,       // )
    LBracket,     // [
    RBracket,     // ]
    LBrace,       // {
    RBrace,       // }
    Slash,        // /   line terminator
    Colon,        // :
    Comma,        // ,
    Equal,        // =
    Dot,          // .
    Arrow,        // <-
}

impl Symbol {
    pub fn spelling(self) -> &'static str {
        match self {
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::LBracket => "[",
            Symbol::RBracket => "]",
            Symbol::LBrace => "{",
            Symbol::RBrace => "}",
            Symbol::Slash => "/",
            Symbol::Colon => ":",
            Symbol::Comma => ",",
            Symbol::Equal => "=",
            Symbol::Dot => ".",
            Symbol::Arrow => "<-",
        }
    }

    /// Symbols a line may legally end on
    pub fn terminates_line(self) -> bool {
        matches!(self, Symbol::Slash | Symbol::LBracket | Symbol::RBracket | Symbol::LBrace)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Semantic operator identity, independent of the surface spelling.
///
/// The surface language spells addition `-` and subtraction `+`, and the
/// "greater" comparisons point the other way (`<`, `=<`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Add,            // -
    Subtract,       // +
    Divide,         // ;
    Modulo,         // \
    LogicalNot,     // !
    GreaterThan,    // <
    GreaterOrEqual, // =<
    NotEquals,      // !IS
}

impl UnaryOperator {
    pub fn spelling(self) -> &'static str {
        match self {
            UnaryOperator::Add => "-",
            UnaryOperator::Subtract => "+",
            UnaryOperator::Divide => ";",
            UnaryOperator::Modulo => "\\",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::GreaterThan => "<",
            UnaryOperator::GreaterOrEqual => "=<",
            UnaryOperator::NotEquals => "!IS",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Token payload
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Number(f64),
    Text(String),
    Keyword(Keyword),
    Symbol(Symbol),
    Operator(UnaryOperator),
    None,
}

/// A single token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, location: Location) -> Self {
        Self { kind, value, location }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.value == TokenValue::Keyword(keyword)
    }

    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        self.value == TokenValue::Symbol(symbol)
    }

    pub fn is_operator(&self, operator: UnaryOperator) -> bool {
        self.value == TokenValue::Operator(operator)
    }

    /// Source-like text of the token, used in diagnostics
    pub fn lexeme(&self) -> String {
        match &self.value {
            TokenValue::Number(n) => format_number(*n),
            TokenValue::Text(text) if self.kind == TokenKind::StringLiteral => format!("*{text}*"),
            TokenValue::Text(text) => text.clone(),
            TokenValue::Keyword(kw) => kw.spelling().to_string(),
            TokenValue::Symbol(sym) => sym.spelling().to_string(),
            TokenValue::Operator(op) => op.spelling().to_string(),
            TokenValue::None => String::new(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme())
    }
}

/// Render a number in surface syntax: comma as decimal separator, no trailing `,0`
pub fn format_number(value: f64) -> String {
    format!("{value}").replace('.', ",")
}
