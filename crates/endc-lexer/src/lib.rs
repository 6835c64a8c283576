mod token;
mod lexer;

pub use token::{format_number, Keyword, Location, Symbol, Token, TokenKind, TokenValue, UnaryOperator};
pub use lexer::{tokenize, LexError, LexErrorKind, Lexer};
