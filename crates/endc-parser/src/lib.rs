mod ast;
mod parser;
mod printer;

pub use ast::{Expr, ExprVisitor, LiteralValue};
pub use parser::{ParseError, Parser, SyntaxError, MAX_DEPTH};
pub use printer::{AstPrinter, SourcePrinter};
