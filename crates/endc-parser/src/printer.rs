//! Renderers for expression trees.
//!
//! [`SourcePrinter`] writes surface syntax that lexes and parses back to
//! an equal tree. [`AstPrinter`] writes a parenthesized prefix form for
//! debugging.

use std::fmt;

use endc_lexer::{format_number, Token, UnaryOperator};

use crate::ast::{Expr, ExprVisitor, LiteralValue};

/// Surface-syntax renderer
pub struct SourcePrinter;

impl SourcePrinter {
    pub fn print(expr: &Expr) -> String {
        expr.accept(&mut SourcePrinter)
    }
}

impl ExprVisitor for SourcePrinter {
    type Output = String;

    fn visit_literal(&mut self, value: &LiteralValue) -> String {
        match value {
            LiteralValue::Number(n) => format_number(*n),
            LiteralValue::String(text) => format!("*{}*", text.replace('*', "\\*")),
            LiteralValue::False => "NO".to_string(),
            LiteralValue::Null => "NOTHING".to_string(),
        }
    }

    fn visit_grouping(&mut self, inner: &Expr) -> String {
        format!("{{{}}}", inner.accept(self))
    }

    fn visit_unary(&mut self, operator: UnaryOperator, operand: &Expr) -> String {
        format!("{operator} {}", operand.accept(self))
    }

    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        format!("{} {} {}", left.accept(self), operator.lexeme(), right.accept(self))
    }
}

/// Parenthesized prefix renderer, e.g. `(- 1 (group 2))`
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        expr.accept(&mut AstPrinter)
    }
}

impl ExprVisitor for AstPrinter {
    type Output = String;

    fn visit_literal(&mut self, value: &LiteralValue) -> String {
        match value {
            LiteralValue::Number(n) => format_number(*n),
            LiteralValue::String(text) => text.clone(),
            LiteralValue::False => "NO".to_string(),
            LiteralValue::Null => "NOTHING".to_string(),
        }
    }

    fn visit_grouping(&mut self, inner: &Expr) -> String {
        format!("(group {})", inner.accept(self))
    }

    fn visit_unary(&mut self, operator: UnaryOperator, operand: &Expr) -> String {
        format!("({operator} {})", operand.accept(self))
    }

    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        format!("({} {} {})", operator.lexeme(), left.accept(self), right.accept(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SourcePrinter::print(self))
    }
}
