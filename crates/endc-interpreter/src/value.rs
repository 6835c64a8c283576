use std::fmt;

use endc_lexer::{format_number, UnaryOperator};
use endc_parser::LiteralValue;

use crate::evaluator::EvalError;

/// Runtime value produced by evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
}

impl Value {
    /// `NOTHING` and `NO` are falsy, everything else is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(_) | Value::String(_) => true,
        }
    }

    /// Coerce to a number for `operator`.
    ///
    /// Booleans count as 1 and 0; strings must hold a number written with
    /// either a comma or a period as decimal separator.
    pub fn as_number(&self, operator: UnaryOperator) -> Result<f64, EvalError> {
        let parsed = match self {
            Value::Number(n) => Some(*n),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(text) => text.trim().replace(',', ".").parse::<f64>().ok(),
            Value::Null => None,
        };
        parsed.ok_or_else(|| EvalError::OperandMustBeNumber {
            operator,
            found: self.to_string(),
        })
    }

    /// Text used when the value is concatenated onto a string
    pub fn to_text(&self) -> String {
        match self {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::String(text) => Value::String(text.clone()),
            LiteralValue::False => Value::Boolean(false),
            LiteralValue::Null => Value::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(text) => write!(f, "*{}*", text.replace('*', "\\*")),
            Value::Boolean(true) => f.write_str("True"),
            Value::Boolean(false) => f.write_str("False"),
            Value::Null => f.write_str("NOTHING"),
        }
    }
}
