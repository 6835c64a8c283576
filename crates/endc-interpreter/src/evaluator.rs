use endc_lexer::{Keyword, Token, TokenValue, UnaryOperator};
use endc_parser::{Expr, ExprVisitor, LiteralValue};

use crate::value::Value;

type EvalResult = Result<Value, EvalError>;

/// Evaluate a single expression tree
pub fn evaluate(expr: &Expr) -> EvalResult {
    Interpreter.evaluate(expr)
}

/// Tree-walking evaluator. Holds no state between evaluations.
#[derive(Debug, Default, Clone, Copy)]
pub struct Interpreter;

impl Interpreter {
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        expr.accept(self)
    }
}

impl ExprVisitor for Interpreter {
    type Output = EvalResult;

    fn visit_literal(&mut self, value: &LiteralValue) -> EvalResult {
        Ok(Value::from(value))
    }

    fn visit_grouping(&mut self, inner: &Expr) -> EvalResult {
        self.evaluate(inner)
    }

    fn visit_unary(&mut self, operator: UnaryOperator, operand: &Expr) -> EvalResult {
        let operand = self.evaluate(operand)?;

        match operator {
            UnaryOperator::Subtract => Ok(Value::Number(-operand.as_number(operator)?)),
            UnaryOperator::LogicalNot => Ok(Value::Boolean(!operand.is_truthy())),
            other => unreachable!("'{other}' is not a prefix operator"),
        }
    }

    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> EvalResult {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        let op = match operator.value {
            TokenValue::Operator(op) => op,
            TokenValue::Keyword(Keyword::Is) => return Ok(Value::Boolean(left == right)),
            _ => unreachable!("'{operator}' is not a binary operator"),
        };

        match op {
            UnaryOperator::Add => add(left, right),
            UnaryOperator::Subtract => Ok(Value::Number(left.as_number(op)? - right.as_number(op)?)),
            UnaryOperator::Divide => {
                let (l, r) = (left.as_number(op)?, right.as_number(op)?);
                if r == 0.0 {
                    return Err(EvalError::DivisionByZero { operator: op });
                }
                Ok(Value::Number(l / r))
            }
            UnaryOperator::Modulo => {
                let (l, r) = (left.as_number(op)?, right.as_number(op)?);
                if r == 0.0 {
                    return Err(EvalError::DivisionByZero { operator: op });
                }
                Ok(Value::Number(floored_remainder(l, r)))
            }
            UnaryOperator::GreaterThan => Ok(Value::Boolean(left.as_number(op)? > right.as_number(op)?)),
            UnaryOperator::GreaterOrEqual => {
                Ok(Value::Boolean(left.as_number(op)? >= right.as_number(op)?))
            }
            UnaryOperator::NotEquals => Ok(Value::Boolean(left != right)),
            UnaryOperator::LogicalNot => unreachable!("'!' is not a binary operator"),
        }
    }
}

/// `-` concatenates onto a string and adds onto a number.
fn add(left: Value, right: Value) -> EvalResult {
    match left {
        Value::String(mut text) => {
            text.push_str(&right.to_text());
            Ok(Value::String(text))
        }
        Value::Number(n) => Ok(Value::Number(n + right.as_number(UnaryOperator::Add)?)),
        other => Err(EvalError::InvalidAddOperand { found: other.to_string() }),
    }
}

/// Remainder with the sign of the divisor
fn floored_remainder(dividend: f64, divisor: f64) -> f64 {
    let rem = dividend % divisor;
    if rem != 0.0 && (rem < 0.0) != (divisor < 0.0) {
        rem + divisor
    } else {
        rem
    }
}

// ── Errors ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("operand must be a number, found {found}")]
    OperandMustBeNumber { operator: UnaryOperator, found: String },

    #[error("cannot add to {found}, left operand must be a number or a string")]
    InvalidAddOperand { found: String },

    #[error("division by zero")]
    DivisionByZero { operator: UnaryOperator },
}

impl EvalError {
    /// The operator whose precondition failed
    pub fn operator(&self) -> UnaryOperator {
        match self {
            EvalError::OperandMustBeNumber { operator, .. } => *operator,
            EvalError::InvalidAddOperand { .. } => UnaryOperator::Add,
            EvalError::DivisionByZero { operator } => *operator,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────
