mod evaluator;
mod value;

pub use evaluator::{evaluate, EvalError, Interpreter};
pub use value::Value;
