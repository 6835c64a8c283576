use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use endc_interpreter::{evaluate, EvalError};
use endc_lexer::{tokenize, LexError};
use endc_parser::{AstPrinter, ParseError, Parser};

use crate::backend;
use crate::config::Settings;
use crate::logger::Logger;

/// A pipeline failure, tagged with the stage that produced it
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("Failed to tokenize expression:\n\t{}", .0.render())]
    Lex(#[from] LexError),

    #[error("Failed to parse expression:\n\t{0}")]
    Parse(#[from] ParseError),

    #[error("Interpreter error:\n\t{}: {}", .0.operator(), .0)]
    Eval(#[from] EvalError),
}

/// Lex, parse and evaluate one expression, returning its display text.
/// With `print_ast` the parenthesized tree is returned instead.
pub fn run_line(source: &str, source_name: &str, print_ast: bool) -> Result<String, StageError> {
    let tokens = tokenize(source, source_name)?;
    let expr = Parser::new(tokens).parse()?;
    if print_ast {
        return Ok(AstPrinter::print(&expr));
    }
    Ok(evaluate(&expr)?.to_string())
}

/// Run every expression of a source file through the selected backend.
/// Returns the process exit status.
pub fn run_file(path: &Path, settings: &Settings, log: &Logger) -> Result<i32> {
    if !path.exists() {
        log.error(format!("File {} not found.", path.display()));
        return Ok(1);
    }
    log.info(format!("Compiling {}", path.display()));
    let source = fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    let source_name = path.display().to_string();

    log.info("Tokenizing..");
    let tokens = match tokenize(&source, &source_name) {
        Ok(tokens) => tokens,
        Err(e) => {
            log.error(e.render());
            return Ok(1);
        }
    };
    log.debug(format!("{} tokens", tokens.len()));

    log.info("Generating AST..");
    let exprs = match Parser::new(tokens).parse_program() {
        Ok(exprs) => exprs,
        Err(e) => {
            for err in e.errors() {
                log.error(err);
            }
            log.error("Failed to generate AST, aborting.");
            return Ok(1);
        }
    };

    log.info("Selecting backend..");
    let backend = match backend::select(&settings.backend) {
        Ok(backend) => backend,
        Err(e) => {
            log.error(e);
            return Ok(1);
        }
    };

    log.info(format!("Executing backend \"{}\"..", backend.name));
    for expr in &exprs {
        if settings.print_ast {
            println!("{}", AstPrinter::print(expr));
            continue;
        }
        match evaluate(expr) {
            Ok(value) => println!("{value}"),
            Err(e) => {
                log.error(StageError::from(e));
                return Ok(1);
            }
        }
    }

    Ok(0)
}
