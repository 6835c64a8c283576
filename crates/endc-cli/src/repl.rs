use std::any::Any;
use std::io::{BufRead, Write};
use std::panic::{self, AssertUnwindSafe};

use anyhow::Result;

use crate::config::Settings;
use crate::logger::Logger;
use crate::pipeline;

const PROMPT: &str = ">>> ";
const EXIT_CALL: &str = "CALL xit{";

/// What a line typed at the prompt asks for
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Blank line
    Empty,
    /// `CALL xit{N}/`
    Exit(i32),
    /// `CALL xit{...}/` with an argument that is not a non-negative integer
    BadExitCode,
    /// `CALL xit{` without the closing `}`
    UnclosedExit,
    /// An expression, normalized to end with `/`
    Evaluate(String),
}

impl Command {
    pub fn classify(line: &str) -> Self {
        let line = line.trim_end();
        if line.trim().is_empty() {
            return Command::Empty;
        }

        let mut input = line.to_string();
        if !input.ends_with('/') {
            input.push('/');
        }

        let Some(rest) = input.strip_prefix(EXIT_CALL) else {
            return Command::Evaluate(input);
        };
        let Some(code) = rest.strip_suffix("}/") else {
            return Command::UnclosedExit;
        };
        if code.is_empty() {
            return Command::Exit(0);
        }
        if !code.bytes().all(|b| b.is_ascii_digit()) {
            return Command::BadExitCode;
        }
        code.parse().map_or(Command::BadExitCode, Command::Exit)
    }
}

/// Read-eval-print loop. Returns the exit status requested by the session.
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W, settings: &Settings, log: &Logger) -> Result<i32> {
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(0);
        }

        let source = match Command::classify(&line) {
            Command::Empty => continue,
            Command::Exit(code) => return Ok(code),
            Command::BadExitCode => {
                log.error("function xit takes an InTgR or VoId");
                continue;
            }
            Command::UnclosedExit => {
                log.error("missing \"}\" at end of input");
                continue;
            }
            Command::Evaluate(source) => source,
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pipeline::run_line(&source, "<stdin>", settings.print_ast)
        }));
        match outcome {
            Ok(Ok(text)) => writeln!(output, "{text}")?,
            Ok(Err(e)) => log.error(e),
            Err(payload) => {
                log.error(format!("Implementation error:\n\t{}", panic_message(payload.as_ref())));
                if settings.exit_on_error {
                    return Ok(-1);
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}
