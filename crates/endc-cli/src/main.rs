use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;

mod backend;
mod config;
mod logger;
mod pipeline;
mod repl;

use config::Settings;
use logger::Logger;

/// End C Compiler
#[derive(Parser, Debug)]
#[command(name = "endcc", version, about, long_about = None)]
struct Args {
    /// Input file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Input file, as an alternative to the positional argument
    #[arg(short, long, value_name = "FILE", conflicts_with = "input")]
    file: Option<PathBuf>,

    /// Backend to run; see --backend-info
    #[arg(short, long, value_name = "KEY")]
    backend: Option<String>,

    /// Config file supplying defaults
    #[arg(short, long, value_name = "PATH", default_value = ".endcc.json")]
    config: PathBuf,

    /// Log verbosity (0: everything, 1: info and up, 2: warnings and up, 3: errors only)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=3))]
    verbosity: Option<u8>,

    /// Print the available backends and exit
    #[arg(long)]
    backend_info: bool,

    /// Start the interactive interpreter
    #[arg(long)]
    interactive: bool,

    /// Exit the interactive interpreter when an implementation error occurs
    #[arg(long)]
    exit_on_error: bool,

    /// Print the parsed tree of each expression instead of evaluating it
    #[arg(long)]
    print_ast: bool,
}

fn execute(settings: &Settings, log: &Logger) -> Result<i32> {
    if settings.interactive {
        if let Some(path) = &settings.file {
            log.warn(format!("Ignoring input file {} in interactive mode", path.display()));
        }
        return repl::run(io::stdin().lock(), io::stdout(), settings, log);
    }

    let Some(path) = &settings.file else {
        bail!("No input file given; pass FILE, set defaultFile in the config or use --interactive");
    };
    pipeline::run_file(path, settings, log)
}

fn main() {
    let args = Args::parse();

    if args.backend_info {
        print!("{}", backend::info_text());
        return;
    }

    let settings = match Settings::load(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("[ERROR] {e:#}");
            std::process::exit(1);
        }
    };
    let log = Logger::new(settings.verbosity);
    if let Some(path) = &settings.config_path {
        log.info(format!("Using config at {}", path.display()));
    }
    log.debug(format!("{settings:?}"));

    let start = Instant::now();
    let code = execute(&settings, &log).unwrap_or_else(|e| {
        log.error(format!("{e:#}"));
        1
    });
    log.info(format!("Done in {:.3?}", start.elapsed()));

    std::process::exit(code);
}
