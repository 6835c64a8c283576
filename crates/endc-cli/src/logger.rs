use std::fmt::Display;

/// Severity of a log line. The discriminant doubles as the verbosity at
/// which the line stops being printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Debug => "[DEBUG]",
            Level::Info => "[INFO]",
            Level::Warn => "[WARN]",
            Level::Error => "[ERROR]",
        }
    }
}

/// Verbosity-filtered console logger.
///
/// Verbosity 0 prints everything, 1 info and up, 2 warnings and up and
/// 3 errors only. Debug and info go to stdout, the rest to stderr.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    threshold: u8,
}

impl Logger {
    pub fn new(verbosity: u8) -> Self {
        Self { threshold: verbosity.min(Level::Error as u8) }
    }

    pub fn enabled(&self, level: Level) -> bool {
        level as u8 >= self.threshold
    }

    pub fn log(&self, level: Level, msg: impl Display) {
        if !self.enabled(level) {
            return;
        }
        match level {
            Level::Debug | Level::Info => println!("{} {msg}", level.tag()),
            Level::Warn | Level::Error => eprintln!("{} {msg}", level.tag()),
        }
    }

    pub fn debug(&self, msg: impl Display) {
        self.log(Level::Debug, msg);
    }

    pub fn info(&self, msg: impl Display) {
        self.log(Level::Info, msg);
    }

    pub fn warn(&self, msg: impl Display) {
        self.log(Level::Warn, msg);
    }

    pub fn error(&self, msg: impl Display) {
        self.log(Level::Error, msg);
    }
}
