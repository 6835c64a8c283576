use anyhow::{bail, Result};

/// A compiler backend known to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backend {
    pub key: &'static str,
    pub name: &'static str,
    pub help: &'static str,
    pub available: bool,
}

pub const INTERPRETER: &str = "inter";

pub static BACKENDS: [Backend; 7] = [
    Backend {
        key: INTERPRETER,
        name: "Interpreter",
        help: "Directly interpret the source code",
        available: true,
    },
    Backend {
        key: "llvm",
        name: "LLVM",
        help: "Compiles to LLVM IR and then to machine code",
        available: false,
    },
    Backend {
        key: "wasm",
        name: "WASM",
        help: "Compiles to WASM text format and then to binary",
        available: false,
    },
    Backend {
        key: "py",
        name: "Python 3.9 VM",
        help: "Compiles to python bytecode (.pyc files)",
        available: false,
    },
    Backend {
        key: "jvm",
        name: "Java Virtual Machine",
        help: "Compiles to JVM bytecode (.class files)",
        available: false,
    },
    Backend {
        key: "neko",
        name: "Neko VM",
        help: "Compiles to the Neko VM bytecode",
        available: false,
    },
    Backend {
        key: "js",
        name: "JavaScript",
        help: "Transpiles to js code",
        available: false,
    },
];

pub fn find(key: &str) -> Option<&'static Backend> {
    BACKENDS.iter().find(|b| b.key == key)
}

/// Look up `key`, rejecting unknown and unavailable backends
pub fn select(key: &str) -> Result<&'static Backend> {
    let Some(backend) = find(key) else {
        bail!("Trying to use invalid backend ({key}), aborting.");
    };
    if !backend.available {
        bail!("Selected backend ({}) is not available, aborting.", backend.name);
    }
    Ok(backend)
}

/// Listing printed by `--backend-info`
pub fn info_text() -> String {
    let mut txt = String::from("note: backends with * are not yet available\nSupported backends:\n");
    for backend in &BACKENDS {
        let marker = if backend.available { "" } else { "*" };
        txt.push_str(&format!(" - {} ({}){marker}\n\t{}\n", backend.name, backend.key, backend.help));
    }
    txt
}
