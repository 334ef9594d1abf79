//! InvocationBuilder trait: turns a staged script path plus arguments into the
//! concrete program and argument vector for the host platform.
//!
//! Selected once per runner by [`platform_invocation`]. Custom builders can be
//! plugged in through `ScriptRunner::with_invocation`.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Interpreter used on the direct path when none is configured.
pub const DEFAULT_INTERPRETER: &str = "bash";

/// Git-for-Windows bash, the compatibility shell on Windows hosts.
pub const GIT_BASH_PATH: &str = r"C:\Program Files\Git\bin\bash.exe";

/// Program and arguments ready for `std::process::Command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Arguments rendered lossily, for logs and audit records.
    pub fn display_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

pub trait InvocationBuilder: Send + Sync + fmt::Debug {
    /// Builder label, e.g. "direct" or "compat-shell".
    fn name(&self) -> &'static str;

    /// Interpreter this builder launches.
    fn interpreter(&self) -> &Path;

    /// Build the command for `script` (absolute, inside staging) with `args`.
    fn build(&self, script: &Path, args: &[String]) -> Invocation;
}

/// `<interpreter> <script> <args...>`, arguments untouched.
#[derive(Debug, Clone)]
pub struct DirectInvocation {
    interpreter: PathBuf,
}

impl DirectInvocation {
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }
}

impl Default for DirectInvocation {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER)
    }
}

impl InvocationBuilder for DirectInvocation {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    fn build(&self, script: &Path, args: &[String]) -> Invocation {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(script.as_os_str().to_os_string());
        argv.extend(args.iter().map(OsString::from));
        Invocation {
            program: self.interpreter.clone(),
            args: argv,
        }
    }
}

/// `<bash> -c '<script>' "$@" -- <args...>`.
///
/// The payload only carries the quoted script path; arguments reach the script
/// as positional parameters after `--` and are never spliced into shell text.
#[derive(Debug, Clone)]
pub struct CompatShellInvocation {
    shell: PathBuf,
}

impl CompatShellInvocation {
    pub fn new(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    fn payload(script: &Path) -> String {
        let unix_path = script.to_string_lossy().replace('\\', "/");
        format!("{} \"$@\"", quote_posix(&unix_path))
    }
}

impl Default for CompatShellInvocation {
    fn default() -> Self {
        Self::new(GIT_BASH_PATH)
    }
}

impl InvocationBuilder for CompatShellInvocation {
    fn name(&self) -> &'static str {
        "compat-shell"
    }

    fn interpreter(&self) -> &Path {
        &self.shell
    }

    fn build(&self, script: &Path, args: &[String]) -> Invocation {
        let mut argv = Vec::with_capacity(args.len() + 3);
        argv.push(OsString::from("-c"));
        argv.push(OsString::from(Self::payload(script)));
        // bash binds the word after the payload to $0
        argv.push(OsString::from("--"));
        argv.extend(args.iter().map(OsString::from));
        Invocation {
            program: self.shell.clone(),
            args: argv,
        }
    }
}

/// Single-quote `s` for a POSIX shell.
pub fn quote_posix(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    quoted
}

/// Builder for the host platform. `interpreter` overrides the default program.
pub fn platform_invocation(interpreter: Option<&str>) -> Box<dyn InvocationBuilder> {
    #[cfg(windows)]
    {
        Box::new(CompatShellInvocation::new(
            interpreter.unwrap_or(GIT_BASH_PATH),
        ))
    }
    #[cfg(not(windows))]
    {
        Box::new(DirectInvocation::new(
            interpreter.unwrap_or(DEFAULT_INTERPRETER),
        ))
    }
}
