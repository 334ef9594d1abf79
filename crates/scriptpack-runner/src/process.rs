//! Process runner: spawn an [`Invocation`] and collect its combined output.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::ScriptError;
use crate::invocation::Invocation;

/// Locale forced on every child so script output is stable.
pub const LOCALE_OVERRIDE: (&str, &str) = ("LANG", "C");

/// Exit code reported when a script cannot be started or its status is unknown.
pub const FAILURE_EXIT_CODE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: i32,
    /// stdout and stderr interleaved in arrival order.
    pub output: String,
}

/// Run `invocation` to completion in `cwd`.
///
/// The child inherits the environment plus [`LOCALE_OVERRIDE`]; stdin is closed.
/// stdout and stderr share one pipe, so the output keeps the order the child
/// wrote it in. The pipe is drained while the child runs.
pub fn run_invocation(
    invocation: &Invocation,
    cwd: &Path,
    script: &str,
) -> Result<ProcessOutput, ScriptError> {
    let spawn_err = |e: io::Error| ScriptError::Spawn {
        program: invocation.program.clone(),
        source: e,
    };

    let (mut reader, writer) = io::pipe().map_err(spawn_err)?;
    let stderr_writer = writer.try_clone().map_err(spawn_err)?;

    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .current_dir(cwd)
        .env(LOCALE_OVERRIDE.0, LOCALE_OVERRIDE.1)
        .stdin(Stdio::null())
        .stdout(writer)
        .stderr(stderr_writer);
    let spawned = command.spawn();
    // The command holds the parent's write ends; EOF needs them closed.
    drop(command);
    let mut child = spawned.map_err(spawn_err)?;

    let mut combined = Vec::new();
    let read_result = reader.read_to_end(&mut combined);

    let status = child.wait().map_err(|e| ScriptError::Wait {
        script: script.to_string(),
        source: e,
    })?;
    read_result.map_err(|e| ScriptError::Wait {
        script: script.to_string(),
        source: e,
    })?;

    Ok(ProcessOutput {
        exit_code: exit_code_of(status),
        output: String::from_utf8_lossy(&combined).into_owned(),
    })
}

/// Exit code of a finished child. Signal deaths map to `128 + signal` on unix.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return non_negative_code(code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    FAILURE_EXIT_CODE
}

/// Windows reports NTSTATUS values such as `0xC000013A`, which are negative as `i32`.
fn non_negative_code(code: i32) -> i32 {
    if code < 0 {
        FAILURE_EXIT_CODE
    } else {
        code
    }
}
