//! Observability: tracing init and the JSONL audit log.
//!
//! Uses config::ObservabilityConfig for SCRIPTPACK_QUIET, LOG_LEVEL, LOG_JSON, AUDIT_LOG.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing. Call at process startup.
///
/// Logs go to stderr so script output on stdout stays untouched.
/// When SCRIPTPACK_QUIET=1 only WARN and above are logged.
pub fn init_tracing() {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level = if cfg.quiet {
        "scriptpack=warn".to_string()
    } else {
        cfg.log_level.clone()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

fn audit_path() -> Option<&'static str> {
    let path = crate::config::ObservabilityConfig::from_env()
        .audit_log
        .as_deref()?;
    if let Some(parent) = Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    Some(path)
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn append_jsonl(path: &Path, record: &Value) {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(mut f) => {
            if let Ok(line) = serde_json::to_string(record) {
                let _ = writeln!(f, "{}", line);
            }
        }
        Err(e) => tracing::warn!(path = %path.display(), "Audit log unavailable: {}", e),
    }
}

fn execution_started_record(script: &str, program: &str, args: &[String], cwd: &str) -> Value {
    json!({
        "ts": timestamp(),
        "event": "execution_started",
        "script": script,
        "program": program,
        "args": args,
        "cwd": cwd,
    })
}

fn execution_completed_record(
    script: &str,
    exit_code: i32,
    duration_ms: u64,
    output_len: usize,
) -> Value {
    json!({
        "ts": timestamp(),
        "event": "execution_completed",
        "script": script,
        "exit_code": exit_code,
        "duration_ms": duration_ms,
        "output_len": output_len,
        "success": exit_code == 0,
    })
}

/// Audit: execution_started (right before spawn)
pub fn audit_execution_started(script: &str, program: &str, args: &[String], cwd: &str) {
    if let Some(path) = audit_path() {
        append_jsonl(
            Path::new(path),
            &execution_started_record(script, program, args, cwd),
        );
    }
}

/// Audit: execution_completed
pub fn audit_execution_completed(script: &str, exit_code: i32, duration_ms: u64, output_len: usize) {
    if let Some(path) = audit_path() {
        append_jsonl(
            Path::new(path),
            &execution_completed_record(script, exit_code, duration_ms, output_len),
        );
    }
}
