//! End-to-end executions against real `bash`. Unix only.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;

use scriptpack_runner::{DirSource, ErrorKind, ScriptRunner, StagingArea};

fn project_with(scripts: &[(&str, &str)]) -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("bash_scripts");
    fs::create_dir_all(&dir).unwrap();
    for (name, body) in scripts {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, body).unwrap();
    }
    root
}

fn entries(dir: &Path) -> usize {
    fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[test]
fn test_bundled_script_forwards_arguments() {
    let outcome = ScriptRunner::bash().execute("test-script.sh", &["arg1", "arg2"]);

    assert_eq!(outcome.exit_code, 0, "output: {}", outcome.output);
    assert!(outcome.error.is_none());
    assert!(outcome.output.contains("argument count: 2"));
    assert!(outcome.output.contains("arguments: arg1 arg2"));
    assert!(outcome.output.contains("=>OK Script completed"));
}

#[test]
fn test_bundled_error_mode_captures_stderr() {
    let outcome = ScriptRunner::bash().execute("test-script", &["error"]);

    assert_eq!(outcome.exit_code, 1);
    assert!(outcome.output.contains("!ERROR! Error requested"));
    let err = outcome.error.expect("non-zero exit carries an error");
    assert_eq!(err.kind(), ErrorKind::Script);
}

#[test]
fn test_bundled_custom_mode_uses_helpers() {
    let outcome = ScriptRunner::bash().execute("test-script", &["custom"]);
    assert_eq!(outcome.exit_code, 0);
    assert!(outcome
        .output
        .contains("=>OK Command executed successfully: echo custom mode"));
}

#[test]
fn test_env_and_cwd_of_child() {
    let outcome = ScriptRunner::bash().execute("env-info", &["with space", "'quoted'"]);

    assert_eq!(outcome.exit_code, 0, "output: {}", outcome.output);
    assert!(outcome.output.contains("lang: C"));
    assert!(outcome.output.contains("argument count: 2"));
    assert!(outcome.output.contains("arg: with space\n"));
    assert!(outcome.output.contains("arg: 'quoted'\n"));
    let staged = outcome.staging_dir.unwrap().canonicalize();
    // unique staging is removed after the run
    assert!(staged.is_err());
}

#[test]
fn test_nested_helper_is_never_staged() {
    let outcome = ScriptRunner::bash().execute("helper", &[] as &[&str]);
    assert_eq!(outcome.exit_code, 1);
    assert!(outcome.output.is_empty());
    let err = outcome.error.unwrap();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("test-script.sh"));
}

#[test]
fn test_combined_output_is_interleaved_in_write_order() {
    let root = project_with(&[(
        "mixed.sh",
        "for i in $(seq 1 500); do echo out$i; echo err$i >&2; done\nexit 3\n",
    )]);
    let outcome = ScriptRunner::bash()
        .with_project_root(root.path())
        .execute("mixed", &[] as &[&str]);

    let expected: String = (1..=500).map(|i| format!("out{}\nerr{}\n", i, i)).collect();
    assert_eq!(outcome.exit_code, 3);
    assert_eq!(outcome.output, expected);
}

#[test]
fn test_exit_code_is_passed_through() {
    let root = project_with(&[("fail.sh", "echo before\nexit 42\n")]);
    let outcome = ScriptRunner::bash()
        .with_project_root(root.path())
        .execute("fail", &[] as &[&str]);

    assert_eq!(outcome.exit_code, 42);
    assert!(outcome.output.contains("before"));
    assert_eq!(outcome.error.unwrap().kind(), ErrorKind::Script);
}

#[test]
fn test_missing_script_lists_available() {
    let root = project_with(&[("a.sh", "exit 0"), ("b.sh", "exit 0")]);
    let outcome = ScriptRunner::bash()
        .with_project_root(root.path())
        .execute("missing", &[] as &[&str]);

    assert_eq!(outcome.exit_code, 1);
    assert!(outcome.output.is_empty());
    assert_eq!(
        outcome.error.unwrap().to_string(),
        "Script 'missing.sh' not found. Available scripts: [a.sh, b.sh]"
    );
}

#[test]
fn test_missing_override_root_is_setup_error() {
    let root = tempfile::tempdir().unwrap();
    let outcome = ScriptRunner::bash()
        .with_project_root(root.path())
        .execute("anything", &[] as &[&str]);

    assert_eq!(outcome.exit_code, 1);
    assert_eq!(outcome.error.unwrap().kind(), ErrorKind::Setup);
}

#[test]
fn test_shared_staging_is_idempotent_and_empty_between_runs() {
    let root = project_with(&[("hello.sh", "echo hello \"$@\"\n")]);
    let stage = tempfile::tempdir().unwrap();
    let shared = stage.path().join("stage");
    let runner = ScriptRunner::bash()
        .with_project_root(root.path())
        .with_staging(StagingArea::shared(&shared));

    let first = runner.execute("hello", &["x"]);
    assert_eq!(entries(&shared), 0);
    assert!(shared.is_dir());
    let second = runner.execute("hello", &["x"]);
    assert_eq!(entries(&shared), 0);

    assert_eq!(first.exit_code, 0);
    assert_eq!(first.exit_code, second.exit_code);
    assert_eq!(first.output, second.output);
    assert_eq!(first.output, "hello x\n");
}

#[test]
fn test_keep_scripts_leaves_executables() {
    let root = project_with(&[("keep.sh", "exit 0"), ("notes.txt", "plain")]);
    let stage = tempfile::tempdir().unwrap();
    let shared = stage.path().join("stage");
    let outcome = ScriptRunner::bash()
        .with_project_root(root.path())
        .with_staging(StagingArea::shared(&shared))
        .keep_scripts(true)
        .execute("keep", &[] as &[&str]);

    assert_eq!(outcome.exit_code, 0);
    let mode = fs::metadata(shared.join("keep.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
    // direct copy takes every top-level file, only scripts get the exec bit
    let notes = fs::metadata(shared.join("notes.txt")).unwrap().permissions().mode();
    assert_eq!(notes & 0o111, 0);
}

#[test]
fn test_stale_files_are_cleared_before_run() {
    let root = project_with(&[("ls.sh", "ls\n")]);
    let stage = tempfile::tempdir().unwrap();
    let shared = stage.path().join("stage");
    fs::create_dir_all(&shared).unwrap();
    fs::write(shared.join("stale.sh"), "exit 9").unwrap();

    let outcome = ScriptRunner::bash()
        .with_project_root(root.path())
        .with_staging(StagingArea::shared(&shared))
        .execute("ls", &[] as &[&str]);

    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.output, "ls.sh\n");
}

#[test]
fn test_nested_override_dirs_are_skipped() {
    let root = project_with(&[("top.sh", "exit 0"), ("nested/deep.sh", "exit 0")]);
    let outcome = ScriptRunner::bash()
        .with_project_root(root.path())
        .execute("deep", &[] as &[&str]);
    assert_eq!(outcome.error.unwrap().kind(), ErrorKind::Validation);
}

#[test]
fn test_missing_interpreter_is_invocation_error() {
    let root = project_with(&[("hello.sh", "echo hi")]);
    let runner = ScriptRunner::custom(
        Arc::new(DirSource::new(root.path())),
        "bash_scripts",
        "/nonexistent/scriptpack-bash",
    );
    let outcome = runner.execute("hello", &[] as &[&str]);

    assert_eq!(outcome.exit_code, 1);
    assert!(outcome.output.is_empty());
    assert_eq!(outcome.error.unwrap().kind(), ErrorKind::Invocation);
}

#[test]
fn test_custom_source_and_interpreter() {
    let root = project_with(&[("posix.sh", "echo \"sh says $1\"")]);
    let runner = ScriptRunner::custom(Arc::new(DirSource::new(root.path())), "bash_scripts", "sh");
    let outcome = runner.execute("posix.sh", &["hi"]);
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.output, "sh says hi\n");
}

#[test]
fn test_unique_staging_runs_concurrently() {
    let root = project_with(&[("id.sh", "echo \"$1\"")]);
    let runner = Arc::new(ScriptRunner::bash().with_project_root(root.path()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let runner = Arc::clone(&runner);
            std::thread::spawn(move || runner.execute("id", &[i.to_string()]))
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let outcome = handle.join().unwrap();
        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.output, format!("{}\n", i));
    }
}
