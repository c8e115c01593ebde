use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn write_program(dir: &TempDir, name: &str, src: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, src).expect("write program");
    path.to_string_lossy().to_string()
}

fn arc() -> Command {
    Command::cargo_bin("arc").expect("binary")
}

#[test]
fn run_prints_dump_lines() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_program(
        &dir,
        "counts.arc",
        "x = object\ndump x\ny = x\ndump x\ndump y\nanchor ~= x\n",
    );
    let out = arc().arg("run").arg(&path).output().expect("run arc");
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let counts: Vec<&str> = stdout
        .lines()
        .map(|l| {
            let rest = l.split("obj refCounter = ").nth(1).expect("counter");
            rest.split(',').next().unwrap_or(rest)
        })
        .collect();
    assert_eq!(counts, vec!["1", "2", "2"], "{stdout}");
}

#[test]
fn run_reports_top_level_failure() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_program(&dir, "bad.arc", "x = object\ndump x\ny = missing\n");
    let out = arc().arg("run").arg(&path).output().expect("run arc");
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stdout.starts_with("dump x: "), "{stdout}");
    assert!(stderr.contains("RuntimeError:"), "{stderr}");
    assert!(stderr.contains("missing"), "{stderr}");
}

#[test]
fn thread_failure_keeps_exit_status() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_program(&dir, "thread.arc", "thread {\ny = nowhere\n}\n");
    let out = arc().arg("run").arg(&path).output().expect("run arc");
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("arc-thread-1"), "{stderr}");
    assert!(stderr.contains("nowhere"), "{stderr}");
}

#[test]
fn check_renders_syntax_errors() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_program(&dir, "broken.arc", "x = object\ny = = x\n");
    let out = arc().arg("check").arg(&path).output().expect("run arc");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error"), "{stderr}");
    assert!(stderr.contains("  | "), "{stderr}");
    assert!(stderr.contains('^'), "{stderr}");
}

#[test]
fn check_json_emits_one_object_per_diagnostic() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_program(&dir, "broken.arc", "x = object\ny = = x\n");
    let out = arc()
        .arg("check")
        .arg("json")
        .arg(&path)
        .output()
        .expect("run arc");
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let first = stdout.lines().next().expect("a diagnostic line");
    let v: serde_json::Value = serde_json::from_str(first).expect("json");
    assert_eq!(v["severity"], "error");
    assert!(v["span"]["start"].is_u64());
}

#[test]
fn check_accepts_clean_program() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_program(&dir, "ok.arc", "x = object\nx.f = object\ndump x.f\n");
    arc().arg("check").arg(&path).assert().success();
}

#[test]
fn ast_shows_end_of_life_and_captures() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_program(&dir, "threads.arc", "a = object\nthread {\nb = a\n}\n");
    let out = arc().arg("ast").arg(&path).output().expect("run arc");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("thread [a, b] {"), "{stdout}");
    assert!(stdout.contains("EndOfLife(a)"), "{stdout}");
}

#[test]
fn tokens_lists_kinds_and_text() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_program(&dir, "tok.arc", "w ~= x\n");
    let out = arc().arg("tokens").arg(&path).output().expect("run arc");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let kinds: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.split('\t').next())
        .collect();
    assert_eq!(kinds, vec!["Ident", "TildeEq", "Ident", "Eof"]);
}

#[test]
fn missing_file_argument_is_usage_error() {
    let out = arc().arg("run").output().expect("run arc");
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Missing <file>"));
}

#[test]
fn unreadable_file_is_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("absent.arc");
    let out = arc()
        .arg("run")
        .arg(path.to_string_lossy().to_string())
        .output()
        .expect("run arc");
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to read file"));
}

#[test]
fn unknown_command_prints_usage() {
    let out = arc().arg("frobnicate").arg("x.arc").output().expect("run arc");
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("Usage: arc"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_program(&dir, "v.arc", "x = object\ndump x\n");
    let out = arc()
        .arg("run")
        .arg("verbose")
        .arg(&path)
        .output()
        .expect("run arc");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 1, "{stdout}");
    assert!(!out.stderr.is_empty());
}

#[cfg(target_os = "linux")]
#[test]
fn run_reports_failed_stdout_writes() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_program(&dir, "full.arc", "x = object\ndump x\n");
    let full = fs::OpenOptions::new()
        .write(true)
        .open("/dev/full")
        .expect("open /dev/full");
    let out = std::process::Command::new(env!("CARGO_BIN_EXE_arc"))
        .arg("run")
        .arg(&path)
        .stdout(full)
        .output()
        .expect("run arc");
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("stdout error"));
}
