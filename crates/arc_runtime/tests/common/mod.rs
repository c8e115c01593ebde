#![allow(dead_code)]

use std::time::Duration;

use arc_driver::Driver;
use arc_runtime::{ExecResult, Runtime, RuntimeConfig, RuntimeError};
use regex::Regex;

/// Source lines joined with newlines.
pub fn prog(chunks: &[&str]) -> String {
    let mut out = String::new();
    for chunk in chunks {
        out.push_str(chunk);
        out.push('\n');
    }
    out
}

/// `chunk` repeated `times` times with `$<counter>` replaced by the index.
pub fn repeat(times: usize, counter: &str, chunks: &[&str]) -> String {
    let marker = format!("${counter}");
    let mut out = String::new();
    for i in 0..times {
        let index = i.to_string();
        for chunk in chunks {
            out.push_str(&chunk.replace(&marker, &index));
            out.push('\n');
        }
    }
    out
}

pub fn config() -> RuntimeConfig {
    RuntimeConfig {
        sleep: Duration::from_millis(250),
        sleepr_max: Duration::from_millis(5),
    }
}

pub fn try_run(src: &str) -> Result<ExecResult, RuntimeError> {
    let program = Driver::new()
        .build("test.arc", src)
        .unwrap_or_else(|e| panic!("{e}\n{src}"));
    Runtime::with_config(config()).run(&program)
}

pub fn run(src: &str) -> ExecResult {
    try_run(src).unwrap_or_else(|e| panic!("RuntimeError: {e}"))
}

/// Full-output match. Each pattern is one dump line.
pub fn assert_dumps(output: &str, lines: &[&str]) {
    let pattern = format!("^{}$", lines.join(r"\n") + r"\n");
    let re = Regex::new(&pattern).unwrap();
    assert!(re.is_match(output), "output:\n{output}\ndoes not match:\n{pattern}");
}
