use std::io::Write;

use arc_driver::Driver;

use crate::args::CliArgs;
use crate::commands::{emit_diagnostics, exit_on_stdout_error, single_path};

pub(crate) fn run(args: &CliArgs, driver: &Driver) {
    let path = single_path(&args.positional);
    let compiled = match driver.compile_file(path) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    emit_diagnostics(&compiled.source, &compiled.diagnostics, args.json_out);
    if compiled.has_errors() {
        std::process::exit(1);
    }

    let mut out = std::io::stdout().lock();
    if let Err(e) = write!(out, "{}", compiled.program) {
        exit_on_stdout_error(e);
    }
}
