use arc_driver::Driver;
use arc_runtime::Runtime;

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

    // Dump lines go straight to stdout while threads are still running.
    let mut rt = Runtime::new().with_sink(std::io::stdout());
    let result = rt.run(&compiled.program);

    match result {
        Ok(res) => {
            for f in &res.thread_failures {
                eprintln!("ThreadError [{}]: {}", f.thread, f.error);
            }
        }
        Err(e) => {
            eprintln!("RuntimeError: {e}");
            std::process::exit(1);
        }
    }
    if let Some(e) = rt.take_sink_error() {
        exit_on_stdout_error(e);
    }
}
