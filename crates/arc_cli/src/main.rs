mod args;
mod commands;

use arc_driver::Driver;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() {
    let args = match args::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    if args.verbose {
        install_logging();
    }

    let driver = Driver::new();
    match args.cmd.as_str() {
        "tokens" => commands::tokens::run(&args, &driver),
        "check" => commands::check::run(&args, &driver),
        "ast" => commands::ast::run(&args, &driver),
        "run" => commands::run::run(&args, &driver),
        _ => {
            eprintln!("{}", args::usage());
            std::process::exit(2);
        }
    }
}

/// Trace everything to stderr. Thread names matter more than timestamps when
/// reading interleaved refcount traffic.
fn install_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::TRACE)
        .with_thread_names(true)
        .without_time()
        .try_init();
}
