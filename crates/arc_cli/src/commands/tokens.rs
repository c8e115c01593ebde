use std::io::Write;

use arc_driver::Driver;
use arc_syntax::TokenKind;

use crate::args::CliArgs;
use crate::commands::{exit_on_stdout_error, single_path};

pub(crate) fn run(args: &CliArgs, driver: &Driver) {
    let path = single_path(&args.positional);
    let lexed = match driver.lex_file(path) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    let mut out = std::io::stdout().lock();
    for t in &lexed.tokens {
        if matches!(t.kind, TokenKind::Newline) {
            continue;
        }
        let text = lexed.source.text.slice(t.span);
        if let Err(e) = writeln!(out, "{:?}\t{:?}\t{}", t.kind, t.span, text) {
            exit_on_stdout_error(e);
        }
    }
}
