//! `xorfiles`: XOR two files byte by byte onto stdout.

#![allow(clippy::print_stderr)]

use bitkit::cli::{XorfilesCli, format_error, init_logging, parse_args, run_xorfiles};
use bitkit::io::Sink;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli: XorfilesCli = match parse_args() {
        Ok(cli) => cli,
        Err(code) => return code,
    };
    init_logging(cli.verbose);

    let mut sink = Sink::stdout();
    match run_xorfiles(&cli, &mut sink) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", format_error(&e));
            ExitCode::FAILURE
        }
    }
}
