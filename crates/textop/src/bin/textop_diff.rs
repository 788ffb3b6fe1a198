//! `textop-diff` - print the operations that turn stdin into a target file.
//!
//! Usage:
//!   textop-diff <target-file> [version] < source
//!
//! One JSON operation per line. Set `RUST_LOG=debug` for diagnostics on stderr.

use std::io::{self, Read, Write};

use textop::cli::{diff_command, read_target, DiffArgs};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = match DiffArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let mut source = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut source) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let result = read_target(&args.target).and_then(|target| diff_command(&source, &target, args.version));
    match result {
        Ok(lines) => {
            if let Err(e) = io::stdout().write_all(lines.as_bytes()) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
