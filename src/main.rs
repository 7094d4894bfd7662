//! Evaluate Lisp from a file or from stdin, printing each result.
//!
//! ```ignore
//! lis program.lisp
//! <program.lisp lis
//! RUST_LOG=lis=trace lis
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use lis::{evaluate, parse_body, print, standard_environment, Environment};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|x| x == "--help" || x == "-h") {
        println!("{HELP_MSG}");
        return Ok(());
    }

    let env = standard_environment();
    match args.first() {
        Some(filename) => {
            let file = File::open(filename)?;
            run_lines(&env, BufReader::new(file).lines())
        }
        None => run_lines(&env, io::stdin().lock().lines()),
    }
}

/// Evaluate input as it arrives, a line at a time.
///
/// Lines are buffered until the buffer reads as complete expressions,
/// so an expression may span several lines.
fn run_lines(
    env: &Environment,
    lines: impl Iterator<Item = io::Result<String>>,
) -> io::Result<()> {
    let mut buf = String::new();
    for line in lines {
        if !buf.is_empty() {
            buf.push('\n');
        }
        buf.push_str(&line?);

        match parse_body(&buf) {
            Ok(body) => {
                for expression in body {
                    match evaluate(&expression, env) {
                        Ok(value) if value.is_void() => (),
                        Ok(value) => println!("{}", print(&value)),
                        Err(e) => eprintln!("error: {e}"),
                    }
                }
            }
            // Wait until all open brackets are closed.
            Err(e) if e.is_incomplete() => continue,
            Err(e) => eprintln!("error: {e}"),
        }
        buf.clear();
    }

    if !buf.trim().is_empty() {
        if let Err(e) = parse_body(&buf) {
            eprintln!("error: {e}");
        }
    }
    Ok(())
}

const HELP_MSG: &str = r#"Usage: lis [FILE] [--help|-h]

  FILE  Lisp source file to evaluate; reads stdin if absent

Options:
  -h, --help  Print this message

Set RUST_LOG (e.g. RUST_LOG=lis=trace) to see evaluation traces on stderr."#;
