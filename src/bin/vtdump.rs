//! Headless terminal replay
//!
//! Reads a byte capture from a file or stdin, feeds it through the
//! terminal and prints the final screen as plain text or a JSON
//! snapshot. Useful for inspecting what a capture renders to and for
//! generating golden states.
//!
//! ```bash
//! printf 'plain \x1b[31mred\x1b[0m\n' | vtdump
//! vtdump --rows 24 --cols 80 --json capture.bin
//! ```

use std::io::{self, Read};
use std::process::ExitCode;

use vtgrid::{Snapshot, Terminal};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

fn print_help() {
    println!("vtdump - replay a terminal byte capture and dump the screen");
    println!();
    println!("Usage: vtdump [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  -r, --rows N    grid rows (default 24)");
    println!("  -c, --cols N    grid columns (default 80)");
    println!("  -j, --json      output a JSON snapshot");
    println!("  -t, --text      output plain text (default)");
    println!("  -h, --help      show this help");
    println!();
    println!("Reads from stdin when no file is given.");
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut rows = 24usize;
    let mut cols = 80usize;
    let mut input_file: Option<String> = None;
    let mut format = OutputFormat::Text;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-r" | "--rows" => {
                i += 1;
                if i < args.len() {
                    rows = args[i].parse().unwrap_or(24);
                }
            }
            "-c" | "--cols" => {
                i += 1;
                if i < args.len() {
                    cols = args[i].parse().unwrap_or(80);
                }
            }
            "-j" | "--json" => format = OutputFormat::Json,
            "-t" | "--text" => format = OutputFormat::Text,
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            other => {
                if input_file.is_none() && !other.starts_with('-') {
                    input_file = Some(other.to_string());
                } else {
                    eprintln!("unknown option: {other}");
                    return ExitCode::FAILURE;
                }
            }
        }
        i += 1;
    }

    let data = match &input_file {
        Some(path) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("error reading '{path}': {e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("error reading stdin: {e}");
                return ExitCode::FAILURE;
            }
            data
        }
    };

    let mut term = Terminal::with_dimensions(rows, cols);
    term.feed(&data);

    let snapshot = Snapshot::from_screen(term.screen());
    match format {
        OutputFormat::Text => print!("{}", snapshot.to_text()),
        OutputFormat::Json => match snapshot.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error serializing snapshot: {e}");
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}
