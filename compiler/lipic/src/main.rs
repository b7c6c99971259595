//! Lipi Compiler CLI
//!
//! Compiles transliteration scheme sources into symbol table files.

mod commands;

use commands::{check_file, compile_file, explain_error};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "compile" => {
            if args.len() < 3 {
                eprintln!("Usage: lipic compile <file.lipi>");
                std::process::exit(1);
            }
            compile_file(&args[2]);
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: lipic check <file.lipi>");
                std::process::exit(1);
            }
            check_file(&args[2]);
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: lipic --explain <ERROR_CODE>");
                eprintln!("Example: lipic --explain E2001");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Lipi Compiler {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare scheme path compiles it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("lipi"))
            {
                compile_file(command);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

/// Enable tracing output when `RUST_LOG` is set.
///
/// Enable with `RUST_LOG=lipi_eval=debug` or `RUST_LOG=debug`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::from_default_env();
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .init();
    }
}

fn print_usage() {
    println!("Lipi Compiler");
    println!();
    println!("Usage: lipic <command> [options]");
    println!();
    println!("Commands:");
    println!("  compile <file.lipi>  Compile a scheme to a symbol table (.lst)");
    println!("  check <file.lipi>    Validate a scheme without writing output");
    println!("  --explain <code>     Explain an error code (e.g., E2001)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=debug       Enable compiler tracing output");
    println!();
    println!("Examples:");
    println!("  lipic compile ml.lipi           # Build ml.lst in the current directory");
    println!("  lipic check ml.lipi             # Report problems, write nothing");
    println!("  lipic --explain E3001           # Explain a store rejection");
}
