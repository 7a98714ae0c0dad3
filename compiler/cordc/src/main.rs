//! The `cord` binary: evaluate a Cord source file.

use cord_compile::Scope;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(path) = args.get(1) else {
        return;
    };
    if path == "-h" || path == "--help" {
        print_usage();
        return;
    }

    let file = match cordc::input::load(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("cord: {err}");
            return;
        }
    };

    match cordc::pipeline::run(&file, Scope::new()) {
        Ok(_) => {}
        Err(diagnostic) => {
            diagnostic.emit();
            std::process::exit(1);
        }
    }
}

/// Tracing goes to stderr, controlled by `CORD_LOG` (for example
/// `CORD_LOG=cord_parse=trace`). Off when the variable is unset.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Ok(filter) = std::env::var("CORD_LOG") {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::new(filter))
            .init();
    }
}

fn print_usage() {
    println!("Cord {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: cord <file>");
    println!();
    println!("Parses, compiles, and evaluates a Cord source file.");
    println!("Set CORD_LOG (tracing filter syntax) for internal logs.");
}
