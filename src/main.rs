use clap::Parser;

use statecell::cli::{run, Cli};
use statecell::logging::init_tracing;

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&cli, &mut out) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
