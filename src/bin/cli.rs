//! memcached-tool binary
//!
//! Shows slab statistics or dumps the contents of a memcached server.

use std::io;

use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // Logging goes to stderr and stays quiet unless RUST_LOG asks for more
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    tracing::debug!("memcached-tool v{}", memdtool::VERSION);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let code = memdtool::cli::run(
        std::env::args_os(),
        &mut io::BufWriter::new(stdout.lock()),
        &mut stderr.lock(),
    );

    std::process::exit(code);
}
