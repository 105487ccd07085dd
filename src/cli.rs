//! Command-line front end
//!
//! `memcached-tool [address] [display|dump]`
//!
//! A trailing `display` or `dump` selects the mode; the first remaining token
//! is the address. The address slot doubles as the help switch.

use std::ffi::OsString;
use std::io::{Read, Write};

use clap::Parser;

use crate::config::{Config, Mode};
use crate::display::render_table;
use crate::dump::dump;
use crate::error::Result;
use crate::network::{connect, Connection};
use crate::stats::collect;

/// Success
pub const EXIT_OK: i32 = 0;

/// Argument vector rejected by the parser
pub const EXIT_FLAG_PARSE_ERR: i32 = 1;

/// Connection, protocol or I/O failure
pub const EXIT_ERR: i32 = 2;

/// Usage text, printed to the diagnostic stream
pub const HELP: &str = "\
Usage: memcached-tool <host[:port] | /path/to/socket> [display|dump]

       memcached-tool 127.0.0.1:11211    # shows slabs
       memcached-tool 127.0.0.1:11211 dump    # dumps keys and values
";

/// memcached-tool
#[derive(Parser, Debug)]
#[command(name = "memcached-tool")]
#[command(about = "Show memcached slab statistics or dump its contents")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// [host[:port] | /path/to/socket] [display|dump]
    #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Print usage and exit without connecting
    Help,

    /// Connect and run one mode
    Run(Config),
}

/// Whether an address token is really a request for help
///
/// Accepts `-h`, `--h`, `-help` and `--help`.
pub fn is_help_flag(token: &str) -> bool {
    let rest = token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'));
    matches!(rest, Some("h") | Some("help"))
}

/// Interpret positional tokens (program name already removed)
pub fn interpret(mut tokens: Vec<String>) -> Invocation {
    let mut builder = Config::builder();

    if let Some(mode) = tokens.last().and_then(|t| t.parse::<Mode>().ok()) {
        builder = builder.mode(mode);
        tokens.pop();
    }

    if let Some(addr) = tokens.into_iter().next() {
        if is_help_flag(&addr) {
            return Invocation::Help;
        }
        builder = builder.addr(addr);
    }

    Invocation::Run(builder.build())
}

/// Parse a full argument vector, program name first
pub fn parse_args<I, T>(argv: I) -> std::result::Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(argv)?;
    Ok(interpret(args.tokens))
}

/// Run the tool; returns the process exit code
///
/// Table or dump output goes to `out`; usage, dump progress and the single
/// error line of a failed run go to `err`.
pub fn run<I, T, O, E>(argv: I, out: &mut O, err: &mut E) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    O: Write,
    E: Write,
{
    let config = match parse_args(argv) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            let _ = err.write_all(HELP.as_bytes());
            return EXIT_OK;
        }
        Err(e) => {
            let _ = write!(err, "{}", e);
            return EXIT_FLAG_PARSE_ERR;
        }
    };

    tracing::debug!("Running {} against {}", config.mode, config.addr);

    let mut conn = match connect(&config.addr) {
        Ok(conn) => conn,
        Err(e) => {
            let _ = writeln!(err, "{}", e);
            return EXIT_ERR;
        }
    };

    // The connection is dropped, and so closed, on return
    execute(config.mode, &mut conn, out, err)
}

/// Run one mode over an established connection; returns the exit code
pub fn execute<S, O, E>(mode: Mode, conn: &mut Connection<S>, out: &mut O, err: &mut E) -> i32
where
    S: Read + Write,
    O: Write,
    E: Write,
{
    match run_mode(mode, conn, out, err) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            tracing::debug!("{} failed against {}: {:?}", mode, conn.peer_addr(), e);
            let _ = writeln!(err, "{}", e);
            EXIT_ERR
        }
    }
}

fn run_mode<S, O, E>(mode: Mode, conn: &mut Connection<S>, out: &mut O, err: &mut E) -> Result<()>
where
    S: Read + Write,
    O: Write,
    E: Write,
{
    match mode {
        Mode::Display => {
            let records = collect(conn)?;
            render_table(&records, out)?;
        }
        Mode::Dump => {
            dump(conn, out, err)?;
        }
    }
    Ok(())
}
