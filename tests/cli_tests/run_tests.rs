//! Tests for the command-line front end
//!
//! These tests verify:
//! - Mode and address selection from positional tokens
//! - Help detection in the address slot
//! - Exit codes and error reporting of `execute`

#[path = "../common/mod.rs"]
mod common;

use common::{scripted, STATS_FIXTURE};
use memdtool::cli::{
    execute, interpret, is_help_flag, parse_args, run, Invocation, EXIT_ERR, EXIT_OK, HELP,
};
use memdtool::config::DEFAULT_ADDR;
use memdtool::{Config, Mode};

fn tokens(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Argument Interpretation Tests
// =============================================================================

#[test]
fn test_defaults() {
    assert_eq!(interpret(vec![]), Invocation::Run(Config::default()));
    assert_eq!(Config::default().addr, DEFAULT_ADDR);
    assert_eq!(Config::default().mode, Mode::Display);
}

#[test]
fn test_address_only() {
    assert_eq!(
        interpret(tokens(&["10.0.0.5:11211"])),
        Invocation::Run(Config::builder().addr("10.0.0.5:11211").build())
    );
}

#[test]
fn test_mode_only() {
    assert_eq!(
        interpret(tokens(&["dump"])),
        Invocation::Run(Config::builder().mode(Mode::Dump).build())
    );
}

#[test]
fn test_address_and_mode() {
    assert_eq!(
        interpret(tokens(&["/tmp/memcached.sock", "dump"])),
        Invocation::Run(
            Config::builder()
                .addr("/tmp/memcached.sock")
                .mode(Mode::Dump)
                .build()
        )
    );
}

#[test]
fn test_non_mode_trailing_token_is_not_a_mode() {
    // Only the first remaining token is the address
    assert_eq!(
        interpret(tokens(&["host:1", "extra"])),
        Invocation::Run(Config::builder().addr("host:1").build())
    );
}

#[test]
fn test_help_flags() {
    for flag in ["-h", "--h", "-help", "--help"] {
        assert!(is_help_flag(flag), "{} should be a help flag", flag);
        assert_eq!(interpret(tokens(&[flag])), Invocation::Help);
        assert_eq!(interpret(tokens(&[flag, "dump"])), Invocation::Help);
    }
    for not_flag in ["h", "help", "---help", "-hh", "-x", "--helpme"] {
        assert!(!is_help_flag(not_flag), "{} should not be a help flag", not_flag);
    }
}

#[test]
fn test_parse_args_through_clap() {
    assert_eq!(
        parse_args(["memcached-tool", "cache:11211", "display"]).unwrap(),
        Invocation::Run(Config::builder().addr("cache:11211").build())
    );
    assert_eq!(parse_args(["memcached-tool", "--help"]).unwrap(), Invocation::Help);
    assert_eq!(parse_args(["memcached-tool", "-h"]).unwrap(), Invocation::Help);
}

#[test]
fn test_mode_round_trip() {
    assert_eq!("display".parse::<Mode>().unwrap(), Mode::Display);
    assert_eq!("dump".parse::<Mode>().unwrap(), Mode::Dump);
    assert!("DUMP".parse::<Mode>().is_err());
    assert_eq!(Mode::Dump.to_string(), "dump");
}

// =============================================================================
// Run Tests
// =============================================================================

#[test]
fn test_run_help_does_not_connect() {
    let mut out = Vec::new();
    let mut err = Vec::new();

    let code = run(["memcached-tool", "--help"], &mut out, &mut err);

    assert_eq!(code, EXIT_OK);
    assert!(out.is_empty());
    assert_eq!(String::from_utf8(err).unwrap(), HELP);
}

#[test]
fn test_execute_display() {
    let mut conn = scripted(STATS_FIXTURE);
    let mut out = Vec::new();
    let mut err = Vec::new();

    let code = execute(Mode::Display, &mut conn, &mut out, &mut err);

    assert_eq!(code, EXIT_OK);
    assert!(err.is_empty());
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 4);
}

#[test]
fn test_execute_display_malformed_items_line() {
    let input = "STAT items:1:number 1\nSTAT items:1:age\nEND\nEND\n";
    let mut conn = scripted(input);
    let mut out = Vec::new();
    let mut err = Vec::new();

    let code = execute(Mode::Display, &mut conn, &mut out, &mut err);

    assert_eq!(code, EXIT_ERR);
    assert!(out.is_empty(), "no table may be printed");
    let err = String::from_utf8(err).unwrap();
    assert_eq!(err.lines().count(), 1);
    assert!(err.contains("result of `stats items` is strange: STAT items:1:age"));
}

#[test]
fn test_execute_dump() {
    let input = "\
STAT items:1:number 1\r
END\r
ITEM k [2 b; 0 s]\r
END\r
VALUE k 3 2\r
hi\r
END\r
";
    let mut conn = scripted(input);
    let mut out = Vec::new();
    let mut err = Vec::new();

    let code = execute(Mode::Dump, &mut conn, &mut out, &mut err);

    assert_eq!(code, EXIT_OK);
    assert_eq!(out, b"add k 3 0 2\r\nhi\r\n".to_vec());
    assert!(String::from_utf8(err).unwrap().starts_with("Dumping memcache contents\n"));
}

#[test]
fn test_execute_dump_io_failure() {
    let mut conn = scripted("STAT items:1:number 1\r\n");
    let mut out = Vec::new();
    let mut err = Vec::new();

    let code = execute(Mode::Dump, &mut conn, &mut out, &mut err);

    assert_eq!(code, EXIT_ERR);
    assert!(out.is_empty());
    assert!(String::from_utf8(err).unwrap().contains("IO error"));
}
