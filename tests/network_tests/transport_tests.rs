//! Tests for transport selection
//!
//! Address syntax decides TCP vs Unix socket; the end-to-end tests run the
//! whole CLI against a scripted server thread.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;

use memdtool::cli::{run, EXIT_ERR, EXIT_OK};
use memdtool::network::{connect, Endpoint};
use memdtool::ToolError;

const ITEMS_RESPONSE: &str = "STAT items:1:number 2\r\nSTAT items:1:age 10\r\nEND\r\n";
const SLABS_RESPONSE: &str = "STAT 1:chunk_size 96\r\nSTAT 1:total_pages 1\r\n\
STAT 1:free_chunks_end 0\r\nSTAT active_slabs 1\r\nEND\r\n";

/// Answer `stats items` and `stats slabs`, then hang up
fn serve_stats<S: std::io::Read + Write>(stream: S) {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).unwrap() == 0 {
            return;
        }
        let response = match line.trim_end() {
            "stats items" => ITEMS_RESPONSE,
            "stats slabs" => SLABS_RESPONSE,
            _ => "ERROR\r\n",
        };
        reader.get_mut().write_all(response.as_bytes()).unwrap();
    }
}

fn run_to_strings(argv: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(argv.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

// =============================================================================
// Endpoint Tests
// =============================================================================

#[test]
fn test_endpoint_tcp() {
    assert_eq!(
        Endpoint::parse("127.0.0.1:11211"),
        Endpoint::Tcp("127.0.0.1:11211".to_string())
    );
    assert_eq!(
        Endpoint::parse("cache.local:11211"),
        Endpoint::Tcp("cache.local:11211".to_string())
    );
}

#[test]
fn test_endpoint_unix() {
    assert_eq!(
        Endpoint::parse("/var/run/memcached.sock"),
        Endpoint::Unix(PathBuf::from("/var/run/memcached.sock"))
    );
    assert_eq!(
        Endpoint::parse("./memcached.sock"),
        Endpoint::Unix(PathBuf::from("./memcached.sock"))
    );
}

// =============================================================================
// Connection Failure Tests
// =============================================================================

#[test]
fn test_connect_refused_is_transport_error() {
    // Bind then drop to get a port nobody listens on
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

    match connect(&addr.to_string()) {
        Err(ToolError::Transport { addr: reported, .. }) => {
            assert_eq!(reported, addr.to_string())
        }
        Err(other) => panic!("Expected transport error, got {:?}", other),
        Ok(_) => panic!("Expected connection to fail"),
    }
}

#[test]
fn test_run_exits_with_error_when_unreachable() {
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let addr = addr.to_string();

    let (code, out, err) = run_to_strings(&["memcached-tool", &addr, "display"]);

    assert_eq!(code, EXIT_ERR);
    assert!(out.is_empty());
    assert_eq!(err.lines().count(), 1);
    assert!(err.contains(&addr));
}

// =============================================================================
// End-to-End Tests
// =============================================================================

#[test]
fn test_display_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        serve_stats(stream);
    });

    let (code, out, err) = run_to_strings(&["memcached-tool", &addr, "display"]);
    server.join().unwrap();

    assert_eq!(code, EXIT_OK, "stderr: {}", err);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        "  1      96B        10s       1       2     yes        0        0    0"
    );
}

#[cfg(unix)]
#[test]
fn test_display_over_unix_socket() {
    use std::os::unix::net::UnixListener;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memcached.sock");
    let listener = UnixListener::bind(&path).unwrap();
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        serve_stats(stream);
    });

    let path_str = path.to_str().unwrap().to_string();
    let (code, out, err) = run_to_strings(&["memcached-tool", &path_str]);
    server.join().unwrap();

    assert_eq!(code, EXIT_OK, "stderr: {}", err);
    assert_eq!(out.lines().count(), 2);
    assert!(out.lines().nth(1).unwrap().contains("96B"));
}
