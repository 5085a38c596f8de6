// crates/todo-contract-cli/tests/common/mod.rs
// ============================================================================
// Module: CLI Test Helpers
// Description: Binary invocation and a stub Todo service for CLI tests.
// Purpose: Run the todo-contract binary in isolation against local servers.
// ============================================================================

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::thread;

use tempfile::TempDir;
use tiny_http::Header;
use tiny_http::Method;
use tiny_http::Response;
use tiny_http::Server;

/// Token issued by the stub service.
pub const STUB_TOKEN: &str = "stub-session-token";

/// Behavior switches for the stub service.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubBehavior {
    /// Refuse session creation with a 503.
    pub refuse_session: bool,
    /// Answer `PATCH /heartbeat` with 200 instead of 500.
    pub patch_heartbeat_ok: bool,
}

/// Returns the path to the compiled CLI binary.
pub fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_todo-contract"))
}

/// Runs the CLI in `dir` with config env vars cleared.
pub fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .current_dir(dir)
        .env_remove("TODO_CONTRACT_CONFIG")
        .env_remove("TODO_CONTRACT_BASE_URL")
        .output()
        .expect("run todo-contract")
}

/// Writes `todo-contract.toml` into a fresh temp dir.
pub fn config_dir(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("todo-contract.toml");
    fs::write(&path, contents).expect("write config");
    (dir, path)
}

/// Returns stdout as text.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Returns stderr as text.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Spawns a stub service that serves the session and heartbeat routes.
///
/// The server thread is detached and lives until the test process exits.
pub fn spawn_stub_service(behavior: StubBehavior) -> String {
    let server = Server::http("127.0.0.1:0").expect("bind stub");
    let addr = server.server_addr().to_ip().expect("ip addr");
    thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = route(&behavior, request.method(), request.url());
            let _ = request.respond(response);
        }
    });
    format!("http://{addr}")
}

/// Routes one stub request.
fn route(
    behavior: &StubBehavior,
    method: &Method,
    url: &str,
) -> Response<std::io::Cursor<Vec<u8>>> {
    match (method, url) {
        (Method::Post, "/challenger") if behavior.refuse_session => {
            Response::from_string("unavailable").with_status_code(503)
        }
        (Method::Post, "/challenger") => Response::from_string("")
            .with_status_code(201)
            .with_header(header("X-Challenger", STUB_TOKEN))
            .with_header(header("Location", &format!("/gui/challenges/{STUB_TOKEN}"))),
        (Method::Delete, "/heartbeat") => Response::from_string("").with_status_code(405),
        (Method::Patch, "/heartbeat") if behavior.patch_heartbeat_ok => {
            Response::from_string("").with_status_code(200)
        }
        (Method::Patch, "/heartbeat") => Response::from_string("").with_status_code(500),
        _ => Response::from_string("").with_status_code(404),
    }
}

/// Builds a tiny_http header.
fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("header")
}
