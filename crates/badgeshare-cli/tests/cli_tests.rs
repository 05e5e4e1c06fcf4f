//! Integration tests for the `badgeshare` CLI binary.
//!
//! These run the CLI as a subprocess and check exit codes and stdout. No
//! real server is needed: `save` runs either against an address nothing
//! listens on or against a one-shot stub that records the request.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

/// Helper: locate the `badgeshare` binary built by `cargo test`.
fn badgeshare_bin() -> String {
    let path = env!("CARGO_BIN_EXE_badgeshare");
    assert!(
        Path::new(path).exists(),
        "badgeshare binary not found at {path}"
    );
    path.to_owned()
}

/// Helper: run badgeshare with args and return (`exit_code`, stdout, stderr).
fn run(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(badgeshare_bin())
        .args(args)
        .env("BADGESHARE_ADDR", "http://127.0.0.1:19999") // Non-existent server
        .output()
        .expect("failed to execute badgeshare");

    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

/// A request as seen by the stub server.
struct Captured {
    request_line: String,
    body: serde_json::Value,
}

/// Helper: serve exactly one HTTP request on a random local port, answering
/// with `status` and a JSON `reply`. Returns the base URL and a handle that
/// yields the captured request.
fn stub_server(status: &'static str, reply: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }

        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
            reply.len()
        )
        .unwrap();
        stream.flush().unwrap();

        Captured {
            request_line: request_line.trim_end().to_owned(),
            body: serde_json::from_slice(&body).unwrap(),
        }
    });

    (base, handle)
}

/// Helper: run badgeshare against `server` and return (`exit_code`, stdout, stderr).
fn run_against(server: &str, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(badgeshare_bin())
        .args(args)
        .env("BADGESHARE_ADDR", server)
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .output()
        .expect("failed to execute badgeshare");

    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_help_lists_commands() {
    let (code, stdout, _) = run(&["--help"]);
    assert_eq!(code, 0, "badgeshare --help should exit 0");
    for sub in ["save", "link", "count"] {
        assert!(stdout.contains(sub), "help should list '{sub}'");
    }
}

#[test]
fn test_version_flag() {
    let (code, stdout, _) = run(&["--version"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("badgeshare"));
}

#[test]
fn test_count_skips_comments() {
    let file = config_file("a\n#comment\n\nb\n");
    let (code, stdout, _) = run(&["count", file.path().to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "2");
}

#[test]
fn test_link_embeds_base64_payload() {
    // "x\n#c\ny" => "eAojYwp5"
    let file = config_file("x\n#c\ny");
    let (code, stdout, _) = run(&["link", file.path().to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim(),
        "http://127.0.0.1:19999/api/simple?data=eAojYwp5"
    );
}

#[test]
fn test_link_respects_server_flag() {
    let file = config_file("x\n#c\ny");
    let (code, stdout, _) = run(&[
        "--server",
        "https://badges.example.com/",
        "link",
        file.path().to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("https://badges.example.com/api/simple?data="));
}

#[test]
fn test_link_reads_stdin() {
    let mut child = Command::new(badgeshare_bin())
        .args(["link", "-"])
        .env("BADGESHARE_ADDR", "http://localhost:3000")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"x\n#c\ny")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "http://localhost:3000/api/simple?data=eAojYwp5"
    );
}

#[test]
fn test_missing_file_fails() {
    let (code, _, stderr) = run(&["link", "/nonexistent/badge_config.txt"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("failed to read configuration file"));
}

#[test]
fn test_empty_file_fails() {
    let file = config_file("  \n");
    let (code, _, stderr) = run(&["count", file.path().to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("configuration is empty"));
}

#[test]
fn test_save_without_server_fails() {
    let file = config_file("badge");
    let (code, stdout, stderr) = run(&["save", file.path().to_str().unwrap(), "--id", "t1"]);
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("request to http://127.0.0.1:19999 failed"));
}

#[test]
fn test_save_with_id_posts_config_and_prints_link() {
    let (base, handle) = stub_server("200 OK", r#"{"success":true}"#);
    let file = config_file("Eagle|uuid-1\n# comment\nFirst Aid|uuid-2\n");

    let (code, stdout, stderr) = run_against(
        &base,
        &["save", file.path().to_str().unwrap(), "--id", "t1"],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout.trim(), format!("{base}/api/badge-config/t1"));

    let captured = handle.join().unwrap();
    assert!(
        captured.request_line.starts_with("POST /api/save "),
        "unexpected request line: {}",
        captured.request_line
    );
    assert_eq!(captured.body["id"], "t1");
    assert_eq!(
        captured.body["content"],
        "Eagle|uuid-1\n# comment\nFirst Aid|uuid-2\n"
    );
}

#[test]
fn test_save_without_id_generates_uuid() {
    let (base, handle) = stub_server("200 OK", r#"{"success":true}"#);
    let file = config_file("badge");

    let (code, stdout, stderr) = run_against(&base, &["save", file.path().to_str().unwrap()]);
    assert_eq!(code, 0, "stderr: {stderr}");

    let captured = handle.join().unwrap();
    let id = captured.body["id"].as_str().unwrap().to_owned();
    assert_eq!(id.len(), 36, "not a UUID: {id}");
    assert_eq!(id.matches('-').count(), 4, "not a UUID: {id}");
    assert_eq!(captured.body["content"], "badge");
    assert_eq!(stdout.trim(), format!("{base}/api/badge-config/{id}"));
}

#[test]
fn test_save_reports_server_rejection() {
    let (base, handle) = stub_server(
        "400 Bad Request",
        r#"{"error":"bad_request","message":"missing required fields: id"}"#,
    );
    let file = config_file("badge");

    let (code, stdout, stderr) = run_against(
        &base,
        &["save", file.path().to_str().unwrap(), "--id", "t2"],
    );
    handle.join().unwrap();
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("missing required fields: id"), "stderr: {stderr}");
}
