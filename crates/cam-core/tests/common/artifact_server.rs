//! Minimal HTTP/1.1 server standing in for the artifact repository in integration tests.
//!
//! Serves a fixed set of paths. Requests without the expected basic-auth
//! header get 401; unknown paths get 404. Every request line and
//! `Authorization` header is recorded so tests can assert on them.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// What the server saw for one request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub authorization: Option<String>,
}

pub struct ArtifactServer {
    pub base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl ArtifactServer {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. `files` maps request paths (e.g. "/a/1.0/a-1.0.jar")
/// to bodies. `expected_auth` is the full header value, e.g. "Basic YWxpY2U6c2VjcmV0".
/// The server runs until the process exits.
pub fn start(files: HashMap<String, Vec<u8>>, expected_auth: &str) -> ArtifactServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files = Arc::new(files);
    let expected_auth = Arc::new(expected_auth.to_string());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_srv = Arc::clone(&seen);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            let expected_auth = Arc::clone(&expected_auth);
            let seen = Arc::clone(&seen_srv);
            thread::spawn(move || handle(stream, &files, &expected_auth, &seen));
        }
    });
    ArtifactServer {
        base_url: format!("http://127.0.0.1:{}", port),
        seen,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    files: &HashMap<String, Vec<u8>>,
    expected_auth: &str,
    seen: &Mutex<Vec<SeenRequest>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let req = parse_request(request);
    seen.lock().unwrap().push(req.clone());

    if req.authorization.as_deref() != Some(expected_auth) {
        let _ = stream.write_all(
            b"HTTP/1.1 401 Unauthorized\r\nWWW-Authenticate: Basic realm=\"artifactory\"\r\nContent-Length: 0\r\n\r\n",
        );
        return;
    }

    match files.get(&req.path) {
        Some(body) => {
            let head = format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n", body.len());
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        }
        None => {
            let body = b"not found";
            let head = format!(
                "HTTP/1.1 404 Not Found\r\nContent-Length: {}\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        }
    }
}

fn parse_request(request: &str) -> SeenRequest {
    let mut path = String::new();
    let mut authorization = None;
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if path.is_empty() {
            path = line.split_whitespace().nth(1).unwrap_or("").to_string();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("authorization") {
                authorization = Some(value.trim().to_string());
            }
        }
    }
    SeenRequest {
        path,
        authorization,
    }
}
