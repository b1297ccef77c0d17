//! Minimal HTTP/1.1 server that answers `GET /api/v3/files/{hash}` for integration tests.
//!
//! Canned replies are keyed by hash; unknown hashes get `200 []`. Every
//! request's path and `X-Apikey` header are recorded.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub api_key: Option<String>,
}

pub struct ReputationServer {
    /// Base URL, e.g. "http://127.0.0.1:12345".
    pub url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl ReputationServer {
    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(replies: HashMap<String, (u16, String)>) -> ReputationServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let replies = Arc::new(replies);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_srv = Arc::clone(&seen);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let replies = Arc::clone(&replies);
            let seen = Arc::clone(&seen_srv);
            thread::spawn(move || handle(stream, &replies, &seen));
        }
    });
    ReputationServer {
        url: format!("http://127.0.0.1:{}", port),
        seen,
    }
}

/// A base URL on which nothing is listening.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn handle(
    mut stream: std::net::TcpStream,
    replies: &HashMap<String, (u16, String)>,
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
    let hash = req
        .path
        .strip_prefix("/api/v3/files/")
        .unwrap_or("")
        .to_string();
    seen.lock().unwrap().push(req);

    let (status, body) = replies
        .get(&hash)
        .cloned()
        .unwrap_or((200, "[]".to_string()));
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn parse_request(request: &str) -> SeenRequest {
    let mut lines = request.lines();
    let mut first = lines.next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("").to_string();
    let path = first.next().unwrap_or("").to_string();
    let mut api_key = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("x-apikey") {
                api_key = Some(value.trim().to_string());
            }
        }
    }
    SeenRequest {
        method,
        path,
        api_key,
    }
}
