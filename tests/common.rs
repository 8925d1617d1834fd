#![allow(dead_code)]

use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use tempfile::TempDir;

pub const TEST_KEY: &str = "test-key";
/// base64("api:test-key")
pub const TEST_KEY_BASIC_AUTH: &str = "YXBpOnRlc3Qta2V5";

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Writes `[a.png, notes.txt, b.jpg]`, each holding its own name.
pub fn create_mixed_directory(dir: &Path) -> Vec<PathBuf> {
    ["a.png", "notes.txt", "b.jpg"]
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, name.as_bytes()).unwrap();
            path
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub head: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    pub fn has_basic_auth(&self, token: &str) -> bool {
        self.head.lines().any(|line| {
            line.to_ascii_lowercase().starts_with("authorization:") && line.contains(token)
        })
    }
}

pub fn http_response(status_line: &str, headers: &[(&str, &str)], body: &[u8]) -> Vec<u8> {
    let mut response = format!("HTTP/1.1 {}\r\n", status_line);
    for (name, value) in headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    ));
    let mut bytes = response.into_bytes();
    bytes.extend_from_slice(body);
    bytes
}

/// A throwaway HTTP/1.1 server on 127.0.0.1 that answers one request per connection.
pub struct MockTinify {
    listener: TcpListener,
    pub base_url: String,
}

impl MockTinify {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        Self { listener, base_url }
    }

    /// Reply to each connection with the next canned response.
    pub fn serve_canned(self, responses: Vec<Vec<u8>>) -> JoinHandle<Vec<RecordedRequest>> {
        thread::spawn(move || {
            let mut requests = Vec::new();
            for response in responses {
                let (mut stream, _) = self.listener.accept().unwrap();
                requests.push(read_request(&mut stream));
                stream.write_all(&response).unwrap();
            }
            requests
        })
    }

    /// Behave like the shrink API for `uploads` images: each POST gets a 201
    /// pointing at `/output/N`, each GET of that URL returns `compressed`.
    pub fn serve_shrink(self, uploads: usize, compressed: &[u8]) -> JoinHandle<Vec<RecordedRequest>> {
        let compressed = compressed.to_vec();
        let base_url = self.base_url.clone();
        thread::spawn(move || {
            let mut requests = Vec::new();
            let mut created = 0;
            for _ in 0..uploads * 2 {
                let (mut stream, _) = self.listener.accept().unwrap();
                let request = read_request(&mut stream);
                let response = if request.request_line().starts_with("POST /shrink") {
                    created += 1;
                    let location = format!("{}/output/{}", base_url, created);
                    let body = format!(
                        r#"{{"input":{{"size":{},"type":"image/png"}},"output":{{"size":{},"type":"image/png","url":"{}"}}}}"#,
                        request.body.len(),
                        compressed.len(),
                        location
                    );
                    http_response(
                        "201 Created",
                        &[
                            ("Location", location.as_str()),
                            ("Compression-Count", "1"),
                            ("Content-Type", "application/json"),
                        ],
                        body.as_bytes(),
                    )
                } else {
                    http_response("200 OK", &[("Content-Type", "image/png")], &compressed)
                };
                stream.write_all(&response).unwrap();
                requests.push(request);
            }
            requests
        })
    }
}

fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut head = String::new();
    let mut content_length = 0usize;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
            break;
        }
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap();
        }
        head.push_str(&line);
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).unwrap();
    RecordedRequest { head, body }
}
