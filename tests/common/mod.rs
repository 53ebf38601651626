/*!
 * Common test utilities for the translation-studio test suite
 */

use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Route logs through env_logger while tests run
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// The two-language response used throughout the suite: Spanish with every
/// artifact, German with none
pub fn partial_success_body() -> Value {
    json!({
        "results": [
            {"language": "es", "model": "m1", "files": {"pdf": "a", "docx": "b", "epub": "c"}},
            {"language": "de", "model": "m1", "files": {}}
        ]
    })
}

/// A success body whose links point at the default download route
pub fn download_body(languages: &[&str]) -> Value {
    let results: Vec<Value> = languages
        .iter()
        .map(|lang| {
            json!({
                "language": lang,
                "model": "gemini-2.0-flash",
                "files": {
                    "pdf": format!("http://127.0.0.1:5000/download/{}_output.pdf", lang),
                    "docx": format!("http://127.0.0.1:5000/download/{}_output.docx", lang),
                    "epub": format!("http://127.0.0.1:5000/download/{}_output.epub", lang),
                }
            })
        })
        .collect();
    json!({ "results": results })
}

/// Serve exactly one HTTP request on a local port
///
/// Returns the base URL and a receiver yielding the raw request bytes once the
/// canned response has been written.
pub async fn spawn_responder(status: u16, body: String) -> Result<(String, oneshot::Receiver<Vec<u8>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
        let _ = tx.send(request);
    });

    Ok((format!("http://{}", address), rx))
}

/// Accept one connection and never answer it
pub async fn spawn_silent_server() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;

    tokio::spawn(async move {
        if let Ok((socket, _)) = listener.accept().await {
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            drop(socket);
        }
    });

    Ok(format!("http://{}", address))
}

/// Base URL of a port nothing listens on
pub async fn closed_endpoint() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", address))
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Vec<u8> {
    let mut request = Vec::new();
    let mut buffer = [0u8; 4096];

    loop {
        let read = match socket.read(&mut buffer).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        request.extend_from_slice(&buffer[..read]);

        if let Some(header_end) = find(&request, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&request[..header_end]).to_lowercase();
            let body_len = request.len() - (header_end + 4);

            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok());

            match content_length {
                Some(expected) if body_len >= expected => break,
                Some(_) => continue,
                None if headers.contains("transfer-encoding: chunked") => {
                    if request.ends_with(b"0\r\n\r\n") {
                        break;
                    }
                }
                None => break,
            }
        }
    }

    request
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Count non-overlapping occurrences of `needle` in a captured request
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
