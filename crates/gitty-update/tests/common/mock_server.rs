//! Mock server helpers for the release index and artifact downloads

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::constants::*;

/// Serve `release` as the latest release document
pub async fn mock_release_index(server: &MockServer, release: &Value) {
    Mock::given(method("GET"))
        .and(path(INDEX_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(release))
        .mount(server)
        .await;
}

/// Serve a raw, possibly malformed, body from the release index
pub async fn mock_raw_release_index(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(INDEX_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Serve `content` at `/download/{name}`
pub async fn mock_artifact_download(server: &MockServer, name: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/download/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .mount(server)
        .await;
}

/// Fail every request to `/download/{name}` with `status`
pub async fn mock_failing_download(server: &MockServer, name: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/download/{}", name)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Expect no request at all to `/download/{name}`
pub async fn expect_no_download(server: &MockServer, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/download/{}", name)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

/// Serve one response that declares `declared_len` bytes but sends only `body`
///
/// Returns the URL to request. The connection is closed after the short body.
pub async fn serve_truncated_download(declared_len: usize, body: &'static [u8]) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;

        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            declared_len
        );
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.write_all(body).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}/download/{}", addr, ARTIFACT_LINUX_AMD64)
}
