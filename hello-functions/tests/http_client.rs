//! `HttpJsonClient` against a throwaway local server that returns canned responses.

use handler_contract::{CollaboratorError, JsonFetcher};
use hello_functions::http::HttpJsonClient;
use serde_json::json;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves a single HTTP/1.1 response and returns the base URL of the server.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        // read until the end of the request headers, GET requests have no body
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });

    format!("http://{addr}")
}

fn client() -> HttpJsonClient {
    HttpJsonClient::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_decodes_json_body() {
    let base = serve_once("200 OK", r#"{"name":"bulbasaur","id":1}"#).await;

    let value = client().get_json(&format!("{base}/pokemon/bulbasaur")).await.unwrap();

    assert_eq!(value, json!({"name": "bulbasaur", "id": 1}));
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let base = serve_once("404 Not Found", r#"{"detail":"Not found."}"#).await;
    let url = format!("{base}/pokemon/missingno");

    let err = client().get_json(&url).await.unwrap_err();

    assert_eq!(err, CollaboratorError::Status { url, status: 404 });
}

#[tokio::test]
async fn test_invalid_json_is_a_decode_error() {
    let base = serve_once("200 OK", "<html>not json</html>").await;

    let err = client().get_json(&format!("{base}/pokemon/bulbasaur")).await.unwrap_err();

    assert!(matches!(err, CollaboratorError::Decode { .. }), "{err:?}");
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    // grab a free port and close it again so nothing is listening there
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client().get_json(&format!("http://{addr}/pokemon/bulbasaur")).await.unwrap_err();

    assert!(matches!(err, CollaboratorError::Transport { .. }), "{err:?}");
}
