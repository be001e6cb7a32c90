//! Shared fixtures for integration tests

#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

/// Serve a canned HTTP response `times` times on a local port
///
/// Returns the URL to point the extractor at.
pub async fn serve(status: &str, body: &str, times: usize) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    tokio::spawn(async move {
        for _ in 0..times {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
    });

    Url::parse(&format!("http://{}/v3/covid-19/countries", addr)).unwrap()
}

/// The single-country response used across scenarios
pub const SINGLE_COUNTRY: &str = r#"[{"country":"X","cases":10,"deaths":1,"recovered":5,"population":1000,"updated":1700000000000}]"#;

/// A few countries, one with missing optional fields
pub const SEVERAL_COUNTRIES: &str = r#"[
    {"country":"Andorra","cases":48015,"deaths":165,"recovered":47563,"population":77463,"updated":1700000000000},
    {"country":"Bonaire, Sint Eustatius and Saba","cases":11922,"updated":1700000000500},
    {"country":"Chad","cases":7701,"deaths":194,"recovered":4874,"population":17179740,"updated":1700000001000}
]"#;

/// A database that refuses connections
pub const UNREACHABLE_DATABASE: &str = "host=127.0.0.1 port=1 user=etl dbname=covid connect_timeout=1";
