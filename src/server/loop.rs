// Server accept loop
// Unbounded: accepts until the process is terminated by a signal.

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::ServerConfig;
use crate::logger;

/// Accept connections forever, handing each to a connection task.
///
/// Accept errors are logged and the loop continues; there is no shutdown
/// operation.
pub async fn run(listener: TcpListener, config: Arc<ServerConfig>) -> std::io::Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &config),
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::bind_listener;
    use std::fs as stdfs;
    use std::net::SocketAddr;
    use std::path::PathBuf;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn fixture_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("freshd-loop-{}-{name}", std::process::id()));
        let _ = stdfs::remove_dir_all(&root);
        stdfs::create_dir_all(&root).unwrap();
        stdfs::write(root.join("a.txt"), b"alpha").unwrap();
        stdfs::write(root.join("b.txt"), b"beta").unwrap();
        root.canonicalize().unwrap()
    }

    async fn start_server(root: &std::path::Path) -> SocketAddr {
        let config = Arc::new(ServerConfig::with_root(root).unwrap());
        let listener = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(run(listener, config));
        addr
    }

    async fn fetch(addr: SocketAddr, request: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        String::from_utf8_lossy(&raw).into_owned()
    }

    fn get(path: &str) -> String {
        format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
    }

    #[tokio::test]
    async fn concurrent_requests_get_their_own_files() {
        let root = fixture_root("concurrent");
        let addr = start_server(&root).await;

        let (req_a, req_b) = (get("/a.txt"), get("/b.txt"));
        let (a, b) = tokio::join!(fetch(addr, &req_a), fetch(addr, &req_b));

        assert!(a.contains("HTTP/1.1 200"));
        assert!(a.ends_with("alpha"));
        assert!(b.contains("HTTP/1.1 200"));
        assert!(b.ends_with("beta"));
    }

    #[tokio::test]
    async fn every_response_carries_the_no_cache_triplet() {
        let root = fixture_root("headers");
        let addr = start_server(&root).await;

        for request in [
            get("/a.txt"),
            get("/no-such-file"),
            "DELETE /a.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n".to_string(),
        ] {
            let raw = fetch(addr, &request).await.to_lowercase();
            assert_eq!(
                raw.matches("cache-control: no-cache, no-store, must-revalidate")
                    .count(),
                1,
                "missing or duplicated cache-control in: {raw}"
            );
            assert_eq!(raw.matches("pragma: no-cache").count(), 1);
            assert_eq!(raw.matches("expires: 0").count(), 1);
        }
    }

    #[tokio::test]
    async fn missing_resource_is_404() {
        let root = fixture_root("missing");
        let addr = start_server(&root).await;

        let raw = fetch(addr, &get("/nope.js")).await;
        assert!(raw.starts_with("HTTP/1.1 404"));
    }

    #[tokio::test]
    async fn head_gets_headers_without_body() {
        let root = fixture_root("head");
        let addr = start_server(&root).await;

        let raw = fetch(
            addr,
            "HEAD /a.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(raw.starts_with("HTTP/1.1 200"));
        assert!(raw.to_lowercase().contains("content-length: 5"));
        assert!(!raw.contains("alpha"));
    }
}
