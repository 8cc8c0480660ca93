// Connection handling
// Serves HTTP/1.1 over a single accepted TCP connection.

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::ServerConfig;
use crate::handler;
use crate::logger;

/// Serve one accepted connection in a spawned task.
///
/// Connection-level failures (malformed requests, resets mid-request) are
/// logged and end the task; the accept loop is unaffected.
pub fn accept_connection(stream: TcpStream, peer_addr: SocketAddr, config: &Arc<ServerConfig>) {
    let config = Arc::clone(config);

    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let config = Arc::clone(&config);
                async move { handler::handle_request(req, config, peer_addr).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
