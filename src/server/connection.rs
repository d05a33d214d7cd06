// Connection handling module
// Serves a single accepted TCP connection on its own task

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Accept a connection and serve HTTP/1.1 requests on a spawned task.
///
/// Connections are served independently and without bound: no connection
/// limit and no idle timeout. Requests on the same connection share nothing
/// with other connections, so no locking is involved.
pub fn accept_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);
    if access_log {
        logger::log_connection_accepted(&peer_addr);
    }

    let state = Arc::clone(state);
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            let state = Arc::clone(&state);
            async move { handler::handle_request(req, peer_addr, state).await }
        });

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service);

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
