use std::sync::Arc;

use tokio::net::TcpListener;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, thread count from the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(serve(cfg))
}

async fn serve(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // An unusable upstream URL or an occupied port is fatal at startup.
    // Nothing inside request handling is.
    let state = Arc::new(config::AppState::new(cfg)?);
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &state.config);

    run_accept_loop(&listener, &state).await
}

/// Accept connections forever, each served on its own task.
///
/// No connection limit and no backpressure: every accepted connection gets
/// a task, and a stalled connection stalls only itself.
async fn run_accept_loop(
    listener: &TcpListener,
    state: &Arc<config::AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                server::accept_connection(stream, peer_addr, state);
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
