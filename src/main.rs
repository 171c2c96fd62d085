use std::sync::Arc;

use devserve::config::{AppState, Config};
use devserve::logger;
use devserve::server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime; worker thread count follows the config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(serve(cfg))
}

async fn serve(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Port in use or a bad address fails startup with a non-zero exit
    let listener = server::create_listener(addr)?;
    let state = Arc::new(AppState::new(cfg)?);

    logger::log_server_start(&addr, &state.config);

    let shutdown = server::spawn_signal_handler();
    server::run(listener, state, shutdown).await;

    logger::log_server_stopped();
    Ok(())
}
