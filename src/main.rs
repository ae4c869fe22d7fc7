use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod render;
mod routing;
mod server;
mod store;

/// Config file used when no path is given on the command line (extension optional)
const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, sized by `server.workers` when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    let state = match config::AppState::build(cfg).await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            logger::log_error(&format!("Startup failed: {e}"));
            return Err(e.into());
        }
    };

    let listener = server::create_reusable_listener(addr, state.config.performance.backlog)?;
    let resources: Vec<String> = state
        .registry
        .iter()
        .map(|store| {
            if store.is_persistent() {
                format!("{} (document)", store.name())
            } else {
                store.name().to_string()
            }
        })
        .collect();
    logger::log_server_start(&addr, &state.config, &resources);

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(
            listener,
            state,
            Arc::new(AtomicUsize::new(0)),
            signals,
        ))
        .await;

    Ok(())
}
