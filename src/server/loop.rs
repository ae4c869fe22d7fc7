// Server loop module
// Accepts connections until shutdown is requested, then drains open ones

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept loop for the resource server.
///
/// Returns once shutdown has been signalled and open connections have
/// finished, or the grace period (the configured write timeout) ran out.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    signals: Arc<SignalHandler>,
) {
    while !signals.is_shutdown_requested() {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = signals.shutdown.notified() => break,
        }
    }

    // Stop accepting before waiting on in-flight requests
    drop(listener);

    let grace = Duration::from_secs(state.config.performance.write_timeout);
    let remaining = wait_for_connections(&active_connections, grace).await;
    logger::log_shutdown_complete(remaining);
}

/// Poll until no connection is open or `grace` elapses; returns the count still open
async fn wait_for_connections(active: &AtomicUsize, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;
    loop {
        let open = active.load(Ordering::SeqCst);
        if open == 0 || tokio::time::Instant::now() >= deadline {
            return open;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_reusable_listener;
    use crate::store::Registry;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn state() -> Arc<AppState> {
        let config = Config::load_from("does-not-exist/config").unwrap();
        let registry = Registry::from_config(&config.store).await.unwrap();
        Arc::new(AppState::with_registry(config, registry).unwrap())
    }

    async fn get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap(), 16).unwrap();
        let addr = listener.local_addr().unwrap();
        let state = state().await;
        let signals = Arc::new(SignalHandler::new());
        let active = Arc::new(AtomicUsize::new(0));

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let server = tokio::task::spawn_local(start_server_loop(
                    listener,
                    state,
                    Arc::clone(&active),
                    Arc::clone(&signals),
                ));

                let response = get(addr, "/pokemon/2").await;
                assert!(response.starts_with("HTTP/1.1 200 OK"));
                assert!(response.contains("Ivysaur"));
                assert!(response.to_ascii_lowercase().contains("server: resource-server/0.1"));

                let missing = get(addr, "/pokemon/99").await;
                assert!(missing.starts_with("HTTP/1.1 404"));

                signals.request_shutdown("test");
                tokio::time::timeout(Duration::from_secs(5), server)
                    .await
                    .unwrap()
                    .unwrap();
            })
            .await;

        assert_eq!(active.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_wait_for_connections_gives_up_after_grace() {
        let active = AtomicUsize::new(2);
        let open = wait_for_connections(&active, Duration::from_millis(10)).await;
        assert_eq!(open, 2);
        active.store(0, Ordering::SeqCst);
        assert_eq!(wait_for_connections(&active, Duration::from_secs(1)).await, 0);
    }
}
