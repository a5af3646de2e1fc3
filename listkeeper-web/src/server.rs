//! Application state and the HTTP listener

use crate::error::Result;
use crate::routes::router;
use crate::session::PurgeThrottle;
use listkeeper_config::{ServerConfig, SessionStoreKind};
use listkeeper_templating::TemplateEngine;
use listkeeper_todo::{FileSessionStore, InMemorySessionStore, SessionStore};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Minimum time between sweeps of expired sessions
pub const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// State shared by every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<dyn SessionStore>,
    pub views: Arc<TemplateEngine>,
    pub cookie_name: Arc<str>,
    pub purge: Arc<PurgeThrottle>,
}

impl AppState {
    pub fn new(store: Arc<dyn SessionStore>, views: TemplateEngine, cookie_name: &str) -> Self {
        Self {
            store,
            views: Arc::new(views),
            cookie_name: Arc::from(cookie_name),
            purge: Arc::new(PurgeThrottle::new(PURGE_INTERVAL)),
        }
    }

    /// Sweep expired sessions at most once per `interval`
    pub fn with_purge_interval(mut self, interval: Duration) -> Self {
        self.purge = Arc::new(PurgeThrottle::new(interval));
        self
    }

    /// Build the session store and templates described by `config`
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        let store: Arc<dyn SessionStore> = match config.session_store {
            SessionStoreKind::Memory => {
                tracing::debug!("Using in-memory session store");
                Arc::new(InMemorySessionStore::new(config.session_ttl()))
            }
            SessionStoreKind::File => {
                tracing::debug!(
                    "Using file session store in {}",
                    config.session_dir.display()
                );
                Arc::new(FileSessionStore::new(&config.session_dir, config.session_ttl()).await?)
            }
        };
        Ok(Self::new(store, TemplateEngine::new()?, &config.cookie_name))
    }
}

/// Bind the configured address and serve until `shutdown` resolves
pub async fn serve<F>(config: &ServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = AppState::from_config(config).await?;
    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Listkeeper listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Listkeeper server stopped");
    Ok(())
}

/// Start the server on a background task
///
/// Returns the bound address, useful when the configured port is `0`, and the
/// task handle. Abort the handle to stop the server.
pub async fn start_server(
    config: &ServerConfig,
) -> Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let state = AppState::from_config(config).await?;
    let listener = TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Listkeeper listening on http://{}", addr);

    let server_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router(state)).await {
            tracing::error!("Listkeeper server error: {}", e);
        }
        tracing::info!("Listkeeper server task exiting");
    });

    Ok((addr, server_task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn test_config() -> ServerConfig {
        ServerConfig {
            port: 0,
            ..ServerConfig::default()
        }
    }

    async fn raw_get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_health_over_tcp() {
        let (addr, handle) = start_server(&test_config()).await.unwrap();
        assert_ne!(addr.port(), 0);

        let response = raw_get(addr, "/health").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("OK"));
        assert!(!response.to_ascii_lowercase().contains("set-cookie"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_first_visit_sets_cookie() {
        let (addr, handle) = start_server(&test_config()).await.unwrap();

        let response = raw_get(addr, "/lists").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("listkeeper.session="));

        handle.abort();
    }

    #[tokio::test]
    async fn test_file_store_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ServerConfig {
            session_store: SessionStoreKind::File,
            session_dir: dir.path().join("sessions"),
            ..test_config()
        };
        AppState::from_config(&config).await.unwrap();
        assert!(dir.path().join("sessions").is_dir());
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        serve(&test_config(), async {}).await.unwrap();
    }
}
