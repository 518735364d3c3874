//! Test server lifecycle management
//!
//! Each test gets an isolated server listening on a random port.

use super::constants::*;
use music_library_server::auth::TokenIssuer;
use music_library_server::config::AuthSettings;
use music_library_server::server::state::{GuardedLibraryStore, GuardedUserStore};
use music_library_server::server::{make_app, RequestsLoggingLevel, ServerConfig, ServerState};
use music_library_server::user::CredentialHasher;
use music_library_server::{
    MemoryLibraryStore, MemoryUserStore, SqliteLibraryStore, SqliteUserStore,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Test server instance
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server backed by in-memory stores
    pub async fn spawn() -> Self {
        Self::spawn_with_stores(
            Arc::new(MemoryLibraryStore::new()),
            Arc::new(MemoryUserStore::new()),
        )
        .await
    }

    /// Spawns a server backed by SQLite databases inside `db_dir`
    ///
    /// The caller owns the directory so that several servers can be spawned
    /// over the same data in sequence.
    pub async fn spawn_with_db_dir(db_dir: &Path) -> Self {
        let library_store = SqliteLibraryStore::new(db_dir.join("library.db"))
            .expect("Failed to open library store");
        let user_store =
            SqliteUserStore::new(db_dir.join("user.db")).expect("Failed to open user store");
        Self::spawn_with_stores(Arc::new(library_store), Arc::new(user_store)).await
    }

    async fn spawn_with_stores(
        library_store: GuardedLibraryStore,
        user_store: GuardedUserStore,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
        };
        let tokens = TokenIssuer::new(&AuthSettings {
            access_secret: TEST_JWT_SECRET.to_string(),
            refresh_secret: TEST_JWT_REFRESH_SECRET.to_string(),
            access_token_ttl: Duration::from_secs(3600),
            refresh_token_ttl: Duration::from_secs(86400),
        });
        let state = ServerState::new(
            config,
            library_store,
            user_store,
            CredentialHasher::new(TEST_HASH_COST),
            tokens,
        );
        let app = make_app(state);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
