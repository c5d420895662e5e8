//! Server module
//!
//! Handles TCP connections and manages the event loop.
//! This module is responsible for accepting connections and delegating
//! command processing to the dispatcher.

mod connection;

use crate::commands::{CommandRegistry, DefaultCommandSelector};
use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::store::{MemoryStore, SharedKvStore, ThreadSafeStore};
use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

pub use connection::Connection;

/// Wire the built-in commands around `store`
///
/// Fails if the registry rejects a registration; the server must not start then.
pub fn build_dispatcher(store: Arc<dyn SharedKvStore>) -> anyhow::Result<Dispatcher> {
    let registry = CommandRegistry::with_builtin_commands(store)
        .context("failed to register built-in commands")?;
    let selector = DefaultCommandSelector::new(Arc::new(registry));

    Ok(Dispatcher::new(Arc::new(selector)))
}

/// Run the server
///
/// Starts the TCP server on the configured address and processes incoming connections.
pub async fn run(config: &ServerConfig) -> anyhow::Result<()> {
    let store: Arc<dyn SharedKvStore> = Arc::new(ThreadSafeStore::new(MemoryStore::new()));
    let dispatcher = Arc::new(build_dispatcher(store)?);

    // Bind the TCP listener
    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("respkv server listening on {}", addr);

    serve(listener, dispatcher).await
}

/// Accept connections on `listener` forever
pub async fn serve(listener: TcpListener, dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    loop {
        // Accept incoming connections
        let (socket, addr) = listener.accept().await?;
        info!("New connection from {}", addr);

        let dispatcher = dispatcher.clone();

        // Spawn a new task to handle this connection
        tokio::spawn(async move {
            let mut connection = Connection::new(socket);

            if let Err(e) = connection.handle(&dispatcher).await {
                error!("Connection error from {}: {}", addr, e);
            }

            debug!("Connection from {} closed", addr);
        });
    }
}
