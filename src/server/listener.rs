use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routes::RouteTable;
use crate::store::FileStore;

/// Binds the configured address and serves until the process exits.
pub async fn run(cfg: Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("listening on {}", cfg.listen_addr);

    run_on(listener, cfg).await
}

/// Serves on an already-bound listener.
///
/// Split from [`run`] so tests can bind `127.0.0.1:0` first and learn
/// the port from the listener.
pub async fn run_on(listener: TcpListener, cfg: Config) -> anyhow::Result<()> {
    let routes = Arc::new(RouteTable::standard());
    let store = cfg.directory.clone().map(FileStore::new);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("accepted connection from {}", peer);

        let conn = Connection::new(
            socket,
            Arc::clone(&routes),
            store.clone(),
            cfg.idle_read_timeout,
        );
        tokio::spawn(async move {
            if let Err(e) = conn.run().await {
                tracing::error!("connection error from {}: {}", peer, e);
            }
        });
    }
}
