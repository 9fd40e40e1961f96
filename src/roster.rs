use crate::{
    app,
    config::RosterConfig,
    storage::{Db, MemoryStorage, Storage},
};
use axum::extract::FromRef;
use std::net::SocketAddr;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    db: Db,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

impl FromRef<AppState> for Db {
    fn from_ref(input: &AppState) -> Self {
        input.db.clone()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("hyper error: {0}")]
    Hyper(#[from] hyper::Error),
}

pub fn storage(config: &RosterConfig) -> MemoryStorage {
    let storage = if config.seed {
        MemoryStorage::seeded()
    } else {
        MemoryStorage::default()
    };
    if storage.is_empty() {
        info!("starting with an empty store");
    } else {
        info!("seeded store with {} users", storage.len());
    }
    storage
}

pub async fn roster(config: RosterConfig) -> Result<(), ServerError> {
    let in_addr = SocketAddr::new(config.address, config.port);
    let router = app::router().with_state(AppState::new(Db::new(storage(&config))));

    info!("Listening on http://{}", in_addr);

    axum::Server::try_bind(&in_addr)?
        .serve(router.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("received shutdown signal");
}
