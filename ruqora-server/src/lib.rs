use axum::http::StatusCode;
use sqlx::SqlitePool;

pub mod auth;
pub mod controllers;
pub mod db;
pub mod error;
pub mod routes;
pub mod stats;
pub mod store;
pub mod votes;

// Re-export dei passi di avvio, così i call site restano compatti.
pub use db::{build_sqlite_url, connect_pool, run_migrations, sqlite_url_for_path};

/// Stato condiviso tra gli handler: solo il pool di connessioni.
/// Tutto lo stato applicativo vive nel database.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// Controlla lo stato di salute del database tentando di acquisire una connessione dal pool.
pub async fn health_with_pool(pool: &SqlitePool) -> StatusCode {
    match pool.acquire().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
