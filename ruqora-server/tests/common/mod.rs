use anyhow::Result;
use ruqora_core::{new_id, now_timestamp, User};
use ruqora_server::auth::{hash_password, insert_user};
use ruqora_server::{connect_pool, run_migrations, sqlite_url_for_path};
use sqlx::SqlitePool;
use tempfile::TempDir;

// Pool su un file SQLite temporaneo con lo schema applicato.
// Il TempDir va tenuto vivo per tutta la durata del test: alla sua
// drop la directory (e il file del DB) spariscono.
pub async fn setup_pool() -> Result<(TempDir, SqlitePool)> {
    let td = TempDir::new()?;
    let url = sqlite_url_for_path(td.path().join("ruqora.db").as_path())?;
    let pool = connect_pool(&url).await?;
    run_migrations(&pool).await?;
    Ok((td, pool))
}

// Utente già registrato, con token "token-<username>".
pub async fn seed_user(pool: &SqlitePool, username: &str) -> Result<User> {
    let user = User {
        user_id: new_id(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        created_at: now_timestamp(),
    };
    let token = format!("token-{username}");
    insert_user(pool, &user, &hash_password("password123"), &token).await?;
    Ok(user)
}
