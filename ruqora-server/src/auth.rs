use axum::http::{header::AUTHORIZATION, HeaderMap};
use ruqora_core::{new_id, User};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use crate::error::{ApiError, ApiResult};

/// Digest SHA-256 esadecimale della password.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

// Riga utente come esposta sul wire (senza password_hash né token).
#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: String,
    username: String,
    email: String,
    created_at: String,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            user_id: r.user_id,
            username: r.username,
            email: r.email,
            created_at: r.created_at,
        }
    }
}

/// Riga utente con l'hash della password, per il confronto in fase di login.
#[derive(sqlx::FromRow)]
pub struct Credentials {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

// controllo se lo username o l'email esistono già
pub async fn username_or_email_taken(
    pool: &SqlitePool,
    username: &str,
    email: &str,
) -> ApiResult<bool> {
    let existing: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ? OR email = ?")
            .bind(username)
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(existing > 0)
}

pub async fn insert_user(
    pool: &SqlitePool,
    user: &User,
    password_hash: &str,
    token: &str,
) -> ApiResult<()> {
    sqlx::query(
        "INSERT INTO users (user_id, username, email, password_hash, token, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&user.user_id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(password_hash)
    .bind(token)
    .bind(&user.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

// cerca utente per email (il login identifica per email)
pub async fn credentials_for_email(
    pool: &SqlitePool,
    email: &str,
) -> ApiResult<Option<Credentials>> {
    let row = sqlx::query_as::<_, Credentials>(
        "SELECT user_id, username, email, password_hash, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Genera un token nuovo per l'utente e lo salva, invalidando il precedente.
pub async fn rotate_token(pool: &SqlitePool, user_id: &str) -> ApiResult<String> {
    let token = new_id();
    sqlx::query("UPDATE users SET token = ? WHERE user_id = ?")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(token)
}

pub async fn find_user_by_token(pool: &SqlitePool, token: &str) -> ApiResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT user_id, username, email, created_at FROM users WHERE token = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(User::from))
}

// Estrae il token dall'header "Authorization: Bearer <token>".
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// Risolve il chiamante autenticato dagli header della richiesta.
/// Header assente o malformato -> 401, token sconosciuto -> 403.
pub async fn require_user(pool: &SqlitePool, headers: &HeaderMap) -> ApiResult<User> {
    let token =
        bearer_token(headers).ok_or_else(|| ApiError::unauthorized("Access token required"))?;
    let user = find_user_by_token(pool, &token)
        .await?
        .ok_or_else(|| ApiError::forbidden("Invalid token"))?;
    Ok(user)
}
