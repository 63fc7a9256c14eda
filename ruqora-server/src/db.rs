use anyhow::Context;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

// Dato un percorso di file, restituisce un URL SQLite valido. Crea le directory genitrici se non esistono.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    Ok(format!("sqlite:///{}", s))
}

/// Crea un DB URL SQLite leggendo la variabile d'ambiente DATABASE_URL.
/// Se non è impostata, usa "ruqora.db" nella directory corrente.
pub fn build_sqlite_url() -> anyhow::Result<String> {
    let raw = std::env::var("DATABASE_URL").unwrap_or_else(|_| "ruqora.db".to_string());
    if raw == "sqlite::memory:" {
        return Ok(raw);
    }
    // Rimuovi il prefisso "sqlite://" se presente, per ottenere il percorso del file.
    let path_part = if raw.starts_with("sqlite://") {
        raw.trim_start_matches("sqlite:///")
            .trim_start_matches("sqlite://")
            .to_string()
    } else {
        raw
    };
    sqlite_url_for_path(&PathBuf::from(path_part))
}

// Connect to the database and return a connection pool.
pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePool::connect(db_url)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Esegue le migrazioni del database. Crea le tabelle se non esistono.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    // Enable foreign keys (SQLite)
    sqlx::query("PRAGMA foreign_keys = ON;")
        .execute(pool)
        .await
        .context("enable foreign_keys")?;

    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id       TEXT PRIMARY KEY,
            username      TEXT NOT NULL UNIQUE,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            token         TEXT,
            created_at    TEXT NOT NULL
        );"#,
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            question_id TEXT PRIMARY KEY,
            author_id   TEXT NOT NULL,
            title       TEXT NOT NULL,
            content     TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            FOREIGN KEY(author_id) REFERENCES users(user_id)
        );"#,
        r#"
        CREATE TABLE IF NOT EXISTS answers (
            answer_id   TEXT PRIMARY KEY,
            question_id TEXT NOT NULL,
            author_id   TEXT NOT NULL,
            content     TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            FOREIGN KEY(question_id) REFERENCES questions(question_id),
            FOREIGN KEY(author_id)   REFERENCES users(user_id)
        );"#,
        // Un voto è una riga per coppia (elemento, utente): la chiave primaria
        // composta garantisce al massimo un voto per utente su ogni elemento.
        // vote_type vale +1 (upvote) oppure -1 (downvote).
        r#"
        CREATE TABLE IF NOT EXISTS question_votes (
            question_id TEXT NOT NULL,
            user_id     TEXT NOT NULL,
            vote_type   INTEGER NOT NULL CHECK (vote_type IN (1, -1)),
            PRIMARY KEY(question_id, user_id),
            FOREIGN KEY(question_id) REFERENCES questions(question_id),
            FOREIGN KEY(user_id)     REFERENCES users(user_id)
        );"#,
        r#"
        CREATE TABLE IF NOT EXISTS answer_votes (
            answer_id TEXT NOT NULL,
            user_id   TEXT NOT NULL,
            vote_type INTEGER NOT NULL CHECK (vote_type IN (1, -1)),
            PRIMARY KEY(answer_id, user_id),
            FOREIGN KEY(answer_id) REFERENCES answers(answer_id),
            FOREIGN KEY(user_id)   REFERENCES users(user_id)
        );"#,
        r#"CREATE INDEX IF NOT EXISTS idx_answers_question ON answers(question_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_questions_author ON questions(author_id);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_answers_author   ON answers(author_id);"#,
    ];
    // applica ogni statement di migrazione
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| format!("apply migration: {}", &s[..s.len().min(40)].replace('\n', " ")))?;
    }
    Ok(())
}
