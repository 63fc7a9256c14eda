use ruqora_core::{new_id, now_timestamp, Answer, Author, Question, User, VoteType};
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};

/// Ordinamento delle liste di domande.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// createdAt decrescente (default).
    #[default]
    Recent,
    /// punteggio (upvotes - downvotes) decrescente, createdAt come spareggio.
    Popular,
}

impl SortOrder {
    // valori sconosciuti ricadono su Recent
    pub fn parse(value: Option<&str>) -> SortOrder {
        match value {
            Some("popular") => SortOrder::Popular,
            _ => SortOrder::Recent,
        }
    }
}

// Riga di domanda con lo username dell'autore già risolto via JOIN.
#[derive(sqlx::FromRow)]
struct QuestionRow {
    question_id: String,
    title: String,
    content: String,
    author_id: String,
    author_username: String,
    created_at: String,
}

#[derive(sqlx::FromRow)]
struct AnswerRow {
    answer_id: String,
    question_id: String,
    content: String,
    author_id: String,
    author_username: String,
    created_at: String,
}

#[derive(sqlx::FromRow)]
struct VoteRow {
    user_id: String,
    vote_type: i64,
}

#[derive(sqlx::FromRow)]
struct AnswerVoteRow {
    answer_id: String,
    user_id: String,
    vote_type: i64,
}

const QUESTION_COLUMNS: &str = "q.question_id, q.title, q.content, q.author_id, \
     u.username AS author_username, q.created_at";

/// Inserisce la domanda e restituisce la sua rappresentazione completa
/// (appena creata: nessuna risposta, nessun voto).
pub async fn create_question(
    pool: &SqlitePool,
    author: &User,
    title: &str,
    content: &str,
) -> ApiResult<Question> {
    let question_id = new_id();
    let created_at = now_timestamp();

    sqlx::query(
        "INSERT INTO questions (question_id, author_id, title, content, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&question_id)
    .bind(&author.user_id)
    .bind(title)
    .bind(content)
    .bind(&created_at)
    .execute(pool)
    .await?;

    Ok(Question {
        question_id,
        title: title.to_string(),
        content: content.to_string(),
        author: Author {
            user_id: author.user_id.clone(),
            username: author.username.clone(),
        },
        created_at,
        answers: Vec::new(),
        upvotes: Vec::new(),
        downvotes: Vec::new(),
    })
}

/// Carica una domanda completa di risposte e insiemi di voti.
/// Restituisce 404 "Question not found" se l'id non esiste.
pub async fn get_question(pool: &SqlitePool, question_id: &str) -> ApiResult<Question> {
    let sql = format!(
        "SELECT {QUESTION_COLUMNS} FROM questions q \
         JOIN users u ON u.user_id = q.author_id \
         WHERE q.question_id = ?"
    );
    let row = sqlx::query_as::<_, QuestionRow>(&sql)
        .bind(question_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Question not found"))?;
    hydrate(pool, row).await
}

/// Tutte le domande, con l'ordinamento richiesto.
pub async fn list_questions(pool: &SqlitePool, sort: SortOrder) -> ApiResult<Vec<Question>> {
    let order_by = match sort {
        SortOrder::Recent => "q.created_at DESC, q.question_id DESC",
        /* il punteggio è la somma dei vote_type (+1/-1); COALESCE copre
        le domande senza alcun voto */
        SortOrder::Popular => {
            "COALESCE((SELECT SUM(v.vote_type) FROM question_votes v \
              WHERE v.question_id = q.question_id), 0) DESC, \
             q.created_at DESC, q.question_id DESC"
        }
    };
    let sql = format!(
        "SELECT {QUESTION_COLUMNS} FROM questions q \
         JOIN users u ON u.user_id = q.author_id \
         ORDER BY {order_by}"
    );
    let rows = sqlx::query_as::<_, QuestionRow>(&sql).fetch_all(pool).await?;
    hydrate_all(pool, rows).await
}

/// Le domande di un autore, dalla più recente.
pub async fn list_questions_by_author(
    pool: &SqlitePool,
    author_id: &str,
) -> ApiResult<Vec<Question>> {
    let sql = format!(
        "SELECT {QUESTION_COLUMNS} FROM questions q \
         JOIN users u ON u.user_id = q.author_id \
         WHERE q.author_id = ? \
         ORDER BY q.created_at DESC, q.question_id DESC"
    );
    let rows = sqlx::query_as::<_, QuestionRow>(&sql)
        .bind(author_id)
        .fetch_all(pool)
        .await?;
    hydrate_all(pool, rows).await
}

/// Ricerca per sottostringa, case-insensitive, su titolo o contenuto.
/// Scansione lineare: instr(lower(colonna), lower(termine)) > 0.
pub async fn search_questions(pool: &SqlitePool, query: &str) -> ApiResult<Vec<Question>> {
    let sql = format!(
        "SELECT {QUESTION_COLUMNS} FROM questions q \
         JOIN users u ON u.user_id = q.author_id \
         WHERE instr(lower(q.title), lower(?)) > 0 \
            OR instr(lower(q.content), lower(?)) > 0 \
         ORDER BY q.created_at DESC, q.question_id DESC"
    );
    let rows = sqlx::query_as::<_, QuestionRow>(&sql)
        .bind(query)
        .bind(query)
        .fetch_all(pool)
        .await?;
    hydrate_all(pool, rows).await
}

pub async fn question_exists(pool: &SqlitePool, question_id: &str) -> ApiResult<bool> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE question_id = ?")
        .bind(question_id)
        .fetch_one(pool)
        .await?;
    Ok(n > 0)
}

/// La risposta esiste ed appartiene a quella domanda?
/// (la rotta di voto annidata distingue i due 404)
pub async fn answer_in_question(
    pool: &SqlitePool,
    question_id: &str,
    answer_id: &str,
) -> ApiResult<bool> {
    let n: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM answers WHERE answer_id = ? AND question_id = ?",
    )
    .bind(answer_id)
    .bind(question_id)
    .fetch_one(pool)
    .await?;
    Ok(n > 0)
}

/// Aggiunge una risposta in coda alla domanda (le risposte restano in
/// ordine di invio). Restituisce 404 se la domanda non esiste.
pub async fn append_answer(
    pool: &SqlitePool,
    question_id: &str,
    author: &User,
    content: &str,
) -> ApiResult<Answer> {
    if !question_exists(pool, question_id).await? {
        return Err(ApiError::not_found("Question not found"));
    }

    let answer_id = new_id();
    let created_at = now_timestamp();

    sqlx::query(
        "INSERT INTO answers (answer_id, question_id, author_id, content, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&answer_id)
    .bind(question_id)
    .bind(&author.user_id)
    .bind(content)
    .bind(&created_at)
    .execute(pool)
    .await?;

    Ok(Answer {
        answer_id,
        question_id: question_id.to_string(),
        content: content.to_string(),
        author: Author {
            user_id: author.user_id.clone(),
            username: author.username.clone(),
        },
        created_at,
        upvotes: Vec::new(),
        downvotes: Vec::new(),
    })
}

async fn hydrate_all(pool: &SqlitePool, rows: Vec<QuestionRow>) -> ApiResult<Vec<Question>> {
    let mut questions = Vec::with_capacity(rows.len());
    for row in rows {
        questions.push(hydrate(pool, row).await?);
    }
    Ok(questions)
}

/*
    Assembla la rappresentazione completa di una domanda:
    - risposte in ordine di invio, con autore risolto;
    - insiemi upvotes/downvotes come liste di userId (ordinate per
      userId, così la rappresentazione è deterministica);
    - gli insiemi di voti di tutte le risposte in una sola query,
      raggruppati per answer_id.
*/
async fn hydrate(pool: &SqlitePool, row: QuestionRow) -> ApiResult<Question> {
    let answer_rows = sqlx::query_as::<_, AnswerRow>(
        "SELECT a.answer_id, a.question_id, a.content, a.author_id, \
                u.username AS author_username, a.created_at \
         FROM answers a \
         JOIN users u ON u.user_id = a.author_id \
         WHERE a.question_id = ? \
         ORDER BY a.created_at ASC, a.rowid ASC",
    )
    .bind(&row.question_id)
    .fetch_all(pool)
    .await?;

    let question_votes = sqlx::query_as::<_, VoteRow>(
        "SELECT user_id, vote_type FROM question_votes \
         WHERE question_id = ? ORDER BY user_id",
    )
    .bind(&row.question_id)
    .fetch_all(pool)
    .await?;
    let (upvotes, downvotes) = split_votes(question_votes);

    let answer_votes = sqlx::query_as::<_, AnswerVoteRow>(
        "SELECT v.answer_id, v.user_id, v.vote_type \
         FROM answer_votes v \
         JOIN answers a ON a.answer_id = v.answer_id \
         WHERE a.question_id = ? \
         ORDER BY v.user_id",
    )
    .bind(&row.question_id)
    .fetch_all(pool)
    .await?;
    let mut votes_by_answer: HashMap<String, (Vec<String>, Vec<String>)> = HashMap::new();
    for v in answer_votes {
        let entry = votes_by_answer.entry(v.answer_id).or_default();
        match VoteType::from_i64(v.vote_type) {
            Some(VoteType::Upvote) => entry.0.push(v.user_id),
            Some(VoteType::Downvote) => entry.1.push(v.user_id),
            None => {}
        }
    }

    let answers = answer_rows
        .into_iter()
        .map(|a| {
            let (up, down) = votes_by_answer.remove(&a.answer_id).unwrap_or_default();
            Answer {
                answer_id: a.answer_id,
                question_id: a.question_id,
                content: a.content,
                author: Author {
                    user_id: a.author_id,
                    username: a.author_username,
                },
                created_at: a.created_at,
                upvotes: up,
                downvotes: down,
            }
        })
        .collect();

    Ok(Question {
        question_id: row.question_id,
        title: row.title,
        content: row.content,
        author: Author {
            user_id: row.author_id,
            username: row.author_username,
        },
        created_at: row.created_at,
        answers,
        upvotes,
        downvotes,
    })
}

fn split_votes(rows: Vec<VoteRow>) -> (Vec<String>, Vec<String>) {
    let mut upvotes = Vec::new();
    let mut downvotes = Vec::new();
    for v in rows {
        match VoteType::from_i64(v.vote_type) {
            Some(VoteType::Upvote) => upvotes.push(v.user_id),
            Some(VoteType::Downvote) => downvotes.push(v.user_id),
            None => {}
        }
    }
    (upvotes, downvotes)
}
