use ruqora_core::UserStats;
use sqlx::SqlitePool;

use crate::error::ApiResult;

/// Statistiche del profilo calcolate in un solo statement, quindi su un
/// solo snapshot del database: niente conteggi incoerenti tra loro.
/// totalUpvotes conta gli upvote ricevuti sulle domande dell'utente;
/// i voti sulle sue risposte non entrano nel totale.
pub async fn user_stats(pool: &SqlitePool, user_id: &str) -> ApiResult<UserStats> {
    let (questions_count, answers_count, total_upvotes): (i64, i64, i64) = sqlx::query_as(
        "SELECT \
            (SELECT COUNT(*) FROM questions WHERE author_id = ?), \
            (SELECT COUNT(*) FROM answers WHERE author_id = ?), \
            (SELECT COUNT(*) FROM question_votes v \
               JOIN questions q ON q.question_id = v.question_id \
              WHERE q.author_id = ? AND v.vote_type = 1)",
    )
    .bind(user_id)
    .bind(user_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(UserStats {
        questions_count,
        answers_count,
        total_upvotes,
    })
}
