use ruqora_core::{VoteResponse, VoteType};
use sqlx::SqlitePool;

use crate::error::ApiResult;

/*
    Registro dei voti. Un voto è una riga (elemento, utente, direzione) con
    chiave primaria (elemento, utente): al massimo un voto per utente su
    ogni elemento, in una sola direzione.

    L'automa per ogni coppia (elemento, utente):
      nessun voto  --up-->   upvote      upvote   --up-->   nessun voto
      nessun voto  --down--> downvote    downvote --down--> nessun voto
      upvote       --down--> downvote    downvote --up-->   upvote
*/

/// Elemento votabile. Domande e risposte seguono lo stesso automa,
/// su tabelle diverse.
#[derive(Debug, Clone, Copy)]
pub enum VoteTarget<'a> {
    Question(&'a str),
    Answer(&'a str),
}

impl VoteTarget<'_> {
    fn table(&self) -> &'static str {
        match self {
            VoteTarget::Question(_) => "question_votes",
            VoteTarget::Answer(_) => "answer_votes",
        }
    }

    fn id_column(&self) -> &'static str {
        match self {
            VoteTarget::Question(_) => "question_id",
            VoteTarget::Answer(_) => "answer_id",
        }
    }

    fn id(&self) -> &str {
        match self {
            VoteTarget::Question(id) | VoteTarget::Answer(id) => id,
        }
    }
}

/// Applica una transizione dell'automa e restituisce i conteggi aggiornati
/// più lo stato del chiamante. Due statement condizionali sulla riga
/// (elemento, utente), niente read-modify-write: utenti diversi toccano
/// righe diverse, quindi voti concorrenti non si perdono a vicenda.
pub async fn cast_vote(
    pool: &SqlitePool,
    target: VoteTarget<'_>,
    user_id: &str,
    vote_type: VoteType,
) -> ApiResult<VoteResponse> {
    let table = target.table();
    let id_column = target.id_column();

    // 1) stesso voto già presente -> il DELETE lo toglie (toggle off)
    let deleted = sqlx::query(&format!(
        "DELETE FROM {table} WHERE {id_column} = ? AND user_id = ? AND vote_type = ?"
    ))
    .bind(target.id())
    .bind(user_id)
    .bind(vote_type.as_i64())
    .execute(pool)
    .await?
    .rows_affected();

    // 2) altrimenti upsert: primo voto, oppure cambio di direzione
    //    (la chiave primaria fa sostituire la riga opposta)
    let user_vote = if deleted == 1 {
        None
    } else {
        sqlx::query(&format!(
            "INSERT OR REPLACE INTO {table} ({id_column}, user_id, vote_type) VALUES (?, ?, ?)"
        ))
        .bind(target.id())
        .bind(user_id)
        .bind(vote_type.as_i64())
        .execute(pool)
        .await?;
        Some(vote_type)
    };

    tally(pool, target, user_vote).await
}

// Rilegge i conteggi dell'elemento dopo la transizione.
async fn tally(
    pool: &SqlitePool,
    target: VoteTarget<'_>,
    user_vote: Option<VoteType>,
) -> ApiResult<VoteResponse> {
    let table = target.table();
    let id_column = target.id_column();

    // SUM su insieme vuoto è NULL, da cui il COALESCE
    let (upvotes, downvotes): (i64, i64) = sqlx::query_as(&format!(
        "SELECT COALESCE(SUM(vote_type = 1), 0), COALESCE(SUM(vote_type = -1), 0) \
         FROM {table} WHERE {id_column} = ?"
    ))
    .bind(target.id())
    .fetch_one(pool)
    .await?;

    Ok(VoteResponse {
        upvotes,
        downvotes,
        score: upvotes - downvotes,
        user_vote,
    })
}
