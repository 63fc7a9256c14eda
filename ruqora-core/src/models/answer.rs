use serde::{Deserialize, Serialize};

use crate::models::user::Author;

/// Risposta esposta sul wire. Appartiene sempre a una sola domanda
/// (questionId) e non cambia mai domanda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub answer_id: String,
    pub question_id: String,
    pub content: String,
    pub author: Author,
    pub created_at: String, // RFC3339 UTC
    pub upvotes: Vec<String>,   // userId
    pub downvotes: Vec<String>, // userId
}

impl Answer {
    /// Punteggio mostrato al client: upvotes meno downvotes.
    pub fn score(&self) -> i64 {
        self.upvotes.len() as i64 - self.downvotes.len() as i64
    }
}
