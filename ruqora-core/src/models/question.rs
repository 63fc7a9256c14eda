use serde::{Deserialize, Serialize};

use crate::models::{answer::Answer, user::Author};

/// Domanda esposta sul wire, con le risposte annidate (ordinate per
/// createdAt crescente) e gli insiemi di voti come liste di userId.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_id: String,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub created_at: String, // RFC3339 UTC
    pub answers: Vec<Answer>,
    pub upvotes: Vec<String>,   // userId
    pub downvotes: Vec<String>, // userId
}

impl Question {
    /// Punteggio mostrato al client: upvotes meno downvotes.
    pub fn score(&self) -> i64 {
        self.upvotes.len() as i64 - self.downvotes.len() as i64
    }
}
