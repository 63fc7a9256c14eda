use serde::{Deserialize, Serialize};

/// Direzione di un voto su una domanda o risposta.
/// Sul wire viaggia come "upvote" / "downvote".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    /// Rappresentazione persistita: +1 per upvote, -1 per downvote.
    /// Il punteggio di un elemento è quindi la somma dei vote_type.
    pub fn as_i64(self) -> i64 {
        match self {
            VoteType::Upvote => 1,
            VoteType::Downvote => -1,
        }
    }

    /// Inverso di [`VoteType::as_i64`]; valori diversi da +1/-1 non sono voti.
    pub fn from_i64(value: i64) -> Option<VoteType> {
        match value {
            1 => Some(VoteType::Upvote),
            -1 => Some(VoteType::Downvote),
            _ => None,
        }
    }
}
