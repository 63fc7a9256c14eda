use serde::{Deserialize, Serialize};

/// Corpo JSON di ogni risposta d'errore dell'API: { "message": "..." }.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody { message: message.into() }
    }
}
