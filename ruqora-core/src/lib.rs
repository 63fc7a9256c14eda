//! ruqora-core: tipi del contratto wire (modelli, DTO HTTP, corpo d'errore).
//! Solo dati e serde, niente I/O: il server li usa direttamente e qualunque
//! client Rust può riusarli.

pub mod models;
pub mod protocol;
pub mod error;
pub mod utils;

// Re-export utili per ridurre i percorsi nei crate client/server
pub use error::ErrorBody;
pub use models::{answer::Answer, question::Question, user::Author, user::User, vote::VoteType};
pub use protocol::http::{
    CreateAnswerRequest, CreateQuestionRequest, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, UserStats, VoteRequest, VoteResponse,
};
pub use utils::{new_id, now_timestamp};
