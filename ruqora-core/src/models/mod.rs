pub mod user;
pub mod question;
pub mod answer;
pub mod vote;

// Re-export per comodità
pub use user::{Author, User};
pub use question::Question;
pub use answer::Answer;
pub use vote::VoteType;
