pub mod http;

// Re-export comodi
pub use http::{
    CreateAnswerRequest, CreateQuestionRequest, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, UserStats, VoteRequest, VoteResponse,
};
