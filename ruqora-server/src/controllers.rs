use axum::{
    extract::{Extension, Path, Query},
    http::{HeaderMap, StatusCode},
    Json,
};
use ruqora_core::{
    new_id, now_timestamp, Answer, CreateAnswerRequest, CreateQuestionRequest, LoginRequest,
    LoginResponse, Question, RegisterRequest, RegisterResponse, User, UserStats, VoteRequest,
    VoteResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::auth;
use crate::error::{ApiError, ApiResult};
use crate::stats;
use crate::store::{self, SortOrder};
use crate::votes::{self, VoteTarget};
use crate::AppState;

/// Parametri di GET /api/questions
#[derive(Debug, Deserialize)]
pub struct ListQuestionsParams {
    pub sort: Option<String>,
}

/// Parametri di GET /api/search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Handler per POST /api/auth/register
pub async fn register(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    // i campi assenti arrivano come stringa vuota (serde default)
    if req.username.is_empty() || req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::validation(
            "username, email and password are required",
        ));
    }

    // controllo se lo username o l'email esistono già
    if auth::username_or_email_taken(&state.pool, &req.username, &req.email).await? {
        return Err(ApiError::validation("User already exists"));
    }

    // genera id utente e token, hash della password
    let user = User {
        user_id: new_id(),
        username: req.username.clone(),
        email: req.email.clone(),
        created_at: now_timestamp(),
    };
    let token = new_id();
    let password_hash = auth::hash_password(&req.password);

    auth::insert_user(&state.pool, &user, &password_hash, &token).await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { token, user })))
}

/// Handler per POST /api/auth/login
pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    // risposta uniforme: non riveliamo se l'email esiste
    let creds = auth::credentials_for_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if auth::hash_password(&req.password) != creds.password_hash {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    // genera token nuovo e aggiorna (il precedente smette di valere)
    let token = auth::rotate_token(&state.pool, &creds.user_id).await?;

    let user = User {
        user_id: creds.user_id,
        username: creds.username,
        email: creds.email,
        created_at: creds.created_at,
    };
    Ok(Json(LoginResponse { token, user }))
}

/// Handler per GET /api/auth/me
pub async fn me(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<User>> {
    let user = auth::require_user(&state.pool, &headers).await?;
    Ok(Json(user))
}

/// Handler per GET /api/questions?sort=recent|popular
pub async fn list_questions(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ListQuestionsParams>,
) -> ApiResult<Json<Vec<Question>>> {
    let sort = SortOrder::parse(params.sort.as_deref());
    let questions = store::list_questions(&state.pool, sort).await?;
    Ok(Json(questions))
}

/// Handler per GET /api/questions/:question_id
pub async fn get_question(
    Extension(state): Extension<Arc<AppState>>,
    Path(question_id): Path<String>,
) -> ApiResult<Json<Question>> {
    let question = store::get_question(&state.pool, &question_id).await?;
    Ok(Json(question))
}

/// Handler per POST /api/questions
pub async fn create_question(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateQuestionRequest>,
) -> ApiResult<(StatusCode, Json<Question>)> {
    let user = auth::require_user(&state.pool, &headers).await?;

    if req.title.is_empty() || req.content.is_empty() {
        return Err(ApiError::validation("title and content are required"));
    }

    let question = store::create_question(&state.pool, &user, &req.title, &req.content).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// Handler per POST /api/questions/:question_id/vote
pub async fn vote_question(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Path(question_id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let user = auth::require_user(&state.pool, &headers).await?;

    if !store::question_exists(&state.pool, &question_id).await? {
        return Err(ApiError::not_found("Question not found"));
    }

    let resp = votes::cast_vote(
        &state.pool,
        VoteTarget::Question(&question_id),
        &user.user_id,
        req.vote_type,
    )
    .await?;
    Ok(Json(resp))
}

/// Handler per POST /api/questions/:question_id/answers
pub async fn create_answer(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Path(question_id): Path<String>,
    Json(req): Json<CreateAnswerRequest>,
) -> ApiResult<(StatusCode, Json<Answer>)> {
    let user = auth::require_user(&state.pool, &headers).await?;

    if req.content.is_empty() {
        return Err(ApiError::validation("content is required"));
    }

    let answer = store::append_answer(&state.pool, &question_id, &user, &req.content).await?;
    Ok((StatusCode::CREATED, Json(answer)))
}

/// Handler per POST /api/questions/:question_id/answers/:answer_id/vote
pub async fn vote_answer(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Path((question_id, answer_id)): Path<(String, String)>,
    Json(req): Json<VoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let user = auth::require_user(&state.pool, &headers).await?;

    // i due 404 della rotta annidata: prima la domanda, poi la risposta
    if !store::question_exists(&state.pool, &question_id).await? {
        return Err(ApiError::not_found("Question not found"));
    }
    if !store::answer_in_question(&state.pool, &question_id, &answer_id).await? {
        return Err(ApiError::not_found("Answer not found"));
    }

    let resp = votes::cast_vote(
        &state.pool,
        VoteTarget::Answer(&answer_id),
        &user.user_id,
        req.vote_type,
    )
    .await?;
    Ok(Json(resp))
}

/// Handler per GET /api/users/stats
pub async fn user_stats(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<UserStats>> {
    let user = auth::require_user(&state.pool, &headers).await?;
    let stats = stats::user_stats(&state.pool, &user.user_id).await?;
    Ok(Json(stats))
}

/// Handler per GET /api/users/questions
pub async fn user_questions(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Question>>> {
    let user = auth::require_user(&state.pool, &headers).await?;
    let questions = store::list_questions_by_author(&state.pool, &user.user_id).await?;
    Ok(Json(questions))
}

/// Handler per GET /api/search?q=...
pub async fn search(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Question>>> {
    let q = params.q.unwrap_or_default();
    if q.is_empty() {
        return Err(ApiError::validation("Search query required"));
    }
    let questions = store::search_questions(&state.pool, &q).await?;
    Ok(Json(questions))
}
