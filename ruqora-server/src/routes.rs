use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use crate::controllers;
use crate::{health_with_pool, AppState};

pub fn router(state: Arc<AppState>) -> Router {
    // il client gira su un'origine diversa in sviluppo
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(|Extension(state): Extension<Arc<AppState>>| async move {
            health_with_pool(&state.pool).await
        }))
        .route("/api/auth/register", post(controllers::register))
        .route("/api/auth/login", post(controllers::login))
        .route("/api/auth/me", get(controllers::me))
        .route("/api/questions", get(controllers::list_questions).post(controllers::create_question))
        // stesso nome di parametro su tutte le rotte sovrapposte, altrimenti
        // il router rifiuta la registrazione
        .route("/api/questions/:question_id", get(controllers::get_question))
        .route("/api/questions/:question_id/vote", post(controllers::vote_question))
        .route("/api/questions/:question_id/answers", post(controllers::create_answer))
        .route(
            "/api/questions/:question_id/answers/:answer_id/vote",
            post(controllers::vote_answer),
        )
        .route("/api/users/stats", get(controllers::user_stats))
        .route("/api/users/questions", get(controllers::user_questions))
        .route("/api/search", get(controllers::search))
        .layer(cors)
        .layer(Extension(state))
}
