mod handlers;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::chat::ChatClient;
use crate::db::Database;

/// Shared application state: the store handle and the provider client,
/// both built once at startup and passed in explicitly.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub chat: ChatClient,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for ChatClient {
    fn from_ref(state: &AppState) -> Self {
        state.chat.clone()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/ask", get(handlers::ask))
        .route("/api/tweets", get(handlers::list_tweets))
        .route("/api/tweets", post(handlers::create_tweet))
        .route("/chat", post(handlers::chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
