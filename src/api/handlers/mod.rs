use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};

use crate::chat::{ChatClient, RelayError};
use crate::db::Database;
use crate::models::{ChatAnswer, ChatRequest, CreateNoteInput, Note};
use crate::notes::{self, SubmitError};

/// Listing cap: at most this many notes per response, newest first.
const LIST_LIMIT: u32 = 100;

// ============================================================
// Error Handling
// ============================================================

type ErrorResponse = (StatusCode, Json<serde_json::Value>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
}

/// Log a storage error and return a sanitized 500 to the client.
/// The full error is logged server-side; clients only see a generic message.
fn storage_error(e: impl std::fmt::Display) -> ErrorResponse {
    tracing::error!("Storage error: {}", e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

// ============================================================
// Greeting and static page
// ============================================================

pub async fn ask() -> impl IntoResponse {
    Json("Hello World")
}

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../../assets/index.html"))
}

// ============================================================
// Tweets
// ============================================================

pub async fn list_tweets(
    State(db): State<Database>,
) -> Result<Json<Vec<Note>>, ErrorResponse> {
    db.list_recent_notes(LIST_LIMIT)
        .map(Json)
        .map_err(storage_error)
}

pub async fn create_tweet(
    State(db): State<Database>,
    Json(input): Json<CreateNoteInput>,
) -> Result<(StatusCode, Json<Note>), ErrorResponse> {
    match notes::submit(&db, &input.author, &input.text) {
        Ok(note) => Ok((StatusCode::CREATED, Json(note))),
        Err(SubmitError::Validation(e)) => {
            Err(error_response(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(SubmitError::Storage(e)) => Err(storage_error(e)),
    }
}

// ============================================================
// Chat
// ============================================================

pub async fn chat(
    State(chat): State<ChatClient>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatAnswer>, ErrorResponse> {
    match chat.relay(payload).await {
        Ok(answer) => Ok(Json(ChatAnswer { answer })),
        Err(e @ RelayError::BadRequest) => {
            Err(error_response(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(RelayError::Upstream(detail)) => {
            tracing::error!("Chat relay failed: {}", detail);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, detail))
        }
    }
}
