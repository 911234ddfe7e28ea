use axum::http::StatusCode;
use axum_test::TestServer;
use noteboard::api::{create_router, AppState};
use noteboard::chat::ChatClient;
use noteboard::db::Database;
use noteboard::models::{CreateNoteInput, Note};

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    // Unroutable upstream: chat tests that must not reach a provider
    let chat = ChatClient::new("http://127.0.0.1:1", "test-key");
    let app = create_router(AppState { db, chat });
    TestServer::new(app).expect("Failed to create test server")
}

mod ask {
    use super::*;

    #[tokio::test]
    async fn returns_hello_world() {
        let server = setup();

        let response = server.get("/ask").await;

        response.assert_status_ok();
        assert_eq!(response.json::<String>(), "Hello World");
    }
}

mod index {
    use super::*;

    #[tokio::test]
    async fn serves_the_note_board_page() {
        let server = setup();

        let response = server.get("/").await;

        response.assert_status_ok();
        let body = response.text();
        assert!(body.contains("<html"));
        assert!(body.contains("/api/tweets"));
    }
}

mod create_tweet {
    use super::*;

    #[tokio::test]
    async fn returns_created_note_with_generated_fields() {
        let server = setup();

        let response = server
            .post("/api/tweets")
            .json(&CreateNoteInput {
                author: "Ann".to_string(),
                text: "Hello".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let note: Note = response.json();
        assert_eq!(note.author, "Ann");
        assert_eq!(note.text, "Hello");
        assert!(note.id > 0);
    }

    #[tokio::test]
    async fn trims_surrounding_whitespace() {
        let server = setup();

        let response = server
            .post("/api/tweets")
            .json(&CreateNoteInput {
                author: "  Ann ".to_string(),
                text: " Hello ".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let note: Note = response.json();
        assert_eq!(note.author, "Ann");
        assert_eq!(note.text, "Hello");
    }

    #[tokio::test]
    async fn rejects_blank_author() {
        let server = setup();

        let response = server
            .post("/api/tweets")
            .json(&CreateNoteInput {
                author: "".to_string(),
                text: "Hi".to_string(),
            })
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "author and text are required");
    }

    #[tokio::test]
    async fn rejects_missing_fields() {
        let server = setup();

        let response = server
            .post("/api/tweets")
            .json(&serde_json::json!({ "author": "Ann" }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "author and text are required");
    }

    #[tokio::test]
    async fn rejects_over_length_text() {
        let server = setup();

        let response = server
            .post("/api/tweets")
            .json(&CreateNoteInput {
                author: "Ann".to_string(),
                text: "x".repeat(281),
            })
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "author<=50, text<=280");
    }

    #[tokio::test]
    async fn rejected_submissions_are_not_persisted() {
        let server = setup();

        server
            .post("/api/tweets")
            .json(&CreateNoteInput {
                author: "".to_string(),
                text: "Hi".to_string(),
            })
            .await
            .assert_status_bad_request();

        let notes: Vec<Note> = server.get("/api/tweets").await.json();
        assert!(notes.is_empty());
    }
}

mod list_tweets {
    use super::*;

    #[tokio::test]
    async fn returns_empty_list_when_no_tweets_exist() {
        let server = setup();

        let response = server.get("/api/tweets").await;

        response.assert_status_ok();
        let notes: Vec<Note> = response.json();
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn returns_tweets_newest_first() {
        let server = setup();

        for text in ["First", "Second", "Third"] {
            server
                .post("/api/tweets")
                .json(&CreateNoteInput {
                    author: "Ann".to_string(),
                    text: text.to_string(),
                })
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server.get("/api/tweets").await;

        response.assert_status_ok();
        let notes: Vec<Note> = response.json();
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0].text, "Third");
        assert_eq!(notes[2].text, "First");
    }
}

mod chat {
    use super::*;

    #[tokio::test]
    async fn rejects_payload_with_neither_messages_nor_prompt() {
        let server = setup();

        let response = server.post("/chat").json(&serde_json::json!({})).await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("messages or prompt"));
    }
}
