use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use diesel::result::Error as DieselError;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::enrich::EnrichmentError;
use crate::schema::flashcards;

/// Raw flashcard row; `definitions` is stored as a JSON array string.
#[derive(Queryable, Selectable)]
#[diesel(table_name = flashcards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FlashcardRow {
    pub id: i32,
    pub chinese: String,
    pub pinyin: String,
    pub definitions: String,
    pub user_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = flashcards)]
pub struct NewFlashcard<'a> {
    pub chinese: &'a str,
    pub pinyin: &'a str,
    pub definitions: &'a str,
    pub user_id: i32,
}

/// Flashcard as the API exposes it.
#[derive(Debug, Serialize)]
pub struct Flashcard {
    pub id: i32,
    pub chinese: String,
    pub pinyin: String,
    pub definitions: Vec<String>,
}

impl From<FlashcardRow> for Flashcard {
    fn from(row: FlashcardRow) -> Self {
        let definitions = serde_json::from_str(&row.definitions).unwrap_or_else(|e| {
            log::warn!("Corrupt definitions for flashcard {}: {}", row.id, e);
            Vec::new()
        });

        Flashcard {
            id: row.id,
            chinese: row.chinese,
            pinyin: row.pinyin,
            definitions,
        }
    }
}

/// Request payload for the idempotent get-or-create endpoint
#[derive(Deserialize)]
pub struct CreateFlashcardRequest {
    pub chinese: String,
}

#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("Not logged in")]
    Unauthorized,
    #[error("Flashcard not found")]
    NotFound,
    #[error("Enrichment unavailable: {0}")]
    Enrichment(#[from] EnrichmentError),
    #[error("Database error")]
    DatabaseError(#[from] DieselError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for FlashcardError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            FlashcardError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            FlashcardError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            FlashcardError::Enrichment(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            FlashcardError::DatabaseError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            ),
            FlashcardError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
        };

        let body = json!({
            "error": message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}
