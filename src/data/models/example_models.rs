use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDateTime;
use diesel::result::Error as DieselError;
use diesel::{Queryable, Selectable};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::schema::examples;

#[derive(Queryable, Selectable, Serialize)]
#[diesel(table_name = examples)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Example {
    pub id: i32,
    pub flashcard_id: i32,
    pub example_text: String,
    pub created_at: NaiveDateTime,
}

/// Request payload for generating examples
#[derive(Deserialize)]
pub struct GenerateExamplesRequest {
    pub flashcard_id: i32,
    pub count: u32,
}

#[derive(Serialize)]
pub struct ExamplesResponse {
    pub examples: Vec<Example>,
    pub total: usize,
    pub flashcard_chinese: String,
}

/// Combined flashcard + examples view; an empty examples list is a
/// plain success here, unlike the saved-examples endpoint.
#[derive(Serialize)]
pub struct FlashcardWithExamples {
    pub id: i32,
    pub chinese: String,
    pub pinyin: String,
    pub definitions: Vec<String>,
    pub examples: Vec<String>,
    pub examples_count: usize,
}

#[derive(Error, Debug)]
pub enum ExampleError {
    #[error("Not logged in")]
    Unauthorized,
    #[error("Flashcard not found")]
    FlashcardNotFound,
    #[error(
        "No examples available for flashcard '{0}'. Generate some examples first."
    )]
    NoExamplesYet(String),
    #[error("Failed to generate examples: {0}")]
    GenerationFailed(String),
    #[error("count must be between 1 and 10")]
    InvalidCount,
    #[error("Database error")]
    DatabaseError(#[from] DieselError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ExampleError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ExampleError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ExampleError::FlashcardNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ExampleError::NoExamplesYet(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ExampleError::GenerationFailed(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            ExampleError::InvalidCount => (StatusCode::BAD_REQUEST, self.to_string()),
            ExampleError::DatabaseError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            ),
            ExampleError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
        };

        let body = json!({
            "error": message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}
