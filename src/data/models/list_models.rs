use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDateTime;
use diesel::result::Error as DieselError;
use diesel::{Queryable, Selectable};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::data::models::Flashcard;
use crate::schema::lists;

#[derive(Queryable, Selectable, Serialize)]
#[diesel(table_name = lists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct List {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
    pub modified_at: NaiveDateTime,
}

#[derive(Deserialize)]
pub struct CreateListRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Partial update; absent fields are left untouched.
#[derive(Deserialize)]
pub struct UpdateListRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct ListWithFlashcards {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
    pub modified_at: NaiveDateTime,
    pub flashcards: Vec<Flashcard>,
}

/// Standard API response format
#[derive(Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ListError {
    #[error("Not logged in")]
    Unauthorized,
    #[error("List not found")]
    NotFound,
    #[error("List or flashcard not found")]
    MemberNotFound,
    #[error("Database error")]
    DatabaseError(#[from] DieselError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ListError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ListError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ListError::MemberNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ListError::DatabaseError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            ),
            ListError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
        };

        let body = json!({
            "error": message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}
