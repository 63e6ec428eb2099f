use axum::{
    extract::{Json, Path, State},
    routing::get,
    Router,
};
use tower_sessions::Session;

use crate::data::models::{ApiResponse, CreateFlashcardRequest, Flashcard, FlashcardError};
use crate::services::FlashcardService;
use crate::utils::get_current_user_id;

pub async fn get_flashcards(
    State(service): State<FlashcardService>,
    session: Session,
) -> Result<Json<Vec<Flashcard>>, FlashcardError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(FlashcardError::Unauthorized)?;

    Ok(Json(service.get_all(user_id).await?))
}

pub async fn get_flashcard(
    State(service): State<FlashcardService>,
    session: Session,
    Path(chinese): Path<String>,
) -> Result<Json<Flashcard>, FlashcardError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(FlashcardError::Unauthorized)?;

    Ok(Json(service.get_by_chinese(user_id, chinese).await?))
}

/// Idempotent POST: returns the existing card or creates it after
/// enrichment.
pub async fn get_or_create_flashcard(
    State(service): State<FlashcardService>,
    session: Session,
    Json(payload): Json<CreateFlashcardRequest>,
) -> Result<Json<Flashcard>, FlashcardError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(FlashcardError::Unauthorized)?;

    Ok(Json(service.get_or_create(user_id, payload.chinese).await?))
}

pub async fn delete_flashcard(
    State(service): State<FlashcardService>,
    session: Session,
    Path(flashcard_id): Path<i32>,
) -> Result<Json<ApiResponse>, FlashcardError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(FlashcardError::Unauthorized)?;

    if !service.delete(user_id, flashcard_id).await? {
        return Err(FlashcardError::NotFound);
    }

    Ok(Json(ApiResponse {
        success: true,
        message: "Flashcard deleted successfully".to_string(),
    }))
}

pub fn flashcard_router(service: FlashcardService) -> Router {
    Router::new()
        .route("/", get(get_flashcards).post(get_or_create_flashcard))
        .route("/{chinese}", get(get_flashcard).delete(delete_flashcard))
        .with_state(service)
}
