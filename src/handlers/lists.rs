use axum::{
    extract::{Json, Path, State},
    routing::get,
    Router,
};
use tower_sessions::Session;

use crate::data::models::{
    ApiResponse, CreateListRequest, List, ListError, ListWithFlashcards, UpdateListRequest,
};
use crate::services::ListService;
use crate::utils::get_current_user_id;

pub async fn get_lists(
    State(service): State<ListService>,
    session: Session,
) -> Result<Json<Vec<List>>, ListError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(ListError::Unauthorized)?;

    Ok(Json(service.get_all(user_id).await?))
}

pub async fn get_list(
    State(service): State<ListService>,
    session: Session,
    Path(list_id): Path<i32>,
) -> Result<Json<List>, ListError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(ListError::Unauthorized)?;

    Ok(Json(service.get(user_id, list_id).await?))
}

pub async fn create_list(
    State(service): State<ListService>,
    session: Session,
    Json(payload): Json<CreateListRequest>,
) -> Result<Json<List>, ListError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(ListError::Unauthorized)?;

    Ok(Json(
        service
            .create(user_id, payload.name, payload.description)
            .await?,
    ))
}

pub async fn update_list(
    State(service): State<ListService>,
    session: Session,
    Path(list_id): Path<i32>,
    Json(payload): Json<UpdateListRequest>,
) -> Result<Json<List>, ListError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(ListError::Unauthorized)?;

    Ok(Json(
        service
            .update(user_id, list_id, payload.name, payload.description)
            .await?,
    ))
}

pub async fn delete_list(
    State(service): State<ListService>,
    session: Session,
    Path(list_id): Path<i32>,
) -> Result<Json<ApiResponse>, ListError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(ListError::Unauthorized)?;

    if !service.delete(user_id, list_id).await? {
        return Err(ListError::NotFound);
    }

    Ok(Json(ApiResponse {
        success: true,
        message: "List deleted successfully".to_string(),
    }))
}

pub async fn get_list_with_flashcards(
    State(service): State<ListService>,
    session: Session,
    Path(list_id): Path<i32>,
) -> Result<Json<ListWithFlashcards>, ListError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(ListError::Unauthorized)?;

    Ok(Json(service.get_with_flashcards(user_id, list_id).await?))
}

pub async fn add_flashcard_to_list(
    State(service): State<ListService>,
    session: Session,
    Path((list_id, flashcard_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse>, ListError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(ListError::Unauthorized)?;

    if !service.add_flashcard(user_id, list_id, flashcard_id).await? {
        return Err(ListError::MemberNotFound);
    }

    Ok(Json(ApiResponse {
        success: true,
        message: "Flashcard added to list successfully".to_string(),
    }))
}

pub async fn remove_flashcard_from_list(
    State(service): State<ListService>,
    session: Session,
    Path((list_id, flashcard_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse>, ListError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(ListError::Unauthorized)?;

    if !service
        .remove_flashcard(user_id, list_id, flashcard_id)
        .await?
    {
        return Err(ListError::MemberNotFound);
    }

    Ok(Json(ApiResponse {
        success: true,
        message: "Flashcard removed from list successfully".to_string(),
    }))
}

pub fn list_router(service: ListService) -> Router {
    Router::new()
        .route("/", get(get_lists).post(create_list))
        .route(
            "/{list_id}",
            get(get_list).put(update_list).delete(delete_list),
        )
        .route("/{list_id}/flashcards", get(get_list_with_flashcards))
        .route(
            "/{list_id}/flashcards/{flashcard_id}",
            axum::routing::post(add_flashcard_to_list).delete(remove_flashcard_from_list),
        )
        .with_state(service)
}
