use axum::{
    extract::{Json, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::data::models::{
    ExampleError, ExamplesResponse, FlashcardWithExamples, GenerateExamplesRequest,
};
use crate::services::ExampleService;
use crate::utils::get_current_user_id;

#[derive(Deserialize)]
pub struct ExamplesQuery {
    pub flashcard_id: i32,
}

pub async fn create_examples(
    State(service): State<ExampleService>,
    session: Session,
    Json(request): Json<GenerateExamplesRequest>,
) -> Result<Json<ExamplesResponse>, ExampleError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(ExampleError::Unauthorized)?;

    if !(1..=10).contains(&request.count) {
        return Err(ExampleError::InvalidCount);
    }

    let response = service
        .generate(user_id, request.flashcard_id, request.count)
        .await?;

    Ok(Json(response))
}

pub async fn get_saved_examples(
    State(service): State<ExampleService>,
    session: Session,
    Query(query): Query<ExamplesQuery>,
) -> Result<Json<ExamplesResponse>, ExampleError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(ExampleError::Unauthorized)?;

    Ok(Json(service.get_saved(user_id, query.flashcard_id).await?))
}

pub async fn get_flashcard_with_examples(
    State(service): State<ExampleService>,
    session: Session,
    Query(query): Query<ExamplesQuery>,
) -> Result<Json<FlashcardWithExamples>, ExampleError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(ExampleError::Unauthorized)?;

    Ok(Json(
        service
            .get_with_flashcard(user_id, query.flashcard_id)
            .await?,
    ))
}

pub fn example_router(service: ExampleService) -> Router {
    Router::new()
        .route("/examples", get(get_saved_examples).post(create_examples))
        .route("/flashcard-with-examples", get(get_flashcard_with_examples))
        .with_state(service)
}
