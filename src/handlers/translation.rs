use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::enrich::{Enricher, EnrichmentError};
use crate::utils::get_current_user_id;

#[derive(Deserialize)]
pub struct TextInput {
    pub chinese: String,
}

#[derive(Serialize)]
pub struct TranslationResponse {
    pub translation: String,
}

#[derive(Serialize)]
pub struct PinyinResponse {
    pub pinyin: String,
}

pub async fn translate(
    State(enricher): State<Arc<Enricher>>,
    session: Session,
    Json(input): Json<TextInput>,
) -> Result<Json<TranslationResponse>, (StatusCode, String)> {
    if get_current_user_id(&session).await.is_none() {
        return Err((StatusCode::UNAUTHORIZED, "Not logged in".to_string()));
    }

    let translation = match enricher.definitions(&input.chinese).await {
        Ok(defs) => defs.into_iter().next().unwrap_or_default(),
        Err(EnrichmentError::NoDefinitions(_)) => String::new(),
        Err(e) => return Err((StatusCode::BAD_GATEWAY, e.to_string())),
    };

    Ok(Json(TranslationResponse { translation }))
}

pub async fn pinyin(
    State(enricher): State<Arc<Enricher>>,
    session: Session,
    Json(input): Json<TextInput>,
) -> Result<Json<PinyinResponse>, (StatusCode, String)> {
    if get_current_user_id(&session).await.is_none() {
        return Err((StatusCode::UNAUTHORIZED, "Not logged in".to_string()));
    }

    Ok(Json(PinyinResponse {
        pinyin: enricher.romanize(&input.chinese),
    }))
}

pub fn translation_router(enricher: Arc<Enricher>) -> Router {
    Router::new()
        .route("/translate", post(translate))
        .route("/pinyin", post(pinyin))
        .with_state(enricher)
}
