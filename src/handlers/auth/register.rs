use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use tower_sessions::Session;
use validator::Validate;

use crate::{
    data::db::DbPool,
    data::models::{RegisterError, RegisterForm, UserResponse},
    data::repositories::UserRepository,
    utils::set_user_session,
};

#[axum::debug_handler]
pub async fn handle_register(
    State(pool): State<DbPool>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> Result<Json<UserResponse>, RegisterError> {
    form.validate().map_err(RegisterError::from)?;

    let user = tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(|e| {
            log::error!("Failed to get DB connection: {}", e);
            RegisterError::SessionError("Failed to get DB connection".into())
        })?;

        if UserRepository::email_exists(&mut conn, &form.email)? {
            log::warn!("Registration attempt with existing email: {}", form.email);
            return Err(RegisterError::EmailTaken);
        }

        UserRepository::create_user(
            &mut conn,
            &form.email,
            &form.password,
            form.full_name.as_deref(),
        )
        .map_err(|e| {
            log::error!("User creation failed: {}", e);
            RegisterError::DatabaseError(e)
        })
    })
    .await
    .map_err(|e| RegisterError::SessionError(e.to_string()))??;

    set_user_session(&session, user.id, &user.email)
        .await
        .map_err(|e| {
            log::error!("Failed to set session: {:?}", e);
            RegisterError::SessionError("Failed to set user session".into())
        })?;

    log::info!("New user registered: {}", user.email);
    Ok(Json(UserResponse::from(user)))
}

pub fn auth_router(pool: DbPool) -> Router {
    Router::new()
        .route("/register", post(handle_register))
        .with_state(pool)
}
