use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use tower_sessions::Session;

use crate::{
    data::db::DbPool,
    data::models::{LoginError, LoginForm, UserResponse},
    data::repositories::UserRepository,
    utils::{get_current_user_id, set_user_session},
};

#[axum::debug_handler]
pub async fn handle_login(
    State(pool): State<DbPool>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<UserResponse>, LoginError> {
    let email = form.email.clone();

    // bcrypt verification is CPU-heavy, keep it off the async runtime
    let user = tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(|e| {
            log::error!("Failed to get DB connection: {}", e);
            LoginError::SessionError("Failed to get DB connection".into())
        })?;

        let user = UserRepository::find_by_email(&mut conn, &form.email)?
            .ok_or(LoginError::InvalidCredentials)?;

        if !UserRepository::verify_password(&user.password, &form.password)? {
            return Err(LoginError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(LoginError::AccountDisabled);
        }

        Ok(user)
    })
    .await
    .map_err(|e| LoginError::SessionError(e.to_string()))?
    .inspect_err(|_| log::warn!("Failed login attempt for {}", email))?;

    set_user_session(&session, user.id, &user.email).await?;

    Ok(Json(UserResponse::from(user)))
}

/// Current-user view for the session cookie holder.
#[axum::debug_handler]
pub async fn handle_me(
    State(pool): State<DbPool>,
    session: Session,
) -> Result<Json<UserResponse>, LoginError> {
    let user_id = get_current_user_id(&session)
        .await
        .ok_or(LoginError::NotAuthenticated)?;

    let user = tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(|e| {
            log::error!("Failed to get DB connection: {}", e);
            LoginError::SessionError("Failed to get DB connection".into())
        })?;

        // a session can outlive its user row
        UserRepository::find_by_id(&mut conn, user_id)?.ok_or(LoginError::NotAuthenticated)
    })
    .await
    .map_err(|e| LoginError::SessionError(e.to_string()))??;

    Ok(Json(UserResponse::from(user)))
}

pub async fn handle_logout(session: Session) -> Result<Json<serde_json::Value>, LoginError> {
    session.delete().await.map_err(|e| {
        log::error!("Failed to delete session: {}", e);
        LoginError::SessionError("Failed to logout".into())
    })?;
    Ok(Json(serde_json::json!({ "message": "Logged out" })))
}

pub fn auth_router(pool: DbPool) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", get(handle_logout))
        .route("/me", get(handle_me))
        .with_state(pool)
}
