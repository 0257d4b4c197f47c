use std::sync::Arc;

use axum::{Extension, Json};
use tracing::info;

use adboard_db::{Database, Session};
use adboard_types::api::LoginResponse;

use crate::credentials::verify_password;
use crate::error::{ApiError, AuthFailure};
use crate::tokens;
use crate::validate::{JsonPayload, LOGIN, validate};
use crate::views;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

/// POST /login. An unknown name is 404, a wrong password 401.
pub async fn login(
    Extension(session): Extension<Session>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<LoginResponse>, ApiError> {
    let cleaned = validate(&LOGIN, &payload)?;
    let name = cleaned.require("name")?;

    let user = session
        .find_user_by_name(name)?
        .ok_or_else(|| ApiError::NotFound("user not found".into()))?;

    if !verify_password(cleaned.require("password")?, &user.password) {
        info!(user_id = user.id, "Login rejected: wrong password");
        return Err(ApiError::Unauthenticated(AuthFailure::InvalidPassword));
    }

    let token = tokens::issue(&session, user.id)?;
    info!(user_id = user.id, "Login succeeded, token issued");

    Ok(Json(views::token_issued(&token)))
}
