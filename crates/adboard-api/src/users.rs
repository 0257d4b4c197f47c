use axum::{Extension, Json};
use tracing::info;

use adboard_db::Session;
use adboard_db::models::UserRow;
use adboard_db::store;
use adboard_types::api::{StatusResponse, UserDetail, UserSummary};

use crate::credentials::hash_password;
use crate::error::ApiError;
use crate::middleware::Caller;
use crate::validate::{CREATE_USER, Cleaned, JsonPayload, PATCH_USER, validate};
use crate::views;

/// Replace a plaintext password, if present, with its hash.
fn seal_password(cleaned: &mut Cleaned) -> Result<(), ApiError> {
    if let Some(plain) = cleaned.get("password") {
        let hashed = hash_password(plain)?;
        cleaned.replace("password", hashed);
    }
    Ok(())
}

/// POST /user, open registration.
pub async fn create_user(
    Extension(session): Extension<Session>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<UserSummary>, ApiError> {
    let mut cleaned = validate(&CREATE_USER, &payload)?;
    seal_password(&mut cleaned)?;

    let user: UserRow = store::create(&session, cleaned.into_fields())?;
    info!(user_id = user.id, "User created");

    Ok(Json(views::user_summary(&user)))
}

pub async fn get_user(
    Extension(session): Extension<Session>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<UserDetail>, ApiError> {
    let user: UserRow = store::get_by_id(&session, caller.user_id())?;
    let advertisement_ids = session.advertisement_ids_for_user(user.id)?;

    Ok(Json(views::user_detail(&user, advertisement_ids)))
}

/// PATCH /user. Only the fields sent are changed.
pub async fn update_user(
    Extension(session): Extension<Session>,
    Extension(caller): Extension<Caller>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<UserSummary>, ApiError> {
    let mut cleaned = validate(&PATCH_USER, &payload)?;
    seal_password(&mut cleaned)?;

    let user: UserRow = store::get_by_id(&session, caller.user_id())?;
    let user = store::update(&session, &user, cleaned.into_fields())?;

    Ok(Json(views::user_summary(&user)))
}

/// DELETE /user. Takes the user's advertisements and tokens with it.
pub async fn delete_user(
    Extension(session): Extension<Session>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<StatusResponse>, ApiError> {
    let user: UserRow = store::get_by_id(&session, caller.user_id())?;
    let user_id = user.id;
    store::delete(&session, user)?;
    info!(user_id, "User deleted");

    Ok(Json(views::status_ok()))
}
