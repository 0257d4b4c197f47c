use axum::{
    Extension, Json,
    extract::Path,
};
use tracing::info;

use adboard_db::Session;
use adboard_db::models::AdvertisementRow;
use adboard_db::store;
use adboard_types::api::{AdvertisementResponse, AdvertisementSummary, StatusResponse};

use crate::authz::assert_owner;
use crate::error::ApiError;
use crate::middleware::Caller;
use crate::validate::{CREATE_ADVERTISEMENT, JsonPayload, PATCH_ADVERTISEMENT, validate};
use crate::views;

/// Look up an advertisement and make sure the caller owns it.
fn owned_advertisement(
    session: &Session,
    caller: &Caller,
    id: i64,
) -> Result<AdvertisementRow, ApiError> {
    let ad: AdvertisementRow = store::get_by_id(session, id)?;
    assert_owner(&ad, caller.user_id())?;
    Ok(ad)
}

/// POST /adv. The caller always becomes the owner.
pub async fn create_advertisement(
    Extension(session): Extension<Session>,
    Extension(caller): Extension<Caller>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<AdvertisementResponse>, ApiError> {
    let cleaned = validate(&CREATE_ADVERTISEMENT, &payload)?;
    let fields = cleaned.into_fields().set("user_id", caller.user_id());

    let ad: AdvertisementRow = store::create(&session, fields)?;
    info!(advertisement_id = ad.id, user_id = ad.user_id, "Advertisement created");

    Ok(Json(views::advertisement_detail(&ad)))
}

/// GET /adv. The caller's own advertisements, oldest first.
pub async fn list_advertisements(
    Extension(session): Extension<Session>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<AdvertisementResponse>>, ApiError> {
    let ads = session.advertisements_for_user(caller.user_id())?;
    Ok(Json(ads.iter().map(views::advertisement_detail).collect()))
}

pub async fn get_advertisement(
    Extension(session): Extension<Session>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<AdvertisementResponse>, ApiError> {
    let ad = owned_advertisement(&session, &caller, id)?;
    Ok(Json(views::advertisement_detail(&ad)))
}

pub async fn update_advertisement(
    Extension(session): Extension<Session>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<AdvertisementSummary>, ApiError> {
    let cleaned = validate(&PATCH_ADVERTISEMENT, &payload)?;
    let ad = owned_advertisement(&session, &caller, id)?;
    let ad = store::update(&session, &ad, cleaned.into_fields())?;

    Ok(Json(views::advertisement_summary(&ad)))
}

pub async fn delete_advertisement(
    Extension(session): Extension<Session>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>, ApiError> {
    let ad = owned_advertisement(&session, &caller, id)?;
    store::delete(&session, ad)?;
    info!(advertisement_id = id, "Advertisement deleted");

    Ok(Json(views::status_ok()))
}
