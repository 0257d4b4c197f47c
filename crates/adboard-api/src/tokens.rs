//! Bearer tokens are opaque random values stored in the `tokens` table and
//! looked up by equality. Nothing is signed or decoded.

use uuid::Uuid;

use adboard_db::models::TokenRow;
use adboard_db::store::{self, Fields};
use adboard_db::{Session, StoreError};

use crate::error::{ApiError, AuthFailure};

/// Persist a new token for `user_id`. Earlier tokens stay valid.
pub fn issue(session: &Session, user_id: i64) -> Result<TokenRow, StoreError> {
    store::create(
        session,
        Fields::new()
            .set("token", Uuid::new_v4().to_string())
            .set("user_id", user_id),
    )
}

pub fn resolve(session: &Session, value: &str) -> Result<TokenRow, ApiError> {
    session
        .find_token(value)?
        .ok_or(ApiError::Unauthenticated(AuthFailure::InvalidToken))
}
