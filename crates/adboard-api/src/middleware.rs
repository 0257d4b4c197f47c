use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use adboard_db::Session;
use adboard_db::models::TokenRow;

use crate::auth::AppState;
use crate::error::{ApiError, AuthFailure};
use crate::tokens;

/// The authenticated caller, attached by [`require_auth`].
#[derive(Debug, Clone)]
pub struct Caller {
    pub token: TokenRow,
}

impl Caller {
    pub fn user_id(&self) -> i64 {
        self.token.user_id
    }
}

/// Check out one connection for the whole request. The handler sees it as
/// `Extension<Session>`; it goes back to the pool once the request is done,
/// whatever the outcome.
pub async fn open_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = state.db.session()?;
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

/// Resolve the raw `Authorization` header value to a token before the
/// handler runs.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let session = req
        .extensions()
        .get::<Session>()
        .cloned()
        .ok_or_else(|| ApiError::Internal("no session attached to request".into()))?;

    let token = {
        let presented = req
            .headers()
            .get(header::AUTHORIZATION)
            .ok_or(ApiError::Unauthenticated(AuthFailure::MissingToken))?;

        let value = presented
            .to_str()
            .map_err(|_| ApiError::Unauthenticated(AuthFailure::InvalidToken))?;

        tokens::resolve(&session, value).inspect_err(|_| {
            debug!("Rejected unknown token on {} {}", req.method(), req.uri().path());
        })?
    };

    req.extensions_mut().insert(Caller { token });
    Ok(next.run(req).await)
}
