pub mod adverts;
pub mod auth;
pub mod authz;
pub mod credentials;
pub mod error;
pub mod middleware;
pub mod tokens;
pub mod users;
pub mod validate;
pub mod views;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

pub use auth::{AppState, AppStateInner};
pub use error::{ApiError, AuthFailure};

use crate::middleware::{open_session, require_auth};

/// Every route gets its own session; protected handlers additionally sit
/// behind `require_auth`. Methods added after `route_layer` stay public.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/login", post(auth::login))
        .route(
            "/user",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user)
                .route_layer(from_fn(require_auth))
                .post(users::create_user),
        )
        .route(
            "/adv",
            post(adverts::create_advertisement)
                .get(adverts::list_advertisements)
                .route_layer(from_fn(require_auth)),
        )
        .route(
            "/adv/{id}",
            get(adverts::get_advertisement)
                .patch(adverts::update_advertisement)
                .delete(adverts::delete_advertisement)
                .route_layer(from_fn(require_auth)),
        )
        .layer(from_fn_with_state(state.clone(), open_session))
        .with_state(state)
}
