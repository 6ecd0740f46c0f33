pub mod auth;
pub mod bouquets;

use axum::routing::{get, post, put};
use axum::Router;

use crate::middleware::auth::require_auth;
use crate::state::SharedState;

/// Reads and auth entry points are open. Everything that mutates bouquets or
/// needs a session sits behind [`require_auth`].
pub fn api_routes(state: SharedState) -> Router<SharedState> {
    let public = Router::new()
        .route("/user/register", post(auth::register))
        .route("/user/login", post(auth::login))
        .route("/bouquets", get(bouquets::list))
        .route("/bouquets/{id}", get(bouquets::show));

    let protected = Router::new()
        .route("/user/logout", post(auth::logout))
        .route("/user/whoami", get(auth::whoami))
        .route("/bouquets", post(bouquets::create))
        .route("/bouquets/{id}", put(bouquets::update).delete(bouquets::delete))
        .route_layer(axum::middleware::from_fn_with_state(state, require_auth));

    public.merge(protected)
}
