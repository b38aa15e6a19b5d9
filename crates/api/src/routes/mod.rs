//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod ai;
pub mod auth;
pub mod forms;
pub mod health;
pub mod profile;
pub mod smart_ledger;
pub mod subscription;

/// Creates the API router with public and JWT-protected routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(profile::routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(forms::routes())
        .merge(ai::routes())
        .merge(smart_ledger::routes())
        .merge(subscription::routes())
        .merge(protected_routes)
}
