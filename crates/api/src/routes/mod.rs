//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod accounts;
pub mod dashboard;
pub mod health;
pub mod ledgers;
pub mod reports;
pub mod trips;

/// Creates the API router; everything except health checks requires a bearer token.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(trips::routes())
        .merge(ledgers::routes())
        .merge(accounts::routes())
        .merge(dashboard::routes())
        .merge(reports::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}
