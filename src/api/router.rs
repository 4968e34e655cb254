use axum::{
    extract::State,
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, security_headers_middleware};
use super::state::AppState;
use super::users;

/// User pages, relative to the mount path
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/edit/{id}", get(users::edit_user))
        .route("/update/{id}", post(users::update_user))
        .route("/delete/{id}", get(users::delete_user))
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    let prefix = state.paths.prefix().to_string();

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check));

    router = if prefix.is_empty() {
        router.merge(user_routes())
    } else {
        router
            .route("/", get(root_redirect))
            .nest(&prefix, user_routes())
    };

    router
        .with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

async fn root_redirect(State(state): State<AppState>) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, state.paths.list().to_string())],
    )
        .into_response()
}
