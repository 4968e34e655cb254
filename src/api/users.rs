//! User management pages

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, error};

use crate::api::state::AppState;
use crate::api::types::{messages, ApiError, Payload};
use crate::api::views::RoutePaths;
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

/// Creation form. Missing fields arrive as empty strings and fail validation.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Update form. Only these fields are read; anything else in the body is ignored.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<CreateUserForm> for CreateUserRequest {
    fn from(form: CreateUserForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            password: form.password,
        }
    }
}

impl From<UpdateUserForm> for UpdateUserRequest {
    fn from(form: UpdateUserForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            password: form.password,
        }
    }
}

fn redirect_to_list(paths: &RoutePaths) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, paths.list().to_string())],
    )
        .into_response()
}

/// GET / - Render every user
pub async fn list_users(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let users = state
        .user_service
        .list()
        .await
        .map_err(|e| ApiError::from_domain(e, messages::LIST_FAILED))?;

    let html = state.views.render_index(&users, &state.paths).map_err(|e| {
        error!(error = %e, "Failed to render user list");
        ApiError::internal(messages::LIST_FAILED)
    })?;

    Ok(Html(html))
}

/// POST / - Create a user and go back to the list
pub async fn create_user(
    State(state): State<AppState>,
    Payload(form): Payload<CreateUserForm>,
) -> Result<Response, ApiError> {
    let user = state
        .user_service
        .create(form.into())
        .await
        .map_err(|e| ApiError::from_domain(e, messages::CREATE_FAILED))?;

    debug!(user_id = %user.id(), "Redirecting after create");
    Ok(redirect_to_list(&state.paths))
}

/// GET /edit/{id} - Render the edit form
pub async fn edit_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let user = state
        .user_service
        .get(&id)
        .await
        .map_err(|e| ApiError::from_domain(e, messages::FETCH_FAILED))?;

    let html = state.views.render_edit(&user, &state.paths).map_err(|e| {
        error!(error = %e, user_id = %id, "Failed to render edit form");
        ApiError::internal(messages::FETCH_FAILED)
    })?;

    Ok(Html(html))
}

/// POST /update/{id} - Apply the submitted fields
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(form): Payload<UpdateUserForm>,
) -> Result<Response, ApiError> {
    state
        .user_service
        .update(&id, form.into())
        .await
        .map_err(|e| ApiError::from_domain(e, messages::UPDATE_FAILED))?;

    Ok(redirect_to_list(&state.paths))
}

/// GET /delete/{id} - Remove a user
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    state
        .user_service
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_domain(e, messages::DELETE_FAILED))?;

    Ok(redirect_to_list(&state.paths))
}
