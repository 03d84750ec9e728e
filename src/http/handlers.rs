//! HTTP handlers for the user API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::api::{ActionResponse, ErrorResponse};
use super::error::ApiError;
use crate::intercept::{AuditInterceptor, RequestContext};
use crate::users::{AuditedUsers, ServiceError, User, UserOperations, UserService};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Plain business operations.
    pub users: Arc<UserService>,
    /// Interceptor wrapping every request's calls.
    pub interceptor: AuditInterceptor,
}

impl AppState {
    #[must_use]
    pub fn new(users: Arc<UserService>, interceptor: AuditInterceptor) -> Self {
        Self { users, interceptor }
    }

    fn audited<'a>(&'a self, ctx: &'a RequestContext) -> AuditedUsers<'a, UserService> {
        AuditedUsers::new(&self.users, &self.interceptor, ctx)
    }
}

/// POST /api/users - Create a user.
pub async fn create_user(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(user): Json<User>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let ctx = RequestContext::from(addr);
    let created = state.audited(&ctx).create_user(user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/users - List all users.
pub async fn list_users(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Json<Vec<User>>, ApiError> {
    let ctx = RequestContext::from(addr);
    Ok(Json(state.audited(&ctx).get_all_users().await?))
}

/// GET /api/users/{id} - Fetch one user.
pub async fn get_user(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let ctx = RequestContext::from(addr);
    state
        .audited(&ctx)
        .get_user_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::NotFound(id).into())
}

/// PUT /api/users/{id} - Replace a user's details.
pub async fn update_user(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(id): Path<i64>,
    Json(details): Json<User>,
) -> Result<Json<User>, ApiError> {
    let ctx = RequestContext::from(addr);
    Ok(Json(state.audited(&ctx).update_user(id, details).await?))
}

/// DELETE /api/users/{id} - Delete a user.
pub async fn delete_user(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let ctx = RequestContext::from(addr);
    state.audited(&ctx).delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/actions/{username} - Record that a user performed an action.
pub async fn perform_action(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(username): Path<String>,
) -> Result<Json<ActionResponse>, ApiError> {
    let ctx = RequestContext::from(addr);
    let message = state.audited(&ctx).perform_action(&username).await?;
    Ok(Json(ActionResponse { message }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}
