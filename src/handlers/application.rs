use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{Application, ApplicationCreate, ApplicationUpdate};
use crate::state::AppState;

/// GET /application/all - every stored application, datastore order.
pub async fn list_all(State(state): State<AppState>) -> ApiResult<Vec<Application>> {
    let applications = state
        .store
        .list_all()
        .await
        .map_err(|e| ApiError::server_error(format!("Error fetching applications: {}", e)))?;

    Ok(Json(applications))
}

/// GET /application/:application_id - a single application by id.
pub async fn get(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> ApiResult<Application> {
    let application = state
        .store
        .get(application_id)
        .await
        .map_err(|e| ApiError::server_error(format!("Error fetching application: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;

    Ok(Json(application))
}

/// GET /application/user/:user_id - applications owned by one user.
/// An empty result is not an error.
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<Application>> {
    let applications = state
        .store
        .list_by_user(&user_id)
        .await
        .map_err(|e| ApiError::server_error(format!("Error fetching applications: {}", e)))?;

    Ok(Json(applications))
}

/// POST /application - create a new application. The datastore assigns the
/// id and timestamps.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ApplicationCreate>,
) -> ApiResult<Application> {
    let created = state
        .store
        .insert(&payload)
        .await
        .map_err(|e| ApiError::server_error(format!("Error creating application: {}", e)))?;

    Ok(Json(created))
}

/// PUT /application/:application_id - partial update; absent fields keep
/// their stored values.
pub async fn update(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Json(payload): Json<ApplicationUpdate>,
) -> ApiResult<Application> {
    let updated = state
        .store
        .update(application_id, &payload)
        .await
        .map_err(|e| ApiError::server_error(format!("Error updating application: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;

    Ok(Json(updated))
}

/// DELETE /application/:application_id - delete one application.
pub async fn delete(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> ApiResult<Value> {
    let deleted = state
        .store
        .delete(application_id)
        .await
        .map_err(|e| ApiError::server_error(format!("Error deleting application: {}", e)))?;

    if !deleted {
        return Err(ApiError::not_found("Application not found"));
    }

    Ok(Json(json!({ "message": "Application deleted successfully" })))
}

/// DELETE /application/user/:user_id - delete every application owned by
/// one user.
pub async fn delete_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Value> {
    let deleted = state
        .store
        .delete_by_user(&user_id)
        .await
        .map_err(|e| ApiError::server_error(format!("Error deleting user applications: {}", e)))?;

    if deleted == 0 {
        return Err(ApiError::not_found("No applications found for this user"));
    }

    Ok(Json(
        json!({ "message": "All applications for user deleted successfully" }),
    ))
}
