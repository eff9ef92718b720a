//! User resource endpoints. Every handler goes through `UserService`, which
//! applies the simulated latency before the store is touched.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use latency_workshop_common::{NewUser, User, UserId, UserPatch};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_email(value: &str) -> Result<(), ApiError> {
    require_text("email", value)?;
    if !value.contains('@') {
        return Err(ApiError::Validation(format!("{value:?} is not a valid email")));
    }
    Ok(())
}

fn validate_new(user: &NewUser) -> Result<(), ApiError> {
    require_text("name", &user.name)?;
    require_email(&user.email)?;
    require_text("role", &user.role)
}

fn validate_patch(patch: &UserPatch) -> Result<(), ApiError> {
    if let Some(name) = &patch.name {
        require_text("name", name)?;
    }
    if let Some(email) = &patch.email {
        require_email(email)?;
    }
    if let Some(role) = &patch.role {
        require_text("role", role)?;
    }
    Ok(())
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.list_users().await?))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.get_user(id).await?))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    validate_new(&new)?;
    let user = state.users.create_user(new).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PATCH|PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> Result<Json<User>, ApiError> {
    validate_patch(&patch)?;
    Ok(Json(state.users.update_user(id, patch).await?))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<Value>, ApiError> {
    let user = state.users.delete_user(id).await?;
    Ok(Json(json!({
        "message": format!("User {} deleted successfully", user.name),
    })))
}

/// POST /users/reset
pub async fn reset_users(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let created = state.users.reset_users().await?;
    Ok(Json(json!({
        "message": "Database reset successfully",
        "users_created": created,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_new_user() {
        let mut user = NewUser {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role: "Engineer".into(),
        };
        assert!(validate_new(&user).is_ok());

        user.email = "not-an-email".into();
        assert!(matches!(validate_new(&user), Err(ApiError::Validation(_))));

        user.email = "ada@example.com".into();
        user.name = "   ".into();
        assert!(matches!(validate_new(&user), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_validate_patch_checks_only_present_fields() {
        assert!(validate_patch(&UserPatch::default()).is_ok());
        let patch = UserPatch {
            role: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_err());
    }
}
