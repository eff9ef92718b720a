use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let status = state.latency.status();
    Json(json!({
        "message": format!("Welcome to {}!", state.info.name),
        "version": state.info.version,
        "description": state.info.description,
        "endpoints": {
            "users": {
                "GET /users": "List all users",
                "GET /users/{id}": "Get a user",
                "POST /users": "Create a user",
                "PATCH /users/{id}": "Update a user",
                "DELETE /users/{id}": "Delete a user",
                "POST /users/reset": "Reset database",
            },
            "latency": {
                "GET /latency": "View current latency status",
                "GET /latency/modes": "View all available modes",
                "POST /latency": "Change latency mode",
                "POST /latency/reset": "Reset to default mode",
            },
        },
        "current_latency": {
            "mode": status.current_mode,
            "read_delay_ms": status.read_delay * 1000.0,
            "write_delay_ms": status.write_delay * 1000.0,
            "description": status.description,
        },
    }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": state.info.version,
        "latency_mode": state.latency.get_active_mode(),
    }))
}
