use axum::{extract::State, http::Method, Json};
use serde_json::json;

use crate::state::AppState;

/// Any non-POST request on the webhook path.
pub async fn post_only(State(state): State<AppState>, method: Method) -> Json<serde_json::Value> {
    state
        .events
        .debug(format!("{method} request to {}", state.path));

    Json(json!({ "err": "This is a POST endpoint" }))
}
