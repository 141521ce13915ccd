use axum::{extract::State, http::Uri};

use crate::state::AppState;
use crate::utils::error::AppError;

pub async fn not_found(State(state): State<AppState>, uri: Uri) -> AppError {
    state.events.debug(format!("404 Not found: {uri}"));

    AppError::NotFound
}
