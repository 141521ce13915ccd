use chrono::Utc;

use crate::db::BackendSlot;
use crate::utils::error::{AppError, AppResult};
use crate::utils::window::VoteWindow;

/// Answers "has this user voted for this bot", optionally within a window.
#[derive(Clone)]
pub struct VoteQueryService {
    backend: BackendSlot,
}

impl VoteQueryService {
    pub fn new(backend: BackendSlot) -> Self {
        Self { backend }
    }

    /// `filter` follows the `"<hours>h"` form; anything malformed means no bound.
    pub async fn has_voted(&self, bot: &str, user: &str, filter: Option<&str>) -> AppResult<bool> {
        let backend = self.backend.get().ok_or(AppError::NoBackendConfigured)?;

        let since = filter
            .and_then(VoteWindow::parse)
            .map(|window| window.since(Utc::now().timestamp_millis()));

        Ok(backend.exists(bot, user, since).await?)
    }
}
