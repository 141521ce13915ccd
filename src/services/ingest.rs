use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::{debug, warn};

use super::events::EventBus;
use super::validator::{Rejection, VoteValidator};
use crate::db::BackendSlot;
use crate::models::vote_record_models::VoteRecord;
use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestResult {
    Accepted(VoteRecord),
    Unauthorized,
    InvalidRequest,
}

impl IntoResponse for IngestResult {
    fn into_response(self) -> Response {
        match self {
            IngestResult::Accepted(_) => {
                (StatusCode::OK, Json(json!({ "success": true }))).into_response()
            }
            IngestResult::Unauthorized => AppError::Unauthorized.into_response(),
            IngestResult::InvalidRequest => {
                AppError::InvalidRequest("rejected vote".to_string()).into_response()
            }
        }
    }
}

/// Validates, persists and announces incoming votes.
pub struct VoteIngestor {
    validator: VoteValidator,
    backend: BackendSlot,
    events: Arc<EventBus>,
}

impl VoteIngestor {
    pub fn new(validator: VoteValidator, backend: BackendSlot, events: Arc<EventBus>) -> Self {
        Self {
            validator,
            backend,
            events,
        }
    }

    /// `origin` only feeds diagnostics.
    pub async fn ingest(&self, body: &[u8], headers: &HeaderMap, origin: &str) -> IngestResult {
        let draft = match self.validator.validate(headers, body) {
            Ok(draft) => draft,
            Err(Rejection::Unauthorized) => {
                self.events
                    .debug(format!("Unauthorized request from {origin}"));
                return IngestResult::Unauthorized;
            }
            Err(Rejection::InvalidRequest(reason)) => {
                debug!("Rejected vote from {origin}: {reason}");
                self.events.debug(format!("Invalid request from {origin}"));
                return IngestResult::InvalidRequest;
            }
        };

        let record = draft.stamp(Utc::now().timestamp_millis());
        let summary = format!(
            "from {} for {} (Weekend: {})",
            record.user, record.bot, record.is_weekend
        );

        match self.backend.get() {
            Some(backend) => match backend.insert(&record).await {
                Ok(()) => self.events.debug(format!("Inserted vote {summary}")),
                Err(e) => {
                    warn!("{} insert failed: {e}", backend.name());
                    self.events
                        .debug(format!("Error inserting vote {summary}: {e}"));
                }
            },
            None => self.events.debug(format!(
                "No storage backend ready, vote {summary} was not persisted"
            )),
        }

        self.events.emit_vote(&record.bot, &record.user);
        self.events.debug(format!("Vote received {summary}"));

        IngestResult::Accepted(record)
    }
}
