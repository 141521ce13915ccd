use std::sync::Arc;

use crate::services::{events::EventBus, ingest::VoteIngestor};

#[derive(Clone)]
pub struct AppState {
    pub ingestor: Arc<VoteIngestor>,
    pub events: Arc<EventBus>,
    pub path: Arc<str>,
}

impl AppState {
    pub fn new(ingestor: Arc<VoteIngestor>, events: Arc<EventBus>, path: &str) -> Self {
        Self {
            ingestor,
            events,
            path: Arc::from(path),
        }
    }
}
