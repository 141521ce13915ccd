use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::HeaderMap,
};

use crate::services::ingest::IngestResult;
use crate::state::AppState;
use crate::utils::request::requester;

pub async fn incoming_vote(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> IngestResult {
    let origin = requester(&headers, peer.map(|ConnectInfo(addr)| addr));

    state.ingestor.ingest(&body, &headers, &origin).await
}
