use axum::{routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::controllers::vote_controllers::{incoming_vote, not_found, post_only};
use crate::state::AppState;

pub fn vote_routes(state: AppState) -> Router {
    let path = state.path.to_string();
    let webhook = post(incoming_vote::incoming_vote).fallback(post_only::post_only);

    let mut router = Router::new().route(&path, webhook.clone());
    if path != "/" {
        router = router.route(&format!("{path}/"), webhook);
    }

    router
        .fallback(not_found::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
