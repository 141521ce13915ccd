use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use vote_webhook::{VoteWebhook, WebhookConfig};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = match WebhookConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    info!("Using {} storage", config.storage.name());
    let webhook = VoteWebhook::from_config(config);

    webhook.on_vote(|bot, user| info!("{user} voted for {bot}"));

    if let Err(e) = webhook.connect().await {
        error!("Failed to connect storage backend: {e}");
        std::process::exit(1);
    }

    if let Err(e) = webhook.listen().await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
