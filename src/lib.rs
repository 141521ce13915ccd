//! Receives vote notifications from a bot-listing site, stores each vote in
//! MongoDB or Supabase, and answers whether a user has voted for a bot.
//!
//! ```no_run
//! use vote_webhook::{VoteWebhook, WebhookOptions, MongoOptions};
//!
//! # async fn run() -> vote_webhook::AppResult<()> {
//! let webhook = VoteWebhook::new(WebhookOptions {
//!     mongo: Some(MongoOptions {
//!         url: Some("mongodb://localhost:27017".to_string()),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! })?;
//!
//! webhook.on_vote(|bot, user| println!("{user} voted for {bot}"));
//! webhook.connect().await?;
//!
//! let recent = webhook.has_voted("botid", "userid", Some("12h")).await?;
//! # let _ = recent;
//! webhook.listen().await
//! # }
//! ```

pub mod controllers;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod webhook;

pub use db::{memory::MemoryBackend, StorageBackend};
pub use models::config_models::{
    MongoOptions, StorageConfig, SupabaseOptions, WebhookConfig, WebhookOptions,
};
pub use models::vote_record_models::VoteRecord;
pub use services::events::{EventBus, SubscriptionId};
pub use utils::error::{AppError, AppResult, StorageError};
pub use webhook::VoteWebhook;
