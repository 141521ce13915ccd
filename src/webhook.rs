use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use tokio::{net::TcpListener, signal};
use tracing::info;

use crate::db::{connection::connect_backend, BackendSlot, StorageBackend};
use crate::models::config_models::{WebhookConfig, WebhookOptions};
use crate::routes::vote_routes::vote_routes;
use crate::services::{
    events::{EventBus, SubscriptionId},
    ingest::VoteIngestor,
    query::VoteQueryService,
    validator::VoteValidator,
};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

/// A vote webhook receiver bound to one storage backend.
///
/// Construction only validates configuration. The backend becomes usable
/// after [`VoteWebhook::connect`] (or [`VoteWebhook::attach_backend`]);
/// until then queries fail with [`AppError::NoBackendConfigured`] and
/// incoming votes are acknowledged without being stored.
pub struct VoteWebhook {
    config: WebhookConfig,
    events: Arc<EventBus>,
    backend: BackendSlot,
    ingestor: Arc<VoteIngestor>,
    query: VoteQueryService,
}

impl VoteWebhook {
    pub fn new(options: WebhookOptions) -> AppResult<Self> {
        Ok(Self::from_config(WebhookConfig::try_from(options)?))
    }

    pub fn from_config(config: WebhookConfig) -> Self {
        let events = Arc::new(EventBus::new(config.debug));
        let backend = BackendSlot::new();
        let ingestor = Arc::new(VoteIngestor::new(
            VoteValidator::new(config.auth.clone()),
            backend.clone(),
            Arc::clone(&events),
        ));
        let query = VoteQueryService::new(backend.clone());

        Self {
            config,
            events,
            backend,
            ingestor,
            query,
        }
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn on_vote<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.events.on_vote(listener)
    }

    pub fn on_debug<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.events.on_debug(listener)
    }

    pub fn is_ready(&self) -> bool {
        self.backend.is_ready()
    }

    /// Connects the configured backend. Succeeds at most once.
    pub async fn connect(&self) -> AppResult<()> {
        if self.backend.is_ready() {
            return Err(AppError::AlreadyConnected);
        }

        let backend = connect_backend(&self.config.storage).await?;
        self.backend.fill(backend)?;
        self.events
            .debug(format!("Connected to {}", self.config.storage.name()));

        Ok(())
    }

    /// Uses `backend` instead of the configured one.
    pub fn attach_backend(&self, backend: Arc<dyn StorageBackend>) -> AppResult<()> {
        let name = backend.name();
        self.backend.fill(backend)?;
        self.events.debug(format!("Connected to {name}"));
        Ok(())
    }

    pub async fn has_voted(&self, bot: &str, user: &str, filter: Option<&str>) -> AppResult<bool> {
        self.query.has_voted(bot, user, filter).await
    }

    pub fn router(&self) -> Router {
        vote_routes(AppState::new(
            Arc::clone(&self.ingestor),
            Arc::clone(&self.events),
            &self.config.path,
        ))
    }

    /// Serves the webhook until Ctrl+C or SIGTERM.
    pub async fn listen(&self) -> AppResult<()> {
        let address = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = TcpListener::bind(address).await?;

        info!("Webhook listening on {address}{}", self.config.path);
        self.events
            .debug(format!("Listening on port {}", self.config.port));

        axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        info!("Webhook shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
