use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StorageBackend;
use crate::models::config_models::SupabaseConfig;
use crate::models::vote_record_models::VoteRecord;
use crate::utils::error::StorageError;

/// Row layout of a stored vote in the Supabase table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SupabaseVote {
    pub bot: String,
    pub user: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_weekend: bool,
    pub query: Option<String>,
    pub timestamp: i64,
}

impl From<&VoteRecord> for SupabaseVote {
    fn from(record: &VoteRecord) -> Self {
        Self {
            bot: record.bot.clone(),
            user: record.user.clone(),
            kind: record.kind.clone(),
            is_weekend: record.is_weekend,
            query: record.query.clone(),
            timestamp: record.timestamp,
        }
    }
}

/// Talks to the table through Supabase's PostgREST endpoint.
pub struct SupabaseBackend {
    http: Client,
    endpoint: Url,
    key: String,
}

impl SupabaseBackend {
    pub fn connect(config: &SupabaseConfig) -> Result<Self, StorageError> {
        Ok(Self {
            http: Client::new(),
            endpoint: table_endpoint(&config.url, &config.table)?,
            key: config.key.clone(),
        })
    }
}

pub fn table_endpoint(url: &str, table: &str) -> Result<Url, StorageError> {
    let raw = format!("{}/rest/v1/{}", url.trim_end_matches('/'), table);
    Url::parse(&raw).map_err(|e| StorageError::InvalidUrl(format!("{raw}: {e}")))
}

pub fn exists_params(bot: &str, user: &str, since: Option<i64>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("select", "bot".to_string()),
        ("bot", format!("eq.{bot}")),
        ("user", format!("eq.{user}")),
    ];
    if let Some(since) = since {
        params.push(("timestamp", format!("gt.{since}")));
    }
    params.push(("limit", "1".to_string()));
    params
}

#[async_trait]
impl StorageBackend for SupabaseBackend {
    fn name(&self) -> &'static str {
        "Supabase"
    }

    async fn insert(&self, record: &VoteRecord) -> Result<(), StorageError> {
        self.http
            .post(self.endpoint.clone())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "return=minimal")
            .json(&SupabaseVote::from(record))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    async fn exists(
        &self,
        bot: &str,
        user: &str,
        since: Option<i64>,
    ) -> Result<bool, StorageError> {
        let rows = self
            .http
            .get(self.endpoint.clone())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .query(&exists_params(bot, user, since))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Value>>()
            .await?;

        Ok(!rows.is_empty())
    }
}
