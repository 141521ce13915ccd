use async_trait::async_trait;
use mongodb::{
    bson::{doc, Document},
    options::ClientOptions,
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use super::StorageBackend;
use crate::models::config_models::MongoConfig;
use crate::models::vote_record_models::VoteRecord;
use crate::utils::error::StorageError;

/// Document layout of a stored vote.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MongoVote {
    pub bot: String,
    pub user: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "isWeekend")]
    pub is_weekend: bool,
    pub query: Option<String>,
    pub timestamp: i64,
}

impl From<&VoteRecord> for MongoVote {
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

pub struct MongoBackend {
    votes: Collection<MongoVote>,
}

impl MongoBackend {
    pub async fn connect(config: &MongoConfig) -> Result<Self, StorageError> {
        let mut client_options = ClientOptions::parse(&config.url).await?;
        client_options.app_name = Some("vote-webhook".to_string());

        let client = Client::with_options(client_options)?;
        let database = client.database(&config.db);

        // The driver connects lazily; ping so a bad url fails here.
        database.run_command(doc! { "ping": 1 }).await?;

        Ok(Self {
            votes: database.collection::<MongoVote>(&config.collection),
        })
    }
}

pub fn vote_filter(bot: &str, user: &str, since: Option<i64>) -> Document {
    let mut filter = doc! { "bot": bot, "user": user };
    if let Some(since) = since {
        filter.insert("timestamp", doc! { "$gt": since });
    }
    filter
}

#[async_trait]
impl StorageBackend for MongoBackend {
    fn name(&self) -> &'static str {
        "MongoDB"
    }

    async fn insert(&self, record: &VoteRecord) -> Result<(), StorageError> {
        self.votes.insert_one(MongoVote::from(record)).await?;
        Ok(())
    }

    async fn exists(
        &self,
        bot: &str,
        user: &str,
        since: Option<i64>,
    ) -> Result<bool, StorageError> {
        let matches = self
            .votes
            .count_documents(vote_filter(bot, user, since))
            .limit(1)
            .await?;

        Ok(matches > 0)
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{self, Bson};

    use super::*;

    #[test]
    fn document_keeps_camel_case_fields() {
        let record = VoteRecord {
            bot: "b1".to_string(),
            user: "u1".to_string(),
            kind: "upvote".to_string(),
            is_weekend: true,
            query: None,
            timestamp: 1_700_000_000_000,
        };
        let document = bson::to_document(&MongoVote::from(&record)).unwrap();

        assert_eq!(document.get_str("type").unwrap(), "upvote");
        assert!(document.get_bool("isWeekend").unwrap());
        assert_eq!(document.get("query"), Some(&Bson::Null));
        assert_eq!(document.get_i64("timestamp").unwrap(), 1_700_000_000_000);
    }

    #[test]
    fn filter_adds_strict_lower_bound() {
        assert_eq!(vote_filter("b1", "u1", None), doc! { "bot": "b1", "user": "u1" });
        assert_eq!(
            vote_filter("b1", "u1", Some(42)),
            doc! { "bot": "b1", "user": "u1", "timestamp": { "$gt": 42_i64 } }
        );
    }
}
