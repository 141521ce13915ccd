use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A vote as persisted by every storage adapter.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub bot: String,

    pub user: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub is_weekend: bool,

    pub query: Option<String>,

    /// Server-side receipt time in epoch milliseconds.
    pub timestamp: i64,
}

/// A validated vote that has not been stamped with a receipt time yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteDraft {
    pub bot: String,
    pub user: String,
    pub kind: String,
    pub is_weekend: bool,
    pub query: Option<String>,
}

impl VoteDraft {
    pub fn stamp(self, timestamp: i64) -> VoteRecord {
        VoteRecord {
            bot: self.bot,
            user: self.user,
            kind: self.kind,
            is_weekend: self.is_weekend,
            query: self.query,
            timestamp,
        }
    }
}

/// Raw webhook body. Every field is kept loose so that shape checks
/// produce an `InvalidRequest` instead of a deserialization failure.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VotePayload {
    pub bot: Option<Value>,
    pub user: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub is_weekend: Option<Value>,
    pub query: Option<Value>,
}
